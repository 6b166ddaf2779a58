use crate::filter::Dimension;
use crate::filter::Selection;
use crate::views::parallel::ClassFilter;

/// A user interaction, dispatched to the [`Controller`](crate::controller::Controller).
///
/// Every command is followed by a full refilter and re-aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Selects a value on its dimension, or clears the dimension if the value
    /// is already selected.
    ToggleFilter(Selection),
    /// Toggles the parallel coordinates class legend.
    ToggleClass(ClassFilter),
    ClearDimension(Dimension),
    /// Picks the record at the given position of the balanced dataset for
    /// comparison with its class means. Filters are left untouched.
    Inspect(usize),
    ClearInspection,
    /// Clears every dimension, the class legend and the inspected record.
    Reset,
}

impl From<Selection> for Command {
    fn from(selection: Selection) -> Self {
        Command::ToggleFilter(selection)
    }
}
