use glycolens_dataset::Dataset;
use glycolens_dataset::Record;
use glycolens_dataset::geo::Boundaries;
use serde::Serialize;
use tracing::debug;
use tracing::warn;

use crate::command::Command;
use crate::filter::FilterState;
use crate::filter::Selection;
use crate::filter::apply_filters;
use crate::views::gender;
use crate::views::gender::GenderCard;
use crate::views::map;
use crate::views::map::MapSummary;
use crate::views::parallel;
use crate::views::parallel::ClassFilter;
use crate::views::parallel::Inspection;
use crate::views::parallel::ParallelSummary;
use crate::views::race;
use crate::views::race::RaceRadial;
use crate::views::smoking;
use crate::views::smoking::SmokingSummary;

/// Owns the balanced records and the shared filter state, and recomputes
/// every view after each command.
#[derive(Debug, Clone)]
pub struct Controller {
    records: Vec<Record>,
    boundaries: Option<Boundaries>,
    smoking_categories: Vec<String>,
    state: FilterState,
    legend: ClassFilter,
    inspected: Option<usize>,
}

impl Controller {
    pub fn new(dataset: Dataset) -> Controller {
        let smoking_categories = dataset.smoking_categories();

        Self {
            records: dataset.records,
            boundaries: dataset.boundaries,
            smoking_categories,
            state: FilterState::new(),
            legend: ClassFilter::default(),
            inspected: None,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn legend(&self) -> ClassFilter {
        self.legend
    }

    /// The position of the inspected record in [`Controller::records`].
    pub fn inspected(&self) -> Option<usize> {
        self.inspected
    }

    /// The smoking categories of the balanced dataset, fixed at load.
    pub fn smoking_categories(&self) -> &[String] {
        &self.smoking_categories
    }

    pub fn toggle_filter(&mut self, selection: Selection) -> Snapshot {
        self.dispatch(Command::ToggleFilter(selection))
    }

    pub fn dispatch(&mut self, command: Command) -> Snapshot {
        match command {
            Command::ToggleFilter(selection) => self.state.toggle(selection),
            Command::ToggleClass(class) => {
                self.legend = self.legend.toggle(class);
                self.inspected = None;
            }
            Command::ClearDimension(dimension) => self.state.clear(dimension),
            Command::Inspect(index) if index < self.records.len() => self.inspected = Some(index),
            Command::Inspect(index) => {
                warn!(index, records = self.records.len(), "no record to inspect");
                self.inspected = None;
            }
            Command::ClearInspection => self.inspected = None,
            Command::Reset => {
                self.state.reset();
                self.legend = ClassFilter::default();
                self.inspected = None;
            }
        }

        self.snapshot()
    }

    pub fn filtered(&self) -> Vec<&Record> {
        apply_filters(&self.state, &self.records)
    }

    /// Refilters the records and summarizes every view.
    pub fn snapshot(&self) -> Snapshot {
        let filtered = self.filtered();
        debug!(filters = ?self.state, legend = %self.legend, rows = filtered.len(), "refiltered");

        let parallel = parallel::summarize(&filtered, &self.records, self.legend);
        let inspection = self.inspected.and_then(|index| {
            let record = self.records.get(index)?;
            Some(parallel::inspect(index, record, &parallel.means))
        });

        Snapshot {
            filters: self.state.clone(),
            legend: self.legend,
            rows: filtered.len(),
            map: map::summarize(&filtered, self.boundaries.as_ref()),
            race: race::summarize(&filtered),
            smoking: smoking::summarize(&filtered, &self.smoking_categories, self.state.smoking()),
            gender: gender::summarize(&filtered),
            parallel,
            inspection,
        }
    }
}

/// Every view summarized from one filter state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub filters: FilterState,
    pub legend: ClassFilter,
    pub rows: usize,
    pub map: MapSummary,
    pub race: RaceRadial,
    pub smoking: SmokingSummary,
    pub gender: Vec<GenderCard>,
    pub parallel: ParallelSummary,
    /// The record picked in the parallel coordinates view, compared with the
    /// class means of the filtered rows.
    pub inspection: Option<Inspection>,
}
