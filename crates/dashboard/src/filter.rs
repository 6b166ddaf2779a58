use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use glycolens_dataset::Gender;
use glycolens_dataset::Race;
use glycolens_dataset::Record;
use glycolens_dataset::error::DatasetError;
use serde::Serialize;

/// A dimension of the shared filter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    State,
    Race,
    Smoking,
    Gender,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::State,
        Dimension::Race,
        Dimension::Smoking,
        Dimension::Gender,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::State => "state",
            Dimension::Race => "race",
            Dimension::Smoking => "smoking",
            Dimension::Gender => "gender",
        }
    }
}

impl Display for Dimension {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Dimension::ALL
            .into_iter()
            .find(|dimension| dimension.as_str() == value)
            .ok_or_else(|| format!("unknown filter dimension: `{value}`"))
    }
}

/// A value selected on one dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Selection {
    State(String),
    Race(Race),
    Smoking(String),
    Gender(Gender),
}

impl Selection {
    /// Creates a selection from a dimension and its textual value.
    ///
    /// Races are given by their column key, e.g. `race:Asian`.
    pub fn parse(dimension: Dimension, value: &str) -> Result<Selection, DatasetError> {
        let selection = match dimension {
            Dimension::State => Selection::State(value.to_owned()),
            Dimension::Race => Selection::Race(Race::from_key(value)?),
            Dimension::Smoking => Selection::Smoking(value.to_owned()),
            Dimension::Gender => Selection::Gender(value.parse()?),
        };

        Ok(selection)
    }

    pub fn dimension(&self) -> Dimension {
        match self {
            Selection::State(_) => Dimension::State,
            Selection::Race(_) => Dimension::Race,
            Selection::Smoking(_) => Dimension::Smoking,
            Selection::Gender(_) => Dimension::Gender,
        }
    }
}

/// The filter state shared by all views.
///
/// Each dimension holds at most one selected value. Dimensions are
/// independent and a record passes the filter when it satisfies every
/// selected value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct FilterState {
    state: Option<String>,
    race: Option<Race>,
    smoking: Option<String>,
    gender: Option<Gender>,
}

impl FilterState {
    pub fn new() -> FilterState {
        Self::default()
    }

    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    pub fn race(&self) -> Option<Race> {
        self.race
    }

    pub fn smoking(&self) -> Option<&str> {
        self.smoking.as_deref()
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }

    /// Selects the value on its dimension, or clears the dimension if the
    /// value is already selected.
    ///
    /// An empty state or smoking label selects nothing and clears the
    /// dimension.
    pub fn toggle(&mut self, selection: Selection) {
        match selection {
            Selection::State(value) if value.is_empty() => self.state = None,
            Selection::Smoking(value) if value.is_empty() => self.smoking = None,
            Selection::State(value) => toggle(&mut self.state, value),
            Selection::Race(value) => toggle(&mut self.race, value),
            Selection::Smoking(value) => toggle(&mut self.smoking, value),
            Selection::Gender(value) => toggle(&mut self.gender, value),
        }
    }

    pub fn clear(&mut self, dimension: Dimension) {
        match dimension {
            Dimension::State => self.state = None,
            Dimension::Race => self.race = None,
            Dimension::Smoking => self.smoking = None,
            Dimension::Gender => self.gender = None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The currently selected values, in [`Dimension::ALL`] order.
    pub fn selections(&self) -> Vec<Selection> {
        let mut selections = Vec::with_capacity(Dimension::ALL.len());
        selections.extend(self.state.clone().map(Selection::State));
        selections.extend(self.race.map(Selection::Race));
        selections.extend(self.smoking.clone().map(Selection::Smoking));
        selections.extend(self.gender.map(Selection::Gender));
        selections
    }

    pub fn is_unset(&self) -> bool {
        self.state.is_none() && self.race.is_none() && self.smoking.is_none() && self.gender.is_none()
    }

    /// Returns `true` if the record satisfies every selected dimension.
    pub fn matches(&self, record: &Record) -> bool {
        self.state.as_ref().is_none_or(|state| record.location == *state)
            && self.gender.is_none_or(|gender| record.gender == gender)
            && self
                .smoking
                .as_ref()
                .is_none_or(|smoking| record.smoking_history == *smoking)
            && self.race.is_none_or(|race| record.race.is_set(race))
    }
}

fn toggle<T: PartialEq>(slot: &mut Option<T>, value: T) {
    if slot.as_ref() == Some(&value) {
        *slot = None;
    } else {
        *slot = Some(value);
    }
}

/// Returns the records that pass the filter, in their original order.
///
/// The whole input is evaluated on every call.
pub fn apply_filters<'a>(state: &FilterState, records: &'a [Record]) -> Vec<&'a Record> {
    records.iter().filter(|record| state.matches(record)).collect()
}
