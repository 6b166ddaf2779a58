use std::collections::BTreeMap;

use glycolens_dataset::Record;
use glycolens_dataset::geo::Boundaries;
use serde::Serialize;

use crate::aggregate::AggregateStat;
use crate::aggregate::extent;
use crate::aggregate::mean_by_group_restricted;
use crate::aggregate::rate_by_group;

const DEFAULT_MAX_RATE: f64 = 0.01;

/// Diabetes prevalence and diabetic means of one state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateSummary {
    pub name: String,
    pub diabetes: AggregateStat,
    /// Mean HbA1c among the diabetic records of the state.
    pub mean_hba1c: Option<f64>,
    /// Mean BMI among the diabetic records of the state.
    pub mean_bmi: Option<f64>,
}

impl StateSummary {
    fn empty(name: String) -> StateSummary {
        Self {
            name,
            diabetes: AggregateStat::default(),
            mean_hba1c: None,
            mean_bmi: None,
        }
    }

    pub fn has_records(&self) -> bool {
        self.diabetes.total > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSummary {
    /// One entry per state, sorted by name.
    pub states: Vec<StateSummary>,
    /// The domain of the colour scale, computed from positive rates only.
    pub color_domain: (f64, f64),
    /// `true` when every state with a positive rate has the same rate.
    pub flat_domain: bool,
}

impl MapSummary {
    pub fn state(&self, name: &str) -> Option<&StateSummary> {
        self.states.iter().find(|state| state.name == name)
    }
}

/// Summarizes the choropleth map.
///
/// States come from the records and, when present, from the boundary set,
/// so that regions without records are still reported.
pub fn summarize(records: &[&Record], boundaries: Option<&Boundaries>) -> MapSummary {
    let rows = || records.iter().copied();
    let location = |r: &Record| r.location.clone();
    let diabetic = |r: &Record| r.diabetes;

    let stats = rate_by_group(rows(), location, diabetic);
    let mut hba1c = mean_by_group_restricted(rows(), location, diabetic, |r| r.hba1c_level);
    let mut bmi = mean_by_group_restricted(rows(), location, diabetic, |r| r.bmi);

    let mut states: BTreeMap<String, StateSummary> = stats
        .into_iter()
        .map(|(name, diabetes)| {
            let summary = StateSummary {
                mean_hba1c: hba1c.remove(&name).flatten(),
                mean_bmi: bmi.remove(&name).flatten(),
                name: name.clone(),
                diabetes,
            };
            (name, summary)
        })
        .collect();

    for name in boundaries.into_iter().flat_map(|b| b.names()) {
        if !states.contains_key(name) {
            states.insert(name.to_owned(), StateSummary::empty(name.to_owned()));
        }
    }

    let (min_rate, max_rate) = positive_rate_extent(states.values());
    let flat_domain = min_rate == max_rate;
    let color_domain = if flat_domain {
        (0.0, max_rate)
    } else {
        (min_rate, max_rate)
    };

    MapSummary {
        states: states.into_values().collect(),
        color_domain,
        flat_domain,
    }
}

fn positive_rate_extent<'a, I>(states: I) -> (f64, f64)
where
    I: Iterator<Item = &'a StateSummary>,
{
    let rates = states
        .map(|state| state.diabetes.rate)
        .filter(|rate| *rate > 0.0);

    extent(rates).unwrap_or((0.0, DEFAULT_MAX_RATE))
}
