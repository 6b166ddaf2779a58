//! glycolens' dataset library.
//!
//! Reads the diabetes health dataset into typed [`Record`]s, balances the
//! diabetic and non-diabetic classes and reads the geographic boundary set
//! used by the choropleth map.

mod read;

pub mod error;
pub mod geo;
pub mod record;
pub mod sample;

use std::collections::BTreeSet;
use std::path::Path;

use tracing::info;

pub use crate::read::RecordReader;
pub use crate::read::read_records;
pub use crate::record::Gender;
pub use crate::record::Measure;
pub use crate::record::Race;
pub use crate::record::RaceFlags;
pub use crate::record::Record;

use crate::error::Result;
use crate::geo::Boundaries;
use crate::sample::SampleConfig;
use crate::sample::balanced_sample;
use crate::sample::class_counts;
use crate::sample::deterministic_score;
use crate::sample::split_by_class;

/// The balanced dataset every dashboard view is computed from.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<Record>,
    pub boundaries: Option<Boundaries>,
}

impl Dataset {
    /// Reads the records at `path` and balances them with [`Dataset::balance`].
    pub fn load(path: &Path, config: SampleConfig) -> Result<Dataset> {
        let records = read_records(path)?;
        Ok(Self::balance(records, config))
    }

    /// Keeps up to `config.cap_per_class` diabetic records and samples the
    /// same number of non-diabetic records using [`deterministic_score`].
    pub fn balance(records: Vec<Record>, config: SampleConfig) -> Dataset {
        let counts = class_counts(&records);
        info!(
            total = counts.total,
            diabetic = counts.diabetic,
            non_diabetic = counts.non_diabetic,
            "read the dataset"
        );

        let (diabetic, non_diabetic) = split_by_class(records);
        let records = balanced_sample(
            &diabetic,
            &non_diabetic,
            config.cap_per_class,
            deterministic_score,
        );

        let balanced = class_counts(&records);
        info!(
            total = balanced.total,
            diabetic = balanced.diabetic,
            non_diabetic = balanced.non_diabetic,
            "balanced the dataset"
        );

        Self {
            records,
            boundaries: None,
        }
    }

    pub fn with_boundaries(mut self, boundaries: Boundaries) -> Dataset {
        info!(regions = boundaries.len(), "read the boundary set");
        self.boundaries = Some(boundaries);
        self
    }

    /// The sorted, distinct, non-empty smoking history labels.
    pub fn smoking_categories(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|record| record.smoking_history.as_str())
            .filter(|category| !category.is_empty())
            .collect::<BTreeSet<&str>>()
            .into_iter()
            .map(str::to_owned)
            .collect()
    }
}
