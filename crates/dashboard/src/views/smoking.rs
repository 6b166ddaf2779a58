use glycolens_dataset::Record;
use serde::Serialize;

use crate::aggregate::share_by_category;

const MIN_RADIUS_DOMAIN: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Population {
    Diabetic,
    NonDiabetic,
    Combined,
}

impl Population {
    pub fn label(&self) -> &'static str {
        match self {
            Population::Diabetic => "Diabetic",
            Population::NonDiabetic => "Non-diabetic",
            Population::Combined => "Patients",
        }
    }
}

/// The smoking history distribution of one population, in category order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polygon {
    pub population: Population,
    pub label: &'static str,
    pub shares: Vec<f64>,
}

impl Polygon {
    fn new(population: Population, shares: Vec<f64>) -> Polygon {
        Self {
            population,
            label: population.label(),
            shares,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmokingSummary {
    pub categories: Vec<String>,
    /// The diabetic and non-diabetic polygons, or only the combined one
    /// while a smoking category is selected.
    pub polygons: Vec<Polygon>,
    /// The upper bound of the radius scale, at least `0.001`.
    pub max_share: f64,
    pub active: Option<String>,
}

/// Summarizes the smoking radar chart over the fixed list of categories
/// found in the balanced dataset.
pub fn summarize(records: &[&Record], categories: &[String], active: Option<&str>) -> SmokingSummary {
    let diabetic = share_by_category(
        records.iter().copied().filter(|r| r.diabetes),
        categories,
        smoking,
    );
    let non_diabetic = share_by_category(
        records.iter().copied().filter(|r| !r.diabetes),
        categories,
        smoking,
    );
    let combined = share_by_category(records.iter().copied(), categories, smoking);

    let max_share = diabetic
        .iter()
        .chain(&non_diabetic)
        .chain(&combined)
        .copied()
        .fold(MIN_RADIUS_DOMAIN, f64::max);

    let polygons = if active.is_some() {
        vec![Polygon::new(Population::Combined, combined)]
    } else {
        vec![
            Polygon::new(Population::Diabetic, diabetic),
            Polygon::new(Population::NonDiabetic, non_diabetic),
        ]
    };

    SmokingSummary {
        categories: categories.to_vec(),
        polygons,
        max_share,
        active: active.map(str::to_owned),
    }
}

fn smoking(record: &Record) -> &str {
    &record.smoking_history
}
