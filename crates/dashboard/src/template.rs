use chrono::Utc;
use serde::Serialize;
use tinytemplate::TinyTemplate;

use crate::controller::Snapshot;
use crate::error::Result;
use crate::filter::Selection;
use crate::render::OutputStream;
use crate::render::Render;
use crate::views::smoking::Polygon;

const INDEX_TEMPLATE: &str = "index";

/// The summary page, a plain HTML rendition of a [`Snapshot`].
pub struct SummaryPage<'a> {
    snapshot: &'a Snapshot,
}

impl<'a> SummaryPage<'a> {
    pub fn new(snapshot: &'a Snapshot) -> SummaryPage<'a> {
        Self { snapshot }
    }
}

impl Render for SummaryPage<'_> {
    fn render<O>(&self, output: &mut O) -> Result<()>
    where
        O: OutputStream,
    {
        let mut template = TinyTemplate::new();
        template.add_template(INDEX_TEMPLATE, include_str!("./template/index.html.tt"))?;

        let context = Context::new(self.snapshot);
        let text = template.render(INDEX_TEMPLATE, &context)?;

        output.write(&text)
    }
}

#[derive(Serialize)]
struct Context {
    generated_at: String,
    rows: usize,
    filters: Vec<String>,
    states: Vec<StateRow>,
    races: Vec<RaceRow>,
    populations: Vec<&'static str>,
    smoking: Vec<SmokingRow>,
    genders: Vec<GenderRow>,
    shown: usize,
    legend: String,
    measures: Vec<MeasureRow>,
}

#[derive(Serialize)]
struct StateRow {
    name: String,
    total: usize,
    positive: usize,
    rate: String,
    hba1c: String,
    bmi: String,
}

#[derive(Serialize)]
struct RaceRow {
    label: &'static str,
    total: usize,
    positive: usize,
    rate: String,
}

#[derive(Serialize)]
struct SmokingRow {
    name: String,
    shares: Vec<String>,
}

#[derive(Serialize)]
struct GenderRow {
    label: &'static str,
    total: usize,
    heart_disease: String,
    hypertension: String,
}

#[derive(Serialize)]
struct MeasureRow {
    label: &'static str,
    min: String,
    max: String,
    diabetic: String,
    non_diabetic: String,
}

impl Context {
    fn new(snapshot: &Snapshot) -> Context {
        let filters = snapshot
            .filters
            .selections()
            .iter()
            .map(|selection| format!("{}: {}", selection.dimension(), selection_value(selection)))
            .collect();

        let states = snapshot
            .map
            .states
            .iter()
            .filter(|state| state.has_records())
            .map(|state| StateRow {
                name: state.name.clone(),
                total: state.diabetes.total,
                positive: state.diabetes.positive_count,
                rate: percent(state.diabetes.rate),
                hba1c: decimal(state.mean_hba1c),
                bmi: decimal(state.mean_bmi),
            })
            .collect();

        let races = snapshot
            .race
            .races
            .iter()
            .map(|race| RaceRow {
                label: race.label,
                total: race.total,
                positive: race.diabetics,
                rate: format!("{:.1}%", race.pct1),
            })
            .collect();

        let polygons = &snapshot.smoking.polygons;
        let smoking = snapshot
            .smoking
            .categories
            .iter()
            .enumerate()
            .map(|(idx, name)| SmokingRow {
                name: name.clone(),
                shares: polygons.iter().map(|polygon| share(polygon, idx)).collect(),
            })
            .collect();

        let genders = snapshot
            .gender
            .iter()
            .map(|card| GenderRow {
                label: card.gender.as_str(),
                total: card.heart_disease.total,
                heart_disease: percent(card.heart_disease.rate),
                hypertension: percent(card.hypertension.rate),
            })
            .collect();

        let measures = snapshot
            .parallel
            .axes
            .iter()
            .zip(&snapshot.parallel.means)
            .map(|(axis, means)| MeasureRow {
                label: axis.label,
                min: decimal(axis.extent.map(|(min, _)| min)),
                max: decimal(axis.extent.map(|(_, max)| max)),
                diabetic: decimal(means.diabetic),
                non_diabetic: decimal(means.non_diabetic),
            })
            .collect();

        Self {
            generated_at: Utc::now().to_rfc3339(),
            rows: snapshot.rows,
            filters,
            states,
            races,
            populations: polygons.iter().map(|polygon| polygon.label).collect(),
            smoking,
            genders,
            shown: snapshot.parallel.shown,
            legend: snapshot.parallel.legend.to_string(),
            measures,
        }
    }
}

fn selection_value(selection: &Selection) -> String {
    match selection {
        Selection::State(value) | Selection::Smoking(value) => value.clone(),
        Selection::Race(race) => race.label().to_owned(),
        Selection::Gender(gender) => gender.as_str().to_owned(),
    }
}

fn share(polygon: &Polygon, idx: usize) -> String {
    polygon.shares.get(idx).map_or_else(String::new, |share| percent(*share))
}

fn percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

fn decimal(value: Option<f64>) -> String {
    value.map_or_else(|| "NA".to_owned(), |value| format!("{value:.1}"))
}
