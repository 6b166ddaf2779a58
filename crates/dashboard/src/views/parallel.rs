//! Parallel coordinates over the four numeric measures.
//!
//! The class legend narrows only this view; the other views keep using the
//! rows selected by the shared filter state.

use std::fmt;

use glycolens_dataset::Gender;
use glycolens_dataset::Measure;
use glycolens_dataset::Record;
use serde::Serialize;

use crate::aggregate::Histogram;
use crate::aggregate::bin_counts;
use crate::aggregate::extent;
use crate::aggregate::mean;

/// The maximum number of lines drawn at once.
pub const MAX_LINES: usize = 20_000;

/// The number of histogram bins per axis.
pub const AXIS_BINS: usize = 10;

const BADGE_THRESHOLD_PCT: f64 = 5.0;

/// The class legend of the parallel coordinates view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassFilter {
    #[default]
    Both,
    Diabetic,
    NonDiabetic,
}

impl ClassFilter {
    /// Selects `class`, or goes back to both classes when it is already
    /// selected.
    pub fn toggle(self, class: ClassFilter) -> ClassFilter {
        if self == class {
            ClassFilter::Both
        } else {
            class
        }
    }

    pub fn accepts(&self, record: &Record) -> bool {
        match self {
            ClassFilter::Both => true,
            ClassFilter::Diabetic => record.diabetes,
            ClassFilter::NonDiabetic => !record.diabetes,
        }
    }
}

impl fmt::Display for ClassFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClassFilter::Both => "both",
            ClassFilter::Diabetic => "diabetic",
            ClassFilter::NonDiabetic => "non-diabetic",
        };
        f.write_str(name)
    }
}

/// Base opacity and stroke width of the lines, thinner as more are shown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineStyle {
    pub opacity: f64,
    pub stroke_width: f64,
}

impl LineStyle {
    pub fn for_count(count: usize) -> LineStyle {
        let (opacity, stroke_width) = match count {
            n if n > 12_000 => (0.03, 0.3),
            n if n > 6_000 => (0.05, 0.4),
            n if n > 3_000 => (0.08, 0.5),
            n if n > 1_000 => (0.12, 0.7),
            _ => (0.2, 1.0),
        };

        Self {
            opacity,
            stroke_width,
        }
    }
}

/// Narrows the rows to the legend class and keeps at most [`MAX_LINES`],
/// with non-diabetic rows first so that diabetic lines are drawn on top.
pub fn lines<'a>(records: &[&'a Record], legend: ClassFilter) -> Vec<&'a Record> {
    let mut shown: Vec<&Record> = records
        .iter()
        .copied()
        .filter(|r| legend.accepts(r))
        .take(MAX_LINES)
        .collect();

    shown.sort_by_key(|r| r.diabetes);
    shown
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub measure: Measure,
    pub label: &'static str,
    /// The extent over the whole balanced dataset, so axes stay put while
    /// filtering.
    pub extent: Option<(f64, f64)>,
    pub histogram: Option<Histogram>,
}

/// The mean of one measure per class, over the filtered rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeasureMeans {
    pub measure: Measure,
    pub diabetic: Option<f64>,
    pub non_diabetic: Option<f64>,
}

impl MeasureMeans {
    fn of(records: &[&Record], measure: Measure) -> MeasureMeans {
        let class_mean = |diabetes: bool| {
            mean(
                records
                    .iter()
                    .filter(|r| r.diabetes == diabetes)
                    .map(|r| r.measure(measure)),
            )
        };

        Self {
            measure,
            diabetic: class_mean(true),
            non_diabetic: class_mean(false),
        }
    }

    pub fn for_class(&self, diabetes: bool) -> Option<f64> {
        if diabetes {
            self.diabetic
        } else {
            self.non_diabetic
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParallelSummary {
    pub legend: ClassFilter,
    pub shown: usize,
    pub style: LineStyle,
    pub axes: Vec<Axis>,
    pub means: Vec<MeasureMeans>,
}

/// Summarizes the parallel coordinates view.
///
/// `filtered` are the rows selected by the shared filters and `all` the whole
/// balanced dataset, which fixes the axis extents.
pub fn summarize(filtered: &[&Record], all: &[Record], legend: ClassFilter) -> ParallelSummary {
    let shown = lines(filtered, legend);

    let axes = Measure::ALL
        .into_iter()
        .map(|measure| {
            let extent = extent(all.iter().map(|r| r.measure(measure)));
            let histogram = extent
                .map(|range| bin_counts(shown.iter().map(|r| r.measure(measure)), range, AXIS_BINS));

            Axis {
                measure,
                label: measure.label(),
                extent,
                histogram,
            }
        })
        .collect();

    let means = Measure::ALL
        .into_iter()
        .map(|measure| MeasureMeans::of(filtered, measure))
        .collect();

    ParallelSummary {
        legend,
        shown: shown.len(),
        style: LineStyle::for_count(shown.len()),
        axes,
        means,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "direction", content = "pct")]
pub enum Badge {
    /// Above the class mean by the rounded absolute percentage.
    Up(u32),
    /// Below the class mean by the rounded absolute percentage.
    Down(u32),
    Near,
}

/// One measure of a record next to the mean of its own class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Comparison {
    pub measure: Measure,
    pub value: f64,
    pub reference: Option<f64>,
    /// `None` for age, which is only shown next to its reference.
    pub badge: Option<Badge>,
}

/// Compares every measure of `record` with the mean of the record's class.
pub fn compare(record: &Record, means: &[MeasureMeans]) -> Vec<Comparison> {
    means
        .iter()
        .map(|m| {
            let value = record.measure(m.measure);
            let reference = m.for_class(record.diabetes);
            let badge = (m.measure != Measure::Age).then(|| badge(value, reference));

            Comparison {
                measure: m.measure,
                value,
                reference,
                badge,
            }
        })
        .collect()
}

/// The categories of an inspected record, highlighted in the other views
/// without filtering them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Highlight {
    pub state: Option<String>,
    pub smoking: Option<String>,
    pub gender: Gender,
}

/// A record picked in the parallel coordinates view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inspection {
    /// The position of the record in the balanced dataset.
    pub index: usize,
    pub diabetes: bool,
    pub comparisons: Vec<Comparison>,
    pub highlight: Highlight,
}

/// Compares the record at `index` with its class means and collects the
/// categories to highlight.
pub fn inspect(index: usize, record: &Record, means: &[MeasureMeans]) -> Inspection {
    let label = |value: &str| (!value.is_empty()).then(|| value.to_owned());

    Inspection {
        index,
        diabetes: record.diabetes,
        comparisons: compare(record, means),
        highlight: Highlight {
            state: label(&record.location),
            smoking: label(&record.smoking_history),
            gender: record.gender,
        },
    }
}

fn badge(value: f64, reference: Option<f64>) -> Badge {
    let Some(reference) = reference.filter(|r| *r != 0.0 && !r.is_nan()) else {
        return Badge::Near;
    };

    let pct = (value - reference) / reference * 100.0;
    let abs = pct.abs().round() as u32;

    if pct > BADGE_THRESHOLD_PCT {
        Badge::Up(abs)
    } else if pct < -BADGE_THRESHOLD_PCT {
        Badge::Down(abs)
    } else {
        Badge::Near
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glycolens_dataset::RaceFlags;

    fn record(diabetes: bool, age: f64, bmi: f64) -> Record {
        Record {
            year: 2019,
            gender: Gender::Male,
            age,
            location: "Iowa".to_owned(),
            race: RaceFlags::default(),
            hypertension: false,
            heart_disease: false,
            smoking_history: "never".to_owned(),
            bmi,
            hba1c_level: 6.0,
            blood_glucose_level: 120.0,
            diabetes,
        }
    }

    #[test]
    fn legend_toggles_like_a_filter() {
        let legend = ClassFilter::default().toggle(ClassFilter::Diabetic);
        assert_eq!(legend, ClassFilter::Diabetic);

        assert_eq!(legend.toggle(ClassFilter::NonDiabetic), ClassFilter::NonDiabetic);
        assert_eq!(legend.toggle(ClassFilter::Diabetic), ClassFilter::Both);
        assert_eq!(ClassFilter::Both.toggle(ClassFilter::Both), ClassFilter::Both);
    }

    #[test]
    fn lines_put_non_diabetic_rows_first() {
        let records = [
            record(true, 1.0, 20.0),
            record(false, 2.0, 20.0),
            record(true, 3.0, 20.0),
            record(false, 4.0, 20.0),
        ];
        let rows: Vec<&Record> = records.iter().collect();

        let ages: Vec<f64> = lines(&rows, ClassFilter::Both).iter().map(|r| r.age).collect();
        assert_eq!(ages, [2.0, 4.0, 1.0, 3.0]);

        let diabetic = lines(&rows, ClassFilter::Diabetic);
        assert_eq!(diabetic.len(), 2);
        assert!(diabetic.iter().all(|r| r.diabetes));
    }

    #[test]
    fn lines_are_capped() {
        let records: Vec<Record> = (0..MAX_LINES + 5).map(|i| record(false, i as f64, 20.0)).collect();
        let rows: Vec<&Record> = records.iter().collect();

        let shown = lines(&rows, ClassFilter::Both);

        assert_eq!(shown.len(), MAX_LINES);
        assert_eq!(shown[MAX_LINES - 1].age, (MAX_LINES - 1) as f64);
    }

    #[test]
    fn style_tiers() {
        assert_eq!(LineStyle::for_count(12_001).opacity, 0.03);
        assert_eq!(LineStyle::for_count(12_000).opacity, 0.05);
        assert_eq!(LineStyle::for_count(3_001).stroke_width, 0.5);
        assert_eq!(LineStyle::for_count(1_001).opacity, 0.12);
        assert_eq!(LineStyle::for_count(0), LineStyle {
            opacity: 0.2,
            stroke_width: 1.0
        });
    }

    #[test]
    fn axes_span_the_whole_dataset() {
        let all = [record(true, 10.0, 20.0), record(false, 80.0, 40.0)];
        let filtered = [&all[0]];

        let summary = summarize(&filtered, &all, ClassFilter::Both);

        let age = &summary.axes[0];
        assert_eq!(age.measure, Measure::Age);
        assert_eq!(age.extent, Some((10.0, 80.0)));
        assert_eq!(age.histogram.as_ref().map(Histogram::total), Some(1));
        assert_eq!(summary.shown, 1);
        assert_eq!(summary.means[1].diabetic, Some(20.0));
        assert_eq!(summary.means[1].non_diabetic, None);
    }

    #[test]
    fn compares_against_the_class_mean() {
        let records = [
            record(true, 50.0, 30.0),
            record(true, 70.0, 20.0),
            record(false, 40.0, 22.0),
        ];
        let rows: Vec<&Record> = records.iter().collect();
        let summary = summarize(&rows, &records, ClassFilter::Both);

        let comparisons = compare(&records[0], &summary.means);

        assert_eq!(comparisons[0].measure, Measure::Age);
        assert_eq!(comparisons[0].reference, Some(60.0));
        assert_eq!(comparisons[0].badge, None);
        assert_eq!(comparisons[1].reference, Some(25.0));
        assert_eq!(comparisons[1].badge, Some(Badge::Up(20)));
        assert_eq!(comparisons[2].badge, Some(Badge::Near));

        let below = compare(&records[1], &summary.means);
        assert_eq!(below[1].badge, Some(Badge::Down(20)));
    }

    #[test]
    fn inspection_highlights_the_record_categories() {
        let mut records = [record(true, 50.0, 30.0), record(true, 70.0, 20.0)];
        records[1].smoking_history = String::new();
        let rows: Vec<&Record> = records.iter().collect();
        let summary = summarize(&rows, &records, ClassFilter::Both);

        let inspection = inspect(1, &records[1], &summary.means);

        assert_eq!(inspection.index, 1);
        assert!(inspection.diabetes);
        assert_eq!(inspection.comparisons.len(), Measure::ALL.len());
        assert_eq!(inspection.comparisons[1].badge, Some(Badge::Down(20)));
        assert_eq!(inspection.highlight, Highlight {
            state: Some("Iowa".to_owned()),
            smoking: None,
            gender: Gender::Male,
        });
    }

    #[test]
    fn missing_or_zero_reference_is_near() {
        assert_eq!(badge(10.0, None), Badge::Near);
        assert_eq!(badge(10.0, Some(0.0)), Badge::Near);
        assert_eq!(badge(10.5, Some(10.0)), Badge::Near);
        assert_eq!(badge(10.6, Some(10.0)), Badge::Up(6));
    }
}
