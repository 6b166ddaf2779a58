use glycolens_dataset::Race;
use glycolens_dataset::Record;
use serde::Serialize;

use crate::aggregate::AggregateStat;
use crate::aggregate::extent;

const EMPTY_MAX_RATE: f64 = 0.0001;

/// Diabetes prevalence among the records flagged with one race.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RaceSummary {
    pub race: Race,
    pub key: &'static str,
    pub label: &'static str,
    pub total: usize,
    pub diabetics: usize,
    /// The prevalence in percent, rounded to one decimal.
    pub pct1: f64,
    /// The prevalence quantised to 0.1 %, i.e. `pct1 / 100`.
    pub rate: f64,
}

/// The race radial chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RaceRadial {
    /// One ring per race, sorted by descending prevalence.
    pub races: Vec<RaceSummary>,
    /// The domain of the arc length scale over the quantised rates. It starts
    /// at `0` when every rate is equal and is `(0, 0.0001)` without any
    /// diabetic record.
    pub rate_domain: (f64, f64),
}

/// Summarizes the race radial chart, one ring per race, sorted by
/// descending prevalence. Races with equal prevalence keep their column order.
pub fn summarize(records: &[&Record]) -> RaceRadial {
    let mut races: Vec<RaceSummary> = Race::ALL
        .into_iter()
        .map(|race| {
            let stat = AggregateStat::from_rows(
                records.iter().copied().filter(|r| r.race.is_set(race)),
                |r| r.diabetes,
            );
            let pct1 = (stat.rate * 1000.0).round() / 10.0;

            RaceSummary {
                race,
                key: race.key(),
                label: race.label(),
                total: stat.total,
                diabetics: stat.positive_count,
                pct1,
                rate: pct1 / 100.0,
            }
        })
        .collect();

    races.sort_by(|a, b| b.rate.total_cmp(&a.rate));

    let rate_domain = match extent(races.iter().map(|race| race.rate)) {
        Some((_, max)) if max == 0.0 => (0.0, EMPTY_MAX_RATE),
        Some((min, max)) if min == max => (0.0, max),
        Some(domain) => domain,
        None => (0.0, EMPTY_MAX_RATE),
    };

    RaceRadial { races, rate_domain }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glycolens_dataset::Gender;
    use glycolens_dataset::RaceFlags;

    fn record(race: Race, diabetes: bool) -> Record {
        Record {
            year: 2020,
            gender: Gender::Male,
            age: 60.0,
            location: "Texas".to_owned(),
            race: RaceFlags::only(race),
            hypertension: false,
            heart_disease: false,
            smoking_history: "never".to_owned(),
            bmi: 28.0,
            hba1c_level: 6.0,
            blood_glucose_level: 130.0,
            diabetes,
        }
    }

    #[test]
    fn sorts_by_quantised_prevalence() {
        let mut records = vec![record(Race::Asian, true), record(Race::Asian, false)];
        records.extend((0..3).map(|_| record(Race::Hispanic, true)));
        records.push(record(Race::Hispanic, false));
        records.extend((0..2).map(|_| record(Race::Caucasian, true)));
        records.push(record(Race::Caucasian, false));
        let rows: Vec<&Record> = records.iter().collect();

        let radial = summarize(&rows);
        let summaries = &radial.races;
        let order: Vec<Race> = summaries.iter().map(|s| s.race).collect();

        assert_eq!(order, [
            Race::Hispanic,
            Race::Caucasian,
            Race::Asian,
            Race::AfricanAmerican,
            Race::Other
        ]);

        let caucasian = &summaries[1];
        assert_eq!(caucasian.total, 3);
        assert_eq!(caucasian.diabetics, 2);
        assert_eq!(caucasian.pct1, 66.7);
        assert_eq!(caucasian.rate, 66.7 / 100.0);
        assert_eq!(caucasian.label, "Caucasian");
        assert_eq!(caucasian.key, "race:Caucasian");

        assert_eq!(radial.rate_domain, (0.0, 0.75));
    }

    #[test]
    fn rate_domain_spans_the_quantised_rates() {
        let mut records: Vec<Record> = Race::ALL
            .iter()
            .flat_map(|race| [record(*race, true), record(*race, false)])
            .collect();
        records.push(record(Race::Other, false));
        let rows: Vec<&Record> = records.iter().collect();

        let radial = summarize(&rows);
        let other = radial.races.last().unwrap();

        assert_eq!(other.race, Race::Other);
        assert_eq!(other.pct1, 33.3);
        assert_eq!(radial.rate_domain, (other.rate, 0.5));
    }

    #[test]
    fn equal_rates_start_the_domain_at_zero() {
        let records: Vec<Record> = Race::ALL
            .iter()
            .flat_map(|race| [record(*race, true), record(*race, false)])
            .collect();
        let rows: Vec<&Record> = records.iter().collect();

        assert_eq!(summarize(&rows).rate_domain, (0.0, 0.5));
    }

    #[test]
    fn races_without_records_report_zero() {
        let radial = summarize(&[]);

        assert_eq!(radial.races.len(), Race::ALL.len());
        assert!(radial.races.iter().all(|s| s.total == 0 && s.rate == 0.0));
        assert_eq!(radial.rate_domain, (0.0, EMPTY_MAX_RATE));
    }
}
