use serde::Serialize;

use crate::record::Record;

/// Sampling configuration used when the dataset is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleConfig {
    /// The maximum number of records kept for each diabetes class.
    pub cap_per_class: usize,
}

impl SampleConfig {
    pub const DEFAULT_CAP_PER_CLASS: usize = 8500;

    pub fn new(cap_per_class: usize) -> SampleConfig {
        Self { cap_per_class }
    }
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAP_PER_CLASS)
    }
}

/// The number of records in each diabetes class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassCounts {
    pub total: usize,
    pub diabetic: usize,
    pub non_diabetic: usize,
}

pub fn class_counts<'a, I>(records: I) -> ClassCounts
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .fold(ClassCounts::default(), |mut counts, record| {
            counts.total += 1;
            if record.diabetes {
                counts.diabetic += 1;
            } else {
                counts.non_diabetic += 1;
            }
            counts
        })
}

/// Splits records into diabetic and non-diabetic records, keeping the
/// input order within each class.
pub fn split_by_class(records: Vec<Record>) -> (Vec<Record>, Vec<Record>) {
    records.into_iter().partition(|record| record.diabetes)
}

/// A reproducible pseudo-random score in `[0, 1)` derived from a row index.
///
/// It is the fractional part of `sin((index + 1) * 7919) * 10000`.
/// The scores are not uniformly distributed, so a sample selected
/// by them is reproducible but not necessarily representative.
pub fn deterministic_score(index: usize) -> f64 {
    let x = ((index as f64 + 1.0) * 7919.0).sin() * 10000.0;
    x - x.floor()
}

/// Balances two classes by down-sampling.
///
/// Keeps the first `cap_per_class` diabetic rows (all of them if there are
/// fewer) and the same number of non-diabetic rows, chosen as the ones with
/// the lowest `score_fn(index)`. Ties keep their input order. The result holds
/// the kept diabetic rows followed by the sampled non-diabetic rows.
pub fn balanced_sample<T, F>(
    diabetic: &[T],
    non_diabetic: &[T],
    cap_per_class: usize,
    score_fn: F,
) -> Vec<T>
where
    T: Clone,
    F: Fn(usize) -> f64,
{
    let kept_diabetic = diabetic.len().min(cap_per_class);
    let kept_non_diabetic = non_diabetic.len().min(kept_diabetic);

    let mut scored: Vec<(f64, &T)> = non_diabetic
        .iter()
        .enumerate()
        .map(|(idx, row)| (score_fn(idx), row))
        .collect();
    scored.sort_by(|(a, _), (b, _)| a.total_cmp(b));

    let mut sample = Vec::with_capacity(kept_diabetic + kept_non_diabetic);
    sample.extend_from_slice(&diabetic[..kept_diabetic]);
    sample.extend(
        scored
            .into_iter()
            .take(kept_non_diabetic)
            .map(|(_, row)| row.clone()),
    );

    sample
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_score_is_a_fraction() {
        for idx in 0..1000 {
            let score = deterministic_score(idx);
            assert!((0.0..1.0).contains(&score), "score {score} for {idx}");
        }
    }

    #[test]
    fn keeps_all_diabetics_under_the_cap() {
        let diabetic = [1, 2, 3];
        let non_diabetic = [10, 11, 12, 13, 14, 15];

        let sample = balanced_sample(&diabetic, &non_diabetic, 5, |idx| idx as f64);

        assert_eq!(sample, [1, 2, 3, 10, 11, 12]);
    }

    #[test]
    fn caps_both_classes() {
        let diabetic = [1, 2, 3, 4];
        let non_diabetic = [10, 11, 12, 13, 14];

        let sample = balanced_sample(&diabetic, &non_diabetic, 2, |idx| idx as f64);

        assert_eq!(sample, [1, 2, 10, 11]);
    }

    #[test]
    fn selects_non_diabetics_by_ascending_score() {
        let diabetic = [1, 2];
        let non_diabetic = [10, 11, 12, 13];
        let scores = [0.9, 0.1, 0.5, 0.3];

        let sample = balanced_sample(&diabetic, &non_diabetic, 10, |idx| scores[idx]);

        assert_eq!(sample, [1, 2, 11, 13]);
    }

    #[test]
    fn equal_scores_keep_input_order() {
        let sample = balanced_sample(&[1, 2, 3], &[10, 11, 12, 13], 10, |_| 0.5);

        assert_eq!(sample, [1, 2, 3, 10, 11, 12]);
    }

    #[test]
    fn fewer_non_diabetics_than_diabetics() {
        let sample = balanced_sample(&[1, 2, 3], &[10], 10, deterministic_score);

        assert_eq!(sample, [1, 2, 3, 10]);
    }

    #[test]
    fn no_diabetics_yields_no_rows() {
        let sample = balanced_sample::<i32, _>(&[], &[10, 11], 10, deterministic_score);

        assert!(sample.is_empty());
    }
}
