//! Group-wise statistics recomputed by every view on each refilter pass.

use std::collections::BTreeMap;

use serde::Serialize;

/// The prevalence of a binary outcome within a group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AggregateStat {
    pub total: usize,
    pub positive_count: usize,
    /// `positive_count / total`, or `0` for an empty group.
    pub rate: f64,
}

impl AggregateStat {
    pub fn new(total: usize, positive_count: usize) -> AggregateStat {
        let rate = if total == 0 {
            0.0
        } else {
            positive_count as f64 / total as f64
        };

        Self {
            total,
            positive_count,
            rate,
        }
    }

    pub fn from_rows<'a, T, I, P>(rows: I, positive: P) -> AggregateStat
    where
        T: 'a,
        I: IntoIterator<Item = &'a T>,
        P: Fn(&T) -> bool,
    {
        let (total, positive_count) = rows.into_iter().fold((0, 0), |(total, count), row| {
            (total + 1, count + usize::from(positive(row)))
        });

        Self::new(total, positive_count)
    }
}

/// Groups rows by `group_key` and computes the rate of `positive` rows in
/// each group.
///
/// Every group that occurs in `rows` has an entry.
pub fn rate_by_group<'a, T, K, I, G, P>(rows: I, group_key: G, positive: P) -> BTreeMap<K, AggregateStat>
where
    T: 'a,
    K: Ord,
    I: IntoIterator<Item = &'a T>,
    G: Fn(&T) -> K,
    P: Fn(&T) -> bool,
{
    let mut counts: BTreeMap<K, (usize, usize)> = BTreeMap::new();

    for row in rows {
        let (total, count) = counts.entry(group_key(row)).or_default();
        *total += 1;
        *count += usize::from(positive(row));
    }

    counts
        .into_iter()
        .map(|(key, (total, count))| (key, AggregateStat::new(total, count)))
        .collect()
}

/// Groups rows by `group_key` and computes the mean of `value` over the rows
/// of each group that satisfy `restrict`.
///
/// Every group that occurs in `rows` has an entry; it is `None` when none of
/// its rows satisfy `restrict`.
pub fn mean_by_group_restricted<'a, T, K, I, G, R, V>(
    rows: I,
    group_key: G,
    restrict: R,
    value: V,
) -> BTreeMap<K, Option<f64>>
where
    T: 'a,
    K: Ord,
    I: IntoIterator<Item = &'a T>,
    G: Fn(&T) -> K,
    R: Fn(&T) -> bool,
    V: Fn(&T) -> f64,
{
    let mut sums: BTreeMap<K, (f64, usize)> = BTreeMap::new();

    for row in rows {
        let (sum, count) = sums.entry(group_key(row)).or_default();
        if restrict(row) {
            *sum += value(row);
            *count += 1;
        }
    }

    sums.into_iter()
        .map(|(key, (sum, count))| (key, (count > 0).then(|| sum / count as f64)))
        .collect()
}

/// The arithmetic mean, or `None` for no values.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));

    (count > 0).then(|| sum / count as f64)
}

/// The minimum and maximum of the values, or `None` for no values.
pub fn extent<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values.into_iter().fold(None, |extent, value| match extent {
        None => Some((value, value)),
        Some((min, max)) => Some((min.min(value), max.max(value))),
    })
}

/// The share of rows falling in each category, in `categories` order.
///
/// Rows whose category is not listed count towards the total only.
/// With no rows every share is `0`.
pub fn share_by_category<'a, T, I, C>(rows: I, categories: &[String], category: C) -> Vec<f64>
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
    C: Fn(&T) -> &str,
{
    let mut counts = vec![0usize; categories.len()];
    let mut total = 0usize;

    for row in rows {
        total += 1;
        let label = category(row);
        if let Some(idx) = categories.iter().position(|c| c == label) {
            counts[idx] += 1;
        }
    }

    let total = total.max(1) as f64;
    counts.into_iter().map(|count| count as f64 / total).collect()
}

/// Equal-width bins over a closed interval.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub start: f64,
    pub end: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Counts the values falling in each of `bins` equal-width bins over
/// `[start, end]`.
///
/// Every bin is half-open except the last one, which also holds `end`.
/// Values outside of the interval are not counted. A degenerate interval
/// puts every value equal to `start` in the first bin.
pub fn bin_counts<I>(values: I, (start, end): (f64, f64), bins: usize) -> Histogram
where
    I: IntoIterator<Item = f64>,
{
    let mut counts = vec![0usize; bins];

    if bins > 0 {
        let width = (end - start) / bins as f64;

        for value in values {
            if !(start..=end).contains(&value) {
                continue;
            }

            let idx = if width > 0.0 {
                (((value - start) / width) as usize).min(bins - 1)
            } else {
                0
            };
            counts[idx] += 1;
        }
    }

    Histogram { start, end, counts }
}
