use glycolens_dataset::Gender;
use glycolens_dataset::Record;
use serde::Serialize;

use crate::aggregate::AggregateStat;
use crate::aggregate::rate_by_group;

/// The genders that get a comparison card.
pub const CARD_GENDERS: [Gender; 2] = [Gender::Male, Gender::Female];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderCard {
    pub gender: Gender,
    pub heart_disease: AggregateStat,
    pub hypertension: AggregateStat,
}

/// Summarizes the heart disease and hypertension prevalence per gender.
pub fn summarize(records: &[&Record]) -> Vec<GenderCard> {
    let heart_disease = rate_by_group(records.iter().copied(), |r| r.gender, |r| r.heart_disease);
    let hypertension = rate_by_group(records.iter().copied(), |r| r.gender, |r| r.hypertension);

    CARD_GENDERS
        .into_iter()
        .map(|gender| GenderCard {
            gender,
            heart_disease: heart_disease.get(&gender).copied().unwrap_or_default(),
            hypertension: hypertension.get(&gender).copied().unwrap_or_default(),
        })
        .collect()
}
