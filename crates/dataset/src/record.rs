use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use serde::Serialize;

use crate::error::DatasetError;

/// A single patient record of the diabetes dataset.
///
/// Records are checked against this schema once, when they are read,
/// and they are never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub year: u16,
    pub gender: Gender,
    pub age: f64,
    pub location: String,
    pub race: RaceFlags,
    pub hypertension: bool,
    pub heart_disease: bool,
    pub smoking_history: String,
    pub bmi: f64,
    pub hba1c_level: f64,
    pub blood_glucose_level: f64,
    pub diabetes: bool,
}

impl Record {
    /// Returns the value of the given clinical measure.
    pub fn measure(&self, measure: Measure) -> f64 {
        match measure {
            Measure::Age => self.age,
            Measure::Bmi => self.bmi,
            Measure::Hba1c => self.hba1c_level,
            Measure::BloodGlucose => self.blood_glucose_level,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl FromStr for Gender {
    type Err = DatasetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            "Other" => Ok(Gender::Other),
            other => Err(DatasetError::UnknownGender(other.to_owned())),
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the race categories encoded as one-hot columns in the source data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Race {
    AfricanAmerican,
    Asian,
    Caucasian,
    Hispanic,
    Other,
}

impl Race {
    /// All races in the order of the source columns.
    pub const ALL: [Race; 5] = [
        Race::AfricanAmerican,
        Race::Asian,
        Race::Caucasian,
        Race::Hispanic,
        Race::Other,
    ];

    /// The column name of the one-hot flag, e.g. `race:Asian`.
    pub fn key(&self) -> &'static str {
        match self {
            Race::AfricanAmerican => "race:AfricanAmerican",
            Race::Asian => "race:Asian",
            Race::Caucasian => "race:Caucasian",
            Race::Hispanic => "race:Hispanic",
            Race::Other => "race:Other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Race::AfricanAmerican => "African American",
            Race::Asian => "Asian",
            Race::Caucasian => "Caucasian",
            Race::Hispanic => "Hispanic",
            Race::Other => "Other",
        }
    }

    pub fn from_key(key: &str) -> Result<Race, DatasetError> {
        Race::ALL
            .into_iter()
            .find(|race| race.key() == key)
            .ok_or_else(|| DatasetError::UnknownRaceKey(key.to_owned()))
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl Display for Race {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The one-hot race flags of a record.
///
/// The source data does not guarantee that exactly one flag is set,
/// so every flag is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RaceFlags([bool; 5]);

impl RaceFlags {
    pub fn new(flags: [bool; 5]) -> RaceFlags {
        Self(flags)
    }

    /// Creates flags with only the given race set.
    pub fn only(race: Race) -> RaceFlags {
        let mut flags = [false; 5];
        flags[race.index()] = true;
        Self(flags)
    }

    pub fn is_set(&self, race: Race) -> bool {
        self.0[race.index()]
    }
}

/// The numeric clinical measures shown on the parallel coordinates axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    Age,
    Bmi,
    Hba1c,
    BloodGlucose,
}

impl Measure {
    pub const ALL: [Measure; 4] = [
        Measure::Age,
        Measure::Bmi,
        Measure::Hba1c,
        Measure::BloodGlucose,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Measure::Age => "Age",
            Measure::Bmi => "BMI",
            Measure::Hba1c => "HbA1c",
            Measure::BloodGlucose => "Blood Glucose",
        }
    }
}
