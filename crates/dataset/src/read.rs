use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use csv::StringRecord;
use csv::Trim;
use serde::Deserialize;

use crate::error::DatasetError;
use crate::error::Result;
use crate::record::Gender;
use crate::record::RaceFlags;
use crate::record::Record;

/// Reads every record of the CSV file at `path`.
pub fn read_records(path: &Path) -> Result<Vec<Record>> {
    let file = File::open(path)?;
    RecordReader::new(file)?.collect()
}

/// An iterator that decodes [`Record`] elements from CSV data read
/// from an underlying [`Read`].
///
/// The first line must be the header. Columns are matched by name,
/// so their order does not matter and unknown columns are ignored.
#[must_use = "iterators are lazy and do nothing unless consumed"]
#[derive(Debug)]
pub struct RecordReader<R> {
    reader: csv::Reader<R>,
    headers: StringRecord,
    record: StringRecord,
}

impl<R: Read> RecordReader<R> {
    pub fn new(reader: R) -> Result<RecordReader<R>> {
        let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
        let headers = reader.headers()?.clone();

        Ok(Self {
            reader,
            headers,
            record: StringRecord::new(),
        })
    }

    fn decode(&self) -> Result<Record> {
        let line = self.record.position().map_or(0, |pos| pos.line());
        let raw: RawRecord = self.record.deserialize(Some(&self.headers))?;

        raw.into_record(line)
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<Record>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(true) => Some(self.decode()),
            Ok(false) => None,
            Err(error) => Some(Err(DatasetError::from(error))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    year: u16,
    gender: String,
    age: f64,
    location: String,
    #[serde(rename = "race:AfricanAmerican")]
    race_african_american: u8,
    #[serde(rename = "race:Asian")]
    race_asian: u8,
    #[serde(rename = "race:Caucasian")]
    race_caucasian: u8,
    #[serde(rename = "race:Hispanic")]
    race_hispanic: u8,
    #[serde(rename = "race:Other")]
    race_other: u8,
    hypertension: u8,
    heart_disease: u8,
    smoking_history: String,
    bmi: f64,
    #[serde(rename = "hbA1c_level")]
    hba1c_level: f64,
    blood_glucose_level: f64,
    diabetes: u8,
}

impl RawRecord {
    fn into_record(self, line: u64) -> Result<Record> {
        let gender: Gender = self.gender.parse()?;
        let race = RaceFlags::new([
            flag(line, "race:AfricanAmerican", self.race_african_american)?,
            flag(line, "race:Asian", self.race_asian)?,
            flag(line, "race:Caucasian", self.race_caucasian)?,
            flag(line, "race:Hispanic", self.race_hispanic)?,
            flag(line, "race:Other", self.race_other)?,
        ]);

        Ok(Record {
            year: self.year,
            gender,
            age: self.age,
            location: self.location,
            race,
            hypertension: flag(line, "hypertension", self.hypertension)?,
            heart_disease: flag(line, "heart_disease", self.heart_disease)?,
            smoking_history: self.smoking_history,
            bmi: self.bmi,
            hba1c_level: self.hba1c_level,
            blood_glucose_level: self.blood_glucose_level,
            diabetes: flag(line, "diabetes", self.diabetes)?,
        })
    }
}

fn flag(line: u64, column: &'static str, value: u8) -> Result<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(DatasetError::InvalidValue {
            line,
            column,
            value: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Race;

    const HEADER: &str = "year,gender,age,location,race:AfricanAmerican,race:Asian,race:Caucasian,race:Hispanic,race:Other,hypertension,heart_disease,smoking_history,bmi,hbA1c_level,blood_glucose_level,diabetes";

    fn read(body: &str) -> Result<Vec<Record>> {
        let data = format!("{HEADER}\n{body}");
        RecordReader::new(data.as_bytes())?.collect()
    }

    #[test]
    fn reads_typed_records() {
        let records = read(
            "2020,Female,32.0,Alabama,0,0,0,0,1,0,0,never,27.32,5.0,100,0\n\
             2015,Male,29.0,Texas,0,1,0,0,0,1,1,current,19.95,6.6,159,1\n",
        )
        .unwrap();

        assert_eq!(records.len(), 2);

        let second = &records[1];
        assert_eq!(second.year, 2015);
        assert_eq!(second.gender, Gender::Male);
        assert_eq!(second.location, "Texas");
        assert!(second.race.is_set(Race::Asian));
        assert!(!second.race.is_set(Race::Other));
        assert!(second.hypertension);
        assert!(second.heart_disease);
        assert_eq!(second.smoking_history, "current");
        assert_eq!(second.hba1c_level, 6.6);
        assert_eq!(second.blood_glucose_level, 159.0);
        assert!(second.diabetes);
    }

    #[test]
    fn ignores_unknown_columns_and_trims_fields() {
        let data = "extra,diabetes,year,gender,age,location,race:AfricanAmerican,race:Asian,race:Caucasian,race:Hispanic,race:Other,hypertension,heart_disease,smoking_history,bmi,hbA1c_level,blood_glucose_level\n\
                    x, 1 ,2019, Other ,54,Ohio,1,0,0,0,0,0,0, No Info ,30.1,7.0,200\n";

        let records: Vec<Record> = RecordReader::new(data.as_bytes())
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(records[0].gender, Gender::Other);
        assert_eq!(records[0].smoking_history, "No Info");
        assert!(records[0].diabetes);
    }

    #[test]
    fn rejects_flags_other_than_zero_or_one() {
        let error = read("2020,Female,32.0,Alabama,0,0,0,0,1,0,0,never,27.32,5.0,100,2\n").unwrap_err();

        match error {
            DatasetError::InvalidValue {
                line,
                column,
                value,
            } => {
                assert_eq!(line, 2);
                assert_eq!(column, "diabetes");
                assert_eq!(value, "2");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_unknown_gender() {
        let error = read("2020,Unknown,32.0,Alabama,0,0,0,0,1,0,0,never,27.32,5.0,100,0\n").unwrap_err();

        assert!(matches!(error, DatasetError::UnknownGender(gender) if gender == "Unknown"));
    }

    #[test]
    fn rejects_non_numeric_measures() {
        let error = read("2020,Male,old,Alabama,0,0,0,0,1,0,0,never,27.32,5.0,100,0\n").unwrap_err();

        assert!(matches!(error, DatasetError::Csv(_)));
    }
}
