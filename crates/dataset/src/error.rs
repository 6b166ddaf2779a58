use std::convert::From;
use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::io;
use std::sync::Arc;

/// The result type that uses [DatasetError] as the error type.
pub type Result<T> = std::result::Result<T, DatasetError>;

/// The error type for loading the dataset.
///
/// Errors mostly originate from I/O read operations, CSV and GeoJSON
/// deserialization and field values that do not fit the record schema.
#[derive(Debug, Clone)]
pub enum DatasetError {
    /// A [`std::io::Error`] encountered while reading the source files.
    Io(Arc<io::Error>),

    /// A [`csv::Error`] encountered while reading the tabular data.
    Csv(Arc<csv::Error>),

    /// A [`serde_json::Error`] encountered while parsing the boundary set.
    Json(Arc<serde_json::Error>),

    /// A field value that could not be converted into the record schema.
    InvalidValue {
        line: u64,
        column: &'static str,
        value: String,
    },

    /// A gender label outside of `Male`, `Female` and `Other`.
    UnknownGender(String),

    /// A race key that does not name one of the one-hot race columns.
    UnknownRaceKey(String),
}

impl Display for DatasetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let dataset_error = "dataset error:";

        match self {
            DatasetError::Io(error) => write!(f, "{dataset_error} I/O error: {error}"),
            DatasetError::Csv(error) => write!(f, "{dataset_error} CSV error: {error}"),
            DatasetError::Json(error) => {
                write!(f, "{dataset_error} GeoJSON deserialization error: {error}")
            }
            DatasetError::InvalidValue {
                line,
                column,
                value,
            } => write!(
                f,
                "{dataset_error} invalid value \"{value}\" in the \"{column}\" column on line {line}"
            ),
            DatasetError::UnknownGender(value) => {
                write!(f, "{dataset_error} unknown gender: \"{value}\"")
            }
            DatasetError::UnknownRaceKey(value) => {
                write!(f, "{dataset_error} unknown race key: \"{value}\"")
            }
        }
    }
}

impl Error for DatasetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DatasetError::Io(error) => Some(error.as_ref()),
            DatasetError::Csv(error) => Some(error.as_ref()),
            DatasetError::Json(error) => Some(error.as_ref()),
            DatasetError::InvalidValue { .. } => None,
            DatasetError::UnknownGender(_) => None,
            DatasetError::UnknownRaceKey(_) => None,
        }
    }
}

impl From<io::Error> for DatasetError {
    fn from(error: io::Error) -> Self {
        DatasetError::Io(Arc::new(error))
    }
}

impl From<csv::Error> for DatasetError {
    fn from(error: csv::Error) -> Self {
        DatasetError::Csv(Arc::new(error))
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(error: serde_json::Error) -> Self {
        DatasetError::Json(Arc::new(error))
    }
}
