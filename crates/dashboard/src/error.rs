//! Defines the `Error` and `Result` types used while writing a report.

use std::error::Error;
use std::fmt::Display;
use std::io::Error as IoError;

use tinytemplate::error::Error as TinyTemplateError;

/// The result type that uses [ReportError] as the error type.
pub type Result<T> = std::result::Result<T, ReportError>;

/// The error type for writing the dashboard report.
#[derive(Debug)]
#[non_exhaustive]
pub enum ReportError {
    /// A [std::io::Error] encountered while creating the report files.
    Io(IoError),

    /// A [serde_json::Error] encountered while serializing the snapshot.
    Json(serde_json::Error),

    /// A [tinytemplate::error::Error] encountered while registering or
    /// rendering the summary page template.
    Template(TinyTemplateError),
}

impl Error for ReportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ReportError::Io(error) => Some(error),
            ReportError::Json(error) => Some(error),
            ReportError::Template(error) => Some(error),
        }
    }
}

impl Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let report_error = "report error:";

        match self {
            ReportError::Io(error) => write!(f, "{report_error} I/O error: {error}"),
            ReportError::Json(error) => write!(f, "{report_error} JSON error: {error}"),
            ReportError::Template(error) => write!(f, "{report_error} template error: {error}"),
        }
    }
}

impl From<IoError> for ReportError {
    fn from(error: IoError) -> Self {
        ReportError::Io(error)
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(error: serde_json::Error) -> Self {
        ReportError::Json(error)
    }
}

impl From<TinyTemplateError> for ReportError {
    fn from(error: TinyTemplateError) -> Self {
        ReportError::Template(error)
    }
}
