use std::error::Error;
use std::fmt::Display;

use glycolens_dashboard::error::ReportError;
use glycolens_dataset::error::DatasetError;

#[derive(Debug)]
pub(crate) enum CliError {
    Dataset(DatasetError),
    Report(ReportError),
    Path(String),
    Toggle(String),
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CliError::Dataset(error) => Some(error),
            CliError::Report(error) => Some(error),
            CliError::Path(_) | CliError::Toggle(_) => None,
        }
    }
}

impl From<DatasetError> for CliError {
    fn from(error: DatasetError) -> Self {
        CliError::Dataset(error)
    }
}

impl From<ReportError> for CliError {
    fn from(error: ReportError) -> Self {
        CliError::Report(error)
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cli_error = "CLI error:";

        match self {
            CliError::Dataset(error) => write!(f, "{cli_error} {error}"),
            CliError::Report(error) => write!(f, "{cli_error} {error}"),
            CliError::Path(error) => write!(f, "{cli_error} {error}"),
            CliError::Toggle(error) => write!(f, "{cli_error} invalid toggle: {error}"),
        }
    }
}
