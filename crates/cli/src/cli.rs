use std::env;
use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use glycolens_dashboard::ClassFilter;
use glycolens_dataset::sample::SampleConfig;

use crate::error::CliError;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Load the dataset, apply the filters and write the dashboard report.
    View(ViewArgs),
    /// Count the diabetic and non-diabetic records of the dataset.
    Count(CountArgs),
}

#[derive(Args)]
pub(crate) struct ViewArgs {
    /// Specify the path of the CSV dataset.
    #[arg(short, long, value_parser(parse_file))]
    pub(crate) path: PathBuf,

    /// Specify the path of the GeoJSON file with the state boundaries.
    #[arg(short, long, value_parser(parse_file))]
    pub(crate) geo: Option<PathBuf>,

    /// Specify the path where the generated output will be created.
    /// If the output path is not specified then the current working
    /// directory is used.
    #[arg(short, long, value_parser(parse_path))]
    pub(crate) output_path: Option<PathBuf>,

    /// Specify the maximum number of records kept per class.
    #[arg(short, long, default_value_t = SampleConfig::DEFAULT_CAP_PER_CLASS)]
    pub(crate) cap: usize,

    /// Toggle a filter, given as `<dimension>=<value>`.
    ///
    /// The dimensions are `state`, `race`, `smoking` and `gender`.
    /// Races are given by their column key, for example `race=race:Asian`.
    /// Toggles are applied in order, so toggling the same value twice
    /// clears the dimension.
    #[arg(short, long)]
    pub(crate) toggle: Vec<String>,

    /// Show only one class in the parallel coordinates view.
    #[arg(long, value_enum)]
    pub(crate) class: Option<ClassArg>,

    /// Compare the record at this position of the balanced dataset with
    /// the means of its class.
    #[arg(short, long)]
    pub(crate) inspect: Option<usize>,
}

#[derive(Args)]
pub(crate) struct CountArgs {
    /// Specify the path of the CSV dataset.
    #[arg(short, long, value_parser(parse_file))]
    pub(crate) path: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum ClassArg {
    Diabetic,
    NonDiabetic,
}

impl From<ClassArg> for ClassFilter {
    fn from(class: ClassArg) -> Self {
        match class {
            ClassArg::Diabetic => ClassFilter::Diabetic,
            ClassArg::NonDiabetic => ClassFilter::NonDiabetic,
        }
    }
}

fn parse_path(path: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path);

    if !path.exists() {
        return Err(format!("The `{}` path does not exist.", path.display()));
    }

    if !path.is_dir() {
        return Err(format!(
            "The `{}` path must point to a directory.",
            path.display()
        ));
    }

    Ok(path)
}

fn parse_file(path: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path);

    if !path.exists() {
        return Err(format!("The `{}` path does not exist.", path.display()));
    }

    if !path.is_file() {
        return Err(format!("The `{}` path must point to a file.", path.display()));
    }

    Ok(path)
}

pub(crate) trait PathExt {
    fn or_current_dir(self) -> Result<PathBuf, CliError>;
}

impl PathExt for Option<PathBuf> {
    fn or_current_dir(self) -> Result<PathBuf, CliError> {
        if let Some(path) = self {
            Ok(path)
        } else {
            env::current_dir().map_err(|e| CliError::Path(e.to_string()))
        }
    }
}
