use glycolens_dashboard::Command;
use glycolens_dashboard::Controller;
use glycolens_dashboard::Dimension;
use glycolens_dashboard::Report;
use glycolens_dashboard::Selection;
use glycolens_dataset::Dataset;
use glycolens_dataset::geo::Boundaries;
use glycolens_dataset::sample::SampleConfig;
use tracing::info;

use crate::cli::PathExt;
use crate::cli::ViewArgs;
use crate::error::CliError;

pub(crate) fn view(args: ViewArgs) -> Result<(), CliError> {
    let output_path = args.output_path.or_current_dir()?;
    let commands = commands(&args.toggle)?;

    info!(
        path = %args.path.display(),
        output_path = %output_path.display(),
        "glycolens reads the dataset and writes the dashboard report"
    );

    let mut dataset = Dataset::load(&args.path, SampleConfig::new(args.cap))?;
    if let Some(geo) = &args.geo {
        dataset = dataset.with_boundaries(Boundaries::from_path(geo)?);
    }

    let mut controller = Controller::new(dataset);
    if let Some(class) = args.class {
        controller.dispatch(Command::ToggleClass(class.into()));
    }
    for command in commands {
        controller.dispatch(command);
    }
    if let Some(index) = args.inspect {
        controller.dispatch(Command::Inspect(index));
    }

    let report = Report::init(&output_path)?;
    report.generate(&controller.snapshot())?;

    Ok(())
}

fn commands(toggles: &[String]) -> Result<Vec<Command>, CliError> {
    toggles
        .iter()
        .map(|toggle| parse_toggle(toggle).map(Command::ToggleFilter))
        .collect()
}

fn parse_toggle(toggle: &str) -> Result<Selection, CliError> {
    let (dimension, value) = toggle
        .split_once('=')
        .ok_or_else(|| CliError::Toggle(format!("`{toggle}` is not of the form <dimension>=<value>")))?;

    let dimension: Dimension = dimension.trim().parse().map_err(CliError::Toggle)?;
    Selection::parse(dimension, value.trim()).map_err(|e| CliError::Toggle(e.to_string()))
}
