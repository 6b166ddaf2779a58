use glycolens_dataset::read_records;
use glycolens_dataset::sample::class_counts;

use crate::cli::CountArgs;
use crate::error::CliError;

pub(crate) fn count(args: CountArgs) -> Result<(), CliError> {
    let records = read_records(&args.path)?;
    let counts = class_counts(&records);

    println!("Total records: {}", counts.total);
    println!("Diabetic (diabetes = 1): {}", counts.diabetic);
    println!("Non-diabetic (diabetes = 0): {}", counts.non_diabetic);

    Ok(())
}
