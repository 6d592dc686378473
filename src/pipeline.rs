use std::path::Path;

use log::info;

use crate::config::ImportOptions;
use crate::data::loader::{best_effort, infer_types, load_csv};
use crate::data::model::Dataset;
use crate::data::refine::{promote_numeric_columns, RefineReport};
use crate::error::Result;
use crate::sink::{write_table, WriteSummary};

/// Result of a complete import.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSummary {
    pub refine: RefineReport,
    pub write: WriteSummary,
}

/// Load and type a CSV file without writing it anywhere.
pub fn prepare_dataset(csv_path: &Path, options: &ImportOptions) -> Result<(Dataset, RefineReport)> {
    options.validate()?;

    let loaded = load_csv(csv_path, &options.null_markers())?;
    let mut dataset = best_effort(loaded, "type inference", infer_types);
    let report = promote_numeric_columns(&mut dataset, options.promotion_threshold);

    for col in &dataset.columns {
        info!("Column '{}': {}", col.name, col.kind());
    }
    Ok((dataset, report))
}

/// Import `csv_path` into `table` of the SQLite database at `db_path`,
/// replacing the table if it already exists.
pub fn import_csv(
    csv_path: &Path,
    db_path: &Path,
    table: &str,
    options: &ImportOptions,
) -> Result<ImportSummary> {
    let (dataset, refine) = prepare_dataset(csv_path, options)?;
    let write = write_table(&dataset, db_path, table)?;
    Ok(ImportSummary { refine, write })
}
