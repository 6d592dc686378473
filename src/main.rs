use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use csv_to_sqlite::{import_csv, ImportOptions};

#[derive(Parser)]
#[command(name = "csv_to_sqlite")]
#[command(about = "Import CSV into SQLite with numeric types.")]
#[command(version)]
struct Cli {
    /// Path to the input CSV file
    #[arg(long)]
    csv: PathBuf,

    /// Output SQLite DB path
    #[arg(long)]
    db: PathBuf,

    /// Table name to create/replace
    #[arg(long)]
    table: String,

    /// JSON file with import options
    #[arg(long)]
    config: Option<PathBuf>,

    /// Token to read as null (repeatable; replaces the configured tokens)
    #[arg(long = "na-value")]
    na_values: Vec<String>,

    /// Treat the configured tokens as the complete null vocabulary
    #[arg(long)]
    no_default_na: bool,

    /// Share of non-null values that must parse before a text column turns numeric
    #[arg(long)]
    threshold: Option<f64>,
}

impl Cli {
    fn options(&self) -> Result<ImportOptions> {
        let mut options = match &self.config {
            Some(path) => ImportOptions::from_json_file(path)
                .with_context(|| format!("loading options from {}", path.display()))?,
            None => ImportOptions::default(),
        };
        if !self.na_values.is_empty() {
            options.na_values = self.na_values.clone();
        }
        if self.no_default_na {
            options.keep_default_na = false;
        }
        if let Some(t) = self.threshold {
            options.promotion_threshold = t;
        }
        Ok(options)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let options = cli.options()?;

    import_csv(&cli.csv, &cli.db, &cli.table, &options).with_context(|| {
        format!(
            "importing {} into {}:{}",
            cli.csv.display(),
            cli.db.display(),
            cli.table
        )
    })?;

    println!(
        "Imported {} -> {}:{}",
        cli.csv.display(),
        cli.db.display(),
        cli.table
    );
    Ok(())
}
