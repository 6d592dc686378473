//! Import a CSV file into an SQLite table.
//!
//! The pipeline loads the whole file into a [`data::model::Dataset`], infers
//! nullable numeric column types, promotes mostly-numeric text columns and
//! writes the result as a fresh table.

pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod sink;

pub use config::ImportOptions;
pub use error::{ImportError, Result};
pub use pipeline::{import_csv, ImportSummary};
