use std::collections::{BTreeSet, HashSet};
use std::fmt::Display;
use std::path::Path;

use log::{debug, info, warn};

use super::model::{Column, ColumnData, Dataset};
use super::numeric::{parse_number, Number};
use crate::error::{ImportError, Result};

// ---------------------------------------------------------------------------
// Null markers
// ---------------------------------------------------------------------------

/// Tokens recognised as absent values when no custom vocabulary replaces them.
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// The set of literal cell values that load as null.  Matching is exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NullMarkers {
    tokens: BTreeSet<String>,
}

impl NullMarkers {
    /// Build the vocabulary from `tokens`.  With `keep_default` the tokens
    /// extend [`DEFAULT_NA_VALUES`]; without it they are the whole set.
    pub fn new<I, S>(tokens: I, keep_default: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set: BTreeSet<String> = tokens.into_iter().map(Into::into).collect();
        if keep_default {
            set.extend(DEFAULT_NA_VALUES.iter().map(|s| s.to_string()));
        }
        NullMarkers { tokens: set }
    }

    pub fn is_null(&self, value: &str) -> bool {
        self.tokens.contains(value)
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }
}

impl Default for NullMarkers {
    fn default() -> Self {
        NullMarkers::new(Vec::<String>::new(), true)
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Read a comma-separated file into an all-text [`Dataset`].
///
/// The first row is the header.  Cells matching `nulls` become absent values.
/// Blank lines are skipped, short rows are padded with absent values and rows
/// with more fields than the header are rejected.  The whole file is read so
/// later inference sees every value of every column.
pub fn load_csv(path: &Path, nulls: &NullMarkers) -> Result<Dataset> {
    if !path.exists() {
        return Err(ImportError::CsvNotFound(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let raw_headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    if raw_headers.is_empty() || (raw_headers.len() == 1 && raw_headers[0].is_empty()) {
        return Err(ImportError::NoColumns);
    }
    let headers = dedupe_headers(&raw_headers);
    let width = headers.len();

    let mut values: Vec<Vec<Option<String>>> = vec![Vec::new(); width];
    let mut row_count = 0usize;

    for result in reader.records() {
        let record = result?;
        if record.len() > width {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            return Err(ImportError::RaggedRow {
                line,
                expected: width,
                found: record.len(),
            });
        }

        for (col, slot) in values.iter_mut().enumerate() {
            let cell = record
                .get(col)
                .filter(|v| !nulls.is_null(v))
                .map(str::to_string);
            slot.push(cell);
        }
        row_count += 1;
    }

    let columns = headers
        .into_iter()
        .zip(values)
        .map(|(name, data)| Column::new(name, ColumnData::Text(data)))
        .collect();

    info!("Loaded {row_count} rows x {width} columns from {}", path.display());
    Ok(Dataset::new(columns, row_count))
}

/// Name empty headers `Unnamed: <i>` and suffix repeats with `.1`, `.2`, ...
fn dedupe_headers(raw: &[String]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(raw.len());

    for (i, h) in raw.iter().enumerate() {
        let base = if h.is_empty() {
            format!("Unnamed: {i}")
        } else {
            h.clone()
        };
        let mut name = base.clone();
        let mut n = 1;
        while seen.contains(&name) {
            name = format!("{base}.{n}");
            n += 1;
        }
        seen.insert(name.clone());
        out.push(name);
    }
    out
}

// ---------------------------------------------------------------------------
// Generic type inference
// ---------------------------------------------------------------------------

/// Assign nullable numeric types to text columns whose values are uniformly
/// numeric.
///
/// * every present value is an integer, or a whole float that fits in an
///   `i64` → `Integer`
/// * every present value is a number → `Float`
/// * anything else, or no present values at all → stays `Text`
pub fn infer_types(dataset: &Dataset) -> Result<Dataset> {
    dataset.validate()?;

    let columns = dataset
        .columns
        .iter()
        .map(|col| match &col.data {
            ColumnData::Text(values) => Column::new(col.name.clone(), infer_column(values)),
            _ => col.clone(),
        })
        .collect();

    Ok(Dataset::new(columns, dataset.row_count))
}

fn infer_column(values: &[Option<String>]) -> ColumnData {
    let mut parsed = Vec::with_capacity(values.len());
    let mut any_present = false;
    let mut all_integer = true;

    for v in values {
        match v {
            None => parsed.push(None),
            Some(s) => match parse_number(s) {
                Some(n) => {
                    any_present = true;
                    all_integer &= n.as_integer().is_some();
                    parsed.push(Some(n));
                }
                None => return ColumnData::Text(values.to_vec()),
            },
        }
    }

    if !any_present {
        return ColumnData::Text(values.to_vec());
    }
    numbers_to_column(parsed, all_integer)
}

/// Pack parsed numbers into an `Integer` column when `all_integer`, else a
/// `Float` column.  Whole floats are narrowed when packing integers.
pub(crate) fn numbers_to_column(parsed: Vec<Option<Number>>, all_integer: bool) -> ColumnData {
    if all_integer {
        ColumnData::Integer(
            parsed
                .into_iter()
                .map(|n| n.and_then(Number::as_integer))
                .collect(),
        )
    } else {
        ColumnData::Float(parsed.into_iter().map(|n| n.map(Number::as_f64)).collect())
    }
}

/// Run an enhancement step that is allowed to fail.
///
/// On success the enhanced dataset is returned; on failure the failure is
/// logged and `dataset` comes back untouched.
pub fn best_effort<F, E>(dataset: Dataset, stage: &str, enhance: F) -> Dataset
where
    F: FnOnce(&Dataset) -> std::result::Result<Dataset, E>,
    E: Display,
{
    match enhance(&dataset) {
        Ok(enhanced) => {
            debug!("{stage} succeeded");
            enhanced
        }
        Err(e) => {
            warn!("{stage} skipped, keeping loaded types: {e}");
            dataset
        }
    }
}
