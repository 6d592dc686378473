use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::loader::NullMarkers;
use crate::data::refine::PROMOTION_THRESHOLD;
use crate::error::{ImportError, Result};

/// Null tokens recognised on top of the default vocabulary.
pub const CONFIGURED_NA_VALUES: &[&str] = &["", "NA", "NaN", "null", "None"];

/// Knobs for one import run.
///
/// Can be read from a JSON file; missing fields take their defaults:
///
/// ```json
/// { "na_values": ["", "NA", "-"], "keep_default_na": false, "promotion_threshold": 0.9 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    /// Literal cell values that load as null.
    pub na_values: Vec<String>,
    /// Whether `na_values` extends the default vocabulary (`true`) or is the
    /// complete vocabulary (`false`).
    pub keep_default_na: bool,
    /// Share of present values that must parse before a text column turns
    /// numeric.
    pub promotion_threshold: f64,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            na_values: CONFIGURED_NA_VALUES.iter().map(|s| s.to_string()).collect(),
            keep_default_na: true,
            promotion_threshold: PROMOTION_THRESHOLD,
        }
    }
}

impl ImportOptions {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let options: ImportOptions = serde_json::from_str(&text)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        let t = self.promotion_threshold;
        if !(t > 0.0 && t <= 1.0) {
            return Err(ImportError::Config(format!(
                "promotion_threshold must be in (0, 1], got {t}"
            )));
        }
        Ok(())
    }

    /// The effective null vocabulary.
    pub fn null_markers(&self) -> NullMarkers {
        NullMarkers::new(self.na_values.iter().cloned(), self.keep_default_na)
    }
}
