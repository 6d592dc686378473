use log::{debug, info};

use super::loader::numbers_to_column;
use super::model::{ColumnData, Dataset};
use super::numeric::{parse_number, Number};

/// Minimum share of present values that must parse as numbers before a text
/// column is promoted.  Lower values risk nulling out real text such as short
/// alphanumeric codes; `1.0` would reject numeric columns with a single stray
/// entry.
pub const PROMOTION_THRESHOLD: f64 = 0.95;

/// Outcome of the numeric refinement pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RefineReport {
    /// Promoted column names with their parse success rate.
    pub promoted: Vec<(String, f64)>,
    /// Text columns examined but left as text.
    pub kept_text: Vec<String>,
}

/// Promote text columns to numeric when at least `threshold` of their present
/// values parse as numbers.
///
/// The rate is measured against the present values of the original column,
/// not the row count.  Values that fail to parse in a promoted column become
/// absent.  Columns with no rows or no present values are left alone, as is
/// every column that is already numeric.
pub fn promote_numeric_columns(dataset: &mut Dataset, threshold: f64) -> RefineReport {
    let mut report = RefineReport::default();

    for col in &mut dataset.columns {
        let ColumnData::Text(values) = &col.data else {
            continue;
        };
        if values.is_empty() {
            continue;
        }

        let non_null = col.data.non_null_count();
        if non_null == 0 {
            debug!("Column '{}' has no values, leaving as text", col.name);
            continue;
        }

        let trial: Vec<Option<Number>> = values
            .iter()
            .map(|v| v.as_deref().and_then(parse_number))
            .collect();
        let parsed = trial.iter().filter(|n| n.is_some()).count();
        let success_rate = parsed as f64 / non_null as f64;

        if success_rate >= threshold {
            let all_integer = trial
                .iter()
                .flatten()
                .all(|n| matches!(n, Number::Integer(_)));
            info!(
                "Promoting column '{}' to numeric ({parsed}/{non_null} parsed)",
                col.name
            );
            col.data = numbers_to_column(trial, all_integer);
            report.promoted.push((col.name.clone(), success_rate));
        } else {
            debug!(
                "Column '{}' stays text ({parsed}/{non_null} parsed)",
                col.name
            );
            report.kept_text.push(col.name.clone());
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Column, ColumnKind};

    fn text_column(name: &str, values: &[Option<&str>]) -> Column {
        Column::new(
            name,
            ColumnData::Text(values.iter().map(|v| v.map(str::to_string)).collect()),
        )
    }

    fn single(col: Column) -> Dataset {
        let rows = col.data.len();
        Dataset::new(vec![col], rows)
    }

    #[test]
    fn mostly_numeric_column_is_promoted_with_stray_value_nulled() {
        let mut values: Vec<Option<String>> = (0..19).map(|i| Some(i.to_string())).collect();
        values.push(Some("oops".to_string()));
        let mut ds = single(Column::new("n", ColumnData::Text(values)));

        let report = promote_numeric_columns(&mut ds, PROMOTION_THRESHOLD);

        assert_eq!(report.promoted, vec![("n".to_string(), 0.95)]);
        let ColumnData::Integer(out) = &ds.columns[0].data else {
            panic!("expected integer column");
        };
        assert_eq!(out[18], Some(18));
        assert_eq!(out[19], None);
    }

    #[test]
    fn below_threshold_keeps_original_text() {
        let col = text_column("code", &[Some("X1"), Some("Y2"), Some("3")]);
        let mut ds = single(col.clone());

        let report = promote_numeric_columns(&mut ds, PROMOTION_THRESHOLD);

        assert!(report.promoted.is_empty());
        assert_eq!(report.kept_text, vec!["code".to_string()]);
        assert_eq!(ds.columns[0], col);
    }

    #[test]
    fn rate_uses_present_values_as_denominator() {
        // 1 of 1 present values parses; against the 4 rows it would be 25%.
        let mut ds = single(text_column("s", &[Some("5"), None, None, None]));
        promote_numeric_columns(&mut ds, PROMOTION_THRESHOLD);
        assert_eq!(
            ds.columns[0].data,
            ColumnData::Integer(vec![Some(5), None, None, None])
        );
    }

    #[test]
    fn mixed_literals_promote_to_float() {
        let mut ds = single(text_column("x", &[Some("1"), Some("2.5"), None]));
        promote_numeric_columns(&mut ds, PROMOTION_THRESHOLD);
        assert_eq!(
            ds.columns[0].data,
            ColumnData::Float(vec![Some(1.0), Some(2.5), None])
        );
    }

    #[test]
    fn skips_empty_all_null_and_numeric_columns() {
        let mut ds = Dataset::new(
            vec![
                text_column("nulls", &[None, None]),
                Column::new("ints", ColumnData::Integer(vec![Some(1), None])),
            ],
            2,
        );
        let before = ds.clone();
        let report = promote_numeric_columns(&mut ds, PROMOTION_THRESHOLD);
        assert_eq!(ds, before);
        assert_eq!(report, RefineReport::default());

        let mut empty = single(text_column("e", &[]));
        promote_numeric_columns(&mut empty, PROMOTION_THRESHOLD);
        assert_eq!(empty.columns[0].kind(), ColumnKind::Text);
    }
}
