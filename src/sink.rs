use std::path::Path;

use log::{debug, info};
use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::{params_from_iter, Connection, DropBehavior, ToSql};

use crate::data::model::{Cell, ColumnKind, Dataset};
use crate::error::Result;

/// What a successful write produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    pub table: String,
    pub rows: usize,
    pub columns: usize,
}

impl ToSql for Cell<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::Borrowed(match *self {
            Cell::Null => ValueRef::Null,
            Cell::Integer(i) => ValueRef::Integer(i),
            Cell::Float(f) => ValueRef::Real(f),
            Cell::Text(s) => ValueRef::Text(s.as_bytes()),
        }))
    }
}

/// SQLite column type for a column kind.
pub fn sql_type(kind: ColumnKind) -> &'static str {
    match kind {
        ColumnKind::Integer => "INTEGER",
        ColumnKind::Float => "REAL",
        ColumnKind::Text => "TEXT",
    }
}

/// Quote an SQLite identifier, doubling embedded quotes.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Write `dataset` into `table` of the SQLite file at `db_path`, replacing
/// any existing table of that name.
///
/// Missing parent directories are created.  The connection is committed and
/// closed whether or not the write succeeds; a failure part way through can
/// leave the old table dropped without a replacement.
pub fn write_table(dataset: &Dataset, db_path: &Path, table: &str) -> Result<WriteSummary> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut conn = Connection::open(db_path)?;
    let written = replace_table(&mut conn, dataset, table);
    let closed = conn.close().map_err(|(_, e)| e);

    let summary = written?;
    closed?;
    info!(
        "Wrote {} rows to {}:{}",
        summary.rows,
        db_path.display(),
        table
    );
    Ok(summary)
}

fn replace_table(conn: &mut Connection, dataset: &Dataset, table: &str) -> Result<WriteSummary> {
    let mut tx = conn.transaction()?;
    // Keep whatever already ran if we bail out with `?` below.
    tx.set_drop_behavior(DropBehavior::Commit);

    let table_ident = quote_ident(table);
    tx.execute_batch(&format!("DROP TABLE IF EXISTS {table_ident}"))?;

    let column_defs: Vec<String> = dataset
        .columns
        .iter()
        .map(|c| format!("{} {}", quote_ident(&c.name), sql_type(c.kind())))
        .collect();
    let create = format!("CREATE TABLE {table_ident} ({})", column_defs.join(", "));
    debug!("{create}");
    tx.execute_batch(&create)?;

    let names: Vec<String> = dataset.column_names().map(quote_ident).collect();
    let placeholders: Vec<String> = (1..=names.len()).map(|i| format!("?{i}")).collect();
    let insert = format!(
        "INSERT INTO {table_ident} ({}) VALUES ({})",
        names.join(", "),
        placeholders.join(", ")
    );

    {
        let mut stmt = tx.prepare(&insert)?;
        for row in 0..dataset.len() {
            stmt.execute(params_from_iter(dataset.row(row)))?;
        }
    }

    tx.commit()?;

    Ok(WriteSummary {
        table: table.to_string(),
        rows: dataset.len(),
        columns: dataset.columns.len(),
    })
}
