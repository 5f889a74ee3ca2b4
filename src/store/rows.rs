//! Generic row codec between SQLite tables and flat JSON row objects
//!
//! Snapshots carry each table as an array of flat column-name -> scalar
//! objects. Reading converts SQLite values to JSON scalars (blobs become
//! base64 strings); inserting rebuilds a column-driven INSERT from the row's
//! own keys so that original primary and foreign keys are replayed verbatim.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::Connection;
use serde_json::{Map, Number, Value};

use crate::error::{LedgerError, LedgerResult};

/// A flat row: column name -> scalar JSON value
pub type RowMap = Map<String, Value>;

/// Read every row of a table, in storage order, as flat JSON objects
pub fn read_table_rows(conn: &Connection, table: &str) -> LedgerResult<Vec<RowMap>> {
    check_identifier(table)?;

    let mut stmt = conn.prepare(&format!("SELECT * FROM \"{}\"", table))?;
    let column_names: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();

    let mut out = Vec::new();
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let mut map = Map::with_capacity(column_names.len());
        for (i, name) in column_names.iter().enumerate() {
            map.insert(name.clone(), sql_to_json(row.get_ref(i)?));
        }
        out.push(map);
    }

    Ok(out)
}

/// Insert one flat row into a table, using the row's own column names
pub fn insert_row(conn: &Connection, table: &str, row: &RowMap) -> LedgerResult<()> {
    check_identifier(table)?;

    if row.is_empty() {
        conn.execute(&format!("INSERT INTO \"{}\" DEFAULT VALUES", table), [])?;
        return Ok(());
    }

    let mut columns = Vec::with_capacity(row.len());
    let mut placeholders = Vec::with_capacity(row.len());
    let mut params: Vec<SqlValue> = Vec::with_capacity(row.len());

    for (i, (name, value)) in row.iter().enumerate() {
        check_identifier(name)?;
        columns.push(format!("\"{}\"", name));
        placeholders.push(format!("?{}", i + 1));
        params.push(json_to_sql(table, name, value)?);
    }

    let sql = format!(
        "INSERT INTO \"{}\" ({}) VALUES ({})",
        table,
        columns.join(", "),
        placeholders.join(", ")
    );
    conn.execute(&sql, rusqlite::params_from_iter(params))?;

    Ok(())
}

/// Reject identifiers that cannot be safely quoted into SQL
fn check_identifier(name: &str) -> LedgerResult<()> {
    let ok = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if ok {
        Ok(())
    } else {
        Err(LedgerError::Store(format!("invalid identifier: {:?}", name)))
    }
}

fn sql_to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Number(i.into()),
        ValueRef::Real(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::String(BASE64.encode(b)),
    }
}

fn json_to_sql(table: &str, column: &str, value: &Value) -> LedgerResult<SqlValue> {
    match value {
        Value::Null => Ok(SqlValue::Null),
        Value::Bool(b) => Ok(SqlValue::Integer(*b as i64)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(SqlValue::Integer(i))
            } else if let Some(f) = n.as_f64() {
                Ok(SqlValue::Real(f))
            } else {
                Err(LedgerError::Store(format!(
                    "unrepresentable number in {}.{}",
                    table, column
                )))
            }
        }
        Value::String(s) => Ok(SqlValue::Text(s.clone())),
        Value::Array(_) | Value::Object(_) => Err(LedgerError::Store(format!(
            "non-scalar value in {}.{}",
            table, column
        ))),
    }
}
