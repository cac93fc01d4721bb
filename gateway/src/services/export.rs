//! CSV export of report rows.
//!
//! Report endpoints return arrays of flat JSON objects whose shape is owned
//! by the backend. Export does not hardcode columns: the first row's fields
//! become the header and every row is emitted in that column order.

use csv::Writer;
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// Renders upstream report rows as a CSV document.
///
/// Returns a validation error for an empty report, matching the refusal to
/// download an empty file.
pub fn rows_to_csv(rows: &[Value]) -> AppResult<String> {
    let Some(first) = rows.first() else {
        return Err(AppError::Validation("Report data is empty".to_string()));
    };

    let headers: Vec<String> = match first {
        Value::Object(map) => map.keys().cloned().collect(),
        _ => return Err(AppError::Validation("Report data is not tabular".to_string())),
    };

    let mut writer = Writer::from_writer(vec![]);
    writer
        .write_record(&headers)
        .map_err(|e| AppError::Internal(e.into()))?;

    for row in rows {
        let record: Vec<String> = headers
            .iter()
            .map(|key| cell_text(row.get(key).unwrap_or(&Value::Null)))
            .collect();
        writer
            .write_record(&record)
            .map_err(|e| AppError::Internal(e.into()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(e.into()))?;
    String::from_utf8(bytes).map_err(|e| AppError::Internal(e.into()))
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        other => other.to_string(),
    }
}
