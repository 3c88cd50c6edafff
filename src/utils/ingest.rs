//! Spreadsheet (CSV) ingestion: header normalisation, per-row
//! deserialisation and validation.

use crate::error::{AppError, AppResult};
use crate::validation::describe_errors;
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Serialize;
use serde::de::DeserializeOwned;
use validator::Validate;

/// How many row errors are echoed back to the client.
pub const MAX_REPORTED_ERRORS: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowError {
    /// 1-based data row number; the header row is not counted.
    pub row: usize,
    pub message: String,
}

/// Parses every data row. Rows failing deserialisation, field validation or
/// `check` are collected instead of aborting at the first one.
pub fn collect_rows<T, F>(bytes: &[u8], check: F) -> Result<Vec<T>, Vec<RowError>>
where
    T: DeserializeOwned + Validate,
    F: Fn(&T) -> AppResult<()>,
{
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(bytes);

    let headers: StringRecord = match reader.headers() {
        Ok(raw) => raw.iter().map(crate::utils::snake_case_key).collect(),
        Err(e) => {
            return Err(vec![RowError {
                row: 0,
                message: format!("Unreadable header row: {}", e),
            }]);
        }
    };
    if headers.iter().all(|h| h.is_empty()) {
        return Err(vec![RowError {
            row: 0,
            message: "Spreadsheet has no header row".to_string(),
        }]);
    }

    let mut rows = Vec::new();
    let mut errors = Vec::new();

    for (index, record) in reader.records().enumerate() {
        let row = index + 1;
        let parsed = record
            .map_err(|e| e.to_string())
            .and_then(|record| {
                record
                    .deserialize::<T>(Some(&headers))
                    .map_err(|e| e.to_string())
            })
            .and_then(|value| {
                value.validate().map_err(|e| describe_errors(&e))?;
                check(&value).map_err(|e| match e {
                    AppError::Validation { message } => message,
                    other => other.to_string(),
                })?;
                Ok(value)
            });

        match parsed {
            Ok(value) => rows.push(value),
            Err(message) => errors.push(RowError { row, message }),
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }
    if rows.is_empty() {
        return Err(vec![RowError {
            row: 0,
            message: "Spreadsheet contains no data rows".to_string(),
        }]);
    }
    Ok(rows)
}

/// Renders row errors as a single validation message, capped at
/// `MAX_REPORTED_ERRORS` entries.
pub fn describe_row_errors(errors: &[RowError]) -> String {
    let mut parts: Vec<String> = errors
        .iter()
        .take(MAX_REPORTED_ERRORS)
        .map(|e| {
            if e.row == 0 {
                e.message.clone()
            } else {
                format!("row {}: {}", e.row, e.message)
            }
        })
        .collect();
    if errors.len() > MAX_REPORTED_ERRORS {
        parts.push(format!("and {} more", errors.len() - MAX_REPORTED_ERRORS));
    }
    parts.join("; ")
}

/// All-or-nothing variant used by the upload endpoints.
pub fn parse_rows<T, F>(bytes: &[u8], check: F) -> AppResult<Vec<T>>
where
    T: DeserializeOwned + Validate,
    F: Fn(&T) -> AppResult<()>,
{
    collect_rows(bytes, check).map_err(|errors| {
        tracing::warn!(invalid_rows = errors.len(), "Rejected spreadsheet import");
        AppError::validation(format!(
            "Spreadsheet rejected: {}",
            describe_row_errors(&errors)
        ))
    })
}
