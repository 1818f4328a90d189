use super::DataStore;
use crate::error::{CalcError, Result};
use crate::model::CalculationRecord;
use chrono::{DateTime, NaiveDateTime, Utc};
use csv::StringRecord;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const COLUMNS: [&str; 5] = ["operation", "operand1", "operand2", "result", "timestamp"];

#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| self.io_error("create directory for", e))?;
            }
        }
        Ok(())
    }

    fn io_error(&self, action: &str, e: std::io::Error) -> CalcError {
        CalcError::Persistence(format!("Failed to {} {}: {}", action, self.path.display(), e))
    }
}

impl DataStore for CsvStore {
    fn save(&mut self, entries: &[CalculationRecord]) -> Result<()> {
        self.ensure_parent()?;
        let content = encode(entries)?;

        // Write-then-rename so a crash mid-save never truncates the old file
        let tmp = self.path.with_extension("csv.tmp");
        fs::write(&tmp, content).map_err(|e| self.io_error("write", e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error("replace", e))?;
        Ok(())
    }

    fn load(&self) -> Result<Vec<CalculationRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| self.io_error("read", e))?;
        decode(&content)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Serialize `entries` as CSV with a header row. Fields are quoted only when
/// they contain a delimiter, quote or line break.
pub fn encode(entries: &[CalculationRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(COLUMNS).map_err(csv_error)?;
    for record in entries {
        writer
            .write_record([
                record.operation().to_string(),
                record.operand_a().to_string(),
                record.operand_b().to_string(),
                record.result().to_string(),
                record.timestamp().to_rfc3339(),
            ])
            .map_err(csv_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CalcError::Persistence(format!("Failed to encode history: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| CalcError::Persistence(format!("Failed to encode history: {}", e)))
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    operation: String,
    operand1: f64,
    operand2: f64,
    result: f64,
    timestamp: String,
}

pub fn decode(content: &str) -> Result<Vec<CalculationRecord>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    // Columns are matched by name, case-insensitively, in any order
    let headers: StringRecord = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(|h| h.to_lowercase())
        .collect();
    if let Some(missing) = COLUMNS.iter().find(|col| !headers.iter().any(|h| h == **col)) {
        return Err(CalcError::Persistence(format!(
            "History file is missing column '{}'",
            missing
        )));
    }

    reader
        .records()
        .map(|row| {
            let row = row.map_err(|e| bad_row(line_of(&e), row_error(&e)))?;
            let line = row.position().map_or(0, |p| p.line());
            let parsed: CsvRow = row
                .deserialize(Some(&headers))
                .map_err(|e| bad_row(line, row_error(&e)))?;
            to_record(parsed).map_err(|msg| bad_row(line, msg))
        })
        .collect()
}

fn to_record(row: CsvRow) -> std::result::Result<CalculationRecord, String> {
    if row.operation.is_empty() {
        return Err("empty operation".to_string());
    }
    Ok(CalculationRecord::with_timestamp(
        row.operation,
        finite(row.operand1, "operand1")?,
        finite(row.operand2, "operand2")?,
        finite(row.result, "result")?,
        parse_timestamp(&row.timestamp)?,
    ))
}

fn finite(value: f64, col: &str) -> std::result::Result<f64, String> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("invalid number '{}' in '{}'", value, col))
    }
}

/// Accepts RFC 3339 as written by [`encode`], and naive ISO-8601 timestamps
/// (treated as UTC) as found in older history files.
fn parse_timestamp(raw: &str) -> std::result::Result<DateTime<Utc>, String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| format!("invalid timestamp '{}'", raw))
}

fn line_of(e: &csv::Error) -> u64 {
    e.position().map_or(0, |p| p.line())
}

/// The row-level part of a csv error, without the crate's position prefix.
fn row_error(e: &csv::Error) -> String {
    match e.kind() {
        csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("expected {} fields, found {}", expected_len, len),
        _ => e.to_string(),
    }
}

fn csv_error(e: csv::Error) -> CalcError {
    CalcError::Persistence(format!("Malformed history file: {}", e))
}

fn bad_row(line: u64, msg: String) -> CalcError {
    CalcError::Persistence(format!("Invalid history row at line {}: {}", line, msg))
}
