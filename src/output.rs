//! Output formatting and persistence for metric rows.
//!
//! Supports JSON logging, JSON files, and CSV tables.

use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use tracing::{debug, info};

/// Logs a value as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes a value as pretty-printed JSON, replacing any existing file.
pub fn write_json(path: &str, value: &impl Serialize) -> Result<()> {
    let body = serde_json::to_vec_pretty(value)?;
    std::fs::write(path, body).with_context(|| format!("failed to write '{path}'"))?;
    debug!(path, "JSON written");
    Ok(())
}

/// Writes `rows` to a fresh CSV file with a header line.
pub fn write_records<T: Serialize>(path: &str, rows: &[T]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("failed to create '{path}'"))?;

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    debug!(path, rows = rows.len(), "CSV written");
    Ok(())
}
