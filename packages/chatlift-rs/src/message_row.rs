//! Output records and the tabular / JSON writers that downstream tools consume.
use anyhow::Result;
use chrono::Utc;
use csv::WriterBuilder;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::sender::Sender;

/// Column order of the tabular export.
pub const COLUMNS: [&str; 5] = ["Date", "Time", "Sender", "Message", "Source"];

/// One reconstructed chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRow {
    /// Date of the most recent date bubble, verbatim. Empty before the first one.
    #[serde(rename = "Date")]
    pub date: String,
    /// Timestamp that closed the message; empty for the trailing message by default.
    #[serde(rename = "Time")]
    pub time: String,
    #[serde(rename = "Sender")]
    pub sender: Sender,
    #[serde(rename = "Message")]
    pub message: String,
    /// Identifier of the screenshot the message was read from.
    #[serde(rename = "Source")]
    pub source: String,
}

/// Stable sort by `(date, time)` as plain strings.
///
/// This is lexicographic, so `"12 Jan 2023"` sorts before `"3 Jan 2023"` and `"10:00 AM"` before
/// `"9:00 AM"`.
pub fn sort_rows(rows: &mut [MessageRow]) {
    rows.sort_by(|a, b| (&a.date, &a.time).cmp(&(&b.date, &b.time)));
}

/// Writes a header line followed by one record per row.
pub fn write_csv<W: Write>(rows: &[MessageRow], writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(COLUMNS)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// JSON export of a batch run
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatHistoryDocument {
    pub version: String,
    pub generated_at: String,
    pub total_images: usize,
    pub total_rows: usize,
    pub rows: Vec<MessageRow>,
}

impl ChatHistoryDocument {
    pub fn new(rows: Vec<MessageRow>, total_images: usize) -> Self {
        Self {
            version: "1.0".to_string(),
            generated_at: Utc::now().to_rfc3339(),
            total_images,
            total_rows: rows.len(),
            rows,
        }
    }
}

pub fn write_json<W: Write>(document: &ChatHistoryDocument, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, document)?;
    Ok(())
}
