// table.rs - Delimited table reader shared by the CSV/TSV loaders

use crate::error::{MarkerError, Result};
use csv::StringRecord;
use std::path::Path;

/// Tab if the header line contains one, comma otherwise
pub fn sniff_delimiter(header_line: &[u8]) -> u8 {
    if header_line.contains(&b'\t') {
        b'\t'
    } else {
        b','
    }
}

/// A header plus the rows that decoded cleanly. Rows are decoded one at a
/// time; a row with invalid UTF-8 is counted in `malformed_rows` and the rest
/// of the table is kept.
#[derive(Debug, Clone, Default)]
pub struct DelimitedTable {
    pub headers: Vec<String>,
    pub rows: Vec<StringRecord>,
    pub malformed_rows: usize,
}

impl DelimitedTable {
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(MarkerError::MissingFile(path.to_path_buf()));
        }
        let content = std::fs::read(path).map_err(|e| MarkerError::io(path, e))?;
        Self::from_bytes(&content, &path.display().to_string())
    }

    pub fn from_bytes(content: &[u8], source_name: &str) -> Result<Self> {
        if content.is_empty() {
            return Err(MarkerError::malformed(source_name, "empty table"));
        }
        let header_line = content.split(|&b| b == b'\n').next().unwrap_or(content);

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(sniff_delimiter(header_line))
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(content);

        // A header that is not UTF-8 leaves no columns to look up
        let headers = reader.headers()?.iter().map(str::to_string).collect();
        let mut table = Self {
            headers,
            ..Default::default()
        };

        for (row_idx, record) in reader.byte_records().enumerate() {
            let decoded = record.map_err(|e| e.to_string()).and_then(|raw| {
                StringRecord::from_byte_record(raw).map_err(|e| e.to_string())
            });
            match decoded {
                Ok(row) => table.rows.push(row),
                Err(reason) => {
                    table.reject_row(source_name, row_idx + 2, &reason);
                }
            }
        }
        Ok(table)
    }

    /// Log a rejected data row (1-based file line) and count it
    pub fn reject_row(&mut self, source_name: &str, line: usize, reason: &str) {
        eprintln!(
            "⚠️  {}",
            MarkerError::malformed(source_name, format!("row {}: {}", line, reason))
        );
        self.malformed_rows += 1;
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn require_column(&self, name: &str, source_name: &str) -> Result<usize> {
        self.column(name).ok_or_else(|| {
            MarkerError::malformed(source_name, format!("missing required column '{}'", name))
        })
    }
}
