// homology.rs - Loader for the tab-separated homology-search report

use crate::data::homology::{HomologyHit, HomologyReport, REPORT_COLUMNS};
use crate::error::{MarkerError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Columns up to and including qcovs must be present on every row
const REQUIRED_COLUMNS: usize = 15;

fn parse_field<T: std::str::FromStr>(fields: &[&str], idx: usize) -> std::result::Result<T, String> {
    let raw = fields.get(idx).map(|s| s.trim()).unwrap_or("");
    raw.parse::<T>()
        .map_err(|_| format!("column '{}' has non-numeric value '{}'", REPORT_COLUMNS[idx], raw))
}

fn text_field(fields: &[&str], idx: usize) -> String {
    fields.get(idx).map(|s| s.trim().to_string()).unwrap_or_default()
}

impl HomologyHit {
    /// Parse one report line. Titles may contain spaces and commas but not tabs;
    /// anything past the last fixed column is folded into the title.
    pub fn parse_line(line: &str) -> std::result::Result<Self, String> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < REQUIRED_COLUMNS {
            return Err(format!(
                "expected at least {} columns, found {}",
                REQUIRED_COLUMNS,
                fields.len()
            ));
        }
        let title = if fields.len() > REPORT_COLUMNS.len() {
            fields[REPORT_COLUMNS.len() - 1..].join(" ").trim().to_string()
        } else {
            text_field(&fields, 17)
        };

        let hit = Self {
            query_id: text_field(&fields, 0),
            subject_id: text_field(&fields, 1),
            pident: parse_field(&fields, 2)?,
            length: parse_field(&fields, 3)?,
            mismatches: parse_field(&fields, 4)?,
            gap_opens: parse_field(&fields, 5)?,
            query_start: parse_field(&fields, 6)?,
            query_end: parse_field(&fields, 7)?,
            subject_start: parse_field(&fields, 8)?,
            subject_end: parse_field(&fields, 9)?,
            evalue: parse_field(&fields, 10)?,
            bitscore: parse_field(&fields, 11)?,
            query_len: parse_field(&fields, 12)?,
            subject_len: parse_field(&fields, 13)?,
            qcovs: parse_field(&fields, 14)?,
            scientific_name: text_field(&fields, 15),
            tax_id: text_field(&fields, 16),
            title,
        };
        if !hit.pident.is_finite() || !hit.qcovs.is_finite() || !hit.bitscore.is_finite() {
            return Err("identity, coverage and bit score must be finite".to_string());
        }
        Ok(hit)
    }
}

impl HomologyReport {
    /// Load a report. A missing or zero-byte file is an empty report, not an error.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            println!(
                "📭 No homology report at {}: no competing evidence",
                path.display()
            );
            return Ok(Self::default());
        }
        let file = File::open(path).map_err(|e| MarkerError::io(path, e))?;
        let report = Self::from_reader(BufReader::new(file), &path.display().to_string())?;
        println!(
            "📊 Homology report loaded: {} hits ({} malformed rows skipped) from {}",
            report.len(),
            report.malformed_rows,
            path.display()
        );
        Ok(report)
    }

    /// Parse report lines one at a time. A line that is not UTF-8 or does not
    /// parse is logged and counted in `malformed_rows`.
    pub fn from_reader<R: BufRead>(mut reader: R, source_name: &str) -> Result<Self> {
        let mut report = Self::default();
        let mut buf = Vec::new();
        let mut line_num = 0;
        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| MarkerError::malformed(source_name, e.to_string()))?;
            if read == 0 {
                break;
            }
            line_num += 1;

            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line.trim_end_matches(&['\n', '\r'][..]),
                Err(e) => {
                    report.reject_line(source_name, line_num, &format!("invalid UTF-8 ({})", e));
                    continue;
                }
            };
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            match HomologyHit::parse_line(line) {
                Ok(hit) => report.hits.push(hit),
                Err(reason) => report.reject_line(source_name, line_num, &reason),
            }
        }
        Ok(report)
    }

    fn reject_line(&mut self, source_name: &str, line_num: usize, reason: &str) {
        eprintln!(
            "⚠️  {}",
            MarkerError::malformed(source_name, format!("line {}: {}", line_num, reason))
        );
        self.malformed_rows += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW: &str = "geneA\tgi|123\t97.5\t900\t20\t1\t1\t900\t100\t999\t1e-150\t1500\t920\t2000000\t98\tStreptococcus dysgalactiae\t1334\tNZ_CP000001.1 Streptococcus dysgalactiae strain X chromosome, complete genome";

    #[test]
    fn test_parse_full_row() {
        let hit = HomologyHit::parse_line(ROW).unwrap();
        assert_eq!(hit.query_id, "geneA");
        assert_eq!(hit.pident, 97.5);
        assert_eq!(hit.qcovs, 98.0);
        assert_eq!(hit.bitscore, 1500.0);
        assert_eq!(hit.evalue, 1e-150);
        assert!(hit.title.starts_with("NZ_CP000001.1"));
    }

    #[test]
    fn test_row_without_trailing_names() {
        let row = "geneA\tsub\t90\t100\t10\t0\t1\t100\t1\t100\t1e-20\t150\t100\t5000\t100";
        let hit = HomologyHit::parse_line(row).unwrap();
        assert_eq!(hit.title, "");
        assert_eq!(hit.scientific_name, "");
    }

    #[test]
    fn test_malformed_rows_are_counted_not_fatal() {
        let content = format!("{}\nshort\trow\ngeneB\tsub\tNaNx\t1\t1\t1\t1\t1\t1\t1\t1\t1\t1\t1\t1\n", ROW);
        let report = HomologyReport::from_reader(content.as_bytes(), "report.tsv").unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report.malformed_rows, 2);
    }

    #[test]
    fn test_non_utf8_title_counted_not_fatal() {
        let mut content = format!("{}\n", ROW).into_bytes();
        content.extend_from_slice(
            b"geneB\tsub\t90\t100\t10\t0\t1\t100\t1\t100\t1e-20\t150\t100\t5000\t100\tS. sp\t1\tcaf",
        );
        content.push(0xe9);
        content.extend_from_slice(b" strain\r\n");

        let report = HomologyReport::from_reader(content.as_slice(), "hits.tsv").unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report.malformed_rows, 1);
        assert_eq!(report.hits[0].query_id, "geneA");
    }

    #[test]
    fn test_missing_file_is_empty_report() {
        let dir = tempfile::tempdir().unwrap();
        let report = HomologyReport::from_file(&dir.path().join("absent.tsv")).unwrap();
        assert!(report.is_empty());
    }
}
