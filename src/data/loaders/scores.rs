// scores.rs - Loader for the gene identity table (CSV or TSV)

use crate::data::loaders::table::DelimitedTable;
use crate::data::scores::{ScoreEntry, ScoreTable};
use crate::error::Result;
use std::path::Path;

pub const GENE_FILE_COLUMN: &str = "Gene_File";
pub const GENE_NAME_COLUMN: &str = "Gene_Name";
pub const IDENTITY_COLUMN: &str = "Average_Identity(%)";

impl ScoreTable {
    /// Load the identity table written by the identity stage.
    ///
    /// `Gene_File` and `Average_Identity(%)` are required header columns; rows
    /// whose identity is absent or not numeric are kept with `identity: None`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let table = DelimitedTable::from_file(path)?;
        let scores = Self::from_table(&table, &path.display().to_string())?;
        println!(
            "📊 Identity table loaded: {} genes ({} unparseable, {} malformed rows) from {}",
            scores.len(),
            scores.unparseable(),
            scores.malformed_rows,
            path.display()
        );
        Ok(scores)
    }

    pub fn from_bytes(content: &[u8], source_name: &str) -> Result<Self> {
        Self::from_table(&DelimitedTable::from_bytes(content, source_name)?, source_name)
    }

    fn from_table(table: &DelimitedTable, source_name: &str) -> Result<Self> {
        let gene_idx = table.require_column(GENE_FILE_COLUMN, source_name)?;
        let identity_idx = table.require_column(IDENTITY_COLUMN, source_name)?;
        let name_idx = table.column(GENE_NAME_COLUMN);

        let mut entries = Vec::new();
        for record in &table.rows {
            let gene_file = match record.get(gene_idx) {
                Some(g) if !g.is_empty() => g.to_string(),
                _ => continue,
            };
            let gene_name = name_idx
                .and_then(|i| record.get(i))
                .unwrap_or("")
                .to_string();
            let identity = record
                .get(identity_idx)
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|v| v.is_finite());

            entries.push(ScoreEntry {
                gene_file,
                gene_name,
                identity,
            });
        }

        Ok(ScoreTable {
            entries,
            malformed_rows: table.malformed_rows,
        })
    }
}
