// decisions.rs - Loader for the exclusivity decision table

use crate::core::exclusivity::Verdict;
use crate::data::loaders::table::DelimitedTable;
use crate::error::Result;
use std::collections::BTreeMap;
use std::path::Path;

/// Gene -> verdict read back from a decision table
#[derive(Debug, Clone, Default)]
pub struct Decisions {
    pub verdicts: BTreeMap<String, Verdict>,
    /// Rows skipped for bad encoding or an unknown decision
    pub malformed_rows: usize,
}

impl Decisions {
    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }

    /// PASS genes in name order
    pub fn passing(&self) -> impl Iterator<Item = &String> {
        self.verdicts
            .iter()
            .filter(|(_, verdict)| **verdict == Verdict::Pass)
            .map(|(gene, _)| gene)
    }
}

/// Read a `Gene ... decision` table. Rows with an unknown decision are logged
/// and counted; the remaining rows are kept.
pub fn load_decisions(path: &Path) -> Result<Decisions> {
    let table = DelimitedTable::from_file(path)?;
    from_table(table, &path.display().to_string())
}

pub fn parse_decisions(content: &[u8], source_name: &str) -> Result<Decisions> {
    from_table(DelimitedTable::from_bytes(content, source_name)?, source_name)
}

fn from_table(mut table: DelimitedTable, source_name: &str) -> Result<Decisions> {
    let gene_idx = table.require_column("Gene", source_name)?;
    let decision_idx = table.require_column("decision", source_name)?;

    let mut verdicts = BTreeMap::new();
    let rows = std::mem::take(&mut table.rows);
    for (row_idx, record) in rows.iter().enumerate() {
        let gene = record.get(gene_idx).unwrap_or("");
        if gene.is_empty() {
            continue;
        }
        match record.get(decision_idx).unwrap_or("").parse::<Verdict>() {
            Ok(verdict) => {
                verdicts.insert(gene.to_string(), verdict);
            }
            Err(reason) => {
                let line = record
                    .position()
                    .map(|p| p.line() as usize)
                    .unwrap_or(row_idx + 2);
                table.reject_row(source_name, line, &format!("{}: {}", gene, reason));
            }
        }
    }
    Ok(Decisions {
        verdicts,
        malformed_rows: table.malformed_rows,
    })
}
