// snps.rs - Per-strain divergence from the gene consensus

use crate::data::Alignment;
use crate::error::MarkerError;
use std::collections::BTreeMap;

/// One column where a strain differs from the consensus (1-based position)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnpRecord {
    pub gene: String,
    pub strain: String,
    pub position: usize,
    pub consensus_base: u8,
    pub strain_base: u8,
}

/// Divergence count of one strain against its gene consensus
#[derive(Debug, Clone, PartialEq)]
pub struct StrainDivergence {
    pub gene: String,
    pub strain: String,
    pub snps: usize,
    pub length: usize,
}

impl StrainDivergence {
    pub fn snp_rate(&self) -> f64 {
        if self.length == 0 {
            0.0
        } else {
            self.snps as f64 / self.length as f64
        }
    }
}

/// Per-gene aggregate over the mapped strains
#[derive(Debug, Clone, PartialEq)]
pub struct GeneSnpSummary {
    pub gene: String,
    pub n_strains: usize,
    pub mean_snps: f64,
    pub max_snps: usize,
}

/// Differing strains at one consensus position
#[derive(Debug, Clone, PartialEq)]
pub struct PositionSummary {
    pub gene: String,
    pub position: usize,
    pub consensus_base: u8,
    pub strains: Vec<(String, u8)>,
}

/// Everything mapped for one gene
#[derive(Debug)]
pub struct GeneSnpResult {
    pub gene: String,
    pub strains: Vec<StrainDivergence>,
    pub records: Vec<SnpRecord>,
    /// Strains whose length differs from the consensus
    pub skipped: Vec<(String, MarkerError)>,
}

impl GeneSnpResult {
    /// `None` when no strain could be mapped
    pub fn summary(&self) -> Option<GeneSnpSummary> {
        if self.strains.is_empty() {
            return None;
        }
        let total: usize = self.strains.iter().map(|s| s.snps).sum();
        Some(GeneSnpSummary {
            gene: self.gene.clone(),
            n_strains: self.strains.len(),
            mean_snps: total as f64 / self.strains.len() as f64,
            max_snps: self.strains.iter().map(|s| s.snps).max().unwrap_or(0),
        })
    }

    /// Divergence records collapsed by position, in position order
    pub fn by_position(&self, consensus: &[u8]) -> Vec<PositionSummary> {
        let mut positions: BTreeMap<usize, Vec<(String, u8)>> = BTreeMap::new();
        for record in &self.records {
            positions
                .entry(record.position)
                .or_default()
                .push((record.strain.clone(), record.strain_base));
        }
        positions
            .into_iter()
            .map(|(position, strains)| PositionSummary {
                gene: self.gene.clone(),
                position,
                consensus_base: consensus.get(position - 1).copied().unwrap_or(b'?'),
                strains,
            })
            .collect()
    }
}

/// Compare every strain with the consensus. Gaps are ordinary characters, so a
/// gap against a base counts as divergence. Strains of the wrong length are
/// reported in `skipped`, never truncated or padded.
pub fn map_snps(alignment: &Alignment, consensus: &[u8]) -> GeneSnpResult {
    let mut result = GeneSnpResult {
        gene: alignment.gene.clone(),
        strains: Vec::with_capacity(alignment.len()),
        records: Vec::new(),
        skipped: Vec::new(),
    };

    for record in &alignment.records {
        if record.sequence.len() != consensus.len() {
            result.skipped.push((
                record.id.clone(),
                MarkerError::malformed(
                    format!("{}/{}", alignment.gene, record.id),
                    format!(
                        "strain length {} differs from consensus length {}",
                        record.sequence.len(),
                        consensus.len()
                    ),
                ),
            ));
            continue;
        }

        let mut snps = 0;
        for (idx, (&cons, &base)) in consensus.iter().zip(record.sequence.iter()).enumerate() {
            if cons != base {
                snps += 1;
                result.records.push(SnpRecord {
                    gene: alignment.gene.clone(),
                    strain: record.id.clone(),
                    position: idx + 1,
                    consensus_base: cons,
                    strain_base: base,
                });
            }
        }

        result.strains.push(StrainDivergence {
            gene: alignment.gene.clone(),
            strain: record.id.clone(),
            snps,
            length: consensus.len(),
        });
    }

    result
}
