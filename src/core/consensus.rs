// consensus.rs - Majority-rule consensus per gene alignment

use crate::data::Alignment;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Consensus voting configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsensusConfig {
    /// Gap character used by the aligner
    pub gap_char: char,
    /// Drop gap characters from each column before voting
    pub exclude_gaps: bool,
    /// Emitted when a column holds nothing but gaps and gaps are excluded
    pub gap_fill: char,
    /// Emitted when two or more characters share the top tally
    pub ambiguity_char: char,
    /// Upper-case characters before voting
    pub case_insensitive: bool,
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            gap_char: '-',
            exclude_gaps: true,
            gap_fill: 'N',
            ambiguity_char: 'N',
            case_insensitive: false,
        }
    }
}

impl ConsensusConfig {
    /// All special characters must be single-byte ASCII
    pub fn validate(&self) -> Result<(), String> {
        for (name, c) in [
            ("gap_char", self.gap_char),
            ("gap_fill", self.gap_fill),
            ("ambiguity_char", self.ambiguity_char),
        ] {
            if !c.is_ascii() {
                return Err(format!("{} must be an ASCII character, got '{}'", name, c));
            }
        }
        Ok(())
    }
}

/// Consensus sequence of one gene
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsensusSequence {
    pub gene: String,
    pub sequence: Vec<u8>,
}

impl ConsensusSequence {
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.sequence).unwrap_or("")
    }
}

/// Vote one column. Counts live in a fixed table indexed by byte value, so the
/// outcome cannot depend on record order.
fn vote_column<'a>(column: impl Iterator<Item = &'a u8>, config: &ConsensusConfig) -> u8 {
    let gap = config.gap_char as u8;
    let mut counts = [0usize; 256];
    let mut total = 0usize;

    for &c in column {
        let c = if config.case_insensitive {
            c.to_ascii_uppercase()
        } else {
            c
        };
        if config.exclude_gaps && c == gap {
            continue;
        }
        counts[c as usize] += 1;
        total += 1;
    }

    if total == 0 {
        return if config.exclude_gaps {
            config.gap_fill as u8
        } else {
            gap
        };
    }

    let max = counts.iter().copied().max().unwrap_or(0);
    let mut winners = counts.iter().enumerate().filter(|(_, n)| **n == max);
    match (winners.next(), winners.next()) {
        (Some((byte, _)), None) => byte as u8,
        _ => config.ambiguity_char as u8,
    }
}

/// Build the consensus of an alignment, one character per column.
///
/// Zero records yield an empty consensus.
pub fn build_consensus(alignment: &Alignment, config: &ConsensusConfig) -> ConsensusSequence {
    let width = alignment.width();
    let sequence = (0..width)
        .map(|col| {
            vote_column(
                alignment.records.iter().map(|r| &r.sequence[col]),
                config,
            )
        })
        .collect();

    ConsensusSequence {
        gene: alignment.gene.clone(),
        sequence,
    }
}

/// Consensus for many genes in parallel, returned sorted by gene name
pub fn build_consensus_batch(
    alignments: &[Alignment],
    config: &ConsensusConfig,
) -> Vec<ConsensusSequence> {
    let mut consensus: Vec<ConsensusSequence> = alignments
        .par_iter()
        .map(|aln| build_consensus(aln, config))
        .collect();
    consensus.sort_by(|a, b| a.gene.cmp(&b.gene));
    consensus
}
