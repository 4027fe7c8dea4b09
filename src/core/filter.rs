// filter.rs - Identity threshold filter selecting marker candidates

use crate::data::ScoreTable;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Candidate selection threshold (percentage, inclusive)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub threshold: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self { threshold: 98.0 }
    }
}

impl FilterConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=100.0).contains(&self.threshold) {
            return Err(format!(
                "Identity threshold must be between 0 and 100, got {}",
                self.threshold
            ));
        }
        Ok(())
    }
}

/// Genes passing the identity threshold, in input table order, plus the counts
/// of genes left out
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateSet {
    pub genes: Vec<String>,
    pub below_threshold: usize,
    pub unparseable: usize,
    /// Repeated rows of a gene already selected
    pub duplicates: usize,
}

impl CandidateSet {
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}

/// Keep genes whose identity is at least `threshold`. Genes without a
/// parseable score are excluded and counted; a gene selected twice is kept once.
pub fn filter_candidates(table: &ScoreTable, threshold: f64) -> CandidateSet {
    let mut set = CandidateSet::default();
    let mut seen = HashSet::new();
    for entry in &table.entries {
        match entry.identity {
            Some(identity) if identity >= threshold => {
                if seen.insert(entry.gene_file.as_str()) {
                    set.genes.push(entry.gene_file.clone());
                } else {
                    set.duplicates += 1;
                }
            }
            Some(_) => set.below_threshold += 1,
            None => set.unparseable += 1,
        }
    }
    set
}
