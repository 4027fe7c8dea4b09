// mod.rs - External aligner and homology-search collaborators

pub mod blastn;
pub mod mafft;
pub mod traits;

pub use blastn::BlastnSearch;
pub use mafft::MafftAligner;
pub use traits::ExternalTool;

use serde::{Deserialize, Serialize};

/// Programs and parameters of the external collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalConfig {
    /// Aligner executable (MAFFT compatible)
    pub aligner: String,
    pub aligner_threads: usize,
    /// Search executable (blastn compatible)
    pub search: String,
    /// Reference database; the search stage is skipped without one
    pub database: Option<String>,
    pub evalue: f64,
    pub max_target_seqs: usize,
}

impl Default for ExternalConfig {
    fn default() -> Self {
        Self {
            aligner: "mafft".to_string(),
            aligner_threads: 8,
            search: "blastn".to_string(),
            database: None,
            evalue: 1e-5,
            max_target_seqs: 10,
        }
    }
}

impl ExternalConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.aligner_threads == 0 {
            return Err("aligner_threads must be at least 1".to_string());
        }
        if self.evalue.is_nan() || self.evalue <= 0.0 {
            return Err(format!("evalue must be positive, got {}", self.evalue));
        }
        if self.max_target_seqs == 0 {
            return Err("max_target_seqs must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn aligner(&self) -> MafftAligner {
        MafftAligner::new(&self.aligner, self.aligner_threads)
    }

    /// `None` when no database is configured
    pub fn search(&self) -> Option<BlastnSearch> {
        self.database
            .as_deref()
            .map(|db| BlastnSearch::new(&self.search, db, self.evalue, self.max_target_seqs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_requires_database() {
        let mut config = ExternalConfig::default();
        assert!(config.search().is_none());
        config.database = Some("/db/refseq".to_string());
        let search = config.search().unwrap();
        assert_eq!(search.database, "/db/refseq");
        assert_eq!(search.max_target_seqs, 10);
    }

    #[test]
    fn test_validation() {
        assert!(ExternalConfig::default().validate().is_ok());
        let config = ExternalConfig {
            evalue: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
