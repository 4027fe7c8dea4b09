// lib.rs - cgmarker library root

//! # cgmarker - Core-genome marker discovery for bacterial species
//!
//! Given per-gene alignments of core genes across strains, this library builds a
//! majority-rule consensus per gene, scores alignment conservation, selects
//! highly conserved candidates, decides whether each candidate is exclusive to
//! the target species from homology-search hits, and reports how far every
//! strain diverges from its gene consensus.
//!
//! ## Features
//!
//! - **Order-independent consensus**: tallies per column with explicit tie and gap policy
//! - **Parallel per-gene stages**: consensus, identity and SNP mapping run on rayon
//! - **Exclusivity decisions**: best competing hit with identity AND coverage rule
//! - **Partial results**: malformed genes are skipped and tallied, never fatal
//! - **External collaborators**: MAFFT alignment and blastn search behind one trait
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use cgmarker::prelude::*;
//! use std::path::Path;
//!
//! let alignments = Path::new("core_gene_alignments");
//! let (_, scores) = run_identity(alignments, None, &Default::default(), Path::new("identity.csv"))?;
//! let (_, candidates) = run_filter(Path::new("identity.csv"), &FilterConfig::default(), Path::new("genes.txt"))?;
//! let decisions = classify(&HomologyReport::default(), &candidates.genes, &ExclusivityConfig::default());
//! assert!(decisions.iter().all(|d| d.verdict == Verdict::Pass));
//! # let _ = scores;
//! # Ok::<(), MarkerError>(())
//! ```

pub mod cli;
pub mod core;
pub mod data;
pub mod error;
pub mod external;
pub mod output;
pub mod pipeline;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::core::{
        average_pairwise_identity, build_consensus, classify, filter_candidates, map_snps,
        ConsensusConfig, ExclusivityConfig, FilterConfig, Verdict,
    };
    pub use crate::data::{Alignment, AlignmentRecord, HomologyReport, ScoreTable};
    pub use crate::error::{BatchReport, MarkerError};
    pub use crate::external::{ExternalConfig, ExternalTool};
    pub use crate::pipeline::{
        run_consensus, run_exclusivity, run_filter, run_identity, run_pipeline, run_snps,
        PipelineConfig,
    };
}

// Re-export main types at the root level for convenience
pub use error::{BatchReport, MarkerError, Result};
pub use pipeline::{PipelineConfig, RunManifest};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!(
        "cgmarker v{} - Core-genome marker discovery: consensus, identity, exclusivity and SNPs",
        VERSION
    )
}
