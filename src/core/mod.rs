// mod.rs - Core analysis module

pub mod consensus;
pub mod exclusivity;
pub mod filter;
pub mod identity;
pub mod snps;

// Re-export main types for convenience
pub use consensus::{build_consensus, build_consensus_batch, ConsensusConfig, ConsensusSequence};
pub use exclusivity::{
    classify, summarize_neighbors, ExclusivityConfig, ExclusivityDecision, NeighborNormalizer,
    NeighborSummary, Verdict,
};
pub use filter::{filter_candidates, CandidateSet, FilterConfig};
pub use identity::{average_pairwise_identity, score_alignments, IdentityScore};
pub use snps::{map_snps, GeneSnpResult, GeneSnpSummary, SnpRecord, StrainDivergence};
