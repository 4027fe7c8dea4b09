// mod.rs - Data structures module

pub mod alignment;
pub mod homology;
pub mod loaders;
pub mod presence;
pub mod scores;

// Re-export main types for convenience
pub use alignment::{Alignment, AlignmentRecord};
pub use homology::{HomologyHit, HomologyReport};
pub use presence::{PresenceConfig, PresenceMatrix};
pub use scores::{ScoreEntry, ScoreTable};
