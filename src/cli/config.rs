// config.rs - Configuration file support

use crate::core::{ConsensusConfig, ExclusivityConfig, FilterConfig};
use crate::data::PresenceConfig;
use crate::external::ExternalConfig;
use crate::pipeline::SnpConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Inputs and output directory of `run`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PathsConfig {
    pub alignments: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub homology_report: Option<PathBuf>,
}

/// Identity table settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Presence/absence matrix or two-column table naming each cluster
    pub gene_names: Option<PathBuf>,
}

/// Whole configuration file. Every section is optional and falls back to the
/// built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub threads: Option<usize>,
    pub paths: PathsConfig,
    pub consensus: ConsensusConfig,
    pub identity: IdentityConfig,
    pub filter: FilterConfig,
    pub exclusivity: ExclusivityConfig,
    pub presence: PresenceConfig,
    pub snps: SnpConfig,
    pub external: ExternalConfig,
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

        println!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# cgmarker.toml - Configuration file for cgmarker
# Command line arguments override these settings

# Number of threads (omit for auto-detection)
threads = 16

# =============================================================================
# PATHS (used by `cgmarker run`)
# =============================================================================
[paths]
# Directory of per-gene alignments (.fasta, .fa, .fas, .aln)
alignments = "core_gene_alignments"

# Output directory
out_dir = "marker_results"

# Precomputed homology report; omit to run the search (needs [external] database)
# homology_report = "exclusivity_hits.tsv"

# =============================================================================
# CONSENSUS
# =============================================================================
[consensus]
gap_char = "-"
# Drop gaps from each column before voting
exclude_gaps = true
# Emitted for all-gap columns
gap_fill = "N"
# Emitted when two or more residues tie
ambiguity_char = "N"
case_insensitive = false

# =============================================================================
# IDENTITY
# =============================================================================
[identity]
# Presence/absence matrix or two-column table naming each gene cluster
# gene_names = "gene_presence_absence.csv"

# =============================================================================
# CANDIDATE FILTER
# =============================================================================
[filter]
# Minimum average pairwise identity (percent, inclusive)
threshold = 98.0

# =============================================================================
# EXCLUSIVITY
# =============================================================================
[exclusivity]
# A gene is rejected when its best competing hit reaches BOTH thresholds
min_pident = 85.0
min_qcovs = 80.0
# Target organism names; matching hits are not competing evidence
exclude_neighbors = []

# =============================================================================
# CORE-CLUSTER SELECTION
# =============================================================================
[presence]
# Minimum fraction of samples carrying a cluster (0.0-1.0)
min_presence = 0.99

# =============================================================================
# SNPS
# =============================================================================
[snps]
# Per-SNP record table
write_records = false
# Per-position table with semicolon-joined strains
write_positions = false

# =============================================================================
# EXTERNAL TOOLS
# =============================================================================
[external]
aligner = "mafft"
aligner_threads = 8
search = "blastn"
# database = "/path/to/blastdb/ref_prok_rep_genomes"
evalue = 1e-5
max_target_seqs = 10
"#
        .to_string()
    }
}
