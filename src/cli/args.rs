// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs)]
/// cgmarker - Core-genome marker discovery: consensus, identity, exclusivity and SNPs
pub struct Args {
    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// number of threads (default: auto-detect)
    #[argh(option)]
    pub threads: Option<usize>,

    #[argh(subcommand)]
    pub command: Command,
}

#[derive(FromArgs)]
#[argh(subcommand)]
pub enum Command {
    Run(RunArgs),
    CoreSelect(CoreSelectArgs),
    Align(AlignArgs),
    Identity(IdentityArgs),
    Filter(FilterArgs),
    Consensus(ConsensusArgs),
    Search(SearchArgs),
    Exclusivity(ExclusivityArgs),
    Snps(SnpsArgs),
    ExtractPass(ExtractPassArgs),
    GenerateConfig(GenerateConfigArgs),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Run(_) => "run",
            Command::CoreSelect(_) => "core-select",
            Command::Align(_) => "align",
            Command::Identity(_) => "identity",
            Command::Filter(_) => "filter",
            Command::Consensus(_) => "consensus",
            Command::Search(_) => "search",
            Command::Exclusivity(_) => "exclusivity",
            Command::Snps(_) => "snps",
            Command::ExtractPass(_) => "extract-pass",
            Command::GenerateConfig(_) => "generate-config",
        }
    }
}

#[derive(FromArgs)]
#[argh(subcommand, name = "run")]
/// run identity, filter, consensus, search, exclusivity and SNP stages
pub struct RunArgs {
    /// directory of per-gene alignments (.fasta, .fa, .fas, .aln)
    #[argh(option)]
    pub alignments: Option<String>,

    /// output directory
    #[argh(option)]
    pub output: Option<String>,

    /// gene display names: presence/absence matrix or two-column table
    #[argh(option)]
    pub gene_names: Option<String>,

    /// precomputed homology report (skips the search)
    #[argh(option)]
    pub report: Option<String>,

    /// reference database for the homology search
    #[argh(option)]
    pub database: Option<String>,

    /// identity threshold in percent (default: 98)
    #[argh(option)]
    pub threshold: Option<f64>,

    /// exclusivity identity threshold in percent (default: 85)
    #[argh(option)]
    pub min_pident: Option<f64>,

    /// exclusivity coverage threshold in percent (default: 80)
    #[argh(option)]
    pub min_qcovs: Option<f64>,

    /// target organism name; hits matching it are not competing evidence (repeatable)
    #[argh(option)]
    pub exclude_neighbor: Vec<String>,

    /// gap character of the alignments (default: -)
    #[argh(option)]
    pub gap_char: Option<char>,

    /// let gaps take part in the consensus vote
    #[argh(switch)]
    pub keep_gaps: bool,

    /// character for all-gap columns (default: N)
    #[argh(option)]
    pub gap_fill: Option<char>,

    /// character for tied columns (default: N)
    #[argh(option)]
    pub ambiguity_char: Option<char>,

    /// upper-case residues before voting
    #[argh(switch)]
    pub case_insensitive: bool,

    /// also write the per-SNP record table
    #[argh(switch)]
    pub snp_records: bool,

    /// also write the per-position SNP table
    #[argh(switch)]
    pub snp_positions: bool,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "core-select")]
/// write one raw FASTA per core cluster of a presence/absence matrix
pub struct CoreSelectArgs {
    /// presence/absence matrix (Panaroo gene_presence_absence.csv)
    #[argh(option)]
    pub presence: String,

    /// combined CDS FASTA with ids of the form cluster|...
    #[argh(option)]
    pub cds: String,

    /// output directory for raw cluster FASTA files
    #[argh(option)]
    pub output: String,

    /// minimum fraction of samples carrying a cluster (default: 0.99)
    #[argh(option)]
    pub min_presence: Option<f64>,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "align")]
/// align every raw cluster FASTA with the external aligner
pub struct AlignArgs {
    /// directory of raw cluster FASTA files
    #[argh(option)]
    pub input: String,

    /// output directory for alignments
    #[argh(option)]
    pub output: String,

    /// aligner executable (default: mafft)
    #[argh(option)]
    pub aligner: Option<String>,

    /// threads per aligner run (default: 8)
    #[argh(option)]
    pub aligner_threads: Option<usize>,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "identity")]
/// average pairwise identity per gene alignment
pub struct IdentityArgs {
    /// directory of per-gene alignments
    #[argh(option)]
    pub alignments: String,

    /// output identity table (CSV)
    #[argh(option)]
    pub output: String,

    /// gene display names: presence/absence matrix or two-column table
    #[argh(option)]
    pub gene_names: Option<String>,

    /// restrict to genes listed in a file (one per line)
    #[argh(option)]
    pub genes: Option<String>,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "filter")]
/// select candidate genes by identity threshold
pub struct FilterArgs {
    /// identity table (CSV or TSV)
    #[argh(option)]
    pub scores: String,

    /// output gene list
    #[argh(option)]
    pub output: String,

    /// identity threshold in percent (default: 98)
    #[argh(option)]
    pub threshold: Option<f64>,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "consensus")]
/// majority-rule consensus per gene alignment
pub struct ConsensusArgs {
    /// directory of per-gene alignments
    #[argh(option)]
    pub alignments: String,

    /// output consensus FASTA
    #[argh(option)]
    pub output: String,

    /// restrict to genes listed in a file (one per line)
    #[argh(option)]
    pub genes: Option<String>,

    /// gap character of the alignments (default: -)
    #[argh(option)]
    pub gap_char: Option<char>,

    /// let gaps take part in the consensus vote
    #[argh(switch)]
    pub keep_gaps: bool,

    /// character for all-gap columns (default: N)
    #[argh(option)]
    pub gap_fill: Option<char>,

    /// character for tied columns (default: N)
    #[argh(option)]
    pub ambiguity_char: Option<char>,

    /// upper-case residues before voting
    #[argh(switch)]
    pub case_insensitive: bool,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "search")]
/// search consensus sequences against a reference database
pub struct SearchArgs {
    /// consensus FASTA
    #[argh(option)]
    pub consensus: String,

    /// output homology report (tabular)
    #[argh(option)]
    pub output: String,

    /// reference database
    #[argh(option)]
    pub database: Option<String>,

    /// search executable (default: blastn)
    #[argh(option)]
    pub program: Option<String>,

    /// e-value cutoff (default: 1e-5)
    #[argh(option)]
    pub evalue: Option<f64>,

    /// maximum hits per query (default: 10)
    #[argh(option)]
    pub max_target_seqs: Option<usize>,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "exclusivity")]
/// PASS/REJECT decisions from a homology report
pub struct ExclusivityArgs {
    /// homology report (missing or empty: every gene passes)
    #[argh(option)]
    pub report: String,

    /// output decision table (TSV)
    #[argh(option)]
    pub output: String,

    /// candidate genes (one per line); genes without hits pass as unknown
    #[argh(option)]
    pub genes: Option<String>,

    /// output per-neighbor summary table (TSV)
    #[argh(option)]
    pub neighbors: Option<String>,

    /// identity threshold in percent (default: 85)
    #[argh(option)]
    pub min_pident: Option<f64>,

    /// coverage threshold in percent (default: 80)
    #[argh(option)]
    pub min_qcovs: Option<f64>,

    /// target organism name; hits matching it are not competing evidence (repeatable)
    #[argh(option)]
    pub exclude_neighbor: Vec<String>,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "snps")]
/// per-strain divergence from the gene consensus
pub struct SnpsArgs {
    /// directory of per-gene alignments
    #[argh(option)]
    pub alignments: String,

    /// consensus FASTA
    #[argh(option)]
    pub consensus: String,

    /// output per-strain table (TSV)
    #[argh(option)]
    pub per_strain: String,

    /// output per-gene summary table (TSV)
    #[argh(option)]
    pub per_gene: String,

    /// output per-SNP record table (TSV)
    #[argh(option)]
    pub records: Option<String>,

    /// output per-position table (TSV)
    #[argh(option)]
    pub positions: Option<String>,

    /// restrict to genes listed in a file (one per line)
    #[argh(option)]
    pub genes: Option<String>,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "extract-pass")]
/// write one consensus FASTA per gene that passed exclusivity
pub struct ExtractPassArgs {
    /// consensus FASTA
    #[argh(option)]
    pub consensus: String,

    /// exclusivity decision table
    #[argh(option)]
    pub decisions: String,

    /// output directory
    #[argh(option)]
    pub output: String,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "generate-config")]
/// print a sample configuration file
pub struct GenerateConfigArgs {
    /// write the sample to this file instead of stdout
    #[argh(option)]
    pub output: Option<String>,
}
