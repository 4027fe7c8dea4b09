// mod.rs - File loaders for alignments, tables and search reports

pub mod decisions;
pub mod fasta;
pub mod homology;
pub mod presence;
pub mod scores;
pub mod table;

pub use fasta::{
    load_alignment, load_consensus_fasta, load_gene_list, read_fasta_records,
    select_alignment_files,
};
pub use decisions::{load_decisions, Decisions};
pub use presence::load_gene_name_map;
pub use table::DelimitedTable;
