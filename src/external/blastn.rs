// blastn.rs - BLAST+ nucleotide homology search

use super::traits::ExternalTool;
use std::path::Path;
use std::process::Command;

/// Tabular output columns, matching the homology report loader
pub const OUTFMT: &str = "6 qseqid sseqid pident length mismatch gapopen qstart qend sstart send evalue bitscore qlen slen qcovs sscinames staxids stitle";

/// `blastn -query consensus.fasta -db DB -outfmt "6 ..." -evalue E -max_target_seqs N -out report.tsv`
#[derive(Debug, Clone)]
pub struct BlastnSearch {
    pub program: String,
    pub database: String,
    pub evalue: f64,
    pub max_target_seqs: usize,
}

impl BlastnSearch {
    pub fn new(program: &str, database: &str, evalue: f64, max_target_seqs: usize) -> Self {
        Self {
            program: program.to_string(),
            database: database.to_string(),
            evalue,
            max_target_seqs,
        }
    }
}

impl ExternalTool for BlastnSearch {
    fn name(&self) -> &'static str {
        "blastn"
    }

    fn description(&self) -> &'static str {
        "BLAST+ blastn search of consensus sequences against a reference database"
    }

    fn command(&self, input: &Path, output: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg("-query")
            .arg(input)
            .arg("-db")
            .arg(&self.database)
            .arg("-outfmt")
            .arg(OUTFMT)
            .arg("-evalue")
            .arg(self.evalue.to_string())
            .arg("-max_target_seqs")
            .arg(self.max_target_seqs.to_string())
            .arg("-out")
            .arg(output);
        command
    }
}
