// mafft.rs - MAFFT multiple sequence aligner

use super::traits::ExternalTool;
use std::path::Path;
use std::process::Command;

/// `mafft --thread N --auto input.fa > output.fa`
#[derive(Debug, Clone)]
pub struct MafftAligner {
    pub program: String,
    pub threads: usize,
}

impl MafftAligner {
    pub fn new(program: &str, threads: usize) -> Self {
        Self {
            program: program.to_string(),
            threads,
        }
    }
}

impl Default for MafftAligner {
    fn default() -> Self {
        Self::new("mafft", 8)
    }
}

impl ExternalTool for MafftAligner {
    fn name(&self) -> &'static str {
        "mafft"
    }

    fn description(&self) -> &'static str {
        "MAFFT multiple sequence alignment (--auto strategy)"
    }

    fn command(&self, input: &Path, _output: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg("--thread")
            .arg(self.threads.to_string())
            .arg("--auto")
            .arg(input);
        command
    }

    fn captures_stdout(&self) -> bool {
        true
    }
}
