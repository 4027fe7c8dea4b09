// validation.rs - Input validation utilities

use crate::cli::args::Command;
use crate::cli::Config;
use std::path::Path;

/// Validate every configuration section before any work runs
pub fn validate_config(config: &Config) -> Result<(), String> {
    if config.threads == Some(0) {
        return Err("threads must be at least 1".to_string());
    }
    config
        .consensus
        .validate()
        .map_err(|e| format!("[consensus] {}", e))?;
    config.filter.validate().map_err(|e| format!("[filter] {}", e))?;
    config
        .exclusivity
        .validate()
        .map_err(|e| format!("[exclusivity] {}", e))?;
    config
        .presence
        .validate()
        .map_err(|e| format!("[presence] {}", e))?;
    config
        .external
        .validate()
        .map_err(|e| format!("[external] {}", e))?;
    Ok(())
}

fn require_file(path: &str, what: &str) -> Result<(), String> {
    if !Path::new(path).is_file() {
        return Err(format!("{} '{}' does not exist", what, path));
    }
    Ok(())
}

fn require_dir(path: &str, what: &str) -> Result<(), String> {
    if !Path::new(path).is_dir() {
        return Err(format!("{} '{}' is not a directory", what, path));
    }
    Ok(())
}

/// Check the inputs a command needs up front, so a typo fails before the
/// first stage runs
pub fn validate_command(command: &Command, config: &Config) -> Result<(), String> {
    match command {
        Command::Run(_) => {
            if let Some(dir) = &config.paths.alignments {
                require_dir(&dir.display().to_string(), "Alignment directory")?;
            }
            if config.paths.homology_report.is_none() && config.external.database.is_none() {
                eprintln!("⚠️  Neither a homology report nor a search database is configured: every gene will PASS exclusivity");
            }
        }
        Command::CoreSelect(args) => {
            require_file(&args.presence, "Presence/absence matrix")?;
            require_file(&args.cds, "CDS FASTA")?;
        }
        Command::Align(args) => require_dir(&args.input, "Raw cluster directory")?,
        Command::Identity(args) => {
            require_dir(&args.alignments, "Alignment directory")?;
            if let Some(genes) = &args.genes {
                require_file(genes, "Gene list")?;
            }
        }
        Command::Filter(args) => require_file(&args.scores, "Identity table")?,
        Command::Consensus(args) => {
            require_dir(&args.alignments, "Alignment directory")?;
            if let Some(genes) = &args.genes {
                require_file(genes, "Gene list")?;
            }
        }
        Command::Search(args) => {
            require_file(&args.consensus, "Consensus FASTA")?;
            if config.external.database.is_none() {
                return Err("--database is required (or [external] database in the config file)".to_string());
            }
        }
        Command::Exclusivity(args) => {
            if let Some(genes) = &args.genes {
                require_file(genes, "Gene list")?;
            }
        }
        Command::Snps(args) => {
            require_dir(&args.alignments, "Alignment directory")?;
            require_file(&args.consensus, "Consensus FASTA")?;
        }
        Command::ExtractPass(args) => {
            require_file(&args.consensus, "Consensus FASTA")?;
            require_file(&args.decisions, "Decision table")?;
        }
        Command::GenerateConfig(_) => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let mut config = Config::default();
        config.presence.min_presence = 1.5;
        let err = validate_config(&config).unwrap_err();
        assert!(err.starts_with("[presence]"));

        let mut config = Config::default();
        config.filter.threshold = -1.0;
        assert!(validate_config(&config).is_err());

        let mut config = Config::default();
        config.consensus.ambiguity_char = 'é';
        assert!(validate_config(&config).is_err());
    }
}
