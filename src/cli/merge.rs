// merge.rs - Merge configuration file with CLI arguments

use crate::cli::args::Command;
use crate::cli::Config;
use crate::core::ConsensusConfig;
use crate::pipeline::PipelineConfig;
use std::path::PathBuf;

fn override_consensus(
    consensus: &mut ConsensusConfig,
    gap_char: Option<char>,
    keep_gaps: bool,
    gap_fill: Option<char>,
    ambiguity_char: Option<char>,
    case_insensitive: bool,
) {
    if let Some(c) = gap_char {
        consensus.gap_char = c;
    }
    if keep_gaps {
        consensus.exclude_gaps = false;
    }
    if let Some(c) = gap_fill {
        consensus.gap_fill = c;
    }
    if let Some(c) = ambiguity_char {
        consensus.ambiguity_char = c;
    }
    if case_insensitive {
        consensus.case_insensitive = true;
    }
}

fn override_exclusivity(
    config: &mut Config,
    min_pident: Option<f64>,
    min_qcovs: Option<f64>,
    exclude_neighbors: &[String],
) {
    if let Some(v) = min_pident {
        config.exclusivity.min_pident = v;
    }
    if let Some(v) = min_qcovs {
        config.exclusivity.min_qcovs = v;
    }
    if !exclude_neighbors.is_empty() {
        config.exclusivity.exclude_neighbors = exclude_neighbors.to_vec();
    }
}

impl Config {
    /// Apply the options given on the command line.
    /// CLI arguments take precedence over config file values; switches only
    /// override when set.
    pub fn merge_with_args(&mut self, threads: Option<usize>, command: &Command) {
        if threads.is_some() {
            self.threads = threads;
        }

        match command {
            Command::Run(args) => {
                if let Some(p) = &args.alignments {
                    self.paths.alignments = Some(PathBuf::from(p));
                }
                if let Some(p) = &args.output {
                    self.paths.out_dir = Some(PathBuf::from(p));
                }
                if let Some(p) = &args.report {
                    self.paths.homology_report = Some(PathBuf::from(p));
                }
                if let Some(p) = &args.gene_names {
                    self.identity.gene_names = Some(PathBuf::from(p));
                }
                if args.database.is_some() {
                    self.external.database = args.database.clone();
                }
                if let Some(t) = args.threshold {
                    self.filter.threshold = t;
                }
                override_exclusivity(self, args.min_pident, args.min_qcovs, &args.exclude_neighbor);
                override_consensus(
                    &mut self.consensus,
                    args.gap_char,
                    args.keep_gaps,
                    args.gap_fill,
                    args.ambiguity_char,
                    args.case_insensitive,
                );
                if args.snp_records {
                    self.snps.write_records = true;
                }
                if args.snp_positions {
                    self.snps.write_positions = true;
                }
            }
            Command::CoreSelect(args) => {
                if let Some(v) = args.min_presence {
                    self.presence.min_presence = v;
                }
            }
            Command::Align(args) => {
                if let Some(a) = &args.aligner {
                    self.external.aligner = a.clone();
                }
                if let Some(n) = args.aligner_threads {
                    self.external.aligner_threads = n;
                }
            }
            Command::Identity(args) => {
                if let Some(p) = &args.gene_names {
                    self.identity.gene_names = Some(PathBuf::from(p));
                }
            }
            Command::Filter(args) => {
                if let Some(t) = args.threshold {
                    self.filter.threshold = t;
                }
            }
            Command::Consensus(args) => override_consensus(
                &mut self.consensus,
                args.gap_char,
                args.keep_gaps,
                args.gap_fill,
                args.ambiguity_char,
                args.case_insensitive,
            ),
            Command::Search(args) => {
                if args.database.is_some() {
                    self.external.database = args.database.clone();
                }
                if let Some(p) = &args.program {
                    self.external.search = p.clone();
                }
                if let Some(e) = args.evalue {
                    self.external.evalue = e;
                }
                if let Some(n) = args.max_target_seqs {
                    self.external.max_target_seqs = n;
                }
            }
            Command::Exclusivity(args) => {
                override_exclusivity(self, args.min_pident, args.min_qcovs, &args.exclude_neighbor)
            }
            Command::Snps(_) | Command::ExtractPass(_) | Command::GenerateConfig(_) => {}
        }
    }

    /// Settings of a full `run`; input and output directories are required
    pub fn pipeline_config(&self) -> Result<PipelineConfig, String> {
        let alignments = self
            .paths
            .alignments
            .clone()
            .ok_or("--alignments is required (or [paths] alignments in the config file)")?;
        let out_dir = self
            .paths
            .out_dir
            .clone()
            .ok_or("--output is required (or [paths] out_dir in the config file)")?;

        Ok(PipelineConfig {
            alignments,
            out_dir,
            gene_names: self.identity.gene_names.clone(),
            homology_report: self.paths.homology_report.clone(),
            consensus: self.consensus.clone(),
            filter: self.filter.clone(),
            exclusivity: self.exclusivity.clone(),
            snps: self.snps.clone(),
            external: self.external.clone(),
        })
    }
}
