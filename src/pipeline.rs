// pipeline.rs - Stage drivers: load inputs, run the core transforms, write outputs

use crate::core::exclusivity::verdict_counts;
use crate::core::{
    build_consensus_batch, classify, filter_candidates, map_snps, score_alignments,
    summarize_neighbors, CandidateSet, ConsensusConfig, ConsensusSequence, ExclusivityConfig,
    ExclusivityDecision, FilterConfig, GeneSnpResult, IdentityScore,
};
use crate::data::loaders::fasta::scan_alignment_dir;
use crate::data::loaders::{
    load_alignment, load_consensus_fasta, load_decisions, load_gene_name_map, read_fasta_records,
    select_alignment_files,
};
use crate::data::presence::group_cds_by_cluster;
use crate::data::{Alignment, HomologyReport, PresenceConfig, PresenceMatrix, ScoreTable};
use crate::error::{BatchReport, MarkerError, Result};
use crate::external::{ExternalConfig, ExternalTool};
use crate::output;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub const IDENTITY_FILE: &str = "core_gene_identity.csv";
pub const CANDIDATES_FILE: &str = "selected_core_genes.txt";
pub const CONSENSUS_FILE: &str = "consensus.fasta";
pub const HITS_FILE: &str = "exclusivity_hits.tsv";
pub const DECISIONS_FILE: &str = "exclusivity_summary.tsv";
pub const NEIGHBORS_FILE: &str = "exclusivity_neighbors.tsv";
pub const STRAIN_SNPS_FILE: &str = "snps_per_strain.tsv";
pub const GENE_SNPS_FILE: &str = "snps_per_gene.tsv";
pub const SNP_RECORDS_FILE: &str = "snps_detailed.tsv";
pub const SNP_POSITIONS_FILE: &str = "snps_per_position.tsv";
pub const MANIFEST_FILE: &str = "run_manifest.json";

fn progress_bar(len: usize, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb.set_message(label.to_string());
    pb
}

/// Load the selected alignments in parallel. Genes that fail to load are
/// recorded in `report` and left out.
pub fn load_alignments(
    dir: &Path,
    allow: Option<&BTreeSet<String>>,
    report: &mut BatchReport,
) -> Result<Vec<Alignment>> {
    let selected = select_alignment_files(dir, allow)?;
    println!(
        "📊 Loading {} gene alignments from {}",
        selected.len(),
        dir.display()
    );

    let pb = progress_bar(selected.len(), "loading alignments");
    let loaded: Vec<(String, Result<Alignment>)> = selected
        .into_par_iter()
        .map(|(gene, path)| {
            let result = path.and_then(|p| load_alignment(&gene, &p));
            pb.inc(1);
            (gene, result)
        })
        .collect();
    pb.finish_and_clear();

    let mut alignments = Vec::with_capacity(loaded.len());
    for (gene, result) in loaded {
        report.processed += 1;
        match result {
            Ok(alignment) => alignments.push(alignment),
            Err(e) => report.skip(&gene, &e),
        }
    }
    Ok(alignments)
}

/// Consensus FASTA for the selected genes
pub fn run_consensus(
    alignments_dir: &Path,
    allow: Option<&BTreeSet<String>>,
    output_path: &Path,
    config: &ConsensusConfig,
) -> Result<(BatchReport, Vec<ConsensusSequence>)> {
    let mut report = BatchReport::new("consensus");
    let alignments = load_alignments(alignments_dir, allow, &mut report)?;

    println!("🧬 Building consensus for {} genes", alignments.len());
    let consensus = build_consensus_batch(&alignments, config);
    for c in consensus.iter().filter(|c| c.sequence.is_empty()) {
        report.skip(&c.gene, &MarkerError::malformed(&c.gene, "empty consensus"));
    }

    report.written = output::write_consensus_fasta(output_path, &consensus)?;
    report.print_summary();
    Ok((report, consensus))
}

/// Average pairwise identity table
pub fn run_identity(
    alignments_dir: &Path,
    allow: Option<&BTreeSet<String>>,
    gene_names: &BTreeMap<String, String>,
    output_path: &Path,
) -> Result<(BatchReport, Vec<IdentityScore>)> {
    let mut report = BatchReport::new("identity");
    let alignments = load_alignments(alignments_dir, allow, &mut report)?;

    println!("🧬 Scoring pairwise identity for {} genes", alignments.len());
    let start = Instant::now();
    let scores = score_alignments(&alignments, gene_names);
    println!("   Scored in {:.2}s", start.elapsed().as_secs_f64());

    output::write_identity_table(output_path, &scores)?;
    report.written = scores.len();
    report.print_summary();
    Ok((report, scores))
}

/// Candidate list from an identity table
pub fn run_filter(
    scores_path: &Path,
    config: &FilterConfig,
    output_path: &Path,
) -> Result<(BatchReport, CandidateSet)> {
    let mut report = BatchReport::new("filter");
    let table = ScoreTable::from_file(scores_path)?;
    let candidates = filter_candidates(&table, config.threshold);

    report.processed = table.len();
    report.skip_rows("identity table", table.malformed_rows);
    for entry in table.entries.iter().filter(|e| e.identity.is_none()) {
        report.skip(
            &entry.gene_file,
            &MarkerError::malformed(scores_path.display().to_string(), "identity is not a number"),
        );
    }
    println!(
        "📋 Selected {} genes with identity ≥ {}% ({} below threshold, {} unparseable)",
        candidates.len(),
        config.threshold,
        candidates.below_threshold,
        candidates.unparseable
    );
    if candidates.duplicates > 0 {
        eprintln!(
            "⚠️  {} repeated rows in {} were ignored",
            candidates.duplicates,
            scores_path.display()
        );
    }

    output::write_candidate_list(output_path, &candidates)?;
    report.written = candidates.len();
    report.print_summary();
    Ok((report, candidates))
}

/// Search the consensus sequences once, as a single batch
pub fn run_search(consensus_path: &Path, report_path: &Path, search: &dyn ExternalTool) -> Result<()> {
    println!(
        "🔎 Running {} on {}",
        search.name(),
        consensus_path.display()
    );
    let start = Instant::now();
    search.run("consensus batch", consensus_path, report_path)?;
    println!(
        "✅ Homology report written to: {} ({:.1}s)",
        report_path.display(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

/// PASS/REJECT decisions for `genes` plus every gene in the report
pub fn run_exclusivity(
    homology: &HomologyReport,
    genes: &[String],
    config: &ExclusivityConfig,
    decisions_path: &Path,
    neighbors_path: Option<&Path>,
) -> Result<(BatchReport, Vec<ExclusivityDecision>)> {
    let mut report = BatchReport::new("exclusivity");
    if homology.is_empty() {
        println!("📭 No homology hits: every gene passes");
    }
    report.skip_rows("homology report", homology.malformed_rows);

    let decisions = classify(homology, genes, config);
    let without_hits = decisions.iter().filter(|d| d.evidence.is_none()).count();
    let (pass, reject) = verdict_counts(&decisions);
    report.processed = decisions.len();
    println!(
        "📋 Exclusivity: {} PASS, {} REJECT ({} genes without competing hits)",
        pass, reject, without_hits
    );

    output::write_decision_table(decisions_path, &decisions)?;
    report.written = decisions.len();
    if let Some(path) = neighbors_path {
        let summaries = summarize_neighbors(homology, config);
        output::write_neighbor_summary(path, &summaries)?;
    }
    report.print_summary();
    Ok((report, decisions))
}

/// Output files of the SNP stage; the detailed tables are optional
#[derive(Debug, Clone)]
pub struct SnpOutputs {
    pub per_strain: PathBuf,
    pub per_gene: PathBuf,
    pub records: Option<PathBuf>,
    pub positions: Option<PathBuf>,
}

impl SnpOutputs {
    /// Fixed file names inside `dir`
    pub fn in_dir(dir: &Path, config: &SnpConfig) -> Self {
        Self {
            per_strain: dir.join(STRAIN_SNPS_FILE),
            per_gene: dir.join(GENE_SNPS_FILE),
            records: config.write_records.then(|| dir.join(SNP_RECORDS_FILE)),
            positions: config.write_positions.then(|| dir.join(SNP_POSITIONS_FILE)),
        }
    }
}

/// Which optional SNP tables `run` writes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnpConfig {
    pub write_records: bool,
    pub write_positions: bool,
}

/// Divergence of every strain from its gene consensus
pub fn run_snps(
    alignments_dir: &Path,
    consensus_path: &Path,
    allow: Option<&BTreeSet<String>>,
    outputs: &SnpOutputs,
) -> Result<BatchReport> {
    let consensus = load_consensus_fasta(consensus_path)?;
    let mut report = BatchReport::new("snps");
    let alignments = load_alignments(alignments_dir, allow, &mut report)?;

    let mut paired: Vec<(&Alignment, &[u8])> = Vec::with_capacity(alignments.len());
    for alignment in &alignments {
        match consensus.get(&alignment.gene) {
            Some(seq) => paired.push((alignment, seq.as_slice())),
            None => report.skip(
                &alignment.gene,
                &MarkerError::malformed(
                    consensus_path.display().to_string(),
                    format!("no consensus sequence for {}", alignment.gene),
                ),
            ),
        }
    }

    println!("🧬 Mapping SNPs for {} genes", paired.len());
    let pb = progress_bar(paired.len(), "mapping SNPs");
    let mut results: Vec<(GeneSnpResult, &[u8])> = paired
        .par_iter()
        .map(|(alignment, seq)| {
            let result = map_snps(alignment, seq);
            pb.inc(1);
            (result, *seq)
        })
        .collect();
    pb.finish_and_clear();
    results.sort_by(|a, b| a.0.gene.cmp(&b.0.gene));

    let mut strains = Vec::new();
    let mut summaries = Vec::new();
    let mut records = Vec::new();
    let mut positions = Vec::new();
    for (result, seq) in &mut results {
        for (strain, err) in std::mem::take(&mut result.skipped) {
            report.skip(&format!("{}/{}", result.gene, strain), &err);
        }
        match result.summary() {
            Some(summary) => {
                summaries.push(summary);
                report.written += 1;
            }
            None => eprintln!("⚠️  {}: no strain matches the consensus length", result.gene),
        }
        if outputs.positions.is_some() {
            positions.extend(result.by_position(*seq));
        }
        strains.append(&mut result.strains);
        if outputs.records.is_some() {
            records.append(&mut result.records);
        }
    }

    output::write_strain_snps(&outputs.per_strain, &strains)?;
    output::write_gene_snp_summary(&outputs.per_gene, &summaries)?;
    if let Some(path) = &outputs.records {
        output::write_snp_records(path, &records)?;
    }
    if let Some(path) = &outputs.positions {
        output::write_position_summary(path, &positions)?;
    }
    report.print_summary();
    Ok(report)
}

/// Raw per-cluster FASTA files for every core cluster with at least two sequences
pub fn run_core_select(
    presence_path: &Path,
    cds_path: &Path,
    out_dir: &Path,
    config: &PresenceConfig,
) -> Result<BatchReport> {
    let mut report = BatchReport::new("core-select");
    let matrix = PresenceMatrix::from_file(presence_path)?;
    report.skip_rows("presence matrix", matrix.malformed_rows);
    let core = matrix.core_clusters(config.min_presence);
    println!(
        "🧬 {} core clusters present in ≥ {:.1}% of {} samples",
        core.len(),
        config.min_presence * 100.0,
        matrix.n_samples()
    );

    let records = read_fasta_records(cds_path)?;
    println!("📊 {} CDS records loaded from {}", records.len(), cds_path.display());
    let mut by_cluster = group_cds_by_cluster(records);

    for cluster in core {
        report.processed += 1;
        match by_cluster.remove(&cluster) {
            Some(records) if records.len() >= 2 => {
                let path = out_dir.join(format!("{}.fasta", cluster));
                output::write_records_fasta(&path, &records)?;
                report.written += 1;
            }
            Some(records) => report.skip(
                &cluster,
                &MarkerError::malformed(
                    cds_path.display().to_string(),
                    format!("only {} sequence(s), at least 2 needed", records.len()),
                ),
            ),
            None => report.skip(
                &cluster,
                &MarkerError::malformed(cds_path.display().to_string(), "no CDS records for cluster"),
            ),
        }
    }

    report.print_summary();
    Ok(report)
}

/// Align every raw cluster FASTA in `raw_dir` into `out_dir`. A failing gene
/// is skipped; the raw input is removed after a successful alignment.
pub fn run_align(raw_dir: &Path, out_dir: &Path, aligner: &dyn ExternalTool) -> Result<BatchReport> {
    let mut report = BatchReport::new("align");
    let inputs = scan_alignment_dir(raw_dir)?;
    println!(
        "🧬 Aligning {} clusters with {}",
        inputs.len(),
        aligner.description()
    );

    let pb = progress_bar(inputs.len(), aligner.name());
    for (gene, input) in &inputs {
        report.processed += 1;
        let output = out_dir.join(format!("{}.fasta", gene));
        match aligner.run(gene, input, &output) {
            Ok(()) => {
                report.written += 1;
                if *input != output {
                    if let Err(e) = std::fs::remove_file(input) {
                        eprintln!("⚠️  Could not remove {}: {}", input.display(), e);
                    }
                }
            }
            Err(e) => pb.suspend(|| report.skip(gene, &e)),
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    report.print_summary();
    Ok(report)
}

/// One consensus FASTA per PASS gene
pub fn run_extract_pass(
    consensus_path: &Path,
    decisions_path: &Path,
    out_dir: &Path,
) -> Result<BatchReport> {
    let mut report = BatchReport::new("extract-pass");
    let consensus = load_consensus_fasta(consensus_path)?;
    let decisions = load_decisions(decisions_path)?;
    report.skip_rows("decision table", decisions.malformed_rows);

    let pass: BTreeSet<String> = decisions.passing().cloned().collect();
    println!(
        "📋 {} of {} genes passed exclusivity",
        pass.len(),
        decisions.len()
    );

    report.processed = pass.len();
    for gene in pass.iter().filter(|g| !consensus.contains_key(*g)) {
        report.skip(
            gene,
            &MarkerError::malformed(
                consensus_path.display().to_string(),
                format!("no consensus record for {}", gene),
            ),
        );
    }
    report.written = output::write_pass_consensus(out_dir, &consensus, &pass)?;
    report.print_summary();
    Ok(report)
}

/// Effective settings of a full `run`
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineConfig {
    pub alignments: PathBuf,
    pub out_dir: PathBuf,
    /// Cluster -> display name source (presence matrix or two-column table)
    pub gene_names: Option<PathBuf>,
    /// Precomputed homology report; otherwise the search runs when a database is set
    pub homology_report: Option<PathBuf>,
    pub consensus: ConsensusConfig,
    pub filter: FilterConfig,
    pub exclusivity: ExclusivityConfig,
    pub snps: SnpConfig,
    pub external: ExternalConfig,
}

/// Record of a completed `run`, written as JSON next to the outputs
#[derive(Debug, Serialize)]
pub struct RunManifest {
    pub version: String,
    pub started: String,
    pub finished: String,
    pub config: PipelineConfig,
    pub candidates: usize,
    pub pass: usize,
    pub reject: usize,
    pub stages: Vec<BatchReport>,
}

/// identity → filter → consensus → search → exclusivity → SNPs
pub fn run_pipeline(config: &PipelineConfig) -> Result<RunManifest> {
    let started = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    let out = config.out_dir.as_path();
    std::fs::create_dir_all(out).map_err(|e| MarkerError::io(out, e))?;

    let gene_names = match &config.gene_names {
        Some(path) => load_gene_name_map(path)?,
        None => BTreeMap::new(),
    };

    let identity_path = out.join(IDENTITY_FILE);
    let (identity_report, _) = run_identity(&config.alignments, None, &gene_names, &identity_path)?;

    let (filter_report, candidates) =
        run_filter(&identity_path, &config.filter, &out.join(CANDIDATES_FILE))?;
    let allow: BTreeSet<String> = candidates.genes.iter().cloned().collect();

    let consensus_path = out.join(CONSENSUS_FILE);
    let (consensus_report, consensus) =
        run_consensus(&config.alignments, Some(&allow), &consensus_path, &config.consensus)?;
    let with_consensus: Vec<String> = consensus
        .iter()
        .filter(|c| !c.sequence.is_empty())
        .map(|c| c.gene.clone())
        .collect();

    let homology = match (&config.homology_report, config.external.search()) {
        (Some(path), _) => HomologyReport::from_file(path)?,
        (None, Some(search)) => {
            let hits_path = out.join(HITS_FILE);
            run_search(&consensus_path, &hits_path, &search)?;
            HomologyReport::from_file(&hits_path)?
        }
        (None, None) => {
            eprintln!("⚠️  No homology report or search database configured: no competing evidence");
            HomologyReport::default()
        }
    };

    let (exclusivity_report, decisions) = run_exclusivity(
        &homology,
        &with_consensus,
        &config.exclusivity,
        &out.join(DECISIONS_FILE),
        Some(out.join(NEIGHBORS_FILE).as_path()),
    )?;
    let (pass, reject) = verdict_counts(&decisions);

    let snps_report = run_snps(
        &config.alignments,
        &consensus_path,
        Some(&allow),
        &SnpOutputs::in_dir(out, &config.snps),
    )?;

    let manifest = RunManifest {
        version: crate::VERSION.to_string(),
        started,
        finished: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        config: config.clone(),
        candidates: candidates.len(),
        pass,
        reject,
        stages: vec![
            identity_report,
            filter_report,
            consensus_report,
            exclusivity_report,
            snps_report,
        ],
    };

    let manifest_path = out.join(MANIFEST_FILE);
    let json = serde_json::to_string_pretty(&manifest)
        .map_err(|e| MarkerError::Config(format!("could not serialize run manifest: {}", e)))?;
    std::fs::write(&manifest_path, json).map_err(|e| MarkerError::io(&manifest_path, e))?;
    println!("📋 Run manifest written to: {}", manifest_path.display());

    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_alignments_skips_bad_genes() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "geneA.fasta", ">s1\nACGT\n>s2\nACGA\n");
        write(dir.path(), "geneB.fasta", ">s1\nACGT\n>s2\nAC\n");
        write(dir.path(), "geneC.fasta", "");

        let mut report = BatchReport::new("test");
        let alignments = load_alignments(dir.path(), None, &mut report).unwrap();
        assert_eq!(alignments.len(), 1);
        assert_eq!(alignments[0].gene, "geneA");
        assert_eq!(report.processed, 3);
        assert_eq!(report.skip_reasons().get("MalformedInput"), Some(&2));
    }

    #[test]
    fn test_allow_list_reports_missing_genes() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "geneA.fasta", ">s1\nACGT\n");
        let allow: BTreeSet<String> = ["geneA", "geneZ"].iter().map(|s| s.to_string()).collect();

        let mut report = BatchReport::new("test");
        let alignments = load_alignments(dir.path(), Some(&allow), &mut report).unwrap();
        assert_eq!(alignments.len(), 1);
        assert_eq!(report.skip_reasons().get("MissingFile"), Some(&1));
    }

    #[test]
    fn test_core_select_skips_small_clusters() {
        let dir = tempfile::tempdir().unwrap();
        let presence = write(
            dir.path(),
            "gene_presence_absence.csv",
            "Gene,Non-unique Gene name,Annotation,s1,s2\n\
             group_1,dnaA,x,a,b\n\
             group_2,,x,a,b\n\
             group_3,,x,a,\n",
        );
        let cds = write(
            dir.path(),
            "cds.fasta",
            ">group_1|s1\nACGT\n>group_1|s2\nACGA\n>group_2|s1\nACGT\n>group_3|s1\nA\n",
        );
        let out = dir.path().join("raw");

        let report = run_core_select(&presence, &cds, &out, &PresenceConfig::default()).unwrap();
        assert_eq!(report.processed, 2);
        assert_eq!(report.written, 1);
        assert_eq!(report.skipped_count(), 1);
        assert!(out.join("group_1.fasta").exists());
        assert!(!out.join("group_3.fasta").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_align_failure_is_isolated_per_gene() {
        use crate::external::MafftAligner;

        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("raw");
        fs::create_dir_all(&raw).unwrap();
        write(&raw, "group_1.fasta", ">s1\nACGT\n");
        write(&raw, "group_2.fasta", ">s1\nACGT\n");

        let report = run_align(&raw, &dir.path().join("aligned"), &MafftAligner::new("false", 1)).unwrap();
        assert_eq!(report.processed, 2);
        assert_eq!(report.written, 0);
        assert_eq!(report.skip_reasons().get("ExternalToolFailure"), Some(&2));
        assert!(raw.join("group_1.fasta").exists());
    }

    #[test]
    fn test_snps_skip_genes_without_consensus() {
        let dir = tempfile::tempdir().unwrap();
        let alns = dir.path().join("alns");
        fs::create_dir_all(&alns).unwrap();
        write(&alns, "geneA.fasta", ">s1\nACGT\n>s2\nACGA\n");
        write(&alns, "geneB.fasta", ">s1\nACGT\n");
        let consensus = write(dir.path(), "consensus.fasta", ">geneA consensus sequence\nACGT\n");

        let outputs = SnpOutputs {
            per_strain: dir.path().join("strain.tsv"),
            per_gene: dir.path().join("gene.tsv"),
            records: Some(dir.path().join("records.tsv")),
            positions: None,
        };
        let report = run_snps(&alns, &consensus, None, &outputs).unwrap();
        assert_eq!(report.written, 1);
        assert_eq!(report.skipped_count(), 1);

        let per_gene = fs::read_to_string(&outputs.per_gene).unwrap();
        assert_eq!(per_gene, "Gene\tn_strains\tmean_SNPs\tmax_SNPs\ngeneA\t2\t0.500\t1\n");
        let records = fs::read_to_string(outputs.records.as_ref().unwrap()).unwrap();
        assert!(records.contains("geneA\ts2\t4\tT\tA"));
    }

    #[test]
    fn test_extract_pass_writes_only_pass_genes() {
        let dir = tempfile::tempdir().unwrap();
        let consensus = write(
            dir.path(),
            "consensus.fasta",
            ">geneA consensus sequence\nACGT\n>geneB consensus sequence\nTTTT\n",
        );
        let decisions = write(
            dir.path(),
            "summary.tsv",
            "Gene\tneighbor\tbest_pident\tbest_qcovs\tdecision\n\
             geneA\tunknown\tNA\tNA\tPASS\n\
             geneB\tStreptococcus canis\t99\t100\tREJECT\n\
             geneC\tunknown\tNA\tNA\tPASS\n",
        );
        let out = dir.path().join("pass");

        let report = run_extract_pass(&consensus, &decisions, &out).unwrap();
        assert_eq!(report.processed, 2);
        assert_eq!(report.written, 1);
        assert_eq!(report.skipped_count(), 1);
        assert!(out.join("geneA.fasta").exists());
        assert!(!out.join("geneB.fasta").exists());
    }

    #[test]
    fn test_extract_pass_survives_bad_decision_row() {
        let dir = tempfile::tempdir().unwrap();
        let consensus = write(
            dir.path(),
            "consensus.fasta",
            ">geneA consensus sequence\nACGT\n>geneB consensus sequence\nTTTT\n",
        );
        let decisions = write(
            dir.path(),
            "summary.tsv",
            "Gene\tneighbor\tbest_pident\tbest_qcovs\tdecision\n\
             geneA\tunknown\tNA\tNA\tPASS\n\
             geneB\tunknown\tNA\tNA\t\n",
        );
        let out = dir.path().join("pass");

        let report = run_extract_pass(&consensus, &decisions, &out).unwrap();
        assert_eq!(report.written, 1);
        assert_eq!(report.skip_reasons().get("MalformedInput"), Some(&1));
        assert!(out.join("geneA.fasta").exists());
        assert!(!out.join("geneB.fasta").exists());
    }
}
