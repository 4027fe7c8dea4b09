// main.rs - CLI entry point

use cgmarker::cli::args::{
    AlignArgs, ConsensusArgs, CoreSelectArgs, ExclusivityArgs, ExtractPassArgs,
    GenerateConfigArgs, IdentityArgs, SearchArgs, SnpsArgs,
};
use cgmarker::cli::{validate_command, validate_config, Args, Command, Config};
use cgmarker::data::loaders::{load_gene_list, load_gene_name_map};
use cgmarker::data::HomologyReport;
use cgmarker::pipeline::{self, SnpOutputs};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::time::Instant;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), String> {
    let args: Args = argh::from_env();

    // Handle generate config first
    if let Command::GenerateConfig(sample_args) = &args.command {
        return generate_config(sample_args);
    }

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    config.merge_with_args(args.threads, &args.command);
    validate_config(&config)?;
    validate_command(&args.command, &config)?;

    println!("🚀 {}", cgmarker::get_info());
    println!("🔧 Command: {}", args.command.name());

    // Configure thread pool
    if let Some(n) = config.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
        println!("🧵 Threads: {}", n);
    } else {
        println!("🧵 Threads: {} (auto-detected)", rayon::current_num_threads());
    }

    let total_start = Instant::now();
    match &args.command {
        Command::Run(_) => {
            let pipeline_config = config.pipeline_config()?;
            let manifest = pipeline::run_pipeline(&pipeline_config).map_err(|e| e.to_string())?;
            println!(
                "🎯 {} candidates, {} PASS, {} REJECT",
                manifest.candidates, manifest.pass, manifest.reject
            );
        }
        Command::CoreSelect(a) => run_core_select(a, &config)?,
        Command::Align(a) => run_align(a, &config)?,
        Command::Identity(a) => run_identity(a, &config)?,
        Command::Filter(a) => {
            pipeline::run_filter(Path::new(&a.scores), &config.filter, Path::new(&a.output))
                .map_err(|e| e.to_string())?;
        }
        Command::Consensus(a) => run_consensus(a, &config)?,
        Command::Search(a) => run_search(a, &config)?,
        Command::Exclusivity(a) => run_exclusivity(a, &config)?,
        Command::Snps(a) => run_snps(a)?,
        Command::ExtractPass(a) => run_extract_pass(a)?,
        Command::GenerateConfig(_) => {}
    }

    println!(
        "⏱️  Total time: {:.2}s",
        total_start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn generate_config(args: &GenerateConfigArgs) -> Result<(), String> {
    let sample = Config::generate_sample();
    match &args.output {
        Some(path) => {
            std::fs::write(path, &sample)
                .map_err(|e| format!("Failed to write config file '{}': {}", path, e))?;
            println!("📄 Sample configuration written to: {}", path);
        }
        None => {
            println!("{}", sample);
            println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        }
    }
    Ok(())
}

fn gene_allow_list(path: &Option<String>) -> Result<Option<BTreeSet<String>>, String> {
    match path {
        Some(p) => Ok(Some(load_gene_list(Path::new(p)).map_err(|e| e.to_string())?)),
        None => Ok(None),
    }
}

fn run_core_select(args: &CoreSelectArgs, config: &Config) -> Result<(), String> {
    pipeline::run_core_select(
        Path::new(&args.presence),
        Path::new(&args.cds),
        Path::new(&args.output),
        &config.presence,
    )
    .map_err(|e| e.to_string())?;
    Ok(())
}

fn run_align(args: &AlignArgs, config: &Config) -> Result<(), String> {
    let aligner = config.external.aligner();
    pipeline::run_align(Path::new(&args.input), Path::new(&args.output), &aligner)
        .map_err(|e| e.to_string())?;
    Ok(())
}

fn run_identity(args: &IdentityArgs, config: &Config) -> Result<(), String> {
    let gene_names = match &config.identity.gene_names {
        Some(path) => load_gene_name_map(path).map_err(|e| e.to_string())?,
        None => BTreeMap::new(),
    };
    let allow = gene_allow_list(&args.genes)?;
    pipeline::run_identity(
        Path::new(&args.alignments),
        allow.as_ref(),
        &gene_names,
        Path::new(&args.output),
    )
    .map_err(|e| e.to_string())?;
    Ok(())
}

fn run_consensus(args: &ConsensusArgs, config: &Config) -> Result<(), String> {
    let allow = gene_allow_list(&args.genes)?;
    pipeline::run_consensus(
        Path::new(&args.alignments),
        allow.as_ref(),
        Path::new(&args.output),
        &config.consensus,
    )
    .map_err(|e| e.to_string())?;
    Ok(())
}

fn run_search(args: &SearchArgs, config: &Config) -> Result<(), String> {
    let search = config
        .external
        .search()
        .ok_or("--database is required (or [external] database in the config file)")?;
    pipeline::run_search(Path::new(&args.consensus), Path::new(&args.output), &search)
        .map_err(|e| e.to_string())
}

fn run_exclusivity(args: &ExclusivityArgs, config: &Config) -> Result<(), String> {
    let homology = HomologyReport::from_file(Path::new(&args.report)).map_err(|e| e.to_string())?;
    let genes: Vec<String> = gene_allow_list(&args.genes)?
        .map(|set| set.into_iter().collect())
        .unwrap_or_default();
    let neighbors = args.neighbors.as_ref().map(PathBuf::from);

    pipeline::run_exclusivity(
        &homology,
        &genes,
        &config.exclusivity,
        Path::new(&args.output),
        neighbors.as_deref(),
    )
    .map_err(|e| e.to_string())?;
    Ok(())
}

fn run_snps(args: &SnpsArgs) -> Result<(), String> {
    let allow = gene_allow_list(&args.genes)?;
    let outputs = SnpOutputs {
        per_strain: PathBuf::from(&args.per_strain),
        per_gene: PathBuf::from(&args.per_gene),
        records: args.records.as_ref().map(PathBuf::from),
        positions: args.positions.as_ref().map(PathBuf::from),
    };
    pipeline::run_snps(
        Path::new(&args.alignments),
        Path::new(&args.consensus),
        allow.as_ref(),
        &outputs,
    )
    .map_err(|e| e.to_string())?;
    Ok(())
}

fn run_extract_pass(args: &ExtractPassArgs) -> Result<(), String> {
    pipeline::run_extract_pass(
        Path::new(&args.consensus),
        Path::new(&args.decisions),
        Path::new(&args.output),
    )
    .map_err(|e| e.to_string())?;
    Ok(())
}
