// pipeline.rs - End-to-end runs over small on-disk fixtures

use cgmarker::core::{classify, filter_candidates, ExclusivityConfig, Verdict};
use cgmarker::data::{HomologyReport, ScoreTable};
use cgmarker::pipeline::{self, PipelineConfig};
use std::fs;
use std::path::Path;

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn alignment_fixture(dir: &Path) {
    write(
        &dir.join("geneA.fasta"),
        ">s1\nACGTACGTAC\n>s2\nACGTACGTAC\n>s3\nACGTACGTAC\n",
    );
    write(
        &dir.join("geneB.fasta"),
        ">s1\nAAAAAAAAAA\n>s2\nCCCCCCCCCC\n>s3\nAAAAAAAAAA\n",
    );
    write(
        &dir.join("geneC.fasta"),
        ">s1\nTTGACC-A\n>s2\nTTGACC-A\n",
    );
}

#[test]
fn filter_then_empty_report_passes_candidates() {
    let table = ScoreTable::from_bytes(
        b"Gene_File,Gene_Name,Average_Identity(%)\ngene1,a,99.5\ngene2,b,97.0\ngene3,c,100.0\n",
        "identity.csv",
    )
    .unwrap();

    let candidates = filter_candidates(&table, 98.0);
    assert_eq!(candidates.genes, vec!["gene1", "gene3"]);

    let decisions = classify(
        &HomologyReport::default(),
        &candidates.genes,
        &ExclusivityConfig::default(),
    );
    assert_eq!(decisions.len(), 2);
    for decision in &decisions {
        assert_eq!(decision.verdict, Verdict::Pass);
        assert_eq!(decision.neighbor(), "unknown");
    }
}

#[test]
fn full_run_without_evidence() {
    let dir = tempfile::tempdir().unwrap();
    let alignments = dir.path().join("alignments");
    alignment_fixture(&alignments);
    let out = dir.path().join("results");

    let config = PipelineConfig {
        alignments: alignments.clone(),
        out_dir: out.clone(),
        ..Default::default()
    };
    let manifest = pipeline::run_pipeline(&config).unwrap();
    assert_eq!(manifest.candidates, 2);
    assert_eq!((manifest.pass, manifest.reject), (2, 0));

    let identity = fs::read_to_string(out.join(pipeline::IDENTITY_FILE)).unwrap();
    assert_eq!(
        identity,
        "Gene_File,Gene_Name,Average_Identity(%)\ngeneA,,100.00\ngeneB,,33.33\ngeneC,,100.00\n"
    );

    let selected = fs::read_to_string(out.join(pipeline::CANDIDATES_FILE)).unwrap();
    assert_eq!(selected, "geneA\ngeneC\n");

    let consensus = fs::read_to_string(out.join(pipeline::CONSENSUS_FILE)).unwrap();
    assert_eq!(
        consensus,
        ">geneA consensus sequence\nACGTACGTAC\n>geneC consensus sequence\nTTGACCNA\n"
    );

    let decisions = fs::read_to_string(out.join(pipeline::DECISIONS_FILE)).unwrap();
    assert_eq!(
        decisions,
        "Gene\tneighbor\tbest_pident\tbest_qcovs\tdecision\n\
         geneA\tunknown\tNA\tNA\tPASS\n\
         geneC\tunknown\tNA\tNA\tPASS\n"
    );

    // the all-gap column of geneC became N in the consensus, so every strain diverges once
    let per_gene = fs::read_to_string(out.join(pipeline::GENE_SNPS_FILE)).unwrap();
    assert_eq!(
        per_gene,
        "Gene\tn_strains\tmean_SNPs\tmax_SNPs\ngeneA\t3\t0.000\t0\ngeneC\t2\t1.000\t1\n"
    );

    assert!(out.join(pipeline::MANIFEST_FILE).exists());
    let manifest_json = fs::read_to_string(out.join(pipeline::MANIFEST_FILE)).unwrap();
    assert!(manifest_json.contains("\"stage\": \"snps\""));
}

#[test]
fn full_run_with_homology_report() {
    let dir = tempfile::tempdir().unwrap();
    let alignments = dir.path().join("alignments");
    alignment_fixture(&alignments);
    let report = dir.path().join("hits.tsv");
    write(
        &report,
        "geneC\tsubj1\t97.5\t8\t0\t0\t1\t8\t1\t8\t0.001\t16.4\t8\t5000\t100\tStreptococcus canis\t1329\tNZ_CP000001.1 Streptococcus canis strain X chromosome, complete genome\n\
         geneC\tsubj2\t90.0\t8\t1\t0\t1\t8\t1\t8\t0.01\t14.0\t8\t5000\t100\tStreptococcus dysgalactiae\t1334\tNZ_CP000002.1 Streptococcus dysgalactiae strain Y chromosome\n\
         geneA\tsubj3\t99.0\t4\t0\t0\t1\t4\t1\t4\t5.0\t8.0\t10\t5000\t40\tStreptococcus canis\t1329\tNZ_CP000001.1 Streptococcus canis strain X chromosome\n",
    );
    let out = dir.path().join("results");

    let mut config = PipelineConfig {
        alignments,
        out_dir: out.clone(),
        homology_report: Some(report),
        ..Default::default()
    };
    config.snps.write_positions = true;

    let manifest = pipeline::run_pipeline(&config).unwrap();
    assert_eq!((manifest.pass, manifest.reject), (1, 1));

    let decisions = fs::read_to_string(out.join(pipeline::DECISIONS_FILE)).unwrap();
    let lines: Vec<&str> = decisions.lines().collect();
    assert_eq!(lines[1], "geneA\tStreptococcus canis\t99\t40\tPASS");
    assert_eq!(lines[2], "geneC\tStreptococcus canis\t97.5\t100\tREJECT");

    let neighbors = fs::read_to_string(out.join(pipeline::NEIGHBORS_FILE)).unwrap();
    assert!(neighbors.contains("geneC\tStreptococcus dysgalactiae\t1\t90\t90.000"));

    let positions = fs::read_to_string(out.join(pipeline::SNP_POSITIONS_FILE)).unwrap();
    assert!(positions.contains("geneC\t7\tN\t2\ts1;s2\t-;-"));
}
