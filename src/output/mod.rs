// mod.rs - Output writers for consensus FASTA and result tables

use crate::core::exclusivity::{ExclusivityDecision, NeighborSummary};
use crate::core::snps::{GeneSnpSummary, PositionSummary, SnpRecord, StrainDivergence};
use crate::core::{CandidateSet, ConsensusSequence, IdentityScore};
use crate::data::AlignmentRecord;
use crate::error::{MarkerError, Result};
use bio::io::fasta;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub const CONSENSUS_DESCRIPTION: &str = "consensus sequence";

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent).map_err(|e| MarkerError::io(parent, e))?;
        }
    }
    Ok(())
}

fn create_file(file_path: &Path) -> Result<BufWriter<File>> {
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path).map_err(|e| MarkerError::io(file_path, e))?;
    Ok(BufWriter::new(file))
}

fn table_writer(file_path: &Path, delimiter: u8) -> Result<csv::Writer<BufWriter<File>>> {
    Ok(csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(create_file(file_path)?))
}

fn finish_table(mut writer: csv::Writer<BufWriter<File>>, file_path: &Path) -> Result<()> {
    writer.flush().map_err(|e| MarkerError::io(file_path, e))
}

fn as_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn write_fasta_records<'a, I>(file_path: &Path, records: I) -> Result<usize>
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>, &'a [u8])>,
{
    let mut writer = fasta::Writer::new(create_file(file_path)?);
    let mut written = 0;
    for (id, desc, seq) in records {
        writer
            .write(id, desc, seq)
            .map_err(|e| MarkerError::io(file_path, e))?;
        written += 1;
    }
    writer.flush().map_err(|e| MarkerError::io(file_path, e))?;
    Ok(written)
}

/// Write consensus sequences as multi-FASTA; empty consensus sequences are left out
pub fn write_consensus_fasta(file_path: &Path, consensus: &[ConsensusSequence]) -> Result<usize> {
    let written = write_fasta_records(
        file_path,
        consensus
            .iter()
            .filter(|c| !c.sequence.is_empty())
            .map(|c| (c.gene.as_str(), Some(CONSENSUS_DESCRIPTION), c.sequence.as_slice())),
    )?;
    println!("✅ {} consensus sequences written to: {}", written, file_path.display());
    Ok(written)
}

/// Write plain FASTA records (raw cluster sequences for the aligner)
pub fn write_records_fasta(file_path: &Path, records: &[AlignmentRecord]) -> Result<usize> {
    write_fasta_records(
        file_path,
        records
            .iter()
            .map(|r| (r.id.as_str(), None, r.sequence.as_slice())),
    )
}

/// One FASTA file per PASS gene in `out_dir`, named `<gene>.fasta`
pub fn write_pass_consensus(
    out_dir: &Path,
    consensus: &BTreeMap<String, Vec<u8>>,
    pass_genes: &BTreeSet<String>,
) -> Result<usize> {
    create_dir_all(out_dir).map_err(|e| MarkerError::io(out_dir, e))?;
    let mut written = 0;
    for (gene, sequence) in consensus {
        if !pass_genes.contains(gene) {
            continue;
        }
        let path = out_dir.join(format!("{}.fasta", gene));
        write_fasta_records(
            &path,
            [(gene.as_str(), Some(CONSENSUS_DESCRIPTION), sequence.as_slice())],
        )?;
        written += 1;
    }
    println!("✅ {} PASS consensus FASTA files written to: {}", written, out_dir.display());
    Ok(written)
}

/// `Gene_File, Gene_Name, Average_Identity(%)` as CSV
pub fn write_identity_table(file_path: &Path, scores: &[IdentityScore]) -> Result<()> {
    let mut writer = table_writer(file_path, b',')?;
    writer.write_record(["Gene_File", "Gene_Name", "Average_Identity(%)"])?;
    for score in scores {
        let identity = format!("{:.2}", score.identity);
        writer.write_record([
            score.gene_file.as_str(),
            score.gene_name.as_str(),
            identity.as_str(),
        ])?;
    }
    finish_table(writer, file_path)?;
    println!("✅ Identity table ({} genes) written to: {}", scores.len(), file_path.display());
    Ok(())
}

/// Selected genes, one per line
pub fn write_candidate_list(file_path: &Path, candidates: &CandidateSet) -> Result<()> {
    let mut writer = create_file(file_path)?;
    for gene in &candidates.genes {
        writeln!(writer, "{}", gene).map_err(|e| MarkerError::io(file_path, e))?;
    }
    writer.flush().map_err(|e| MarkerError::io(file_path, e))?;
    println!("✅ {} candidate genes written to: {}", candidates.len(), file_path.display());
    Ok(())
}

fn optional_value(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "NA".to_string(),
    }
}

/// `Gene, neighbor, best_pident, best_qcovs, decision` as TSV
pub fn write_decision_table(file_path: &Path, decisions: &[ExclusivityDecision]) -> Result<()> {
    let mut writer = table_writer(file_path, b'\t')?;
    writer.write_record(["Gene", "neighbor", "best_pident", "best_qcovs", "decision"])?;
    for decision in decisions {
        writer.write_record([
            decision.gene.clone(),
            decision.neighbor().to_string(),
            optional_value(decision.evidence.as_ref().map(|e| e.pident)),
            optional_value(decision.evidence.as_ref().map(|e| e.qcovs)),
            decision.verdict.to_string(),
        ])?;
    }
    finish_table(writer, file_path)?;
    println!("✅ Exclusivity decisions written to: {}", file_path.display());
    Ok(())
}

/// `Gene, neighbor, num_hits, best_identity, mean_identity` as TSV
pub fn write_neighbor_summary(file_path: &Path, summaries: &[NeighborSummary]) -> Result<()> {
    let mut writer = table_writer(file_path, b'\t')?;
    writer.write_record(["Gene", "neighbor", "num_hits", "best_identity", "mean_identity"])?;
    for s in summaries {
        writer.write_record([
            s.gene.clone(),
            s.neighbor.clone(),
            s.num_hits.to_string(),
            s.best_identity.to_string(),
            format!("{:.3}", s.mean_identity),
        ])?;
    }
    finish_table(writer, file_path)?;
    println!("✅ Neighbor summary written to: {}", file_path.display());
    Ok(())
}

/// `Gene, StrainID, SNPs, Length, SNP_rate` as TSV
pub fn write_strain_snps(file_path: &Path, strains: &[StrainDivergence]) -> Result<()> {
    let mut writer = table_writer(file_path, b'\t')?;
    writer.write_record(["Gene", "StrainID", "SNPs", "Length", "SNP_rate"])?;
    for s in strains {
        writer.write_record([
            s.gene.clone(),
            s.strain.clone(),
            s.snps.to_string(),
            s.length.to_string(),
            format!("{:.6}", s.snp_rate()),
        ])?;
    }
    finish_table(writer, file_path)?;
    println!("✅ Per-strain SNP table written to: {}", file_path.display());
    Ok(())
}

/// `Gene, n_strains, mean_SNPs, max_SNPs` as TSV
pub fn write_gene_snp_summary(file_path: &Path, summaries: &[GeneSnpSummary]) -> Result<()> {
    let mut writer = table_writer(file_path, b'\t')?;
    writer.write_record(["Gene", "n_strains", "mean_SNPs", "max_SNPs"])?;
    for s in summaries {
        writer.write_record([
            s.gene.clone(),
            s.n_strains.to_string(),
            format!("{:.3}", s.mean_snps),
            s.max_snps.to_string(),
        ])?;
    }
    finish_table(writer, file_path)?;
    println!("✅ Per-gene SNP summary written to: {}", file_path.display());
    Ok(())
}

/// `Gene, Strain, Position, Consensus_Base, Strain_Base` as TSV
pub fn write_snp_records(file_path: &Path, records: &[SnpRecord]) -> Result<()> {
    let mut writer = table_writer(file_path, b'\t')?;
    writer.write_record(["Gene", "Strain", "Position", "Consensus_Base", "Strain_Base"])?;
    for r in records {
        writer.write_record([
            r.gene.clone(),
            r.strain.clone(),
            r.position.to_string(),
            as_text(&[r.consensus_base]),
            as_text(&[r.strain_base]),
        ])?;
    }
    finish_table(writer, file_path)?;
    println!("✅ {} SNP records written to: {}", records.len(), file_path.display());
    Ok(())
}

/// `Gene, Position, Consensus_Base, Num_Differences, Strain_IDs, Strain_Bases` as TSV
pub fn write_position_summary(file_path: &Path, positions: &[PositionSummary]) -> Result<()> {
    let mut writer = table_writer(file_path, b'\t')?;
    writer.write_record([
        "Gene",
        "Position",
        "Consensus_Base",
        "Num_Differences",
        "Strain_IDs",
        "Strain_Bases",
    ])?;
    for p in positions {
        let ids: Vec<&str> = p.strains.iter().map(|(id, _)| id.as_str()).collect();
        let bases: Vec<String> = p.strains.iter().map(|(_, b)| as_text(&[*b])).collect();
        writer.write_record([
            p.gene.clone(),
            p.position.to_string(),
            as_text(&[p.consensus_base]),
            p.strains.len().to_string(),
            ids.join(";"),
            bases.join(";"),
        ])?;
    }
    finish_table(writer, file_path)?;
    println!("✅ Per-position SNP summary written to: {}", file_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::exclusivity::{HitEvidence, Verdict};

    #[test]
    fn test_consensus_fasta_skips_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("consensus.fasta");
        let consensus = vec![
            ConsensusSequence { gene: "geneA".into(), sequence: b"ACGT".to_vec() },
            ConsensusSequence { gene: "geneB".into(), sequence: Vec::new() },
        ];
        assert_eq!(write_consensus_fasta(&path, &consensus).unwrap(), 1);
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, ">geneA consensus sequence\nACGT\n");
    }

    #[test]
    fn test_decision_table_na_for_missing_evidence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exclusivity.tsv");
        let decisions = vec![
            ExclusivityDecision {
                gene: "geneA".into(),
                evidence: Some(HitEvidence {
                    neighbor: "Streptococcus canis".into(),
                    subject_id: "s1".into(),
                    pident: 97.5,
                    qcovs: 100.0,
                    bitscore: 900.0,
                }),
                verdict: Verdict::Reject,
            },
            ExclusivityDecision { gene: "geneB".into(), evidence: None, verdict: Verdict::Pass },
        ];
        write_decision_table(&path, &decisions).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "Gene\tneighbor\tbest_pident\tbest_qcovs\tdecision");
        assert_eq!(lines[1], "geneA\tStreptococcus canis\t97.5\t100\tREJECT");
        assert_eq!(lines[2], "geneB\tunknown\tNA\tNA\tPASS");
    }

    #[test]
    fn test_identity_table_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("identity.csv");
        let scores = vec![IdentityScore {
            gene_file: "group_1".into(),
            gene_name: "dnaA".into(),
            identity: 99.456,
        }];
        write_identity_table(&path, &scores).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Gene_File,Gene_Name,Average_Identity(%)\ngroup_1,dnaA,99.46\n");
    }

    #[test]
    fn test_strain_snp_table_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snps.tsv");
        let strains = vec![StrainDivergence {
            gene: "g".into(),
            strain: "s1".into(),
            snps: 1,
            length: 3,
        }];
        write_strain_snps(&path, &strains).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.ends_with("g\ts1\t1\t3\t0.333333\n"));
    }
}
