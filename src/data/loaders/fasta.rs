// fasta.rs - FASTA loaders for per-gene alignments and consensus files

use crate::data::alignment::{Alignment, AlignmentRecord};
use crate::error::{MarkerError, Result};
use bio::io::fasta;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// File extensions recognised as per-gene alignments
pub const ALIGNMENT_EXTENSIONS: &[&str] = &["fasta", "fa", "fas", "aln"];

/// Read every record of a FASTA file
pub fn read_fasta_records(path: &Path) -> Result<Vec<AlignmentRecord>> {
    if !path.exists() {
        return Err(MarkerError::MissingFile(path.to_path_buf()));
    }
    let file = File::open(path).map_err(|e| MarkerError::io(path, e))?;
    let reader = fasta::Reader::new(BufReader::new(file));

    let mut records = Vec::new();
    for record_result in reader.records() {
        let record = record_result.map_err(|e| {
            MarkerError::malformed(path.display().to_string(), format!("invalid FASTA record: {}", e))
        })?;
        records.push(AlignmentRecord::new(record.id(), record.seq().to_vec()));
    }
    Ok(records)
}

/// Load one gene alignment. An empty file is malformed: a record was expected.
pub fn load_alignment(gene: &str, path: &Path) -> Result<Alignment> {
    let records = read_fasta_records(path)?;
    if records.is_empty() {
        return Err(MarkerError::malformed(
            path.display().to_string(),
            "no FASTA records found",
        ));
    }
    Alignment::new(gene, records)
}

/// Gene name of an alignment file (its stem)
pub fn gene_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

/// List alignment files in a directory, keyed and sorted by gene name
pub fn scan_alignment_dir(dir: &Path) -> Result<BTreeMap<String, PathBuf>> {
    if !dir.is_dir() {
        return Err(MarkerError::MissingFile(dir.to_path_buf()));
    }
    let entries = std::fs::read_dir(dir).map_err(|e| MarkerError::io(dir, e))?;

    let mut genes = BTreeMap::new();
    for entry in entries {
        let entry = entry.map_err(|e| MarkerError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();
        if !ALIGNMENT_EXTENSIONS.contains(&extension.as_str()) {
            continue;
        }
        if let Some(gene) = gene_name_from_path(&path) {
            genes.insert(gene, path);
        }
    }
    Ok(genes)
}

/// Resolve the alignment files to process.
///
/// Without an allow-list every alignment in the directory is returned. With
/// one, each listed gene either maps to its file or to a `MissingFile` error so
/// the caller can skip and count it.
pub fn select_alignment_files(
    dir: &Path,
    allow: Option<&BTreeSet<String>>,
) -> Result<Vec<(String, std::result::Result<PathBuf, MarkerError>)>> {
    let available = scan_alignment_dir(dir)?;
    let selected = match allow {
        None => available.into_iter().map(|(g, p)| (g, Ok(p))).collect(),
        Some(allow) => allow
            .iter()
            .map(|gene| match available.get(gene) {
                Some(path) => (gene.clone(), Ok(path.clone())),
                None => (
                    gene.clone(),
                    Err(MarkerError::MissingFile(dir.join(format!("{}.fasta", gene)))),
                ),
            })
            .collect(),
    };
    Ok(selected)
}

/// Load a gene list, one name per line; blank lines and `#` comments ignored
pub fn load_gene_list(path: &Path) -> Result<BTreeSet<String>> {
    let file = File::open(path).map_err(|e| MarkerError::io(path, e))?;
    let reader = BufReader::new(file);
    let mut genes = BTreeSet::new();

    for line in reader.lines() {
        let line = line.map_err(|e| MarkerError::io(path, e))?;
        let trimmed = line.trim();
        if !trimmed.is_empty() && !trimmed.starts_with('#') {
            genes.insert(trimmed.to_string());
        }
    }

    println!("📋 Loaded {} genes from list '{}'", genes.len(), path.display());
    Ok(genes)
}

/// Load a consensus multi-FASTA into gene -> sequence
pub fn load_consensus_fasta(path: &Path) -> Result<BTreeMap<String, Vec<u8>>> {
    let records = read_fasta_records(path)?;
    let mut consensus = BTreeMap::new();
    for record in records {
        if consensus.contains_key(&record.id) {
            return Err(MarkerError::malformed(
                path.display().to_string(),
                format!("duplicate consensus record '{}'", record.id),
            ));
        }
        consensus.insert(record.id, record.sequence);
    }
    println!(
        "🧬 Loaded {} consensus sequences from {}",
        consensus.len(),
        path.display()
    );
    Ok(consensus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_alignment() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "geneA.fasta", ">s1\nACGT\n>s2 extra words\nAC-T\n");
        let aln = load_alignment("geneA", &path).unwrap();
        assert_eq!(aln.len(), 2);
        assert_eq!(aln.records[1].id, "s2");
        assert_eq!(aln.records[1].sequence, b"AC-T".to_vec());
    }

    #[test]
    fn test_empty_file_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "geneA.fasta", "");
        let err = load_alignment("geneA", &path).unwrap_err();
        assert_eq!(err.kind(), "MalformedInput");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_alignment("geneZ", &dir.path().join("geneZ.fasta")).unwrap_err();
        assert_eq!(err.kind(), "MissingFile");
    }

    #[test]
    fn test_scan_and_select_with_allow_list() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "b.fasta", ">s1\nA\n");
        write_file(dir.path(), "a.fa", ">s1\nA\n");
        write_file(dir.path(), "notes.txt", "ignored");

        let all = scan_alignment_dir(dir.path()).unwrap();
        assert_eq!(all.keys().cloned().collect::<Vec<_>>(), vec!["a", "b"]);

        let allow: BTreeSet<String> = ["b".to_string(), "c".to_string()].into_iter().collect();
        let selected = select_alignment_files(dir.path(), Some(&allow)).unwrap();
        assert_eq!(selected.len(), 2);
        assert!(selected[0].1.is_ok());
        assert_eq!(selected[1].0, "c");
        assert!(matches!(selected[1].1, Err(MarkerError::MissingFile(_))));
    }

    #[test]
    fn test_gene_list_skips_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "genes.txt", "geneA\n\n  geneB  \n# comment\n");
        let genes = load_gene_list(&path).unwrap();
        assert_eq!(genes.len(), 2);
        assert!(genes.contains("geneB"));
    }
}
