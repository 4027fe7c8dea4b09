// presence.rs - Loader for Panaroo-style gene_presence_absence.csv

use crate::data::loaders::table::DelimitedTable;
use crate::data::presence::{PresenceMatrix, PresenceRow};
use crate::error::{MarkerError, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Known metadata columns of Panaroo and Roary matrices; samples follow the last one
const METADATA_COLUMNS: &[&str] = &[
    "Gene",
    "Non-unique Gene name",
    "Annotation",
    "No. isolates",
    "No. sequences",
    "Avg sequences per isolate",
    "Genome Fragment",
    "Order within Fragment",
    "Accessory Fragment",
    "Accessory Order with Fragment",
    "QC",
    "Min group size nuc",
    "Max group size nuc",
    "Avg group size nuc",
];
/// Sample columns start here when no anchor column is found
const DEFAULT_METADATA_COLUMNS: usize = 3;

/// Locate sample columns in the header. Zero sample columns is an error rather
/// than an empty selection.
pub fn detect_sample_columns(headers: &[String], source_name: &str) -> Result<usize> {
    let start = headers
        .iter()
        .rposition(|h| METADATA_COLUMNS.contains(&h.as_str()))
        .filter(|&i| i > 0)
        .map(|i| i + 1)
        .unwrap_or(DEFAULT_METADATA_COLUMNS);

    if start >= headers.len() {
        return Err(MarkerError::malformed(
            source_name,
            format!(
                "could not detect sample columns ({} header columns, samples expected from column {})",
                headers.len(),
                start + 1
            ),
        ));
    }
    Ok(start)
}

impl PresenceMatrix {
    pub fn from_file(path: &Path) -> Result<Self> {
        let table = DelimitedTable::from_file(path)?;
        let matrix = Self::from_table(&table, &path.display().to_string())?;
        println!(
            "📊 Presence/absence matrix loaded: {} clusters × {} samples ({} malformed rows)",
            matrix.rows.len(),
            matrix.n_samples(),
            matrix.malformed_rows
        );
        Ok(matrix)
    }

    pub fn from_bytes(content: &[u8], source_name: &str) -> Result<Self> {
        Self::from_table(&DelimitedTable::from_bytes(content, source_name)?, source_name)
    }

    pub fn from_table(table: &DelimitedTable, source_name: &str) -> Result<Self> {
        let headers = &table.headers;
        let sample_start = detect_sample_columns(headers, source_name)?;
        let cluster_idx = table.column("Gene").unwrap_or(0);
        let name_idx = table.column("Non-unique Gene name");

        let mut rows = Vec::new();
        for record in &table.rows {
            let cluster = record.get(cluster_idx).unwrap_or("").to_string();
            if cluster.is_empty() {
                continue;
            }
            let present = (sample_start..headers.len())
                .filter(|&i| {
                    let cell = record.get(i).unwrap_or("");
                    !cell.is_empty() && cell != "nan"
                })
                .count();
            let gene_name = name_idx
                .and_then(|i| record.get(i))
                .filter(|s| !s.is_empty())
                .unwrap_or(&cluster)
                .to_string();

            rows.push(PresenceRow {
                cluster,
                gene_name,
                present,
            });
        }

        Ok(PresenceMatrix {
            sample_columns: headers[sample_start..].to_vec(),
            rows,
            malformed_rows: table.malformed_rows,
        })
    }
}

/// Cluster -> display name mapping, read either from a presence/absence matrix
/// or from a two-column table (`cluster, name`) with a header row
pub fn load_gene_name_map(path: &Path) -> Result<BTreeMap<String, String>> {
    let table = DelimitedTable::from_file(path)?;
    let names = if table.headers.len() > 2 {
        PresenceMatrix::from_table(&table, &path.display().to_string())?.gene_names()
    } else {
        table
            .rows
            .iter()
            .filter_map(|record| {
                let cluster = record.get(0).filter(|c| !c.is_empty())?;
                Some((cluster.to_string(), record.get(1).unwrap_or("").to_string()))
            })
            .collect()
    };
    println!(
        "📋 Loaded {} gene names from {} ({} malformed rows)",
        names.len(),
        path.display(),
        table.malformed_rows
    );
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_column_detection() {
        let content = "Gene,Non-unique Gene name,Annotation,s1,s2\n\
                       group_1,dnaA,\"replication, initiator\",a_1,b_1\n\
                       group_2,,hypothetical,a_2,\n";
        let matrix = PresenceMatrix::from_bytes(content.as_bytes(), "gpa.csv").unwrap();
        assert_eq!(matrix.sample_columns, vec!["s1", "s2"]);
        assert_eq!(matrix.rows[0].present, 2);
        assert_eq!(matrix.rows[1].present, 1);
        assert_eq!(matrix.rows[0].gene_name, "dnaA");
        assert_eq!(matrix.rows[1].gene_name, "group_2");
    }

    #[test]
    fn test_fallback_and_presence() {
        let content = "Cluster,Desc,Other,s1,s2\ngroup_1,x,y,a,b\ngroup_2,x,y,a,\n";
        let matrix = PresenceMatrix::from_bytes(content.as_bytes(), "gpa.csv").unwrap();
        assert_eq!(matrix.n_samples(), 2);
        assert_eq!(matrix.core_clusters(0.99), vec!["group_1"]);
    }

    #[test]
    fn test_no_sample_columns_fails_loudly() {
        let content = "Gene,Non-unique Gene name\ngroup_1,dnaA\n";
        let err = PresenceMatrix::from_bytes(content.as_bytes(), "gpa.csv").unwrap_err();
        assert_eq!(err.kind(), "MalformedInput");
    }

    #[test]
    fn test_gene_name_map_two_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("names.tsv");
        std::fs::write(&path, "cluster\tname\ngroup_1\tdnaA\ngroup_2\t\n").unwrap();
        let names = load_gene_name_map(&path).unwrap();
        assert_eq!(names.get("group_1").map(String::as_str), Some("dnaA"));
        assert_eq!(names.get("group_2").map(String::as_str), Some(""));
    }

    #[test]
    fn test_gene_name_map_from_matrix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gene_presence_absence.csv");
        std::fs::write(
            &path,
            "Gene,Non-unique Gene name,Annotation,s1,s2\ngroup_1,dnaA,replication,a,b\ngroup_2,,hypothetical,a,\n",
        )
        .unwrap();
        let names = load_gene_name_map(&path).unwrap();
        assert_eq!(names["group_1"], "dnaA");
        assert_eq!(names["group_2"], "group_2");
    }

    #[test]
    fn test_gene_name_map_keeps_rows_around_bad_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("names.tsv");
        let mut content = b"cluster\tname\ngroup_1\tdnaA\ngroup_2\tcaf".to_vec();
        content.push(0xe9);
        content.extend_from_slice(b"\ngroup_3\trecA\n");
        std::fs::write(&path, content).unwrap();

        let names = load_gene_name_map(&path).unwrap();
        assert_eq!(names.len(), 2);
        assert_eq!(names["group_3"], "recA");
        assert!(!names.contains_key("group_2"));
    }

    #[test]
    fn test_matrix_counts_undecodable_rows() {
        let mut content = b"Gene,Non-unique Gene name,Annotation,s1,s2\ngroup_1,dnaA,x,a,b\ngroup_2,,h".to_vec();
        content.push(0xff);
        content.extend_from_slice(b",a,b\n");
        let matrix = PresenceMatrix::from_bytes(&content, "gpa.csv").unwrap();
        assert_eq!(matrix.rows.len(), 1);
        assert_eq!(matrix.malformed_rows, 1);
    }
}
