// presence.rs - Gene presence/absence matrix and core cluster selection

use crate::data::alignment::AlignmentRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Core-cluster selection threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenceConfig {
    /// Minimum fraction of samples carrying a cluster (0.0-1.0)
    pub min_presence: f64,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self { min_presence: 0.99 }
    }
}

impl PresenceConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.min_presence) {
            return Err(format!(
                "min_presence must be between 0.0 and 1.0, got {}",
                self.min_presence
            ));
        }
        Ok(())
    }
}

/// One gene cluster row: its name, display name and presence count
#[derive(Debug, Clone, PartialEq)]
pub struct PresenceRow {
    pub cluster: String,
    pub gene_name: String,
    pub present: usize,
}

/// Presence/absence matrix reduced to per-cluster presence counts
#[derive(Debug, Clone, Default)]
pub struct PresenceMatrix {
    pub sample_columns: Vec<String>,
    pub rows: Vec<PresenceRow>,
    /// Rows that could not be decoded and were left out
    pub malformed_rows: usize,
}

impl PresenceMatrix {
    pub fn n_samples(&self) -> usize {
        self.sample_columns.len()
    }

    /// Fraction of samples carrying the cluster
    pub fn presence_fraction(&self, row: &PresenceRow) -> f64 {
        if self.sample_columns.is_empty() {
            return 0.0;
        }
        row.present as f64 / self.sample_columns.len() as f64
    }

    /// Clusters present in at least `min_presence` of the samples, in table order
    pub fn core_clusters(&self, min_presence: f64) -> Vec<String> {
        self.rows
            .iter()
            .filter(|row| self.presence_fraction(row) >= min_presence)
            .map(|row| row.cluster.clone())
            .collect()
    }

    /// Cluster -> display gene name
    pub fn gene_names(&self) -> BTreeMap<String, String> {
        self.rows
            .iter()
            .map(|row| (row.cluster.clone(), row.gene_name.clone()))
            .collect()
    }
}

/// Group CDS records by cluster, the first `|`-separated token of the record id
pub fn group_cds_by_cluster(records: Vec<AlignmentRecord>) -> BTreeMap<String, Vec<AlignmentRecord>> {
    let mut index: BTreeMap<String, Vec<AlignmentRecord>> = BTreeMap::new();
    for record in records {
        let cluster = record.id.split('|').next().unwrap_or("").to_string();
        index.entry(cluster).or_default().push(record);
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> PresenceMatrix {
        PresenceMatrix {
            sample_columns: (1..=4).map(|i| format!("s{}", i)).collect(),
            rows: vec![
                PresenceRow { cluster: "group_1".into(), gene_name: "dnaA".into(), present: 4 },
                PresenceRow { cluster: "group_2".into(), gene_name: "group_2".into(), present: 3 },
                PresenceRow { cluster: "group_3".into(), gene_name: "recA".into(), present: 1 },
            ],
            malformed_rows: 0,
        }
    }

    #[test]
    fn test_core_clusters_threshold_inclusive() {
        let m = matrix();
        assert_eq!(m.core_clusters(0.99), vec!["group_1"]);
        assert_eq!(m.core_clusters(0.75), vec!["group_1", "group_2"]);
    }

    #[test]
    fn test_group_cds_by_first_token() {
        let records = vec![
            AlignmentRecord::new("group_1|s1|cds1", b"ATG".to_vec()),
            AlignmentRecord::new("group_2|s1|cds7", b"ATG".to_vec()),
            AlignmentRecord::new("group_1|s2|cds1", b"ATG".to_vec()),
        ];
        let grouped = group_cds_by_cluster(records);
        assert_eq!(grouped["group_1"].len(), 2);
        assert_eq!(grouped["group_2"].len(), 1);
    }
}
