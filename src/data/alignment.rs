// alignment.rs - Per-gene multiple sequence alignment

use crate::error::{MarkerError, Result};

/// One aligned sequence: strain or locus identifier plus its aligned characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentRecord {
    pub id: String,
    pub sequence: Vec<u8>,
}

impl AlignmentRecord {
    pub fn new(id: impl Into<String>, sequence: impl Into<Vec<u8>>) -> Self {
        Self {
            id: id.into(),
            sequence: sequence.into(),
        }
    }
}

/// Aligned records of a single gene. All sequences share the alignment width.
#[derive(Debug, Clone)]
pub struct Alignment {
    pub gene: String,
    pub records: Vec<AlignmentRecord>,
}

impl Alignment {
    /// Build an alignment, rejecting records whose length differs from the first
    pub fn new(gene: impl Into<String>, records: Vec<AlignmentRecord>) -> Result<Self> {
        let gene = gene.into();
        if let Some(first) = records.first() {
            let width = first.sequence.len();
            if let Some(bad) = records.iter().find(|r| r.sequence.len() != width) {
                return Err(MarkerError::malformed(
                    &gene,
                    format!(
                        "record '{}' has length {}, expected alignment width {} (from '{}')",
                        bad.id,
                        bad.sequence.len(),
                        width,
                        first.id
                    ),
                ));
            }
        }
        Ok(Self { gene, records })
    }

    /// Convenience constructor from (id, sequence) string pairs
    pub fn from_pairs(gene: &str, pairs: &[(&str, &str)]) -> Result<Self> {
        let records = pairs
            .iter()
            .map(|(id, seq)| AlignmentRecord::new(*id, seq.as_bytes()))
            .collect();
        Self::new(gene, records)
    }

    /// Alignment width; zero for an alignment without records
    pub fn width(&self) -> usize {
        self.records.first().map(|r| r.sequence.len()).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_lengths_accepted() {
        let aln = Alignment::from_pairs("geneA", &[("s1", "ACGT"), ("s2", "AC-T")]).unwrap();
        assert_eq!(aln.width(), 4);
        assert_eq!(aln.len(), 2);
    }

    #[test]
    fn test_unequal_lengths_rejected() {
        let err = Alignment::from_pairs("geneA", &[("s1", "ACGT"), ("s2", "ACG")]).unwrap_err();
        assert_eq!(err.kind(), "MalformedInput");
        assert!(err.to_string().contains("s2"));
    }

    #[test]
    fn test_empty_alignment_has_zero_width() {
        let aln = Alignment::new("geneA", Vec::new()).unwrap();
        assert!(aln.is_empty());
        assert_eq!(aln.width(), 0);
    }
}
