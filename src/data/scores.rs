// scores.rs - Gene identity score table

/// One row of the gene -> identity table. `identity` is `None` when the value
/// could not be parsed; such genes are never candidates.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreEntry {
    pub gene_file: String,
    pub gene_name: String,
    pub identity: Option<f64>,
}

/// Identity scores in table order, plus the count of rows that could not be read
#[derive(Debug, Clone, Default)]
pub struct ScoreTable {
    pub entries: Vec<ScoreEntry>,
    pub malformed_rows: usize,
}

impl ScoreTable {
    pub fn new(entries: Vec<ScoreEntry>) -> Self {
        Self {
            entries,
            malformed_rows: 0,
        }
    }

    /// Number of rows without a parseable identity
    pub fn unparseable(&self) -> usize {
        self.entries.iter().filter(|e| e.identity.is_none()).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
