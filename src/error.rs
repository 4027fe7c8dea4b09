// error.rs - Error taxonomy shared by every stage

use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading inputs, running collaborators or writing outputs.
///
/// An empty homology report is deliberately absent here: it means "no competing
/// evidence" and every gene passes.
#[derive(Error, Debug)]
pub enum MarkerError {
    /// Structurally invalid record, table row or alignment
    #[error("malformed input in {source_name}: {reason}")]
    MalformedInput { source_name: String, reason: String },

    /// Expected per-gene or table file does not exist
    #[error("missing file: {}", .0.display())]
    MissingFile(PathBuf),

    /// Aligner or search tool failed to start or exited non-zero
    #[error("{tool} failed for {target}: {detail}")]
    ExternalToolFailure {
        tool: String,
        target: String,
        detail: String,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl MarkerError {
    pub fn malformed(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        MarkerError::MalformedInput {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MarkerError::Io {
            path: path.into(),
            source,
        }
    }

    /// Short category label used when grouping skip reasons
    pub fn kind(&self) -> &'static str {
        match self {
            MarkerError::MalformedInput { .. } => "MalformedInput",
            MarkerError::MissingFile(_) => "MissingFile",
            MarkerError::ExternalToolFailure { .. } => "ExternalToolFailure",
            MarkerError::Io { .. } => "Io",
            MarkerError::Csv(_) => "Csv",
            MarkerError::Config(_) => "Config",
        }
    }
}

pub type Result<T> = std::result::Result<T, MarkerError>;

/// Final tally of a batch stage: what was written and what was skipped and why.
#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct BatchReport {
    pub stage: String,
    pub processed: usize,
    pub written: usize,
    pub skipped: Vec<(String, String)>,
}

impl BatchReport {
    pub fn new(stage: &str) -> Self {
        Self {
            stage: stage.to_string(),
            ..Default::default()
        }
    }

    /// Record a skipped item; the error is logged immediately
    pub fn skip(&mut self, item: &str, error: &MarkerError) {
        eprintln!("⚠️  [{}] skipping {}: {}", self.stage, item, error);
        self.skipped.push((item.to_string(), error.kind().to_string()));
    }

    /// Count table rows a loader already rejected and logged
    pub fn skip_rows(&mut self, source: &str, rows: usize) {
        for _ in 0..rows {
            self.skipped
                .push((format!("{} row", source), "MalformedInput".to_string()));
        }
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Skip counts grouped by error category
    pub fn skip_reasons(&self) -> BTreeMap<String, usize> {
        let mut reasons = BTreeMap::new();
        for (_, kind) in &self.skipped {
            *reasons.entry(kind.clone()).or_insert(0) += 1;
        }
        reasons
    }

    pub fn print_summary(&self) {
        println!(
            "✅ [{}] processed {}, written {}, skipped {}",
            self.stage,
            self.processed,
            self.written,
            self.skipped_count()
        );
        for (kind, count) in self.skip_reasons() {
            println!("   • {}: {}", kind, count);
        }
    }
}
