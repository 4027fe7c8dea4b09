// homology.rs - Homology-search report rows

/// Column order of the tabular search report (no header line)
pub const REPORT_COLUMNS: &[&str] = &[
    "qseqid", "sseqid", "pident", "length", "mismatch", "gapopen", "qstart", "qend", "sstart",
    "send", "evalue", "bitscore", "qlen", "slen", "qcovs", "sscinames", "staxids", "stitle",
];

/// One hit of a consensus sequence against a competing database sequence
#[derive(Debug, Clone, PartialEq)]
pub struct HomologyHit {
    pub query_id: String,
    pub subject_id: String,
    pub pident: f64,
    pub length: u64,
    pub mismatches: u64,
    pub gap_opens: u64,
    pub query_start: u64,
    pub query_end: u64,
    pub subject_start: u64,
    pub subject_end: u64,
    pub evalue: f64,
    pub bitscore: f64,
    pub query_len: u64,
    pub subject_len: u64,
    pub qcovs: f64,
    pub scientific_name: String,
    pub tax_id: String,
    pub title: String,
}

#[cfg(test)]
impl HomologyHit {
    /// Hit carrying only the fields the decision rule reads
    pub fn simple(query_id: &str, title: &str, pident: f64, qcovs: f64, bitscore: f64) -> Self {
        Self {
            query_id: query_id.to_string(),
            subject_id: String::new(),
            pident,
            length: 0,
            mismatches: 0,
            gap_opens: 0,
            query_start: 0,
            query_end: 0,
            subject_start: 0,
            subject_end: 0,
            evalue: 0.0,
            bitscore,
            query_len: 0,
            subject_len: 0,
            qcovs,
            scientific_name: String::new(),
            tax_id: String::new(),
            title: title.to_string(),
        }
    }
}

/// All parsed rows of a search report plus the count of rejected rows
#[derive(Debug, Clone, Default)]
pub struct HomologyReport {
    pub hits: Vec<HomologyHit>,
    pub malformed_rows: usize,
}

impl HomologyReport {
    pub fn new(hits: Vec<HomologyHit>) -> Self {
        Self {
            hits,
            malformed_rows: 0,
        }
    }

    /// No competing evidence at all: every gene passes
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }
}
