// exclusivity.rs - PASS/REJECT exclusivity decisions from homology-search hits

use crate::data::{HomologyHit, HomologyReport};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Label used when no organism name can be derived or no hit exists
pub const UNKNOWN_NEIGHBOR: &str = "unknown";

/// Decision thresholds. A gene is rejected only when its best competing hit
/// reaches both the identity and the coverage threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExclusivityConfig {
    pub min_pident: f64,
    pub min_qcovs: f64,
    /// Case-insensitive substrings naming the target organism; matching hits
    /// are not competing evidence and are dropped
    pub exclude_neighbors: Vec<String>,
}

impl Default for ExclusivityConfig {
    fn default() -> Self {
        Self {
            min_pident: 85.0,
            min_qcovs: 80.0,
            exclude_neighbors: Vec::new(),
        }
    }
}

impl ExclusivityConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=100.0).contains(&self.min_pident) {
            return Err(format!("min_pident must be between 0 and 100, got {}", self.min_pident));
        }
        if !(0.0..=100.0).contains(&self.min_qcovs) {
            return Err(format!("min_qcovs must be between 0 and 100, got {}", self.min_qcovs));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Pass,
    Reject,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass => write!(f, "PASS"),
            Verdict::Reject => write!(f, "REJECT"),
        }
    }
}

impl FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PASS" => Ok(Verdict::Pass),
            "REJECT" => Ok(Verdict::Reject),
            other => Err(format!("Invalid decision '{}'. Use: PASS, REJECT", other)),
        }
    }
}

/// Best competing hit of a gene, reduced to what the decision table reports
#[derive(Debug, Clone, PartialEq)]
pub struct HitEvidence {
    pub neighbor: String,
    pub subject_id: String,
    pub pident: f64,
    pub qcovs: f64,
    pub bitscore: f64,
}

/// Verdict for one gene with its evidence. `evidence` is `None` when the gene
/// has no competing hit at all.
#[derive(Debug, Clone, PartialEq)]
pub struct ExclusivityDecision {
    pub gene: String,
    pub evidence: Option<HitEvidence>,
    pub verdict: Verdict,
}

impl ExclusivityDecision {
    pub fn neighbor(&self) -> &str {
        self.evidence
            .as_ref()
            .map(|e| e.neighbor.as_str())
            .unwrap_or(UNKNOWN_NEIGHBOR)
    }
}

/// Per-gene, per-neighbor hit statistics
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborSummary {
    pub gene: String,
    pub neighbor: String,
    pub num_hits: usize,
    pub best_identity: f64,
    pub mean_identity: f64,
}

/// Derives organism labels from free-text subject titles
#[derive(Debug, Clone)]
pub struct NeighborNormalizer {
    accession: Regex,
    descriptors: Regex,
    whitespace: Regex,
}

impl Default for NeighborNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl NeighborNormalizer {
    pub fn new() -> Self {
        // Patterns are constants; compilation cannot fail
        Self {
            accession: Regex::new(r"^[A-Z0-9_.]+\s+").expect("valid accession pattern"),
            descriptors: Regex::new(
                r"(?i)\b(strain|chromosome|complete genome|contig|isolate|genome)\b.*",
            )
            .expect("valid descriptor pattern"),
            whitespace: Regex::new(r"\s+").expect("valid whitespace pattern"),
        }
    }

    /// Strip a leading accession, cut at the first descriptor keyword and
    /// collapse whitespace. Returns `unknown` when nothing is left.
    pub fn normalize(&self, title: &str) -> String {
        let title = title.trim();
        let without_accession = self.accession.replace(title, "");
        let without_descriptors = self.descriptors.replace(without_accession.trim(), "");
        let collapsed = self.whitespace.replace_all(without_descriptors.trim(), " ");
        let cleaned = collapsed.trim().trim_end_matches([',', ';', ':']).trim();

        if cleaned.is_empty() {
            UNKNOWN_NEIGHBOR.to_string()
        } else {
            cleaned.to_string()
        }
    }
}

/// Ranking of competing hits: identity, then coverage, then bit score, all
/// descending. `Ordering::Less` means `a` ranks ahead of `b`.
pub fn rank_hits(a: &HomologyHit, b: &HomologyHit) -> Ordering {
    b.pident
        .total_cmp(&a.pident)
        .then_with(|| b.qcovs.total_cmp(&a.qcovs))
        .then_with(|| b.bitscore.total_cmp(&a.bitscore))
}

/// Best hit by `rank_hits`; among complete ties the earliest row wins
pub fn best_hit<'a, I>(hits: I) -> Option<&'a HomologyHit>
where
    I: IntoIterator<Item = &'a HomologyHit>,
{
    hits.into_iter().fold(None, |best, hit| match best {
        Some(current) if rank_hits(hit, current) != Ordering::Less => Some(current),
        _ => Some(hit),
    })
}

/// AND rule: identity and coverage must both reach their thresholds
pub fn decide(pident: f64, qcovs: f64, config: &ExclusivityConfig) -> Verdict {
    if pident >= config.min_pident && qcovs >= config.min_qcovs {
        Verdict::Reject
    } else {
        Verdict::Pass
    }
}

/// True when the hit belongs to the target organism itself
fn is_excluded(hit: &HomologyHit, exclude: &[String]) -> bool {
    if exclude.is_empty() {
        return false;
    }
    let title = hit.title.to_lowercase();
    let name = hit.scientific_name.to_lowercase();
    exclude.iter().any(|term| {
        let term = term.to_lowercase();
        !term.is_empty() && (title.contains(&term) || name.contains(&term))
    })
}

/// Competing hits grouped by query gene, target-organism hits removed
pub fn competing_hits_by_gene<'a>(
    report: &'a HomologyReport,
    config: &ExclusivityConfig,
) -> BTreeMap<&'a str, Vec<&'a HomologyHit>> {
    let mut by_gene: BTreeMap<&str, Vec<&HomologyHit>> = BTreeMap::new();
    for hit in &report.hits {
        if is_excluded(hit, &config.exclude_neighbors) {
            continue;
        }
        by_gene.entry(hit.query_id.as_str()).or_default().push(hit);
    }
    by_gene
}

/// Decide every gene named in `genes` or in the report, sorted by gene name.
///
/// Genes without competing hits pass with neighbor `unknown`; an empty report
/// therefore passes every gene.
pub fn classify(
    report: &HomologyReport,
    genes: &[String],
    config: &ExclusivityConfig,
) -> Vec<ExclusivityDecision> {
    let normalizer = NeighborNormalizer::new();
    let by_gene = competing_hits_by_gene(report, config);

    let mut all_genes: BTreeSet<&str> = genes.iter().map(|g| g.as_str()).collect();
    all_genes.extend(report.hits.iter().map(|h| h.query_id.as_str()));

    all_genes
        .into_iter()
        .map(|gene| {
            let best = by_gene.get(gene).and_then(|hits| best_hit(hits.iter().copied()));
            match best {
                Some(hit) => ExclusivityDecision {
                    gene: gene.to_string(),
                    verdict: decide(hit.pident, hit.qcovs, config),
                    evidence: Some(HitEvidence {
                        neighbor: normalizer.normalize(&hit.title),
                        subject_id: hit.subject_id.clone(),
                        pident: hit.pident,
                        qcovs: hit.qcovs,
                        bitscore: hit.bitscore,
                    }),
                },
                None => ExclusivityDecision {
                    gene: gene.to_string(),
                    evidence: None,
                    verdict: Verdict::Pass,
                },
            }
        })
        .collect()
}

/// Hit counts and identities per (gene, normalized neighbor). Rows are sorted
/// by gene, then best identity descending, then neighbor name.
pub fn summarize_neighbors(
    report: &HomologyReport,
    config: &ExclusivityConfig,
) -> Vec<NeighborSummary> {
    let normalizer = NeighborNormalizer::new();
    let mut groups: BTreeMap<(String, String), Vec<f64>> = BTreeMap::new();

    for (gene, hits) in competing_hits_by_gene(report, config) {
        for hit in hits {
            groups
                .entry((gene.to_string(), normalizer.normalize(&hit.title)))
                .or_default()
                .push(hit.pident);
        }
    }

    let mut summaries: Vec<NeighborSummary> = groups
        .into_iter()
        .map(|((gene, neighbor), idents)| NeighborSummary {
            gene,
            neighbor,
            num_hits: idents.len(),
            best_identity: idents.iter().copied().fold(f64::MIN, f64::max),
            mean_identity: idents.iter().sum::<f64>() / idents.len() as f64,
        })
        .collect();

    summaries.sort_by(|a, b| {
        a.gene
            .cmp(&b.gene)
            .then_with(|| b.best_identity.total_cmp(&a.best_identity))
            .then_with(|| a.neighbor.cmp(&b.neighbor))
    });
    summaries
}

/// (pass, reject) counts
pub fn verdict_counts(decisions: &[ExclusivityDecision]) -> (usize, usize) {
    let pass = decisions.iter().filter(|d| d.verdict == Verdict::Pass).count();
    (pass, decisions.len() - pass)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(hits: Vec<HomologyHit>) -> HomologyReport {
        HomologyReport::new(hits)
    }

    #[test]
    fn test_normalize_reference_title() {
        let n = NeighborNormalizer::new();
        assert_eq!(
            n.normalize("NZ_LR594047.1 Streptococcus pyogenes strain ABC chromosome, complete genome"),
            "Streptococcus pyogenes"
        );
    }

    #[test]
    fn test_normalize_other_titles() {
        let n = NeighborNormalizer::new();
        assert_eq!(
            n.normalize("CP012345.1 Streptococcus   dysgalactiae subsp. equisimilis isolate 12 genome assembly"),
            "Streptococcus dysgalactiae subsp. equisimilis"
        );
        assert_eq!(n.normalize("Streptococcus canis DNA, COMPLETE GENOME"), "Streptococcus canis DNA");
        assert_eq!(n.normalize("NZ_AB000001.1 contig 12"), UNKNOWN_NEIGHBOR);
        assert_eq!(n.normalize(""), UNKNOWN_NEIGHBOR);
        assert_eq!(n.normalize("   "), UNKNOWN_NEIGHBOR);
    }

    #[test]
    fn test_and_rule() {
        let config = ExclusivityConfig::default();
        assert_eq!(decide(90.0, 50.0, &config), Verdict::Pass);
        assert_eq!(decide(90.0, 90.0, &config), Verdict::Reject);
        assert_eq!(decide(80.0, 90.0, &config), Verdict::Pass);
        assert_eq!(decide(85.0, 80.0, &config), Verdict::Reject);
    }

    #[test]
    fn test_best_hit_tie_break_order() {
        let hits = vec![
            HomologyHit::simple("g", "A sp1", 95.0, 80.0, 500.0),
            HomologyHit::simple("g", "B sp2", 95.0, 90.0, 100.0),
            HomologyHit::simple("g", "C sp3", 95.0, 90.0, 300.0),
            HomologyHit::simple("g", "D sp4", 94.0, 100.0, 900.0),
        ];
        let best = best_hit(hits.iter()).unwrap();
        assert_eq!(best.title, "C sp3");
    }

    #[test]
    fn test_best_hit_full_tie_keeps_first_row() {
        let hits = vec![
            HomologyHit::simple("g", "First one", 90.0, 90.0, 100.0),
            HomologyHit::simple("g", "Second one", 90.0, 90.0, 100.0),
        ];
        assert_eq!(best_hit(hits.iter()).unwrap().title, "First one");
    }

    #[test]
    fn test_classify_with_hits() {
        let r = report(vec![
            HomologyHit::simple("geneA", "NZ_1.1 Streptococcus dysgalactiae strain X", 92.0, 95.0, 800.0),
            HomologyHit::simple("geneA", "NZ_2.1 Streptococcus canis strain Y", 88.0, 99.0, 700.0),
            HomologyHit::simple("geneB", "NZ_3.1 Streptococcus equi chromosome", 99.0, 30.0, 100.0),
        ]);
        let decisions = classify(&r, &["geneA".into(), "geneB".into(), "geneC".into()], &ExclusivityConfig::default());

        assert_eq!(decisions.len(), 3);
        assert_eq!(decisions[0].gene, "geneA");
        assert_eq!(decisions[0].verdict, Verdict::Reject);
        assert_eq!(decisions[0].neighbor(), "Streptococcus dysgalactiae");
        assert_eq!(decisions[1].verdict, Verdict::Pass);
        assert_eq!(decisions[1].neighbor(), "Streptococcus equi");
        assert_eq!(decisions[1].evidence.as_ref().unwrap().qcovs, 30.0);
        assert_eq!(decisions[2].verdict, Verdict::Pass);
        assert_eq!(decisions[2].neighbor(), UNKNOWN_NEIGHBOR);
        assert!(decisions[2].evidence.is_none());
    }

    #[test]
    fn test_empty_report_passes_everything() {
        let decisions = classify(&HomologyReport::default(), &["g1".into(), "g3".into()], &ExclusivityConfig::default());
        assert_eq!(decisions.len(), 2);
        assert!(decisions.iter().all(|d| d.verdict == Verdict::Pass));
        assert!(decisions.iter().all(|d| d.neighbor() == UNKNOWN_NEIGHBOR));
    }

    #[test]
    fn test_target_hits_excluded() {
        let r = report(vec![
            HomologyHit::simple("geneA", "NZ_1.1 Streptococcus pyogenes strain M1", 100.0, 100.0, 999.0),
            HomologyHit::simple("geneA", "NZ_2.1 Streptococcus canis strain Y", 70.0, 99.0, 100.0),
        ]);
        let config = ExclusivityConfig {
            exclude_neighbors: vec!["streptococcus pyogenes".into()],
            ..Default::default()
        };
        let decisions = classify(&r, &[], &config);
        assert_eq!(decisions[0].verdict, Verdict::Pass);
        assert_eq!(decisions[0].neighbor(), "Streptococcus canis");
    }

    #[test]
    fn test_neighbor_summary() {
        let r = report(vec![
            HomologyHit::simple("geneA", "NZ_1.1 Streptococcus canis strain A", 90.0, 95.0, 800.0),
            HomologyHit::simple("geneA", "NZ_2.1 Streptococcus canis strain B", 80.0, 95.0, 700.0),
            HomologyHit::simple("geneA", "NZ_3.1 Streptococcus equi strain C", 95.0, 95.0, 700.0),
        ]);
        let summary = summarize_neighbors(&r, &ExclusivityConfig::default());
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].neighbor, "Streptococcus equi");
        assert_eq!(summary[1].neighbor, "Streptococcus canis");
        assert_eq!(summary[1].num_hits, 2);
        assert_eq!(summary[1].best_identity, 90.0);
        assert_eq!(summary[1].mean_identity, 85.0);
    }

    #[test]
    fn test_verdict_parsing_and_counts() {
        assert_eq!("pass".parse::<Verdict>().unwrap(), Verdict::Pass);
        assert_eq!("REJECT".parse::<Verdict>().unwrap(), Verdict::Reject);
        assert!("maybe".parse::<Verdict>().is_err());

        let decisions = classify(&HomologyReport::default(), &["a".into()], &ExclusivityConfig::default());
        assert_eq!(verdict_counts(&decisions), (1, 0));
    }
}
