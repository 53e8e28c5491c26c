use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::index::InvertedIndex;

const BM25_K1: f64 = 1.2;
const BM25_B: f64 = 0.75;

/// Relevance algorithm applied after postings have been aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingMode {
    Frequency,
    TfIdf,
    Bm25,
}

impl RankingMode {
    /// Parse a mode selector. Unrecognized names fall back to raw
    /// frequency rather than erroring.
    pub fn parse(name: &str) -> Self {
        match name {
            "tf-idf" => Self::TfIdf,
            "bm25" => Self::Bm25,
            _ => Self::Frequency,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Frequency => "frequency",
            Self::TfIdf => "tf-idf",
            Self::Bm25 => "bm25",
        }
    }
}

/// One ranked search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub doc_id: String,
    pub score: f64,
}

#[derive(Debug, Default)]
struct DocTally {
    raw: f64,
    /// Posting-table size of the last term that contributed to this entry.
    /// TF-IDF and BM25 read it as the document frequency; they deliberately
    /// do not compute a per-term df.
    last_df: usize,
}

/// Per-query score accumulator, discarded after ranking.
#[derive(Debug, Default)]
pub struct Accumulator {
    docs: HashMap<String, DocTally>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Fold one term's posting table into the running totals. A term
    /// looked up more than once contributes additively each time.
    pub fn absorb(&mut self, postings: &HashMap<String, u32>) {
        let df = postings.len();
        for (doc_id, &count) in postings {
            let tally = self.docs.entry(doc_id.clone()).or_default();
            tally.raw += f64::from(count);
            tally.last_df = df;
        }
    }

    /// Score the accumulated documents and sort descending. The sort is
    /// stable, so equal scores keep their pre-sort order within a call.
    pub fn rank(self, mode: RankingMode, index: &InvertedIndex) -> Vec<SearchHit> {
        let mut hits: Vec<SearchHit> = match mode {
            RankingMode::Frequency => self
                .docs
                .into_iter()
                .map(|(doc_id, tally)| SearchHit {
                    doc_id,
                    score: tally.raw,
                })
                .collect(),
            RankingMode::TfIdf => {
                let n = index.document_count_estimate() as f64;
                self.docs
                    .into_iter()
                    .map(|(doc_id, tally)| {
                        let score = tf_idf(tally.raw, tally.last_df as f64, n);
                        SearchHit { doc_id, score }
                    })
                    .collect()
            }
            RankingMode::Bm25 => {
                let n = index.document_count_estimate() as f64;
                let avgdl = index.average_document_length();
                self.docs
                    .into_iter()
                    .map(|(doc_id, tally)| {
                        let dl = index.document_length(&doc_id) as f64;
                        let score = bm25(tally.raw, tally.last_df as f64, n, dl, avgdl);
                        SearchHit { doc_id, score }
                    })
                    .collect()
            }
        };
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        hits
    }
}

/// tf x ln(N/df); a degenerate index (N = 0 or df = 0) scores 0 instead
/// of dividing by zero.
fn tf_idf(tf: f64, df: f64, n: f64) -> f64 {
    if n <= 0.0 || df <= 0.0 {
        return 0.0;
    }
    tf * (n / df).ln()
}

fn bm25(tf: f64, df: f64, n: f64, dl: f64, avgdl: f64) -> f64 {
    if n <= 0.0 || df <= 0.0 || avgdl <= 0.0 {
        return 0.0;
    }
    let idf = ((n - df + 0.5) / (df + 0.5)).ln();
    let length_norm = 1.0 - BM25_B + BM25_B * dl / avgdl;
    idf * (tf * (BM25_K1 + 1.0)) / (tf + BM25_K1 * length_norm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parsing_falls_back_to_frequency() {
        assert_eq!(RankingMode::parse("frequency"), RankingMode::Frequency);
        assert_eq!(RankingMode::parse("tf-idf"), RankingMode::TfIdf);
        assert_eq!(RankingMode::parse("bm25"), RankingMode::Bm25);
        assert_eq!(RankingMode::parse("pagerank"), RankingMode::Frequency);
        assert_eq!(RankingMode::parse(""), RankingMode::Frequency);
    }

    #[test]
    fn degenerate_inputs_score_zero() {
        assert_eq!(tf_idf(3.0, 0.0, 0.0), 0.0);
        assert_eq!(tf_idf(3.0, 2.0, 0.0), 0.0);
        assert_eq!(bm25(3.0, 0.0, 0.0, 0.0, 0.0), 0.0);
        assert_eq!(bm25(3.0, 1.0, 1.0, 4.0, 0.0), 0.0);
    }

    #[test]
    fn absorb_records_last_contributing_df() {
        let mut acc = Accumulator::new();
        let mut first = HashMap::new();
        first.insert("d".to_string(), 2u32);
        first.insert("e".to_string(), 1u32);
        let mut second = HashMap::new();
        second.insert("d".to_string(), 1u32);

        acc.absorb(&first);
        acc.absorb(&second);
        let tally = &acc.docs["d"];
        assert_eq!(tally.raw, 3.0);
        assert_eq!(tally.last_df, 1);
        assert_eq!(acc.docs["e"].last_df, 2);
    }
}
