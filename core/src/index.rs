use std::collections::{HashMap, HashSet};

use crate::tokenizer::{normalize, tokenize};

/// Inverted index over stemmed unigrams and two-word phrase terms.
///
/// Maps each term to a posting table of document id -> occurrence count.
/// Counts are strictly positive; a document absent from a table has zero
/// occurrences. The only mutation path is [`InvertedIndex::index_document`],
/// which maintains both invariants.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: HashMap<String, HashMap<String, u32>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one document's occurrences to the index.
    ///
    /// Unigrams are the stems of non-stopword words. A phrase term is
    /// formed from each pair of words adjacent in the original sequence
    /// when neither side is a stopword, so a stopword breaks phrase
    /// formation. Indexing the same id again stacks counts on top of the
    /// existing ones rather than replacing them; callers that need
    /// replace semantics must build a fresh index.
    pub fn index_document(&mut self, doc_id: &str, text: &str) {
        let words = tokenize(text);
        for (i, word) in words.iter().enumerate() {
            let Some(term) = normalize(word) else {
                continue;
            };
            if let Some(next) = words.get(i + 1) {
                if let Some(next_term) = normalize(next) {
                    self.bump(format!("{term} {next_term}"), doc_id);
                }
            }
            self.bump(term, doc_id);
        }
        tracing::debug!(
            doc_id,
            words = words.len(),
            terms = self.postings.len(),
            "indexed document"
        );
    }

    fn bump(&mut self, term: String, doc_id: &str) {
        *self
            .postings
            .entry(term)
            .or_default()
            .entry(doc_id.to_string())
            .or_insert(0) += 1;
    }

    /// Posting table for a term, if any document contains it.
    pub fn postings(&self, term: &str) -> Option<&HashMap<String, u32>> {
        self.postings.get(term)
    }

    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Document count as the ranking modes estimate it: the posting-table
    /// size of whichever term iteration yields first, 0 on an empty index.
    /// Only exact when that term occurs in every document; kept as the
    /// scoring contract. [`InvertedIndex::document_count`] is the exact
    /// figure.
    pub fn document_count_estimate(&self) -> usize {
        self.postings.values().next().map_or(0, HashMap::len)
    }

    /// Exact number of distinct documents, derived as the union of
    /// posting-table keys.
    pub fn document_count(&self) -> usize {
        self.documents().len()
    }

    fn documents(&self) -> HashSet<&str> {
        self.postings
            .values()
            .flat_map(|table| table.keys())
            .map(String::as_str)
            .collect()
    }

    /// Total occurrences recorded for a document across every term,
    /// phrase entries included.
    pub fn document_length(&self, doc_id: &str) -> u64 {
        self.postings
            .values()
            .filter_map(|table| table.get(doc_id))
            .map(|&count| u64::from(count))
            .sum()
    }

    /// Mean document length over all distinct documents, 0.0 on an empty
    /// index. Scans every posting table.
    pub fn average_document_length(&self) -> f64 {
        let docs = self.documents();
        if docs.is_empty() {
            return 0.0;
        }
        let total: u64 = self
            .postings
            .values()
            .flat_map(|table| table.values())
            .map(|&count| u64::from(count))
            .sum();
        total as f64 / docs.len() as f64
    }
}
