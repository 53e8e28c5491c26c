use crate::index::InvertedIndex;
use crate::rank::{Accumulator, RankingMode, SearchHit};
use crate::synonyms::SynonymTable;
use crate::tokenizer::{normalize, tokenize};

/// One independent search engine: an inverted index plus the synonym
/// table consulted during query expansion.
///
/// All state is owned here; several engines can coexist in one process.
#[derive(Debug, Default)]
pub struct SearchEngine {
    index: InvertedIndex,
    synonyms: SynonymTable,
}

impl SearchEngine {
    /// Engine with the built-in synonym pairs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with a caller-supplied synonym table.
    pub fn with_synonyms(synonyms: SynonymTable) -> Self {
        Self {
            index: InvertedIndex::new(),
            synonyms,
        }
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    /// Add a document to the index. Total over any text, including the
    /// empty string; indexing the same id again stacks counts on top of
    /// the existing ones.
    pub fn index_document(&mut self, doc_id: &str, text: &str) {
        self.index.index_document(doc_id, text);
    }

    /// Expand the query, aggregate raw posting counts and rank with the
    /// selected mode.
    ///
    /// Expansion per non-stopword query word: its stem, the stems of its
    /// synonym alternates (looked up by the raw surface form), and the
    /// two-word phrase with the following word under the same adjacency
    /// rule as indexing. Lookups are not deduplicated; a term reached
    /// twice contributes its postings twice.
    pub fn search_ranked(&self, query: &str, mode: RankingMode) -> Vec<SearchHit> {
        let words = tokenize(query);
        let mut scores = Accumulator::new();
        for (i, word) in words.iter().enumerate() {
            let Some(term) = normalize(word) else {
                continue;
            };
            self.absorb_term(&mut scores, &term);

            for alternate in self.synonyms.alternates(word) {
                if let Some(alt_term) = normalize(alternate) {
                    self.absorb_term(&mut scores, &alt_term);
                }
            }

            if let Some(next) = words.get(i + 1) {
                if let Some(next_term) = normalize(next) {
                    self.absorb_term(&mut scores, &format!("{term} {next_term}"));
                }
            }
        }
        if scores.is_empty() {
            // Nothing matched; skip the ranking pass (BM25 would still
            // scan the whole index for its average document length).
            return Vec::new();
        }
        scores.rank(mode, &self.index)
    }

    /// Ranked results rendered as display lines, one per document.
    pub fn search(&self, query: &str, mode: RankingMode) -> Vec<String> {
        self.search_ranked(query, mode)
            .into_iter()
            .map(|hit| format!("{} (score: {})", hit.doc_id, hit.score))
            .collect()
    }

    fn absorb_term(&self, scores: &mut Accumulator, term: &str) {
        if let Some(postings) = self.index.postings(term) {
            scores.absorb(postings);
        }
    }
}
