//! In-memory inverted index with selectable relevance ranking
//! (raw frequency, TF-IDF, BM25), synonym expansion and two-word
//! phrase matching.

pub mod engine;
pub mod index;
pub mod rank;
pub mod synonyms;
pub mod tokenizer;

pub use engine::SearchEngine;
pub use index::InvertedIndex;
pub use rank::{RankingMode, SearchHit};
pub use synonyms::SynonymTable;
