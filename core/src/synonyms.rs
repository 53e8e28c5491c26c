use std::collections::HashMap;

/// Query-side synonym table keyed by surface form.
///
/// Lookups use the raw lowercased query word, not its stem: the index is
/// keyed by stems while this table is keyed by surface forms. The
/// asymmetry is load-bearing; expansion stems each alternate before the
/// index lookup.
#[derive(Debug, Clone)]
pub struct SynonymTable {
    entries: HashMap<String, Vec<String>>,
}

impl SynonymTable {
    /// Table with the built-in pairs.
    pub fn new() -> Self {
        Self::with_entries([
            ("happy", &["joyful", "cheerful"][..]),
            ("sad", &["unhappy", "depressed"][..]),
        ])
    }

    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a [&'a str])>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(word, alternates)| {
                let alternates = alternates.iter().map(|a| a.to_string()).collect();
                (word.to_string(), alternates)
            })
            .collect();
        Self { entries }
    }

    /// Alternate surface forms for a raw lowercased word.
    pub fn alternates(&self, word: &str) -> &[String] {
        self.entries.get(word).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Default for SynonymTable {
    fn default() -> Self {
        Self::new()
    }
}
