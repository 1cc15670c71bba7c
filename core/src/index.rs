use crate::tokenizer::tokenize;
use std::collections::{HashMap, HashSet};

/// Caller-assigned document identifier, stable for the session.
pub type DocId = String;

/// Documents matching a query. Unordered, no duplicates.
pub type ResultSet = HashSet<DocId>;

/// Token -> ids of the documents containing it.
///
/// Built once per corpus and never mutated afterwards, so a shared reference
/// can be queried from any number of callers without locking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvertedIndex {
    postings: HashMap<String, HashSet<DocId>>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Tokenize every document and record its id under each distinct token.
    ///
    /// Document text is not retained. The resulting content does not depend on
    /// the order in which documents are supplied.
    pub fn build<I, K, V>(documents: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<DocId>,
        V: AsRef<str>,
    {
        let mut postings: HashMap<String, HashSet<DocId>> = HashMap::new();
        let mut num_docs = 0usize;
        for (doc_id, text) in documents {
            let doc_id: DocId = doc_id.into();
            for token in tokenize(text.as_ref()) {
                postings.entry(token).or_default().insert(doc_id.clone());
            }
            num_docs += 1;
        }
        tracing::debug!(num_docs, num_terms = postings.len(), "built inverted index");
        Self { postings }
    }

    /// Exact-match lookup of a key.
    pub fn get(&self, term: &str) -> Option<&HashSet<DocId>> {
        self.postings.get(term)
    }

    /// Exact-match lookup that treats an absent key as matching nothing.
    pub fn lookup(&self, term: &str) -> ResultSet {
        self.get(term).cloned().unwrap_or_default()
    }

    pub fn num_terms(&self) -> usize { self.postings.len() }

    pub fn is_empty(&self) -> bool { self.postings.is_empty() }

    pub fn terms(&self) -> impl Iterator<Item = (&str, &HashSet<DocId>)> {
        self.postings.iter().map(|(t, ids)| (t.as_str(), ids))
    }
}

/// Build an inverted index from a `document_id -> text` mapping.
pub fn build_index(documents: &HashMap<DocId, String>) -> InvertedIndex {
    InvertedIndex::build(documents.iter().map(|(id, text)| (id.clone(), text.as_str())))
}
