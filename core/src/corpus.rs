use crate::index::{DocId, InvertedIndex, ResultSet};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const PREVIEW_CHARS: usize = 500;

pub const MSG_EMPTY_CORPUS: &str = "Please upload some text files to search through.";
pub const MSG_EMPTY_QUERY: &str = "Please enter a query.";
pub const MSG_NO_MATCH: &str = "No documents found matching the query.";

#[derive(Debug, Clone)]
pub struct Document {
    pub id: DocId,
    /// Original file name as uploaded.
    pub name: String,
    pub text: String,
}

/// Uploaded documents in upload order, with ids `Document 1`, `Document 2`, ...
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    docs: Vec<Document>,
    by_id: HashMap<DocId, usize>,
    by_name: HashMap<String, DocId>,
}

impl Corpus {
    pub fn new() -> Self { Self::default() }

    pub fn from_uploads<I, N, T>(uploads: I) -> Self
    where
        I: IntoIterator<Item = (N, T)>,
        N: Into<String>,
        T: Into<String>,
    {
        let mut corpus = Corpus::new();
        for (pos, (name, text)) in uploads.into_iter().enumerate() {
            let id = format!("Document {}", pos + 1);
            let name = name.into();
            corpus.by_id.insert(id.clone(), pos);
            corpus.by_name.insert(name.clone(), id.clone());
            corpus.docs.push(Document { id, name, text: text.into() });
        }
        corpus
    }

    /// Load every `*.txt` file under `dir`, ordered by path.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let mut files: Vec<PathBuf> = Vec::new();
        for entry in WalkDir::new(dir) {
            let entry = entry.with_context(|| format!("walking {}", dir.display()))?;
            let p = entry.path();
            if p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("txt") {
                files.push(p.to_path_buf());
            }
        }
        files.sort();

        let mut uploads = Vec::with_capacity(files.len());
        for file in files {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("reading {} as UTF-8", file.display()))?;
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            uploads.push((name, text));
        }
        tracing::info!(dir = %dir.display(), num_docs = uploads.len(), "loaded corpus");
        Ok(Self::from_uploads(uploads))
    }

    /// The `document_id -> text` pairs fed to the index builder.
    pub fn texts(&self) -> impl Iterator<Item = (&str, &str)> {
        self.docs.iter().map(|d| (d.id.as_str(), d.text.as_str()))
    }

    pub fn build_index(&self) -> InvertedIndex {
        InvertedIndex::build(self.texts())
    }

    pub fn get(&self, id: &str) -> Option<&Document> {
        self.by_id.get(id).map(|&pos| &self.docs[pos])
    }

    pub fn id_for_name(&self, name: &str) -> Option<&DocId> {
        self.by_name.get(name)
    }

    pub fn documents(&self) -> &[Document] { &self.docs }

    pub fn len(&self) -> usize { self.docs.len() }

    pub fn is_empty(&self) -> bool { self.docs.is_empty() }

    /// Matched documents in upload order. Ids not in the corpus are skipped.
    pub fn ordered<'a>(&'a self, results: &ResultSet) -> Vec<&'a Document> {
        self.docs.iter().filter(|d| results.contains(&d.id)).collect()
    }
}

/// First `max_chars` characters of `text`, with `...` appended if anything was cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
