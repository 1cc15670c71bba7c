pub mod corpus;
pub mod index;
pub mod query;
pub mod tokenizer;

pub use corpus::{preview, Corpus, Document};
pub use index::{build_index, DocId, InvertedIndex, ResultSet};
pub use query::{evaluate, Query};
pub use tokenizer::tokenize;
