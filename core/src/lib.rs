pub mod corpus;
pub mod graph;
pub mod index;
pub mod pagerank;
pub mod persist;
pub mod search;
pub mod tokenizer;

pub type DocId = u32;

pub use index::{DocStats, Index, IndexBuilder, LinkedCorpus, Postings};
pub use search::{Hit, Searcher};
