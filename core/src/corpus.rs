use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::DocId;

/// One corpus record before any indexing has happened.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RawDoc {
    pub id: DocId,
    pub title: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
struct CorpusFile {
    #[serde(rename = "page", default)]
    pages: Vec<RawDoc>,
}

/// Parse an XML corpus of `<page>` records, each carrying `<id>`, `<title>`
/// and `<text>`. Any malformed record aborts the whole batch.
pub fn parse_corpus(path: &Path) -> Result<Vec<RawDoc>> {
    let file = File::open(path)
        .with_context(|| format!("cannot open corpus file {}", path.display()))?;
    let corpus: CorpusFile = quick_xml::de::from_reader(BufReader::new(file))
        .with_context(|| format!("malformed corpus file {}", path.display()))?;
    let mut docs = corpus.pages;
    for doc in &mut docs {
        doc.title = doc.title.trim().to_string();
        doc.text = doc.text.trim().to_string();
    }
    Ok(docs)
}
