use anyhow::{bail, Result};
use std::collections::{BTreeMap, HashMap};

use crate::graph::{resolve_links, LinkGraph};
use crate::pagerank;
use crate::tokenizer::tokenize_document;
use crate::DocId;

/// Per-document normalization and authority values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocStats {
    /// Highest raw occurrence count over the document's distinct terms.
    pub max_freq: u32,
    /// PageRank authority, a probability over the whole corpus.
    pub rank: f64,
}

/// Posting list for one term: (document id, raw occurrence count), ids
/// ascending. Every listed document contains the term at least once.
pub type Postings = Vec<(DocId, u32)>;

/// The frozen search index: everything the query engine needs, read-only.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Index {
    pub titles: BTreeMap<DocId, String>,
    pub stats: BTreeMap<DocId, DocStats>,
    pub terms: BTreeMap<String, Postings>,
}

impl Index {
    pub fn num_docs(&self) -> usize {
        self.titles.len()
    }
}

/// First phase: document ingestion.
///
/// Each `add_document` tokenizes one document, folds its term counts into
/// the term table, and drops the per-document working set. The builder is
/// consumed by [`IndexBuilder::resolve_links`], so later phases cannot run
/// against a corpus that is still being extended.
#[derive(Default)]
pub struct IndexBuilder {
    titles: BTreeMap<DocId, String>,
    title_ids: HashMap<String, DocId>,
    max_freqs: BTreeMap<DocId, u32>,
    terms: BTreeMap<String, Postings>,
    raw_links: BTreeMap<DocId, Vec<String>>,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_document(&mut self, id: DocId, title: &str, text: &str) -> Result<()> {
        if self.titles.contains_key(&id) {
            bail!("duplicate document id {id}");
        }
        if self.title_ids.contains_key(title) {
            bail!("duplicate document title {title:?}");
        }

        let tokens = tokenize_document(title, text);
        let mut counts: HashMap<&str, u32> = HashMap::new();
        for term in &tokens.terms {
            *counts.entry(term.as_str()).or_insert(0) += 1;
        }
        let max_freq = counts.values().copied().max().unwrap_or(0);
        for (term, count) in counts {
            self.terms.entry(term.to_string()).or_default().push((id, count));
        }

        self.max_freqs.insert(id, max_freq);
        self.raw_links.insert(id, tokens.links);
        self.title_ids.insert(title.to_string(), id);
        self.titles.insert(id, title.to_string());
        Ok(())
    }

    /// Second phase: freeze the corpus and resolve the link graph.
    pub fn resolve_links(self) -> LinkedCorpus {
        let graph = resolve_links(&self.raw_links, &self.title_ids);
        let mut terms = self.terms;
        // Documents arrive in corpus order, which need not be id order.
        for postings in terms.values_mut() {
            postings.sort_unstable_by_key(|&(id, _)| id);
        }
        LinkedCorpus {
            titles: self.titles,
            max_freqs: self.max_freqs,
            terms,
            graph,
        }
    }
}

/// Second phase output: frequencies and link graph frozen, authority not yet
/// computed. Consumed by [`LinkedCorpus::rank`].
pub struct LinkedCorpus {
    titles: BTreeMap<DocId, String>,
    max_freqs: BTreeMap<DocId, u32>,
    terms: BTreeMap<String, Postings>,
    graph: LinkGraph,
}

impl LinkedCorpus {
    /// Final phase: run PageRank to convergence and assemble the index.
    pub fn rank(self) -> Index {
        let ranks = pagerank::rank(&self.graph);
        let stats = self
            .max_freqs
            .into_iter()
            .map(|(id, max_freq)| {
                let rank = ranks.get(&id).copied().unwrap_or(0.0);
                (id, DocStats { max_freq, rank })
            })
            .collect();
        Index {
            titles: self.titles,
            stats,
            terms: self.terms,
        }
    }
}
