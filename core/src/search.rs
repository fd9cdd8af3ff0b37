use std::cmp::Ordering;
use std::collections::HashMap;

use crate::index::Index;
use crate::tokenizer::tokenize_query;
use crate::DocId;

/// How many results a query returns at most.
pub const TOP_K: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub doc_id: DocId,
    pub title: String,
    pub score: f64,
}

/// Read-only scorer over a frozen index.
pub struct Searcher {
    index: Index,
    use_pagerank: bool,
}

impl Searcher {
    pub fn new(index: Index, use_pagerank: bool) -> Self {
        Self { index, use_pagerank }
    }

    /// Score a free-text query and return the top matches, best first.
    ///
    /// Per matching term and document:
    /// `(tf / max_freq) * ln(N / df) * authority`, summed per document.
    /// `None` means no query term matched any document, which is distinct
    /// from a query that matched documents with low scores.
    pub fn search(&self, query: &str) -> Option<Vec<Hit>> {
        let num_docs = self.index.num_docs() as f64;
        let mut scores: HashMap<DocId, f64> = HashMap::new();
        for term in tokenize_query(query) {
            // Unindexed terms are policy, not failure: they contribute nothing.
            let Some(postings) = self.index.terms.get(&term) else {
                continue;
            };
            // df >= 1 here, so the idf is always well defined.
            let idf = (num_docs / postings.len() as f64).ln();
            for &(doc_id, tf) in postings {
                let stats = &self.index.stats[&doc_id];
                let authority = if self.use_pagerank { stats.rank } else { 1.0 };
                let contribution = tf as f64 / stats.max_freq as f64 * idf * authority;
                *scores.entry(doc_id).or_insert(0.0) += contribution;
            }
        }
        if scores.is_empty() {
            return None;
        }

        let mut scored: Vec<(DocId, f64)> = scores.into_iter().collect();
        // Score descending, then id ascending: deterministic regardless of
        // hash iteration order.
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal).then(a.0.cmp(&b.0))
        });
        let hits = scored
            .into_iter()
            .take(TOP_K)
            .map(|(doc_id, score)| Hit {
                doc_id,
                title: self.index.titles[&doc_id].clone(),
                score,
            })
            .collect();
        Some(hits)
    }
}
