use std::collections::{BTreeMap, HashMap};

use crate::graph::LinkGraph;
use crate::DocId;

/// Teleport probability of the random surfer.
pub const DAMPING: f64 = 0.15;
/// Euclidean distance between successive iterates at which we stop.
pub const TOLERANCE: f64 = 0.001;

/// Compute the converged authority distribution over the link graph.
///
/// Dense Jacobi iteration: every new iterate reads only the previous one,
/// and each pass is a full O(n^2) sum. Fine for the corpus sizes this engine
/// targets. The result is a probability distribution over document ids.
pub fn rank(graph: &LinkGraph) -> BTreeMap<DocId, f64> {
    let ids: Vec<DocId> = graph.keys().copied().collect();
    let n = ids.len();
    if n == 0 {
        return BTreeMap::new();
    }
    if n == 1 {
        // Single document: the distribution is trivially all of the mass.
        return BTreeMap::from([(ids[0], 1.0)]);
    }

    let positions: HashMap<DocId, usize> =
        ids.iter().enumerate().map(|(idx, &id)| (id, idx)).collect();

    // weights[k][j] is the probability that a surfer at k steps to j.
    let base = DAMPING / n as f64;
    let mut weights = vec![vec![base; n]; n];
    for (k, &from) in ids.iter().enumerate() {
        let outbound = &graph[&from];
        let share = (1.0 - DAMPING) / outbound.len() as f64;
        for to in outbound {
            weights[k][positions[to]] += share;
        }
    }

    let mut ranks = vec![1.0 / n as f64; n];
    let mut iterations = 0usize;
    loop {
        let mut next = vec![0.0; n];
        for (k, row) in weights.iter().enumerate() {
            let mass = ranks[k];
            for (j, weight) in row.iter().enumerate() {
                next[j] += weight * mass;
            }
        }
        let distance = ranks
            .iter()
            .zip(&next)
            .map(|(old, new)| (old - new) * (old - new))
            .sum::<f64>()
            .sqrt();
        ranks = next;
        iterations += 1;
        if distance <= TOLERANCE {
            break;
        }
    }
    tracing::debug!(n, iterations, "pagerank converged");

    ids.into_iter().zip(ranks).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn graph(edges: &[(DocId, &[DocId])]) -> LinkGraph {
        edges
            .iter()
            .map(|(id, out)| (*id, out.iter().copied().collect::<BTreeSet<_>>()))
            .collect()
    }

    fn total(ranks: &BTreeMap<DocId, f64>) -> f64 {
        ranks.values().sum()
    }

    #[test]
    fn ranks_sum_to_one() {
        let g = graph(&[(1, &[2, 3]), (2, &[3]), (3, &[1])]);
        let ranks = rank(&g);
        assert!((total(&ranks) - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn symmetric_cycle_is_uniform() {
        let g = graph(&[(1, &[2]), (2, &[3]), (3, &[1])]);
        let ranks = rank(&g);
        for value in ranks.values() {
            assert!((value - 1.0 / 3.0).abs() < 0.01);
        }
    }

    #[test]
    fn dangling_node_redistributes_instead_of_trapping() {
        // 3 links nowhere; after resolution it fans out to 1 and 2, so its
        // authority flows back out instead of accumulating.
        let g = graph(&[(1, &[2]), (2, &[1]), (3, &[1, 2])]);
        let ranks = rank(&g);
        assert!((total(&ranks) - 1.0).abs() < TOLERANCE);
        assert!(ranks[&3] < ranks[&1]);
        assert!(ranks[&3] < ranks[&2]);
        // Nothing links to 3, so it keeps only roughly the teleport share.
        assert!(ranks[&3] < 0.1);
    }

    #[test]
    fn heavily_linked_document_outranks_the_rest() {
        let g = graph(&[(1, &[4]), (2, &[4]), (3, &[4]), (4, &[1])]);
        let ranks = rank(&g);
        for id in [1, 2, 3] {
            assert!(ranks[&4] > ranks[&id]);
        }
    }

    #[test]
    fn single_document_takes_all_mass() {
        let g = graph(&[(7, &[])]);
        let ranks = rank(&g);
        assert_eq!(ranks.len(), 1);
        assert!((ranks[&7] - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_graph_yields_empty_distribution() {
        assert!(rank(&LinkGraph::new()).is_empty());
    }
}
