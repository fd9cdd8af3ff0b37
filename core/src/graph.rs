use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::DocId;

/// Resolved outbound links per document, ids ascending for deterministic
/// iteration.
pub type LinkGraph = BTreeMap<DocId, BTreeSet<DocId>>;

/// Resolve raw link targets to document ids.
///
/// Targets without an exact title match are dropped, as are self-links. A
/// document whose resolved set ends up empty is treated as linking to every
/// other document, so the graph never has a true sink.
pub fn resolve_links(
    raw_links: &BTreeMap<DocId, Vec<String>>,
    title_ids: &HashMap<String, DocId>,
) -> LinkGraph {
    let all_ids: Vec<DocId> = raw_links.keys().copied().collect();
    let mut graph = LinkGraph::new();
    for (&id, targets) in raw_links {
        let mut outbound: BTreeSet<DocId> = targets
            .iter()
            .filter_map(|target| title_ids.get(target.as_str()).copied())
            .filter(|&target_id| target_id != id)
            .collect();
        if outbound.is_empty() {
            // Dangling node: fan out uniformly instead of sinking authority.
            outbound = all_ids.iter().copied().filter(|&other| other != id).collect();
        }
        graph.insert(id, outbound);
    }
    graph
}
