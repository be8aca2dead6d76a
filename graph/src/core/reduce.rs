use super::dag::ConsolidatedCommitMap;
use super::node::ConsolidatedCommit;
use gitup_core::Hash;

/// A commit that carries no information of its own in a diagram: exactly
/// one parent, exactly one child, no branch and no tag.
pub fn is_removable(node: &ConsolidatedCommit) -> bool {
    node.parents.len() == 1 && node.children.len() == 1 && !node.is_branch() && !node.is_tag()
}

/// Collapse every run of removable commits into a single marker node.
///
/// The oldest commit of a run survives, labeled `(N commits)` where `N`
/// counts the whole run. A removable commit with no removable neighbour is
/// left as is, which makes the reduction idempotent.
pub fn group_removable_commits(map: &ConsolidatedCommitMap) -> ConsolidatedCommitMap {
    let mut reduced = map.clone();
    let mut hashes = reduced.hashes();
    hashes.sort();

    for hash in hashes {
        if reduced.get(&hash).map_or(false, is_removable) {
            collapse_chain(&mut reduced, hash);
        }
    }
    reduced
}

fn collapse_chain(map: &mut ConsolidatedCommitMap, start: Hash) {
    let mut earliest = start;
    while let Some(parent) = removable_neighbour(map, &earliest, Side::Parent) {
        earliest = parent;
    }

    let mut absorbed = 1;
    while let Some(child) = removable_neighbour(map, &earliest, Side::Child) {
        map.remove(&child);
        absorbed += 1;
    }

    if absorbed > 1 {
        if let Some(node) = map.get_mut(&earliest) {
            node.label = Some(format!("({} commits)", absorbed));
        }
    }
}

enum Side {
    Parent,
    Child,
}

fn removable_neighbour(map: &ConsolidatedCommitMap, hash: &Hash, side: Side) -> Option<Hash> {
    let node = map.get(hash)?;
    let neighbour = match side {
        Side::Parent => node.parents.first()?,
        Side::Child => node.children.first()?,
    };
    map.get(neighbour)
        .filter(|candidate| is_removable(candidate))
        .map(|candidate| candidate.hash().clone())
}
