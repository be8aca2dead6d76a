use super::node::ConsolidatedCommit;
use gitup_core::{Commit, Hash};
use std::collections::hash_map;
use std::collections::HashMap;
use std::rc::Rc;

/// Directed acyclic graph of consolidated commits, indexed by hash.
///
/// Edges are stored on both ends: when `a.parents` contains `b`, then
/// `b.children` contains `a`. Every mutation keeps that symmetric.
#[derive(Debug, Clone, Default)]
pub struct ConsolidatedCommitMap {
    nodes: HashMap<Hash, ConsolidatedCommit>,
}

impl ConsolidatedCommitMap {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, hash: &Hash) -> bool {
        self.nodes.contains_key(hash)
    }

    pub fn get(&self, hash: &Hash) -> Option<&ConsolidatedCommit> {
        self.nodes.get(hash)
    }

    pub fn get_mut(&mut self, hash: &Hash) -> Option<&mut ConsolidatedCommit> {
        self.nodes.get_mut(hash)
    }

    /// Find the node for a commit, creating an unlinked one if needed
    pub fn insert_commit(&mut self, commit: Rc<Commit>) -> &mut ConsolidatedCommit {
        self.nodes
            .entry(commit.hash.clone())
            .or_insert_with(|| ConsolidatedCommit::new(commit))
    }

    /// Add the edge `child -> parent` on both nodes.
    ///
    /// Returns false, leaving the map untouched, when either end is missing.
    pub fn link(&mut self, child: &Hash, parent: &Hash) -> bool {
        if child == parent || !self.contains(child) || !self.contains(parent) {
            return false;
        }
        if let Some(node) = self.nodes.get_mut(child) {
            node.parents.insert(parent.clone());
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.insert(child.clone());
        }
        true
    }

    /// Splice a node out of the graph.
    ///
    /// Its parents inherit its children and its children inherit its
    /// parents, so reachability between the neighbours is preserved.
    pub fn remove(&mut self, hash: &Hash) -> Option<ConsolidatedCommit> {
        let removed = self.nodes.remove(hash)?;

        for parent in &removed.parents {
            if let Some(node) = self.nodes.get_mut(parent) {
                node.children.remove(hash);
                node.children.extend(removed.children.iter().cloned());
            }
        }
        for child in &removed.children {
            if let Some(node) = self.nodes.get_mut(child) {
                node.parents.remove(hash);
                node.parents.extend(removed.parents.iter().cloned());
            }
        }

        Some(removed)
    }

    /// Splice out every node for which `keep` returns false
    pub fn retain_where<F>(&mut self, mut keep: F)
    where
        F: FnMut(&ConsolidatedCommit) -> bool,
    {
        let doomed: Vec<Hash> = self
            .nodes
            .values()
            .filter(|node| !keep(node))
            .map(|node| node.hash().clone())
            .collect();
        for hash in &doomed {
            self.remove(hash);
        }
    }

    pub fn hashes(&self) -> Vec<Hash> {
        self.nodes.keys().cloned().collect()
    }

    pub fn iter(&self) -> hash_map::Values<'_, Hash, ConsolidatedCommit> {
        self.nodes.values()
    }

    /// Nodes ordered by commit date, then hash
    pub fn sorted(&self) -> Vec<&ConsolidatedCommit> {
        let mut nodes: Vec<&ConsolidatedCommit> = self.nodes.values().collect();
        nodes.sort_by(|a, b| a.when().cmp(&b.when()).then_with(|| a.hash().cmp(b.hash())));
        nodes
    }

    /// Check that every edge is recorded on both of its ends and only
    /// points at nodes of this map
    pub fn is_consistent(&self) -> bool {
        self.nodes.values().all(|node| {
            let parents_ok = node.parents.iter().all(|parent| {
                self.nodes
                    .get(parent)
                    .map_or(false, |p| p.children.contains(node.hash()))
            });
            let children_ok = node.children.iter().all(|child| {
                self.nodes
                    .get(child)
                    .map_or(false, |c| c.parents.contains(node.hash()))
            });
            parents_ok && children_ok
        })
    }

    /// Get all root commits (no parents in the map)
    pub fn roots(&self) -> Vec<&ConsolidatedCommit> {
        self.nodes
            .values()
            .filter(|node| node.parents.is_empty())
            .collect()
    }

    /// Get all leaf commits (no children in the map)
    pub fn leaves(&self) -> Vec<&ConsolidatedCommit> {
        self.nodes
            .values()
            .filter(|node| node.children.is_empty())
            .collect()
    }

    /// Get statistics about the graph
    pub fn stats(&self) -> DagStats {
        let nodes = self.nodes.values();
        DagStats {
            total_commits: self.nodes.len(),
            total_edges: nodes.clone().map(|n| n.parents.len()).sum(),
            merge_commits: nodes.clone().filter(|n| n.parents.len() > 1).count(),
            root_commits: self.roots().len(),
            leaf_commits: self.leaves().len(),
            branch_tips: nodes.clone().filter(|n| n.is_branch()).count(),
            tag_targets: nodes.filter(|n| n.is_tag()).count(),
        }
    }
}

impl<'a> IntoIterator for &'a ConsolidatedCommitMap {
    type Item = &'a ConsolidatedCommit;
    type IntoIter = hash_map::Values<'a, Hash, ConsolidatedCommit>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.values()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DagStats {
    pub total_commits: usize,
    pub total_edges: usize,
    pub merge_commits: usize,
    pub root_commits: usize,
    pub leaf_commits: usize,
    pub branch_tips: usize,
    pub tag_targets: usize,
}
