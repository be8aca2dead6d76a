use super::set::Set;
use chrono::NaiveDateTime;
use gitup_core::{Commit, Hash, Tag};
use std::rc::Rc;

/// A commit in the consolidated graph, with its edges and decorations
#[derive(Debug, Clone)]
pub struct ConsolidatedCommit {
    pub commit: Rc<Commit>,
    /// Parents present in the map
    pub parents: Set<Hash>,
    /// Children present in the map
    pub children: Set<Hash>,
    /// Fully qualified branch names pointing here
    pub branches: Vec<String>,
    pub tags: Vec<Rc<Tag>>,
    /// Replaces the subject when this node stands for a collapsed chain
    pub label: Option<String>,
}

impl ConsolidatedCommit {
    pub fn new(commit: Rc<Commit>) -> Self {
        Self {
            commit,
            parents: Set::new(),
            children: Set::new(),
            branches: Vec::new(),
            tags: Vec::new(),
            label: None,
        }
    }

    pub fn hash(&self) -> &Hash {
        &self.commit.hash
    }

    pub fn when(&self) -> NaiveDateTime {
        self.commit.when
    }

    pub fn subject(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.commit.subject)
    }

    pub fn is_branch(&self) -> bool {
        !self.branches.is_empty()
    }

    pub fn is_tag(&self) -> bool {
        !self.tags.is_empty()
    }

    /// Parents in the order the commit declares them, followed by any parent
    /// edge added by splicing nodes out of the map
    pub fn ordered_parents(&self) -> Vec<&Hash> {
        let declared = &self.commit.parents;
        let mut ordered: Vec<&Hash> = declared
            .iter()
            .filter(|hash| self.parents.contains(hash))
            .collect();
        ordered.extend(self.parents.iter().filter(|hash| !declared.contains(hash)));
        ordered
    }
}
