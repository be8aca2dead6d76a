use crate::core::ConsolidatedCommitMap;
use crate::error::ExtractError;
use chrono::{NaiveDate, NaiveDateTime};
use gitup_core::{Commit, CommitSource, Hash};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::rc::Rc;
use tracing::{debug, info, warn};

static BRANCH_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(ExtractOptions::DEFAULT_BRANCH_PATTERN).expect("valid branch pattern"));
static TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(ExtractOptions::DEFAULT_TAG_PATTERN).expect("valid tag pattern"));

/// What the walker extracts and where it stops
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Commits authored strictly before this instant are left out, along
    /// with their whole ancestry
    pub ignore_before: NaiveDateTime,
    pub branch_pattern: Regex,
    pub tag_pattern: Regex,
}

impl ExtractOptions {
    pub const DEFAULT_BRANCH_PATTERN: &'static str = "^refs/(heads|remotes/origin)/(.*)";
    pub const DEFAULT_TAG_PATTERN: &'static str = "^refs/tags/(.*)";

    pub fn default_cutoff() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            ignore_before: Self::default_cutoff(),
            branch_pattern: BRANCH_PATTERN.clone(),
            tag_pattern: TAG_PATTERN.clone(),
        }
    }
}

/// Builds the consolidated commit graph reachable from every branch and tag
pub struct GitWalker<'a, S: CommitSource> {
    source: &'a mut S,
    options: ExtractOptions,
    map: ConsolidatedCommitMap,
    too_old: HashSet<Hash>,
}

impl<'a, S: CommitSource> GitWalker<'a, S> {
    pub fn new(source: &'a mut S, options: ExtractOptions) -> Self {
        Self {
            source,
            options,
            map: ConsolidatedCommitMap::new(),
            too_old: HashSet::new(),
        }
    }

    /// Walk branches first, then tags, and hand back the finished map
    pub fn extract(mut self) -> Result<ConsolidatedCommitMap, ExtractError> {
        self.extract_branches()?;
        self.extract_tags()?;
        debug_assert!(self.map.is_consistent());
        Ok(self.map)
    }

    fn extract_branches(&mut self) -> Result<(), ExtractError> {
        let branches = self
            .source
            .list_branches()
            .map_err(|source| ExtractError::Listing {
                category: "branches",
                source,
            })?;

        for branch in branches {
            if !self.options.branch_pattern.is_match(&branch.name) {
                debug!(branch = %branch.name, "skipping reference outside the branch namespaces");
                continue;
            }
            info!("branch {}", branch);
            if let Some(hash) = self.find_or_build_by_name(&branch.name) {
                if let Some(node) = self.map.get_mut(&hash) {
                    node.branches.push(branch.name);
                }
            }
        }
        Ok(())
    }

    fn extract_tags(&mut self) -> Result<(), ExtractError> {
        let tags = self
            .source
            .list_tags()
            .map_err(|source| ExtractError::Listing {
                category: "tags",
                source,
            })?;

        for tag in tags {
            if !self.options.tag_pattern.is_match(&tag.name) {
                debug!(tag = %tag.name, "skipping reference outside the tag namespace");
                continue;
            }
            info!("tag {}", tag);
            if let Some(hash) = self.find_or_build_by_name(&tag.name) {
                if let Some(node) = self.map.get_mut(&hash) {
                    node.tags.push(Rc::clone(&tag));
                }
            }
        }
        Ok(())
    }

    fn find_or_build_by_name(&mut self, name: &str) -> Option<Hash> {
        match self.source.commit_by_name(name) {
            Ok(commit) => self.find_or_build(commit),
            Err(err) => {
                warn!(reference = name, error = %err, "failed to read commit, skipping");
                None
            }
        }
    }

    /// Find the node for `tip`, building it and its ancestry when missing.
    ///
    /// Returns `None` when the commit is older than the cutoff.
    fn find_or_build(&mut self, tip: Rc<Commit>) -> Option<Hash> {
        let hash = tip.hash.clone();
        if self.map.contains(&hash) {
            return Some(hash);
        }
        if !self.admit(&tip) {
            return None;
        }

        let mut pending = vec![hash.clone()];
        while let Some(current) = pending.pop() {
            let parents = match self.map.get(&current) {
                Some(node) => node.commit.parents.clone(),
                None => continue,
            };
            for parent in parents.iter() {
                if !self.map.contains(parent) {
                    match self.resolve(parent) {
                        Some(commit) if self.admit(&commit) => pending.push(parent.clone()),
                        _ => continue,
                    }
                }
                self.map.link(&current, parent);
            }
        }
        Some(hash)
    }

    /// Insert a commit unless it is too old
    fn admit(&mut self, commit: &Rc<Commit>) -> bool {
        if commit.when < self.options.ignore_before {
            self.too_old.insert(commit.hash.clone());
            return false;
        }
        debug!(commit = %commit.hash, date = %commit.when, "process commit");
        self.map.insert_commit(Rc::clone(commit));
        true
    }

    fn resolve(&mut self, hash: &Hash) -> Option<Rc<Commit>> {
        if hash.is_empty() || self.too_old.contains(hash) {
            return None;
        }
        match self.source.commit_by_hash(hash) {
            Ok(commit) => Some(commit),
            Err(err) => {
                warn!(commit = %hash, error = %err, "failed to read commit, ancestry stops here");
                None
            }
        }
    }
}
