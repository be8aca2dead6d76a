use chrono::NaiveDateTime;
use smallvec::SmallVec;
use std::fmt;
use std::rc::Rc;

/// Timestamp layout requested from git for commits and tags
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Commit identifier as printed by git
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Hash(String);

impl Hash {
    pub fn new(value: impl Into<String>) -> Self {
        Hash(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Abbreviated form, at most 7 characters
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(7) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Hash {
    fn from(value: &str) -> Self {
        Hash(value.to_string())
    }
}

impl From<String> for Hash {
    fn from(value: String) -> Self {
        Hash(value)
    }
}

/// A single commit as reported by `git log -1`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub hash: Hash,
    /// Parent hashes in declaration order (first parent first)
    pub parents: SmallVec<[Hash; 2]>,
    pub when: NaiveDateTime,
    pub author: String,
    pub subject: String,
}

impl fmt::Display for Commit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Commit[{}]{{{} - {}}}",
            self.hash,
            self.author,
            self.when.format(DATE_FORMAT)
        )
    }
}

/// A branch reference and the commit at its tip
#[derive(Debug, Clone)]
pub struct Branch {
    /// Fully qualified name, e.g. `refs/heads/main`
    pub name: String,
    pub commit: Rc<Commit>,
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Branch[{}]{{{}}}", self.name, self.commit.hash.short())
    }
}

/// Tag information
#[derive(Debug, Clone)]
pub struct Tag {
    /// Fully qualified name, e.g. `refs/tags/v1.0`
    pub name: String,
    /// Tagger date, absent for lightweight tags
    pub when: Option<NaiveDateTime>,
    pub author: String,
    pub subject: String,
    pub commit: Rc<Commit>,
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.when {
            Some(when) if !self.author.is_empty() => write!(
                f,
                "Tag[{}]{{{} - {}}}",
                self.name,
                self.author,
                when.format(DATE_FORMAT)
            ),
            _ => write!(f, "Tag[{}]", self.name),
        }
    }
}
