use crate::cache::Cache;
use crate::command::CommandRunner;
use crate::error::{QueryError, Result};
use crate::model::{Branch, Commit, Hash, Tag, DATE_FORMAT};
use chrono::NaiveDateTime;
use std::rc::Rc;
use tracing::debug;

const TAG_MARKER: &str = "<TAGINFO>|";
const TAG_FORMAT: &str = "--format=<TAGINFO>|%(refname)|%(taggerdate:format:%Y-%m-%dT%H:%M:%S)|%(taggername)|%(subject)";
const COMMIT_FORMAT: &str = "--pretty=format:%H|%P|%ad|%an|%s";
const COMMIT_DATE: &str = "--date=format:%Y-%m-%dT%H:%M:%S";

/// Read access to the commits, branches and tags of a repository
pub trait CommitSource {
    fn list_branches(&mut self) -> Result<Vec<Branch>>;

    fn list_tags(&mut self) -> Result<Vec<Rc<Tag>>>;

    /// Resolve a branch, tag or hash to the commit it designates
    fn commit_by_name(&mut self, name: &str) -> Result<Rc<Commit>>;

    fn commit_by_hash(&mut self, hash: &Hash) -> Result<Rc<Commit>> {
        self.commit_by_name(hash.as_str())
    }
}

/// Repository query adapter over the `git` command line.
///
/// Every lookup is memoized for the lifetime of the adapter, so a commit
/// reached from several branches costs a single `git` invocation.
pub struct GitQuery<R: CommandRunner> {
    runner: R,
    branches: Cache<String, Branch>,
    commits: Cache<String, Rc<Commit>>,
    /// Tag listing, read at most once
    tags: Option<Vec<Rc<Tag>>>,
}

impl<R: CommandRunner> GitQuery<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            branches: Cache::new(),
            commits: Cache::new(),
            tags: None,
        }
    }

    fn git(&self, args: &[&str]) -> Result<String> {
        self.runner.run("git", args)
    }

    /// Hash of the commit currently checked out
    pub fn head(&self) -> Result<Hash> {
        let output = self.git(&["rev-parse", "HEAD"])?;
        let hash = output.trim();
        if hash.is_empty() {
            return Err(QueryError::Command {
                command: "git rev-parse HEAD".to_string(),
                message: "HEAD hash not found".to_string(),
            });
        }
        Ok(Hash::new(hash))
    }

    /// Resolve a branch by its fully qualified name
    pub fn branch(&mut self, name: &str) -> Result<Branch> {
        let runner = &self.runner;
        let commits = &mut self.commits;
        self.branches.get_or_try_compute(name.to_string(), |name| {
            lookup_commit(runner, commits, name)
                .map(|commit| Branch {
                    name: name.clone(),
                    commit,
                })
                .map_err(|err| QueryError::resolve("branch", name, err))
        })
    }

    fn parse_tag(&mut self, record: &str) -> Result<Rc<Tag>> {
        let fields: Vec<&str> = record.splitn(4, '|').collect();
        if fields.len() < 4 {
            return Err(QueryError::Parse {
                expected: 4,
                found: fields.len(),
                line: record.to_string(),
            });
        }

        let when = parse_optional_date(fields[1], record)?;
        let name = fields[0].trim();
        let commit = self
            .commit_by_name(name)
            .map_err(|err| QueryError::resolve("tag", name, err))?;

        Ok(Rc::new(Tag {
            name: name.to_string(),
            when,
            author: fields[2].trim().to_string(),
            subject: fields[3].trim().to_string(),
            commit,
        }))
    }
}

impl<R: CommandRunner> CommitSource for GitQuery<R> {
    fn list_branches(&mut self) -> Result<Vec<Branch>> {
        let output = self.git(&["for-each-ref", "--format=%(refname)", "refs/heads", "refs/remotes"])?;

        let mut branches = Vec::new();
        for line in output.lines() {
            let name = line.trim();
            if name.is_empty() {
                continue;
            }
            branches.push(self.branch(name)?);
        }
        debug!(count = branches.len(), cached_commits = self.commits.len(), "listed branches");
        Ok(branches)
    }

    fn list_tags(&mut self) -> Result<Vec<Rc<Tag>>> {
        if let Some(tags) = &self.tags {
            return Ok(tags.clone());
        }
        let output = self.git(&["for-each-ref", TAG_FORMAT, "refs/tags"])?;

        let mut tags = Vec::new();
        for record in output.split(TAG_MARKER) {
            let record = record.trim();
            if record.is_empty() {
                continue;
            }
            tags.push(self.parse_tag(record)?);
        }
        debug!(count = tags.len(), cached_commits = self.commits.len(), "listed tags");
        self.tags = Some(tags.clone());
        Ok(tags)
    }

    fn commit_by_name(&mut self, name: &str) -> Result<Rc<Commit>> {
        lookup_commit(&self.runner, &mut self.commits, name)
    }
}

fn lookup_commit<R: CommandRunner>(
    runner: &R,
    commits: &mut Cache<String, Rc<Commit>>,
    name: &str,
) -> Result<Rc<Commit>> {
    if name.is_empty() {
        return Err(QueryError::EmptyReference);
    }
    commits.get_or_try_compute(name.to_string(), |name| fetch_commit(runner, name))
}

fn fetch_commit<R: CommandRunner>(runner: &R, name: &str) -> Result<Rc<Commit>> {
    let output = runner.run("git", &["log", "-1", COMMIT_DATE, COMMIT_FORMAT, name])?;
    parse_commit_line(&output).map(Rc::new)
}

/// Parse one `hash|parents|date|author|subject` line
pub fn parse_commit_line(output: &str) -> Result<Commit> {
    let line = output.trim_end_matches(['\r', '\n']);
    let fields: Vec<&str> = line.splitn(5, '|').collect();
    if fields.len() < 5 {
        return Err(QueryError::Parse {
            expected: 5,
            found: fields.len(),
            line: line.to_string(),
        });
    }

    let date = fields[2].trim();
    let when = NaiveDateTime::parse_from_str(date, DATE_FORMAT).map_err(|source| QueryError::Date {
        value: date.to_string(),
        line: line.to_string(),
        source,
    })?;

    Ok(Commit {
        hash: Hash::new(fields[0].trim()),
        parents: fields[1].split_whitespace().map(Hash::from).collect(),
        when,
        author: fields[3].trim().to_string(),
        subject: fields[4].trim().to_string(),
    })
}

fn parse_optional_date(value: &str, line: &str) -> Result<Option<NaiveDateTime>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDateTime::parse_from_str(value, DATE_FORMAT)
        .map(Some)
        .map_err(|source| QueryError::Date {
            value: value.to_string(),
            line: line.to_string(),
            source,
        })
}
