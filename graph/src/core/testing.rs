//! Builders shared by the unit tests of this crate.

use super::dag::ConsolidatedCommitMap;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use gitup_core::{Commit, Hash, Tag};
use std::rc::Rc;

/// Midnight on 2023-01-01 plus `day` days
pub fn day(day: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("valid test date")
        + Duration::days(day)
}

pub fn commit(hash: &str, parents: &[&str], on: i64) -> Rc<Commit> {
    commit_with_subject(hash, parents, on, &format!("commit {}", hash))
}

pub fn commit_with_subject(hash: &str, parents: &[&str], on: i64, subject: &str) -> Rc<Commit> {
    Rc::new(Commit {
        hash: Hash::new(hash),
        parents: parents.iter().map(|p| Hash::new(*p)).collect(),
        when: day(on),
        author: "Jane Doe".to_string(),
        subject: subject.to_string(),
    })
}

pub fn tag(name: &str, target: Rc<Commit>) -> Rc<Tag> {
    Rc::new(Tag {
        name: format!("refs/tags/{}", name),
        when: Some(day(30)),
        author: "Release Bot".to_string(),
        subject: format!("Release {}", name),
        commit: target,
    })
}

/// A single-parent chain, oldest first: `hashes[0] <- hashes[1] <- ...`
pub fn linear_map(hashes: &[&str]) -> ConsolidatedCommitMap {
    let mut map = ConsolidatedCommitMap::new();
    let mut previous: Option<&str> = None;
    for (idx, hash) in hashes.iter().enumerate() {
        let parents: Vec<&str> = previous.into_iter().collect();
        map.insert_commit(commit(hash, &parents, idx as i64));
        if let Some(parent) = previous {
            map.link(&Hash::new(*hash), &Hash::new(parent));
        }
        previous = Some(*hash);
    }
    map
}
