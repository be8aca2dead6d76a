use super::text::{link_issues, short_tag_name};
use super::{RenderOptions, DISPLAY_DATE_FORMAT};
use crate::core::{ConsolidatedCommit, ConsolidatedCommitMap};
use gitup_core::{Hash, Tag};
use std::collections::HashSet;
use std::rc::Rc;

/// Commits released by one tag
#[derive(Debug, Clone)]
pub struct Changelog<'a> {
    pub tag: Rc<Tag>,
    pub commits: Vec<&'a ConsolidatedCommit>,
}

/// One changelog per tag found in `map`, ordered by tagged commit date
pub fn collect_changelogs(map: &ConsolidatedCommitMap) -> Vec<Changelog<'_>> {
    map.sorted()
        .into_iter()
        .filter(|node| node.is_tag())
        .flat_map(|node| {
            let commits = changelog_commits(map, node.hash());
            node.tags.iter().map(move |tag| Changelog {
                tag: Rc::clone(tag),
                commits: commits.clone(),
            })
        })
        .collect()
}

/// Commits from `start` back to, but excluding, the previous tags.
///
/// Depth first, following parents in declaration order (first parent
/// first); every commit appears once.
pub fn changelog_commits<'a>(map: &'a ConsolidatedCommitMap, start: &Hash) -> Vec<&'a ConsolidatedCommit> {
    let mut commits = Vec::new();
    let mut visited: HashSet<&Hash> = HashSet::new();
    let mut pending: Vec<&Hash> = vec![start];

    while let Some(hash) = pending.pop() {
        if !visited.insert(hash) {
            continue;
        }
        let Some(node) = map.get(hash) else {
            continue;
        };
        if hash != start && node.is_tag() {
            continue;
        }
        commits.push(node);
        for parent in node.ordered_parents().into_iter().rev() {
            if !visited.contains(parent) {
                pending.push(parent);
            }
        }
    }
    commits
}

/// File name of the changelog of a tag, e.g. `CHANGELOG-v1.2.md`
pub fn changelog_file_name(tag_name: &str) -> String {
    format!("CHANGELOG-{}.md", short_tag_name(tag_name).replace('/', "-"))
}

pub fn render_changelog(changelog: &Changelog<'_>, options: &RenderOptions) -> String {
    let tag = &changelog.tag;
    let name = short_tag_name(&tag.name);

    let mut out = format!("# Changelog {}\n\n", name);
    out.push_str(&format!("Version {}  \n", name));
    match tag.when {
        Some(when) => out.push_str(&format!(
            "Tagged on *{}* by *{}*.  \n",
            when.format(DISPLAY_DATE_FORMAT),
            tag.author
        )),
        None => out.push_str("Lightweight tag.  \n"),
    }
    if !tag.subject.is_empty() {
        out.push_str(&format!("{}  \n", tag.subject));
    }
    out.push('\n');

    let mut features: Vec<&ConsolidatedCommit> = Vec::new();
    let mut fixes: Vec<&ConsolidatedCommit> = Vec::new();
    let mut others: Vec<&ConsolidatedCommit> = Vec::new();
    for &node in &changelog.commits {
        match node.subject() {
            subject if subject.starts_with("feat") => features.push(node),
            subject if subject.starts_with("fix") => fixes.push(node),
            _ => others.push(node),
        }
    }

    write_section(&mut out, "Features", &features, options);
    write_section(&mut out, "Fix", &fixes, options);
    write_section(&mut out, "Other", &others, options);
    out
}

fn write_section(out: &mut String, title: &str, commits: &[&ConsolidatedCommit], options: &RenderOptions) {
    out.push_str(&format!("## {}\n", title));
    for node in commits {
        let message = node.subject().replace('\n', "\n  ");
        out.push_str(&format!("* {}\n", link_issues(&message, options)));
    }
    out.push('\n');
}
