use anyhow::{Context, Result};
use graph::render::{
    changelog_file_name, collect_changelogs, render_branches_diagram, render_changelog, render_graph_diagram,
};
use graph::{group_removable_commits, ConsolidatedCommitMap, RenderOptions};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

pub const BRANCHES_FILE: &str = "BRANCHES.md";
pub const GRAPH_FILE: &str = "Graph.md";

/// Writes the markdown reports into one output directory
pub struct Exporter {
    output_dir: PathBuf,
    options: RenderOptions,
}

impl Exporter {
    pub fn new<P: AsRef<Path>>(output_dir: P, options: RenderOptions) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            options,
        }
    }

    /// One `CHANGELOG-<tag>.md` per tag
    pub fn write_changelogs(&self, map: &ConsolidatedCommitMap) -> Result<Vec<PathBuf>> {
        collect_changelogs(map)
            .iter()
            .map(|changelog| {
                let name = changelog_file_name(&changelog.tag.name);
                self.write(&name, &render_changelog(changelog, &self.options))
            })
            .collect()
    }

    /// Diagram restricted to branch tips and tag targets
    pub fn write_branches_diagram(&self, map: &ConsolidatedCommitMap) -> Result<PathBuf> {
        self.write(BRANCHES_FILE, &render_branches_diagram(map, &self.options))
    }

    /// Diagram of the whole graph, with plain commit runs collapsed
    pub fn write_graph_diagram(&self, map: &ConsolidatedCommitMap) -> Result<PathBuf> {
        let reduced = group_removable_commits(map);
        info!(
            before = map.len(),
            after = reduced.len(),
            "collapsed linear commit runs"
        );
        self.write(GRAPH_FILE, &render_graph_diagram(&reduced, &self.options))
    }

    fn write(&self, file_name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.output_dir.join(file_name);
        let file = File::create(&path).with_context(|| format!("Could not create {}", path.display()))?;

        let mut writer = BufWriter::new(file);
        writer
            .write_all(contents.as_bytes())
            .and_then(|_| writer.flush())
            .with_context(|| format!("Could not write {}", path.display()))?;

        info!(file = %path.display(), "written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use gitup_core::{Commit, Hash, Tag};
    use pretty_assertions::assert_eq;
    use std::rc::Rc;
    use tempfile::TempDir;

    fn commit(hash: &str, parents: &[&str], day: u32, subject: &str) -> Rc<Commit> {
        Rc::new(Commit {
            hash: Hash::new(hash),
            parents: parents.iter().map(|p| Hash::new(*p)).collect(),
            when: NaiveDate::from_ymd_opt(2024, 3, day)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            author: "Jane Doe".to_string(),
            subject: subject.to_string(),
        })
    }

    /// root <- c1 <- c2 <- c3 <- tip (main, v2), root tagged v1
    fn sample_map() -> ConsolidatedCommitMap {
        let mut map = ConsolidatedCommitMap::new();
        let hashes = ["root000", "c100000", "c200000", "c300000", "tip0000"];
        for (idx, hash) in hashes.iter().enumerate() {
            let parents: Vec<&str> = if idx == 0 { vec![] } else { vec![hashes[idx - 1]] };
            map.insert_commit(commit(hash, &parents, idx as u32 + 1, &format!("feat: step {}", idx)));
            if idx > 0 {
                map.link(&Hash::new(*hash), &Hash::new(hashes[idx - 1]));
            }
        }

        for (hash, name) in [("root000", "v1"), ("tip0000", "release/v2")] {
            let node = map.get_mut(&Hash::new(hash)).unwrap();
            let target = Rc::clone(&node.commit);
            node.tags.push(Rc::new(Tag {
                name: format!("refs/tags/{}", name),
                when: None,
                author: String::new(),
                subject: String::new(),
                commit: target,
            }));
        }
        map.get_mut(&Hash::new("tip0000"))
            .unwrap()
            .branches
            .push("refs/heads/main".to_string());
        map
    }

    #[test]
    fn test_writes_all_reports() {
        let dir = TempDir::new().unwrap();
        let exporter = Exporter::new(dir.path(), RenderOptions::default());
        let map = sample_map();

        let mut changelogs = exporter.write_changelogs(&map).unwrap();
        changelogs.sort();
        let branches = exporter.write_branches_diagram(&map).unwrap();
        let graph = exporter.write_graph_diagram(&map).unwrap();

        assert_eq!(
            changelogs,
            vec![
                dir.path().join("CHANGELOG-release-v2.md"),
                dir.path().join("CHANGELOG-v1.md"),
            ]
        );

        let v2 = std::fs::read_to_string(&changelogs[0]).unwrap();
        assert!(v2.starts_with("# Changelog release/v2\n"));
        assert!(v2.contains("* feat: step 1\n"));
        assert!(!v2.contains("feat: step 0"));

        let branches = std::fs::read_to_string(branches).unwrap();
        assert!(branches.starts_with("# GIT branches and tags\n"));
        assert!(branches.contains("    IDroot000 --> IDtip0000\n"));

        let graph = std::fs::read_to_string(graph).unwrap();
        assert!(graph.starts_with("```mermaid\nflowchart BT\n"));
        assert!(graph.contains("(3 commits)"));
        assert!(!graph.contains("IDc200000"));
    }

    #[test]
    fn test_existing_files_are_overwritten() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(GRAPH_FILE), "stale content that is long enough").unwrap();
        let exporter = Exporter::new(dir.path(), RenderOptions::default());

        exporter.write_graph_diagram(&ConsolidatedCommitMap::new()).unwrap();

        let content = std::fs::read_to_string(dir.path().join(GRAPH_FILE)).unwrap();
        assert_eq!(content, "```mermaid\nflowchart BT\n```\n");
    }

    #[test]
    fn test_missing_output_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let exporter = Exporter::new(dir.path().join("missing"), RenderOptions::default());

        let err = exporter.write_branches_diagram(&sample_map()).unwrap_err();
        assert!(err.to_string().contains("Could not create"));
    }
}
