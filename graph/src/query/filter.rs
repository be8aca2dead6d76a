use crate::core::ConsolidatedCommitMap;

/// Copy of `map` reduced to branch tips and tag targets.
///
/// Dropped commits are spliced out, so the remaining nodes stay connected
/// to their nearest decorated ancestors and descendants.
pub fn keep_only_branches_and_tags(map: &ConsolidatedCommitMap) -> ConsolidatedCommitMap {
    let mut filtered = map.clone();
    filtered.retain_where(|node| node.is_branch() || node.is_tag());
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git_backend::walker::tests::sample_repo;
    use crate::git_backend::{ExtractOptions, GitWalker};
    use crate::core::testing::day;
    use gitup_core::Hash;

    #[test]
    fn test_keeps_decorated_commits_connected() {
        let mut repo = sample_repo();
        let options = ExtractOptions {
            ignore_before: day(0),
            ..ExtractOptions::default()
        };
        let map = GitWalker::new(&mut repo, options).extract().unwrap();

        let filtered = keep_only_branches_and_tags(&map);

        let mut kept: Vec<&str> = filtered.iter().map(|n| n.hash().as_str()).collect();
        kept.sort();
        assert_eq!(kept, vec!["b", "e", "m"]);

        let b = filtered.get(&Hash::new("b")).unwrap();
        assert_eq!(b.children.to_vec(), vec![Hash::new("e"), Hash::new("m")]);
        assert!(filtered.is_consistent());
        assert_eq!(map.len(), 6);
    }
}
