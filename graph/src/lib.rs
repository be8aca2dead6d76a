pub mod core;
pub mod error;
pub mod git_backend;
pub mod query;
pub mod render;

pub use self::core::{group_removable_commits, ConsolidatedCommit, ConsolidatedCommitMap, DagStats, Set};
pub use error::ExtractError;
pub use git_backend::{ExtractOptions, GitWalker};
pub use query::keep_only_branches_and_tags;
pub use render::RenderOptions;
