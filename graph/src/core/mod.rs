pub mod dag;
pub mod node;
pub mod reduce;
pub mod set;

#[cfg(test)]
pub(crate) mod testing;

pub use dag::{ConsolidatedCommitMap, DagStats};
pub use node::ConsolidatedCommit;
pub use reduce::{group_removable_commits, is_removable};
pub use set::Set;
