pub mod cache;
pub mod command;
pub mod error;
pub mod model;
pub mod query;

pub use cache::Cache;
pub use command::{CommandRunner, GitCommand};
pub use error::{QueryError, Result};
pub use model::{Branch, Commit, Hash, Tag, DATE_FORMAT};
pub use query::{CommitSource, GitQuery};
