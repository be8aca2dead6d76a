pub mod walker;

pub use walker::{ExtractOptions, GitWalker};
