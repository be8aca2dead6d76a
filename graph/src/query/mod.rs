pub mod filter;

pub use filter::keep_only_branches_and_tags;
