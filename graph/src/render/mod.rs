pub mod changelog;
pub mod mermaid;
pub mod text;

use once_cell::sync::Lazy;
use regex::Regex;

pub use changelog::{changelog_commits, changelog_file_name, collect_changelogs, render_changelog, Changelog};
pub use mermaid::{render_branches_diagram, render_graph_diagram};
pub use text::{escape_label, link_issues, truncate_text};

/// Timestamp layout used in diagrams and changelogs
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

pub const DEFAULT_ISSUE_BASE_URL: &str = "https://astree-software.atlassian.net/browse/";
pub const DEFAULT_ISSUE_PATTERN: &str = "[A-Z]{2}-[0-9]{4}";
pub const DEFAULT_SUBJECT_WIDTH: usize = 40;

static ISSUE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(DEFAULT_ISSUE_PATTERN).expect("valid issue pattern"));

/// Knobs shared by the diagram and changelog renderers
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Prefix of issue links; the identifier is appended to it
    pub issue_base_url: String,
    pub issue_pattern: Regex,
    /// Maximum width of a commit subject in diagram nodes
    pub subject_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            issue_base_url: DEFAULT_ISSUE_BASE_URL.to_string(),
            issue_pattern: ISSUE_PATTERN.clone(),
            subject_width: DEFAULT_SUBJECT_WIDTH,
        }
    }
}
