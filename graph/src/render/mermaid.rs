use super::text::{escape_label, short_branch_name, short_tag_name, truncate_text};
use super::{RenderOptions, DISPLAY_DATE_FORMAT};
use crate::core::{ConsolidatedCommit, ConsolidatedCommitMap};
use crate::query::keep_only_branches_and_tags;
use gitup_core::Hash;

/// Markdown document with a bottom-to-top flowchart of the branch tips and
/// tag targets only
pub fn render_branches_diagram(map: &ConsolidatedCommitMap, options: &RenderOptions) -> String {
    let filtered = keep_only_branches_and_tags(map);
    let mut out = String::from("# GIT branches and tags\n");
    out.push_str(&render_flowchart(&filtered, options));
    out
}

/// Fenced flowchart of every commit in `map`
pub fn render_graph_diagram(map: &ConsolidatedCommitMap, options: &RenderOptions) -> String {
    render_flowchart(map, options)
}

fn render_flowchart(map: &ConsolidatedCommitMap, options: &RenderOptions) -> String {
    let nodes = map.sorted();
    let mut out = String::from("```mermaid\nflowchart BT\n");

    for node in &nodes {
        out.push_str(&format!("    {}\n", node_declaration(node, options)));
    }
    for node in &nodes {
        let id = node_id(node.hash());
        for child in &node.children {
            out.push_str(&format!("    {} --> {}\n", id, node_id(child)));
        }
    }

    out.push_str("```\n");
    out
}

pub fn node_id(hash: &Hash) -> String {
    format!("ID{}", hash.short())
}

/// Node with its markdown label; branch tips are drawn square, the rest
/// rounded
fn node_declaration(node: &ConsolidatedCommit, options: &RenderOptions) -> String {
    let (open, close) = if node.is_branch() { ("[", "]") } else { ("([", "])") };

    let mut label = String::new();
    for branch in &node.branches {
        label.push_str(&format!("\n🌳**{}**", short_branch_name(branch)));
    }
    for tag in &node.tags {
        label.push_str(&format!("\n📂*{}*", short_tag_name(&tag.name)));
    }
    label.push('\n');
    label.push_str(&truncate_text(&escape_label(node.subject()), options.subject_width));
    label.push_str(&format!("\n commit {}", node.hash().short()));
    label.push_str(&format!("\n{}", node.when().format(DISPLAY_DATE_FORMAT)));

    format!("{}{}\"`{}`\"{}", node_id(node.hash()), open, label, close)
}
