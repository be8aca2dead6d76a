use super::RenderOptions;
use regex::Captures;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const ELLIPSIS: &str = "...";

/// First line of `text`, cut at a word boundary so that it fits in `max`
/// columns including the trailing ellipsis
pub fn truncate_text(text: &str, max: usize) -> String {
    let line = text.lines().next().unwrap_or("");
    if line.width() < max {
        return line.to_string();
    }

    let budget = max.saturating_sub(ELLIPSIS.len());
    let mut used = 0;
    let mut end = 0;
    for (idx, grapheme) in line.grapheme_indices(true) {
        let width = grapheme.width();
        if used + width > budget {
            break;
        }
        used += width;
        end = idx + grapheme.len();
    }

    let head = &line[..end];
    let cut = head.rfind(' ').unwrap_or(end);
    format!("{}{}", head[..cut].trim_end(), ELLIPSIS)
}

/// Replace the characters that would close a quoted mermaid label
pub fn escape_label(text: &str) -> String {
    text.replace(['`', '"'], "'")
}

/// Turn issue identifiers into markdown links to the tracker.
///
/// Done in one pass over the message, so an identifier repeated several
/// times gets exactly one link per occurrence.
pub fn link_issues(message: &str, options: &RenderOptions) -> String {
    options
        .issue_pattern
        .replace_all(message, |caps: &Captures| {
            let id = &caps[0];
            format!("[{}]({}{})", id, options.issue_base_url, id)
        })
        .into_owned()
}

pub fn short_branch_name(name: &str) -> &str {
    let name = name.strip_prefix("refs/heads/").unwrap_or(name);
    name.strip_prefix("refs/remotes/").unwrap_or(name)
}

pub fn short_tag_name(name: &str) -> &str {
    name.strip_prefix("refs/tags/").unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_unchanged() {
        assert_eq!(truncate_text("fix: small thing", 40), "fix: small thing");
    }

    #[test]
    fn test_truncate_at_word_boundary() {
        let subject = "feat: add the new export pipeline for graphs!";
        assert_eq!(subject.len(), 45);

        let truncated = truncate_text(subject, 40);

        assert_eq!(truncated, "feat: add the new export pipeline...");
        assert!(truncated.width() <= 40);
    }

    #[test]
    fn test_truncate_keeps_first_line_only() {
        assert_eq!(truncate_text("first line\nsecond line", 40), "first line");
    }

    #[test]
    fn test_truncate_without_spaces_cuts_hard() {
        let word = "a".repeat(50);
        let truncated = truncate_text(&word, 10);
        assert_eq!(truncated, "aaaaaaa...");
    }

    #[test]
    fn test_truncate_counts_wide_characters() {
        let text = "日本語 日本語 日本語 日本語";
        let truncated = truncate_text(text, 12);
        assert!(truncated.width() <= 12, "{}", truncated);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_escape_label() {
        assert_eq!(escape_label("use `x` and \"y\""), "use 'x' and 'y'");
    }

    #[test]
    fn test_repeated_issue_is_linked_once_per_occurrence() {
        let options = RenderOptions {
            issue_base_url: "https://tracker.test/browse/".to_string(),
            ..RenderOptions::default()
        };

        let linked = link_issues("fix AG-1234 AG-1234 done", &options);

        assert_eq!(
            linked,
            "fix [AG-1234](https://tracker.test/browse/AG-1234) \
             [AG-1234](https://tracker.test/browse/AG-1234) done"
        );
    }

    #[test]
    fn test_non_matching_identifiers_are_left_alone() {
        let options = RenderOptions::default();
        assert_eq!(link_issues("bump ag-1234 and AG-12", &options), "bump ag-1234 and AG-12");
    }

    #[test]
    fn test_short_names() {
        assert_eq!(short_branch_name("refs/heads/main"), "main");
        assert_eq!(short_branch_name("refs/remotes/origin/dev"), "origin/dev");
        assert_eq!(short_tag_name("refs/tags/v1.2"), "v1.2");
    }
}
