//! Section extraction — pulls heading-delimited spans out of the model's reply
//! and splits them into bullet lists or labeled items.
//!
//! The model is asked to answer under bold headings such as `**Motivations:**`.
//! A section runs from just after its marker to the next line starting with
//! `**` (or the end of the text). Nothing here fails: missing or malformed
//! sections degrade to empty values.

use serde::{Deserialize, Serialize};

/// A section body ends at the first line that begins with a bold marker.
const SECTION_BREAK: &str = "\n**";

/// An item of the form `Label (detail)`. `detail` is empty when the line had no parentheses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledItem {
    pub label: String,
    pub detail: String,
}

impl LabeledItem {
    pub fn new(label: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            detail: detail.into(),
        }
    }
}

/// Returns the trimmed body of the first `**<heading>:**` section, or `""` if absent.
///
/// The heading is matched literally and case-sensitively.
pub fn extract_section(text: &str, heading: &str) -> String {
    let marker = format!("**{heading}:**");
    let Some(start) = text.find(&marker) else {
        return String::new();
    };

    let body = &text[start + marker.len()..];
    let end = body.find(SECTION_BREAK).unwrap_or(body.len());
    body[..end].trim().to_string()
}

/// Splits a section into one entry per non-blank line, with bullet glyphs removed.
pub fn extract_bullet_list(section: &str) -> Vec<String> {
    section
        .lines()
        .map(strip_bullet)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Splits a section into `Label (detail)` items, one per non-blank line.
///
/// The split happens at the LAST `(` on the line, so a label that itself
/// contains parentheses keeps everything up to the final opening one.
pub fn extract_key_value_pairs(section: &str) -> Vec<LabeledItem> {
    section
        .lines()
        .map(strip_bullet)
        .filter(|line| !line.is_empty())
        .map(split_labeled_line)
        .collect()
}

fn split_labeled_line(line: &str) -> LabeledItem {
    if line.contains('(') && line.contains(')') {
        if let Some((label, detail)) = line.rsplit_once('(') {
            return LabeledItem::new(label.trim(), detail.trim_matches(')'));
        }
    }
    LabeledItem::new(line, "")
}

/// Strips any run of `•`, `-` and spaces from both ends of a line.
fn strip_bullet(line: &str) -> &str {
    line.trim()
        .trim_matches(|c| matches!(c, '•' | '-' | ' '))
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_RESPONSE: &str = "**Motivations:**\n- Learning new things (reads docs for fun)\n- Community\n\
**Frustrations:**\n• Slow builds (complains weekly)\n\
**Age:** 27\n\
**Occupation:** Backend developer\n\
**Short quote:** \"Ship it\"";

    // ── extract_section ──────────────────────────────────────────────────────

    #[test]
    fn test_extract_section_returns_body_until_next_heading() {
        assert_eq!(
            extract_section(FULL_RESPONSE, "Motivations"),
            "- Learning new things (reads docs for fun)\n- Community"
        );
        assert_eq!(extract_section(FULL_RESPONSE, "Age"), "27");
    }

    #[test]
    fn test_extract_section_last_section_runs_to_end_of_text() {
        assert_eq!(
            extract_section(FULL_RESPONSE, "Short quote"),
            "\"Ship it\""
        );
    }

    #[test]
    fn test_extract_section_missing_heading_is_empty() {
        assert_eq!(extract_section(FULL_RESPONSE, "Location"), "");
        assert_eq!(extract_section("", "Age"), "");
    }

    #[test]
    fn test_extract_section_heading_followed_by_heading_is_empty() {
        let text = "**Age:**\n**Occupation:** Teacher";
        assert_eq!(extract_section(text, "Age"), "");
        assert_eq!(extract_section(text, "Occupation"), "Teacher");
    }

    #[test]
    fn test_extract_section_is_case_sensitive() {
        assert_eq!(extract_section("**age:** 30", "Age"), "");
    }

    #[test]
    fn test_extract_section_treats_heading_literally() {
        let text = "**A.e:** wrong\n**A+e (x)?:** right";
        assert_eq!(extract_section(text, "A+e (x)?"), "right");
        assert_eq!(extract_section("**Age:** 30", "A.e"), "");
    }

    #[test]
    fn test_extract_section_uses_first_occurrence() {
        let text = "**Age:** 30\n**Age:** 40";
        assert_eq!(extract_section(text, "Age"), "30");
    }

    #[test]
    fn test_extract_section_keeps_inline_bold_text() {
        // Only a `**` at the start of a line ends a section.
        let text = "**Archetype:** The **Bold** Explorer\n**Status:** Single";
        assert_eq!(extract_section(text, "Archetype"), "The **Bold** Explorer");
    }

    #[test]
    fn test_extract_section_handles_crlf() {
        let text = "**Age:** 27\r\n**Status:** Married\r\n";
        assert_eq!(extract_section(text, "Age"), "27");
        assert_eq!(extract_section(text, "Status"), "Married");
    }

    // ── extract_bullet_list ──────────────────────────────────────────────────

    #[test]
    fn test_bullet_markers_are_normalized() {
        let items = extract_bullet_list("- Wants approval\n• Wants approval\nWants approval");
        assert_eq!(items, vec!["Wants approval"; 3]);
    }

    #[test]
    fn test_bullet_list_drops_blank_lines() {
        let items = extract_bullet_list("\n- First\n   \n-\n•  \n- Second\n");
        assert_eq!(items, vec!["First", "Second"]);
    }

    #[test]
    fn test_bullet_list_preserves_order_and_inner_hyphens() {
        let items = extract_bullet_list("- Work-life balance\n- A self-hosted setup");
        assert_eq!(items, vec!["Work-life balance", "A self-hosted setup"]);
    }

    #[test]
    fn test_bullet_list_empty_section() {
        assert!(extract_bullet_list("").is_empty());
    }

    // ── extract_key_value_pairs ──────────────────────────────────────────────

    #[test]
    fn test_key_value_splits_label_and_detail() {
        let items = extract_key_value_pairs("- Curiosity (asks many questions)");
        assert_eq!(items, vec![LabeledItem::new("Curiosity", "asks many questions")]);
    }

    #[test]
    fn test_key_value_without_parentheses_has_empty_detail() {
        let items = extract_key_value_pairs("• Community\n- Recognition");
        assert_eq!(
            items,
            vec![
                LabeledItem::new("Community", ""),
                LabeledItem::new("Recognition", "")
            ]
        );
    }

    /// Documented oddity: the split point is the last `(`, so nested
    /// parentheses end up partly in the label.
    #[test]
    fn test_key_value_splits_at_last_open_paren() {
        let items =
            extract_key_value_pairs("Fear of failure (seen in repeated self-doubt (noted twice))");
        assert_eq!(
            items,
            vec![LabeledItem::new(
                "Fear of failure (seen in repeated self-doubt",
                "noted twice"
            )]
        );
    }

    #[test]
    fn test_key_value_requires_both_parens() {
        let items = extract_key_value_pairs("- Unclosed (detail");
        assert_eq!(items, vec![LabeledItem::new("Unclosed (detail", "")]);
    }

    #[test]
    fn test_key_value_skips_blank_lines() {
        let items = extract_key_value_pairs("- One (a)\n\n   \n- Two (b)");
        assert_eq!(items.len(), 2);
        assert_eq!(items[1], LabeledItem::new("Two", "b"));
    }
}
