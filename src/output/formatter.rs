//! Display helpers for model output. Nothing here is needed for a run to
//! succeed.

use std::sync::OnceLock;

use chrono::{DateTime, Local};
use regex::Regex;
use serde::Serialize;

const SECTION_KEYWORDS: [&str; 10] = [
    "title:",
    "abstract:",
    "introduction:",
    "literature review:",
    "research questions:",
    "methodology:",
    "timeline:",
    "expected outcomes:",
    "significance:",
    "resources needed:",
];

fn disallowed_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"[^\w\s\-.,:;!?()\[\]"'/]"#).expect("valid character whitelist")
    })
}

fn whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace pattern"))
}

fn heading_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"##?\s+\w+").expect("valid heading pattern"))
}

/// Strips characters outside the whitelist, then collapses whitespace.
/// `clean_text(&clean_text(s)) == clean_text(s)` for any input.
pub fn clean_text(text: &str) -> String {
    let stripped = disallowed_chars().replace_all(text, "");
    whitespace_runs()
        .replace_all(&stripped, " ")
        .trim()
        .to_string()
}

/// Promotes lines that open with a known section keyword to `##` headings.
pub fn format_proposal(proposal: &str) -> String {
    let mut lines = Vec::new();

    for line in proposal.lines() {
        let line = line.trim();
        if line.is_empty() {
            lines.push(String::new());
            continue;
        }

        let lower = line.to_lowercase();
        let is_section = !line.starts_with('#')
            && SECTION_KEYWORDS.iter().any(|k| lower.starts_with(k));

        if is_section {
            lines.push(String::new());
            lines.push(format!("## {}", line));
        } else {
            lines.push(line.to_string());
        }
    }

    lines.join("\n")
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryStats {
    pub generated_at: DateTime<Local>,
    pub word_count: usize,
    pub character_count: usize,
    pub sections_found: usize,
}

pub fn summary_stats(result: &str) -> SummaryStats {
    SummaryStats {
        generated_at: Local::now(),
        word_count: result.split_whitespace().count(),
        character_count: result.chars().count(),
        sections_found: heading_marker().find_iter(result).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("a   b\n\nc"), "a b c");
        assert_eq!(clean_text("  padded\t"), "padded");
    }

    #[test]
    fn test_clean_text_strips_disallowed() {
        assert_eq!(clean_text("a#b"), "ab");
        assert_eq!(clean_text("cost: $5 & up*"), "cost: 5 up");
        assert_eq!(
            clean_text(r#"keep (this) [and] "that" it's a/b - ok? yes! x; y."#),
            r#"keep (this) [and] "that" it's a/b - ok? yes! x; y."#
        );
    }

    #[test]
    fn test_clean_text_keeps_unicode_words() {
        assert_eq!(clean_text("naïve   Größe"), "naïve Größe");
    }

    #[test]
    fn test_clean_text_idempotent() {
        for input in [
            "a # b",
            "**Title**:   Graph  Neural\n\nNetworks",
            "x\t\t@y  %  z",
            "",
            "## Abstract\nSome text & more",
        ] {
            let once = clean_text(input);
            assert_eq!(clean_text(&once), once, "input: {:?}", input);
        }
    }

    #[test]
    fn test_format_proposal_promotes_sections() {
        let formatted = format_proposal("Abstract: this paper...\nplain content line");
        let lines: Vec<_> = formatted.lines().collect();
        assert_eq!(lines, vec!["", "## Abstract: this paper...", "plain content line"]);
    }

    #[test]
    fn test_format_proposal_case_insensitive() {
        let formatted = format_proposal("  EXPECTED OUTCOMES: better models");
        assert!(formatted
            .lines()
            .any(|l| l == "## EXPECTED OUTCOMES: better models"));
    }

    #[test]
    fn test_format_proposal_leaves_other_lines() {
        let input = "## Title: already a heading\nThe methodology: is mentioned mid-line\n\nend";
        assert_eq!(format_proposal(input), input);
    }

    #[test]
    fn test_summary_stats() {
        let stats = summary_stats("# Title\n\n## Abstract\nShort body text.\n### Deep");
        assert_eq!(stats.word_count, 9);
        assert_eq!(stats.character_count, 46);
        // `##?` also matches the tail of `###`
        assert_eq!(stats.sections_found, 3);
    }
}
