//! Cover letter cleanup: strips model "thinking" artifacts from letter text.
//!
//! Pipeline:
//! 1. Remove `<think>…</think>` reasoning blocks (case-insensitive, multi-line).
//! 2. Scan trimmed lines until the letter's opening is found. Lines before it
//!    are classified by `PRELUDE_RULES`, first matching rule wins.
//! 3. Keep every non-empty line after the opening, in order.
//! 4. Drop prose ahead of the first `Dear <name>,` (or `:`) and collapse runs of
//!    blank lines.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

static REASONING_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<think>.*?</think>").expect("valid reasoning block regex"));

static LEADING_PROSE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)\A.*?(dear [^,\n]+[,:])").expect("valid leading prose regex")
});

static EXCESS_BREAKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n\s*\n").expect("valid line break regex"));

/// Lines before the letter starting with one of these read as model deliberation.
static THINKING_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        (
            "filler_opening",
            r"(?i)^(okay|alright|let me|let's|first|the|looking at|based on|given|considering)",
        ),
        (
            "self_directive",
            r"(?i)^(i need to|i should|i'll|i will|my task|the task|this is about)",
        ),
        (
            "analysis_heading",
            r"(?i)^(analysis|summary|review|assessment|evaluation)",
        ),
        ("enumeration", r"(?i)^(step \d+|point \d+|\d+\.|bullet)"),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, Regex::new(pattern).expect("valid thinking pattern")))
    .collect()
});

/// Lowercase markers that identify the letter's opening line.
const SALUTATION_MARKERS: &[&str] = &[
    "dear hiring manager",
    "dear sir/madam",
    "dear ",
    "to whom it may concern",
];

/// Non-thinking lines longer than this open a letter that has no salutation.
const SUBSTANTIVE_LINE_CHARS: usize = 20;

/// How a line before the letter's opening is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// Empty after trimming; dropped.
    Blank,
    /// Salutation; opens the letter and is kept.
    Salutation,
    /// Model deliberation; dropped.
    Thinking,
    /// Long prose with no salutation seen yet; opens the letter and is kept.
    Substantive,
    /// Short line matching nothing else; dropped.
    Fragment,
}

impl LineClass {
    fn opens_letter(self) -> bool {
        matches!(self, LineClass::Salutation | LineClass::Substantive)
    }
}

pub struct LineRule {
    pub name: &'static str,
    pub class: LineClass,
    matches: fn(&str) -> bool,
}

/// Ordered classification rules for prelude lines. Lines matching none are `Fragment`.
pub const PRELUDE_RULES: &[LineRule] = &[
    LineRule {
        name: "blank",
        class: LineClass::Blank,
        matches: is_blank,
    },
    LineRule {
        name: "salutation",
        class: LineClass::Salutation,
        matches: is_salutation,
    },
    LineRule {
        name: "thinking",
        class: LineClass::Thinking,
        matches: is_thinking,
    },
    LineRule {
        name: "substantive",
        class: LineClass::Substantive,
        matches: is_substantive,
    },
];

fn is_blank(line: &str) -> bool {
    line.is_empty()
}

fn is_salutation(line: &str) -> bool {
    let lower = line.to_lowercase();
    SALUTATION_MARKERS.iter().any(|marker| lower.contains(marker))
}

fn is_thinking(line: &str) -> bool {
    thinking_pattern(line).is_some()
}

fn is_substantive(line: &str) -> bool {
    line.chars().count() > SUBSTANTIVE_LINE_CHARS
}

/// Name of the first thinking pattern matching `line`, if any.
pub fn thinking_pattern(line: &str) -> Option<&'static str> {
    THINKING_PATTERNS
        .iter()
        .find(|(_, re)| re.is_match(line))
        .map(|(name, _)| *name)
}

fn matching_rule(line: &str) -> Option<&'static LineRule> {
    PRELUDE_RULES.iter().find(|rule| (rule.matches)(line))
}

/// Classifies an already-trimmed line seen before the letter's opening.
pub fn classify_line(line: &str) -> LineClass {
    matching_rule(line)
        .map(|rule| rule.class)
        .unwrap_or(LineClass::Fragment)
}

/// Removes every `<think>…</think>` region, however long.
pub fn strip_reasoning_blocks(text: &str) -> String {
    REASONING_BLOCK.replace_all(text, "").into_owned()
}

/// Full cleanup pass applied to every cover letter before it is returned.
pub fn clean_cover_letter(raw: &str) -> String {
    let text = strip_reasoning_blocks(raw);

    let mut kept: Vec<&str> = Vec::new();
    let mut started = false;

    for line in text.lines().map(str::trim) {
        if started {
            if !line.is_empty() {
                kept.push(line);
            }
            continue;
        }

        let rule = matching_rule(line);
        match rule.map(|r| r.class) {
            Some(class) if class.opens_letter() => {
                started = true;
                kept.push(line);
            }
            _ => trace!(
                rule = rule.map_or("fragment", |r| r.name),
                "Dropped line ahead of letter opening"
            ),
        }
    }

    normalize(&kept.join("\n"))
}

fn normalize(text: &str) -> String {
    let text = LEADING_PROSE.replace(text.trim(), "${1}");
    EXCESS_BREAKS.replace_all(&text, "\n\n").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Rule: blank ──────────────────────────────────────────────────────────

    #[test]
    fn test_rule_blank() {
        assert_eq!(classify_line(""), LineClass::Blank);
    }

    // ── Rule: salutation ─────────────────────────────────────────────────────

    #[test]
    fn test_rule_salutation_markers() {
        for line in [
            "Dear Hiring Manager,",
            "DEAR SIR/MADAM,",
            "Dear Ms. Patel,",
            "To Whom It May Concern:",
        ] {
            assert_eq!(classify_line(line), LineClass::Salutation, "{line}");
        }
    }

    #[test]
    fn test_rule_salutation_wins_over_thinking() {
        // "the" is a thinking prefix, but the salutation rule is checked first
        assert_eq!(
            classify_line("The letter: Dear Hiring Manager,"),
            LineClass::Salutation
        );
    }

    #[test]
    fn test_rule_dear_requires_trailing_space() {
        assert_eq!(classify_line("Dearest"), LineClass::Fragment);
    }

    // ── Rule: thinking ───────────────────────────────────────────────────────

    #[test]
    fn test_thinking_pattern_filler_opening() {
        for line in [
            "Okay, here goes",
            "alright then",
            "Let me draft this",
            "Let's write it",
            "First, the greeting",
            "The candidate has ten years of experience",
            "Looking at the resume",
            "Based on the job description, the focus is Rust",
            "Given the requirements",
            "Considering the role",
        ] {
            assert_eq!(thinking_pattern(line), Some("filler_opening"), "{line}");
        }
    }

    #[test]
    fn test_thinking_pattern_self_directive() {
        for line in [
            "I need to highlight leadership",
            "I should mention Kubernetes",
            "I'll start with the greeting",
            "I will keep it short",
            "My task is to write a letter",
            "This is about a backend role",
        ] {
            assert_eq!(thinking_pattern(line), Some("self_directive"), "{line}");
        }
    }

    #[test]
    fn test_thinking_pattern_analysis_heading() {
        for line in ["Analysis:", "Summary of fit", "REVIEW", "Assessment", "Evaluation done"] {
            assert_eq!(thinking_pattern(line), Some("analysis_heading"), "{line}");
        }
    }

    #[test]
    fn test_thinking_pattern_enumeration() {
        for line in ["Step 1: greet", "point 2 - skills", "3. Closing", "Bullet one"] {
            assert_eq!(thinking_pattern(line), Some("enumeration"), "{line}");
        }
    }

    #[test]
    fn test_thinking_patterns_are_anchored_at_line_start() {
        assert_eq!(thinking_pattern("I am writing to apply, okay"), None);
        assert_eq!(thinking_pattern("Sincerely,"), None);
    }

    #[test]
    fn test_rule_thinking_classifies_long_deliberation() {
        assert_eq!(
            classify_line("Based on the resume, the candidate fits well."),
            LineClass::Thinking
        );
    }

    // ── Rule: substantive / fallback ─────────────────────────────────────────

    #[test]
    fn test_rule_substantive_needs_more_than_20_chars() {
        assert_eq!(
            classify_line("I am writing to apply for the role."),
            LineClass::Substantive
        );
        // exactly 20 characters
        assert_eq!(classify_line("Hello there, friend!"), LineClass::Fragment);
    }

    #[test]
    fn test_rules_are_ordered() {
        let names: Vec<_> = PRELUDE_RULES.iter().map(|r| r.name).collect();
        assert_eq!(names, ["blank", "salutation", "thinking", "substantive"]);
    }

    // ── Reasoning blocks ─────────────────────────────────────────────────────

    #[test]
    fn test_strip_reasoning_block_multiline_case_insensitive() {
        let raw = "<THINK>\nline one\nline two\n</Think>Dear Hiring Manager,";
        assert_eq!(strip_reasoning_blocks(raw), "Dear Hiring Manager,");
    }

    #[test]
    fn test_strip_reasoning_blocks_is_non_greedy() {
        let raw = "<think>a</think>keep<think>b\nc</think>also keep";
        assert_eq!(strip_reasoning_blocks(raw), "keepalso keep");
    }

    #[test]
    fn test_strip_reasoning_block_of_any_length() {
        let raw = format!("<think>{}</think>Dear Team,", "x\n".repeat(5000));
        assert_eq!(strip_reasoning_blocks(&raw), "Dear Team,");
    }

    // ── Full pipeline ────────────────────────────────────────────────────────

    #[test]
    fn test_clean_drops_thinking_preamble() {
        let raw = "Okay, let me think.\nDear Hiring Manager,\nI am excited...\nSincerely,\nJane";
        let cleaned = clean_cover_letter(raw);
        assert!(cleaned.starts_with("Dear Hiring Manager,"));
        assert!(cleaned.ends_with("Jane"));
        assert_eq!(
            cleaned,
            "Dear Hiring Manager,\nI am excited...\nSincerely,\nJane"
        );
    }

    #[test]
    fn test_clean_removes_think_block_and_blank_lines() {
        let raw = "<think>\nThe user wants a letter.\n</think>\n\n\nDear Hiring Manager,\n\n\n\nI am thrilled to apply.\n\nBest regards,\nSam";
        assert_eq!(
            clean_cover_letter(raw),
            "Dear Hiring Manager,\nI am thrilled to apply.\nBest regards,\nSam"
        );
    }

    #[test]
    fn test_clean_keeps_thinking_like_lines_after_start() {
        let raw = "Dear Hiring Manager,\nThe role excites me.\n1. Rust\nSincerely,\nAl";
        assert_eq!(clean_cover_letter(raw), raw);
    }

    #[test]
    fn test_clean_starts_on_substantive_line_without_salutation() {
        let raw = "Okay.\nShort bit\nI am writing to express my interest in the role.\nThanks,\nBo";
        assert_eq!(
            clean_cover_letter(raw),
            "I am writing to express my interest in the role.\nThanks,\nBo"
        );
    }

    #[test]
    fn test_clean_trims_prose_before_later_dear_name() {
        // The first substantive line opens the letter, then normalization cuts to "Dear Ana,"
        let raw = "Here is your tailored cover letter for the role:\nDear Ana,\nI would love to join.\nKind regards,\nLee";
        assert_eq!(
            clean_cover_letter(raw),
            "Dear Ana,\nI would love to join.\nKind regards,\nLee"
        );
    }

    #[test]
    fn test_clean_trims_prose_before_dear_name_with_colon() {
        let raw = "Intro prose here for the letter\nDear Ana:\nI would love to join.\nKind regards,\nLee";
        assert_eq!(
            clean_cover_letter(raw),
            "Dear Ana:\nI would love to join.\nKind regards,\nLee"
        );
    }

    #[test]
    fn test_clean_trims_each_line() {
        let raw = "   Dear Hiring Manager,   \n   I am excited to apply here.   ";
        assert_eq!(
            clean_cover_letter(raw),
            "Dear Hiring Manager,\nI am excited to apply here."
        );
    }

    #[test]
    fn test_clean_of_pure_thinking_is_empty() {
        assert_eq!(clean_cover_letter("Okay\nLet me see\nStep 1"), "");
    }

    #[test]
    fn test_normalize_collapses_excess_breaks() {
        assert_eq!(normalize("Dear Al,\n\n\n\nBody"), "Dear Al,\n\nBody");
        assert_eq!(normalize("Dear Al,\n \n\t\nBody"), "Dear Al,\n\nBody");
        assert_eq!(normalize("Dear Al,\n\nBody"), "Dear Al,\n\nBody");
    }
}
