//! Text Escaper: makes arbitrary text safe to drop into a LaTeX document.
//!
//! Backslash and braces are left untouched so authored inline markup such as
//! `\textbf{Rust}` in an achievement survives.

use std::fmt::Display;

/// Literal replacements, applied in order. Each entry replaces every occurrence in
/// a single sweep, so no output of one entry is rescanned by the same entry.
const REPLACEMENTS: &[(&str, &str)] = &[
    ("#", "\\#"),
    ("&", "\\&"),
    ("%", "\\%"),
    ("_", "\\_"),
    ("~", "\\textasciitilde{}"),
    ("<", "\\textless{}"),
    (">", "\\textgreater{}"),
    ("|", "\\textbar{}"),
    ("\"", "''"),
    ("...", "\\ldots{}"),
    ("\u{2212}", "-"), // minus sign
    ("\u{2013}", "-"), // en dash
    ("\u{2014}", "-"), // em dash
];

/// Escapes any displayable value. Never fails.
///
/// Not idempotent for the prefix-escaped characters: escaping `\#` again yields
/// `\\#`. Apply exactly once per leaf field.
pub fn escape_latex(value: impl Display) -> String {
    let mut text = value.to_string();
    for (from, to) in REPLACEMENTS {
        if text.contains(from) {
            text = text.replace(from, to);
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_characters_are_prefixed() {
        assert_eq!(escape_latex("C# & F#"), "C\\# \\& F\\#");
        assert_eq!(escape_latex("50% of snake_case"), "50\\% of snake\\_case");
    }

    #[test]
    fn test_word_form_replacements() {
        assert_eq!(escape_latex("a~b"), "a\\textasciitilde{}b");
        assert_eq!(escape_latex("<x|y>"), "\\textless{}x\\textbar{}y\\textgreater{}");
        assert_eq!(escape_latex("wait..."), "wait\\ldots{}");
    }

    #[test]
    fn test_quotes_become_markup_quote_pair() {
        assert_eq!(escape_latex("\"fast\""), "''fast''");
    }

    #[test]
    fn test_directional_dashes_become_hyphen() {
        assert_eq!(escape_latex("2021 \u{2013} 2023"), "2021 - 2023");
        assert_eq!(escape_latex("a\u{2014}b\u{2212}c"), "a-b-c");
    }

    #[test]
    fn test_non_text_values_are_coerced() {
        assert_eq!(escape_latex(3.9), "3.9");
        assert_eq!(escape_latex(42), "42");
    }

    #[test]
    fn test_inline_markup_survives() {
        assert_eq!(
            escape_latex("Built \\textbf{Rust} services"),
            "Built \\textbf{Rust} services"
        );
    }

    #[test]
    fn test_word_form_replacements_are_idempotent() {
        for raw in ["a~b", "<tag>", "x|y", "\"q\"", "more...", "1\u{2013}2"] {
            let once = escape_latex(raw);
            assert_eq!(escape_latex(&once), once, "re-escaping {raw:?} changed it");
        }
    }

    #[test]
    fn test_prefix_escapes_double_on_second_pass() {
        // The escape marker is emitted once per character; a second pass escapes
        // the already-escaped character again rather than the backslash.
        let once = escape_latex("100%");
        assert_eq!(once, "100\\%");
        assert_eq!(escape_latex(&once), "100\\\\%");
    }

    #[test]
    fn test_later_replacements_do_not_retrigger_earlier_ones() {
        // `|` introduces braces and a backslash; neither is in the table, and the
        // `#` pass already ran, so the output contains exactly one escape each.
        assert_eq!(escape_latex("#|"), "\\#\\textbar{}");
        assert_eq!(escape_latex("_..."), "\\_\\ldots{}");
    }
}
