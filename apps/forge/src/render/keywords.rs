//! Keyword extraction for the hidden ATS block appended to resumes.
//!
//! The block sits inside a `comment` environment, so it never renders; it exists
//! for machine parsers reading the LaTeX source or the PDF text layer.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::models::resume::ResumeData;
use crate::render::escape::escape_latex;

/// Dropped regardless of case.
const STOP_WORDS: &[&str] = &["the", "and", "with", "for", "from", "that", "this"];

/// Tokens shorter than this are dropped unless they carry a digit (`3x`).
const MIN_KEYWORD_LEN: usize = 3;

fn bold_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\\textbf\{([^}]+)\}").expect("valid bold regex"))
}

/// Capitalized technical words.
fn word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b[A-Z][A-Za-z0-9./+_-]*[A-Za-z0-9+]").expect("valid word regex")
    })
}

/// Multipliers (`3.5x`), percentages (`30%`) and size units (`2.5GB`). The number
/// must not follow a word character or a dot, so `3.5x` never yields `5x`.
fn figure_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:^|[^\w.])(\d+(?:\.\d+)?(?:[xX]\b|%|[KkMmGgTt][Bb]\b))")
            .expect("valid figure regex")
    })
}

/// Collects keywords from skills, job titles, companies, achievements and
/// project descriptions. Sorted, case-sensitive, each keyword once.
pub fn extract_keywords(data: &ResumeData) -> Vec<String> {
    let mut keywords = BTreeSet::new();

    for category in &data.skills {
        keywords.extend(category.item_list().map(String::from));
    }

    for job in &data.experience {
        keywords.insert(job.title.trim().to_string());
        keywords.insert(job.company.trim().to_string());
        for achievement in &job.achievements {
            collect_from_text(achievement, &mut keywords);
        }
    }

    for project in &data.projects {
        collect_from_text(&project.description, &mut keywords);
    }

    keywords.into_iter().filter(|k| is_keyword(k)).collect()
}

/// Pulls bold-marked terms and technical-looking tokens out of free text.
pub fn collect_from_text(text: &str, keywords: &mut BTreeSet<String>) {
    for caps in bold_regex().captures_iter(text) {
        keywords.insert(caps[1].trim().to_string());
    }
    for token in word_regex().find_iter(text) {
        keywords.insert(token.as_str().to_string());
    }
    for caps in figure_regex().captures_iter(text) {
        keywords.insert(caps[1].to_string());
    }
}

fn is_keyword(keyword: &str) -> bool {
    let long_enough =
        keyword.chars().count() >= MIN_KEYWORD_LEN || keyword.chars().any(|c| c.is_ascii_digit());
    let lower = keyword.to_lowercase();
    !keyword.is_empty() && long_enough && !STOP_WORDS.contains(&lower.as_str())
}

/// Renders the hidden keyword block, or `None` if there are no keywords.
pub fn render_keyword_block(data: &ResumeData) -> Option<String> {
    let keywords = extract_keywords(data);
    if keywords.is_empty() {
        return None;
    }

    let joined = keywords
        .iter()
        .map(escape_latex)
        .collect::<Vec<_>>()
        .join(", ");

    Some(format!(
        "\\begin{{comment}}\nKeywords for ATS Optimization:\n{joined}\n\\end{{comment}}"
    ))
}
