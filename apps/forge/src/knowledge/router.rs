//! Keyword router: maps a free-text question to one knowledge-base section.
//!
//! Categories are tried in table order and the first match wins. Single-word
//! keywords match whole words; multi-word keywords match as phrases. Nothing is
//! combined across categories.

use crate::knowledge::base::{KnowledgeBase, ALL};
use crate::knowledge::prompts::{fill, QUESTION_FALLBACK_PROMPT};
use crate::knowledge::tools::section_response;

#[derive(Debug, Clone, Copy)]
pub struct Route {
    pub category: &'static str,
    pub section: &'static str,
    pub keywords: &'static [&'static str],
}

pub const ROUTES: &[Route] = &[
    Route {
        category: "contact",
        section: "personal",
        keywords: &[
            "contact", "email", "phone", "address", "linkedin", "website", "reach",
            "personal", "name", "location", "live",
        ],
    },
    Route {
        category: "bio",
        section: "summary",
        keywords: &["bio", "summary", "about", "background", "introduce", "yourself", "overview"],
    },
    Route {
        category: "education",
        section: "education",
        keywords: &[
            "education", "degree", "university", "college", "school", "gpa", "major",
            "coursework", "courses", "graduate", "graduation", "study", "studied",
        ],
    },
    Route {
        category: "experience",
        section: "experience",
        keywords: &[
            "experience", "work", "worked", "job", "jobs", "intern", "internship",
            "employment", "employer", "career",
        ],
    },
    Route {
        category: "projects",
        section: "projects",
        keywords: &["project", "projects", "built", "portfolio", "side project"],
    },
    Route {
        category: "skills",
        section: "skills",
        keywords: &[
            "skill", "skills", "language", "languages", "framework", "frameworks",
            "technology", "technologies", "tech stack", "tools", "proficient",
        ],
    },
    Route {
        category: "awards",
        section: "awards",
        keywords: &["award", "awards", "honor", "honors", "prize", "recognition", "dean's list"],
    },
    Route {
        category: "certifications",
        section: "certifications",
        keywords: &["certification", "certifications", "certified", "certificate", "license"],
    },
    Route {
        category: "involvement",
        section: "involvements",
        keywords: &[
            "involvement", "involvements", "club", "clubs", "volunteer", "volunteering",
            "leadership", "organization", "extracurricular", "activities",
        ],
    },
    Route {
        category: "competitions",
        section: "competitions",
        keywords: &["competition", "competitions", "hackathon", "hackathons", "contest", "olympiad"],
    },
    Route {
        category: "scholarships",
        section: "scholarships",
        keywords: &["scholarship", "scholarships", "grant", "fellowship", "financial aid"],
    },
];

/// Lowercased words of `text`, keeping apostrophes inside words.
fn words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|w| w.trim_matches('\''))
        .filter(|w| !w.is_empty())
        .map(String::from)
        .collect()
}

fn matches_keyword(question_words: &[String], keyword: &str) -> bool {
    let keyword_words = words(keyword);
    match keyword_words.len() {
        0 => false,
        1 => question_words.contains(&keyword_words[0]),
        n => question_words.windows(n).any(|window| window == keyword_words.as_slice()),
    }
}

/// The first category whose keywords appear in `question`.
pub fn route(question: &str) -> Option<&'static Route> {
    let question_words = words(question);
    ROUTES.iter().find(|route| {
        route
            .keywords
            .iter()
            .any(|keyword| matches_keyword(&question_words, keyword))
    })
}

/// Answers with the routed section, or frames the whole record as a QA prompt.
pub fn answer_question(kb: &KnowledgeBase, question: &str) -> String {
    match route(question) {
        Some(route) => {
            tracing::debug!("Routed question to '{}'", route.category);
            section_response(kb, route.section)
        }
        None => {
            tracing::debug!("No category matched; using full-record prompt");
            fill(
                QUESTION_FALLBACK_PROMPT,
                &[("question", question.trim()), ("section", &kb.lookup(ALL))],
            )
        }
    }
}
