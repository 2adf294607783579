//! Tool registry for the knowledge shim.
//!
//! Every tool takes string arguments and returns text, except `refine_all`, which
//! returns a mapping of section name to prompt. Tools never call a model; the
//! prompts are handed back to the calling agent.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::errors::ForgeError;
use crate::knowledge::base::{KnowledgeBase, ALL};
use crate::knowledge::prompts::{
    fill, EXPERIENCE_PROMPT, INVOLVEMENTS_PROMPT, PROJECTS_PROMPT, SKILLS_PROMPT,
    SUMMARY_PROMPT,
};
use crate::knowledge::router::answer_question;

// ────────────────────────────────────────────────────────────────────────────
// Registry
// ────────────────────────────────────────────────────────────────────────────

/// A prompt template that reframes one resume section for a job.
#[derive(Debug, Clone, Copy)]
pub struct Refinement {
    pub section: &'static str,
    /// Argument carrying the section text when the tool is invoked on its own.
    pub argument: &'static str,
    pub prompt: &'static str,
}

pub const SUMMARY: Refinement = Refinement {
    section: "summary",
    argument: "resume_summary",
    prompt: SUMMARY_PROMPT,
};
pub const EXPERIENCE: Refinement = Refinement {
    section: "experience",
    argument: "resume_experience",
    prompt: EXPERIENCE_PROMPT,
};
pub const PROJECTS: Refinement = Refinement {
    section: "projects",
    argument: "resume_projects",
    prompt: PROJECTS_PROMPT,
};
pub const INVOLVEMENTS: Refinement = Refinement {
    section: "involvements",
    argument: "resume_involvements",
    prompt: INVOLVEMENTS_PROMPT,
};
pub const SKILLS: Refinement = Refinement {
    section: "skills",
    argument: "resume_skills",
    prompt: SKILLS_PROMPT,
};

const ALL_REFINEMENTS: [Refinement; 5] = [SUMMARY, EXPERIENCE, PROJECTS, INVOLVEMENTS, SKILLS];

#[derive(Debug, Clone, Copy)]
pub enum ToolKind {
    /// Fixed section, no arguments.
    Section(&'static str),
    /// Section named by the `section` argument.
    AnySection,
    AllSections,
    Lookup,
    Ask,
    Refine(Refinement),
    RefineAll,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub arguments: &'static [&'static str],
    #[serde(skip)]
    pub kind: ToolKind,
}

pub const TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: "get_section",
        description: "Extract one section of the resume: 'experience', 'projects', 'skills', 'summary', 'involvements', or 'all' for the full resume.",
        arguments: &["section"],
        kind: ToolKind::AnySection,
    },
    ToolSpec {
        name: "get_all_sections",
        description: "Get every section of the resume.",
        arguments: &[],
        kind: ToolKind::AllSections,
    },
    ToolSpec {
        name: "get_experience_section",
        description: "Get the experience section of the resume.",
        arguments: &[],
        kind: ToolKind::Section("experience"),
    },
    ToolSpec {
        name: "get_projects_section",
        description: "Get the projects section of the resume.",
        arguments: &[],
        kind: ToolKind::Section("projects"),
    },
    ToolSpec {
        name: "get_skills_section",
        description: "Get the skills section of the resume.",
        arguments: &[],
        kind: ToolKind::Section("skills"),
    },
    ToolSpec {
        name: "get_summary_section",
        description: "Get the summary section of the resume.",
        arguments: &[],
        kind: ToolKind::Section("summary"),
    },
    ToolSpec {
        name: "get_involvements_section",
        description: "Get the involvements section of the resume.",
        arguments: &[],
        kind: ToolKind::Section("involvements"),
    },
    ToolSpec {
        name: "get_awards_section",
        description: "Get the awards section of the resume.",
        arguments: &[],
        kind: ToolKind::Section("awards"),
    },
    ToolSpec {
        name: "get_certifications_section",
        description: "Get the certifications section of the resume.",
        arguments: &[],
        kind: ToolKind::Section("certifications"),
    },
    ToolSpec {
        name: "get_research_section",
        description: "Get the research section of the resume.",
        arguments: &[],
        kind: ToolKind::Section("research"),
    },
    ToolSpec {
        name: "lookup",
        description: "Serialize the record at a dot path such as 'resume.skills', or 'all'. Returns NOT_FOUND when the path does not resolve.",
        arguments: &["path"],
        kind: ToolKind::Lookup,
    },
    ToolSpec {
        name: "answer_question",
        description: "Route a free-text question to the most relevant resume section.",
        arguments: &["question"],
        kind: ToolKind::Ask,
    },
    ToolSpec {
        name: "experience_tool",
        description: "Refine the experience section to highlight relevant experience, achievements, and skills for a job.",
        arguments: &["job_description", "resume_experience"],
        kind: ToolKind::Refine(EXPERIENCE),
    },
    ToolSpec {
        name: "projects_tool",
        description: "Select and refine the most relevant projects for the job description.",
        arguments: &["job_description", "resume_projects"],
        kind: ToolKind::Refine(PROJECTS),
    },
    ToolSpec {
        name: "involvements_tool",
        description: "Refine leadership and involvement activities to emphasize impact and alignment with company values.",
        arguments: &["job_description", "resume_involvements"],
        kind: ToolKind::Refine(INVOLVEMENTS),
    },
    ToolSpec {
        name: "skills_tool",
        description: "Match and reorder skills against the job posting, emphasizing those it mentions.",
        arguments: &["job_description", "resume_skills"],
        kind: ToolKind::Refine(SKILLS),
    },
    ToolSpec {
        name: "summary_tool",
        description: "Rewrite the summary to target a specific job with confidence and relevance.",
        arguments: &["job_description", "resume_summary"],
        kind: ToolKind::Refine(SUMMARY),
    },
    ToolSpec {
        name: "refine_all",
        description: "Refine the summary, experience, projects, involvements, and skills sections against the job description.",
        arguments: &[
            "job_description",
            "experience",
            "projects",
            "involvements",
            "skills",
            "summary",
        ],
        kind: ToolKind::RefineAll,
    },
];

pub fn find_tool(name: &str) -> Option<&'static ToolSpec> {
    TOOLS.iter().find(|tool| tool.name == name)
}

// ────────────────────────────────────────────────────────────────────────────
// Invocation
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ToolOutput {
    Text(String),
    Map(BTreeMap<&'static str, String>),
}

/// Runs the tool called `name` with `args`. Extra arguments are ignored.
pub fn invoke(
    kb: &KnowledgeBase,
    name: &str,
    args: &HashMap<String, String>,
) -> Result<ToolOutput, ForgeError> {
    let tool = find_tool(name).ok_or_else(|| ForgeError::UnknownTool(name.to_string()))?;

    let arg = |argument| required(args, tool.name, argument);

    tracing::debug!("Invoking tool '{}'", tool.name);

    let output = match tool.kind {
        ToolKind::Section(section) => ToolOutput::Text(section_response(kb, section)),
        ToolKind::AnySection => ToolOutput::Text(any_section_response(kb, arg("section")?)),
        ToolKind::AllSections => ToolOutput::Text(all_sections_response(kb)),
        ToolKind::Lookup => ToolOutput::Text(kb.lookup(arg("path")?)),
        ToolKind::Ask => ToolOutput::Text(answer_question(kb, arg("question")?)),
        ToolKind::Refine(refinement) => ToolOutput::Text(refine(
            &refinement,
            arg("job_description")?,
            arg(refinement.argument)?,
        )),
        ToolKind::RefineAll => {
            let job_description = arg("job_description")?;
            let mut prompts = BTreeMap::new();
            for refinement in &ALL_REFINEMENTS {
                let section = arg(refinement.section)?;
                prompts.insert(refinement.section, refine(refinement, job_description, section));
            }
            ToolOutput::Map(prompts)
        }
    };

    Ok(output)
}

fn required<'a>(
    args: &'a HashMap<String, String>,
    tool: &'static str,
    argument: &'static str,
) -> Result<&'a str, ForgeError> {
    args.get(argument)
        .map(String::as_str)
        .ok_or(ForgeError::MissingArgument { tool, argument })
}

/// Frames `section_text` with the refinement prompt for `job_description`.
pub fn refine(refinement: &Refinement, job_description: &str, section_text: &str) -> String {
    fill(
        refinement.prompt,
        &[
            ("job_description", job_description.trim()),
            ("section", section_text.trim()),
        ],
    )
}

/// `"{Title} Section:\n{text}"` or the empty-section message.
pub fn section_response(kb: &KnowledgeBase, section: &str) -> String {
    match kb.section_text(section) {
        Some(text) => format!("{} Section:\n{text}", capitalize(section)),
        None => format!("No content found for {section} section."),
    }
}

fn any_section_response(kb: &KnowledgeBase, section: &str) -> String {
    let section = section.trim();
    match kb.section_text(section) {
        Some(text) => format!("{}:\n{text}", capitalize(section)),
        None => format!("No content found for section: {section}"),
    }
}

fn all_sections_response(kb: &KnowledgeBase) -> String {
    match kb.section_text(ALL) {
        Some(text) => format!("All Sections:\n{text}"),
        None => "No content found for any section.".to_string(),
    }
}

fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn kb() -> KnowledgeBase {
        KnowledgeBase::from_value(json!({
            "resume": {
                "summary": "Distributed systems engineer",
                "experience": {"job": {"title": "SRE", "company": "Acme"}},
                "research": ""
            }
        }))
    }

    fn args(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn text(output: ToolOutput) -> String {
        match output {
            ToolOutput::Text(text) => text,
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_tool_names_are_unique() {
        let mut names: Vec<_> = TOOLS.iter().map(|t| t.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), TOOLS.len());
    }

    #[test]
    fn test_named_section_tools() {
        let kb = kb();
        let output = text(invoke(&kb, "get_experience_section", &HashMap::new()).unwrap());
        assert!(output.starts_with("Experience Section:\n"));
        assert!(output.contains("company: Acme"));

        let output = text(invoke(&kb, "get_research_section", &HashMap::new()).unwrap());
        assert_eq!(output, "No content found for research section.");
    }

    #[test]
    fn test_get_section_uses_argument() {
        let kb = kb();
        let output = text(invoke(&kb, "get_section", &args(&[("section", "SUMMARY")])).unwrap());
        assert_eq!(output, "Summary:\nDistributed systems engineer");

        let output = text(invoke(&kb, "get_section", &args(&[("section", "awards")])).unwrap());
        assert_eq!(output, "No content found for section: awards");
    }

    #[test]
    fn test_get_all_sections() {
        let output = text(invoke(&kb(), "get_all_sections", &HashMap::new()).unwrap());
        assert!(output.starts_with("All Sections:\nresume:"));

        let empty = KnowledgeBase::from_value(json!({}));
        let output = text(invoke(&empty, "get_all_sections", &HashMap::new()).unwrap());
        assert_eq!(output, "No content found for any section.");
    }

    #[test]
    fn test_lookup_tool_never_errors_on_missing_path() {
        let output = text(invoke(&kb(), "lookup", &args(&[("path", "resume.awards")])).unwrap());
        assert_eq!(output, crate::knowledge::base::NOT_FOUND);
    }

    #[test]
    fn test_refinement_tool_frames_both_inputs() {
        let output = text(
            invoke(
                &kb(),
                "summary_tool",
                &args(&[
                    ("job_description", "Platform engineer at Acme"),
                    ("resume_summary", "Distributed systems engineer"),
                ]),
            )
            .unwrap(),
        );
        assert!(output.contains("Job Description:\nPlatform engineer at Acme"));
        assert!(output.contains("Current Summary:\nDistributed systems engineer"));
        assert!(output.ends_with("Return only the revised summary."));
    }

    #[test]
    fn test_refine_all_returns_all_five_prompts() {
        let output = invoke(
            &kb(),
            "refine_all",
            &args(&[
                ("job_description", "JD"),
                ("experience", "E"),
                ("projects", "P"),
                ("involvements", "I"),
                ("skills", "S"),
                ("summary", "M"),
            ]),
        )
        .unwrap();

        let ToolOutput::Map(prompts) = output else {
            panic!("expected a map");
        };
        let keys: Vec<_> = prompts.keys().copied().collect();
        assert_eq!(keys, ["experience", "involvements", "projects", "skills", "summary"]);
        assert!(prompts["projects"].contains("Resume Projects:\nP"));
        assert!(prompts["skills"].contains("Resume Skills:\nS"));
    }

    #[test]
    fn test_unknown_tool_and_missing_argument() {
        let kb = kb();
        assert!(matches!(
            invoke(&kb, "calculator", &HashMap::new()),
            Err(ForgeError::UnknownTool(name)) if name == "calculator"
        ));
        assert!(matches!(
            invoke(&kb, "skills_tool", &args(&[("job_description", "JD")])),
            Err(ForgeError::MissingArgument { tool: "skills_tool", argument: "resume_skills" })
        ));
    }

    #[test]
    fn test_output_serializes_untagged() {
        let text = serde_json::to_value(ToolOutput::Text("hi".into())).unwrap();
        assert_eq!(text, json!("hi"));

        let mut map = BTreeMap::new();
        map.insert("summary", "prompt".to_string());
        let map = serde_json::to_value(ToolOutput::Map(map)).unwrap();
        assert_eq!(map, json!({"summary": "prompt"}));
    }
}
