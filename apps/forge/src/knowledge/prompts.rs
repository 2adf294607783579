// Prompt templates returned by the refinement tools and the question fallback.
// Placeholders in braces are filled with `fill`; nothing here calls a model.

use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Refines the experience section. Fields: `{job_description}`, `{section}`.
pub const EXPERIENCE_PROMPT: &str = "Job Description:
{job_description}

Resume Experience:
{section}

Task:
Rewrite the experience section to better align with the job role.
Emphasize relevant experience, achievements, and skills.
Remove unrelated content and highlight transferable experience.
Return only the rewritten experience section.";

pub const PROJECTS_PROMPT: &str = "Job Description:
{job_description}

Resume Projects:
{section}

Task:
Identify the 2-3 projects most relevant to the job.
Rewrite them to align with its responsibilities, required skills, and outcomes.
Use action verbs and quantify achievements where possible.
Return only the refined project descriptions.";

pub const INVOLVEMENTS_PROMPT: &str = "Job Description:
{job_description}

Resume Involvements:
{section}

Task:
Highlight leadership and involvements relevant to the company mission, collaboration, or soft skills.
Rewrite them to emphasize impact and alignment with company values.
Return only the revised involvement section.";

pub const SKILLS_PROMPT: &str = "Job Description:
{job_description}

Resume Skills:
{section}

Task:
Reorder, add, or remove skills to match the technical and soft skill requirements in the job.
Emphasize skills mentioned in the job posting.
Return only the revised list of skills.";

pub const SUMMARY_PROMPT: &str = "Job Description:
{job_description}

Current Summary:
{section}

Task:
Rewrite the summary to target this specific job.
Use a confident and professional tone.
Focus on relevant experience, achievements, and motivation for the role.
Return only the revised summary.";

/// Used when no keyword category matches. Fields: `{question}`, `{section}`.
pub const QUESTION_FALLBACK_PROMPT: &str = "Answer the question below using only the resume that follows.
If the resume does not contain the answer, say so.

Question:
{question}

Resume:
{section}";

fn marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{([a-z_]+)\}").expect("valid marker regex"))
}

/// Substitutes `{key}` markers in `template` in one pass. Substituted values are
/// never rescanned; markers without a field are left as written.
pub fn fill(template: &str, fields: &[(&str, &str)]) -> String {
    marker_regex()
        .replace_all(template, |caps: &Captures<'_>| {
            fields
                .iter()
                .find(|(key, _)| *key == &caps[1])
                .map_or_else(|| caps[0].to_string(), |(_, value)| value.to_string())
        })
        .into_owned()
}
