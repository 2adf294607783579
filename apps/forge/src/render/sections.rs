//! Section Renderers: one pure function per resume section.
//!
//! Every leaf string is escaped exactly once here. Values used only as link
//! targets (`\href{target}{...}`, `mailto:`) are passed through untouched.

use crate::models::resume::{
    ActivityEntry, EducationEntry, ExperienceEntry, Personal, ProjectEntry, SkillCategory,
};
use crate::render::escape::escape_latex;
use crate::render::templates::JOB_SPACING;

/// Characters stripped from the front of an achievement before it becomes a bullet.
const BULLET_MARKERS: &[char] = &['-', '*', '\u{2022}', ' ', '\t'];

pub fn render_header(personal: &Personal) -> String {
    let mut contact = vec![
        escape_latex(&personal.phone),
        format!(
            "\\href{{mailto:{}}}{{{}}}",
            personal.email,
            escape_latex(&personal.email)
        ),
        format!(
            "\\href{{{}}}{{{}}}",
            personal.website,
            escape_latex(display_url(&personal.website))
        ),
    ];
    if let Some(linkedin) = personal.linkedin.as_deref().filter(|l| !l.trim().is_empty()) {
        contact.push(format!(
            "\\href{{{}}}{{{}}}",
            linkedin,
            escape_latex(display_url(linkedin))
        ));
    }
    contact.push(escape_latex(&personal.location));

    format!(
        "\\begin{{center}}\n    \\textbf{{\\LARGE {}}} \\\\ \\vspace{{0.2pt}}\n    \\small {}\n\\end{{center}}",
        escape_latex(&personal.name),
        contact.join(" $|$\n    ")
    )
}

/// Returns `None` when there is nothing to say, so the section is skipped entirely.
pub fn render_summary(summary: Option<&str>) -> Option<String> {
    let text = summary.map(str::trim).filter(|s| !s.is_empty())?;
    Some(format!(
        "\\section*{{\\textbf{{Summary}}}}\n\\small{{{}}}",
        escape_latex(text)
    ))
}

pub fn render_education(education: &[EducationEntry]) -> String {
    let mut content = vec![
        "\\section*{\\textbf{Education}}".to_string(),
        "\\resumeSubHeadingListStart".to_string(),
    ];

    for school in education {
        let degree = match school.gpa.as_deref() {
            Some(gpa) => format!("{}, {{GPA: {}}}", escape_latex(&school.degree), escape_latex(gpa)),
            None => escape_latex(&school.degree),
        };
        content.push("\\resumeSubheading".to_string());
        content.push(format!(
            "{{{}}}{{{}}}",
            escape_latex(&school.name),
            escape_latex(&school.location)
        ));
        content.push(format!("{{{}}}{{{}}}", degree, escape_latex(&school.date)));

        if let Some(courses) = &school.courses {
            let courses = courses.joined();
            if !courses.is_empty() {
                content.push("\\resumeItemListStart".to_string());
                content.push(format!("\\resumeItem{{{}}}", escape_latex(courses)));
                content.push("\\resumeItemListEnd".to_string());
            }
        }
    }

    content.push("\\resumeSubHeadingListEnd".to_string());
    content.join("\n")
}

pub fn render_experience(experience: &[ExperienceEntry]) -> String {
    let mut content = vec![
        "\\section*{\\textbf{Experience}}".to_string(),
        "\\resumeSubHeadingListStart".to_string(),
    ];

    for job in experience {
        content.push("\\resumeSubheading".to_string());
        content.push(format!(
            "{{{}}}{{{}}}",
            escape_latex(&job.title),
            escape_latex(&job.date)
        ));
        content.push(format!(
            "{{{}}}{{{}}}",
            escape_latex(&job.company),
            escape_latex(&job.location)
        ));

        content.push("\\resumeItemListStart".to_string());
        for achievement in &job.achievements {
            content.push(format!(
                "\\resumeItem{{{}}}",
                escape_latex(strip_bullet(achievement))
            ));
        }
        content.push("\\resumeItemListEnd".to_string());
        content.push(JOB_SPACING.to_string());
    }

    content.push("\\resumeSubHeadingListEnd".to_string());
    content.join("\n")
}

pub fn render_projects(projects: &[ProjectEntry]) -> String {
    let mut content = vec![
        "\\section*{\\textbf{Projects}}".to_string(),
        "\\resumeItemListStart{}".to_string(),
    ];

    for project in projects {
        let name = format!("\\textbf{{{}}}", escape_latex(&project.name));
        let title = match project.link.as_deref().filter(|l| !l.trim().is_empty()) {
            Some(link) => format!("\\href{{{link}}}{{{name}}}"),
            None => name,
        };
        content.push(format!(
            "\\resumeItem{{{} | {}}}",
            title,
            escape_latex(&project.description)
        ));
    }

    content.push("\\resumeItemListEnd".to_string());
    content.join("\n")
}

pub fn render_skills(skills: &[SkillCategory]) -> String {
    let mut content = vec![
        "\\section*{\\textbf{Skills}}".to_string(),
        "\\begin{itemize}[leftmargin=0.15in, label={}]".to_string(),
        "\\small{\\item{".to_string(),
    ];

    for category in skills {
        content.push(format!(
            "\\textbf{{{}}}{{: {}}} \\\\",
            escape_latex(&category.name),
            escape_latex(&category.items)
        ));
    }

    content.push("}}".to_string());
    content.push("\\end{itemize}".to_string());
    content.join("\n")
}

pub fn render_activities(activities: &[ActivityEntry]) -> String {
    let mut content = vec![
        "\\section*{\\textbf{Activities \\& Club Involvement}}".to_string(),
        "\\resumeItemListStart{}".to_string(),
    ];

    for activity in activities {
        let description = activity
            .description
            .as_deref()
            .map(escape_latex)
            .unwrap_or_default();
        content.push(format!(
            "\\resumeItem{{\\textbf{{{}}} \\hfill {}\\\\{}}}",
            escape_latex(&activity.name),
            escape_latex(&activity.date),
            description
        ));
    }

    content.push("\\resumeItemListEnd".to_string());
    content.join("\n")
}

/// Display form of a URL: protocol and a leading `www.` removed.
pub fn display_url(url: &str) -> &str {
    let url = url.trim();
    let url = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let url = url.strip_prefix("www.").unwrap_or(url);
    url.strip_suffix('/').unwrap_or(url)
}

fn strip_bullet(achievement: &str) -> &str {
    achievement.trim_start_matches(BULLET_MARKERS).trim()
}
