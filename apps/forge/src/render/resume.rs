//! Resume Document Assembler.
//!
//! Order: preamble → begin → header → [summary] → experience → projects →
//! skills → education → [activities] → [keyword block] → end.

use crate::models::resume::ResumeData;
use crate::render::keywords::render_keyword_block;
use crate::render::sections::{
    render_activities, render_education, render_experience, render_header, render_projects,
    render_skills, render_summary,
};
use crate::render::templates::{DOCUMENT_BEGIN, DOCUMENT_END, RESUME_PREAMBLE};
use crate::render::{join_sections, DocumentRenderer};

pub struct ResumeDocument {
    data: ResumeData,
}

impl ResumeDocument {
    pub fn new(data: ResumeData) -> Self {
        Self { data }
    }
}

impl DocumentRenderer for ResumeDocument {
    fn file_stem(&self) -> &'static str {
        "resume"
    }

    fn label(&self) -> &'static str {
        "Resume"
    }

    fn render(&self) -> String {
        let data = &self.data;

        let mut parts = vec![
            RESUME_PREAMBLE.to_string(),
            DOCUMENT_BEGIN.to_string(),
            render_header(&data.personal),
        ];

        if let Some(summary) = render_summary(data.summary()) {
            parts.push(summary);
        }

        parts.push(render_experience(&data.experience));
        parts.push(render_projects(&data.projects));
        parts.push(render_skills(&data.skills));
        parts.push(render_education(&data.education));

        let activities = data.activities();
        if !activities.is_empty() {
            parts.push(render_activities(activities));
        }

        if let Some(keywords) = render_keyword_block(data) {
            parts.push(keywords);
        }

        parts.push(DOCUMENT_END.to_string());
        join_sections(&parts)
    }
}
