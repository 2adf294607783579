use serde::{Deserialize, Serialize};

use crate::models::scalar;

/// Parsed `resume.yml`. Only `personal` is required; every list section defaults
/// to empty and renders in source order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeData {
    pub personal: Personal,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
    #[serde(default)]
    pub skills: Vec<SkillCategory>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub activities: Vec<ActivityEntry>,
    /// Older data files name the activities section `leadership`.
    #[serde(default)]
    pub leadership: Vec<ActivityEntry>,
}

impl ResumeData {
    /// `activities`, falling back to `leadership` when the former is empty.
    pub fn activities(&self) -> &[ActivityEntry] {
        if self.activities.is_empty() {
            &self.leadership
        } else {
            &self.activities
        }
    }

    /// The summary text, if it has any non-whitespace content.
    pub fn summary(&self) -> Option<&str> {
        self.summary
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Personal {
    pub name: String,
    #[serde(deserialize_with = "scalar::text")]
    pub phone: String,
    pub email: String,
    pub website: String,
    #[serde(default)]
    pub linkedin: Option<String>,
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(deserialize_with = "scalar::text")]
    pub date: String,
    #[serde(default)]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    /// Comma-joined, e.g. `"Rust, Go, Python"`.
    pub items: String,
}

impl SkillCategory {
    pub fn item_list(&self) -> impl Iterator<Item = &str> {
        self.items.split(',').map(str::trim).filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationEntry {
    pub name: String,
    pub location: String,
    pub degree: String,
    #[serde(
        rename = "GPA",
        alias = "gpa",
        default,
        deserialize_with = "scalar::optional_text"
    )]
    pub gpa: Option<String>,
    #[serde(deserialize_with = "scalar::text")]
    pub date: String,
    #[serde(default)]
    pub courses: Option<Courses>,
}

/// Coursework may be written as one line or as a list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Courses {
    Line(String),
    List(Vec<String>),
}

impl Courses {
    pub fn joined(&self) -> String {
        match self {
            Courses::Line(line) => line.trim().to_string(),
            Courses::List(items) => items.join(", "),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub name: String,
    #[serde(deserialize_with = "scalar::text")]
    pub date: String,
    #[serde(default)]
    pub description: Option<String>,
}
