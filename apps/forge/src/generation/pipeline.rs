//! Generation Pipeline. Runs one application: output directory, optional job URL
//! note, then each chosen document.
//!
//! Documents are generated independently. A failure in one is logged and
//! reported in the [`GenerationReport`]; the other still runs.

use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::config::Config;
use crate::errors::ForgeError;
use crate::models::cover_letter::CoverLetterData;
use crate::models::resume::ResumeData;
use crate::records::load_record;
use crate::render::placeholders::PlaceholderSource;
use crate::render::{CoverLetterDocument, ResumeDocument};
use crate::typeset::{build_output_dir, Compiler};

pub const JOB_DESCRIPTION_FILE: &str = "job_description.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DocumentChoice {
    Resume,
    CoverLetter,
    Both,
}

impl DocumentChoice {
    pub const MENU: &'static str = "1. Resume only\n2. Cover Letter only\n3. Both Resume and Cover Letter";

    /// Parses an interactive menu answer (`1`-`3`).
    pub fn from_menu(answer: &str) -> Option<Self> {
        match answer.trim() {
            "1" => Some(Self::Resume),
            "2" => Some(Self::CoverLetter),
            "3" => Some(Self::Both),
            _ => None,
        }
    }

    pub fn includes_resume(self) -> bool {
        matches!(self, Self::Resume | Self::Both)
    }

    pub fn includes_cover_letter(self) -> bool {
        matches!(self, Self::CoverLetter | Self::Both)
    }
}

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub company: String,
    pub role: String,
    pub job_url: Option<String>,
    pub choice: DocumentChoice,
}

#[derive(Debug)]
pub struct DocumentOutcome {
    pub label: &'static str,
    pub result: Result<PathBuf, ForgeError>,
}

#[derive(Debug)]
pub struct GenerationReport {
    pub output_dir: PathBuf,
    pub job_description: Option<PathBuf>,
    pub documents: Vec<DocumentOutcome>,
}

impl GenerationReport {
    pub fn failures(&self) -> usize {
        self.documents.iter().filter(|d| d.result.is_err()).count()
    }
}

/// Runs one generation. Only output directory and job note failures abort the run;
/// per-document failures are collected.
pub async fn run_generation(
    config: &Config,
    compiler: &Compiler,
    request: &GenerationRequest,
    placeholders: &mut dyn PlaceholderSource,
) -> Result<GenerationReport, ForgeError> {
    let output_dir = build_output_dir(&config.base_dir, &request.company, &request.role).await?;

    let job_description = match request.job_url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => Some(write_job_description(&output_dir, url).await?),
        _ => None,
    };

    let mut documents = Vec::new();

    if request.choice.includes_resume() {
        let result = generate_resume(&config.resume_data, compiler, &output_dir).await;
        documents.push(record_outcome("Resume", result));
    }

    if request.choice.includes_cover_letter() {
        let result = generate_cover_letter(
            &config.cover_letter_data,
            &request.company,
            placeholders,
            compiler,
            &output_dir,
        )
        .await;
        documents.push(record_outcome("Cover letter", result));
    }

    Ok(GenerationReport {
        output_dir,
        job_description,
        documents,
    })
}

async fn write_job_description(output_dir: &Path, url: &str) -> Result<PathBuf, ForgeError> {
    let path = output_dir.join(JOB_DESCRIPTION_FILE);
    tokio::fs::write(&path, format!("URL: {url}\n\n")).await?;
    info!("Saved job URL to {}", path.display());
    Ok(path)
}

pub async fn generate_resume(
    data_path: &Path,
    compiler: &Compiler,
    output_dir: &Path,
) -> Result<PathBuf, ForgeError> {
    let data: ResumeData = load_record(data_path, "resume").await?;
    let document = ResumeDocument::new(data);
    compiler.compile_document(&document, output_dir).await
}

pub async fn generate_cover_letter(
    data_path: &Path,
    company: &str,
    placeholders: &mut dyn PlaceholderSource,
    compiler: &Compiler,
    output_dir: &Path,
) -> Result<PathBuf, ForgeError> {
    let data: CoverLetterData = load_record(data_path, "cover letter").await?;
    let document = CoverLetterDocument::resolve(data, company, placeholders)?;
    compiler.compile_document(&document, output_dir).await
}

fn record_outcome(label: &'static str, result: Result<PathBuf, ForgeError>) -> DocumentOutcome {
    match &result {
        Ok(path) => info!("{label} generated: {}", path.display()),
        Err(e) => error!("{label} generation failed: {e}"),
    }
    DocumentOutcome { label, result }
}
