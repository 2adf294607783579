use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable is optional; paths default to the conventional project layout under
/// the base directory.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_dir: PathBuf,
    pub resume_data: PathBuf,
    pub cover_letter_data: PathBuf,
    pub knowledge_base: PathBuf,
    /// Executable invoked for both compile passes.
    pub latex_bin: String,
    /// Keep the generated `.tex` next to the PDF after a successful compile.
    pub keep_tex: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let base_dir = match std::env::var("FORGE_BASE_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => std::env::current_dir().context("Failed to resolve working directory")?,
        };

        Ok(Config {
            resume_data: path_env("FORGE_RESUME_DATA", &base_dir, "resume/resume.yml"),
            cover_letter_data: path_env(
                "FORGE_COVER_LETTER_DATA",
                &base_dir,
                "coverletter/coverletter.yml",
            ),
            knowledge_base: path_env("FORGE_KNOWLEDGE_BASE", &base_dir, "mcp/resume.xml"),
            latex_bin: std::env::var("FORGE_LATEX_BIN").unwrap_or_else(|_| "pdflatex".to_string()),
            keep_tex: std::env::var("FORGE_KEEP_TEX")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            base_dir,
        })
    }
}

/// Reads a path variable; relative values resolve against `base_dir`.
fn path_env(key: &str, base_dir: &Path, default: &str) -> PathBuf {
    let raw = std::env::var(key).unwrap_or_else(|_| default.to_string());
    let path = PathBuf::from(raw);
    if path.is_absolute() {
        path
    } else {
        base_dir.join(path)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag_accepts_common_truthy_values() {
        for value in ["1", "true", "TRUE", " yes ", "on"] {
            assert!(parse_flag(value), "{value:?} should be truthy");
        }
        for value in ["0", "false", "", "nope"] {
            assert!(!parse_flag(value), "{value:?} should be falsy");
        }
    }

    #[test]
    fn test_path_env_resolves_default_against_base() {
        let base = PathBuf::from("/srv/forge");
        let path = path_env("FORGE_TEST_UNSET_VARIABLE", &base, "resume/resume.yml");
        assert_eq!(path, PathBuf::from("/srv/forge/resume/resume.yml"));
    }
}
