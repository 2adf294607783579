//! Compiler Invoker: the single place that shells out to the LaTeX toolchain.
//!
//! Flow: write `.tex` → compile pass 1 → compile pass 2 → sweep auxiliary files →
//! verify the PDF exists → delete the `.tex` (unless kept).
//!
//! Two passes are for cross-reference resolution, not failure recovery: a failing
//! pass is fatal and never retried. No timeout is applied; a hung compiler blocks
//! the run.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use anyhow::Context;
use chrono::Local;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::errors::ForgeError;
use crate::render::DocumentRenderer;

/// Auxiliary outputs removed after both passes.
pub const AUX_EXTENSIONS: &[&str] = &["aux", "log", "out"];

const COMPILE_PASSES: u8 = 2;

#[derive(Debug, Clone)]
pub struct Compiler {
    program: String,
    /// Arguments placed before the fixed flags, e.g. a script path when `program` is `sh`.
    leading_args: Vec<String>,
    keep_source: bool,
}

impl Compiler {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
            keep_source: false,
        }
    }

    /// Parses a configured command line such as `pdflatex` or `sh ./fake-tex.sh`.
    pub fn from_command_line(command: &str) -> Self {
        let mut words = command.split_whitespace().map(String::from);
        let program = words.next().unwrap_or_else(|| "pdflatex".to_string());
        let mut compiler = Self::new(program);
        compiler.leading_args = words.collect();
        compiler
    }

    pub fn keep_source(mut self, keep: bool) -> Self {
        self.keep_source = keep;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Renders `document` and compiles it into `output_dir`.
    pub async fn compile_document(
        &self,
        document: &dyn DocumentRenderer,
        output_dir: &Path,
    ) -> Result<PathBuf, ForgeError> {
        debug!("Rendering {}", document.label());
        let source = document.render();
        self.compile(&source, output_dir, document.file_stem()).await
    }

    /// Writes `source` to a timestamped `.tex` in `output_dir`, compiles it, and
    /// returns the PDF path.
    pub async fn compile(
        &self,
        source: &str,
        output_dir: &Path,
        stem: &str,
    ) -> Result<PathBuf, ForgeError> {
        let tex_path = self.write_source(source, output_dir, stem).await?;

        for pass in 1..=COMPILE_PASSES {
            self.run_pass(pass, &tex_path, output_dir).await?;
        }

        remove_aux_files(&tex_path).await?;

        let pdf_path = tex_path.with_extension("pdf");
        if !tokio::fs::try_exists(&pdf_path).await? {
            return Err(ForgeError::ArtifactMissing(pdf_path));
        }

        if self.keep_source {
            debug!("Keeping LaTeX source {}", tex_path.display());
        } else {
            tokio::fs::remove_file(&tex_path).await?;
        }

        info!("Compiled {}", pdf_path.display());
        Ok(pdf_path)
    }

    async fn write_source(
        &self,
        source: &str,
        output_dir: &Path,
        stem: &str,
    ) -> Result<PathBuf, ForgeError> {
        tokio::fs::create_dir_all(output_dir).await?;

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let tex_path = output_dir.join(format!("{stem}_{timestamp}.tex"));
        tokio::fs::write(&tex_path, source).await?;

        debug!(
            "Wrote {} bytes of LaTeX to {}",
            source.len(),
            tex_path.display()
        );
        Ok(tex_path)
    }

    async fn run_pass(&self, pass: u8, tex_path: &Path, output_dir: &Path) -> Result<(), ForgeError> {
        debug!("{} pass {pass}/{COMPILE_PASSES} on {}", self.program, tex_path.display());

        let output = Command::new(&self.program)
            .args(&self.leading_args)
            .arg("-interaction=nonstopmode")
            .arg(format!("-output-directory={}", output_dir.display()))
            .arg(tex_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .with_context(|| format!("Failed to launch '{}'", self.program))?;

        if output.status.success() {
            return Ok(());
        }

        let mut captured = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            captured.push_str("\n--- stderr ---\n");
            captured.push_str(&stderr);
        }

        warn!(
            "{} failed on pass {pass}; keeping {} for inspection",
            self.program,
            tex_path.display()
        );

        Err(ForgeError::Compiler {
            pass,
            status: output.status.to_string(),
            output: captured,
        })
    }
}

async fn remove_aux_files(tex_path: &Path) -> Result<(), ForgeError> {
    for ext in AUX_EXTENSIONS {
        let aux = tex_path.with_extension(ext);
        match tokio::fs::remove_file(&aux).await {
            Ok(()) => debug!("Removed {}", aux.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    /// Builds a compiler that runs `script` through `sh`, mimicking pdflatex's
    /// outputs. The script sees the `.tex` path as its last argument.
    fn fake_compiler(dir: &Path, script: &str) -> Compiler {
        let path = dir.join("fake-tex.sh");
        std::fs::write(&path, script).unwrap();
        Compiler::from_command_line(&format!("sh {}", path.display()))
    }

    const PRELUDE: &str = r#"for arg; do tex="$arg"; done
base="${tex%.tex}"
"#;

    fn files_with_extension(dir: &Path, ext: &str) -> Vec<PathBuf> {
        std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some(ext))
            .collect()
    }

    #[tokio::test]
    async fn test_successful_compile_leaves_only_the_artifact() {
        let scripts = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let counter = scripts.path().join("passes");
        let script = format!(
            "{PRELUDE}echo pass >> '{}'\ntouch \"$base.aux\" \"$base.log\" \"$base.out\" \"$base.pdf\"\necho 'Output written'\n",
            counter.display()
        );
        let compiler = fake_compiler(scripts.path(), &script);

        let pdf = compiler
            .compile("\\begin{document}x\\end{document}", out.path(), "resume")
            .await
            .unwrap();

        assert!(pdf.exists());
        assert_eq!(pdf.parent().unwrap(), out.path());
        let name = pdf.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("resume_") && name.ends_with(".pdf"));

        assert_eq!(files_with_extension(out.path(), "pdf").len(), 1);
        for ext in AUX_EXTENSIONS {
            assert!(files_with_extension(out.path(), ext).is_empty(), "{ext} left behind");
        }
        assert!(files_with_extension(out.path(), "tex").is_empty());

        let passes = std::fs::read_to_string(&counter).unwrap();
        assert_eq!(passes.lines().count(), 2);
    }

    #[tokio::test]
    async fn test_keep_source_preserves_tex() {
        let scripts = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let script = format!("{PRELUDE}touch \"$base.pdf\"\n");
        let compiler = fake_compiler(scripts.path(), &script).keep_source(true);

        compiler.compile("x", out.path(), "cover_letter").await.unwrap();

        let tex = files_with_extension(out.path(), "tex");
        assert_eq!(tex.len(), 1);
        assert_eq!(std::fs::read_to_string(&tex[0]).unwrap(), "x");
    }

    #[tokio::test]
    async fn test_failed_compile_surfaces_output_and_produces_no_artifact() {
        let scripts = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let counter = scripts.path().join("passes");
        let script = format!(
            "{PRELUDE}echo pass >> '{}'\necho '! Undefined control sequence.'\necho 'l.3 \\\\bogus' >&2\nexit 1\n",
            counter.display()
        );
        let compiler = fake_compiler(scripts.path(), &script);

        let err = compiler
            .compile("\\bogus", out.path(), "resume")
            .await
            .unwrap_err();

        match err {
            ForgeError::Compiler { pass, output, .. } => {
                assert_eq!(pass, 1);
                assert!(output.contains("! Undefined control sequence."));
                assert!(output.contains("bogus"));
            }
            other => panic!("expected compiler error, got {other:?}"),
        }
        assert!(files_with_extension(out.path(), "pdf").is_empty());
        // The source stays behind for debugging.
        assert_eq!(files_with_extension(out.path(), "tex").len(), 1);
        // No retry after the failing pass.
        let passes = std::fs::read_to_string(&counter).unwrap();
        assert_eq!(passes.lines().count(), 1);
    }

    #[tokio::test]
    async fn test_missing_artifact_is_reported_distinctly() {
        let scripts = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let script = format!("{PRELUDE}touch \"$base.aux\"\nexit 0\n");
        let compiler = fake_compiler(scripts.path(), &script);

        let err = compiler.compile("x", out.path(), "resume").await.unwrap_err();

        assert!(matches!(err, ForgeError::ArtifactMissing(_)));
        assert!(files_with_extension(out.path(), "aux").is_empty());
    }

    #[tokio::test]
    async fn test_unlaunchable_program_is_an_error() {
        let out = tempfile::tempdir().unwrap();
        let compiler = Compiler::new("definitely-not-a-real-latex-binary");

        let err = compiler.compile("x", out.path(), "resume").await.unwrap_err();
        assert!(matches!(err, ForgeError::Internal(_)));
    }

    #[test]
    fn test_from_command_line_splits_leading_args() {
        let compiler = Compiler::from_command_line("sh ./fake.sh");
        assert_eq!(compiler.program(), "sh");
        assert_eq!(compiler.leading_args, vec!["./fake.sh".to_string()]);

        let compiler = Compiler::from_command_line("  ");
        assert_eq!(compiler.program(), "pdflatex");
    }
}
