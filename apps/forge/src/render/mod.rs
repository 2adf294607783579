// Document rendering: escaping, per-section renderers, and the two document
// assemblers. Everything here is pure; compilation lives in `typeset`.

pub mod cover_letter;
pub mod escape;
pub mod keywords;
pub mod placeholders;
pub mod resume;
pub mod sections;
pub mod templates;

pub use cover_letter::CoverLetterDocument;
pub use resume::ResumeDocument;

/// A document that can produce complete LaTeX source.
///
/// Implemented once per document type; the shared `typeset::Compiler` turns the
/// output into a PDF.
pub trait DocumentRenderer {
    /// Prefix for the generated `.tex`/`.pdf` file names.
    fn file_stem(&self) -> &'static str;

    /// Human-readable name used in logs and console output.
    fn label(&self) -> &'static str;

    fn render(&self) -> String;
}

/// Joins assembled parts with the blank-line section delimiter.
pub(crate) fn join_sections(parts: &[String]) -> String {
    parts.join("\n\n")
}
