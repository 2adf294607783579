//! Cover Letter Document Assembler.
//!
//! A `CoverLetterDocument` can only be built through [`CoverLetterDocument::resolve`],
//! so every rendered letter has had its placeholders filled and its date stamped.

use crate::errors::ForgeError;
use crate::models::cover_letter::CoverLetterData;
use crate::render::escape::escape_latex;
use crate::render::placeholders::{resolve_placeholders, PlaceholderSource};
use crate::render::sections::display_url;
use crate::render::templates::{COVER_LETTER_PREAMBLE, DOCUMENT_BEGIN, DOCUMENT_END};
use crate::render::{join_sections, DocumentRenderer};

#[derive(Debug)]
pub struct CoverLetterDocument {
    data: CoverLetterData,
}

impl CoverLetterDocument {
    /// Resolves placeholders for `company_name` and wraps the result.
    pub fn resolve(
        mut data: CoverLetterData,
        company_name: &str,
        source: &mut dyn PlaceholderSource,
    ) -> Result<Self, ForgeError> {
        resolve_placeholders(&mut data, company_name, source)?;
        Ok(Self { data })
    }

    fn render_sender(&self) -> String {
        let personal = &self.data.personal_information;

        let mut contact = vec![escape_latex(&personal.phone.mobile)];
        if let Some(fixed) = personal.phone.fixed.as_deref().filter(|f| !f.is_empty()) {
            contact.push(format!("Fixed: {}", escape_latex(fixed)));
        }
        if let Some(fax) = personal.phone.fax.as_deref().filter(|f| !f.is_empty()) {
            contact.push(format!("Fax: {}", escape_latex(fax)));
        }
        contact.push(format!(
            "\\href{{mailto:{}}}{{{}}}",
            personal.email,
            escape_latex(&personal.email)
        ));
        contact.push(format!(
            "\\href{{{}}}{{{}}}",
            personal.homepage,
            escape_latex(display_url(&personal.homepage))
        ));

        let mut lines = vec![format!("\\Large\\bfseries {}\\\\[4pt]", escape_latex(&personal.name))];
        if let Some(title) = personal.title.as_deref().filter(|t| !t.is_empty()) {
            lines.push(format!("\\normalsize\\mdseries {}\\\\[2pt]", escape_latex(title)));
        }
        lines.push(format!(
            "\\normalsize {}\\\\",
            escape_latex(&personal.address.line)
        ));
        lines.push(format!(
            "{}, {}\\\\[4pt]",
            escape_latex(&personal.address.postal_code),
            escape_latex(&personal.address.country)
        ));
        lines.push(contact.join(" $|$ "));
        if let Some(extra) = personal.extra_info.as_deref().filter(|e| !e.trim().is_empty()) {
            lines.push(format!("\\\\[2pt]\\small {}", escape_latex(extra.trim())));
        }

        let mut block = format!(
            "\\begin{{flushright}}\n\\textcolor{{primary}}{{\n{}\n}}\n\\end{{flushright}}",
            lines.join("\n")
        );
        if let Some(quote) = personal.quote.as_deref().filter(|q| !q.is_empty()) {
            block.push_str(&format!(
                "\n\\begin{{flushright}}\\small\\textit{{{}}}\\end{{flushright}}",
                escape_latex(quote)
            ));
        }
        block
    }

    fn render_recipient(&self) -> String {
        let recipient = &self.data.recipient;
        let mut lines = vec![escape_latex(&recipient.name)];
        if let Some(title) = recipient.title.as_deref().filter(|t| !t.is_empty()) {
            lines.push(escape_latex(title));
        }
        lines.push(escape_latex(&recipient.company));
        lines.push(escape_latex(&recipient.address));

        format!("\\vspace{{1em}}\n\\noindent{{\n{}\n}}", lines.join("\\\\\n"))
    }
}

impl DocumentRenderer for CoverLetterDocument {
    fn file_stem(&self) -> &'static str {
        "cover_letter"
    }

    fn label(&self) -> &'static str {
        "Cover letter"
    }

    fn render(&self) -> String {
        let personal = &self.data.personal_information;
        let letter = &self.data.letter;
        let date = letter.date.clone().unwrap_or_default();

        let parts = vec![
            COVER_LETTER_PREAMBLE.to_string(),
            DOCUMENT_BEGIN.to_string(),
            self.render_sender(),
            format!("\\vspace{{1em}}\n\\noindent{{{}}}", escape_latex(date)),
            self.render_recipient(),
            format!("\\vspace{{1.5em}}\n\\noindent {}", escape_latex(&letter.opening)),
            letter.body.trim().to_string(),
            format!("\\vspace{{1em}}\n\\noindent {}", escape_latex(letter.closing())),
            format!("\\vspace{{1.5em}}\n\\noindent {}", escape_latex(&personal.name)),
            format!(
                "\\vspace{{0.5em}}\n\\noindent{{\\textcolor{{accent}}{{\\small{{{}}}}}}}",
                escape_latex(&letter.enclosure)
            ),
            DOCUMENT_END.to_string(),
        ];

        join_sections(&parts)
    }
}
