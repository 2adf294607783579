//! Placeholder Resolver: fills bracketed tokens in cover letter data before
//! anything is escaped or assembled.
//!
//! Matching is literal substring replacement; tokens carry no pattern syntax.

use std::io::{self, BufRead, Write};

use chrono::Local;
use tracing::{debug, info};

use crate::errors::ForgeError;
use crate::models::cover_letter::CoverLetterData;
use crate::render::escape::escape_latex;

pub const HIRING_MANAGER_TOKEN: &str = "[Hiring Manager's Name]";
pub const COMPANY_ADDRESS_TOKEN: &str = "[Company Address]";
pub const COMPANY_NAME_TOKEN: &str = "[Company Name]";

/// Placeholders whose value must come from outside the data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    HiringManager,
    CompanyAddress,
}

impl Placeholder {
    pub fn prompt(self) -> &'static str {
        match self {
            Placeholder::HiringManager => "Enter hiring manager's name: ",
            Placeholder::CompanyAddress => "Enter company address: ",
        }
    }
}

/// Supplies replacement values. Any text, including empty, is accepted.
pub trait PlaceholderSource {
    fn value_for(&mut self, placeholder: Placeholder) -> Result<String, ForgeError>;
}

/// Blocks on stdin for each value.
pub struct TerminalPrompter;

impl PlaceholderSource for TerminalPrompter {
    fn value_for(&mut self, placeholder: Placeholder) -> Result<String, ForgeError> {
        Ok(prompt_line(placeholder.prompt())?)
    }
}

/// Values supplied up front (CLI flags). Unset values are asked of `fallback`, or
/// resolve to empty text when there is none.
#[derive(Default)]
pub struct PresetAnswers {
    pub hiring_manager: Option<String>,
    pub company_address: Option<String>,
    pub fallback: Option<Box<dyn PlaceholderSource + Send>>,
}

impl PlaceholderSource for PresetAnswers {
    fn value_for(&mut self, placeholder: Placeholder) -> Result<String, ForgeError> {
        let preset = match placeholder {
            Placeholder::HiringManager => self.hiring_manager.clone(),
            Placeholder::CompanyAddress => self.company_address.clone(),
        };
        match (preset, self.fallback.as_mut()) {
            (Some(value), _) => Ok(value),
            (None, Some(fallback)) => fallback.value_for(placeholder),
            (None, None) => Ok(String::new()),
        }
    }
}

/// Prints `question` and reads one trimmed line from stdin.
///
/// Uses `block_in_place` so the read does not stall other runtime workers.
pub fn prompt_line(question: &str) -> io::Result<String> {
    tokio::task::block_in_place(|| {
        let mut stdout = io::stdout();
        stdout.write_all(question.as_bytes())?;
        stdout.flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim().to_string())
    })
}

/// Today's date as stamped on letters.
pub fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Resolves every placeholder in place and stamps today's date.
///
/// The body is authored markup that never passes through the general escaper,
/// so its `%` signs are escaped first and the company name is escaped as it is
/// substituted into it.
pub fn resolve_placeholders(
    data: &mut CoverLetterData,
    company_name: &str,
    source: &mut dyn PlaceholderSource,
) -> Result<(), ForgeError> {
    let letter = &mut data.letter;
    letter.body = letter.body.replace('%', "\\%");

    let recipient = &mut data.recipient;
    if recipient.name.contains(HIRING_MANAGER_TOKEN) {
        let manager = source.value_for(Placeholder::HiringManager)?;
        recipient.name = recipient.name.replace(HIRING_MANAGER_TOKEN, &manager);
        debug!("Resolved hiring manager placeholder");
    }
    if recipient.address.contains(COMPANY_ADDRESS_TOKEN) {
        let address = source.value_for(Placeholder::CompanyAddress)?;
        recipient.address = recipient.address.replace(COMPANY_ADDRESS_TOKEN, &address);
        debug!("Resolved company address placeholder");
    }
    recipient.address = recipient.address.replace(COMPANY_NAME_TOKEN, company_name);
    recipient.company = recipient.company.replace(COMPANY_NAME_TOKEN, company_name);

    letter.date = Some(today());
    letter.opening = letter.opening.replace(COMPANY_NAME_TOKEN, company_name);
    letter.body = letter
        .body
        .replace(COMPANY_NAME_TOKEN, &escape_latex(company_name));

    info!("Cover letter placeholders resolved for {company_name}");
    Ok(())
}
