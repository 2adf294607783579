use serde::{Deserialize, Serialize};

use crate::models::scalar;

/// Parsed `coverletter.yml`. Mutated in place only by the placeholder resolver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverLetterData {
    pub personal_information: PersonalRecord,
    pub recipient: Recipient,
    pub letter: Letter,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalRecord {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    pub address: PostalAddress,
    pub phone: PhoneNumbers,
    pub email: String,
    pub homepage: String,
    #[serde(default)]
    pub extra_info: Option<String>,
    #[serde(default)]
    pub quote: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostalAddress {
    pub line: String,
    #[serde(deserialize_with = "scalar::text")]
    pub postal_code: String,
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneNumbers {
    #[serde(deserialize_with = "scalar::text")]
    pub mobile: String,
    #[serde(default, deserialize_with = "scalar::optional_text")]
    pub fixed: Option<String>,
    #[serde(default, deserialize_with = "scalar::optional_text")]
    pub fax: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipient {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    pub company: String,
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Letter {
    /// Whatever the file says is discarded; the resolver stamps today's date.
    #[serde(default, deserialize_with = "scalar::optional_text")]
    pub date: Option<String>,
    pub opening: String,
    pub body: String,
    #[serde(default)]
    pub closing: Option<String>,
    pub enclosure: String,
}

impl Letter {
    pub fn closing(&self) -> &str {
        self.closing.as_deref().unwrap_or("Sincerely,")
    }
}
