use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The two record shapes a spreadsheet can be imported as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormType {
    /// A field session: one recording event with date, location, genre, access.
    Session,
    /// A participant: one person who appears in sessions.
    Person,
}

impl FormType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormType::Session => "session",
            FormType::Person => "person",
        }
    }

    /// The target property that acts as the row's uniqueness key.
    ///
    /// Sessions are keyed by `id`; people are keyed by `name`.
    pub fn id_property(&self) -> &'static str {
        match self {
            FormType::Session => "id",
            FormType::Person => "name",
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FormType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "session" | "sessions" => Ok(FormType::Session),
            "person" | "people" | "persons" => Ok(FormType::Person),
            _ => Err(format!("Unknown form type: {s}")),
        }
    }
}
