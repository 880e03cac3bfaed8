use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Agricultural practice being assessed. Unknown but well-formed practice
/// identifiers are kept as `Other` and simply have no catalog regulations.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PracticeType {
    Spraying,
    Fertilization,
    Irrigation,
    Other(String),
}

impl PracticeType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Spraying => "spraying",
            Self::Fertilization => "fertilization",
            Self::Irrigation => "irrigation",
            Self::Other(value) => value,
        }
    }
}

impl fmt::Display for PracticeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PracticeType {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized: String = value
            .trim()
            .chars()
            .flat_map(char::to_lowercase)
            .map(|ch| match ch {
                '-' | ' ' => '_',
                'é' | 'è' | 'ê' => 'e',
                other => other,
            })
            .collect();

        if normalized.is_empty() {
            return Err(DomainError::MissingPracticeType);
        }

        if !normalized.chars().all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_')
        {
            return Err(DomainError::InvalidPracticeType(value.trim().to_string()));
        }

        let practice = match normalized.as_str() {
            "spraying" | "pulverisation" | "traitement" | "phytosanitaire" => Self::Spraying,
            "fertilization" | "fertilisation" | "epandage" => Self::Fertilization,
            "irrigation" | "arrosage" => Self::Irrigation,
            _ => Self::Other(normalized),
        };

        Ok(practice)
    }
}
