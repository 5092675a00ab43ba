use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Sex of the respondent. Selects which norm column the clinical cutoffs
/// are read from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    #[default]
    Male,
    Female,
}

impl Sex {
    pub fn label(self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Sex::Male => Sex::Female,
            Sex::Female => Sex::Male,
        }
    }
}

impl FromStr for Sex {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "hombre" | "h" => Ok(Sex::Male),
            "female" | "f" | "mujer" => Ok(Sex::Female),
            // "M" is Male in English but Mujer in Spanish
            "m" => Err(CoreError::AmbiguousSex(s.trim().to_string())),
            other => Err(CoreError::InvalidSex(other.to_string())),
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The person who filled in the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Respondent {
    pub name: String,
    pub sex: Sex,
}
