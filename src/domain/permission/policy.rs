//! Policy for firing while permission is denied

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::InvalidDeniedPolicyError;

/// What `fire` does when the user has already denied permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeniedPolicy {
    /// Prompt again, exactly as when no decision was made
    #[default]
    Reask,
    /// Do nothing
    Skip,
}

impl DeniedPolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            DeniedPolicy::Reask => "reask",
            DeniedPolicy::Skip => "skip",
        }
    }
}

impl fmt::Display for DeniedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeniedPolicy {
    type Err = InvalidDeniedPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reask" => Ok(DeniedPolicy::Reask),
            "skip" => Ok(DeniedPolicy::Skip),
            _ => Err(InvalidDeniedPolicyError {
                input: s.to_string(),
            }),
        }
    }
}
