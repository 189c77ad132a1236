//! Fixed checker categories.

use crate::error::PyccError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Grouping label used to select several checkers at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Format,
    Lint,
    Type,
    Security,
    Docs,
    Complexity,
}

impl Category {
    /// Every category, in the fixed selection order.
    pub const ALL: [Category; 6] = [
        Self::Format,
        Self::Lint,
        Self::Type,
        Self::Security,
        Self::Docs,
        Self::Complexity,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Format => "format",
            Self::Lint => "lint",
            Self::Type => "type",
            Self::Security => "security",
            Self::Docs => "docs",
            Self::Complexity => "complexity",
        }
    }

    /// Heading used when listing checkers.
    pub fn heading(self) -> String {
        format!("{} CHECKS", self.as_str().to_uppercase())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = PyccError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| PyccError::UnknownCategory { name: s.to_string() })
    }
}
