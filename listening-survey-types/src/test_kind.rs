use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The kind of listening test a questionnaire belongs to.
///
/// Determines the route segment used by the loader and submitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestKind {
    /// Pairwise preference test.
    AbTest,
    /// Absolute category rating test.
    AcrTest,
}

impl TestKind {
    /// The route segment for this kind (`ab-test` or `acr-test`).
    pub fn url_segment(self) -> &'static str {
        match self {
            Self::AbTest => "ab-test",
            Self::AcrTest => "acr-test",
        }
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url_segment())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown test kind '{0}', expected 'ab-test' or 'acr-test'")]
pub struct ParseTestKindError(String);

impl FromStr for TestKind {
    type Err = ParseTestKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ab-test" | "abtest" | "ab" => Ok(Self::AbTest),
            "acr-test" | "acrtest" | "acr" => Ok(Self::AcrTest),
            _ => Err(ParseTestKindError(s.to_string())),
        }
    }
}
