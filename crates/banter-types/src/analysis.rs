//! Analysis types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique analysis identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnalysisId(pub Uuid);

impl AnalysisId {
    /// Create a new random analysis ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an analysis ID from a string
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for AnalysisId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for AnalysisId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// What kind of input an analysis was created from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisKind {
    /// Pasted conversation text
    Text,
    /// Uploaded screenshot or photo
    Image,
}

impl AnalysisKind {
    /// Get the kind as a storage string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
        }
    }
}

impl std::fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AnalysisKind {
    type Err = AnalysisKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "image" => Ok(Self::Image),
            _ => Err(AnalysisKindParseError(s.to_string())),
        }
    }
}

/// Error parsing an analysis kind string
#[derive(Debug, Clone)]
pub struct AnalysisKindParseError(pub String);

impl std::fmt::Display for AnalysisKindParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid analysis kind: {}", self.0)
    }
}

impl std::error::Error for AnalysisKindParseError {}
