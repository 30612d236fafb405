//! Architecture requests
//!
//! A request is the validated input of one synthesis call: a project name,
//! a scale tier and a free-text description. Requests are built from a
//! [`RequestDraft`] so that every missing field is rejected before any
//! architecture is produced.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RequestError {
    #[error("Missing required field: project name")]
    MissingProjectName,

    #[error("Missing required field: scale")]
    MissingScale,

    #[error("Missing required field: description")]
    MissingDescription,

    #[error("Description too short: expected at least {min} characters, got {actual}")]
    DescriptionTooShort { min: usize, actual: usize },

    #[error("Invalid scale '{0}': expected small, medium or large")]
    InvalidScale(String),
}

/// Coarse project scale selecting the base architecture template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleTier {
    #[serde(alias = "Small")]
    Small,
    #[serde(alias = "Medium")]
    Medium,
    #[serde(alias = "Large")]
    Large,
}

impl ScaleTier {
    /// All tiers in ascending order
    pub const ALL: [ScaleTier; 3] = [ScaleTier::Small, ScaleTier::Medium, ScaleTier::Large];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScaleTier::Small => "small",
            ScaleTier::Medium => "medium",
            ScaleTier::Large => "large",
        }
    }
}

impl fmt::Display for ScaleTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScaleTier {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "small" => Ok(ScaleTier::Small),
            "medium" => Ok(ScaleTier::Medium),
            "large" => Ok(ScaleTier::Large),
            _ => Err(RequestError::InvalidScale(s.to_string())),
        }
    }
}

/// Unvalidated request fields, as read from flags or a request file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestDraft {
    #[serde(alias = "projectName")]
    pub project_name: Option<String>,

    pub scale: Option<ScaleTier>,

    pub description: Option<String>,
}

impl RequestDraft {
    /// Fills fields that are still missing from `other`
    pub fn or(self, other: RequestDraft) -> Self {
        Self {
            project_name: self.project_name.or(other.project_name),
            scale: self.scale.or(other.scale),
            description: self.description.or(other.description),
        }
    }

    /// Validates the draft into a request
    pub fn build(self) -> Result<ArchitectureRequest, RequestError> {
        let project_name = non_blank(self.project_name).ok_or(RequestError::MissingProjectName)?;
        let scale = self.scale.ok_or(RequestError::MissingScale)?;
        let description = non_blank(self.description).ok_or(RequestError::MissingDescription)?;

        Ok(ArchitectureRequest {
            project_name,
            scale,
            description,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A validated synthesis request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchitectureRequest {
    project_name: String,
    scale: ScaleTier,
    description: String,
}

impl ArchitectureRequest {
    pub fn new(
        project_name: impl Into<String>,
        scale: ScaleTier,
        description: impl Into<String>,
    ) -> Result<Self, RequestError> {
        RequestDraft {
            project_name: Some(project_name.into()),
            scale: Some(scale),
            description: Some(description.into()),
        }
        .build()
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn scale(&self) -> ScaleTier {
        self.scale
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Enforces a caller-chosen minimum description length (in characters)
    pub fn require_description_len(&self, min: usize) -> Result<(), RequestError> {
        let actual = self.description.chars().count();
        if actual < min {
            return Err(RequestError::DescriptionTooShort { min, actual });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_scale() {
        assert_eq!("small".parse::<ScaleTier>().unwrap(), ScaleTier::Small);
        assert_eq!(" Medium ".parse::<ScaleTier>().unwrap(), ScaleTier::Medium);
        assert_eq!("LARGE".parse::<ScaleTier>().unwrap(), ScaleTier::Large);
        assert_eq!(
            "huge".parse::<ScaleTier>(),
            Err(RequestError::InvalidScale("huge".to_string()))
        );
    }

    #[test]
    fn build_valid_request() {
        let request = ArchitectureRequest::new("Todo", ScaleTier::Small, "  a simple todo app ").unwrap();
        assert_eq!(request.project_name(), "Todo");
        assert_eq!(request.scale(), ScaleTier::Small);
        assert_eq!(request.description(), "a simple todo app");
    }

    #[test]
    fn missing_fields_rejected() {
        let draft = RequestDraft::default();
        assert_eq!(draft.build(), Err(RequestError::MissingProjectName));

        let draft = RequestDraft {
            project_name: Some("x".into()),
            ..Default::default()
        };
        assert_eq!(draft.build(), Err(RequestError::MissingScale));

        let draft = RequestDraft {
            project_name: Some("x".into()),
            scale: Some(ScaleTier::Large),
            description: Some("   ".into()),
        };
        assert_eq!(draft.build(), Err(RequestError::MissingDescription));
    }

    #[test]
    fn blank_project_name_rejected() {
        let result = ArchitectureRequest::new("  ", ScaleTier::Small, "something");
        assert_eq!(result, Err(RequestError::MissingProjectName));
    }

    #[test]
    fn draft_merge_prefers_self() {
        let flags = RequestDraft {
            project_name: Some("Flags".into()),
            scale: None,
            description: None,
        };
        let file = RequestDraft {
            project_name: Some("File".into()),
            scale: Some(ScaleTier::Medium),
            description: Some("from file".into()),
        };

        let merged = flags.or(file);
        assert_eq!(merged.project_name.as_deref(), Some("Flags"));
        assert_eq!(merged.scale, Some(ScaleTier::Medium));
        assert_eq!(merged.description.as_deref(), Some("from file"));
    }

    #[test]
    fn draft_accepts_camel_case_name() {
        let json = r#"{"projectName": "Chat", "scale": "medium", "description": "realtime chat"}"#;
        let draft: RequestDraft = serde_json::from_str(json).unwrap();
        let request = draft.build().unwrap();
        assert_eq!(request.project_name(), "Chat");
        assert_eq!(request.scale(), ScaleTier::Medium);
    }

    #[test]
    fn minimum_description_length() {
        let request = ArchitectureRequest::new("x", ScaleTier::Small, "short").unwrap();
        assert_eq!(
            request.require_description_len(20),
            Err(RequestError::DescriptionTooShort { min: 20, actual: 5 })
        );
        assert!(request.require_description_len(5).is_ok());
    }
}
