// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::ids::ProjectId;
use crate::model::Project;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameError {
    Empty,
    Duplicate,
}

impl std::fmt::Display for NameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => f.write_str("project name cannot be empty"),
            Self::Duplicate => f.write_str("project name must be unique"),
        }
    }
}

impl std::error::Error for NameError {}

pub type NameResult = std::result::Result<String, NameError>;

/// Checks a candidate rename against the current list. Leading/trailing
/// whitespace is trimmed away and the comparison against other projects is
/// case-insensitive; interior whitespace stays significant. On success the
/// trimmed value is returned as the canonical name to store.
///
/// `excluded` is the project being renamed, so its own current name never
/// counts as a collision. Pass `None` to check against every project.
pub fn validate_name(
    candidate: &str,
    projects: &[Project],
    excluded: Option<ProjectId>,
) -> NameResult {
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        return Err(NameError::Empty);
    }

    let folded = trimmed.to_lowercase();
    let collides = projects.iter().any(|project| {
        Some(project.id) != excluded && project.name.trim().to_lowercase() == folded
    });
    if collides {
        return Err(NameError::Duplicate);
    }

    Ok(trimmed.to_owned())
}
