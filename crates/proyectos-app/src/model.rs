// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::ids::ProjectId;

/// Longest name the inline editor accepts; keystrokes past the cap are ignored.
pub const MAX_NAME_LEN: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
}

impl Project {
    pub fn new(id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Builds the initial project list from an ordered sequence of names,
/// assigning ids 1..n in order. Duplicate or blank seed names are accepted
/// as-is; uniqueness is only enforced on renames.
pub fn seed_projects<I, S>(names: I) -> Vec<Project>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names
        .into_iter()
        .enumerate()
        .map(|(index, name)| Project::new(ProjectId::new(index as i64 + 1), name))
        .collect()
}
