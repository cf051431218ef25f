// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_VERSION: i64 = 1;
const APP_NAME: &str = "proyectos";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub seed: Seed,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            seed: Seed::default(),
        }
    }
}

/// Initial project list, in display order. Ids are assigned 1..n at load
/// time. Where the names come from is the embedder's business; the list
/// lives only for the session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Seed {
    pub names: Option<Vec<String>>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("PROYECTOS_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set PROYECTOS_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and put seed names under [seed]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        Ok(config)
    }

    /// Configured seed names, falling back to the starter trio when the
    /// config carries none. Blank or duplicate entries pass through as-is;
    /// uniqueness is only enforced once the user renames something.
    pub fn seed_names(&self) -> Vec<String> {
        match &self.seed.names {
            Some(names) if !names.is_empty() => names.clone(),
            _ => proyectos_testkit::SEED_TRIO.map(String::from).to_vec(),
        }
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# proyectos config\n# Place this file at: {}\n\nversion = 1\n\n[seed]\n# Initial project names, in display order. Optional; a small demo list\n# is used when absent.\nnames = [\"Website Redesign\", \"Marketing Q3\", \"Mobile App\"]\n",
            path.display(),
        )
    }
}
