// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use coco_app::ViewKind;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_VERSION: i64 = 1;
const APP_NAME: &str = "coco";
const DEFAULT_PRACTICE_NAME: &str = "Bright Smiles Orthodontics";
const DEFAULT_OFFICE: &str = "Main Street";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub practice: Practice,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            ui: Ui::default(),
            practice: Practice::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub start_view: Option<String>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            start_view: Some("dashboard".to_owned()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Practice {
    pub name: Option<String>,
    pub office: Option<String>,
}

impl Default for Practice {
    fn default() -> Self {
        Self {
            name: Some(DEFAULT_PRACTICE_NAME.to_owned()),
            office: Some(DEFAULT_OFFICE.to_owned()),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("COCO_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set COCO_CONFIG_PATH to the config file")
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
                    "config file {} is not versioned. Add `version = 1` and move values under [ui] and [practice]",
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
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.version != CONFIG_VERSION {
            bail!(
                "config {} has version {}; expected 1",
                path.display(),
                self.version
            );
        }

        if let Some(raw) = &self.ui.start_view
            && ViewKind::parse(raw).is_none()
        {
            bail!(
                "ui.start_view in {} must be one of dashboard, case, team, settings; got {raw:?}",
                path.display()
            );
        }

        if let Some(name) = &self.practice.name
            && name.trim().is_empty()
        {
            bail!("practice.name in {} must not be blank", path.display());
        }

        Ok(())
    }

    pub fn start_view(&self) -> ViewKind {
        self.ui
            .start_view
            .as_deref()
            .and_then(ViewKind::parse)
            .unwrap_or(ViewKind::Dashboard)
    }

    pub fn practice_name(&self) -> &str {
        self.practice.name.as_deref().unwrap_or(DEFAULT_PRACTICE_NAME)
    }

    pub fn office(&self) -> &str {
        self.practice.office.as_deref().unwrap_or(DEFAULT_OFFICE)
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# coco config\n# Place this file at: {}\n\nversion = 1\n\n[ui]\n# One of: dashboard, case, team, settings\nstart_view = \"dashboard\"\n\n[practice]\nname = \"{}\"\noffice = \"{}\"\n",
            path.display(),
            DEFAULT_PRACTICE_NAME,
            DEFAULT_OFFICE,
        )
    }
}
