//! Global context for CLI commands

use crate::cli::{EngineArgs, MapArgs};
use anyhow::{Context as _, Result};
use htmlmaps_core::config::Config;
use htmlmaps_core::{TemplateContext, TemplateEngine};
use std::env;
use std::path::Path;

/// Loaded configuration shared by all commands
pub struct Context {
    pub config: Config,
}

impl Context {
    /// Load `config_path`, or `./htmlmaps.toml` when present
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                let dir = path.parent().unwrap_or_else(|| Path::new(""));
                Config::from_file(path)
                    .with_context(|| format!("Failed to load {}", path.display()))?
                    .relative_to(dir)
            }
            None => Config::load_or_default(env::current_dir()?)?,
        };
        tracing::debug!(?config, "loaded config");

        Ok(Self { config })
    }

    /// Engine for this invocation
    ///
    /// Command-line flags override the file. Without `map` overrides the map
    /// is never persisted.
    pub fn engine(&self, engine: &EngineArgs, map: Option<&MapArgs>) -> TemplateEngine {
        let mut config = self.config.clone();

        if let Some(root) = &engine.templates {
            config.templates.root = root.clone();
        }
        if engine.strict {
            config.render.strict = true;
        }

        match map {
            Some(map) => {
                if map.no_map {
                    config.map.output = None;
                } else if let Some(path) = &map.map {
                    config.map.output = Some(path.clone());
                }
                if let Some(url) = &map.url {
                    config.map.url = Some(url.clone());
                }
            }
            None => config.map.output = None,
        }

        TemplateEngine::from_config(&config)
    }
}

/// Read the view context from a JSON file; empty without one
pub fn view_context(path: Option<&Path>) -> Result<TemplateContext> {
    let Some(path) = path else {
        return Ok(TemplateContext::empty());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read view context {}", path.display()))?;
    let data: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;

    Ok(TemplateContext::new(data))
}

/// Runtime for the async engine calls of one command
pub fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")
}
