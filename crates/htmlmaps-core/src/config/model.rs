use super::consts::{CONFIG_FILE_NAME, DEFAULT_MAP_OUTPUT, DEFAULT_TEMPLATE_ROOT};
use crate::error::{HtmlMapsError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// htmlmaps.toml schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub templates: TemplatesConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub map: MapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatesConfig {
    #[serde(default = "default_template_root")]
    pub root: PathBuf,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            root: default_template_root(),
        }
    }
}

fn default_template_root() -> PathBuf {
    PathBuf::from(DEFAULT_TEMPLATE_ROOT)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Undefined lookups are errors instead of empty output
    #[serde(default)]
    pub strict: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Where rendered maps are written; absent disables persistence
    #[serde(default)]
    pub output: Option<PathBuf>,
    /// Originating URL recorded in maps
    #[serde(default)]
    pub url: Option<String>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            output: Some(PathBuf::from(DEFAULT_MAP_OUTPUT)),
            url: None,
        }
    }
}

impl Config {
    /// Read htmlmaps.toml
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| HtmlMapsError::ConfigParseError(e.to_string()))?;

        toml::from_str(&content).map_err(|e| HtmlMapsError::ConfigInvalid(e.to_string()))
    }

    /// Write htmlmaps.toml
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| HtmlMapsError::ConfigParseError(e.to_string()))?;

        std::fs::write(path.as_ref(), content).map_err(HtmlMapsError::IoError)?;

        Ok(())
    }

    /// Load `dir/htmlmaps.toml` if present, defaults otherwise
    ///
    /// Relative paths are resolved against `dir`.
    pub fn load_or_default(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let path = dir.join(CONFIG_FILE_NAME);
        let config = if path.exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        Ok(config.relative_to(dir))
    }

    /// Resolve relative paths against `dir`
    pub fn relative_to(mut self, dir: &Path) -> Self {
        self.templates.root = dir.join(&self.templates.root);
        self.map.output = self.map.output.map(|output| dir.join(output));
        self
    }
}
