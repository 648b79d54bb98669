//! Where template sources come from

use crate::template::error::TemplateError;
use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

/// Reads template sources by name
pub trait TemplateLoader: Send + Sync {
    fn read(&self, name: &str) -> impl Future<Output = Result<String, TemplateError>> + Send;
}

/// Resolves names relative to a template root folder
///
/// Names are joined onto the root as-is; callers serving untrusted names must
/// validate them first.
#[derive(Debug, Clone)]
pub struct FsLoader {
    root: PathBuf,
}

impl FsLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateLoader for FsLoader {
    async fn read(&self, name: &str) -> Result<String, TemplateError> {
        let path = self.root.join(name);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| TemplateError::TemplateNotFound {
                name: name.to_string(),
                reason: format!("{}: {}", path.display(), e),
            })
    }
}

/// Template sources held in memory
#[derive(Debug, Default)]
pub struct MemoryLoader {
    sources: RwLock<HashMap<String, String>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`MemoryLoader::insert`]
    pub fn with(self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.insert(name, source);
        self
    }

    /// Add or replace a source
    ///
    /// Engines that already cached the name keep the old tree until it is
    /// invalidated.
    pub fn insert(&self, name: impl Into<String>, source: impl Into<String>) {
        self.sources
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), source.into());
    }

    fn get(&self, name: &str) -> Option<String> {
        self.sources
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }
}

impl TemplateLoader for MemoryLoader {
    async fn read(&self, name: &str) -> Result<String, TemplateError> {
        self.get(name).ok_or_else(|| TemplateError::TemplateNotFound {
            name: name.to_string(),
            reason: "no such in-memory template".to_string(),
        })
    }
}
