//! Parsed-template repository owned by one engine

use crate::template::ast::Template;
use crate::template::engine::parser;
use crate::template::error::TemplateError;
use crate::template::loader::TemplateLoader;
use futures_util::future::BoxFuture;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Memoizes parsed templates by name
///
/// Each name is read and parsed at most once until it is invalidated. Two
/// concurrent first loads of the same name may both parse it; the later
/// insert wins and both results are equivalent.
pub struct TemplateCache<L> {
    loader: L,
    templates: Mutex<HashMap<String, Arc<Template>>>,
}

impl<L: TemplateLoader> TemplateCache<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            templates: Mutex::new(HashMap::new()),
        }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Load a template, parsing it (and everything it includes) on first use
    pub async fn load(&self, name: &str) -> Result<Arc<Template>, TemplateError> {
        self.load_within(name.to_string(), Vec::new()).await
    }

    /// Load `name` as an inclusion of the templates in `chain`
    pub(crate) fn load_within(
        &self,
        name: String,
        mut chain: Vec<String>,
    ) -> BoxFuture<'_, Result<Arc<Template>, TemplateError>> {
        Box::pin(async move {
            if chain.contains(&name) {
                chain.push(name);
                return Err(TemplateError::IncludeCycle { chain });
            }

            if let Some(template) = self.get(&name) {
                tracing::debug!(template = %name, "template cache hit");
                return Ok(template);
            }

            tracing::debug!(template = %name, "template cache miss");
            let source = self.loader.read(&name).await?;
            chain.push(name.clone());
            let nodes = parser::parse(self, &name, &source, &chain).await?;

            let template = Arc::new(Template::new(name.clone(), nodes));
            self.lock().insert(name, Arc::clone(&template));
            Ok(template)
        })
    }

    /// Cached template, without loading
    pub fn get(&self, name: &str) -> Option<Arc<Template>> {
        self.lock().get(name).cloned()
    }

    /// Drop one cached template; returns whether it was cached
    ///
    /// Templates that inlined it keep their copy until they are invalidated too.
    pub fn invalidate(&self, name: &str) -> bool {
        self.lock().remove(name).is_some()
    }

    /// Drop every cached template
    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<Template>>> {
        self.templates.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
