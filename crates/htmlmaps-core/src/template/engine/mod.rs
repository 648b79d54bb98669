//! Template engine implementation

mod emit;
pub(crate) mod parser;
mod render;
mod tokenize;

use crate::config::Config;
use crate::error::Result;
use crate::map::HtmlMap;
use crate::template::ast::Template;
use crate::template::cache::TemplateCache;
use crate::template::context::TemplateContext;
use crate::template::error::TemplateError;
use crate::template::loader::{FsLoader, TemplateLoader};
use std::path::{Path, PathBuf};

use render::Renderer;

/// Rendered text and its source map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutput {
    pub text: String,
    pub map: HtmlMap,
}

/// Template engine: a template cache plus render options
///
/// The cache is shared by every render on this engine; all other render
/// state is created fresh per call.
pub struct TemplateEngine<L = FsLoader> {
    cache: TemplateCache<L>,
    strict: bool,
    map_output: Option<PathBuf>,
    url: Option<String>,
}

impl TemplateEngine<FsLoader> {
    /// Create an engine reading templates from `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_loader(FsLoader::new(root))
    }

    /// Create an engine from loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.templates.root)
            .strict(config.render.strict)
            .map_output(config.map.output.clone())
            .url(config.map.url.clone())
    }
}

impl<L: TemplateLoader> TemplateEngine<L> {
    pub fn with_loader(loader: L) -> Self {
        Self {
            cache: TemplateCache::new(loader),
            strict: false,
            map_output: None,
            url: None,
        }
    }

    /// Diagnostic mode: undefined lookups fail the render
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Where [`TemplateEngine::render`] persists the map; `None` disables it
    pub fn map_output(mut self, path: Option<PathBuf>) -> Self {
        self.map_output = path;
        self
    }

    /// Originating URL recorded in every map
    pub fn url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }

    pub fn cache(&self) -> &TemplateCache<L> {
        &self.cache
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Render a template by name, persisting the map if configured
    ///
    /// When persisted, the map also carries the rendered text and the map
    /// file's name.
    pub async fn render(&self, name: &str, context: &TemplateContext) -> Result<RenderOutput> {
        let template = self.cache.load(name).await?;
        let mut output = self.render_template(&template, context)?;

        if let Some(path) = &self.map_output {
            output.map.html = Some(output.text.clone());
            output.map.map_url = map_file_name(path);
            output.map.save(path).await?;
        }

        Ok(output)
    }

    /// Render source text that is not in the cache
    ///
    /// Templates it includes are still loaded through the cache.
    pub async fn render_str(
        &self,
        name: &str,
        source: &str,
        context: &TemplateContext,
    ) -> std::result::Result<RenderOutput, TemplateError> {
        let nodes = parser::parse(&self.cache, name, source, &[name.to_string()]).await?;
        self.render_template(&Template::new(name, nodes), context)
    }

    /// Render an already parsed template
    pub fn render_template(
        &self,
        template: &Template,
        context: &TemplateContext,
    ) -> std::result::Result<RenderOutput, TemplateError> {
        tracing::debug!(template = %template.name, tree = ?template.root, "rendering template");

        let mut renderer = Renderer::new(self.strict);
        let segments = renderer.render(template.nodes(), context)?;
        let slots = renderer.into_slots();
        tracing::debug!(?segments, ?slots, "rendered segment tree");

        let (text, mut map) = emit::flatten(&segments, &slots);
        map.url = self.url.clone();
        tracing::debug!(ranges = map.ranges.len(), frames = map.frames.len(), "flattened html map");

        Ok(RenderOutput { text, map })
    }
}

fn map_file_name(path: &Path) -> Option<String> {
    path.file_name().map(|name| name.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests;
