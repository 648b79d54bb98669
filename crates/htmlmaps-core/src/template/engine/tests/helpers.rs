//! Shared test helpers for template engine tests

use crate::template::{MemoryLoader, RenderOutput, TemplateContext, TemplateEngine};
use serde_json::json;

/// Engine over in-memory templates
pub(super) fn engine(templates: &[(&str, &str)]) -> TemplateEngine<MemoryLoader> {
    let loader = templates
        .iter()
        .fold(MemoryLoader::new(), |loader, (name, source)| {
            loader.with(*name, *source)
        });
    TemplateEngine::with_loader(loader)
}

/// Blog-like context with scalars, nesting and a sequence of mappings
pub(super) fn blog_context() -> TemplateContext {
    TemplateContext::new(json!({
        "title": "Posts",
        "lastUpdated": "Sat Sep 21 2019",
        "site": {"name": "Example", "visits": 42, "public": true},
        "posts": [
            {"name": "Clickbait title", "body": "filler filler ad"},
            {"name": "Which character are you?", "body": "answer: none of them"},
        ],
    }))
}

/// Render a template that is expected to succeed
pub(super) async fn render_ok(
    engine: &TemplateEngine<MemoryLoader>,
    name: &str,
    context: &TemplateContext,
) -> RenderOutput {
    engine.render(name, context).await.unwrap()
}

/// Call stack of one range as `file:line:column` strings
pub(super) fn stack_of(output: &RenderOutput, range: usize) -> Vec<String> {
    output
        .map
        .call_stack(&output.map.ranges[range])
        .map(|frame| frame.to_string())
        .collect()
}
