//! Block inheritance tests for template engine

use super::helpers::{engine, render_ok};
use super::*;
use serde_json::json;

const LAYOUT: &str = "<body>{% block main %}D{% endblock %}</body>";

#[tokio::test]
async fn test_block_default_kept_without_override() {
    let engine = engine(&[
        ("layout.tpl", LAYOUT),
        ("page.tpl", "{% extends layout.tpl %}"),
    ]);
    let output = render_ok(&engine, "page.tpl", &TemplateContext::empty()).await;
    assert_eq!(output.text, "<body>D</body>");
}

#[tokio::test]
async fn test_block_single_override_replaces_default() {
    let engine = engine(&[
        ("layout.tpl", LAYOUT),
        ("page.tpl", "{% extends layout.tpl %}\n{% block main %}O{% endblock %}\n"),
    ]);
    let output = render_ok(&engine, "page.tpl", &TemplateContext::empty()).await;
    assert_eq!(output.text, "<body>O</body>");
}

#[tokio::test]
async fn test_block_overrides_accumulate_after_default() {
    let engine = engine(&[
        ("layout.tpl", "[{% block items %}default{% endblock %}]"),
        (
            "page.tpl",
            "{% extends layout.tpl %}{% render one.tpl %}{% render two.tpl %}",
        ),
        ("one.tpl", "{% block items %}1{% endblock %}"),
        ("two.tpl", "{% block items %}2{% endblock %}"),
    ]);
    let output = render_ok(&engine, "page.tpl", &TemplateContext::empty()).await;
    assert_eq!(output.text, "[12]");
}

#[tokio::test]
async fn test_block_three_level_inheritance() {
    let engine = engine(&[
        ("root.tpl", "<{% block a %}R{% endblock %}>"),
        ("middle.tpl", "{% extends root.tpl %}{% block a %}M{% endblock %}"),
        ("leaf.tpl", "{% extends middle.tpl %}{% block a %}L{% endblock %}"),
    ]);
    let output = render_ok(&engine, "leaf.tpl", &TemplateContext::empty()).await;
    assert_eq!(output.text, "<ML>");
}

#[tokio::test]
async fn test_block_content_outside_blocks_is_emitted_in_place() {
    let engine = engine(&[
        ("layout.tpl", LAYOUT),
        ("page.tpl", "{% extends layout.tpl %}{% block main %}O{% endblock %}tail"),
    ]);
    let output = render_ok(&engine, "page.tpl", &TemplateContext::empty()).await;
    assert_eq!(output.text, "<body>O</body>tail");
}

#[tokio::test]
async fn test_block_nested_inner_override() {
    let engine = engine(&[
        (
            "layout.tpl",
            "[{% block outer %}({% block inner %}d{% endblock %}){% endblock %}]",
        ),
        ("page.tpl", "{% extends layout.tpl %}{% block inner %}I{% endblock %}"),
    ]);
    let output = render_ok(&engine, "page.tpl", &TemplateContext::empty()).await;
    assert_eq!(output.text, "[(I)]");
}

#[tokio::test]
async fn test_block_nested_outer_override_drops_inner() {
    let engine = engine(&[
        (
            "layout.tpl",
            "[{% block outer %}({% block inner %}d{% endblock %}){% endblock %}]",
        ),
        ("page.tpl", "{% extends layout.tpl %}{% block outer %}O{% endblock %}"),
    ]);
    let output = render_ok(&engine, "page.tpl", &TemplateContext::empty()).await;
    assert_eq!(output.text, "[O]");
}

#[tokio::test]
async fn test_block_override_uses_render_context() {
    let engine = engine(&[
        ("layout.tpl", "<title>{% block title %}Untitled{% endblock %}</title>"),
        (
            "post.tpl",
            "{% extends layout.tpl %}{% block title %}{%= post.name %}{% endblock %}",
        ),
    ]);
    let context = TemplateContext::new(json!({"post": {"name": "Hello"}}));
    let output = render_ok(&engine, "post.tpl", &context).await;
    assert_eq!(output.text, "<title>Hello</title>");
}

#[tokio::test]
async fn test_block_declared_only_in_child_renders_in_place() {
    let engine = engine(&[
        ("layout.tpl", LAYOUT),
        ("page.tpl", "{% extends layout.tpl %}{% block extra %}E{% endblock %}"),
    ]);
    let output = render_ok(&engine, "page.tpl", &TemplateContext::empty()).await;
    assert_eq!(output.text, "<body>D</body>E");
}

#[tokio::test]
async fn test_block_repeated_in_loop_supersedes_first_iteration() {
    // The first iteration declares the slot; the second replaces its default
    // and the third appends
    let engine = engine(&[(
        "t.tpl",
        "{% for n in numbers %}{% block item %}{%= n %}{% endblock %}{% end %}",
    )]);
    let context = TemplateContext::new(json!({"numbers": [1, 2, 3]}));
    let output = render_ok(&engine, "t.tpl", &context).await;
    assert_eq!(output.text, "23");
}

#[tokio::test]
async fn test_block_state_is_fresh_per_render() {
    let engine = engine(&[
        ("layout.tpl", LAYOUT),
        ("page.tpl", "{% extends layout.tpl %}{% block main %}O{% endblock %}"),
    ]);
    let first = render_ok(&engine, "layout.tpl", &TemplateContext::empty()).await;
    let second = render_ok(&engine, "page.tpl", &TemplateContext::empty()).await;
    let third = render_ok(&engine, "layout.tpl", &TemplateContext::empty()).await;

    assert_eq!(first.text, "<body>D</body>");
    assert_eq!(second.text, "<body>O</body>");
    assert_eq!(third, first);
}
