//! Source map tests: range positions, call stacks and frame sharing

use super::helpers::{blog_context, engine, render_ok, stack_of};
use super::*;
use crate::map::{Frame, Position};
use serde_json::json;

fn ctx_x() -> TemplateContext {
    TemplateContext::new(json!({"x": "X"}))
}

#[tokio::test]
async fn test_map_positions_across_lines() {
    let engine = engine(&[("t.tpl", "ab\ncd{%= x %}ef")]);
    let output = render_ok(&engine, "t.tpl", &ctx_x()).await;

    assert_eq!(output.text, "ab\ncdXef");
    let ranges = &output.map.ranges;
    assert_eq!(ranges.len(), 3);

    assert_eq!(ranges[0].start(), Position::new(0, 0));
    assert_eq!(ranges[0].end(), Position::new(1, 2));
    assert_eq!(ranges[0].length, 5);

    assert_eq!(ranges[1].start(), Position::new(1, 2));
    assert_eq!(ranges[1].end(), Position::new(1, 3));
    assert_eq!(ranges[1].length, 1);

    assert_eq!(ranges[2].start(), Position::new(1, 3));
    assert_eq!(ranges[2].end(), Position::new(1, 5));

    assert_eq!(stack_of(&output, 0), vec!["t.tpl:1:0"]);
    assert_eq!(stack_of(&output, 1), vec!["t.tpl:2:2"]);
    assert_eq!(stack_of(&output, 2), vec!["t.tpl:2:13"]);
}

#[tokio::test]
async fn test_map_ranges_tile_output() {
    let engine = engine(&[
        (
            "index.tpl",
            "{% extends layout.tpl %}\n{% block main %}\n<ul>\n{% for post in posts %}  <li>{%= post.name %}</li>\n{% end %}</ul>\n{% endblock %}\n",
        ),
        (
            "layout.tpl",
            "<html>\n<title>{%= title %}</title>\n{% block main %}{% endblock %}\n<footer>{%= lastUpdated %}</footer>\n</html>\n",
        ),
    ]);
    let output = render_ok(&engine, "index.tpl", &blog_context()).await;

    assert!(output.map.tiles(&output.text));
    assert_eq!(output.map.covered_length(), output.text.chars().count());
    assert_eq!(output.map.slices(&output.text).concat(), output.text);
}

#[tokio::test]
async fn test_map_counts_characters_not_bytes() {
    let engine = engine(&[("t.tpl", "héllo {%= x %}")]);
    let output = render_ok(&engine, "t.tpl", &TemplateContext::new(json!({"x": "→"}))).await;

    assert_eq!(output.map.ranges[0].length, 6);
    assert_eq!(output.map.ranges[1].start(), Position::new(0, 6));
    assert_eq!(output.map.ranges[1].end(), Position::new(0, 7));
    assert!(output.map.tiles(&output.text));
}

#[tokio::test]
async fn test_map_skips_whitespace_only_text() {
    let engine = engine(&[("t.tpl", "{% block a %}\n  {%= x %}\n{% endblock %}\n")]);
    let output = render_ok(&engine, "t.tpl", &ctx_x()).await;

    assert_eq!(output.text, "X");
    assert_eq!(output.map.ranges.len(), 1);
    assert_eq!(output.map.frames, vec![Frame::new("t.tpl", 1, 2)]);
}

#[tokio::test]
async fn test_map_include_call_stacks() {
    let engine = engine(&[
        ("page.tpl", "<p>{% render nav.tpl %}</p>"),
        ("nav.tpl", "<nav>"),
    ]);
    let output = render_ok(&engine, "page.tpl", &TemplateContext::empty()).await;

    let stacks: Vec<_> = output
        .map
        .ranges
        .iter()
        .map(|range| range.call_stack.clone())
        .collect();
    assert_eq!(stacks, vec![vec![0], vec![1, 2], vec![3]]);

    assert_eq!(stack_of(&output, 1), vec!["nav.tpl:1:0", "page.tpl:1:3"]);
    assert_eq!(output.map.frames[3], Frame::new("page.tpl", 0, 23));
}

#[tokio::test]
async fn test_map_override_points_at_overriding_template() {
    let engine = engine(&[
        ("layout.tpl", "<body>{% block main %}D{% endblock %}</body>"),
        ("page.tpl", "{% extends layout.tpl %}{% block main %}O{% endblock %}"),
    ]);
    let output = render_ok(&engine, "page.tpl", &TemplateContext::empty()).await;

    assert_eq!(output.text, "<body>O</body>");
    assert_eq!(stack_of(&output, 0), vec!["layout.tpl:1:0", "page.tpl:1:0"]);
    assert_eq!(stack_of(&output, 1), vec!["page.tpl:1:40"]);
    assert_eq!(stack_of(&output, 2), vec!["layout.tpl:1:37", "page.tpl:1:0"]);
}

#[tokio::test]
async fn test_map_loop_iterations_share_frames() {
    let engine = engine(&[("t.tpl", "{% for n in numbers %}{%= n %}{% end %}")]);
    let context = TemplateContext::new(json!({"numbers": [1, 2, 3]}));
    let output = render_ok(&engine, "t.tpl", &context).await;

    assert_eq!(output.text, "123");
    assert_eq!(output.map.ranges.len(), 3);
    assert_eq!(output.map.frames.len(), 1);
    assert!(output.map.ranges.iter().all(|range| range.call_stack == vec![0]));
}

#[tokio::test]
async fn test_map_frames_are_unique() {
    let engine = engine(&[
        ("page.tpl", "{% render row.tpl %}{% render row.tpl %}"),
        ("row.tpl", "<tr>{% render cell.tpl %}</tr>"),
        ("cell.tpl", "<td>"),
    ]);
    let output = render_ok(&engine, "page.tpl", &TemplateContext::empty()).await;

    let frames = &output.map.frames;
    for (i, frame) in frames.iter().enumerate() {
        assert!(!frames[i + 1..].contains(frame), "duplicate frame {}", frame);
    }
    assert!(output
        .map
        .ranges
        .iter()
        .flat_map(|range| &range.call_stack)
        .all(|&id| id < frames.len()));
}

#[tokio::test]
async fn test_map_json_shape() {
    let engine = engine(&[("t.tpl", "a{%= x %}")]);
    let output = render_ok(&engine, "t.tpl", &ctx_x()).await;
    let value = serde_json::to_value(&output.map).unwrap();

    assert_eq!(
        value,
        json!({
            "ranges": [
                {"callStack": [0], "startLine": 0, "startColumn": 0, "endLine": 0, "endColumn": 1, "length": 1},
                {"callStack": [1], "startLine": 0, "startColumn": 1, "endLine": 0, "endColumn": 2, "length": 1},
            ],
            "frames": [
                {"file": "t.tpl", "line": 0, "column": 0},
                {"file": "t.tpl", "line": 0, "column": 1},
            ],
        })
    );
}

#[tokio::test]
async fn test_map_records_engine_url() {
    let engine = engine(&[("t.tpl", "a")]).url(Some("/posts".to_string()));
    let output = render_ok(&engine, "t.tpl", &TemplateContext::empty()).await;
    assert_eq!(output.map.url.as_deref(), Some("/posts"));
    assert_eq!(output.map.html, None);
}

#[tokio::test]
async fn test_map_render_is_deterministic() {
    let engine = engine(&[
        ("layout.tpl", "<h1>{% block title %}{% endblock %}</h1>{% render list.tpl %}"),
        ("list.tpl", "{% for post in posts %}<p>{%= post.body %}</p>{% end %}"),
        ("index.tpl", "{% extends layout.tpl %}{% block title %}{%= title %}{% endblock %}"),
    ]);
    let first = render_ok(&engine, "index.tpl", &blog_context()).await;
    let second = render_ok(&engine, "index.tpl", &blog_context()).await;

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first.map).unwrap(),
        serde_json::to_string(&second.map).unwrap()
    );
}
