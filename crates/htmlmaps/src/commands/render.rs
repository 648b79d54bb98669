//! Render command - print a template's output and persist its map

use crate::cli::{EngineArgs, MapArgs};
use crate::context::{runtime, view_context, Context};
use crate::output::{print_json, print_raw};
use anyhow::Result;
use std::path::Path;

/// Render `template`
///
/// # Arguments
///
/// * `context_path` - Optional JSON file with the view context
/// * `json` - Print the map, with the rendered html embedded, instead of the text
pub fn run(
    ctx: &Context,
    template: &str,
    context_path: Option<&Path>,
    json: bool,
    engine_args: &EngineArgs,
    map_args: &MapArgs,
) -> Result<()> {
    let engine = ctx.engine(engine_args, Some(map_args));
    let view = view_context(context_path)?;

    let output = runtime()?.block_on(engine.render(template, &view))?;
    tracing::debug!(
        template,
        chars = output.text.chars().count(),
        ranges = output.map.ranges.len(),
        "rendered"
    );

    if json {
        let mut map = output.map;
        map.html = Some(output.text);
        print_json(&serde_json::to_string_pretty(&map)?)?;
    } else {
        print_raw(&output.text)?;
    }

    Ok(())
}
