//! Show command - terminal visualizer for html maps

use crate::cli::EngineArgs;
use crate::context::{runtime, view_context, Context};
use crate::output::print_text;
use crate::visualize::{visualize, ColorMode};
use anyhow::{anyhow, bail, Result};
use htmlmaps_core::HtmlMap;
use std::path::Path;

/// Show the ranges of `template` rendered fresh, or of a saved map
pub fn run(
    ctx: &Context,
    template: Option<&str>,
    context_path: Option<&Path>,
    map_path: Option<&Path>,
    mode: ColorMode,
    engine_args: &EngineArgs,
) -> Result<()> {
    let rt = runtime()?;

    let (text, map) = match (template, map_path) {
        (_, Some(path)) => {
            let map = rt.block_on(HtmlMap::load(path))?;
            let text = map.html.clone().ok_or_else(|| {
                anyhow!(
                    "{} has no rendered html; write it with `htmlmaps render`",
                    path.display()
                )
            })?;
            (text, map)
        }
        (Some(template), None) => {
            let engine = ctx.engine(engine_args, None);
            let view = view_context(context_path)?;
            let output = rt.block_on(engine.render(template, &view))?;
            (output.text, output.map)
        }
        (None, None) => bail!("Nothing to show: pass a template or --map"),
    };

    if !map.tiles(&text) {
        tracing::warn!("map ranges do not tile the html exactly");
    }

    for line in visualize(&text, &map, mode)? {
        print_text(&line)?;
    }
    Ok(())
}
