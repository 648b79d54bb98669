//! CLI command structure using clap

use crate::visualize::ColorMode;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "htmlmaps")]
#[command(version, about = "Render templates with source maps", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: ./htmlmaps.toml if present)
    #[arg(long, global = true, env = "HTMLMAPS_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a template, print the text and persist its map
    Render {
        /// Template name, relative to the template root
        template: String,

        /// JSON file with the view context
        #[arg(long)]
        context: Option<PathBuf>,

        /// Print the map (including the rendered html) instead of the text
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        engine: EngineArgs,

        #[command(flatten)]
        map: MapArgs,
    },

    /// Visualize the ranges of a rendered template or a saved map
    Show {
        /// Template name, relative to the template root
        #[arg(required_unless_present = "map", conflicts_with = "map")]
        template: Option<String>,

        /// JSON file with the view context
        #[arg(long)]
        context: Option<PathBuf>,

        /// Saved map to show; it must carry the rendered html
        #[arg(long)]
        map: Option<PathBuf>,

        /// How ranges are colored
        #[arg(long, value_enum, default_value_t = ColorMode::Alternate)]
        mode: ColorMode,

        #[command(flatten)]
        engine: EngineArgs,
    },
}

/// Overrides for the render settings of htmlmaps.toml
#[derive(Args, Debug, Default)]
pub struct EngineArgs {
    /// Template root folder
    #[arg(long)]
    pub templates: Option<PathBuf>,

    /// Fail on undefined values instead of rendering them empty
    #[arg(long)]
    pub strict: bool,
}

/// Overrides for the map settings of htmlmaps.toml
#[derive(Args, Debug, Default)]
pub struct MapArgs {
    /// Where to write the map
    #[arg(long, conflicts_with = "no_map")]
    pub map: Option<PathBuf>,

    /// Do not write the map
    #[arg(long)]
    pub no_map: bool,

    /// Originating URL recorded in the map
    #[arg(long)]
    pub url: Option<String>,
}
