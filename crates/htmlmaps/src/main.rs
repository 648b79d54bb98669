mod cli;
mod commands;
mod context;
mod logging;
mod output;
mod visualize;

use clap::Parser;
use cli::{Cli, Commands};
use context::Context;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = Context::load(cli.config.as_deref()).and_then(|ctx| match cli.command {
        Commands::Render {
            template,
            context,
            json,
            engine,
            map,
        } => commands::render::run(&ctx, &template, context.as_deref(), json, &engine, &map),
        Commands::Show {
            template,
            context,
            map,
            mode,
            engine,
        } => commands::show::run(
            &ctx,
            template.as_deref(),
            context.as_deref(),
            map.as_deref(),
            mode,
            &engine,
        ),
    });

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
