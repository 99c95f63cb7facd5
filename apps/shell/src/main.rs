#![allow(clippy::print_stdout)]

mod cli;

use crate::cli::{Cli, Command, UrlArgs};
use anyhow::{Context, Result};
use clap::Parser;
use fontloom::domain::config::{AppConfig, LoggingConfig};
use fontloom::domain::options::FontArgs;
use fontloom::fonts::{HintRelation, build_url};
use fontloom::hooks::{EnqueueAssets, Hooks};
use fontloom::kernel::config::load_config;
use fontloom_logger::Logger;
use std::path::Path;
use strum::IntoEnumIterator;
use tracing::debug;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Url(args) => url(args),
        Command::Render { config } => render(&config),
    }
}

fn url(args: UrlArgs) -> Result<()> {
    let logging = LoggingConfig { level: "warn".to_owned(), ..LoggingConfig::default() };
    let _logger = Logger::from_config(env!("CARGO_PKG_NAME"), &logging)?;

    let handle = args.handle.clone();
    let options = FontArgs::from(args).resolve();
    println!("{}", build_url(&handle, &options));
    Ok(())
}

fn render(path: &Path) -> Result<()> {
    let config: AppConfig =
        load_config(Some(path)).context("Critical: Configuration is malformed")?;
    let _logger = Logger::from_config(env!("CARGO_PKG_NAME"), &config.logging)?;

    let hooks = Hooks::new();
    let registry = fontloom::init(&config, &hooks)?;
    let listeners = hooks.emit(&EnqueueAssets);
    debug!(listeners, "Page render emitted");

    let registry = registry.lock();
    for relation in HintRelation::iter() {
        for hint in registry.resource_hints(relation) {
            println!("{}", hint.to_html());
        }
    }
    for sheet in registry.assets().render_styles() {
        println!("{}", sheet.to_html());
    }
    Ok(())
}
