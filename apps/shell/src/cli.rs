//! # CLI Argument Definitions

use clap::{Args, Parser, Subcommand};
use fontloom::domain::options::FontArgs;
use fontloom::kernel::config::DEFAULT_CONFIG_STEM;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "fontloom")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Build and render web-font stylesheet links")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Print the stylesheet URL for ad-hoc font options
    Url(UrlArgs),
    /// Load config, run one page render and print the hints and stylesheet links
    Render {
        /// Config file; the extension may be omitted
        #[arg(short, long, default_value = DEFAULT_CONFIG_STEM)]
        config: PathBuf,
    },
}

#[derive(Debug, Args)]
pub(crate) struct UrlArgs {
    /// Handle passed to the URL builder
    #[arg(long, default_value = "font")]
    pub(crate) handle: String,
    /// Font family, e.g. 'Open Sans:400,700' (repeatable)
    #[arg(short, long)]
    pub(crate) family: Vec<String>,
    /// One of auto, block, swap, fallback, optional; anything else is dropped
    #[arg(short, long)]
    pub(crate) display: Option<String>,
    /// Character subset (repeatable)
    #[arg(short, long)]
    pub(crate) subset: Vec<String>,
    /// Only serve glyphs for these characters
    #[arg(short, long)]
    pub(crate) text: Option<String>,
    /// Font effect (repeatable)
    #[arg(short, long)]
    pub(crate) effect: Vec<String>,
    /// Explicit stylesheet URL; bypasses the font API (repeatable)
    #[arg(long)]
    pub(crate) src: Vec<String>,
}

impl From<UrlArgs> for FontArgs {
    fn from(args: UrlArgs) -> Self {
        let mut font = Self::new();
        if !args.family.is_empty() {
            font = font.family(args.family);
        }
        if let Some(display) = args.display {
            font = font.display(display);
        }
        if !args.subset.is_empty() {
            font = font.subset(args.subset);
        }
        if let Some(text) = args.text {
            font = font.text(text);
        }
        if !args.effect.is_empty() {
            font = font.effect(args.effect);
        }
        match <[String; 1]>::try_from(args.src) {
            Ok([url]) => font.src(url),
            Err(src) if src.is_empty() => font,
            Err(src) => font.stylesheets(src),
        }
    }
}
