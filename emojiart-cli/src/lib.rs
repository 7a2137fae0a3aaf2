//! # EmojiArt CLI
//!
//! Command-line host for EmojiArt. It opens a document, replays a script of
//! gesture intents through a [`CanvasStore`](emojiart_core::CanvasStore) and
//! reports the resulting document, transform, selection and render frame.
//!
//! ## Usage
//!
//! ```bash
//! emojiart --script session.json --document art.json --output report.json
//! ```
//!
//! ## Listing palettes
//!
//! ```bash
//! emojiart --list-palettes
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `CliConfig` - Canvas tunables, viewport and file locations
//! - `replay` - Drives the store and collects a [`ReplayReport`]
//! - `background` - Resolves `file://` backgrounds for documents

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

mod background;
mod replay;

pub use background::{fetch_background, resolve_pending_background, FetchError};
pub use replay::{load_document, load_script, replay, ReplayReport};

use std::path::PathBuf;

use clap::Parser;
use emojiart_core::config::{DEFAULT_EMOJI_FONT_SIZE, DEFAULT_MIN_ZOOM};
use emojiart_core::{CanvasConfig, Size};

/// Command-line arguments for emojiart.
#[derive(Debug, Clone, Parser)]
#[command(name = "emojiart")]
#[command(about = "Replay gesture scripts against an EmojiArt document")]
#[command(version)]
pub struct CliArgs {
    /// JSON array of intents to replay, in order
    #[arg(long, required_unless_present = "list_palettes")]
    pub script: Option<PathBuf>,

    /// Document to open (JSON); an empty document is used when absent
    #[arg(long, env = "EMOJIART_DOCUMENT")]
    pub document: Option<PathBuf>,

    /// Viewport width in points
    #[arg(long, default_value = "1280")]
    pub width: u32,

    /// Viewport height in points
    #[arg(long, default_value = "720")]
    pub height: u32,

    /// Visual font size of dropped emoji
    #[arg(long, env = "EMOJIART_FONT_SIZE", default_value_t = DEFAULT_EMOJI_FONT_SIZE)]
    pub font_size: f64,

    /// Smallest zoom the canvas commits to
    #[arg(long, env = "EMOJIART_MIN_ZOOM", default_value_t = DEFAULT_MIN_ZOOM)]
    pub min_zoom: f64,

    /// Where to write the report; stdout when absent
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Print the built-in palettes and exit
    #[arg(long, conflicts_with = "script")]
    pub list_palettes: bool,
}

/// CLI configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    /// Canvas tunables.
    pub canvas: CanvasConfig,
    /// Viewport size.
    pub viewport: Size,
    /// Script to replay.
    pub script: Option<PathBuf>,
    /// Document to open.
    pub document: Option<PathBuf>,
    /// Report destination.
    pub output: Option<PathBuf>,
    /// Print palettes instead of replaying.
    pub list_palettes: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CliConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            viewport: Size::new(1280.0, 720.0),
            script: None,
            document: None,
            output: None,
            list_palettes: false,
        }
    }
}

impl From<CliArgs> for CliConfig {
    fn from(args: CliArgs) -> Self {
        Self {
            canvas: CanvasConfig {
                default_emoji_font_size: args.font_size,
                min_zoom: args.min_zoom,
            },
            viewport: Size::new(f64::from(args.width), f64::from(args.height)),
            script: args.script,
            document: args.document,
            output: args.output,
            list_palettes: args.list_palettes,
        }
    }
}
