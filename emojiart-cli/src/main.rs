//! # EmojiArt
//!
//! Command-line entry point for EmojiArt.

use std::fs;

use anyhow::Context;
use clap::Parser;
use emojiart_cli::{load_document, load_script, replay, CliArgs, CliConfig};
use emojiart_core::PaletteStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing with optional JSON output.
///
/// Set `RUST_LOG` to control log levels (default: emojiart=info,emojiart_core=info).
/// Set `RUST_LOG_FORMAT=json` for JSON output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("emojiart=info,emojiart_core=info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = CliConfig::from(CliArgs::parse());
    config
        .canvas
        .validate()
        .context("invalid canvas configuration")?;

    if config.list_palettes {
        let store = PaletteStore::default();
        for palette in store.palettes() {
            println!("{}: {}", palette.name, palette.emojis);
        }
        return Ok(());
    }

    let script_path = config
        .script
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("no script given"))?;
    let intents = load_script(script_path)?;
    let document = load_document(config.document.as_deref())?;

    tracing::info!(
        "Replaying {} intents on a {}x{} canvas",
        intents.len(),
        config.viewport.width,
        config.viewport.height
    );
    let report = replay(document, &config, &intents);

    let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
    match &config.output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("failed to write report {}", path.display()))?;
            tracing::info!("Report written to {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
