//! Command-line entry point: classify a piece of text end-to-end.
//!
//! Wires the message fabric, background coordinator, and a page context the
//! same way the extension contexts are wired, then prints the normalized
//! predictions for text taken from the command line (or stdin).

use anyhow::{bail, Context};
use sdg_badge::{
    Config, Coordinator, Fabric, MemorySettingsStore, PageContext,
};
use std::io::Read;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let text = input_text().context("reading input text")?;
    if text.trim().is_empty() {
        bail!("usage: sdg-badge <text to classify>  (or pipe text on stdin)");
    }

    let fabric = Arc::new(Fabric::new());
    let classifier = config.classifier.clone().from_env();
    Coordinator::new(classifier)?.spawn(&fabric);

    let store = Arc::new(MemorySettingsStore::new());
    let mut page = PageContext::new(fabric, store, text);
    page.init().await;

    match page.analysis() {
        Some(analysis) if !analysis.result.is_empty() => {
            for prediction in &analysis.result.predictions {
                println!(
                    "SDG {:>2}  {:<42} {:.3}",
                    prediction.code, prediction.name, prediction.score
                );
            }
            let top = analysis.result.top().expect("non-empty predictions");
            println!();
            println!(
                "Top goal: SDG {} ({}) at {:.1}%",
                top.code,
                top.name,
                top.score * 100.0
            );
        }
        Some(_) => println!("No SDG classification found."),
        None => bail!("classification failed; see log output"),
    }

    Ok(())
}

fn input_text() -> anyhow::Result<String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        return Ok(args.join(" "));
    }

    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}
