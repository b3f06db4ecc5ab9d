mod app;
mod data;
mod engine;
mod util;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::data::{DemoSource, FileSource, SUI_COIN_TYPE, TokenSource};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON dataset file to explore instead of the built-in demo data
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Coin type to load at startup
    #[arg(long, default_value = SUI_COIN_TYPE)]
    coin_type: String,

    /// Seed for the layout jitter; a fixed seed reproduces the same map
    #[arg(long, default_value_t = 7)]
    seed: u64,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let source: Arc<dyn TokenSource> = match &args.data_file {
        Some(path) => Arc::new(FileSource::new(path.clone())),
        None => Arc::new(DemoSource::new(args.seed)),
    };

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "bubblemap",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::BubbleMapApp::new(
                cc,
                source,
                args.seed,
                args.coin_type.clone(),
            )))
        }),
    )
}
