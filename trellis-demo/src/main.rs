//! Trellis demo: draws one of the demo layouts in a window until it is closed.

mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use trellis::{AppConfig, Ui, demo};

use crate::cli::{Arguments, Layout};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Arguments::parse();
    let mut config = AppConfig::default();
    args.update_config(&mut config);

    let layout: fn(&mut Ui<'_>) = match args.layout {
        Layout::Sidebar => demo::sidebar_layout,
        Layout::Banner => demo::banner_layout,
    };

    tracing::info!(layout = ?args.layout, "starting trellis demo");
    trellis::shell::run(config, layout)?;
    Ok(())
}
