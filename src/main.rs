use std::sync::atomic::Ordering;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use sidon_cli::{dispatch, Cli};
use sidon_engine::SearchControl;
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let control = SearchControl::default();
    let stop_flag = Arc::clone(control.stop_flag());
    ctrlc::set_handler(move || {
        info!("interrupt received, stopping search");
        stop_flag.store(true, Ordering::Release);
    })?;

    dispatch(cli.command, control)?;
    Ok(())
}
