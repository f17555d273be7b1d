//! Continuous build-status watching
//!
//! The watch loop is the external scheduler for the synchronization store:
//! it invokes one round per tick and renders whatever state the round left
//! behind. Recovery after a failed round is simply the next tick.

use std::time::Duration;

use anyhow::Result;
use tokio::time::MissedTickBehavior;

use crate::cli::output::{self, OutputFormat};
use crate::config::Config;
use crate::progress::LogProgress;
use crate::store::DashState;

pub async fn run(
    server: Option<String>,
    view: Option<String>,
    interval: Option<u64>,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let config = Config::load()?;
    let store = super::store_from(&config)?;
    let interval = interval
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.interval());

    tracing::info!(
        "Watching {} every {}s",
        server.as_deref().unwrap_or(&config.server.address),
        interval.as_secs()
    );

    let progress = LogProgress;
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                store.synchronize(&progress, server.as_deref(), view.as_deref()).await;
                render(&store.snapshot(), format, quiet);
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Stopping watch");
                break;
            }
        }
    }

    Ok(())
}

fn render(state: &DashState, format: OutputFormat, quiet: bool) {
    if format == OutputFormat::Json {
        if let Ok(json) = serde_json::to_string_pretty(state) {
            println!("{}", json);
        }
        return;
    }

    if state.error {
        output::print_error(&output::unreachable_message(&state.server));
        return;
    }

    let builds = state.builds.as_deref().unwrap_or(&[]);
    match &state.view {
        Some(view) => println!("{} [view: {}]", output::summarize_builds(builds), view),
        None => println!("{}", output::summarize_builds(builds)),
    }

    if !quiet {
        for build in builds {
            println!("{}", output::format_build_row(build));
        }
    }
}
