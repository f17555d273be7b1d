//! One-shot build list fetching

use anyhow::Result;

use crate::cli::output::{self, OutputFormat};
use crate::config::Config;
use crate::progress::SilentProgress;

pub async fn run(
    server: Option<String>,
    view: Option<String>,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let config = Config::load()?;
    let store = super::store_from(&config)?;

    store
        .synchronize(&SilentProgress, server.as_deref(), view.as_deref())
        .await;

    let state = store.snapshot();
    if state.error {
        anyhow::bail!(output::unreachable_message(&state.server));
    }

    let builds = state.builds.unwrap_or_default();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&builds)?),
        OutputFormat::Text => {
            if !quiet {
                for build in &builds {
                    println!("{}", output::format_build_row(build));
                }
            }
            println!("{}", output::summarize_builds(&builds));
        }
    }

    Ok(())
}
