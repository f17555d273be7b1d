//! View listing command

use anyhow::Result;

use crate::cli::output::{self, OutputFormat, print_formatted};
use crate::config::Config;
use crate::progress::SilentProgress;

pub async fn run(server: Option<String>, format: OutputFormat) -> Result<()> {
    let config = Config::load()?;
    let store = super::store_from(&config)?;

    store
        .synchronize(&SilentProgress, server.as_deref(), None)
        .await;

    let state = store.snapshot();
    if state.error {
        anyhow::bail!(output::unreachable_message(&state.server));
    }

    let views = state.info.map(|info| info.views).unwrap_or_default();
    print_formatted(&views, format, |views| {
        if views.is_empty() {
            return "No views available".to_string();
        }
        views
            .iter()
            .map(|view| match &view.slug {
                Some(slug) => format!("{}  ({})", view.name, slug),
                None => view.name.clone(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    });

    Ok(())
}
