//! Server information command

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{self, OutputFormat, print_formatted};
use crate::config::Config;
use crate::duck::ServerInfo;
use crate::progress::SilentProgress;

#[derive(Serialize)]
struct ServerResult {
    server: String,
    dashboard_version: String,
    info: Option<ServerInfo>,
}

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

    let result = ServerResult {
        server: state.server,
        dashboard_version: state.version,
        info: state.info,
    };

    print_formatted(&result, format, |result| match &result.info {
        Some(info) => {
            let mut lines = vec![
                format!("Server:    {}", result.server),
                format!("Title:     {}", info.title),
                format!("Version:   {}", info.version),
            ];
            if let Some(started) = info.started {
                lines.push(format!(
                    "Started:   {}",
                    started.format("%Y-%m-%d %H:%M:%S UTC")
                ));
            }
            lines.push(format!("Views:     {}", info.views.len()));
            lines.push(format!("Dashboard: {}", result.dashboard_version));
            lines.join("\n")
        }
        None => format!(
            "Server:    {}\nServer information is unavailable.",
            result.server
        ),
    });

    Ok(())
}
