//! Output formatting utilities for CLI

use serde::Serialize;

use crate::duck::{BuildRecord, BuildStatus};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print a serializable value as JSON or use custom text formatter
pub fn print_formatted<T, F>(value: &T, format: OutputFormat, text_formatter: F)
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Text => println!("{}", text_formatter(value)),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(value) {
                println!("{}", json);
            }
        }
    }
}

/// Print an error message (never suppressed)
pub fn print_error(message: &str) {
    eprintln!("Error: {}", message);
}

/// The degraded message shown when a round fails
pub fn unreachable_message(server: &str) -> String {
    if server.is_empty() {
        "The local Duck server could not be reached.".to_string()
    } else {
        format!("The Duck server could not be reached at \"{}\".", server)
    }
}

/// One build as a text row
pub fn format_build_row(build: &BuildRecord) -> String {
    let mut name = build.project.clone();
    if !build.build.is_empty() {
        if !name.is_empty() {
            name.push('/');
        }
        name.push_str(&build.build);
    }
    if name.is_empty() {
        name = format!("#{}", build.id);
    }

    let mut row = format!("[{:>5}] {}", build.status.tag(), name);
    if !build.branch.is_empty() {
        row.push_str(&format!("  {}", build.branch));
    }
    if !build.build_number.is_empty() {
        row.push_str(&format!("  #{}", build.build_number));
    }
    row
}

/// One-line summary of a build list
pub fn summarize_builds(builds: &[BuildRecord]) -> String {
    if builds.is_empty() {
        return "No builds".to_string();
    }

    let count = |status: BuildStatus| builds.iter().filter(|b| b.status == status).count();
    let mut parts = Vec::new();
    for (status, label) in [
        (BuildStatus::Success, "succeeded"),
        (BuildStatus::Failed, "failed"),
        (BuildStatus::Running, "running"),
        (BuildStatus::Queued, "queued"),
        (BuildStatus::Canceled, "canceled"),
        (BuildStatus::Skipped, "skipped"),
        (BuildStatus::Unknown, "unknown"),
    ] {
        let n = count(status);
        if n > 0 {
            parts.push(format!("{} {}", n, label));
        }
    }

    format!("{} builds ({})", builds.len(), parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(status: BuildStatus) -> BuildRecord {
        BuildRecord {
            status,
            ..Default::default()
        }
    }

    #[test]
    fn unreachable_message_names_the_server() {
        assert_eq!(
            unreachable_message("localhost:12345"),
            "The Duck server could not be reached at \"localhost:12345\"."
        );
    }

    #[test]
    fn unreachable_message_without_a_server() {
        assert_eq!(
            unreachable_message(""),
            "The local Duck server could not be reached."
        );
    }

    #[test]
    fn summary_counts_by_status() {
        let builds = vec![
            build(BuildStatus::Success),
            build(BuildStatus::Success),
            build(BuildStatus::Failed),
            build(BuildStatus::Running),
        ];
        assert_eq!(
            summarize_builds(&builds),
            "4 builds (2 succeeded, 1 failed, 1 running)"
        );
    }

    #[test]
    fn summary_of_nothing() {
        assert_eq!(summarize_builds(&[]), "No builds");
    }

    #[test]
    fn build_row_falls_back_to_the_id() {
        let record = BuildRecord {
            id: 42,
            ..Default::default()
        };
        assert_eq!(format_build_row(&record), "[    ?] #42");
    }
}
