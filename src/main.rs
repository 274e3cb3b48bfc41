//! Command-line entry point for the stats refresh run.
//!
//! The binary is thin glue: resolve the configuration, fetch the snapshot,
//! render the document, and rewrite the README only when its content
//! changed. The run exits non-zero only on unrecoverable transport or
//! authentication failure; configuration problems degrade to defaults.

use std::{
    env, fs,
    io::Write,
    path::{Path, PathBuf},
    process
};

use chrono::Utc;
use clap::{ArgAction, Parser};
use octostats::{Error, StatsClient, io_error, load_config, render_readme, sync_readme};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line interface for refreshing the statistics README.
#[derive(Debug, Parser)]
#[command(name = "octostats", version, about = "Render GitHub account stats into a README")]
struct Cli {
    /// GitHub token used to authenticate API requests.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, value_name = "TOKEN")]
    token: String,

    /// Path to the display configuration document (JSON or YAML).
    #[arg(long, value_name = "PATH", default_value = "config.json")]
    config: PathBuf,

    /// Path to the README file receiving the rendered stats.
    #[arg(long, value_name = "PATH", default_value = "README.md")]
    readme: PathBuf,

    /// Print the rendered document to stdout without touching the README.
    #[arg(long, action = ArgAction::SetTrue)]
    dry_run: bool
}

/// Entry point that reports errors and sets the appropriate exit status.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(error) = run(Cli::parse()).await {
        eprintln!("{}", error.to_display_string());
        process::exit(1);
    }
}

/// Executes one refresh run.
///
/// # Errors
///
/// Propagates fetch and README I/O errors; configuration never fails here.
async fn run(cli: Cli) -> Result<(), Error> {
    let config = load_config(&cli.config);

    let client = StatsClient::connect(&cli.token).await?;
    info!("fetching stats for {}", client.username());
    let snapshot = client.fetch_snapshot().await?;

    let today = Utc::now().date_naive();
    let document = render_readme(&config, &snapshot, today);

    if cli.dry_run {
        print!("{document}");
        return Ok(());
    }

    let changed = sync_readme(&cli.readme, &document)?;

    if let Ok(output_path) = env::var("GITHUB_OUTPUT") {
        write_step_output(Path::new(&output_path), changed)?;
    }

    Ok(())
}

/// Appends the `changed` step output for the invoking workflow.
///
/// The workflow's commit step reads it to skip empty commits; the commit
/// message itself is a workflow input and never reaches this binary.
fn write_step_output(path: &Path, changed: bool) -> Result<(), Error> {
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| io_error(path, source))?;

    writeln!(file, "changed={changed}").map_err(|source| io_error(path, source))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;
    use tempfile::tempdir;

    use super::{Cli, write_step_output};

    #[test]
    fn cli_defaults_config_and_readme_paths() {
        let cli = Cli::try_parse_from([env!("CARGO_PKG_NAME"), "--token", "ghp_test"])
            .expect("failed to parse CLI");

        assert_eq!(cli.token, "ghp_test");
        assert_eq!(cli.config.to_str(), Some("config.json"));
        assert_eq!(cli.readme.to_str(), Some("README.md"));
        assert!(!cli.dry_run);
    }

    #[test]
    fn cli_accepts_custom_paths_and_dry_run() {
        let cli = Cli::try_parse_from([
            env!("CARGO_PKG_NAME"),
            "--token",
            "ghp_test",
            "--config",
            "stats.yaml",
            "--readme",
            "docs/README.md",
            "--dry-run",
        ])
        .expect("failed to parse CLI");

        assert_eq!(cli.config.to_str(), Some("stats.yaml"));
        assert_eq!(cli.readme.to_str(), Some("docs/README.md"));
        assert!(cli.dry_run);
    }

    #[test]
    fn write_step_output_appends_changed_flag() {
        let temp = tempdir().expect("failed to create tempdir");
        let path = temp.path().join("github_output");

        write_step_output(&path, true).expect("first write failed");
        write_step_output(&path, false).expect("second write failed");

        let contents = fs::read_to_string(&path).expect("failed to read output file");
        assert_eq!(contents, "changed=true\nchanged=false\n");
    }
}
