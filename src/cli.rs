//! CLI surface of the `postbak` binary.
//!
//! All business logic lives in the library modules; this module only parses
//! arguments, loads configuration, and maps the run outcome onto process
//! exit codes so failure behavior stays explicit and testable.

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use crate::backup::{self, BackupError};
use crate::client::ApiClient;
use crate::config::Config;
use crate::materialize::EXPORT_ROOT;

/// Everything went through; the full tree is on disk.
pub const EXIT_OK: i32 = 0;
/// The run never got its data: misconfiguration, inaccessible team, or a
/// source fetch failure. Reported as a diagnostic, nothing is rolled back.
pub const EXIT_RUN_FAILED: i32 = 1;
/// Materializer fault: the export tree hit a state the collision policy
/// treats as unrecoverable. The process halts without cleanup.
pub const EXIT_FAULT: i32 = 2;

/// Export every post in a team workspace to a local directory tree.
#[derive(Parser)]
#[clap(
    name = "postbak",
    version,
    about = "Export every post in a team workspace to a local directory tree"
)]
pub struct Cli {
    /// Directory the exported tree is written under.
    #[clap(long, default_value = EXPORT_ROOT)]
    pub out_dir: PathBuf,

    /// Print the run summary as a single JSON object.
    #[clap(long)]
    pub json: bool,
}

/// Run the export and return the process exit code. Split out of `main` so
/// integration tests can invoke the full flow in-process.
pub async fn run(cli: Cli) -> i32 {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "startup configuration incomplete, no export attempted");
            return EXIT_RUN_FAILED;
        }
    };

    let client = match config.base_url.as_deref() {
        Some(base_url) => ApiClient::with_base_url(base_url, config.access_token),
        None => ApiClient::new(config.access_token),
    };

    match backup::run_backup(&client, &config.team_name, &cli.out_dir).await {
        Ok(report) => {
            info!(posts = report.posts_written, "export finished");
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({
                        "team": config.team_name,
                        "posts": report.posts_written,
                        "out_dir": cli.out_dir,
                    })
                );
            } else {
                println!(
                    "exported {} posts from {} to {}",
                    report.posts_written,
                    config.team_name,
                    cli.out_dir.display()
                );
            }
            EXIT_OK
        }
        Err(e @ (BackupError::Source(_) | BackupError::TeamNotAccessible(_))) => {
            error!(error = %e, "export aborted");
            EXIT_RUN_FAILED
        }
        Err(BackupError::Materialize(e)) => {
            error!(error = %e, "fatal: export tree left as-is, nothing cleaned up");
            EXIT_FAULT
        }
    }
}
