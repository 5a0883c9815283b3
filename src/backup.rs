//! Top-level export pipeline: access guard, then stream every post from the
//! source into the filesystem materializer.
//!
//! Generic over [`PostSource`] so integration tests drive it with a mock and
//! the binary drives it with [`crate::client::ApiClient`].

use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::access;
use crate::contract::{PostSource, SourceError};
use crate::materialize::{self, MaterializeError};
use crate::paginate;

/// Run-level failure, split by how the process should exit.
#[derive(Debug, Error)]
pub enum BackupError {
    /// The source could not be read; the run stops with a diagnostic. Files
    /// already written stay on disk.
    #[error("post source unavailable: {0}")]
    Source(#[from] SourceError),
    /// The configured team is not visible to the credentials. Checked before
    /// any post is fetched or any file is written.
    #[error("team {0:?} is not accessible with the configured credentials")]
    TeamNotAccessible(String),
    /// The export tree is in a state the collision policy cannot resolve;
    /// fatal, nothing is cleaned up or retried.
    #[error(transparent)]
    Materialize(#[from] MaterializeError),
}

#[derive(Debug, Default)]
pub struct BackupReport {
    pub posts_written: u64,
}

/// Export every post of `team` under `root`.
pub async fn run_backup<S>(source: &S, team: &str, root: &Path) -> Result<BackupReport, BackupError>
where
    S: PostSource + ?Sized,
{
    info!(team, root = %root.display(), "starting backup run");

    if !access::can_access_team(source, team).await? {
        return Err(BackupError::TeamNotAccessible(team.to_string()));
    }

    let mut posts_written: u64 = 0;
    paginate::for_each_post(source, team, |post| {
        debug!(path = %post.full_path, "materialising post");
        materialize::materialize(root, &post)?;
        posts_written += 1;
        Ok(())
    })
    .await?;

    info!(posts = posts_written, "backup run complete");
    Ok(BackupReport { posts_written })
}
