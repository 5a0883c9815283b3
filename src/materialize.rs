//! Filesystem materializer: turns one post into directories and a file under
//! the export root, resolving directory/file path collisions.
//!
//! A post whose full path must also serve as a directory keeps its body in a
//! `README` file inside that directory. Collisions are detected from the
//! filesystem itself (a stat of the conflicting path), never by matching
//! error-message text; no in-memory index of written paths is kept.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::contract::PostRecord;

/// Directory every exported path is rooted under.
pub const EXPORT_ROOT: &str = "backup";

/// Filename holding the body of a post whose path doubles as a directory.
pub const INDEX_FILE: &str = "README";

/// Fatal materializer faults. None of these are retried or cleaned up after;
/// the run halts so no post content is silently overwritten.
#[derive(Debug, Error)]
pub enum MaterializeError {
    /// Two distinct posts both need the same `README` slot.
    #[error("{path} already exists; refusing to overwrite another post's content")]
    DuplicateIndex { path: PathBuf },
    #[error("filesystem operation on {path} failed: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn io_fault(path: &Path, source: io::Error) -> MaterializeError {
    MaterializeError::Io {
        path: path.to_path_buf(),
        source,
    }
}

enum DirOutcome {
    Ready,
    /// A regular file sits exactly where the directory must go.
    BlockedByFile,
    Failed(io::Error),
}

fn ensure_dir(path: &Path) -> DirOutcome {
    match fs::create_dir_all(path) {
        Ok(()) => DirOutcome::Ready,
        Err(_) if path.is_file() => DirOutcome::BlockedByFile,
        // Includes a file blocking a deeper ancestor, which has no defined
        // resolution and stays fatal.
        Err(e) => DirOutcome::Failed(e),
    }
}

/// Move the file occupying `parent` aside, rebuild the directory, and park
/// the file inside it as `README`.
fn demote_file_to_index(parent: &Path) -> Result<(), MaterializeError> {
    let mut holding = parent.as_os_str().to_os_string();
    holding.push("bk");
    let holding = PathBuf::from(holding);

    fs::rename(parent, &holding).map_err(|e| io_fault(parent, e))?;
    fs::create_dir_all(parent).map_err(|e| io_fault(parent, e))?;

    let index = parent.join(INDEX_FILE);
    if index.exists() {
        return Err(MaterializeError::DuplicateIndex { path: index });
    }
    fs::rename(&holding, &index).map_err(|e| io_fault(&index, e))?;

    debug!(index = %index.display(), "demoted blocking file to directory index");
    Ok(())
}

/// Write one post under `root`, creating any missing ancestor directories and
/// applying the `README` collision policy in both directions.
pub fn materialize(root: &Path, post: &PostRecord) -> Result<(), MaterializeError> {
    // Leading separators would make the join discard `root`; every post must
    // land inside the export root.
    let relative = post.full_path.trim_start_matches('/');
    if relative.is_empty() {
        return Err(io_fault(
            root,
            io::Error::new(io::ErrorKind::InvalidInput, "post has an empty path"),
        ));
    }

    let leaf = root.join(relative);
    let parent = leaf.parent().unwrap_or(root).to_path_buf();

    match ensure_dir(&parent) {
        DirOutcome::Ready => {}
        // An earlier post's file occupies the spot this post needs as its
        // parent directory.
        DirOutcome::BlockedByFile => demote_file_to_index(&parent)?,
        DirOutcome::Failed(e) => return Err(io_fault(&parent, e)),
    }

    match fs::write(&leaf, post.body.as_bytes()) {
        Ok(()) => {
            debug!(path = %leaf.display(), "wrote post");
            Ok(())
        }
        // An earlier post already turned this path into a directory; this
        // post's body becomes that directory's index document.
        Err(_) if leaf.is_dir() => {
            let index = leaf.join(INDEX_FILE);
            if index.exists() {
                return Err(MaterializeError::DuplicateIndex { path: index });
            }
            fs::write(&index, post.body.as_bytes()).map_err(|e| io_fault(&index, e))?;
            debug!(path = %index.display(), "wrote post as directory index");
            Ok(())
        }
        Err(e) => Err(io_fault(&leaf, e)),
    }
}
