//! Page-cursor loop over the post source.

use tracing::debug;

use crate::backup::BackupError;
use crate::contract::{PostRecord, PostSource};
use crate::materialize::MaterializeError;

/// The posts endpoint is 1-based.
pub const FIRST_PAGE: u32 = 1;

/// Fetch every page of posts for `team` and invoke `visit` once per post, in
/// the order the source returned them, until the source reports no further
/// page.
///
/// A fetch failure aborts the remaining pagination; posts already visited are
/// not rolled back. An error from `visit` is a materializer fault and is
/// propagated unchanged.
pub async fn for_each_post<S, F>(source: &S, team: &str, mut visit: F) -> Result<(), BackupError>
where
    S: PostSource + ?Sized,
    F: FnMut(PostRecord) -> Result<(), MaterializeError>,
{
    let mut page = FIRST_PAGE;
    loop {
        let batch = source.list_posts(team, page).await?;
        debug!(page, posts = batch.posts.len(), "fetched page of posts");

        for post in batch.posts {
            visit(post)?;
        }

        match batch.next_page {
            Some(next) => page = next,
            None => return Ok(()),
        }
    }
}
