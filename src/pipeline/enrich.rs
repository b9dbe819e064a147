//! Thumbnail fan-out/fan-in.

use std::num::NonZeroUsize;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::catalog::Book;
use crate::images::{Thumbnail, ThumbnailSource};

/// Attach a thumbnail to every book.
///
/// Books without a thumbnail link get the placeholder immediately. Every
/// other book gets one spawned task, at most `limit` of them downloading at
/// once. Each task hands back `(index, thumbnail)` and the result is written
/// into that slot, so completion order never reorders `books`.
pub(crate) async fn enrich(
    thumbnails: &Arc<dyn ThumbnailSource>,
    books: &mut [Book],
    limit: Option<NonZeroUsize>,
) {
    let permits = limit.map(|n| Arc::new(Semaphore::new(n.get())));
    let mut tasks = JoinSet::new();

    for (index, book) in books.iter_mut().enumerate() {
        let Some(url) = book.thumbnail_url.clone() else {
            book.thumbnail = Some(Thumbnail::Placeholder);
            continue;
        };

        let source = Arc::clone(thumbnails);
        let permits = permits.clone();
        tasks.spawn(async move {
            let _permit = match permits {
                Some(permits) => permits.acquire_owned().await.ok(),
                None => None,
            };
            (index, source.fetch(Some(&url)).await)
        });
    }

    debug!(books = books.len(), downloads = tasks.len(), "Thumbnail downloads started");

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, thumbnail)) => books[index].thumbnail = Some(thumbnail),
            Err(e) => warn!(error = %e, "Thumbnail task aborted; book keeps the placeholder"),
        }
    }

    for book in books.iter_mut().filter(|b| b.thumbnail.is_none()) {
        book.thumbnail = Some(Thumbnail::Placeholder);
    }
}
