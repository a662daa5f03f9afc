//! Parallel fetching of the remaining pages of a list request.

use std::future::Future;
use std::pin::Pin;

use futures::stream::{FuturesUnordered, StreamExt};
use log::debug;

use crate::error::Result;

type PageFuture<T> = Pin<Box<dyn Future<Output = (usize, Result<Vec<T>>)> + Send>>;

/// Default cap on in-flight page requests
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Fetch all remaining pages after the first one, at most `max_concurrent` at a time.
///
/// `offsets` come from [`PagedResponse::remaining_offsets`](super::PagedResponse::remaining_offsets).
/// Results are returned sorted by offset so output order matches the server's.
/// The first failing page aborts the whole fetch.
pub async fn fetch_remaining_pages<T, F, Fut>(
    offsets: Vec<usize>,
    fetch_page: F,
    max_concurrent: usize,
) -> Result<Vec<T>>
where
    T: Send + 'static,
    F: Fn(usize) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<T>>> + Send + 'static,
{
    if offsets.is_empty() {
        return Ok(Vec::new());
    }

    debug!(
        "Fetching {} remaining pages with max {} concurrent",
        offsets.len(),
        max_concurrent
    );

    let mut pages: Vec<(usize, Vec<T>)> = Vec::with_capacity(offsets.len());
    let mut futures: FuturesUnordered<PageFuture<T>> = FuturesUnordered::new();
    let mut pending = offsets.into_iter();

    let make_future = |offset: usize, f: &F| -> PageFuture<T> {
        let fut = f(offset);
        Box::pin(async move { (offset, fut.await) })
    };

    for offset in pending.by_ref().take(max_concurrent.max(1)) {
        futures.push(make_future(offset, &fetch_page));
    }

    while let Some((offset, result)) = futures.next().await {
        let items = result?;
        debug!("Page at offset {} returned {} items", offset, items.len());
        pages.push((offset, items));

        if let Some(next) = pending.next() {
            futures.push(make_future(next, &fetch_page));
        }
    }

    pages.sort_by_key(|(offset, _)| *offset);
    let all_items: Vec<T> = pages.into_iter().flat_map(|(_, items)| items).collect();
    debug!("Fetched {} total items from remaining pages", all_items.len());
    Ok(all_items)
}
