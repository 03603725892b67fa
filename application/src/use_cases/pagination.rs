//! Bounded page walk over a token-paginated listing.

use std::future::Future;

use ociops_domain::cloud::{CloudError, Page};
use ociops_domain::core::error::PaginationExhaustionError;
use tracing::debug;

/// Fetch pages until one comes back without a continuation token.
///
/// `fetch` receives `None` for the first page and the previous page's
/// token afterwards. An empty token counts as absent. If page
/// `max_pages` still carries a token the walk fails with
/// [`PaginationExhaustionError`] instead of looping on.
pub async fn collect_pages<T, F, Fut>(max_pages: usize, mut fetch: F) -> Result<Vec<T>, CloudError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, CloudError>>,
{
    let mut items = Vec::new();
    let mut token: Option<String> = None;

    for page_number in 1..=max_pages {
        let page = fetch(token.take()).await?;
        debug!(page = page_number, items = page.items.len(), "Fetched page");
        items.extend(page.items);

        match page.next_page {
            Some(next) if !next.is_empty() => token = Some(next),
            _ => return Ok(items),
        }
    }

    Err(PaginationExhaustionError { max_pages }.into())
}
