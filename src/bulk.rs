//! Fan-out/fan-in over many URLs
//!
//! Every URL gets its own task on a shared child context. The first failure
//! cancels that context, the remaining tasks unwind at their next suspension
//! point, and the coordinator drains them all before reporting the one error.

use crate::{FetchClient, FetchContext, FetchError, Fields, Link, Transport};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

impl<T: Transport> FetchClient<T> {
    /// Fetch all `urls` concurrently, returning results in input order.
    ///
    /// Fails as a whole if any single fetch fails; in that case the sibling
    /// fetches are cancelled and only the first error is returned, wrapped in
    /// [`FetchError::Bulk`] with the offending index and URL. Use
    /// [`FetchClient::fetch_bulk_partial`] to keep the records that finished.
    pub async fn fetch_bulk(
        &self,
        ctx: &FetchContext,
        urls: &[String],
        mask: Fields,
    ) -> Result<Vec<Link>, FetchError> {
        let (results, first_error) = self.fetch_bulk_partial(ctx, urls, mask).await;

        if let Some(e) = first_error {
            return Err(e);
        }

        let links: Option<Vec<Link>> = results.into_iter().collect();
        links.ok_or_else(|| FetchError::TaskFailed("bulk fetch lost a result".to_string()))
    }

    /// Same fan-out as [`FetchClient::fetch_bulk`], but hands back every
    /// position alongside the first error.
    ///
    /// Slot `i` holds the record for `urls[i]` if that fetch completed before
    /// the batch was cancelled, `None` otherwise. Without an error every slot
    /// is filled.
    pub async fn fetch_bulk_partial(
        &self,
        ctx: &FetchContext,
        urls: &[String],
        mask: Fields,
    ) -> (Vec<Option<Link>>, Option<FetchError>) {
        if urls.is_empty() {
            return (Vec::new(), None);
        }

        let group = ctx.child();
        let mut tasks = JoinSet::new();

        for (index, url) in urls.iter().enumerate() {
            let client = self.clone();
            let group = group.clone();
            let url = url.clone();

            tasks.spawn(async move {
                let result = client.fetch(&group, &url, mask).await;
                (index, url, result)
            });
        }

        info!("Started bulk fetch of {} URLs", urls.len());

        let mut results: Vec<Option<Link>> = vec![None; urls.len()];
        let mut first_error: Option<FetchError> = None;

        while let Some(joined) = tasks.join_next().await {
            let failure = match joined {
                Ok((index, _, Ok(link))) => {
                    results[index] = Some(link);
                    continue;
                }
                Ok((index, url, Err(e))) => FetchError::Bulk {
                    index,
                    url,
                    source: Box::new(e),
                },
                Err(join_error) => FetchError::TaskFailed(join_error.to_string()),
            };

            match &first_error {
                None => {
                    warn!("Bulk fetch aborting: {}", failure);
                    group.cancel();
                    first_error = Some(failure);
                }
                Some(_) => debug!("Discarding sibling failure: {}", failure),
            }
        }

        self.metrics().record_bulk(first_error.is_some());
        (results, first_error)
    }
}
