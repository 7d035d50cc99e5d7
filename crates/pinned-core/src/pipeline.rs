use futures::future;

use crate::error::AppError;
use crate::extract;
use crate::models::{GITHUB_URL, RepositoryRecord};
use crate::traits::Fetcher;

/// Orchestrates one full extraction run: fetch profile → locate pinned
/// items → structural parse → concurrent homepage enrichment.
///
/// Generic over the [`Fetcher`] so tests run against canned markup instead
/// of the network.
#[derive(Clone)]
pub struct PinnedRepoService<F: Fetcher> {
    fetcher: F,
}

impl<F: Fetcher> PinnedRepoService<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Extract the pinned repository records for a profile, in the order
    /// they appear on the page.
    ///
    /// A structural error on any single pinned item fails the whole call;
    /// a failed homepage discovery only blanks that item's `website`.
    pub async fn extract(&self, username: &str) -> Result<Vec<RepositoryRecord>, AppError> {
        let url = format!("{GITHUB_URL}/{username}");
        tracing::info!(%username, "fetching profile page");

        let html = self.fetcher.fetch(&url).await.map_err(|err| match err {
            AppError::Upstream { status: 404, .. } => {
                AppError::ProfileNotFound(username.to_string())
            }
            AppError::Upstream { status: 429, .. } => AppError::RateLimited,
            other => other,
        })?;

        let items = extract::parse_profile(&html)?;
        if items.is_empty() {
            return Err(AppError::NoPinnedRepos);
        }
        tracing::debug!(count = items.len(), "found pinned items");

        // Homepage discovery is the slow, failure-prone part; run it
        // concurrently across items. join_all preserves input order and a
        // failed fetch is absorbed inside discover_website.
        let tasks = items.into_iter().map(|item| async move {
            let website = extract::discover_website(&self.fetcher, &item.link).await;
            item.into_record(website)
        });

        Ok(future::join_all(tasks).await)
    }
}
