use std::future::Future;
use std::sync::Arc;

use crate::error::AppError;
use crate::models::RepositoryRecord;

/// Fetches the raw body of an absolute URL.
pub trait Fetcher: Send + Sync + Clone {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// Time-expiring store of extracted record sets, keyed by username.
///
/// Injected into the request handler so it can be swapped out in tests.
/// Entries are shared immutably via `Arc`; overwriting a key replaces the
/// whole entry. An expired entry behaves as absent on read.
pub trait RepoCache: Send + Sync + Clone {
    /// Look up a live entry. Returns `None` when absent or expired.
    fn get(
        &self,
        key: &str,
    ) -> impl Future<Output = Option<Arc<Vec<RepositoryRecord>>>> + Send;

    /// Insert or overwrite the entry for `key`.
    fn set(
        &self,
        key: String,
        records: Vec<RepositoryRecord>,
    ) -> impl Future<Output = ()> + Send;

    /// Whether a live entry exists for `key`.
    fn has(&self, key: &str) -> bool;
}
