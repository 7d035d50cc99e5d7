use pinned_core::pipeline::PinnedRepoService;
use pinned_core::traits::{Fetcher, RepoCache};

/// Shared application state, available to all route handlers via
/// `State<Arc<AppState<F, C>>>`.
///
/// Generic over the fetcher and cache seams so integration tests run
/// against canned markup and a private cache instance.
pub struct AppState<F: Fetcher, C: RepoCache> {
    pub service: PinnedRepoService<F>,
    pub cache: C,
}
