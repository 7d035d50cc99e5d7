use std::sync::Arc;

use axum::Router;

use pinned_core::cache::MokaRepoCache;
use pinned_core::pipeline::PinnedRepoService;
use pinned_core::testutil::MockFetcher;
use pinned_server::routes;
use pinned_server::state::AppState;

pub const PROFILE_URL: &str = "https://github.com/alice";

/// Build the test app around a mock fetcher, returning the router and the
/// cache so tests can preload or inspect entries.
pub fn setup_test_app(fetcher: MockFetcher) -> (Router, MokaRepoCache) {
    let cache = MokaRepoCache::default();
    let state = Arc::new(AppState {
        service: PinnedRepoService::new(fetcher),
        cache: cache.clone(),
    });
    (routes::router(state), cache)
}
