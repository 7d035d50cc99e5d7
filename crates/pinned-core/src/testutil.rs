//! Test utilities: a mock fetcher and shared HTML fixtures.
//!
//! The mock records every requested URL so tests can assert on network
//! activity (e.g. a cache hit performs zero fetches).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::AppError;
use crate::models::{GITHUB_URL, OPENGRAPH_URL, RepositoryRecord};
use crate::traits::Fetcher;

/// Mock fetcher backed by a URL → response map.
///
/// Unregistered URLs return a network error, which is what the pipeline's
/// homepage discovery treats as an absorbed failure.
#[derive(Clone, Default)]
pub struct MockFetcher {
    pages: Arc<Mutex<HashMap<String, Result<String, AppError>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a successful response body for a URL.
    pub fn with_page(self, url: &str, body: &str) -> Self {
        self.pages
            .lock()
            .unwrap()
            .insert(url.to_string(), Ok(body.to_string()));
        self
    }

    /// Register an error response for a URL.
    pub fn with_error(self, url: &str, error: AppError) -> Self {
        self.pages
            .lock()
            .unwrap()
            .insert(url.to_string(), Err(error));
        self
    }

    /// Number of fetches performed so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// URLs requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        self.calls.lock().unwrap().push(url.to_string());
        match self.pages.lock().unwrap().get(url) {
            Some(response) => response.clone(),
            None => Err(AppError::Network(format!("no mock page for {url}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Profile page with two pinned repositories: alice/widget (Rust, 42 stars,
/// 7 forks) and alice/gadget (Go, 5 stars, 1 fork).
pub fn sample_profile() -> String {
    r##"
    <html><body>
      <div class="js-pinned-item-list-item">
        <a href="/alice/widget">widget</a>
        <p class="pinned-item-desc">
          A tiny widget
        </p>
        <span class="repo-language-color" style="background-color: #dea584;"></span>
        <span itemprop="programmingLanguage">Rust</span>
        <a class="pinned-item-meta" href="/alice/widget/stargazers">
          42
        </a>
        <a class="pinned-item-meta" href="/alice/widget/forks">
          7
        </a>
      </div>
      <div class="js-pinned-item-list-item">
        <a href="/alice/gadget">gadget</a>
        <p class="pinned-item-desc">
          Gadget things
        </p>
        <span class="repo-language-color" style="background-color: #00ADD8;"></span>
        <span itemprop="programmingLanguage">Go</span>
        <a class="pinned-item-meta" href="/alice/gadget/stargazers">
          5
        </a>
        <a class="pinned-item-meta" href="/alice/gadget/forks">
          1
        </a>
      </div>
    </body></html>
    "##
    .to_string()
}

/// Repository page whose sidebar metadata region links to `website`.
pub fn repo_page(website: &str) -> String {
    format!(
        r#"
        <html><body>
          <div class="BorderGrid-cell">
            <a href="/alice/widget/releases">Releases</a>
            <a href="{website}">{website}</a>
          </div>
        </body></html>
        "#
    )
}

/// A fully populated record for cache and serialization tests.
pub fn make_record(owner: &str, repo: &str) -> RepositoryRecord {
    RepositoryRecord {
        owner: owner.to_string(),
        repo: repo.to_string(),
        link: format!("{GITHUB_URL}/{owner}/{repo}"),
        description: "A tiny widget".to_string(),
        image: format!("{OPENGRAPH_URL}/{owner}/{repo}"),
        website: "https://widget.example".to_string(),
        language: "Rust".to_string(),
        language_color: "#dea584".to_string(),
        stars: 42,
        forks: 7,
    }
}
