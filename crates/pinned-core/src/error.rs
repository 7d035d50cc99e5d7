use thiserror::Error;

/// Application-wide error types for the pinned repository service.
///
/// `Clone` and `PartialEq` are derived so mocks can replay errors and
/// tests can assert on exact variants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Upstream returned a non-2xx status. The status code is kept so the
    /// pipeline can distinguish "not found" from "rate limited".
    #[error("HTTP {status} for {url}")]
    Upstream { status: u16, url: String },

    /// Network/connection error.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// Request validation failed (e.g. missing username).
    #[error("{0}")]
    InvalidInput(String),

    /// The profile page does not exist upstream.
    #[error("user '{0}' not found")]
    ProfileNotFound(String),

    /// The profile page exists but has no pinned items.
    #[error("no pinned repositories found")]
    NoPinnedRepos,

    /// Upstream rate limit hit while fetching the profile page.
    #[error("rate limited by upstream")]
    RateLimited,

    /// Pinned item has no anchor element at all.
    #[error("invalid repository data: missing repository link")]
    MissingLink,

    /// Pinned item anchor href has fewer than two path segments.
    #[error("invalid repository path: {0:?}")]
    InvalidPath(String),

    /// Owner or repository name segment is empty.
    #[error("invalid repository owner or name")]
    InvalidOwnerOrRepo,
}

impl AppError {
    /// Returns true for structural extraction failures of a pinned item.
    ///
    /// These fail the whole pipeline call, unlike homepage-discovery
    /// failures which are absorbed per item.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            AppError::MissingLink | AppError::InvalidPath(_) | AppError::InvalidOwnerOrRepo
        )
    }
}
