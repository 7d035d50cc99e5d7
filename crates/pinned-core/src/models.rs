use serde::{Deserialize, Serialize};

/// Base URL of the profile/repository host.
pub const GITHUB_URL: &str = "https://github.com";

/// Base URL for the derived preview image of a repository.
pub const OPENGRAPH_URL: &str = "https://opengraph.githubassets.com/1";

/// One pinned repository, as served by the API.
///
/// `stars` and `forks` default to 0 on absent or non-numeric markup rather
/// than failing extraction; `website` is best-effort and empty when the
/// homepage-discovery fetch fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryRecord {
    pub owner: String,
    pub repo: String,
    /// Canonical `https://github.com/<owner>/<repo>`.
    pub link: String,
    pub description: String,
    /// Preview image URL, deterministic from owner/repo.
    pub image: String,
    /// Discovered homepage link, empty if absent or the fetch failed.
    pub website: String,
    pub language: String,
    /// CSS color parsed from the language dot's inline style.
    pub language_color: String,
    pub stars: u32,
    pub forks: u32,
}
