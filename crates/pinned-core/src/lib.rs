pub mod cache;
pub mod error;
pub mod extract;
pub mod models;
pub mod pipeline;
pub mod testutil;
pub mod traits;

pub use cache::{CacheConfig, MokaRepoCache};
pub use error::AppError;
pub use models::RepositoryRecord;
pub use pipeline::PinnedRepoService;
pub use traits::{Fetcher, RepoCache};
