//! Raw result page cache
//!
//! Pages are cached forever, keyed by the search keywords, so repeated
//! searches do not touch the portal again. Staleness is the caller's problem:
//! a forced refresh skips the lookup but still overwrites the entry.

mod fs_cache;
mod key;

pub use fs_cache::FsPageCache;
pub use key::{CacheKey, KeyScheme};

use crate::error::RegisterResult;

/// Key-value store for captured result pages
#[allow(async_fn_in_trait)]
pub trait PageCache {
    /// Page stored under `key`, `None` if there is none
    async fn get(&self, key: &CacheKey) -> RegisterResult<Option<String>>;

    /// Store `page` under `key`, replacing any previous page
    async fn put(&self, key: &CacheKey, page: &str) -> RegisterResult<()>;
}
