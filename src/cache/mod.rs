//! Session cache abstraction.
//!
//! The cache is a process-wide string key/value store (browser local
//! storage, a shared in-memory map, a Redis namespace...). The profile form
//! only reads the cached user record at load time and optionally writes
//! the refreshed record back after a successful save. It is injected as a
//! [`SessionCache`] implementation rather than accessed globally, so tests
//! can substitute their own.
//!
//! # Example Usage
//!
//! ```rust
//! use profile_form::cache::{InMemorySessionCache, SessionCache};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let cache = InMemorySessionCache::new();
//! cache.set("userDataKey", "cognito.ann.userData").await?;
//!
//! let pointer = cache.get("userDataKey").await?;
//! assert_eq!(pointer.as_deref(), Some("cognito.ann.userData"));
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod in_memory;

pub use errors::CacheError;
pub use in_memory::InMemorySessionCache;

use std::future::Future;

/// Async key/value store holding serialized session data.
///
/// Implementations must be safe to share across tasks. Values are opaque
/// strings; the form serializes and parses them itself.
pub trait SessionCache: Send + Sync {
    /// The error type returned by cache operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the value stored under `key`, `None` if absent.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Remove `key`. Returns whether it was present.
    fn remove(&self, key: &str) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}

/// Outcome of looking up the cached user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CacheLookup {
    /// The serialized user record and the key it was found under.
    Hit { key: String, payload: String },
    Miss,
}

/// Resolve the cached user record.
///
/// With `indirect` set, the entry under `key` names the entry that holds
/// the record; otherwise `key` holds the record itself. Any missing link
/// in the chain is a miss.
pub(crate) async fn lookup_user_data<C: SessionCache>(
    cache: &C,
    key: &str,
    indirect: bool,
) -> Result<CacheLookup, C::Error> {
    let data_key = if indirect {
        match cache.get(key).await? {
            Some(pointer) if !pointer.is_empty() => pointer,
            _ => return Ok(CacheLookup::Miss),
        }
    } else {
        key.to_string()
    };

    Ok(match cache.get(&data_key).await? {
        Some(payload) => CacheLookup::Hit {
            key: data_key,
            payload,
        },
        None => CacheLookup::Miss,
    })
}
