//! Attribute loading and cache write-back.

use crate::attributes::{AttributeMap, CachedUserData};
use crate::cache::{CacheLookup, SessionCache, lookup_user_data};
use crate::config::ProfileFormConfig;
use crate::error::{ProfileError, ProfileResult};
use crate::provider::IdentityProvider;
use log::{debug, info, warn};
use serde_json::Value;
use std::fmt;

/// Where the loaded attributes came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadSource {
    Cache,
    Provider,
}

impl fmt::Display for LoadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadSource::Cache => f.write_str("session cache"),
            LoadSource::Provider => f.write_str("identity provider"),
        }
    }
}

/// Attributes produced by [`load_attributes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedAttributes {
    pub attributes: AttributeMap,
    pub source: LoadSource,
}

/// Load the current user's attributes.
///
/// The session cache is consulted first. A cached record that is present
/// and parses is used as-is and the provider is not called. A cache miss,
/// an unreadable cache, or a malformed record falls through to
/// [`IdentityProvider::current_user_info`].
///
/// # Errors
///
/// Returns [`ProfileError::LoadFailure`] if the provider call fails.
pub async fn load_attributes<P, C>(
    provider: &P,
    cache: &C,
    config: &ProfileFormConfig,
) -> ProfileResult<LoadedAttributes>
where
    P: IdentityProvider,
    C: SessionCache,
{
    match lookup_user_data(cache, &config.cache_key, !config.direct_cache_lookup).await {
        Ok(CacheLookup::Hit { key, payload }) => match CachedUserData::from_json(&payload) {
            Ok(data) => {
                debug!("Loaded cached user data from '{key}'");
                return Ok(LoadedAttributes {
                    attributes: data.to_attribute_map(),
                    source: LoadSource::Cache,
                });
            }
            Err(e) => warn!("Ignoring malformed cached user data under '{key}': {e}"),
        },
        Ok(CacheLookup::Miss) => debug!("No cached user data under '{}'", config.cache_key),
        Err(e) => warn!("Session cache unreadable, falling back to provider: {e}"),
    }

    let info = provider
        .current_user_info()
        .await
        .map_err(ProfileError::load)?;
    info!(
        "Fetched {} attribute(s) from identity provider",
        info.attributes.len()
    );

    Ok(LoadedAttributes {
        attributes: info.attributes,
        source: LoadSource::Provider,
    })
}

/// Write `attributes` back into the cached user record.
///
/// The record's other top-level fields are preserved. In indirect mode
/// nothing is written when the pointer entry is missing, since there is
/// no known location for the record. Returns whether a write happened.
///
/// # Errors
///
/// Returns [`ProfileError::Cache`] if the cache fails and
/// [`ProfileError::Json`] if the record cannot be serialized.
pub async fn store_attributes<C>(
    cache: &C,
    config: &ProfileFormConfig,
    attributes: &AttributeMap,
) -> ProfileResult<bool>
where
    C: SessionCache,
{
    let key = if config.direct_cache_lookup {
        config.cache_key.clone()
    } else {
        match cache
            .get(&config.cache_key)
            .await
            .map_err(ProfileError::cache)?
        {
            Some(pointer) if !pointer.is_empty() => pointer,
            _ => {
                debug!(
            "No cache pointer under '{}', skipping write-back",
            config.cache_key
        );
                return Ok(false);
            }
        }
    };

    let existing = cache.get(&key).await.map_err(ProfileError::cache)?;
    let mut record = match existing.as_deref().map(serde_json::from_str::<Value>) {
        Some(Ok(Value::Object(map))) => map,
        _ => serde_json::Map::new(),
    };

    let fresh = serde_json::to_value(CachedUserData::from(attributes))?;
    if let Value::Object(fresh) = fresh {
        record.extend(fresh);
    }

    let payload = serde_json::to_string(&Value::Object(record))?;
    cache
        .set(&key, &payload)
        .await
        .map_err(ProfileError::cache)?;
    debug!("Wrote {} attribute(s) back to '{key}'", attributes.len());
    Ok(true)
}
