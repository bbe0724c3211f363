//! Profile cache boundary plus the in-memory TTL implementation.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use crate::profile::PatientNeedsProfile;

use super::StoreError;

pub trait ProfileCache: Send + Sync {
    /// Returns the cached profile if present and not expired.
    fn get(&self, key: &str) -> Result<Option<PatientNeedsProfile>, StoreError>;

    fn put(
        &self,
        key: &str,
        profile: PatientNeedsProfile,
        ttl: Duration,
    ) -> Result<(), StoreError>;

    fn forget(&self, key: &str) -> Result<(), StoreError>;
}

struct CacheEntry {
    expires_at: Instant,
    profile: PatientNeedsProfile,
}

/// In-memory TTL cache. Expired entries are dropped on access.
#[derive(Default)]
pub struct MemoryProfileCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryProfileCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ProfileCache for MemoryProfileCache {
    fn get(&self, key: &str) -> Result<Option<PatientNeedsProfile>, StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::LockFailed)?;
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Ok(Some(entry.profile.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn put(
        &self,
        key: &str,
        profile: PatientNeedsProfile,
        ttl: Duration,
    ) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::LockFailed)?;
        entries.insert(
            key.to_string(),
            CacheEntry {
                expires_at: Instant::now() + ttl,
                profile,
            },
        );
        Ok(())
    }

    fn forget(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::LockFailed)?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn put_then_get_within_ttl() {
        let cache = MemoryProfileCache::new();
        let profile = PatientNeedsProfile::minimal(Uuid::new_v4());

        cache
            .put("needs_profile:x", profile.clone(), Duration::from_secs(60))
            .unwrap();

        let hit = cache.get("needs_profile:x").unwrap();
        assert_eq!(hit, Some(profile));
    }

    #[test]
    fn expired_entry_is_dropped() {
        let cache = MemoryProfileCache::new();
        let profile = PatientNeedsProfile::minimal(Uuid::new_v4());

        cache
            .put("needs_profile:x", profile, Duration::ZERO)
            .unwrap();

        assert!(cache.get("needs_profile:x").unwrap().is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn forget_removes_the_entry() {
        let cache = MemoryProfileCache::new();
        let profile = PatientNeedsProfile::minimal(Uuid::new_v4());

        cache
            .put("needs_profile:x", profile, Duration::from_secs(60))
            .unwrap();
        cache.forget("needs_profile:x").unwrap();

        assert!(cache.get("needs_profile:x").unwrap().is_none());
    }

    #[test]
    fn unknown_key_is_a_clean_miss() {
        let cache = MemoryProfileCache::new();
        assert!(cache.get("needs_profile:nope").unwrap().is_none());
    }
}
