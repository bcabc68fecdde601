// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Envkeep Authors

//! In-process cache of resolved settings, emptied after each save and
//! refilled lazily on the next access.

use crate::resolver::SettingsSnapshot;
use crate::store::SettingsStore;
use log::debug;
use std::sync::{Arc, RwLock};

/// Observer notified exactly once per successful save.
///
/// The store calls every registered hook synchronously before the save
/// returns. Hooks are injected dependencies, so the engine stays
/// testable without a live cache subsystem.
pub trait InvalidationHook: Send + Sync {
    fn invalidate(&self);
}

/// A lazily refreshed snapshot holder.
///
/// `get` returns the cached snapshot, resolving one from the store
/// only when the slot is empty. Register the cache as a hook on the
/// store and every successful save clears the slot, so the next `get`
/// observes the new file.
pub struct SettingsCache {
    slot: RwLock<Option<Arc<SettingsSnapshot>>>,
}

impl SettingsCache {
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// The cached snapshot, loading from `store` when the cache is
    /// empty.
    pub fn get(&self, store: &SettingsStore) -> Arc<SettingsSnapshot> {
        {
            let slot = self.slot.read().unwrap(); //#[allow_ci]
            if let Some(snapshot) = slot.as_ref() {
                return Arc::clone(snapshot);
            }
        }

        let fresh = Arc::new(store.resolve());
        let mut slot = self.slot.write().unwrap(); //#[allow_ci]
        match slot.as_ref() {
            // a racing caller may have refilled the slot; reuse it
            Some(existing) => Arc::clone(existing),
            None => {
                *slot = Some(Arc::clone(&fresh));
                fresh
            }
        }
    }

    /// Empties the cache; the next `get` resolves from the file again.
    pub fn clear(&self) {
        debug!("settings cache cleared");
        *self.slot.write().unwrap() = None; //#[allow_ci]
    }

    /// True when a snapshot is currently held.
    pub fn is_loaded(&self) -> bool {
        self.slot.read().unwrap().is_some() //#[allow_ci]
    }
}

impl Default for SettingsCache {
    fn default() -> Self {
        Self::new()
    }
}

impl InvalidationHook for SettingsCache {
    fn invalidate(&self) {
        self.clear();
    }
}

// Unit Testing
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_caches_until_cleared() {
        let dir = tempfile::tempdir().unwrap(); //#[allow_ci]
        let path = dir.path().join(".env");
        std::fs::write(&path, "ADMIN_USER=alice\n").unwrap(); //#[allow_ci]

        let store = SettingsStore::new(&path);
        let cache = SettingsCache::new();
        assert!(!cache.is_loaded());

        let first = cache.get(&store);
        assert_eq!(first.get("ADMIN_USER"), Some("alice"));
        assert!(cache.is_loaded());

        // Same snapshot instance while the cache holds it
        let second = cache.get(&store);
        assert!(Arc::ptr_eq(&first, &second));

        // A direct file edit is invisible until the cache is cleared
        std::fs::write(&path, "ADMIN_USER=bob\n").unwrap(); //#[allow_ci]
        assert_eq!(cache.get(&store).get("ADMIN_USER"), Some("alice"));

        cache.clear();
        assert!(!cache.is_loaded());
        assert_eq!(cache.get(&store).get("ADMIN_USER"), Some("bob"));
    }

    #[test]
    fn test_invalidation_hook_clears() {
        let dir = tempfile::tempdir().unwrap(); //#[allow_ci]
        let path = dir.path().join(".env");
        std::fs::write(&path, "ADMIN_USER=alice\n").unwrap(); //#[allow_ci]

        let store = SettingsStore::new(&path);
        let cache: Arc<dyn InvalidationHook> =
            Arc::new(SettingsCache::new());

        // Through the trait object, as the store fires it
        cache.invalidate();

        let concrete = SettingsCache::new();
        let _ = concrete.get(&store);
        assert!(concrete.is_loaded());
        InvalidationHook::invalidate(&concrete);
        assert!(!concrete.is_loaded());
    }
}
