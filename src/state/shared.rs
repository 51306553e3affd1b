// Shared settings
// Whole-object replace of the active settings, readable from any thread
use std::sync::{Arc, Mutex, PoisonError};

use super::models::Settings;
use super::storage::{MappingStore, StoreError, StoreResult};

// Thread-safe settings wrapper
//
// Readers take a cheap `Arc` snapshot and never observe a half-applied edit.
// Writers that persist go through `commit_lock`, so the file on disk and the
// in-memory settings change in the same order.
#[derive(Debug)]
pub struct SharedSettings {
    inner: Arc<Mutex<Arc<Settings>>>,
    commit_lock: Arc<Mutex<()>>,
}

impl SharedSettings {
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Arc::new(settings))),
            commit_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Current settings
    pub fn snapshot(&self) -> Arc<Settings> {
        let guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Swap in new settings
    pub fn replace(&self, settings: Settings) {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(settings);
    }

    /// Persist `settings`, then make them current
    ///
    /// Nothing is swapped in when the save fails.
    pub fn commit(&self, store: &MappingStore, settings: Settings) -> StoreResult<()> {
        let _commit = self.commit_lock.lock().unwrap_or_else(PoisonError::into_inner);
        store.save(&settings)?;
        self.replace(settings);
        Ok(())
    }

    /// Edit a copy of the current settings, persist it, then make it current
    ///
    /// Runs under the commit lock, so concurrent updates never drop each
    /// other's changes. When `edit` or the save fails nothing changes.
    pub fn update<T, E, F>(&self, store: &MappingStore, edit: F) -> Result<T, E>
    where
        F: FnOnce(&mut Settings) -> Result<T, E>,
        E: From<StoreError>,
    {
        let _commit = self.commit_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut settings = (*self.snapshot()).clone();
        let value = edit(&mut settings)?;
        store.save(&settings)?;
        self.replace(settings);
        Ok(value)
    }
}

impl Clone for SharedSettings {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            commit_lock: Arc::clone(&self.commit_lock),
        }
    }
}

impl Default for SharedSettings {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
