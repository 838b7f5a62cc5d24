use crate::types::resource_id::ResourceId;
use std::collections::{hash_map::Entry, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// One mutex per resource identifier, so that a fetch and the history merge
/// that follows it run without interleaving with another call for the same
/// identifier in this process.
#[derive(Debug, Default)]
pub(crate) struct ResourceLocks {
    locks: Mutex<HashMap<ResourceId, Arc<Mutex<()>>>>,
}

impl ResourceLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_for(&self, resource_id: &ResourceId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        match locks.entry(resource_id.clone()) {
            Entry::Occupied(entry) => Arc::clone(entry.get()),
            Entry::Vacant(entry) => Arc::clone(entry.insert(Arc::new(Mutex::new(())))),
        }
    }

    /// Runs `f` while holding the lock for `resource_id`.
    pub fn with_lock<R>(&self, resource_id: &ResourceId, f: impl FnOnce() -> R) -> R {
        let lock = self.lock_for(resource_id);
        let _guard: MutexGuard<'_, ()> = lock.lock().unwrap_or_else(PoisonError::into_inner);
        f()
    }
}
