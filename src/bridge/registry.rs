use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::editor::{EditorContext, InstanceId};

/// Live instance contexts, keyed by [`InstanceId`].
///
/// An entry exists exactly for the lifetime of its instance: inserted on
/// creation, removed on destroy. Configuration broadcasts iterate the
/// entries that exist at call time.
#[derive(Clone, Default)]
pub struct InstanceRegistry {
    entries: Arc<Mutex<HashMap<InstanceId, Arc<EditorContext>>>>,
}

impl InstanceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&self, id: InstanceId, ctx: Arc<EditorContext>) {
        self.entries.lock().unwrap().insert(id, ctx);
    }

    pub(crate) fn remove(&self, id: InstanceId) -> Option<Arc<EditorContext>> {
        self.entries.lock().unwrap().remove(&id)
    }

    pub fn get(&self, id: InstanceId) -> Option<Arc<EditorContext>> {
        self.entries.lock().ok()?.get(&id).cloned()
    }

    /// Snapshot of all currently registered contexts.
    pub(crate) fn contexts(&self) -> Vec<Arc<EditorContext>> {
        self.entries.lock().unwrap().values().cloned().collect()
    }

    pub fn ids(&self) -> Vec<InstanceId> {
        self.entries
            .lock()
            .map(|e| e.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
