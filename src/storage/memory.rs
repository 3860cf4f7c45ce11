use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;

use crate::storage::PreferenceStore;

/// In-memory preference store (no persistence). Used as a default when the
/// embedding host does not provide storage.
#[derive(Default)]
pub struct InMemoryPreferences {
    map: Mutex<HashMap<String, String>>,
}

impl InMemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for InMemoryPreferences {
    fn get_item(&self, key: &str) -> Option<String> {
        self.map.lock().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.map
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.map.lock().unwrap().remove(key);
        Ok(())
    }
}
