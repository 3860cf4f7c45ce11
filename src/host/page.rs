use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::host::element::{HeadlessElement, HostElement};

/// Well-known id of the element holding the last rendered output.
pub const OUTPUT_ANCHOR_ID: &str = "output";

/// The host document, as far as the bridge is concerned: a way to find
/// elements and to drop any active text selection.
pub trait HostPage: Send + Sync {
    /// Look up an element by its id, if it currently exists in the document.
    fn element_by_id(&self, id: &str) -> Option<Arc<dyn HostElement>>;

    /// Drop any active text selection.
    fn clear_selection(&self);

    /// The element currently holding the rendered output, if present. The
    /// anchor appears on the host's schedule, not the bridge's.
    fn output_anchor(&self) -> Option<Arc<dyn HostElement>> {
        self.element_by_id(OUTPUT_ANCHOR_ID)
    }
}

/// In-memory document backing the headless host. Tests control exactly when
/// elements (notably the output anchor) exist.
#[derive(Default)]
pub struct HeadlessPage {
    elements: Mutex<HashMap<String, Arc<dyn HostElement>>>,
    selection_cleared: AtomicBool,
}

impl HeadlessPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) an element under `id`.
    pub fn insert(&self, id: &str, element: Arc<dyn HostElement>) {
        self.elements
            .lock()
            .unwrap()
            .insert(id.to_string(), element);
    }

    /// Insert a fresh headless element under `id` unless one already exists,
    /// returning the element now registered there.
    pub fn ensure(&self, id: &str) -> Arc<dyn HostElement> {
        self.elements
            .lock()
            .unwrap()
            .entry(id.to_string())
            .or_insert_with(|| Arc::new(HeadlessElement::new()))
            .clone()
    }

    /// Remove the element under `id`, if any.
    pub fn remove(&self, id: &str) {
        self.elements.lock().unwrap().remove(id);
    }

    pub fn selection_was_cleared(&self) -> bool {
        self.selection_cleared.load(Ordering::SeqCst)
    }
}

impl HostPage for HeadlessPage {
    fn element_by_id(&self, id: &str) -> Option<Arc<dyn HostElement>> {
        self.elements.lock().ok()?.get(id).cloned()
    }

    fn clear_selection(&self) {
        self.selection_cleared.store(true, Ordering::SeqCst);
    }
}
