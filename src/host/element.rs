use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// A mutable HTML region owned by the host document.
///
/// Both the mount target handed to
/// [`create_editor`](crate::bridge::Bridge::create_editor) and the shared
/// output anchor are elements; the bridge only ever reads, overwrites, and
/// focuses them.
pub trait HostElement: Send + Sync {
    /// Current inner HTML of the region.
    fn html(&self) -> String;

    /// Replaces the region's contents.
    fn set_html(&self, html: &str);

    /// Moves host focus to the region.
    fn focus(&self);
}

/// In-memory element backing the headless host.
#[derive(Default)]
pub struct HeadlessElement {
    html: Mutex<String>,
    focused: AtomicBool,
}

impl HeadlessElement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `focus` has been called since creation.
    pub fn was_focused(&self) -> bool {
        self.focused.load(Ordering::SeqCst)
    }
}

impl HostElement for HeadlessElement {
    fn html(&self) -> String {
        self.html.lock().unwrap().clone()
    }

    fn set_html(&self, html: &str) {
        *self.html.lock().unwrap() = html.to_string();
    }

    fn focus(&self) {
        self.focused.store(true, Ordering::SeqCst);
    }
}
