//! Collaborators supplied by the embedding host.
//!
//! The original surface this bridge fronts lives inside a real document with
//! real clipboard machinery; everything the bridge needs from that world is
//! injected here as trait objects, with in-memory stand-ins so the crate is
//! fully exercisable without an embedder.

pub mod clipboard;
pub mod element;
pub mod page;
pub mod sched;

pub use clipboard::{ClipboardStager, NullClipboard};
pub use element::{HeadlessElement, HostElement};
pub use page::{HeadlessPage, HostPage, OUTPUT_ANCHOR_ID};
pub use sched::{Scheduler, TokioScheduler};

use std::sync::Arc;

use crate::editor::surface::{HeadlessSurfaces, SurfaceHost};
use crate::storage::{InMemoryPreferences, PreferenceStore};

/// Everything the bridge needs from the host, bundled for injection.
#[derive(Clone)]
pub struct HostServices {
    /// The host document (output anchor lookup, selection).
    pub page: Arc<dyn HostPage>,
    /// Mounts and unmounts visual editing surfaces.
    pub surfaces: Arc<dyn SurfaceHost>,
    /// Stages rich content for the system clipboard.
    pub clipboard: Arc<dyn ClipboardStager>,
    /// Suspension primitives for the cooperative wait loops.
    pub scheduler: Arc<dyn Scheduler>,
    /// Persistent string preferences.
    pub preferences: Arc<dyn PreferenceStore>,
}

impl HostServices {
    /// In-memory stand-ins for every collaborator. The headless surface host
    /// registers the shared output anchor on first mount, so runtime
    /// readiness is reached without a real document.
    pub fn headless() -> Self {
        let page = Arc::new(HeadlessPage::new());
        Self {
            surfaces: Arc::new(HeadlessSurfaces::new(page.clone())),
            page,
            clipboard: Arc::new(NullClipboard),
            scheduler: Arc::new(TokioScheduler),
            preferences: Arc::new(InMemoryPreferences::new()),
        }
    }
}
