//! The host bridge: instance lifecycle, readiness, configuration fan-out,
//! and the clipboard export pipeline.

pub mod bridge;
pub mod export;
pub mod gate;
pub mod registry;
pub(crate) mod runtime;

pub use bridge::{Bridge, CreateEditorOptions};
pub use export::{ExportMode, ExportRequest, ExportedHtml};
pub use gate::ReadyGate;
pub use registry::InstanceRegistry;

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::errors::BridgeError;

static GLOBAL: OnceCell<Arc<Bridge>> = OnceCell::new();

/// Install `bridge` as the process-wide surface reachable via [`global`].
///
/// Embedders call this once at startup, before anything touches [`global`];
/// afterwards the bridge lives for the process lifetime.
pub fn install(bridge: Arc<Bridge>) -> Result<(), BridgeError> {
    GLOBAL.set(bridge).map_err(|_| BridgeError::AlreadyInstalled)
}

/// The installed process-wide bridge. Falls back to a headless bridge when
/// the embedder installed none, so the surface is always reachable.
pub fn global() -> Arc<Bridge> {
    GLOBAL
        .get_or_init(|| Arc::new(Bridge::headless()))
        .clone()
}
