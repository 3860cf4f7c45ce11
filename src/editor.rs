//! Editor instances: isolated state containers, contexts, and the capability
//! handles returned to the host.

pub mod context;
pub mod handle;
pub mod state;
pub mod surface;

pub use context::EditorContext;
pub use handle::EditorHandle;
pub use state::{ChangeHandler, EditorState};
pub use surface::{EditSurface, HeadlessSurface, HeadlessSurfaces, SurfaceHost, SurfaceMount};

use uuid::Uuid;

/// A unique identifier for an embedded editor instance.
///
/// A wrapper around a [`Uuid`]; treat it as an opaque handle. Instances are
/// created and destroyed dynamically, and the id unambiguously names one of
/// them for the registry and for bridge events.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(Uuid);

impl InstanceId {
    /// Create a new unique `InstanceId` using a random UUID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}
