use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::editor::state::EditorState;
use crate::editor::surface::SurfaceMount;
use crate::host::HostElement;

/// Private per-instance context: the isolated state container plus the
/// teardown procedure for its mounted surface.
pub struct EditorContext {
    state: Arc<EditorState>,
    target: Arc<dyn HostElement>,
    mount: Mutex<Option<SurfaceMount>>,
    destroyed: AtomicBool,
}

impl EditorContext {
    pub(crate) fn new(
        state: Arc<EditorState>,
        target: Arc<dyn HostElement>,
        mount: SurfaceMount,
    ) -> Self {
        Self {
            state,
            target,
            mount: Mutex::new(Some(mount)),
            destroyed: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> &Arc<EditorState> {
        &self.state
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }

    /// Tear the instance down: clear the change-callback slot, unmount the
    /// surface, and clear the target's rendered contents. Runs at most once;
    /// repeated calls are no-ops.
    pub(crate) fn destroy(&self) -> bool {
        if self.destroyed.swap(true, Ordering::SeqCst) {
            return false;
        }

        self.state.set_change_handler(None);
        if let Some(mut mount) = self.mount.lock().unwrap().take() {
            mount.run_teardown();
        }
        self.target.set_html("");
        true
    }
}
