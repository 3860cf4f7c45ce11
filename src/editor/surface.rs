use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;

use crate::editor::state::EditorState;
use crate::host::{HeadlessPage, HostElement, OUTPUT_ANCHOR_ID};

/// The visual editing component attached to one instance. Owned by whatever
/// component tree the host embeds; the bridge only focuses it and toggles
/// read-only mode.
pub trait EditSurface: Send + Sync {
    fn focus(&self);
    fn set_read_only(&self, read_only: bool);
}

/// A live surface mount; tears down exactly once when the owning instance is
/// destroyed.
pub struct SurfaceMount {
    teardown: Option<Box<dyn FnOnce() + Send>>,
}

impl SurfaceMount {
    pub fn new(teardown: impl FnOnce() + Send + 'static) -> Self {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    pub(crate) fn run_teardown(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

/// Mounts editing surfaces into host elements.
///
/// Attaching the surface to the state container and initializing the
/// instance's render engine are the mount's responsibility, on its own
/// schedule; the readiness poller observes both rather than assuming them.
pub trait SurfaceHost: Send + Sync {
    fn mount(&self, target: &Arc<dyn HostElement>, state: &Arc<EditorState>)
        -> Result<SurfaceMount>;
}

/// In-process surface used by the headless host.
#[derive(Default)]
pub struct HeadlessSurface {
    focused: AtomicBool,
    read_only: AtomicBool,
}

impl HeadlessSurface {
    pub fn was_focused(&self) -> bool {
        self.focused.load(Ordering::SeqCst)
    }

    pub fn read_only(&self) -> bool {
        self.read_only.load(Ordering::SeqCst)
    }
}

impl EditSurface for HeadlessSurface {
    fn focus(&self) {
        self.focused.store(true, Ordering::SeqCst);
    }

    fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }
}

/// Headless surface host: attaches an in-process surface, initializes the
/// instance render engine, and registers the shared output anchor on the
/// page so runtime readiness is reached without a real document.
pub struct HeadlessSurfaces {
    page: Arc<HeadlessPage>,
}

impl HeadlessSurfaces {
    pub fn new(page: Arc<HeadlessPage>) -> Self {
        Self { page }
    }
}

impl SurfaceHost for HeadlessSurfaces {
    fn mount(
        &self,
        target: &Arc<dyn HostElement>,
        state: &Arc<EditorState>,
    ) -> Result<SurfaceMount> {
        target.set_html("<div class=\"mdbridge-editor\"></div>");

        let surface = Arc::new(HeadlessSurface::default());
        surface.set_read_only(state.read_only());
        state.attach_surface(surface);
        state.init_engine();

        // The anchor is shared by all instances; first mount creates it.
        self.page.ensure(OUTPUT_ANCHOR_ID);

        let state = state.clone();
        Ok(SurfaceMount::new(move || {
            state.detach_surface();
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostPage;

    #[test]
    fn mount_attaches_surface_engine_and_anchor() {
        let page = Arc::new(HeadlessPage::new());
        let surfaces = HeadlessSurfaces::new(page.clone());
        let state = Arc::new(EditorState::new());
        let target: Arc<dyn HostElement> = Arc::new(crate::host::HeadlessElement::new());

        assert!(page.output_anchor().is_none());

        let mut mount = surfaces.mount(&target, &state).unwrap();
        assert!(state.has_surface());
        assert!(state.has_engine());
        assert!(page.output_anchor().is_some());
        assert!(!target.html().is_empty());

        mount.run_teardown();
        assert!(!state.has_surface());

        // teardown is single-shot
        mount.run_teardown();
    }

    #[test]
    fn read_only_and_focus_propagate_to_the_attached_surface() {
        let surface = Arc::new(HeadlessSurface::default());
        let state = EditorState::new();
        state.attach_surface(surface.clone());

        state.set_read_only(true);
        assert!(surface.read_only());
        state.set_read_only(false);
        assert!(!surface.read_only());

        assert!(!surface.was_focused());
        state.focus();
        assert!(surface.was_focused());
    }
}
