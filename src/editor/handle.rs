use std::sync::Arc;

use crate::bridge::registry::InstanceRegistry;
use crate::editor::context::EditorContext;
use crate::editor::state::ChangeHandler;
use crate::editor::InstanceId;
use crate::events::{BridgeEvent, EventBus};
use crate::host::HostPage;

/// Opaque capability handle returned to the host for one editor instance.
///
/// The handle owns no state; every method operates on the instance's own
/// container, so nothing leaks between instances. Calling methods on a
/// destroyed handle is undefined by contract but never panics; such calls
/// are logged and ignored.
#[derive(Clone)]
pub struct EditorHandle {
    id: InstanceId,
    ctx: Arc<EditorContext>,
    registry: InstanceRegistry,
    page: Arc<dyn HostPage>,
    events: EventBus,
}

impl std::fmt::Debug for EditorHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorHandle")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl EditorHandle {
    pub(crate) fn new(
        id: InstanceId,
        ctx: Arc<EditorContext>,
        registry: InstanceRegistry,
        page: Arc<dyn HostPage>,
        events: EventBus,
    ) -> Self {
        Self {
            id,
            ctx,
            registry,
            page,
            events,
        }
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    fn live(&self, op: &str) -> bool {
        if self.ctx.is_destroyed() {
            log::warn!("editor instance {:?}: {op} after destroy", self.id);
            return false;
        }
        true
    }

    /// Replace the instance's markdown content and re-render.
    pub fn set_content(&self, markdown: &str) {
        if !self.live("set_content") {
            return;
        }
        let state = self.ctx.state();
        state.set_content(markdown);
        state.refresh(&*self.page);
    }

    /// Current markdown content.
    pub fn content(&self) -> String {
        self.ctx.state().content()
    }

    pub fn set_read_only(&self, read_only: bool) {
        if !self.live("set_read_only") {
            return;
        }
        self.ctx.state().set_read_only(read_only);
    }

    pub fn focus(&self) {
        if !self.live("focus") {
            return;
        }
        self.ctx.state().focus();
    }

    /// Install the change callback, replacing any previous one.
    pub fn set_on_change(&self, handler: impl Fn(&str) + Send + Sync + 'static) {
        if !self.live("set_on_change") {
            return;
        }
        let handler: ChangeHandler = Arc::new(handler);
        self.ctx.state().set_change_handler(Some(handler));
    }

    /// Tear the instance down and remove it from the registry. Idempotent;
    /// other instances and the readiness gate are unaffected.
    pub fn destroy(&self) {
        if self.ctx.destroy() {
            self.registry.remove(self.id);
            self.events
                .publish(BridgeEvent::EditorDestroyed { instance: self.id });
            log::debug!("editor instance {:?} destroyed", self.id);
        }
    }
}
