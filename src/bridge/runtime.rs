use std::sync::Arc;

use crate::editor::EditorState;
use crate::host::{HostPage, HostServices, Scheduler};

/// Cooperative wait for runtime readiness: the editing surface attached, the
/// instance render engine present, and the output anchor in the document,
/// all holding in the same iteration.
///
/// The three subsystems initialize on independent schedules outside this
/// layer's control, so this polls rather than trusting a single flag.
/// Between failed checks it yields twice: once to let pending state
/// propagation settle, once to align with the next frame boundary. There is
/// no timeout and no iteration cap.
pub(crate) async fn wait_for_runtime(state: &Arc<EditorState>, services: &HostServices) {
    loop {
        let has_surface = state.has_surface();
        let has_engine = state.has_engine();
        let has_anchor = services.page.output_anchor().is_some();

        if has_surface && has_engine && has_anchor {
            return;
        }

        services.scheduler.settle().await;
        services.scheduler.frame().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HeadlessElement, HeadlessPage, HostElement, OUTPUT_ANCHOR_ID};
    use futures::FutureExt;

    fn services_with_page(page: Arc<HeadlessPage>) -> HostServices {
        let mut services = HostServices::headless();
        services.page = page;
        services
    }

    #[tokio::test(start_paused = true)]
    async fn completes_only_when_all_three_predicates_hold() {
        let page = Arc::new(HeadlessPage::new());
        let services = services_with_page(page.clone());
        let state = Arc::new(EditorState::new());

        // nothing ready yet: the wait must not complete on its own
        let wait = wait_for_runtime(&state, &services);
        tokio::pin!(wait);
        assert!(futures::poll!(wait.as_mut()).is_pending());

        state.attach_surface(Arc::new(crate::editor::HeadlessSurface::default()));
        state.init_engine();
        assert!(futures::poll!(wait.as_mut()).is_pending());

        let anchor: Arc<dyn HostElement> = Arc::new(HeadlessElement::new());
        page.insert(OUTPUT_ANCHOR_ID, anchor);

        wait.await;
    }

    #[tokio::test]
    async fn returns_immediately_when_already_ready() {
        let page = Arc::new(HeadlessPage::new());
        page.ensure(OUTPUT_ANCHOR_ID);
        let services = services_with_page(page);

        let state = Arc::new(EditorState::new());
        state.attach_surface(Arc::new(crate::editor::HeadlessSurface::default()));
        state.init_engine();

        assert!(wait_for_runtime(&state, &services)
            .now_or_never()
            .is_some());
    }
}
