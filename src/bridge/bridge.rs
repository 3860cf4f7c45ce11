use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::bridge::export::{self, ExportRequest, ExportedHtml};
use crate::bridge::gate::ReadyGate;
use crate::bridge::registry::InstanceRegistry;
use crate::config::{ConfigureOptions, FeatureFlagsPatch};
use crate::editor::{EditorContext, EditorHandle, EditorState, InstanceId, SurfaceHost};
use crate::errors::BridgeError;
use crate::events::{BridgeEvent, EventBus, Subscription};
use crate::host::{HostElement, HostServices, Scheduler};
use crate::render::{RenderCache, RenderResult};
use crate::theme;

/// Options for mounting a new editor instance.
#[derive(Default)]
pub struct CreateEditorOptions {
    /// The host element to mount into. Required.
    pub target: Option<Arc<dyn HostElement>>,
    /// Initial markdown content.
    pub value: Option<String>,
    pub read_only: bool,
    /// Fired whenever the instance's content changes.
    pub on_change: Option<crate::editor::ChangeHandler>,
    /// Fired once the mount sequence completes.
    pub on_ready: Option<Box<dyn FnOnce() + Send>>,
    /// Capability overrides applied on top of the defaults.
    pub feature_flags: Option<FeatureFlagsPatch>,
}

/// The host bridge: multi-instance lifecycle, the one-shot readiness gate,
/// configuration fan-out, the process-wide render cache, and the clipboard
/// export pipeline.
///
/// Hosts usually construct one bridge per process and [`install`](crate::bridge::install)
/// it; tests construct bridges directly.
pub struct Bridge {
    services: HostServices,
    registry: InstanceRegistry,
    gate: ReadyGate,
    render_cache: RenderCache,
    events: EventBus,
    copy_in_progress: AtomicBool,
}

impl Bridge {
    pub fn new(services: HostServices) -> Self {
        Self {
            services,
            registry: InstanceRegistry::new(),
            gate: ReadyGate::new(),
            render_cache: RenderCache::new(),
            events: EventBus::default(),
            copy_in_progress: AtomicBool::new(false),
        }
    }

    /// A bridge wired to in-memory host collaborators.
    pub fn headless() -> Self {
        Self::new(HostServices::headless())
    }

    pub fn services(&self) -> &HostServices {
        &self.services
    }

    pub(crate) fn gate(&self) -> &ReadyGate {
        &self.gate
    }

    pub(crate) fn copy_flag(&self) -> &AtomicBool {
        &self.copy_in_progress
    }

    pub(crate) fn publish(&self, event: BridgeEvent) {
        self.events.publish(event);
    }

    /// Receive bridge notifications (instance lifecycle, copy-to-host).
    pub fn subscribe(&self) -> Subscription {
        self.events.subscribe()
    }

    /// Whether any instance has completed its mount sequence.
    pub fn is_ready(&self) -> bool {
        self.gate.is_resolved()
    }

    /// Whether a clipboard export is currently mutating the output anchor.
    pub fn copy_in_progress(&self) -> bool {
        self.copy_in_progress.load(Ordering::SeqCst)
    }

    pub fn registry(&self) -> &InstanceRegistry {
        &self.registry
    }

    /// Mount a new, fully isolated editor instance.
    ///
    /// Fails with [`BridgeError::InvalidArgument`] when no mount target is
    /// given; surface-mount failures propagate to the caller unhandled.
    pub async fn create_editor(
        &self,
        options: CreateEditorOptions,
    ) -> Result<EditorHandle, BridgeError> {
        let Some(target) = options.target else {
            return Err(BridgeError::invalid("options.target is required"));
        };

        let state = Arc::new(EditorState::new());
        state.reset_feature_flags();
        if let Some(patch) = &options.feature_flags {
            state.set_feature_flags(patch);
        }
        state.set_read_only(options.read_only);
        state.set_change_handler(options.on_change);

        let mount = self
            .services
            .surfaces
            .mount(&target, &state)
            .map_err(BridgeError::Mount)?;

        self.services.scheduler.settle().await;

        if let Some(value) = &options.value {
            state.set_content(value);
            state.refresh(&*self.services.page);
        }

        self.services.scheduler.settle().await;

        if let Some(on_ready) = options.on_ready {
            on_ready();
        }

        // Ready as soon as the basic mount completes; the export pipeline
        // separately waits for full runtime readiness.
        self.gate.resolve(state.clone());

        let id = InstanceId::new();
        let ctx = Arc::new(EditorContext::new(state, target, mount));
        self.registry.insert(id, ctx.clone());
        self.events.publish(BridgeEvent::EditorCreated { instance: id });
        log::debug!("editor instance {:?} mounted", id);

        Ok(EditorHandle::new(
            id,
            ctx,
            self.registry.clone(),
            self.services.page.clone(),
            self.events.clone(),
        ))
    }

    /// Apply a configuration delta to every currently registered instance.
    ///
    /// Unknown theme keys and absent fields are no-ops. Instances created
    /// after this call start from the defaults, unaffected.
    pub fn configure(&self, options: &ConfigureOptions) {
        for ctx in self.registry.contexts() {
            let state = ctx.state();

            state.update_theme(|settings| {
                if let Some(key) = &options.theme {
                    if let Some(known) = theme::theme(key) {
                        settings.theme = known.key;
                    }
                }
                if let Some(font_family) = &options.font_family {
                    settings.font_family = font_family.clone();
                }
                if let Some(font_size) = &options.font_size {
                    settings.font_size = font_size.clone();
                }
                if let Some(primary_color) = &options.primary_color {
                    settings.primary_color = primary_color.clone();
                }
                if let Some(v) = options.is_mac_code_block {
                    settings.is_mac_code_block = v;
                }
                if let Some(v) = options.is_show_line_number {
                    settings.is_show_line_number = v;
                }
                if let Some(v) = options.is_count_status {
                    settings.is_count_status = v;
                }
                if let Some(v) = options.is_cite_status {
                    settings.is_cite_status = v;
                }
            });

            if let Some(patch) = &options.feature_flags {
                state.set_feature_flags(patch);
            }
        }
    }

    /// Deserialize a host JSON payload and apply it via [`configure`](Self::configure).
    pub fn configure_json(&self, payload: &str) -> Result<(), BridgeError> {
        let options: ConfigureOptions = serde_json::from_str(payload)
            .map_err(|err| BridgeError::invalid(format!("configure payload: {err}")))?;
        self.configure(&options);
        Ok(())
    }

    /// Render `markdown` through the process-wide cached engine.
    pub fn render(&self, markdown: &str) -> RenderResult {
        self.render_cache.render(markdown)
    }

    /// Export the current content for the host clipboard flow.
    ///
    /// Global, not per-instance: targets whichever container the readiness
    /// gate captured last. Concurrent calls are not serialized against each
    /// other; hosts must not issue exports concurrently.
    pub async fn export_to_host(
        &self,
        request: ExportRequest,
    ) -> Result<ExportedHtml, BridgeError> {
        export::export_to_host(self, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeatureFlagsPatch;
    use crate::host::HeadlessElement;
    use std::sync::atomic::AtomicUsize;

    fn init_test_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn target() -> Arc<dyn HostElement> {
        Arc::new(HeadlessElement::new())
    }

    async fn mount(bridge: &Bridge, value: &str) -> EditorHandle {
        bridge
            .create_editor(CreateEditorOptions {
                target: Some(target()),
                value: Some(value.to_string()),
                ..Default::default()
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn create_requires_a_mount_target() {
        let bridge = Bridge::headless();
        let err = bridge
            .create_editor(CreateEditorOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::InvalidArgument(_)));
        assert!(bridge.registry().is_empty());
        assert!(!bridge.is_ready());
    }

    #[tokio::test]
    async fn instances_are_fully_isolated() {
        init_test_logging();
        let bridge = Bridge::headless();

        let a = mount(&bridge, "# A").await;
        let b = mount(&bridge, "# B").await;
        assert_eq!(bridge.registry().len(), 2);

        a.set_content("changed in a");
        assert_eq!(a.content(), "changed in a");
        assert_eq!(b.content(), "# B");

        a.set_read_only(true);
        assert!(a.id() != b.id());
    }

    #[tokio::test]
    async fn destroy_leaves_other_instances_working() {
        let bridge = Bridge::headless();
        let a = mount(&bridge, "# A").await;
        let b = mount(&bridge, "# B").await;

        a.destroy();
        a.destroy(); // idempotent

        assert_eq!(bridge.registry().len(), 1);
        assert!(bridge.is_ready(), "gate never reverts");

        // calls on the destroyed handle are ignored, not fatal
        a.set_content("ignored");
        a.focus();
        assert_eq!(a.content(), "# A");

        b.set_content("# B2");
        assert_eq!(b.content(), "# B2");
    }

    #[tokio::test]
    async fn mount_sequence_fires_callbacks_and_resolves_the_gate() {
        let bridge = Bridge::headless();
        assert!(!bridge.is_ready());

        let ready_hits = Arc::new(AtomicUsize::new(0));
        let change_hits = Arc::new(AtomicUsize::new(0));

        let on_ready: Box<dyn FnOnce() + Send> = {
            let hits = ready_hits.clone();
            Box::new(move || {
                hits.fetch_add(1, Ordering::SeqCst);
            })
        };
        let on_change: crate::editor::ChangeHandler = {
            let hits = change_hits.clone();
            Arc::new(move |_value: &str| {
                hits.fetch_add(1, Ordering::SeqCst);
            })
        };

        let handle = bridge
            .create_editor(CreateEditorOptions {
                target: Some(target()),
                value: Some("# seeded".into()),
                on_change: Some(on_change),
                on_ready: Some(on_ready),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(bridge.is_ready());
        assert_eq!(ready_hits.load(Ordering::SeqCst), 1);
        // seeding content routes through the change callback
        assert_eq!(change_hits.load(Ordering::SeqCst), 1);

        handle.set_content("# edited");
        assert_eq!(change_hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn feature_flag_overrides_apply_at_creation() {
        let bridge = Bridge::headless();
        let handle = bridge
            .create_editor(CreateEditorOptions {
                target: Some(target()),
                feature_flags: Some(FeatureFlagsPatch {
                    ai: Some(false),
                    ..Default::default()
                }),
                ..Default::default()
            })
            .await
            .unwrap();

        let ctx = bridge.registry().get(handle.id()).unwrap();
        let flags = ctx.state().feature_flags();
        assert!(!flags.ai);
        assert!(flags.export_panel);
    }

    #[tokio::test]
    async fn configure_fans_out_to_live_instances_only() {
        let bridge = Bridge::headless();
        let a = mount(&bridge, "").await;
        let b = mount(&bridge, "").await;

        bridge.configure(&ConfigureOptions {
            font_size: Some("18px".into()),
            feature_flags: Some(FeatureFlagsPatch {
                ai: Some(false),
                ..Default::default()
            }),
            ..Default::default()
        });

        for handle in [&a, &b] {
            let ctx = bridge.registry().get(handle.id()).unwrap();
            assert_eq!(ctx.state().theme_settings().font_size, "18px");
            assert!(!ctx.state().feature_flags().ai);
        }

        // a later instance starts from the defaults, untouched by the
        // earlier broadcast
        let c = mount(&bridge, "").await;
        let ctx = bridge.registry().get(c.id()).unwrap();
        assert!(ctx.state().feature_flags().ai);
        assert_eq!(
            ctx.state().theme_settings().font_size,
            crate::theme::DEFAULT_FONT_SIZE
        );
    }

    #[tokio::test]
    async fn configure_ignores_unknown_theme_keys() {
        let bridge = Bridge::headless();
        let a = mount(&bridge, "").await;

        bridge.configure(&ConfigureOptions {
            theme: Some("unknownTheme".into()),
            ..Default::default()
        });
        let ctx = bridge.registry().get(a.id()).unwrap();
        assert_eq!(ctx.state().theme_settings().theme, crate::theme::DEFAULT_THEME);

        bridge.configure(&ConfigureOptions {
            theme: Some("plain".into()),
            ..Default::default()
        });
        assert_eq!(ctx.state().theme_settings().theme, "plain");
    }

    #[tokio::test]
    async fn configure_json_accepts_host_payloads() {
        let bridge = Bridge::headless();
        let a = mount(&bridge, "").await;

        bridge
            .configure_json(r##"{"primaryColor": "#ff0000", "isCiteStatus": true}"##)
            .unwrap();

        let ctx = bridge.registry().get(a.id()).unwrap();
        let settings = ctx.state().theme_settings();
        assert_eq!(settings.primary_color, "#ff0000");
        assert!(settings.is_cite_status);

        assert!(bridge.configure_json("not json").is_err());
    }

    #[tokio::test]
    async fn end_to_end_create_and_render() {
        let bridge = Bridge::headless();
        let handle = mount(&bridge, "# Hello").await;

        assert_eq!(handle.content(), "# Hello");

        let result = bridge.render("# Hello");
        assert!(!result.html.is_empty());
        assert!(result.reading_time.words >= 1);
        assert_eq!(result.reading_time.minutes, 1);
    }
}
