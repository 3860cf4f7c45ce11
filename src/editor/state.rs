use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::config::{FeatureFlags, FeatureFlagsPatch};
use crate::editor::surface::EditSurface;
use crate::host::{HostElement, HostPage};
use crate::render::{document_html, EngineOptions, MarkdownEngine, RenderFlags};
use crate::theme::ThemeSettings;

/// Host callback fired whenever an instance's content changes.
pub type ChangeHandler = Arc<dyn Fn(&str) + Send + Sync>;

#[derive(Default)]
struct RenderStore {
    engine: Option<MarkdownEngine>,
    /// The engine's last output; what the output anchor is restored to.
    output: String,
}

/// The isolated state container belonging to one editor instance.
///
/// Every handle method and every export step operates on exactly one
/// container, passed explicitly; no state is shared between instances.
pub struct EditorState {
    content: Mutex<String>,
    flags: Mutex<FeatureFlags>,
    read_only: AtomicBool,
    on_change: Mutex<Option<ChangeHandler>>,
    surface: Mutex<Option<Arc<dyn EditSurface>>>,
    theme: Mutex<ThemeSettings>,
    render: Mutex<RenderStore>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            content: Mutex::new(String::new()),
            flags: Mutex::new(FeatureFlags::default()),
            read_only: AtomicBool::new(false),
            on_change: Mutex::new(None),
            surface: Mutex::new(None),
            theme: Mutex::new(ThemeSettings::default()),
            render: Mutex::new(RenderStore::default()),
        }
    }
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    // ** Content

    pub fn content(&self) -> String {
        self.content.lock().unwrap().clone()
    }

    /// Store new content and notify the change handler, if any.
    pub fn set_content(&self, markdown: &str) {
        *self.content.lock().unwrap() = markdown.to_string();
        self.emit_change(markdown);
    }

    fn emit_change(&self, value: &str) {
        let handler = self.on_change.lock().unwrap().clone();
        if let Some(handler) = handler {
            handler(value);
        }
    }

    // ** Integration state

    pub fn feature_flags(&self) -> FeatureFlags {
        *self.flags.lock().unwrap()
    }

    pub fn set_feature_flags(&self, patch: &FeatureFlagsPatch) {
        self.flags.lock().unwrap().apply(patch);
    }

    pub fn reset_feature_flags(&self) {
        self.flags.lock().unwrap().reset();
    }

    pub fn read_only(&self) -> bool {
        self.read_only.load(Ordering::SeqCst)
    }

    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
        if let Some(surface) = self.surface() {
            surface.set_read_only(read_only);
        }
    }

    pub fn set_change_handler(&self, handler: Option<ChangeHandler>) {
        *self.on_change.lock().unwrap() = handler;
    }

    // ** Editing surface

    pub fn surface(&self) -> Option<Arc<dyn EditSurface>> {
        self.surface.lock().unwrap().clone()
    }

    pub fn attach_surface(&self, surface: Arc<dyn EditSurface>) {
        *self.surface.lock().unwrap() = Some(surface);
    }

    pub fn detach_surface(&self) {
        *self.surface.lock().unwrap() = None;
    }

    pub fn has_surface(&self) -> bool {
        self.surface.lock().unwrap().is_some()
    }

    pub fn focus(&self) {
        if let Some(surface) = self.surface() {
            surface.focus();
        }
    }

    // ** Theme

    pub fn theme_settings(&self) -> ThemeSettings {
        self.theme.lock().unwrap().clone()
    }

    pub fn update_theme(&self, apply: impl FnOnce(&mut ThemeSettings)) {
        apply(&mut self.theme.lock().unwrap());
    }

    // ** Render store

    /// Build this instance's render engine from its current theme settings.
    /// Called by the surface host once the visual tree is up.
    pub fn init_engine(&self) {
        let options = EngineOptions::from_settings(&self.theme_settings());
        self.render.lock().unwrap().engine = Some(MarkdownEngine::new(options));
    }

    pub fn has_engine(&self) -> bool {
        self.render.lock().unwrap().engine.is_some()
    }

    /// The engine's last output (empty until the first refresh).
    pub fn last_output(&self) -> String {
        self.render.lock().unwrap().output.clone()
    }

    /// Recompute the code-block theme, re-render current content with current
    /// theme flags, and push the result into the output anchor if present.
    ///
    /// Does nothing until the engine has been initialized by the mount.
    pub fn refresh(&self, page: &dyn HostPage) {
        if !self.has_engine() {
            return;
        }

        self.update_theme(|t| t.update_code_theme());
        let settings = self.theme_settings();
        let flags = RenderFlags::from_settings(&settings);
        let engine = MarkdownEngine::new(EngineOptions::from_settings(&settings));

        let result = engine.render(&self.content(), &flags);

        {
            let mut render = self.render.lock().unwrap();
            render.output = result.html.clone();
            render.engine = Some(engine);
        }

        if let Some(anchor) = page.output_anchor() {
            anchor.set_html(&result.html);
        }
    }

    /// Fully inlined-style HTML document of the current editor content.
    pub fn export_document(&self) -> String {
        let settings = self.theme_settings();
        let flags = RenderFlags::from_settings(&settings);
        let engine = MarkdownEngine::new(EngineOptions::from_settings(&settings));
        let body = engine.render(&self.content(), &flags).html;
        document_html(&body, &settings)
    }
}
