use once_cell::sync::OnceCell;

use crate::render::engine::{EngineOptions, MarkdownEngine, RenderFlags, RenderResult};

/// Process-wide render engine: built from the default theme and fixed
/// typography on first use, then reused for every subsequent render call for
/// the lifetime of the owning bridge.
#[derive(Default)]
pub struct RenderCache {
    engine: OnceCell<MarkdownEngine>,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn engine(&self) -> &MarkdownEngine {
        self.engine
            .get_or_init(|| MarkdownEngine::new(EngineOptions::defaults()))
    }

    /// Render `markdown` through the cached engine.
    pub fn render(&self, markdown: &str) -> RenderResult {
        let flags = RenderFlags {
            is_mac_code_block: true,
            ..Default::default()
        };
        self.engine().render(markdown, &flags)
    }

    /// Whether the one-time engine construction has happened yet.
    pub fn is_initialized(&self) -> bool {
        self.engine.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_is_built_once_and_lazily() {
        let cache = RenderCache::new();
        assert!(!cache.is_initialized());

        let first = cache.render("# One");
        assert!(cache.is_initialized());
        assert!(first.html.contains("One"));

        let again = cache.render("# One");
        assert_eq!(first.html, again.html);

        let engine_ptr = cache.engine() as *const MarkdownEngine;
        cache.render("something else");
        assert!(std::ptr::eq(engine_ptr, cache.engine()));
    }
}
