//! Markdown rendering: the bundled engine, reading time, export transforms,
//! and the process-wide cache.

pub mod cache;
pub mod engine;
pub mod html;
pub mod reading;

pub use cache::RenderCache;
pub use engine::{EngineOptions, MarkdownEngine, RenderFlags, RenderResult};
pub use html::{document_html, plain_html};
pub use reading::{reading_time, ReadingTime};
