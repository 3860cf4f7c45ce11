//! The clipboard export pipeline.
//!
//! Export is global, not per-instance: it waits for the readiness gate,
//! polls the captured container to runtime readiness, temporarily overwrites
//! the shared output anchor, and must always leave the anchor holding the
//! render engine's output, on success and on failure alike.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::bridge::bridge::Bridge;
use crate::bridge::runtime::wait_for_runtime;
use crate::editor::EditorState;
use crate::errors::BridgeError;
use crate::events::BridgeEvent;
use crate::host::{ClipboardStager, HostElement, HostPage, Scheduler};
use crate::render::plain_html;
use crate::storage::{prefixed, PreferenceStore};

/// Settle time granted to the host before clipboard staging begins.
const COPY_SETTLE_DELAY: Duration = Duration::from_millis(350);

/// Persisted preference selecting the textual representation an export
/// returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportMode {
    #[default]
    Text,
    Html,
    HtmlWithoutStyle,
    HtmlAndStyle,
    Markdown,
}

impl ExportMode {
    /// Storage key (unprefixed) holding the persisted mode.
    pub const PREFERENCE_KEY: &'static str = "copyMode";

    /// Parse a persisted value. Absence, unreadability, and unrecognized
    /// values all select [`ExportMode::Text`].
    pub fn from_preference(value: Option<&str>) -> Self {
        match value {
            Some("html") => ExportMode::Html,
            Some("html-without-style") => ExportMode::HtmlWithoutStyle,
            Some("html-and-style") => ExportMode::HtmlAndStyle,
            Some("md") => ExportMode::Markdown,
            _ => ExportMode::Text,
        }
    }
}

/// Host assertion accompanying an export call: the host will not write to the
/// system clipboard itself. Must be literally `false`.
#[derive(Debug, Clone, Copy)]
pub struct ExportRequest {
    pub write_to_clipboard: bool,
}

/// Result of a clipboard export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedHtml {
    pub html: String,
}

/// Clears the shared "copy in progress" marker on every exit path; the
/// primary error always wins over anything the cleanup does.
struct CopyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> CopyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self { flag }
    }
}

impl Drop for CopyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

pub(crate) async fn export_to_host(
    bridge: &Bridge,
    request: ExportRequest,
) -> Result<ExportedHtml, BridgeError> {
    if request.write_to_clipboard {
        return Err(BridgeError::invalid("write_to_clipboard must be false"));
    }

    // Wait for any instance to finish mounting, then take the container the
    // gate captured. resolve() stores the container before firing the
    // signal, so in practice this loops at most once.
    let state = loop {
        bridge.gate().ready().await;
        if let Some(state) = bridge.gate().container() {
            break state;
        }
    };

    wait_for_runtime(&state, bridge.services()).await;

    let raw = state.content();
    let mode = ExportMode::from_preference(
        bridge
            .services()
            .preferences
            .get_item(&prefixed(ExportMode::PREFERENCE_KEY))
            .as_deref(),
    );

    if mode == ExportMode::Markdown {
        log::info!("markdown source handed to the host clipboard flow");
        return Ok(ExportedHtml { html: raw });
    }

    let _guard = CopyGuard::acquire(bridge.copy_flag());

    match staged_export(bridge, &state, &raw, mode).await {
        Ok(html) => Ok(ExportedHtml { html }),
        Err(err) => {
            restore_output(bridge, &state);
            Err(BridgeError::Export {
                message: err.to_string(),
            })
        }
    }
}

/// Steps 5–9: the part of the pipeline that mutates the output anchor and
/// therefore needs restoration on failure.
async fn staged_export(
    bridge: &Bridge,
    state: &EditorState,
    raw: &str,
    mode: ExportMode,
) -> anyhow::Result<String> {
    let services = bridge.services();

    services.scheduler.delay(COPY_SETTLE_DELAY).await;
    services.scheduler.settle().await;

    let primary_color = state.theme_settings().primary_color;
    services.clipboard.stage(&primary_color)?;

    // The stager depends on the anchor; wait here as a backstop in case the
    // host re-created it meanwhile.
    let anchor = loop {
        if let Some(anchor) = services.page.output_anchor() {
            break anchor;
        }
        services.scheduler.settle().await;
        services.scheduler.frame().await;
    };

    anchor.focus();
    services.page.clear_selection();

    let outgoing = anchor.html();
    let output = state.last_output();
    anchor.set_html(&output);

    let written = match mode {
        ExportMode::Text | ExportMode::Html => outgoing,
        ExportMode::HtmlWithoutStyle => plain_html(raw),
        ExportMode::HtmlAndStyle => state.export_document(),
        // raw-markdown exports return before this point; keep the outgoing
        // contents as the safe fallback
        ExportMode::Markdown => outgoing,
    };

    if mode == ExportMode::Html {
        log::info!("HTML source staged for the host clipboard");
    } else {
        log::info!("rendered content staged for the host clipboard");
    }

    bridge.publish(BridgeEvent::CopyToHost { content: output });

    // Restore the anchor to its correct rendered state after the temporary
    // overwrite above.
    state.refresh(&*services.page);

    Ok(written)
}

/// Best-effort restoration after a failed export. Secondary failures here
/// must never mask the primary error, and the in-progress marker is cleared
/// by the guard regardless.
fn restore_output(bridge: &Bridge, state: &EditorState) {
    let services = bridge.services();
    if let Some(anchor) = services.page.output_anchor() {
        anchor.set_html(&state.last_output());
    }
    state.refresh(&*services.page);
}
