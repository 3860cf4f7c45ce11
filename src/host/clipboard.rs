use anyhow::Result;

/// External collaborator that stages rich content for the system clipboard.
///
/// The bridge never writes the clipboard itself; it invokes the stager and
/// then drives the output-anchor focus/overwrite sequence that the host's
/// copy machinery keys off.
pub trait ClipboardStager: Send + Sync {
    /// Prepare clipboard content using the instance's current accent color.
    fn stage(&self, primary_color: &str) -> Result<()>;
}

/// No-op stager used by the headless host.
pub struct NullClipboard;

impl ClipboardStager for NullClipboard {
    fn stage(&self, _primary_color: &str) -> Result<()> {
        Ok(())
    }
}
