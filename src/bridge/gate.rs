use std::sync::{Arc, Mutex};

use tokio::sync::watch;

use crate::editor::EditorState;

/// One-shot process-wide readiness signal.
///
/// Resolved the first time any instance completes its mount sequence and
/// never reverts, even if that instance is later destroyed. Waiters created
/// before any instance exists suspend indefinitely; timing control is the
/// host's, by design.
pub struct ReadyGate {
    resolved: watch::Sender<bool>,
    container: Mutex<Option<Arc<EditorState>>>,
}

impl Default for ReadyGate {
    fn default() -> Self {
        let (resolved, _rx) = watch::channel(false);
        Self {
            resolved,
            container: Mutex::new(None),
        }
    }
}

impl ReadyGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the gate ready with `container`. The first call fires the
    /// signal; every call refreshes the captured container, so exports
    /// target the most recently mounted instance.
    pub fn resolve(&self, container: Arc<EditorState>) {
        *self.container.lock().unwrap() = Some(container);
        self.resolved.send_if_modified(|resolved| {
            if *resolved {
                false
            } else {
                *resolved = true;
                true
            }
        });
    }

    /// Suspend until the first resolution. Returns immediately once
    /// resolved.
    pub async fn ready(&self) {
        let mut rx = self.resolved.subscribe();
        // The sender lives as long as the gate, so wait_for cannot fail
        // while we are borrowed from it.
        let _ = rx.wait_for(|resolved| *resolved).await;
    }

    pub fn is_resolved(&self) -> bool {
        *self.resolved.borrow()
    }

    /// The state container captured by the latest resolve call.
    pub fn container(&self) -> Option<Arc<EditorState>> {
        self.container.lock().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;

    #[tokio::test]
    async fn ready_suspends_until_first_resolve() {
        let gate = ReadyGate::new();

        assert!(gate.ready().now_or_never().is_none());
        assert!(!gate.is_resolved());
        assert!(gate.container().is_none());

        gate.resolve(Arc::new(EditorState::new()));

        assert!(gate.ready().now_or_never().is_some());
        assert!(gate.is_resolved());
        assert!(gate.container().is_some());
    }

    #[tokio::test]
    async fn waiters_are_woken_by_the_first_resolve() {
        let gate = Arc::new(ReadyGate::new());

        let waiter = {
            let gate = gate.clone();
            tokio::spawn(async move { gate.ready().await })
        };

        gate.resolve(Arc::new(EditorState::new()));
        waiter.await.unwrap();
    }

    #[tokio::test]
    async fn later_resolves_refresh_the_container_without_refiring() {
        let gate = ReadyGate::new();
        let first = Arc::new(EditorState::new());
        let second = Arc::new(EditorState::new());

        gate.resolve(first.clone());
        assert!(Arc::ptr_eq(&gate.container().unwrap(), &first));

        gate.resolve(second.clone());
        assert!(gate.is_resolved());
        assert!(Arc::ptr_eq(&gate.container().unwrap(), &second));
    }
}
