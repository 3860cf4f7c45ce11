//! Bridge event types and the host-facing notification bus.
//!
//! The bridge never reaches into an ambient host event mechanism; everything
//! it wants the host to observe is published on a broadcast bus the host
//! subscribes to via [`Bridge::subscribe`](crate::bridge::Bridge::subscribe).

use tokio::sync::broadcast;

use crate::editor::InstanceId;

pub(crate) const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Events emitted by the bridge towards the embedding host.
#[derive(Debug, Clone)]
pub enum BridgeEvent {
    /// An editor instance finished its mount sequence.
    EditorCreated { instance: InstanceId },
    /// An editor instance was torn down.
    EditorDestroyed { instance: InstanceId },
    /// Rendered output was handed to the host clipboard flow. Emitted exactly
    /// once per successful non-markdown export; `content` is the render
    /// engine's last output.
    CopyToHost { content: String },
}

/// A handle for receiving bridge notifications.
pub type Subscription = broadcast::Receiver<BridgeEvent>;

#[derive(Debug, Clone)]
pub(crate) struct EventBus {
    tx: broadcast::Sender<BridgeEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        let (tx, _rx) = broadcast::channel(DEFAULT_CHANNEL_CAPACITY);
        Self { tx }
    }
}

impl EventBus {
    pub(crate) fn subscribe(&self) -> Subscription {
        self.tx.subscribe()
    }

    pub(crate) fn publish(&self, ev: BridgeEvent) {
        // send() fails only when there are 0 receivers; a host that does not
        // listen simply misses the notification.
        let _ = self.tx.send(ev);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_reaches_every_subscriber() {
        let bus = EventBus::default();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        bus.publish(BridgeEvent::CopyToHost {
            content: "<p>hi</p>".into(),
        });

        for rx in [&mut a, &mut b] {
            match rx.recv().await.unwrap() {
                BridgeEvent::CopyToHost { content } => assert_eq!(content, "<p>hi</p>"),
                other => panic!("unexpected event: {other:?}"),
            }
        }
    }

    #[test]
    fn publish_without_subscribers_is_silent() {
        let bus = EventBus::default();
        bus.publish(BridgeEvent::CopyToHost { content: String::new() });
    }
}
