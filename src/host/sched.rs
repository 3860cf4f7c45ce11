use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;

/// One paint frame at 60 Hz.
const FRAME: Duration = Duration::from_millis(16);

/// Suspension primitives for the bridge's cooperative wait loops.
///
/// All waits built on this trait are unbounded by design: the bridge polls
/// for preconditions (an instance mounting, the output anchor appearing) and
/// cedes timing control entirely to the host. There is no timeout anywhere.
pub trait Scheduler: Send + Sync {
    /// Let pending state propagation settle (the host's "next tick").
    fn settle(&self) -> BoxFuture<'static, ()>;

    /// Align with the next paint/frame boundary.
    fn frame(&self) -> BoxFuture<'static, ()>;

    /// Suspend for a fixed duration.
    fn delay(&self, duration: Duration) -> BoxFuture<'static, ()>;
}

/// Tokio-backed scheduler used by default.
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn settle(&self) -> BoxFuture<'static, ()> {
        tokio::task::yield_now().boxed()
    }

    fn frame(&self) -> BoxFuture<'static, ()> {
        tokio::time::sleep(FRAME).boxed()
    }

    fn delay(&self, duration: Duration) -> BoxFuture<'static, ()> {
        tokio::time::sleep(duration).boxed()
    }
}
