//! Caller-held handle over one in-flight call.

use tokio_util::sync::CancellationToken;

/// Requests cancellation of a single call.
///
/// Cancellation is cooperative: the transport observes the token and reports
/// a cancelled error, which the executor swallows. If the result is already
/// being delivered, the callback may still fire. Cancelling twice, or after
/// completion, does nothing.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    token: CancellationToken,
}

impl TaskHandle {
    pub(crate) fn new(token: CancellationToken) -> Self {
        Self { token }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}
