use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative stop signal shared by the helpers of one primality test.
///
/// Setting the token does not interrupt anything. Helpers check it between
/// iterations and return once they see it, so a helper may still finish a few
/// iterations after a sibling cancelled.
#[derive(Debug, Default)]
pub struct CancellationToken {
    cancelled: AtomicBool,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
