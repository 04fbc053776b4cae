use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Ambient state handed to every leaf validator and presenter.
///
/// The engine itself never inspects the cancellation flag; it is there for
/// validators that do expensive work and want to bail out early.
#[derive(Debug, Clone, Default)]
pub struct Context {
    cancelled: Option<Arc<AtomicBool>>,
}

impl Context {
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_cancellation(flag: Arc<AtomicBool>) -> Self {
        Self {
            cancelled: Some(flag),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}
