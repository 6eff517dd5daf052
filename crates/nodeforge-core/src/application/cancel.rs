//! Cooperative cancellation shared between the CLI signal handler, the
//! emitter and long-running adapters.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cheap, cloneable cancellation flag.
///
/// The CLI installs a Ctrl-C handler that calls [`CancelFlag::cancel`]; the
/// emitter checks it between steps and the package manager adapter polls it
/// while its child process runs.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
