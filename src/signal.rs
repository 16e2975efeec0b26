use parking_lot::Condvar;
use parking_lot::Mutex;
use std::time::Duration;

/// Level-triggered "readable" state of a reader instance.
///
/// The core only raises and lowers the level; hosts that want blocking reads
/// wait on it with [`Readiness::wait`].
#[derive(Debug, Default)]
pub struct Readiness {
    readable: Mutex<bool>,
    changed: Condvar,
}

impl Readiness {
    pub fn set(&self) {
        let mut readable = self.readable.lock();
        if !*readable {
            *readable = true;
            self.changed.notify_all();
        }
    }

    pub fn clear(&self) {
        *self.readable.lock() = false;
    }

    pub fn is_set(&self) -> bool {
        *self.readable.lock()
    }

    /// Blocks until the level is raised or `timeout` elapses; returns the final level.
    pub fn wait(&self, timeout: Duration) -> bool {
        let mut readable = self.readable.lock();
        if !*readable {
            self.changed
                .wait_while_for(&mut readable, |readable| !*readable, timeout);
        }
        *readable
    }
}
