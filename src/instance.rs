use crate::device::DeviceShared;
use crate::query;
use crate::query::Query;
use crate::signal::Readiness;
use crate::Error;
use crate::ReportFifo;
use parking_lot::Mutex;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Weak;
use std::time::Duration;

/// State of one reader that the device's registry can reach.
#[derive(Debug)]
pub(crate) struct InstanceShared {
    pub fifo: Mutex<ReportFifo>,
    pub dead: AtomicBool,
    pub readiness: Readiness,
}

impl InstanceShared {
    pub(crate) fn new() -> Result<Self, Error> {
        Ok(Self {
            fifo: Mutex::new(ReportFifo::new()?),
            dead: AtomicBool::new(false),
            readiness: Readiness::default(),
        })
    }

    pub(crate) fn is_dead(&self) -> bool {
        self.dead.load(Ordering::Acquire)
    }
}

/// An open handle on a [`HidDevice`](crate::HidDevice).
///
/// Dropping the handle closes it. The handle doesn't keep the device alive:
/// once the device is detached every operation fails with [`Error::DeviceClosed`].
#[derive(Debug)]
pub struct Instance {
    shared: Arc<InstanceShared>,
    device: Weak<DeviceShared>,
}

impl Instance {
    pub(crate) fn new(shared: Arc<InstanceShared>, device: Weak<DeviceShared>) -> Self {
        Self { shared, device }
    }

    /// Moves buffered report bytes into `buf`; zero means nothing is pending.
    pub fn read(&self, buf: &mut [u8]) -> Result<usize, Error> {
        let mut fifo = self.shared.fifo.lock();
        if self.shared.is_dead() {
            return Err(Error::DeviceClosed);
        }

        let count = fifo.read(buf);
        if fifo.is_empty() {
            self.shared.readiness.clear();
        }

        Ok(count)
    }

    /// Serves `query` from the device's report table, writing the reply into `out`.
    pub fn dispatch_query(
        &self,
        query: Query,
        input: &[u8],
        out: &mut [u8],
    ) -> Result<usize, Error> {
        if self.shared.is_dead() {
            return Err(Error::DeviceClosed);
        }
        let device = self.device.upgrade().ok_or(Error::DeviceClosed)?;

        query::dispatch(&device.reports(), query, input, out)
    }

    pub fn is_dead(&self) -> bool {
        self.shared.is_dead()
    }

    pub fn is_readable(&self) -> bool {
        self.shared.readiness.is_set()
    }

    /// Blocks until data is pending or the device goes away, up to `timeout`.
    pub fn wait_readable(&self, timeout: Duration) -> bool {
        self.shared.readiness.wait(timeout)
    }

    /// Number of bytes waiting to be read.
    pub fn pending(&self) -> usize {
        self.shared.fifo.lock().len()
    }

    /// Same as dropping the handle.
    pub fn close(self) {}
}

impl Drop for Instance {
    fn drop(&mut self) {
        if let Some(device) = self.device.upgrade() {
            device.unregister(&self.shared);
        }
    }
}
