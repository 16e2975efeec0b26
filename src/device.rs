use crate::instance::InstanceShared;
use crate::query::Reports;
use crate::transport::Completion;
use crate::transport::Flow;
use crate::transport::HidTransport;
use crate::transport::ProtocolMode;
use crate::Config;
use crate::Error;
use crate::Instance;
use hrd::Descriptor;
use parking_lot::Mutex;
use std::mem;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Other,
    Keyboard,
    Pointer,
    KeyboardPointer,
}

impl TryFrom<u8> for DeviceClass {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => DeviceClass::Other,
            1 => DeviceClass::Keyboard,
            2 => DeviceClass::Pointer,
            3 => DeviceClass::KeyboardPointer,
            _ => return Err(Error::InvalidArgument),
        })
    }
}

#[derive(Debug)]
pub(crate) struct DeviceShared {
    descriptor: Descriptor,
    class: DeviceClass,
    boot_device: bool,
    config: Config,
    detached: AtomicBool,
    readers: Mutex<Vec<Arc<InstanceShared>>>,
}

impl DeviceShared {
    pub(crate) fn reports(&self) -> Reports<'_> {
        Reports {
            descriptor: &self.descriptor,
            class: self.class,
            pointer_boot_compat: self.config.pointer_boot_compat,
        }
    }

    /// Marks every registered reader dead and wakes it, then empties the registry.
    fn detach(&self) -> Vec<Arc<InstanceShared>> {
        let mut readers = self.readers.lock();
        self.detached.store(true, Ordering::Release);

        for reader in readers.iter() {
            let _fifo = reader.fifo.lock();
            reader.dead.store(true, Ordering::Release);
            reader.readiness.set();
        }

        mem::take(&mut *readers)
    }

    pub(crate) fn unregister(&self, instance: &Arc<InstanceShared>) {
        let mut readers = self.readers.lock();
        if !instance.is_dead() {
            readers.retain(|reader| !Arc::ptr_eq(reader, instance));
        }
    }
}

impl Drop for DeviceShared {
    fn drop(&mut self) {
        let readers = self.detach();
        if !readers.is_empty() {
            log::debug!("hid device dropped with {} open readers", readers.len());
        }
    }
}

/// One attached physical HID device and the readers that have it open.
///
/// Clones share the same device.
#[derive(Debug, Clone)]
pub struct HidDevice {
    shared: Arc<DeviceShared>,
}

impl HidDevice {
    pub fn new(
        descriptor: Descriptor,
        class: DeviceClass,
        boot_device: bool,
        config: Config,
    ) -> Self {
        Self {
            shared: Arc::new(DeviceShared {
                descriptor,
                class,
                boot_device,
                config,
                detached: AtomicBool::new(false),
                readers: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Brings up a device behind `transport`.
    ///
    /// Boot devices are switched to the boot protocol first; failing that, or
    /// failing to fetch or parse the report descriptor, aborts the attach.
    /// Clearing NUM LOCK and setting the idle rate are best effort.
    pub fn attach<T: HidTransport + ?Sized>(
        transport: &mut T,
        class: DeviceClass,
        boot_device: bool,
        config: Config,
    ) -> Result<Self, Error> {
        if boot_device {
            transport
                .set_protocol_mode(ProtocolMode::Boot)
                .map_err(|err| {
                    log::error!("could not put HID device into boot protocol: {err}");
                    Error::Unsupported
                })?;

            if class == DeviceClass::Keyboard && config.clear_num_lock {
                if let Err(err) = transport.set_output_report(0, &[0]) {
                    log::warn!("could not disable NUM LOCK: {err}");
                }
            }
        }

        let data = transport
            .fetch_descriptor()
            .inspect_err(|err| log::error!("could not retrieve HID report descriptor: {err}"))?;

        let descriptor = Descriptor::parse(data)
            .inspect_err(|err| log::error!("could not parse HID report descriptor: {err}"))?;
        log::debug!("{descriptor}");

        if let Err(err) = transport.set_idle_rate(0, config.idle_duration) {
            log::warn!("set idle failed: {err}");
        }

        Ok(Self::new(descriptor, class, boot_device, config))
    }

    pub fn class(&self) -> DeviceClass {
        self.shared.class
    }

    pub fn is_boot_device(&self) -> bool {
        self.shared.boot_device
    }

    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.shared.descriptor
    }

    /// Report information as queries see it, boot mouse override included.
    pub fn reports(&self) -> Reports<'_> {
        self.shared.reports()
    }

    pub fn is_detached(&self) -> bool {
        self.shared.detached.load(Ordering::Acquire)
    }

    /// Number of open, live readers.
    pub fn reader_count(&self) -> usize {
        self.shared.readers.lock().len()
    }

    pub fn open(&self) -> Result<Instance, Error> {
        let instance = Arc::new(InstanceShared::new()?);

        let mut readers = self.shared.readers.lock();
        if self.is_detached() {
            return Err(Error::DeviceClosed);
        }
        readers.push(Arc::clone(&instance));
        drop(readers);

        Ok(Instance::new(instance, Arc::downgrade(&self.shared)))
    }

    /// Copies one input report into every open reader's FIFO.
    ///
    /// A reader whose FIFO can't take the whole report misses it; the others
    /// still receive it.
    pub fn deliver(&self, data: &[u8]) {
        let readers = self.shared.readers.lock();
        for reader in readers.iter() {
            let mut fifo = reader.fifo.lock();
            let was_empty = fifo.is_empty();

            match fifo.write(data) {
                Ok(0) => {}
                Ok(_) => {
                    if was_empty {
                        reader.readiness.set();
                    }
                }
                Err(err) => log::warn!("could not write to hid fifo: {err}"),
            }
        }
    }

    /// Marks every reader dead and wakes it; the device accepts no new readers.
    pub fn device_detached(&self) {
        let readers = self.shared.detach();
        log::debug!("hid device detached with {} open readers", readers.len());
    }

    /// Handles one finished interrupt transfer from the transport.
    pub fn handle_completion(&self, completion: Completion) -> Flow {
        match completion {
            Completion::Report(data) => {
                self.deliver(&data);
                Flow::Rearm
            }
            Completion::Closed => {
                self.device_detached();
                Flow::Stop
            }
            Completion::Status(status) => {
                log::warn!("unknown interrupt transfer status: {status}");
                Flow::Rearm
            }
        }
    }

    /// Feeds completions to [`HidDevice::handle_completion`] until the device closes
    /// or the stream ends.
    pub fn pump(&self, completions: impl IntoIterator<Item = Completion>) {
        for completion in completions {
            if self.handle_completion(completion) == Flow::Stop {
                break;
            }
        }
    }
}
