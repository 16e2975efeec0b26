//! Report size bookkeeping and input report fan-out for HID devices.
//!
//! A [`HidDevice`] is created once per physical device from its report
//! descriptor. Every opener gets its own [`Instance`] with a private FIFO;
//! input reports handed to [`HidDevice::deliver`] are copied into all of them.

pub mod config;
pub mod device;
pub mod fifo;
pub mod instance;
pub mod query;
pub mod signal;
#[cfg(feature = "sysfs")]
pub mod sysfs;
pub mod transport;

pub use config::Config;
pub use device::DeviceClass;
pub use device::HidDevice;
pub use fifo::ReportFifo;
pub use fifo::FIFO_CAPACITY;
pub use instance::Instance;
pub use query::InputProtocol;
pub use query::Query;
pub use transport::Completion;
pub use transport::Flow;
pub use transport::HidTransport;
pub use transport::ProtocolMode;
pub use transport::TransportError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid argument")]
    InvalidArgument,
    #[error("report not found")]
    NotFound,
    #[error("operation not supported")]
    Unsupported,
    #[error("out of memory")]
    OutOfMemory,
    #[error("device closed")]
    DeviceClosed,
    #[error("report fifo is full")]
    CapacityExceeded,
    #[error("bad report descriptor: {0}")]
    Descriptor(#[from] hrd::Error),
    #[error(transparent)]
    Transport(#[from] TransportError),
}
