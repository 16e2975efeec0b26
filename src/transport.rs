//! What the core needs from the bus driver that talks to the physical device.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolMode {
    Boot,
    Report,
}

/// Status code reported by a failed transport request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("transport request failed with status {0}")]
pub struct TransportError(pub i32);

/// Control requests issued while attaching a device.
pub trait HidTransport {
    fn fetch_descriptor(&mut self) -> Result<Vec<u8>, TransportError>;
    fn set_idle_rate(&mut self, report_id: u8, duration: u8) -> Result<(), TransportError>;
    fn set_protocol_mode(&mut self, mode: ProtocolMode) -> Result<(), TransportError>;
    fn set_output_report(&mut self, report_id: u8, data: &[u8]) -> Result<(), TransportError>;
}

/// Outcome of one interrupt IN transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Report(Vec<u8>),
    Closed,
    Status(i32),
}

/// Whether the transport should queue another interrupt transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Rearm,
    Stop,
}
