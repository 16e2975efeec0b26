//! Typed queries answered from a device's report size table.
//!
//! Replies are little endian and written only after the caller's buffer is
//! known to be large enough, so a failed query never leaves partial output.

use crate::DeviceClass;
use crate::Error;
use hrd::report::IMPLICIT_REPORT_ID;
use hrd::Descriptor;
use hrd::ReportType;

/// Input report size of a mouse in boot protocol.
pub const BOOT_MOUSE_REPORT_SIZE: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    GetProtocol,
    GetReportDescSize,
    GetReportDesc,
    GetNumReports,
    GetReportIds,
    GetReportSize,
    GetMaxReportSize,
    GetReport,
    SetReport,
}

impl TryFrom<u32> for Query {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Query::GetProtocol,
            1 => Query::GetReportDescSize,
            2 => Query::GetReportDesc,
            3 => Query::GetNumReports,
            4 => Query::GetReportIds,
            5 => Query::GetReportSize,
            6 => Query::GetMaxReportSize,
            7 => Query::GetReport,
            8 => Query::SetReport,
            _ => return Err(Error::Unsupported),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputProtocol {
    None = 0,
    Keyboard = 1,
    Mouse = 2,
}

/// Read-only view of what a device reports about itself.
#[derive(Debug, Clone, Copy)]
pub struct Reports<'a> {
    pub descriptor: &'a Descriptor,
    pub class: DeviceClass,
    pub pointer_boot_compat: bool,
}

impl Reports<'_> {
    /// Pointer devices run in boot protocol and ignore their descriptor.
    fn is_boot_mouse(&self) -> bool {
        self.pointer_boot_compat && self.class == DeviceClass::Pointer
    }

    pub fn protocol(&self) -> InputProtocol {
        match self.class {
            DeviceClass::Keyboard | DeviceClass::KeyboardPointer => InputProtocol::Keyboard,
            DeviceClass::Pointer => InputProtocol::Mouse,
            DeviceClass::Other => InputProtocol::None,
        }
    }

    pub fn num_reports(&self) -> usize {
        if self.is_boot_mouse() {
            return 1;
        }
        self.descriptor.table().len()
    }

    pub fn report_ids(&self) -> Vec<u8> {
        if self.is_boot_mouse() {
            return vec![IMPLICIT_REPORT_ID];
        }
        self.descriptor.table().iter().map(|entry| entry.wire_id()).collect()
    }

    /// Size in bytes of report `id`, zero if the device has no such report.
    pub fn report_size(&self, id: u8, r#type: ReportType) -> u32 {
        if self.is_boot_mouse() {
            return match (id, r#type) {
                (IMPLICIT_REPORT_ID, ReportType::Input) => u32::from(BOOT_MOUSE_REPORT_SIZE),
                _ => 0,
            };
        }
        self.descriptor
            .table()
            .get(id)
            .map_or(0, |entry| entry.bytes(r#type))
    }

    pub fn max_report_size(&self) -> u32 {
        if self.is_boot_mouse() {
            return u32::from(BOOT_MOUSE_REPORT_SIZE);
        }
        self.descriptor.table().max_input_bytes()
    }

    fn checked_report_size(&self, input: &[u8]) -> Result<u32, Error> {
        let [id, r#type, ..] = *input else {
            return Err(Error::InvalidArgument);
        };
        let r#type = ReportType::from_code(r#type).ok_or(Error::InvalidArgument)?;

        match self.report_size(id, r#type) {
            0 => Err(Error::NotFound),
            size => Ok(size),
        }
    }
}

fn reply(out: &mut [u8], data: &[u8]) -> Result<usize, Error> {
    let out = out.get_mut(..data.len()).ok_or(Error::InvalidArgument)?;
    out.copy_from_slice(data);
    Ok(data.len())
}

fn report_size_reply(size: u32) -> Result<[u8; 2], Error> {
    u16::try_from(size)
        .map(u16::to_le_bytes)
        .map_err(|_| Error::Unsupported)
}

pub fn dispatch(
    reports: &Reports<'_>,
    query: Query,
    input: &[u8],
    out: &mut [u8],
) -> Result<usize, Error> {
    match query {
        Query::GetProtocol => reply(out, &(reports.protocol() as i32).to_le_bytes()),
        Query::GetReportDescSize => {
            reply(out, &(reports.descriptor.len() as u64).to_le_bytes())
        }
        Query::GetReportDesc => reply(out, reports.descriptor.as_bytes()),
        Query::GetNumReports => reply(out, &(reports.num_reports() as u64).to_le_bytes()),
        Query::GetReportIds => reply(out, &reports.report_ids()),
        Query::GetReportSize => {
            if input.len() < 2 || out.len() < 2 {
                return Err(Error::InvalidArgument);
            }
            let size = reports.checked_report_size(input)?;
            reply(out, &report_size_reply(size)?)
        }
        Query::GetMaxReportSize => reply(out, &report_size_reply(reports.max_report_size())?),
        Query::GetReport => {
            let needed = reports.checked_report_size(input)?;
            if out.len() < needed as usize {
                return Err(Error::InvalidArgument);
            }
            // TODO: issue GET_REPORT on the control endpoint once transports expose it
            Err(Error::Unsupported)
        }
        Query::SetReport => {
            let needed = reports.checked_report_size(input)?;
            if input.len() - 2 < needed as usize {
                return Err(Error::InvalidArgument);
            }
            Err(Error::Unsupported)
        }
    }
}
