/// Implicit report id used by devices that never declare a `Report ID` item.
pub const IMPLICIT_REPORT_ID: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportType {
    Input,
    Output,
    Feature,
}

impl ReportType {
    /// Wire code used by report size / get report queries.
    pub fn code(self) -> u8 {
        match self {
            ReportType::Input => 1,
            ReportType::Output => 2,
            ReportType::Feature => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            1 => ReportType::Input,
            2 => ReportType::Output,
            3 => ReportType::Feature,
            _ => return None,
        })
    }
}

/// Accumulated bit lengths of one report id.
///
/// `id` is `None` for the implicit report of a device without `Report ID` items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSizeEntry {
    pub id: Option<u8>,
    pub input_bits: u32,
    pub output_bits: u32,
    pub feature_bits: u32,
}

impl ReportSizeEntry {
    pub(crate) fn new(id: Option<u8>) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Id as seen by consumers; the implicit report is numbered zero.
    pub fn wire_id(&self) -> u8 {
        self.id.unwrap_or(IMPLICIT_REPORT_ID)
    }

    pub fn bits(&self, r#type: ReportType) -> u32 {
        match r#type {
            ReportType::Input => self.input_bits,
            ReportType::Output => self.output_bits,
            ReportType::Feature => self.feature_bits,
        }
    }

    pub fn bytes(&self, r#type: ReportType) -> u32 {
        self.bits(r#type).div_ceil(8)
    }

    pub(crate) fn add_bits(&mut self, r#type: ReportType, bits: u32) {
        let field = match r#type {
            ReportType::Input => &mut self.input_bits,
            ReportType::Output => &mut self.output_bits,
            ReportType::Feature => &mut self.feature_bits,
        };
        *field = field.wrapping_add(bits);
    }
}
