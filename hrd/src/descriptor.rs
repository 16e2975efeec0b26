use crate::Error;
use crate::ReportSizeTable;
use std::fmt;

/// Raw report descriptor bytes together with the size table parsed from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    data: Box<[u8]>,
    table: ReportSizeTable,
}

impl Descriptor {
    pub fn parse(data: impl Into<Box<[u8]>>) -> Result<Self, Error> {
        let data = data.into();
        let table = crate::parse(&data)?;

        Ok(Self { data, table })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn table(&self) -> &ReportSizeTable {
        &self.table
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "HID report descriptor ({} bytes)", self.data.len())?;
        for line in self.data.chunks(16) {
            for byte in line {
                write!(f, "{byte:02x} ")?;
            }
            writeln!(f)?;
        }

        writeln!(f, "num reports: {}", self.table.len())?;
        for entry in self.table.iter() {
            writeln!(
                f,
                "  report id: {}  sizes: in {} out {} feat {}",
                entry.wire_id(),
                entry.input_bits,
                entry.output_bits,
                entry.feature_bits
            )?;
        }

        Ok(())
    }
}
