use crate::Error;
use crate::ReportSizeEntry;
use crate::ReportType;

/// Upper bound on distinct report ids a single device may declare.
pub const MAX_REPORT_IDS: usize = 16;

/// Fixed-capacity table of per-report-id bit lengths.
///
/// Slots are claimed first-fit and never released, so slot order is
/// insertion order and `len()` always equals the number of claimed slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSizeTable {
    slots: [Option<ReportSizeEntry>; MAX_REPORT_IDS],
    len: usize,
}

impl Default for ReportSizeTable {
    fn default() -> Self {
        Self {
            slots: [None; MAX_REPORT_IDS],
            len: 0,
        }
    }
}

impl ReportSizeTable {
    /// Returns the slot index for `id`, claiming the first unset slot on a miss.
    pub fn find_or_create(&mut self, id: Option<u8>) -> Result<usize, Error> {
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            match slot {
                Some(entry) if entry.id == id => return Ok(idx),
                Some(_) => continue,
                None => {
                    *slot = Some(ReportSizeEntry::new(id));
                    self.len += 1;
                    return Ok(idx);
                }
            }
        }

        Err(Error::TooManyReports)
    }

    pub(crate) fn add_bits(
        &mut self,
        id: Option<u8>,
        r#type: ReportType,
        bits: u32,
    ) -> Result<(), Error> {
        let idx = self.find_or_create(id)?;
        if let Some(entry) = self.slots.get_mut(idx).and_then(Option::as_mut) {
            entry.add_bits(r#type, bits);
        }
        Ok(())
    }

    /// Looks up an entry by the id consumers see (zero for the implicit report).
    pub fn get(&self, id: u8) -> Option<&ReportSizeEntry> {
        self.iter().find(|entry| entry.wire_id() == id)
    }

    /// Recorded bit length of report `id`, `None` if the id was never declared.
    pub fn lookup(&self, id: u8, r#type: ReportType) -> Option<u32> {
        self.get(id).map(|entry| entry.bits(r#type))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReportSizeEntry> {
        self.slots.iter().map_while(Option::as_ref)
    }

    /// Largest input report across all entries, in bytes.
    pub fn max_input_bytes(&self) -> u32 {
        self.iter()
            .map(|entry| entry.input_bits)
            .max()
            .unwrap_or(0)
            .div_ceil(8)
    }
}
