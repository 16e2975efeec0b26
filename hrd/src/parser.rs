use crate::Error;
use crate::ReportSizeTable;
use crate::ReportType;

#[derive(Clone, Copy, Default)]
pub(crate) struct ParserGlobalState {
    pub report_size: u32,
    pub report_count: u32,
    pub report_id: Option<u8>,
}

const LEN_MASK: u8 = 0x3;

const TYPE_MASK: u8 = 0x0C;
const TYPE_RESERVED: u8 = 0x0C;

const TAG_MASK: u8 = 0xFC;

const TAG_INPUT: u8 = 0x80;
const TAG_OUTPUT: u8 = 0x90;
const TAG_FEATURE: u8 = 0xB0;

const TAG_REPORT_SIZE: u8 = 0x74;
const TAG_REPORT_ID: u8 = 0x84;
const TAG_REPORT_COUNT: u8 = 0x94;
const TAG_PUSH: u8 = 0xA4;
const TAG_POP: u8 = 0xB4;

enum Tag {
    Short(u8),
    Reserved,
}

struct Item {
    tag: Tag,
    data: i64,
}

/// Decodes the short item starting at `pos`, returning it with the offset of the next item.
///
/// An item whose payload would reach the end of `data` decodes as `Reserved` and moves
/// the cursor to the end, which stops the scan.
fn next_item(data: &[u8], pos: usize) -> (Item, usize) {
    let Some(&prefix) = data.get(pos) else {
        return (
            Item {
                tag: Tag::Reserved,
                data: 0,
            },
            data.len(),
        );
    };

    let len = match prefix & LEN_MASK {
        3 => 4,
        len => len as usize,
    };

    if pos + len >= data.len() {
        let item = Item {
            tag: Tag::Reserved,
            data: 0,
        };
        return (item, data.len());
    }

    let payload = &data[pos + 1..pos + 1 + len];
    let value = payload
        .iter()
        .enumerate()
        .fold(0i64, |acc, (i, &byte)| acc | (i64::from(byte) << (8 * i)));

    let tag = if prefix & TYPE_MASK == TYPE_RESERVED {
        Tag::Reserved
    } else {
        Tag::Short(prefix & TAG_MASK)
    };

    (Item { tag, data: value }, pos + 1 + len)
}

/// Single pass interpreter computing report sizes from a report descriptor.
#[derive(Default)]
pub struct Parser {
    global: ParserGlobalState,
    table: ReportSizeTable,
}

impl Parser {
    pub fn parse(mut self, data: &[u8]) -> Result<ReportSizeTable, Error> {
        let mut pos = 0;

        while pos < data.len() {
            let (item, next) = next_item(data, pos);
            pos = next;

            self.execute(item)?;
        }

        Ok(self.table)
    }

    fn execute(&mut self, item: Item) -> Result<(), Error> {
        match item.tag {
            Tag::Short(TAG_REPORT_SIZE) => self.global.report_size = item.data as u32,
            Tag::Short(TAG_REPORT_ID) => self.global.report_id = Some(item.data as u8),
            Tag::Short(TAG_REPORT_COUNT) => self.global.report_count = item.data as u32,
            Tag::Short(TAG_PUSH) | Tag::Short(TAG_POP) => {
                log::warn!("HID push/pop not supported");
                return Err(Error::UnsupportedFeature);
            }

            Tag::Short(TAG_INPUT) => self.add_field(ReportType::Input)?,
            Tag::Short(TAG_OUTPUT) => self.add_field(ReportType::Output)?,
            Tag::Short(TAG_FEATURE) => self.add_field(ReportType::Feature)?,

            Tag::Short(x) => {
                log::trace!("skipping tag {x:#x} with data {:#x}", item.data)
            }
            Tag::Reserved => {}
        }

        Ok(())
    }

    fn add_field(&mut self, r#type: ReportType) -> Result<(), Error> {
        let increment = self
            .global
            .report_size
            .wrapping_mul(self.global.report_count);

        self.table
            .add_bits(self.global.report_id, r#type, increment)
    }
}
