//! Enumeration of HID devices exposed by the Linux kernel under sysfs.

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

pub const HID_DEVICES: &str = "/sys/bus/hid/devices";

#[derive(Debug)]
pub struct DeviceInfo {
    pub name: String,
    pub path: PathBuf,
    pub bus: u16,
    pub vid: u16,
    pub pid: u16,
    pub hid: u16,
    pub report_descriptor: hrd::Descriptor,
}

fn from_hex(data: &str) -> Option<u16> {
    u16::from_str_radix(data, 16).ok()
}

/// Splits a `BBBB:VVVV:PPPP.NNNN` device directory name into its hex fields.
pub fn parse_device_name(name: &str) -> Option<(u16, u16, u16, u16)> {
    if name.len() != 19 {
        return None;
    }

    let (bus, rest) = name.split_once(':')?;
    let (vid, rest) = rest.split_once(':')?;
    let (pid, hid) = rest.split_once('.')?;

    Some((from_hex(bus)?, from_hex(vid)?, from_hex(pid)?, from_hex(hid)?))
}

/// Calls `f` for every device under `root` whose report descriptor parses.
///
/// Devices with unexpected names are ignored; unreadable or unparseable
/// descriptors are logged and skipped.
pub fn for_each_device(
    root: &Path,
    mut f: impl FnMut(&DeviceInfo) -> io::Result<()>,
) -> io::Result<()> {
    let mut entries = fs::read_dir(root)?
        .filter_map(Result::ok)
        .collect::<Vec<_>>();
    entries.sort_by_key(|entry| entry.file_name());

    for device_dir in entries {
        let Ok(name) = device_dir.file_name().into_string() else {
            continue;
        };
        let Some((bus, vid, pid, hid)) = parse_device_name(&name) else {
            continue;
        };

        let data = match fs::read(device_dir.path().join("report_descriptor")) {
            Ok(data) => data,
            Err(err) => {
                log::error!("{name}: {err}");
                continue;
            }
        };

        let report_descriptor = match hrd::Descriptor::parse(data) {
            Ok(report_descriptor) => report_descriptor,
            Err(err) => {
                log::error!("{name}: {err}");
                continue;
            }
        };

        let info = DeviceInfo {
            path: device_dir.path(),
            name,
            bus,
            vid,
            pid,
            hid,
            report_descriptor,
        };

        f(&info)?;
    }

    Ok(())
}
