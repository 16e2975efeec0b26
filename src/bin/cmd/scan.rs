use super::dump;
use hiddev::sysfs;
use hiddev::Config;
use hiddev::DeviceClass;
use std::io;
use std::path::Path;

pub fn run(root: &Path, class: DeviceClass, config: Config) -> io::Result<()> {
    sysfs::for_each_device(root, |info| {
        println!(
            "{}: bus {:04x} vid {:04x} pid {:04x}",
            info.name, info.bus, info.vid, info.pid
        );

        dump::print(info.report_descriptor.clone(), class, config);
        println!();

        Ok(())
    })
}
