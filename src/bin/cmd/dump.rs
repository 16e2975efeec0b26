use hiddev::Config;
use hiddev::DeviceClass;
use hiddev::HidDevice;
use hrd::Descriptor;
use hrd::ReportType;
use std::fs;
use std::io;
use std::path::Path;

pub fn print(descriptor: Descriptor, class: DeviceClass, config: Config) {
    print!("{descriptor}");

    let device = HidDevice::new(descriptor, class, false, config);
    let reports = device.reports();

    println!("protocol: {:?}", reports.protocol());
    println!("max input report: {} bytes", reports.max_report_size());
    for id in reports.report_ids() {
        println!(
            "  report id: {id}  bytes: in {} out {} feat {}",
            reports.report_size(id, ReportType::Input),
            reports.report_size(id, ReportType::Output),
            reports.report_size(id, ReportType::Feature),
        );
    }
}

pub fn run(path: &Path, class: DeviceClass, config: Config) -> io::Result<()> {
    let data = fs::read(path)?;
    let descriptor =
        Descriptor::parse(data).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;

    print(descriptor, class, config);

    Ok(())
}
