//! Fan-out of input reports to several readers of one device.

use hiddev::{Config, DeviceClass, Error, HidDevice, Query, FIFO_CAPACITY};
use hrd::Descriptor;
use std::sync::Arc;
use std::sync::Barrier;
use std::thread;
use std::time::Duration;

// Report 1: 4 byte input. Report 2: 8 byte input, 1 byte output.
const DESCRIPTOR: &[u8] = &[
    0x75, 0x08, 0x95, 0x04, 0x85, 0x01, 0x81, 0x02, 0x85, 0x02, 0x95, 0x08, 0x81, 0x02, 0x95,
    0x01, 0x91, 0x02,
];

fn device(class: DeviceClass) -> HidDevice {
    let descriptor = Descriptor::parse(DESCRIPTOR).unwrap();
    HidDevice::new(descriptor, class, false, Config::default())
}

#[test]
fn deliver_then_read() {
    let device = device(DeviceClass::Other);
    let reader = device.open().unwrap();
    assert!(!reader.is_readable());

    device.deliver(&[1, 2, 3, 4]);
    assert!(reader.is_readable());

    let mut buf = [0u8; 16];
    assert_eq!(reader.read(&mut buf), Ok(4));
    assert_eq!(&buf[..4], &[1, 2, 3, 4]);
    assert!(!reader.is_readable());

    assert_eq!(reader.read(&mut buf), Ok(0));
}

#[test]
fn partial_reads_keep_readable() {
    let device = device(DeviceClass::Other);
    let reader = device.open().unwrap();

    device.deliver(&[1, 2, 3, 4]);

    let mut buf = [0u8; 3];
    assert_eq!(reader.read(&mut buf), Ok(3));
    assert!(reader.is_readable());
    assert_eq!(reader.read(&mut buf), Ok(1));
    assert_eq!(buf[0], 4);
    assert!(!reader.is_readable());
}

#[test]
fn every_reader_sees_every_report() {
    let device = device(DeviceClass::Other);
    let fast = device.open().unwrap();
    let idle = device.open().unwrap();

    let mut received = Vec::new();
    let mut buf = [0u8; 8];
    for i in 0..10u8 {
        device.deliver(&[i; 8]);
        let count = fast.read(&mut buf).unwrap();
        received.extend_from_slice(&buf[..count]);
    }

    let expected: Vec<u8> = (0..10u8).flat_map(|i| [i; 8]).collect();
    assert_eq!(received, expected);

    assert_eq!(idle.pending(), 80);
    let mut all = vec![0u8; 128];
    let count = idle.read(&mut all).unwrap();
    assert_eq!(&all[..count], expected.as_slice());
}

#[test]
fn full_reader_does_not_starve_others() {
    let device = device(DeviceClass::Other);
    let stalled = device.open().unwrap();
    let active = device.open().unwrap();

    let report = [0xaa; 8];
    let fits = FIFO_CAPACITY / report.len();
    let mut buf = [0u8; 8];

    for _ in 0..fits + 5 {
        device.deliver(&report);
        assert_eq!(active.read(&mut buf), Ok(8));
        assert_eq!(buf, report);
    }

    assert_eq!(stalled.pending(), FIFO_CAPACITY);

    // once drained, the stalled reader accepts new reports again
    let mut drain = vec![0u8; FIFO_CAPACITY];
    assert_eq!(stalled.read(&mut drain), Ok(FIFO_CAPACITY));
    device.deliver(&[1, 2]);
    assert_eq!(stalled.read(&mut buf), Ok(2));
    assert_eq!(active.read(&mut buf), Ok(2));
}

#[test]
fn detach_kills_readers_with_pending_data() {
    let device = device(DeviceClass::Other);
    let first = device.open().unwrap();
    let second = device.open().unwrap();

    device.deliver(&[1, 2, 3]);
    device.device_detached();

    let mut buf = [0u8; 8];
    for reader in [&first, &second] {
        assert!(reader.is_dead());
        assert!(reader.is_readable());
        assert_eq!(reader.read(&mut buf), Err(Error::DeviceClosed));
        assert_eq!(
            reader.dispatch_query(Query::GetNumReports, &[], &mut buf),
            Err(Error::DeviceClosed)
        );
    }

    assert_eq!(device.reader_count(), 0);
    device.deliver(&[4]);
    assert_eq!(first.pending(), 3);

    drop(first);
    second.close();
}

#[test]
fn readers_outlive_device() {
    let device = device(DeviceClass::Other);
    let reader = device.open().unwrap();

    device.device_detached();
    drop(device);

    assert_eq!(reader.read(&mut [0u8; 4]), Err(Error::DeviceClosed));
    reader.close();
}

#[test]
fn queries_through_instance() {
    let device = device(DeviceClass::Other);
    let reader = device.open().unwrap();
    let mut buf = [0u8; 32];

    let count = reader
        .dispatch_query(Query::GetReportIds, &[], &mut buf)
        .unwrap();
    assert_eq!(&buf[..count], &[1, 2]);

    let count = reader
        .dispatch_query(Query::GetReportSize, &[2, 2], &mut buf)
        .unwrap();
    assert_eq!(&buf[..count], &1u16.to_le_bytes());

    let count = reader
        .dispatch_query(Query::GetMaxReportSize, &[], &mut buf)
        .unwrap();
    assert_eq!(&buf[..count], &8u16.to_le_bytes());
}

#[test]
fn pointer_queries_report_boot_mouse() {
    let device = device(DeviceClass::Pointer);
    let reader = device.open().unwrap();
    let mut buf = [0u8; 32];

    let count = reader
        .dispatch_query(Query::GetNumReports, &[], &mut buf)
        .unwrap();
    assert_eq!(&buf[..count], &1u64.to_le_bytes());

    let count = reader
        .dispatch_query(Query::GetReportIds, &[], &mut buf)
        .unwrap();
    assert_eq!(&buf[..count], &[0]);

    let count = reader
        .dispatch_query(Query::GetReportSize, &[0, 1], &mut buf)
        .unwrap();
    assert_eq!(&buf[..count], &3u16.to_le_bytes());

    assert_eq!(device.descriptor().table().len(), 2);
}

#[test]
fn detach_wakes_blocked_reader() {
    let device = device(DeviceClass::Other);
    let reader = device.open().unwrap();

    let waiter = thread::spawn(move || {
        let woke = reader.wait_readable(Duration::from_secs(10));
        (woke, reader.read(&mut [0u8; 4]))
    });

    thread::sleep(Duration::from_millis(20));
    device.device_detached();

    let (woke, read) = waiter.join().unwrap();
    assert!(woke);
    assert_eq!(read, Err(Error::DeviceClosed));
}

#[test]
fn concurrent_delivery_and_reads() {
    const READERS: usize = 4;
    const REPORTS: usize = 200;
    const REPORT_LEN: usize = 4;

    let device = device(DeviceClass::Other);
    let readers: Vec<_> = (0..READERS).map(|_| device.open().unwrap()).collect();
    let start = Arc::new(Barrier::new(READERS + 1));

    let handles: Vec<_> = readers
        .into_iter()
        .map(|reader| {
            let start = Arc::clone(&start);
            thread::spawn(move || {
                start.wait();
                let mut received = Vec::new();
                let mut buf = [0u8; 64];
                while received.len() < REPORTS * REPORT_LEN {
                    if !reader.wait_readable(Duration::from_secs(10)) {
                        break;
                    }
                    match reader.read(&mut buf) {
                        Ok(count) => received.extend_from_slice(&buf[..count]),
                        Err(_) => break,
                    }
                }
                received
            })
        })
        .collect();

    start.wait();
    for i in 0..REPORTS {
        device.deliver(&[i as u8; REPORT_LEN]);
    }

    let expected: Vec<u8> = (0..REPORTS).flat_map(|i| [i as u8; REPORT_LEN]).collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn open_close_while_delivering() {
    let device = device(DeviceClass::Other);

    let churn = {
        let device = device.clone();
        thread::spawn(move || {
            for _ in 0..100 {
                let reader = device.open().unwrap();
                reader.close();
            }
        })
    };

    for _ in 0..100 {
        device.deliver(&[1, 2, 3, 4]);
    }

    churn.join().unwrap();
    assert_eq!(device.reader_count(), 0);
}

#[test]
fn detach_during_reads_leaves_reader_readable() {
    for _ in 0..500 {
        let device = device(DeviceClass::Other);
        let reader = Arc::new(device.open().unwrap());
        device.deliver(&[1, 2, 3, 4]);

        let spinner = {
            let reader = Arc::clone(&reader);
            thread::spawn(move || {
                let mut buf = [0u8; 2];
                while reader.read(&mut buf).is_ok() {}
            })
        };

        device.device_detached();
        spinner.join().unwrap();

        assert!(reader.is_dead());
        assert!(reader.is_readable());
        assert!(reader.wait_readable(Duration::ZERO));
    }
}

#[test]
fn dropping_device_kills_readers() {
    let device = device(DeviceClass::Other);
    let reader = device.open().unwrap();
    device.deliver(&[1, 2]);
    reader.read(&mut [0u8; 4]).unwrap();
    assert!(!reader.is_readable());

    drop(device);

    assert!(reader.is_dead());
    assert!(reader.is_readable());
    assert_eq!(reader.read(&mut [0u8; 4]), Err(Error::DeviceClosed));
    assert_eq!(
        reader.dispatch_query(Query::GetNumReports, &[], &mut [0u8; 8]),
        Err(Error::DeviceClosed)
    );
}

#[test]
fn dropping_device_wakes_blocked_reader() {
    let device = device(DeviceClass::Other);
    let reader = device.open().unwrap();

    let waiter = thread::spawn(move || {
        let woke = reader.wait_readable(Duration::from_secs(10));
        (woke, reader.read(&mut [0u8; 4]))
    });

    thread::sleep(Duration::from_millis(20));
    drop(device);

    let (woke, read) = waiter.join().unwrap();
    assert!(woke);
    assert_eq!(read, Err(Error::DeviceClosed));
}
