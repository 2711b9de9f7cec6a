//! Error types for usb-relay-core.

use std::fmt;
use std::io;
use thiserror::Error;

/// Device-call stage for the unified I/O error family.
///
/// Each stage corresponds to one hiddev ioctl in the set-relay pipeline and
/// carries the stderr label printed on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// `HIDIOCGDEVINFO` — device identity query.
    DeviceInfo,
    /// `HIDIOCGREPORTINFO` — output report metadata query.
    ReportInfo,
    /// `HIDIOCGUCODE` — usage code resolution.
    UsageCode,
    /// `HIDIOCSUSAGE` — usage value write into the driver report buffer.
    SetUsage,
    /// `HIDIOCSREPORT` — report submission to the device.
    SendReport,
}

impl Stage {
    /// Stderr label for a failure at this stage.
    pub fn label(&self) -> &'static str {
        match self {
            Self::DeviceInfo => "device was not a hiddev node",
            Self::ReportInfo => "error filling report info",
            Self::UsageCode => "error getting usage code",
            Self::SetUsage => "error setting usage",
            Self::SendReport => "error sending report",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Core library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Argument out of safe range — rejected before any device access.
    #[error("value out of range: {field} = {value} (allowed {min}..={max})")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    /// Device node could not be opened.
    #[error("opening {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Device vendor ID does not match the relay board.
    #[error("device vendor was {actual:#x}, expecting {expected:#06x}")]
    VendorMismatch { actual: u32, expected: u16 },

    /// Device product ID (low 16 bits) does not match the relay board.
    #[error("device product was {actual:#x}, expecting {expected:#06x}")]
    ProductMismatch { actual: u32, expected: u16 },

    /// A hiddev ioctl failed; `stage` identifies which call.
    #[error("{stage}: {source}")]
    Io {
        stage: Stage,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Process exit code for this failure.
    ///
    /// 1 = invalid argument, open failure, or vendor mismatch;
    /// 2 = product mismatch; 10 = any device I/O failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::OutOfRange { .. } | Self::Open { .. } | Self::VendorMismatch { .. } => 1,
            Self::ProductMismatch { .. } => 2,
            Self::Io { .. } => 10,
        }
    }
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;
