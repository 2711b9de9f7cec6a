//! Hiddev transport abstraction for device communication.
//!
//! Provides a trait over the five driver calls so that the real ioctl-backed
//! node and mock devices share the same interface.

use crate::error::Result;
use crate::hiddev::{DevInfo, ReportInfo, UsageRef};

/// Abstraction over the hiddev driver calls used by the set-relay pipeline.
///
/// Each method is one blocking request/response ioctl. The read/write calls
/// take the struct by value and return the driver-filled copy.
pub trait HiddevTransport {
    /// Query device identity (`HIDIOCGDEVINFO`).
    fn device_info(&self) -> Result<DevInfo>;

    /// Resolve report metadata for the given type/id (`HIDIOCGREPORTINFO`).
    fn report_info(&self, report: ReportInfo) -> Result<ReportInfo>;

    /// Resolve the usage code for a usage reference (`HIDIOCGUCODE`).
    fn usage_code(&self, usage: UsageRef) -> Result<UsageRef>;

    /// Write a usage value into the driver's report buffer (`HIDIOCSUSAGE`).
    fn set_usage(&self, usage: &UsageRef) -> Result<()>;

    /// Submit the report to the device (`HIDIOCSREPORT`).
    fn send_report(&self, report: &ReportInfo) -> Result<()>;
}

/// A mock hiddev transport for testing.
///
/// Scripts per-stage outcomes and records every call so tests can assert
/// the exact pipeline behavior without hardware.
#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::error::{Error, Stage};
    use crate::hiddev::HID_REPORT_ID_FIRST;
    use crate::{RELAY_PRODUCT_ID, RELAY_VENDOR_ID};
    use std::io;
    use std::sync::Mutex;

    struct State {
        devinfo: DevInfo,
        fail_at: Option<Stage>,
        errno: i32,
        resolved_report_id: u32,
        driver_num_fields: u32,
        usage_code: u32,
        set_usages: Vec<UsageRef>,
        sent_reports: Vec<ReportInfo>,
    }

    /// Mock transport simulating one attached hiddev device.
    pub struct MockTransport {
        state: Mutex<State>,
    }

    impl MockTransport {
        /// Device reporting the given raw vendor/product identity.
        pub fn with_identity(vendor: i16, product: i16) -> Self {
            Self {
                state: Mutex::new(State {
                    devinfo: DevInfo {
                        vendor,
                        product,
                        ..DevInfo::default()
                    },
                    fail_at: None,
                    errno: libc::EIO,
                    resolved_report_id: 0,
                    // Real boards expose several fields; the pipeline must
                    // still commit with num_fields forced to 1.
                    driver_num_fields: 3,
                    usage_code: 0x0008_0001,
                    set_usages: Vec::new(),
                    sent_reports: Vec::new(),
                }),
            }
        }

        /// Device with the relay board's genuine identity.
        ///
        /// The product is stored as the board reports it on the wire: the
        /// 16-bit pattern 0xFF03 read as a signed value (-253).
        pub fn relay_board() -> Self {
            Self::with_identity(RELAY_VENDOR_ID as i16, RELAY_PRODUCT_ID as i16)
        }

        /// Script the given stage to fail with `errno`.
        pub fn fail_at(&self, stage: Stage, errno: i32) {
            let mut state = self.state.lock().unwrap();
            state.fail_at = Some(stage);
            state.errno = errno;
        }

        /// Usage refs written via `set_usage`, in call order.
        pub fn set_usages(&self) -> Vec<UsageRef> {
            self.state.lock().unwrap().set_usages.clone()
        }

        /// Reports submitted via `send_report`, in call order.
        pub fn sent_reports(&self) -> Vec<ReportInfo> {
            self.state.lock().unwrap().sent_reports.clone()
        }

        fn check_fail(state: &State, stage: Stage) -> Result<()> {
            if state.fail_at == Some(stage) {
                return Err(Error::Io {
                    stage,
                    source: io::Error::from_raw_os_error(state.errno),
                });
            }
            Ok(())
        }
    }

    impl HiddevTransport for MockTransport {
        fn device_info(&self) -> Result<DevInfo> {
            let state = self.state.lock().unwrap();
            Self::check_fail(&state, Stage::DeviceInfo)?;
            Ok(state.devinfo)
        }

        fn report_info(&self, mut report: ReportInfo) -> Result<ReportInfo> {
            let state = self.state.lock().unwrap();
            Self::check_fail(&state, Stage::ReportInfo)?;
            if report.report_id == HID_REPORT_ID_FIRST {
                report.report_id = state.resolved_report_id;
            }
            report.num_fields = state.driver_num_fields;
            Ok(report)
        }

        fn usage_code(&self, mut usage: UsageRef) -> Result<UsageRef> {
            let state = self.state.lock().unwrap();
            Self::check_fail(&state, Stage::UsageCode)?;
            usage.usage_code = state.usage_code;
            Ok(usage)
        }

        fn set_usage(&self, usage: &UsageRef) -> Result<()> {
            let mut state = self.state.lock().unwrap();
            Self::check_fail(&state, Stage::SetUsage)?;
            state.set_usages.push(*usage);
            Ok(())
        }

        fn send_report(&self, report: &ReportInfo) -> Result<()> {
            let mut state = self.state.lock().unwrap();
            Self::check_fail(&state, Stage::SendReport)?;
            state.sent_reports.push(*report);
            Ok(())
        }
    }
}
