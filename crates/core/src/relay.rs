//! Relay control: the linear set-relay pipeline over the hiddev transport.
//!
//! Hiddev sequence for setting one output bit:
//!   1. `HIDIOCGREPORTINFO` for report type OUTPUT, report id FIRST —
//!      the driver resolves the sentinel to the concrete first output report.
//!   2. `HIDIOCGUCODE` — resolve the usage code for field 0, usage index =
//!      relay index.
//!   3. `HIDIOCSUSAGE` — write the value into the driver's report buffer.
//!   4. `HIDIOCSREPORT` with `num_fields = 1` — submit the report; only this
//!      step changes physical relay state.
//!
//! Every step is one-shot and terminal on failure; there are no retries.

use crate::error::Result;
use crate::hiddev::{ReportInfo, UsageRef, HID_REPORT_ID_FIRST, HID_REPORT_TYPE_OUTPUT};
use crate::safety;
use crate::transport::HiddevTransport;
use tracing::{debug, trace};

/// Set one relay output to the given value.
///
/// The index and value are validated before any device call. Returns the
/// resolved usage reference that was committed.
pub fn set_relay(transport: &dyn HiddevTransport, index: u32, value: u32) -> Result<UsageRef> {
    let index = safety::validate_relay_index(index)?;
    let value = safety::validate_relay_value(value)?;

    let report = transport.report_info(ReportInfo {
        report_type: HID_REPORT_TYPE_OUTPUT,
        report_id: HID_REPORT_ID_FIRST,
        num_fields: 0,
    })?;
    trace!(
        report_id = report.report_id,
        num_fields = report.num_fields,
        "output report resolved"
    );

    let usage = transport.usage_code(UsageRef {
        report_type: report.report_type,
        report_id: report.report_id,
        field_index: 0,
        usage_index: index as u32,
        usage_code: 0,
        value: value as i32,
    })?;
    trace!(
        usage_code = format_args!("0x{:08X}", usage.usage_code),
        usage_index = usage.usage_index,
        "usage code resolved"
    );

    transport.set_usage(&usage)?;

    // The driver reports the field count of the whole report; only the one
    // updated field is submitted.
    transport.send_report(&ReportInfo {
        report_type: report.report_type,
        report_id: report.report_id,
        num_fields: 1,
    })?;

    debug!(index, value, "relay updated");
    Ok(usage)
}
