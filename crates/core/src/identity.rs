//! Device identity verification against the relay board's vendor/product IDs.

use crate::error::{Error, Result};
use crate::transport::HiddevTransport;
use crate::{RELAY_PRODUCT_ID, RELAY_VENDOR_ID};
use tracing::{debug, info};

/// Mask applied to the product ID before comparison. The device may report
/// extra upper bits (likely a revision); they carry no meaning here.
pub const PRODUCT_ID_MASK: u32 = 0xFFFF;

/// Verified vendor/product identity of the attached device.
///
/// `product` holds only the low 16 bits of the reported value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceIdentity {
    pub vendor: u16,
    pub product: u16,
}

/// A raw hiddev identity field widened with sign extension.
///
/// The hiddev fields are signed 16-bit; widening through `i32` matches how
/// the kernel interface's C consumers promote them before masking, so a
/// wire pattern of 0xFF03 comes back as 0xFFFFFF03.
pub fn widened_id(raw: i16) -> u32 {
    raw as i32 as u32
}

/// A raw hiddev identity field masked down to its USB 16-bit ID.
pub fn masked_id(raw: i16) -> u16 {
    (widened_id(raw) & PRODUCT_ID_MASK) as u16
}

/// Query device info and check it is the relay board.
///
/// The vendor is checked first; on vendor mismatch the product is never
/// inspected. The product comparison uses only the low 16 bits, but the
/// mismatch message reports the full widened value as read.
pub fn verify_identity(transport: &dyn HiddevTransport) -> Result<DeviceIdentity> {
    let devinfo = transport.device_info()?;
    debug!(
        vendor = format_args!("0x{:04X}", masked_id(devinfo.vendor)),
        product = format_args!("0x{:04X}", masked_id(devinfo.product)),
        bus = devinfo.busnum,
        dev = devinfo.devnum,
        "device info"
    );

    let vendor = masked_id(devinfo.vendor);
    if vendor != RELAY_VENDOR_ID {
        return Err(Error::VendorMismatch {
            actual: widened_id(devinfo.vendor),
            expected: RELAY_VENDOR_ID,
        });
    }

    let product = masked_id(devinfo.product);
    if product != RELAY_PRODUCT_ID {
        return Err(Error::ProductMismatch {
            actual: widened_id(devinfo.product),
            expected: RELAY_PRODUCT_ID,
        });
    }

    info!(
        vendor = format_args!("0x{vendor:04X}"),
        product = format_args!("0x{product:04X}"),
        "relay board identity verified"
    );
    Ok(DeviceIdentity { vendor, product })
}
