//! usb-relay-core: hiddev transport, identity check, and relay control.
//!
//! This crate provides the core logic for setting a single relay on a USB
//! HID relay board through the Linux hiddev interface (`/dev/usb/hiddevN`).

pub mod error;
pub mod hiddev;
pub mod identity;
pub mod relay;
pub mod safety;
pub mod transport;

/// Relay board USB Vendor ID.
pub const RELAY_VENDOR_ID: u16 = 0x12BF;

/// Relay board USB Product ID (low 16 bits; the device may report extra
/// upper bits which are masked off before comparison).
pub const RELAY_PRODUCT_ID: u16 = 0xFF03;

/// Number of relay channels on the board (indices 0..=7).
pub const RELAY_COUNT: u32 = 8;

/// Device node used when no `-d` option is given.
pub const DEFAULT_DEVICE_PATH: &str = "/dev/usb/hiddev0";
