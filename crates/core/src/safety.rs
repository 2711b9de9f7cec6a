//! Safety layer: validates all write parameters against the board's ranges
//! before any device I/O.
//!
//! ## Bounds
//!
//! - **Relay index**: 0–7. The board exposes eight relay channels as eight
//!   usages within field 0 of its output report.
//! - **Value**: 0–255. The transport carries a full byte even though each
//!   relay channel is a boolean bit; the bit-width is not enforced beyond
//!   the wire limit, matching the board's own behavior.
//!
//! All validation happens before the device node is touched — an invalid
//! argument never results in an open, query, or write.

use crate::error::{Error, Result};
use crate::RELAY_COUNT;

/// Maximum value writable into a usage (wire limit of the transport).
pub const VALUE_MAX: u32 = 255;

/// Validate a relay index (0-based).
pub fn validate_relay_index(index: u32) -> Result<u8> {
    if index >= RELAY_COUNT {
        return Err(Error::OutOfRange {
            field: "index",
            value: index,
            min: 0,
            max: RELAY_COUNT - 1,
        });
    }
    Ok(index as u8)
}

/// Validate an output value.
pub fn validate_relay_value(value: u32) -> Result<u8> {
    if value > VALUE_MAX {
        return Err(Error::OutOfRange {
            field: "value",
            value,
            min: 0,
            max: VALUE_MAX,
        });
    }
    Ok(value as u8)
}
