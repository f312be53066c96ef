//! Signed hexadecimal encoding for cursor fields.
//!
//! Negative values keep a leading `-` (`-1770` is -6000), matching the
//! format clients echo back unchanged on the next poll.

use crate::error::ProtocolError;

/// Encode a signed integer as lowercase hex.
pub fn encode_hex(value: i64) -> String {
    if value < 0 {
        format!("-{:x}", value.unsigned_abs())
    } else {
        format!("{value:x}")
    }
}

/// Decode a signed hex integer. `field` names the request field in errors.
pub fn parse_hex(field: &'static str, value: &str) -> Result<i64, ProtocolError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ProtocolError::Missing { field });
    }
    i64::from_str_radix(trimmed, 16)
        .map_err(|_| ProtocolError::invalid(field, "hex integer", value))
}

/// Decode a signed decimal integer.
pub fn parse_decimal(field: &'static str, value: &str) -> Result<i64, ProtocolError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ProtocolError::Missing { field });
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| ProtocolError::invalid(field, "decimal integer", value))
}
