//! Payload decoding and validation.

use crate::domain::order::Order;
use crate::error::Result;

/// Decode a bus payload into the order shape.
///
/// # Errors
/// Returns [`Error::Json`](crate::error::Error::Json) if the payload is not
/// a JSON order.
pub fn decode(payload: &[u8]) -> Result<Order> {
    Ok(serde_json::from_slice(payload)?)
}

/// Decode a payload and check every part of the order.
///
/// # Errors
/// Returns `Error::Json` for undecodable payloads and
/// [`Error::Validation`](crate::error::Error::Validation) for orders that
/// fail a field rule.
pub fn decode_valid(payload: &[u8]) -> Result<Order> {
    let order = decode(payload)?;
    order.check()?;
    Ok(order)
}
