//! Error types shared across the configuration engine

use std::net::Ipv4Addr;
use thiserror::Error;

/// Validation errors raised before any configuration text is generated.
///
/// Partial parses and skipped generation units are not errors; parsers fall
/// back to defaults field by field, and the synthesizers silently omit
/// unbootable entries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Two images share the same id
    #[error("duplicate image id: {0}")]
    DuplicateImageId(String),

    /// Image id contains characters that are not menu-anchor safe
    #[error("image id is not a valid menu anchor: {0:?}")]
    InvalidImageId(String),

    /// Image id collides with a reserved menu anchor
    #[error("image id collides with reserved menu anchor: {0:?}")]
    ReservedAnchor(String),

    /// DHCP range end is not strictly greater than range start
    #[error("DHCP range end {end} must be greater than range start {start}")]
    RangeOrder { start: Ipv4Addr, end: Ipv4Addr },

    /// An address field could not be parsed as a dotted quad
    #[error("invalid {field} address: {value}")]
    InvalidAddress { field: &'static str, value: String },
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;
