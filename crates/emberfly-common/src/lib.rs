//! Emberfly shared models
//!
//! This crate holds the data model the rest of the engine operates on:
//! the bootable image catalog, the network/TFTP settings record, and the
//! validation errors raised before any configuration text is generated.
//!
//! The synthesizer and parser crates (`emberfly-ipxe`, `emberfly-dhcp`,
//! `emberfly-tftp`) consume these types and stay free of any storage or
//! transport concerns.

pub mod catalog;
pub mod error;
pub mod network;
pub mod settings;

pub use catalog::{Catalog, CategoryGroup, Image, ImageKind, RESERVED_ANCHORS};
pub use error::{Error, Result};
pub use network::{NetworkSettings, TftpSettings};
pub use settings::{ServerSettings, SystemSettings};
