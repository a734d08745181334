//! Emberfly DHCP Configuration
//!
//! Rendering and best-effort recovery of the isc-dhcp-server configuration
//! file. This crate does not speak DHCP; it only deals with the daemon's
//! config-file grammar: a fixed preamble, a PXE option space, and one subnet
//! block whose filename directive chains iPXE-capable clients to the HTTP
//! menu and serves the matching loader binary to everyone else.
//!
//! # Example
//!
//! ```
//! use emberfly_common::NetworkSettings;
//!
//! let settings = NetworkSettings::default();
//! settings.validate().unwrap();
//!
//! let conf = emberfly_dhcp::render(&settings);
//! assert!(conf.contains("subnet 192.168.122.0 netmask 255.255.255.0"));
//!
//! let recovered = emberfly_dhcp::parse(&conf, &NetworkSettings::default());
//! assert_eq!(recovered, settings);
//! ```

pub mod conf;

pub use conf::{parse, render, BIOS_BOOT_FILE, UEFI_BOOT_FILE};
