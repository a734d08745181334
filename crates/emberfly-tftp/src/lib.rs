//! Emberfly TFTP Configuration
//!
//! Rendering and best-effort recovery of the tftpd-hpa daemon configuration,
//! plus an inventory of the loader binaries in the TFTP root.
//!
//! This crate does not speak the TFTP protocol; it only deals with the
//! daemon's configuration file and directory.
//!
//! # Example
//!
//! ```
//! use emberfly_common::TftpSettings;
//!
//! let conf = emberfly_tftp::render(&TftpSettings::default());
//! assert!(conf.contains("TFTP_ADDRESS=\"0.0.0.0:69\""));
//!
//! let recovered = emberfly_tftp::parse(&conf, &TftpSettings::default());
//! assert_eq!(recovered.address, "0.0.0.0");
//! ```

pub mod conf;
pub mod files;

pub use conf::{parse, render, TFTP_PORT};
pub use files::{list_boot_files, BootFile, BootFileKind};
