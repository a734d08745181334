//! Emberfly iPXE Menu Synthesis
//!
//! This crate turns the image catalog into a forest of interlinked iPXE menu
//! scripts: one root menu listing the categories, one menu per category with
//! a labeled boot section per image, and a chainload entry script that ties
//! the forest to the boot server.
//!
//! # Example
//!
//! ```
//! use emberfly_ipxe::MenuBuilder;
//! use emberfly_common::{Image, ImageKind};
//!
//! let images = vec![Image {
//!     id: "ubuntu-2404".to_string(),
//!     name: "Ubuntu 24.04 LTS".to_string(),
//!     category: "ubuntu".to_string(),
//!     enabled: true,
//!     kind: ImageKind::Network,
//!     kernel: Some("assets/ubuntu-2404/vmlinuz".to_string()),
//!     initrd: Some("assets/ubuntu-2404/initrd".to_string()),
//!     squashfs: None,
//!     boot_args: None,
//! }];
//!
//! let menus = MenuBuilder::new("192.168.1.20").render(&images).unwrap();
//!
//! assert!(menus["main.ipxe"].contains("item ubuntu_menu"));
//! assert!(menus["ubuntu.ipxe"].contains("kernel ${base_url}/assets/ubuntu-2404/vmlinuz"));
//! ```

pub mod menu;

pub use menu::{MenuBuilder, DEFAULT_BOOT_ARGS};
