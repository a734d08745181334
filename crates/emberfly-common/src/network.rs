//! Network configuration model
//!
//! One record covering the DHCP subnet settings and the TFTP daemon settings.
//! The engine treats every call as a pure input/output transform; the record
//! itself is owned by the collaborator's settings store.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use std::path::PathBuf;

/// DHCP-facing network settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSettings {
    #[serde(default = "default_subnet")]
    pub subnet: Ipv4Addr,

    #[serde(default = "default_netmask")]
    pub netmask: Ipv4Addr,

    /// First address handed out by the DHCP pool
    #[serde(rename = "dhcp_start", default = "default_range_start")]
    pub range_start: Ipv4Addr,

    /// Last address handed out by the DHCP pool (inclusive)
    #[serde(rename = "dhcp_end", default = "default_range_end")]
    pub range_end: Ipv4Addr,

    #[serde(default = "default_gateway")]
    pub gateway: Ipv4Addr,

    #[serde(default = "default_dns_servers")]
    pub dns_servers: Vec<Ipv4Addr>,

    /// Boot server handed to PXE clients (DHCP next-server)
    #[serde(default = "default_next_server")]
    pub next_server: Ipv4Addr,
}

fn default_subnet() -> Ipv4Addr {
    Ipv4Addr::new(192, 168, 122, 0)
}

fn default_netmask() -> Ipv4Addr {
    Ipv4Addr::new(255, 255, 255, 0)
}

fn default_range_start() -> Ipv4Addr {
    Ipv4Addr::new(192, 168, 122, 100)
}

fn default_range_end() -> Ipv4Addr {
    Ipv4Addr::new(192, 168, 122, 200)
}

fn default_gateway() -> Ipv4Addr {
    Ipv4Addr::new(192, 168, 122, 1)
}

fn default_dns_servers() -> Vec<Ipv4Addr> {
    vec![Ipv4Addr::new(192, 168, 122, 1), Ipv4Addr::new(8, 8, 8, 8)]
}

fn default_next_server() -> Ipv4Addr {
    Ipv4Addr::new(192, 168, 122, 20)
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            subnet: default_subnet(),
            netmask: default_netmask(),
            range_start: default_range_start(),
            range_end: default_range_end(),
            gateway: default_gateway(),
            dns_servers: default_dns_servers(),
            next_server: default_next_server(),
        }
    }
}

impl NetworkSettings {
    /// Validate the record before rendering any daemon configuration.
    ///
    /// The pool range end must be strictly greater than the start when both
    /// are compared as 32-bit values.
    pub fn validate(&self) -> Result<()> {
        if u32::from(self.range_end) <= u32::from(self.range_start) {
            return Err(Error::RangeOrder {
                start: self.range_start,
                end: self.range_end,
            });
        }
        Ok(())
    }

    /// Broadcast address of the subnet: `network | !netmask`.
    pub fn broadcast(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.subnet) | !u32::from(self.netmask))
    }
}

/// TFTP daemon settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TftpSettings {
    /// Directory the daemon serves boot loader binaries from
    #[serde(default = "default_tftp_root")]
    pub root: PathBuf,

    /// Bind address, without a port suffix
    #[serde(default = "default_tftp_address")]
    pub address: String,

    /// Daemon option flags, passed through verbatim
    #[serde(default = "default_tftp_options")]
    pub options: String,
}

fn default_tftp_root() -> PathBuf {
    PathBuf::from("/srv/tftp")
}

fn default_tftp_address() -> String {
    "0.0.0.0".to_string()
}

fn default_tftp_options() -> String {
    "--secure".to_string()
}

impl Default for TftpSettings {
    fn default() -> Self {
        Self {
            root: default_tftp_root(),
            address: default_tftp_address(),
            options: default_tftp_options(),
        }
    }
}
