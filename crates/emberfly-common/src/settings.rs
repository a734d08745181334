//! Collaborator-owned system settings record (`system.json`)
//!
//! Every field tolerates being absent from old files and takes its default,
//! so records written by earlier versions keep deserializing.

use crate::network::{NetworkSettings, TftpSettings};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// Identity of the boot server itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Address clients fetch menus and assets from
    #[serde(default = "default_server_ip")]
    pub ip: Ipv4Addr,

    #[serde(default = "default_server_name")]
    pub name: String,
}

fn default_server_ip() -> Ipv4Addr {
    Ipv4Addr::new(192, 168, 122, 20)
}

fn default_server_name() -> String {
    "emberfly-server".to_string()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            ip: default_server_ip(),
            name: default_server_name(),
        }
    }
}

/// Top-level system settings record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemSettings {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub network: NetworkSettings,

    #[serde(default)]
    pub tftp: TftpSettings,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl SystemSettings {
    /// Stamp the record before persisting it.
    pub fn touch(&mut self) {
        self.last_updated = Some(Utc::now());
    }
}
