//! tftpd-hpa configuration rendering and recovery
//!
//! The daemon config is a handful of quoted key/value lines. `render`
//! normalizes the bind address to carry an explicit port; `parse` strips it
//! back off and falls back to the supplied defaults for any line it cannot
//! match.

use emberfly_common::TftpSettings;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Conventional TFTP port, appended when the bind address has none
pub const TFTP_PORT: u16 = 69;

/// Wildcard bind address a bare `:port` normalizes to
const WILDCARD_ADDRESS: &str = "0.0.0.0";

static DIRECTORY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"TFTP_DIRECTORY="([^"]+)""#).unwrap());
static ADDRESS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"TFTP_ADDRESS="([^"]+)""#).unwrap());
static OPTIONS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"TFTP_OPTIONS="([^"]+)""#).unwrap());

/// Render the full `/etc/default/tftpd-hpa` text.
pub fn render(settings: &TftpSettings) -> String {
    let address = if settings.address.contains(':') {
        settings.address.clone()
    } else {
        format!("{}:{}", settings.address, TFTP_PORT)
    };

    format!(
        "# /etc/default/tftpd-hpa\n\
         TFTP_USERNAME=\"tftp\"\n\
         TFTP_DIRECTORY=\"{}\"\n\
         TFTP_ADDRESS=\"{}\"\n\
         TFTP_OPTIONS=\"{}\"\n",
        settings.root.display(),
        address,
        settings.options,
    )
}

/// Recover [`TftpSettings`] from existing daemon config text.
///
/// Each key is matched independently; unmatched keys keep their value from
/// `defaults`. A port suffix on the address is stripped, and a port-only
/// address (e.g. `:69`) normalizes to the wildcard bind address.
pub fn parse(text: &str, defaults: &TftpSettings) -> TftpSettings {
    let mut out = defaults.clone();

    if let Some(caps) = DIRECTORY_RE.captures(text) {
        out.root = caps[1].into();
    } else {
        debug!("no TFTP_DIRECTORY line, keeping default root");
    }

    if let Some(caps) = ADDRESS_RE.captures(text) {
        out.address = strip_port(&caps[1]);
    }

    if let Some(caps) = OPTIONS_RE.captures(text) {
        out.options = caps[1].to_string();
    }

    out
}

fn strip_port(address: &str) -> String {
    match address.split_once(':') {
        Some(("", _)) => WILDCARD_ADDRESS.to_string(),
        Some((host, _)) => host.to_string(),
        None => address.to_string(),
    }
}
