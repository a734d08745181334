//! dhcpd.conf rendering and best-effort recovery
//!
//! `render` produces the full isc-dhcp-server configuration from a
//! [`NetworkSettings`] record. `parse` goes the other way: it pattern-matches
//! each field independently out of an existing (possibly hand-edited) config
//! and keeps the supplied default for anything it cannot recognize, so a
//! round trip never corrupts settings it did not understand.

use emberfly_common::NetworkSettings;
use once_cell::sync::Lazy;
use regex::Regex;
use std::net::Ipv4Addr;
use tracing::debug;

/// Domain name handed to DHCP clients
pub const DOMAIN_NAME: &str = "emberfly.local";

/// Path of the boot menu entry script under the HTTP root
pub const MENU_SCRIPT_PATH: &str = "netboot/boot.ipxe";

/// UEFI x64 boot loader filename served over TFTP
pub const UEFI_BOOT_FILE: &str = "ipxe.efi";

/// Legacy BIOS boot loader filename served over TFTP
pub const BIOS_BOOT_FILE: &str = "undionly.kpxe";

static SUBNET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"subnet\s+([\d.]+)\s+netmask\s+([\d.]+)").unwrap());
static RANGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"range\s+([\d.]+)\s+([\d.]+)").unwrap());
static ROUTERS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"option routers\s+([\d.]+)").unwrap());
static DNS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"option domain-name-servers\s+([^;]+)").unwrap());
static NEXT_SERVER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"next-server\s+([\d.]+)").unwrap());

/// Render the full dhcpd.conf text.
///
/// The caller validates the record first (`NetworkSettings::validate`);
/// rendering itself never fails.
pub fn render(settings: &NetworkSettings) -> String {
    let dns = settings
        .dns_servers
        .iter()
        .map(Ipv4Addr::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"# Emberfly NetBoot DHCP Configuration
authoritative;
default-lease-time 600;
max-lease-time 7200;
ddns-update-style none;

# Define PXE options
option space PXE;
option PXE.mtftp-ip code 1 = ip-address;

subnet {subnet} netmask {netmask} {{
    range {range_start} {range_end};
    option routers {gateway};
    option domain-name-servers {dns};
    option domain-name "{domain}";
    option broadcast-address {broadcast};

    next-server {next_server};

    # iPXE already loaded - chain to HTTP menu
    if exists user-class and option user-class = "iPXE" {{
        filename "http://{next_server}/{menu_path}";
    }}
    # UEFI x64 (Client System Architecture Type 7 or 9)
    elsif substring(option vendor-class-identifier, 0, 20) = "PXEClient:Arch:00007" or
         substring(option vendor-class-identifier, 0, 20) = "PXEClient:Arch:00009" {{
        filename "{uefi_file}";
    }}
    # BIOS/Legacy
    else {{
        filename "{bios_file}";
    }}
}}
"#,
        subnet = settings.subnet,
        netmask = settings.netmask,
        range_start = settings.range_start,
        range_end = settings.range_end,
        gateway = settings.gateway,
        dns = dns,
        domain = DOMAIN_NAME,
        broadcast = settings.broadcast(),
        next_server = settings.next_server,
        menu_path = MENU_SCRIPT_PATH,
        uefi_file = UEFI_BOOT_FILE,
        bios_file = BIOS_BOOT_FILE,
    )
}

/// Recover a [`NetworkSettings`] record from existing dhcpd.conf text.
///
/// Each field is matched independently; whatever fails to match or parse
/// keeps its value from `defaults`. This never fails as a whole.
pub fn parse(text: &str, defaults: &NetworkSettings) -> NetworkSettings {
    let mut out = defaults.clone();

    if let Some(caps) = SUBNET_RE.captures(text) {
        apply_addr(&mut out.subnet, &caps[1], "subnet");
        apply_addr(&mut out.netmask, &caps[2], "netmask");
    }

    if let Some(caps) = RANGE_RE.captures(text) {
        apply_addr(&mut out.range_start, &caps[1], "range start");
        apply_addr(&mut out.range_end, &caps[2], "range end");
    }

    if let Some(caps) = ROUTERS_RE.captures(text) {
        apply_addr(&mut out.gateway, &caps[1], "routers");
    }

    if let Some(caps) = DNS_RE.captures(text) {
        let servers: Vec<Ipv4Addr> = caps[1]
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        if servers.is_empty() {
            debug!(value = &caps[1], "no parseable DNS servers, keeping defaults");
        } else {
            out.dns_servers = servers;
        }
    }

    if let Some(caps) = NEXT_SERVER_RE.captures(text) {
        apply_addr(&mut out.next_server, &caps[1], "next-server");
    }

    out
}

/// Overwrite `field` with the matched value when it parses, otherwise keep it.
fn apply_addr(field: &mut Ipv4Addr, value: &str, name: &str) {
    match value.parse() {
        Ok(addr) => *field = addr,
        Err(_) => debug!(field = name, value, "unparseable address, keeping default"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> NetworkSettings {
        NetworkSettings {
            subnet: Ipv4Addr::new(10, 0, 0, 0),
            netmask: Ipv4Addr::new(255, 255, 255, 0),
            range_start: Ipv4Addr::new(10, 0, 0, 100),
            range_end: Ipv4Addr::new(10, 0, 0, 200),
            gateway: Ipv4Addr::new(10, 0, 0, 1),
            dns_servers: vec![Ipv4Addr::new(10, 0, 0, 1), Ipv4Addr::new(1, 1, 1, 1)],
            next_server: Ipv4Addr::new(10, 0, 0, 20),
        }
    }

    #[test]
    fn test_render_subnet_block() {
        let conf = render(&settings());

        assert!(conf.contains("authoritative;"));
        assert!(conf.contains("ddns-update-style none;"));
        assert!(conf.contains("subnet 10.0.0.0 netmask 255.255.255.0 {"));
        assert!(conf.contains("range 10.0.0.100 10.0.0.200;"));
        assert!(conf.contains("option routers 10.0.0.1;"));
        assert!(conf.contains("option domain-name-servers 10.0.0.1, 1.1.1.1;"));
        assert!(conf.contains("option broadcast-address 10.0.0.255;"));
        assert!(conf.contains("next-server 10.0.0.20;"));
    }

    #[test]
    fn test_render_three_way_filename_conditional() {
        let conf = render(&settings());

        // iPXE-aware clients chain to the HTTP menu
        assert!(conf.contains(r#"option user-class = "iPXE""#));
        assert!(conf.contains(r#"filename "http://10.0.0.20/netboot/boot.ipxe";"#));
        // UEFI x64 architecture codes
        assert!(conf.contains("PXEClient:Arch:00007"));
        assert!(conf.contains("PXEClient:Arch:00009"));
        assert!(conf.contains(r#"filename "ipxe.efi";"#));
        // Legacy fallback
        assert!(conf.contains(r#"filename "undionly.kpxe";"#));
    }

    #[test]
    fn test_roundtrip() {
        let original = settings();
        let recovered = parse(&render(&original), &NetworkSettings::default());
        assert_eq!(recovered, original);
    }

    #[test]
    fn test_parse_partial_config_keeps_defaults() {
        // Range line missing: those two fields keep their defaults
        let text = "subnet 172.16.0.0 netmask 255.255.0.0 {\n    option routers 172.16.0.1;\n}\n";
        let defaults = NetworkSettings::default();
        let recovered = parse(text, &defaults);

        assert_eq!(recovered.subnet, Ipv4Addr::new(172, 16, 0, 0));
        assert_eq!(recovered.netmask, Ipv4Addr::new(255, 255, 0, 0));
        assert_eq!(recovered.gateway, Ipv4Addr::new(172, 16, 0, 1));
        assert_eq!(recovered.range_start, defaults.range_start);
        assert_eq!(recovered.range_end, defaults.range_end);
        assert_eq!(recovered.dns_servers, defaults.dns_servers);
        assert_eq!(recovered.next_server, defaults.next_server);
    }

    #[test]
    fn test_parse_missing_dns_line_keeps_default_dns() {
        let mut conf = render(&settings());
        conf = conf
            .lines()
            .filter(|l| !l.contains("domain-name-servers"))
            .collect::<Vec<_>>()
            .join("\n");

        let defaults = NetworkSettings::default();
        let recovered = parse(&conf, &defaults);
        assert_eq!(recovered.dns_servers, defaults.dns_servers);
        assert_eq!(recovered.subnet, Ipv4Addr::new(10, 0, 0, 0));
    }

    #[test]
    fn test_parse_garbage_returns_defaults() {
        let defaults = NetworkSettings::default();
        assert_eq!(parse("not a dhcp config at all", &defaults), defaults);
    }

    #[test]
    fn test_parse_unparseable_octets_keep_defaults() {
        // [\d.]+ matches, but the dotted quad is invalid
        let text = "subnet 999.999.999.999 netmask 255.255.255.0 {";
        let defaults = NetworkSettings::default();
        let recovered = parse(text, &defaults);
        assert_eq!(recovered.subnet, defaults.subnet);
        assert_eq!(recovered.netmask, Ipv4Addr::new(255, 255, 255, 0));
    }

    #[test]
    fn test_parse_dns_list_with_whitespace() {
        let text = "option domain-name-servers 8.8.8.8 , 9.9.9.9;";
        let recovered = parse(text, &NetworkSettings::default());
        assert_eq!(
            recovered.dns_servers,
            vec![Ipv4Addr::new(8, 8, 8, 8), Ipv4Addr::new(9, 9, 9, 9)]
        );
    }
}
