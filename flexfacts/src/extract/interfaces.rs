//! Interface table extraction from `display interface` output.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::facts::Interface;
use crate::parse::{canonical_mac, canonicalize, parse_duration};

static HARDWARE_ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)hardware address(?: is)?:?[ \t]+([0-9A-Fa-f.:-]+)").unwrap());

/// Map an operational-state string to `(is_enabled, is_up)`.
///
/// `Administratively DOWN` (and the brief table's `ADM`) means the port was
/// shut down on purpose: disabled and down. Any other non-`UP` state is an
/// enabled port that is not passing traffic.
pub fn state_flags(state: &str) -> (bool, bool) {
    let state = state.trim();
    if state.eq_ignore_ascii_case("up") {
        (true, true)
    } else if state == "ADM" || state.to_ascii_lowercase().contains("administratively") {
        (false, false)
    } else {
        (true, false)
    }
}

/// A non-indented single-token line opens a new interface block; everything
/// until the next one describes that interface.
fn is_block_header(line: &str) -> bool {
    !line.is_empty()
        && !line.starts_with(char::is_whitespace)
        && !line.contains(':')
        && line.split_whitespace().count() == 1
}

/// Parse `display interface` output into interfaces keyed by canonical
/// name.
///
/// Attribute lines the block does not carry leave the field at its
/// default: zero speed, empty MAC and description, unknown flap age.
pub fn parse_interfaces(output: &str) -> IndexMap<String, Interface> {
    let mut interfaces: IndexMap<String, Interface> = IndexMap::new();
    let mut current: Option<String> = None;

    for line in output.lines() {
        if is_block_header(line) {
            let name = canonicalize(line.trim());
            interfaces.entry(name.clone()).or_default();
            current = Some(name);
            continue;
        }

        let Some(interface) = current.as_ref().and_then(|name| interfaces.get_mut(name)) else {
            continue;
        };
        let trimmed = line.trim();

        if let Some(state) = trimmed.strip_prefix("Current state:") {
            (interface.is_enabled, interface.is_up) = state_flags(state);
        } else if let Some(value) = trimmed.strip_prefix("Description:") {
            interface.description = value.trim().to_string();
        } else if let Some(value) = trimmed.strip_prefix("Bandwidth:") {
            // "Bandwidth: 1000000 kbps" -> 1000 Mbps -> 1.0 Gbps
            if let Some(kbps) = value
                .split_whitespace()
                .next()
                .and_then(|token| token.parse::<u64>().ok())
            {
                let mbps = kbps / 1000;
                interface.speed = mbps as f64 / 1000.0;
            }
        } else if let Some(value) = trimmed.strip_prefix("Last link flapping:") {
            let value = value.trim();
            interface.last_flapped = if value.eq_ignore_ascii_case("never") {
                None
            } else {
                Some(parse_duration(value))
            };
        } else if let Some(captures) = HARDWARE_ADDRESS.captures(trimmed) {
            if let Some(mac) = canonical_mac(&captures[1]) {
                interface.mac_address = mac;
            }
        }
    }

    interfaces
}

#[cfg(test)]
mod tests {
    use super::*;

    const DISPLAY_INTERFACE: &str = "\
Ten-GigabitEthernet1/0/1
 Current state: UP
 Line protocol state: UP
 Description: uplink to core
 Bandwidth: 10000000 kbps
 Maximum transmission unit: 1500
 IP packet frame type: Ethernet II, hardware address: 70f9-6dfc-2f01
 Last link flapping: 2 days, 3 hours, 5 minutes
Ten-GigabitEthernet1/0/2
 Current state: Administratively DOWN
 Line protocol state: DOWN
 Bandwidth: 10000000 kbps
 IP packet frame type: Ethernet II, hardware address: 70f9-6dfc-2f02
 Last link flapping: Never
Vlan-interface99
 Current state: DOWN
 Line protocol state: DOWN
 Description: mgmt
 Bandwidth: 1000000 kbps
";

    #[test]
    fn test_parse_interfaces_names_are_canonical() {
        let interfaces = parse_interfaces(DISPLAY_INTERFACE);
        let names: Vec<&String> = interfaces.keys().collect();
        assert_eq!(names, ["XGE1/0/1", "XGE1/0/2", "Vlan-int99"]);
    }

    #[test]
    fn test_parse_interfaces_fields() {
        let interfaces = parse_interfaces(DISPLAY_INTERFACE);

        let up = &interfaces["XGE1/0/1"];
        assert!(up.is_enabled && up.is_up);
        assert_eq!(up.speed, 10.0);
        assert_eq!(up.mac_address, "70:f9:6d:fc:2f:01");
        assert_eq!(up.description, "uplink to core");
        assert_eq!(up.last_flapped, Some(2 * 86_400 + 3 * 3600 + 5 * 60));

        let shut = &interfaces["XGE1/0/2"];
        assert!(!shut.is_enabled && !shut.is_up);
        assert_eq!(shut.last_flapped, None);

        let down = &interfaces["Vlan-int99"];
        assert!(down.is_enabled && !down.is_up);
        assert_eq!(down.speed, 1.0);
        assert!(down.mac_address.is_empty());
    }

    #[test]
    fn test_state_flags_invariant() {
        assert_eq!(state_flags("UP"), (true, true));
        assert_eq!(state_flags("ADM"), (false, false));
        assert_eq!(state_flags("Administratively DOWN"), (false, false));
        assert_eq!(state_flags("DOWN"), (true, false));
        assert_eq!(state_flags("Stby"), (true, false));
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let output = "\
Ten-GigabitEthernet1/0/1
 Current state: UP
 Bandwidth: not-a-number kbps
 IP packet frame type: Ethernet II, hardware address: garbage
";
        let interfaces = parse_interfaces(output);
        let iface = &interfaces["XGE1/0/1"];
        assert_eq!(iface.speed, 0.0);
        assert!(iface.mac_address.is_empty());
    }

    #[test]
    fn test_idempotent_on_same_text() {
        assert_eq!(
            parse_interfaces(DISPLAY_INTERFACE),
            parse_interfaces(DISPLAY_INTERFACE)
        );
    }
}
