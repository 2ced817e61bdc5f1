//! Identity facts: serial number, model, version, uptime, naming and the
//! interface list.

use std::sync::LazyLock;

use regex::Regex;

use crate::parse::{LineScanner, is_separator_row, parse_duration};

/// Version-string markers across firmware dialects.
///
/// Whichever marker a line carries decides how the value is cut out of it;
/// when both appear in one block, the last line seen wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionMarker {
    /// `System image version: <value>` line.
    SystemImage,
    /// `... Comware Software, Version <value>` banner line.
    ComwareBanner,
}

static COMWARE_BANNER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Comware Software, Version[ \t]+(.+)").unwrap());

/// Detect which version marker, if any, a line carries.
pub fn detect_version_marker(line: &str) -> Option<VersionMarker> {
    if line.contains("System image version") {
        Some(VersionMarker::SystemImage)
    } else if COMWARE_BANNER.is_match(line) {
        Some(VersionMarker::ComwareBanner)
    } else {
        None
    }
}

/// Model, uptime and OS version cut out of a `display version` block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VersionInfo {
    pub model: String,
    pub uptime: Option<u64>,
    pub os_version: String,
}

/// Parse a `display version` block.
pub fn parse_version(output: &str) -> VersionInfo {
    let mut info = VersionInfo::default();

    for line in output.lines() {
        if let Some((model, phrase)) = line.split_once(" uptime is ") {
            info.model = model.trim().to_string();
            info.uptime = Some(parse_duration(phrase));
        }
        match detect_version_marker(line) {
            Some(VersionMarker::SystemImage) => {
                if let Some((_, value)) = line.split_once(':') {
                    info.os_version = value.trim().to_string();
                }
            }
            Some(VersionMarker::ComwareBanner) => {
                if let Some(captures) = COMWARE_BANNER.captures(line) {
                    info.os_version = captures[1].trim().to_string();
                }
            }
            None => {}
        }
    }

    info
}

/// Parse serial numbers out of a `display device manuinfo` block.
///
/// A `DEVICE_SERIAL_NUMBER` line only counts while inside a serial-bearing
/// block, opened by a non-indented `Chassis self` line (chassis hardware)
/// or a non-indented `Slot`+`CPU` line (stack hardware) and closed by any
/// other non-indented line. A stack's serials are joined with one space.
pub fn parse_serial_number(output: &str) -> String {
    let mut serials: Vec<String> = Vec::new();
    let mut in_serial_block = false;

    for line in output.lines() {
        if !line.starts_with(' ') {
            in_serial_block =
                line.contains("Chassis self") || (line.contains("Slot") && line.contains("CPU"));
            continue;
        }
        if in_serial_block && line.trim_start().starts_with("DEVICE_SERIAL_NUMBER") {
            if let Some((_, value)) = line.split_once(':') {
                let value = value.trim();
                if !value.is_empty() {
                    serials.push(value.to_string());
                }
            }
        }
    }

    serials.join(" ")
}

/// Hostname from `sysname` configuration output.
pub fn parse_hostname(output: &str) -> String {
    for line in output.lines() {
        if let Some((_, value)) = line.split_once("sysname") {
            let value = value.trim();
            if !value.is_empty() {
                return value.to_string();
            }
        }
    }
    String::new()
}

/// Domain name from `display domain` output.
pub fn parse_domain(output: &str) -> String {
    for line in output.lines() {
        if !line.contains("Domain") {
            continue;
        }
        if let Some((_, value)) = line.split_once(':') {
            let value = value.trim();
            if !value.is_empty() {
                return value.to_string();
            }
        }
    }
    String::new()
}

/// Fully-qualified domain name.
///
/// The `system` domain is the factory sentinel for "no domain configured",
/// and a domain the scrape could not find gets the same treatment: the
/// hostname stands alone.
pub fn fqdn(hostname: &str, domain: &str) -> String {
    if domain.is_empty() || domain == "system" {
        hostname.to_string()
    } else {
        format!("{hostname}.{domain}")
    }
}

/// Interface names from the `display interface brief` table.
///
/// The `Interface            Link Speed` header starts the table; every
/// non-empty line after it is a candidate row whose first token is the
/// name. Output filtered with `| begin` starts at the header, unfiltered
/// output has preamble the scanner skips.
pub fn parse_interface_list(output: &str) -> Vec<String> {
    let mut scanner = LineScanner::new(
        |line: &str| line.trim_start().starts_with("Interface") && line.contains("Link Speed"),
        |_: &str| false,
    );

    let mut names = Vec::new();
    for line in output.lines() {
        let Some(row) = scanner.feed(line) else {
            continue;
        };
        if is_separator_row(row) {
            continue;
        }
        if let Some(name) = row.split_whitespace().next() {
            names.push(name.to_string());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERSION_COMWARE7: &str = "\
HPE Comware Software, Version 7.1.070, Release 6710P02
Copyright (c) 2010-2020 Hewlett Packard Enterprise Development LP
HPE 5945 48SFP28 8QSFP28 Switch uptime is 0 weeks, 0 days, 3 hours, 18 minutes
Last reboot reason : Cold reboot
Boot image: flash:/5945-cmw710-boot-r6710p02.bin
System image version: 7.1.070, Release 6710P02
";

    #[test]
    fn test_parse_version_uptime_line() {
        let output =
            "S5820X-28S uptime is 0 years, 10 weeks, 2 days, 3 hours, 18 minutes, 42 seconds\n";
        let info = parse_version(output);
        assert_eq!(info.model, "S5820X-28S");
        assert_eq!(
            info.uptime,
            Some(10 * 7 * 86_400 + 2 * 86_400 + 3 * 3600 + 18 * 60 + 42)
        );
    }

    #[test]
    fn test_parse_version_last_marker_wins() {
        // Both markers appear; the System image line comes later.
        let info = parse_version(VERSION_COMWARE7);
        assert_eq!(info.os_version, "7.1.070, Release 6710P02");
        assert_eq!(info.model, "HPE 5945 48SFP28 8QSFP28 Switch");
        assert_eq!(info.uptime, Some(3 * 3600 + 18 * 60));
    }

    #[test]
    fn test_parse_version_banner_only() {
        let output = "HP Comware Platform Software\n\
                      Comware Software, Version 5.20, Release 1211\n\
                      HP A5820X-24XG-SFP+ Switch uptime is 0 weeks, 5 days\n";
        let info = parse_version(output);
        assert_eq!(info.os_version, "5.20, Release 1211");
        assert_eq!(detect_version_marker("nothing here"), None);
    }

    #[test]
    fn test_parse_version_empty() {
        let info = parse_version("");
        assert_eq!(info, VersionInfo::default());
        assert_eq!(info.uptime, None);
    }

    #[test]
    fn test_serial_chassis_dialect() {
        let output = "\
Chassis self
 DEVICE_NAME          : HP 5820X
 DEVICE_SERIAL_NUMBER : 210235A1BKC123000046
 MAC_ADDRESS          : 70F9-6DFC-2F00
Fan 1
 DEVICE_SERIAL_NUMBER : FAN123456
";
        // The fan's serial line sits outside a serial-bearing block.
        assert_eq!(parse_serial_number(output), "210235A1BKC123000046");
    }

    #[test]
    fn test_serial_stack_dialect_joins_members() {
        let output = "\
Slot 1 CPU 0
 DEVICE_SERIAL_NUMBER : 210235A1BKC123000046
Slot 2 CPU 0
 DEVICE_SERIAL_NUMBER : 210235A1BKC123000047
";
        assert_eq!(
            parse_serial_number(output),
            "210235A1BKC123000046 210235A1BKC123000047"
        );
    }

    #[test]
    fn test_serial_absent() {
        assert_eq!(parse_serial_number("Power 1\n STATUS : Normal\n"), "");
        assert_eq!(parse_serial_number(""), "");
    }

    #[test]
    fn test_hostname_and_domain() {
        assert_eq!(parse_hostname(" sysname core-sw01\n"), "core-sw01");
        assert_eq!(parse_hostname("no match here"), "");
        assert_eq!(parse_domain("Domain: lab.example.net\n"), "lab.example.net");
        assert_eq!(parse_domain("nothing"), "");
    }

    #[test]
    fn test_fqdn_sentinel() {
        assert_eq!(fqdn("core-sw01", "system"), "core-sw01");
        assert_eq!(fqdn("core-sw01", ""), "core-sw01");
        assert_eq!(fqdn("core-sw01", "lab.example.net"), "core-sw01.lab.example.net");
    }

    #[test]
    fn test_interface_list() {
        let output = "\
Brief information on interfaces in bridge mode:
Interface            Link Speed   Duplex Type PVID Description
XGE1/0/1             UP   10G(a)  F(a)   A    1    uplink
XGE1/0/2             DOWN auto    A      A    1
BAGG10               UP   20G(a)  F(a)   A    99
";
        assert_eq!(
            parse_interface_list(output),
            ["XGE1/0/1", "XGE1/0/2", "BAGG10"]
        );
    }

    #[test]
    fn test_interface_list_without_header() {
        assert!(parse_interface_list("no table in this output\n").is_empty());
    }
}
