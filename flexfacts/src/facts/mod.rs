//! Structured device facts.
//!
//! Value objects produced by the extractors. Every facade call allocates a
//! fresh object; nothing here is cached or shared. Maps are insertion
//! ordered - the order rows appeared in the device output is part of the
//! result.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Vendor string reported for every device in this family.
pub const VENDOR: &str = "HP";

/// Identity facts for a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceFacts {
    /// Always [`VENDOR`].
    pub vendor: String,

    /// Device model, e.g. `S5820X-28S`.
    pub model: String,

    /// Serial number; space-joined when a stack reports several.
    pub serial_number: String,

    /// OS/firmware version string.
    pub os_version: String,

    /// Configured system name.
    pub hostname: String,

    /// `hostname.domain`, or just the hostname when the domain is the
    /// `system` sentinel.
    pub fqdn: String,

    /// Uptime in seconds; `None` until a version block carried it.
    pub uptime: Option<u64>,

    /// Interface names in report order.
    pub interface_list: Vec<String>,
}

impl Default for DeviceFacts {
    fn default() -> Self {
        Self {
            vendor: VENDOR.to_string(),
            model: String::new(),
            serial_number: String::new(),
            os_version: String::new(),
            hostname: String::new(),
            fqdn: String::new(),
            uptime: None,
            interface_list: Vec::new(),
        }
    }
}

/// State and attributes of one interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Interface {
    /// Administratively enabled.
    pub is_enabled: bool,

    /// Operationally up.
    pub is_up: bool,

    /// Speed in Gbps, derived from the reported Mbps value.
    pub speed: f64,

    /// Seconds since the link last changed; `None` when the device reports
    /// it never has.
    pub last_flapped: Option<u64>,

    /// Canonical colon-separated lowercase MAC, empty when not reported.
    pub mac_address: String,

    /// Free-text description.
    pub description: String,
}

/// One LLDP neighbor seen on a local port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LldpNeighbor {
    /// Remote system name.
    pub hostname: String,

    /// Remote port identifier.
    pub port: String,
}

/// Neighbors keyed by canonical local interface name.
///
/// A port may carry more than one neighbor; order follows the device table.
pub type LldpNeighbors = IndexMap<String, Vec<LldpNeighbor>>;

/// Health of one fan, keyed `{unit}_{fan_id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FanStatus {
    /// `true` when the fan reports `Normal`.
    pub status: bool,
}

/// One temperature sensor reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureSensor {
    /// Current reading in degrees Celsius.
    pub temperature: f64,

    /// Reading exceeds the warning threshold.
    pub is_alert: bool,

    /// Reading exceeds the alarm threshold.
    pub is_critical: bool,
}

/// One power supply entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerSupply {
    pub status: bool,
    pub capacity: f64,
    pub output: f64,
}

/// Memory usage summed across all reporting units, in kilobytes as
/// reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MemoryUsage {
    pub used_ram: u64,
    pub available_ram: u64,
}

/// Environmental report: fans, sensors, power, CPU load and memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Environment {
    pub fans: IndexMap<String, FanStatus>,
    pub temperature: IndexMap<String, TemperatureSensor>,
    pub power: IndexMap<String, PowerSupply>,

    /// Percent utilization per sample, keyed by report order.
    pub cpu: IndexMap<usize, f64>,

    pub memory: MemoryUsage,
}

/// Device configuration text.
///
/// `candidate` is always empty - this family has no candidate-config
/// concept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ConfigSnapshot {
    pub running: String,
    pub startup: String,
    pub candidate: String,
}

/// Detail record for one LLDP neighbor (no extractor yet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LldpNeighborDetail {
    pub remote_system_name: String,
    pub remote_port: String,
    pub remote_port_description: String,
    pub remote_chassis_id: String,
    pub remote_system_description: String,
}

/// One ARP table entry (no extractor yet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ArpEntry {
    pub interface: String,
    pub mac: String,
    pub ip: String,
    pub age: f64,
}

/// One MAC address table entry (no extractor yet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MacTableEntry {
    pub mac: String,
    pub interface: String,
    pub vlan: u16,
    pub static_entry: bool,
}

/// Traffic counters for one interface (no extractor yet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InterfaceCounters {
    pub rx_octets: u64,
    pub tx_octets: u64,
    pub rx_unicast_packets: u64,
    pub tx_unicast_packets: u64,
    pub rx_errors: u64,
    pub tx_errors: u64,
    pub rx_discards: u64,
    pub tx_discards: u64,
}
