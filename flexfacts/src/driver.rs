//! Device facts driver - the public facade over the extractors.
//!
//! The driver owns a [`CommandChannel`], decides which raw-text requests a
//! fact needs, and hands the responses to the extractors. For a composite
//! fact every request is issued before any parsing begins; the one
//! exception is the CPU/memory narrow-query retry, issued only when the
//! wide query comes back as a parameter error.

use indexmap::IndexMap;
use log::debug;

use crate::channel::CommandChannel;
use crate::error::{Error, Operation, Result};
use crate::extract::config::ConfigScope;
use crate::extract::environment::{self, UsageDialect};
use crate::extract::{identity, interfaces, lldp};
use crate::facts::{
    ArpEntry, ConfigSnapshot, DeviceFacts, Environment, Interface, InterfaceCounters,
    LldpNeighborDetail, LldpNeighbors, MacTableEntry, VENDOR,
};

const CMD_MANUINFO: &str = "display device manuinfo";
const CMD_VERSION: &str = "display version";
const CMD_SYSNAME: &str = "display current-configuration | include sysname";
const CMD_DOMAIN: &str = "display domain | include Domain";
const CMD_INTERFACE_BRIEF: &str =
    "display interface brief | begin \"Interface            Link Speed\"";
const CMD_INTERFACE: &str = "display interface";
const CMD_LLDP_NEIGHBORS: [&str; 2] = [
    "display lldp neighbor-information list",
    "display lldp neighbor-information",
];
const CMD_FAN: &str = "display fan";
const CMD_ENVIRONMENT: &str = "display environment";
const CMD_CPU_WIDE: &str = "display cpu-usage summary";
const CMD_CPU_NARROW: &str = "display cpu-usage";
const CMD_MEMORY_WIDE: &str = "display memory summary";
const CMD_MEMORY_NARROW: &str = "display memory";
const CMD_RUNNING_CONFIG: &str = "display current-configuration";
const CMD_STARTUP_CONFIG: &str = "display saved-configuration";

/// Facts driver for HPE FlexFabric / Comware devices.
///
/// Generic over the [`CommandChannel`] capability, so the same driver runs
/// against a live session or against captured output in tests. Every call
/// returns a freshly built value object; nothing is cached between calls,
/// including dialect decisions.
pub struct FlexFabricDriver<C> {
    channel: C,
}

impl<C: CommandChannel> FlexFabricDriver<C> {
    /// Create a driver over a command channel.
    pub fn new(channel: C) -> Self {
        Self { channel }
    }

    /// Access the underlying channel.
    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    /// Consume the driver, returning the channel.
    pub fn into_channel(self) -> C {
        self.channel
    }

    /// Identity facts: vendor, model, serial, version, naming, uptime and
    /// the interface list.
    pub fn get_facts(&mut self) -> Result<DeviceFacts> {
        let manuinfo = self.channel.send(CMD_MANUINFO)?;
        let version_out = self.channel.send(CMD_VERSION)?;
        let sysname_out = self.channel.send(CMD_SYSNAME)?;
        let domain_out = self.channel.send(CMD_DOMAIN)?;
        let brief_out = self.channel.send(CMD_INTERFACE_BRIEF)?;

        let version = identity::parse_version(&version_out);
        let hostname = identity::parse_hostname(&sysname_out);
        let domain = identity::parse_domain(&domain_out);
        let fqdn = identity::fqdn(&hostname, &domain);

        Ok(DeviceFacts {
            vendor: VENDOR.to_string(),
            model: version.model,
            serial_number: identity::parse_serial_number(&manuinfo),
            os_version: version.os_version,
            hostname,
            fqdn,
            uptime: version.uptime,
            interface_list: identity::parse_interface_list(&brief_out),
        })
    }

    /// Interface table keyed by canonical name.
    pub fn get_interfaces(&mut self) -> Result<IndexMap<String, Interface>> {
        let output = self.channel.send(CMD_INTERFACE)?;
        Ok(interfaces::parse_interfaces(&output))
    }

    /// LLDP neighbors keyed by canonical local interface.
    pub fn get_lldp_neighbors(&mut self) -> Result<LldpNeighbors> {
        let output = self.channel.send_any(&CMD_LLDP_NEIGHBORS)?;
        Ok(lldp::parse_lldp_neighbors(&output))
    }

    /// Environmental report: fans, sensors, power, CPU load and memory.
    pub fn get_environment(&mut self) -> Result<Environment> {
        let fan_out = self.channel.send(CMD_FAN)?;
        let sensor_out = self.channel.send(CMD_ENVIRONMENT)?;
        let cpu_out = self.channel.send(CMD_CPU_WIDE)?;
        let memory_out = self.channel.send(CMD_MEMORY_WIDE)?;

        let cpu = if environment::is_parameter_error(&cpu_out) {
            debug!("wide CPU query rejected, retrying with '{CMD_CPU_NARROW}'");
            let narrow = self.channel.send(CMD_CPU_NARROW)?;
            environment::parse_cpu(&narrow, UsageDialect::SingleUnit)
        } else {
            environment::parse_cpu(&cpu_out, UsageDialect::MultiUnit)
        };

        let memory = if environment::is_parameter_error(&memory_out) {
            debug!("wide memory query rejected, retrying with '{CMD_MEMORY_NARROW}'");
            let narrow = self.channel.send(CMD_MEMORY_NARROW)?;
            environment::parse_memory(&narrow, UsageDialect::SingleUnit)
        } else {
            environment::parse_memory(&memory_out, UsageDialect::MultiUnit)
        };

        Ok(Environment {
            fans: environment::parse_fans(&fan_out),
            temperature: environment::parse_temperature(&sensor_out),
            power: environment::power_placeholder(),
            cpu,
            memory,
        })
    }

    /// Configuration text for the requested scope.
    ///
    /// Only the selected stores are read from the device; the others stay
    /// empty, as does `candidate` always.
    pub fn get_config(&mut self, scope: ConfigScope) -> Result<ConfigSnapshot> {
        let mut snapshot = ConfigSnapshot::default();
        if matches!(scope, ConfigScope::All | ConfigScope::Running) {
            snapshot.running = self.channel.send(CMD_RUNNING_CONFIG)?;
        }
        if matches!(scope, ConfigScope::All | ConfigScope::Startup) {
            snapshot.startup = self.channel.send(CMD_STARTUP_CONFIG)?;
        }
        Ok(snapshot)
    }

    /// Run an ordered list of commands, keyed by command.
    pub fn cli(&mut self, commands: &[&str]) -> Result<IndexMap<String, String>> {
        let mut outputs = IndexMap::new();
        for command in commands {
            outputs.insert(command.to_string(), self.channel.send(command)?);
        }
        Ok(outputs)
    }

    /// Not implemented for this family.
    pub fn get_lldp_neighbors_detail(
        &mut self,
        _interface: Option<&str>,
    ) -> Result<IndexMap<String, Vec<LldpNeighborDetail>>> {
        Err(Error::Unsupported(Operation::LldpNeighborsDetail))
    }

    /// Not implemented for this family.
    pub fn get_ntp_servers(&mut self) -> Result<Vec<String>> {
        Err(Error::Unsupported(Operation::NtpServers))
    }

    /// Not implemented for this family.
    pub fn get_arp_table(&mut self, _vrf: Option<&str>) -> Result<Vec<ArpEntry>> {
        Err(Error::Unsupported(Operation::ArpTable))
    }

    /// Not implemented for this family.
    pub fn get_mac_address_table(&mut self) -> Result<Vec<MacTableEntry>> {
        Err(Error::Unsupported(Operation::MacAddressTable))
    }

    /// Not implemented for this family.
    pub fn get_interfaces_counters(&mut self) -> Result<IndexMap<String, InterfaceCounters>> {
        Err(Error::Unsupported(Operation::InterfacesCounters))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::ReplayChannel;

    fn driver_with(channel: ReplayChannel) -> FlexFabricDriver<ReplayChannel> {
        FlexFabricDriver::new(channel)
    }

    const DISPLAY_VERSION: &str = "\
HP Comware Platform Software
Comware Software, Version 5.20, Release 1211P06
S5820X-28S uptime is 0 years, 10 weeks, 2 days, 3 hours, 18 minutes, 42 seconds
";

    const DISPLAY_MANUINFO: &str = "\
Chassis self
 DEVICE_NAME          : S5820X-28S
 DEVICE_SERIAL_NUMBER : 210235A1BKC123000046
";

    const DISPLAY_BRIEF: &str = "\
Interface            Link Speed   Duplex Type PVID Description
XGE1/0/1             UP   10G(a)  F(a)   A    1
XGE1/0/2             ADM  auto    A      A    1
";

    #[test]
    fn test_get_facts_end_to_end() {
        let channel = ReplayChannel::new()
            .with_output(CMD_VERSION, DISPLAY_VERSION)
            .with_output(CMD_MANUINFO, DISPLAY_MANUINFO)
            .with_output(CMD_SYSNAME, " sysname lab-5820\n")
            .with_output(CMD_DOMAIN, " Domain: lab.example.net\n")
            .with_output(CMD_INTERFACE_BRIEF, DISPLAY_BRIEF);
        let mut driver = driver_with(channel);

        let facts = driver.get_facts().unwrap();
        assert_eq!(facts.vendor, "HP");
        assert_eq!(facts.model, "S5820X-28S");
        assert_eq!(facts.serial_number, "210235A1BKC123000046");
        assert_eq!(facts.os_version, "5.20, Release 1211P06");
        assert_eq!(facts.hostname, "lab-5820");
        assert_eq!(facts.fqdn, "lab-5820.lab.example.net");
        assert_eq!(
            facts.uptime,
            Some(10 * 7 * 86_400 + 2 * 86_400 + 3 * 3600 + 18 * 60 + 42)
        );
        assert_eq!(facts.interface_list, ["XGE1/0/1", "XGE1/0/2"]);
    }

    #[test]
    fn test_get_facts_requests_before_parsing() {
        let mut driver = driver_with(ReplayChannel::new());
        driver.get_facts().unwrap();
        assert_eq!(
            driver.channel_mut().sent(),
            [
                CMD_MANUINFO,
                CMD_VERSION,
                CMD_SYSNAME,
                CMD_DOMAIN,
                CMD_INTERFACE_BRIEF
            ]
        );
    }

    #[test]
    fn test_get_facts_degrades_to_defaults() {
        // Nothing canned: every command is rejected, every optional field
        // surfaces as its default instead of an error.
        let mut driver = driver_with(ReplayChannel::new());
        let facts = driver.get_facts().unwrap();
        assert_eq!(facts.vendor, "HP");
        assert_eq!(facts.uptime, None);
        assert!(facts.serial_number.is_empty());
        assert!(facts.hostname.is_empty());
        assert!(facts.fqdn.is_empty());
        assert!(facts.interface_list.is_empty());
    }

    #[test]
    fn test_get_lldp_neighbors_tries_candidates() {
        let channel = ReplayChannel::new().with_output(
            CMD_LLDP_NEIGHBORS[1],
            "Local Interface      Chassis ID      Port ID   System Name\n\
             XGE1/0/1             70f9-6dfc-1100  XGE2/0/1  core-sw01\n",
        );
        let mut driver = driver_with(channel);

        let neighbors = driver.get_lldp_neighbors().unwrap();
        assert_eq!(neighbors["XGE1/0/1"][0].hostname, "core-sw01");
        assert_eq!(driver.channel_mut().sent(), CMD_LLDP_NEIGHBORS);
    }

    #[test]
    fn test_get_environment_wide_queries() {
        let channel = ReplayChannel::new()
            .with_output(
                CMD_FAN,
                "FanID  Status\n------------------\n1      Normal\n2      Abnormal\n",
            )
            .with_output(
                CMD_CPU_WIDE,
                "Slot CPU   Last 5 sec  Last 1 min  Last 5 min\n1    0     5%          4%          4%\n",
            )
            .with_output(
                CMD_MEMORY_WIDE,
                "Slot  Total  Used  Free  FreeRatio\n1     1731   515   1216  70.2%\n",
            );
        let mut driver = driver_with(channel);

        let env = driver.get_environment().unwrap();
        assert!(env.fans["1_1"].status);
        assert!(!env.fans["1_2"].status);
        assert_eq!(env.cpu[&0], 5.0);
        assert_eq!(env.memory.used_ram, 515 * 1024);
        assert_eq!(env.memory.available_ram, 1731 * 1024);
        assert_eq!(env.power["1"].output, -1.0);
        // No parameter error, so no narrow retries were issued.
        assert_eq!(
            driver.channel_mut().sent(),
            [CMD_FAN, CMD_ENVIRONMENT, CMD_CPU_WIDE, CMD_MEMORY_WIDE]
        );
    }

    #[test]
    fn test_get_environment_narrow_retry() {
        let channel = ReplayChannel::new()
            .with_output(CMD_CPU_WIDE, " % Wrong parameter found at '^' position.\n")
            .with_output(
                CMD_CPU_NARROW,
                "Slot 1 CPU 0 CPU usage:\n       7% in last 5 seconds\n",
            )
            .with_output(CMD_MEMORY_WIDE, " % Too many parameters found at '^' position.\n")
            .with_output(
                CMD_MEMORY_NARROW,
                "Mem:       1771524    527296   1244228\n",
            );
        let mut driver = driver_with(channel);

        let env = driver.get_environment().unwrap();
        assert_eq!(env.cpu[&0], 7.0);
        assert_eq!(env.memory.used_ram, 527_296);
        assert_eq!(
            driver.channel_mut().sent(),
            [
                CMD_FAN,
                CMD_ENVIRONMENT,
                CMD_CPU_WIDE,
                CMD_MEMORY_WIDE,
                CMD_CPU_NARROW,
                CMD_MEMORY_NARROW
            ]
        );
    }

    #[test]
    fn test_get_config_scopes() {
        let channel = ReplayChannel::new()
            .with_output(CMD_RUNNING_CONFIG, "running text")
            .with_output(CMD_STARTUP_CONFIG, "startup text");
        let mut driver = driver_with(channel);

        let all = driver.get_config(ConfigScope::All).unwrap();
        assert_eq!(all.running, "running text");
        assert_eq!(all.startup, "startup text");
        assert_eq!(all.candidate, "");

        let running = driver.get_config(ConfigScope::Running).unwrap();
        assert_eq!(running.running, "running text");
        assert_eq!(running.startup, "");

        let startup = driver.get_config(ConfigScope::Startup).unwrap();
        assert_eq!(startup.running, "");
        assert_eq!(startup.startup, "startup text");
    }

    #[test]
    fn test_cli_keys_outputs_by_command() {
        let channel = ReplayChannel::new()
            .with_output("display clock", "10:32:05 UTC")
            .with_output("display users", "line aux0");
        let mut driver = driver_with(channel);

        let outputs = driver.cli(&["display clock", "display users"]).unwrap();
        assert_eq!(outputs["display clock"], "10:32:05 UTC");
        assert_eq!(outputs["display users"], "line aux0");
    }

    #[test]
    fn test_unsupported_operations_are_explicit() {
        let mut driver = driver_with(ReplayChannel::new());

        assert!(matches!(
            driver.get_lldp_neighbors_detail(None),
            Err(Error::Unsupported(Operation::LldpNeighborsDetail))
        ));
        assert!(matches!(
            driver.get_ntp_servers(),
            Err(Error::Unsupported(Operation::NtpServers))
        ));
        assert!(matches!(
            driver.get_arp_table(None),
            Err(Error::Unsupported(Operation::ArpTable))
        ));
        assert!(matches!(
            driver.get_mac_address_table(),
            Err(Error::Unsupported(Operation::MacAddressTable))
        ));
        assert!(matches!(
            driver.get_interfaces_counters(),
            Err(Error::Unsupported(Operation::InterfacesCounters))
        ));
        // Nothing was sent to the device for any of them.
        assert!(driver.channel_mut().sent().is_empty());
    }
}
