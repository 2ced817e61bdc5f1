//! Environmental facts: fans, temperature sensors, CPU load, memory and
//! the power placeholder.

use std::sync::LazyLock;

use indexmap::IndexMap;
use log::{debug, warn};
use regex::Regex;

use crate::facts::{FanStatus, MemoryUsage, PowerSupply, TemperatureSensor};
use crate::parse::{LineScanner, is_separator_row};

/// Device-side rejection markers for a query whose parameters this
/// firmware does not take. Seeing one means the narrow query must be
/// issued instead.
const PARAMETER_ERROR_MARKERS: [&str; 2] = ["Wrong parameter found", "Too many parameters found"];

/// Whether output is a parameter-error response rather than data.
pub fn is_parameter_error(output: &str) -> bool {
    PARAMETER_ERROR_MARKERS
        .iter()
        .any(|marker| output.contains(marker))
}

/// Fan status layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanDialect {
    /// Tabular: an all-dashes separator opens each unit's table, blank or
    /// `Fan-tray` lines close it.
    Table,
    /// Vertical per-slot `Slot` / `FAN` / `State` key-value layout.
    PerSlot,
}

/// Parse `display fan` output, falling back across dialects.
///
/// Keys are `{unit}_{fan_id}`; a fan is healthy when it reports `Normal`.
/// The per-slot layout is consulted only when the table layout yields
/// nothing.
pub fn parse_fans(output: &str) -> IndexMap<String, FanStatus> {
    let fans = parse_fan_status(output, FanDialect::Table);
    if !fans.is_empty() {
        return fans;
    }
    debug!("no rows in the fan status table, trying the per-slot layout");
    parse_fan_status(output, FanDialect::PerSlot)
}

/// Parse one fan-status layout.
pub fn parse_fan_status(output: &str, dialect: FanDialect) -> IndexMap<String, FanStatus> {
    match dialect {
        FanDialect::Table => parse_fan_table(output),
        FanDialect::PerSlot => parse_fan_slots(output),
    }
}

/// Each separator row starts the next unit's table, so the unit index is
/// the count of tables seen so far.
fn parse_fan_table(output: &str) -> IndexMap<String, FanStatus> {
    let mut fans = IndexMap::new();
    let mut unit = 0usize;
    let mut scanner = LineScanner::new(is_separator_row, |line: &str| {
        line.trim().is_empty() || line.contains("Fan-tray")
    });

    for line in output.lines() {
        let was_active = scanner.is_active();
        let row = scanner.feed(line);
        if scanner.is_active() && !was_active {
            unit += 1;
        }
        let Some(row) = row else {
            continue;
        };

        let mut columns = row.split_whitespace();
        let Some(fan_id) = columns.next().and_then(|id| id.parse::<u64>().ok()) else {
            continue;
        };
        let Some(status) = columns.next() else {
            continue;
        };
        fans.insert(
            format!("{unit}_{fan_id}"),
            FanStatus {
                status: status == "Normal",
            },
        );
    }
    fans
}

fn parse_fan_slots(output: &str) -> IndexMap<String, FanStatus> {
    let mut fans = IndexMap::new();
    let mut slot: Option<u64> = None;
    let mut fan: Option<u64> = None;

    for line in output.lines() {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix("Slot") {
            slot = leading_integer(rest);
        } else if let Some(rest) = trimmed.strip_prefix("FAN") {
            fan = leading_integer(rest);
        } else if trimmed.starts_with("State") {
            let Some((_, status)) = trimmed.split_once(':') else {
                continue;
            };
            if let (Some(slot), Some(fan)) = (slot, fan) {
                fans.insert(
                    format!("{slot}_{fan}"),
                    FanStatus {
                        status: status.trim() == "Normal",
                    },
                );
            }
        }
    }
    fans
}

fn leading_integer(text: &str) -> Option<u64> {
    let token: String = text
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    token.parse().ok()
}

/// Temperature table layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureDialect {
    /// First output line carries `Slot`: per-slot sensor rows, grouped by
    /// a three-column key.
    PerSlot,
    /// Flat table; chassis hardware adds a leading column to the key.
    Flat { chassis: bool },
}

impl TemperatureDialect {
    /// Columns making up the sensor grouping key.
    pub fn key_width(&self) -> usize {
        match self {
            TemperatureDialect::PerSlot => 3,
            TemperatureDialect::Flat { chassis: true } => 4,
            TemperatureDialect::Flat { chassis: false } => 3,
        }
    }
}

/// Detect the temperature layout from the response shape.
pub fn detect_temperature_dialect(output: &str) -> TemperatureDialect {
    if output.lines().next().is_some_and(|line| line.contains("Slot")) {
        return TemperatureDialect::PerSlot;
    }
    let chassis = output.lines().nth(2).is_some_and(|line| line.contains("Chassis"));
    TemperatureDialect::Flat { chassis }
}

/// Parse `display environment` sensor rows.
///
/// Row layout after the grouping key: current reading, lower limit,
/// warning threshold, alarm threshold. A sensor is alerting above warning
/// and critical above alarm. Thresholds that do not parse (the `NA`
/// column) leave the flags unset; a reading that does not parse drops the
/// row.
pub fn parse_temperature(output: &str) -> IndexMap<String, TemperatureSensor> {
    let dialect = detect_temperature_dialect(output);
    let key_width = dialect.key_width();

    let mut sensors = IndexMap::new();
    let mut scanner = LineScanner::new(is_separator_row, |line: &str| line.trim().is_empty());

    for line in output.lines() {
        let Some(row) = scanner.feed(line) else {
            continue;
        };
        let parts: Vec<&str> = row.split_whitespace().collect();
        if parts.len() < key_width + 3 {
            continue;
        }
        let Ok(temperature) = parts[key_width].parse::<f64>() else {
            warn!("unreadable temperature reading in row {row:?}");
            continue;
        };
        let warning = parts.get(key_width + 2).and_then(|t| t.parse::<f64>().ok());
        let alarm = parts.get(key_width + 3).and_then(|t| t.parse::<f64>().ok());

        sensors.insert(
            parts[..key_width].join("_"),
            TemperatureSensor {
                temperature,
                is_alert: warning.is_some_and(|limit| temperature > limit),
                is_critical: alarm.is_some_and(|limit| temperature > limit),
            },
        );
    }
    sensors
}

/// CPU/memory query widths.
///
/// The wide query covers every reporting unit at once; firmware that
/// rejects it with a parameter error gets the narrow per-unit query, which
/// prints a different layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageDialect {
    MultiUnit,
    SingleUnit,
}

static CPU_SAMPLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+(?:\.[0-9]+)?)%[ \t]+in last 5 seconds").unwrap());

/// Parse CPU utilization samples, keyed by report order.
pub fn parse_cpu(output: &str, dialect: UsageDialect) -> IndexMap<usize, f64> {
    let mut cpu = IndexMap::new();
    match dialect {
        UsageDialect::MultiUnit => {
            // Summary table: one row per unit, the first percent column is
            // the 5-second figure.
            let mut scanner = LineScanner::new(
                |line: &str| {
                    let lead = line.trim_start();
                    (lead.starts_with("Slot") || lead.starts_with("Chassis"))
                        && line.contains("CPU")
                },
                |line: &str| line.trim().is_empty(),
            );
            for line in output.lines() {
                let Some(row) = scanner.feed(line) else {
                    continue;
                };
                let Some(value) = row.split_whitespace().find_map(percent_value) else {
                    continue;
                };
                cpu.insert(cpu.len(), value);
            }
        }
        UsageDialect::SingleUnit => {
            for line in output.lines() {
                if let Some(captures) = CPU_SAMPLE.captures(line) {
                    if let Ok(value) = captures[1].parse::<f64>() {
                        cpu.insert(cpu.len(), value);
                    }
                }
            }
        }
    }
    cpu
}

fn percent_value(token: &str) -> Option<f64> {
    token.strip_suffix('%').and_then(|t| t.parse::<f64>().ok())
}

/// Parse memory usage, summed across all reporting units.
///
/// The wide summary table reports megabytes per unit; the narrow layout's
/// `Mem:` rows report kilobytes. Either way the result is kilobytes.
pub fn parse_memory(output: &str, dialect: UsageDialect) -> MemoryUsage {
    let mut memory = MemoryUsage::default();
    match dialect {
        UsageDialect::MultiUnit => {
            let mut scanner = LineScanner::new(
                |line: &str| line.contains("Total") && line.contains("Used"),
                |line: &str| line.trim().is_empty(),
            );
            for line in output.lines() {
                let Some(row) = scanner.feed(line) else {
                    continue;
                };
                let parts: Vec<&str> = row.split_whitespace().collect();
                if parts.len() < 3 {
                    continue;
                }
                let (Ok(_unit), Ok(total), Ok(used)) = (
                    parts[0].parse::<u64>(),
                    parts[1].parse::<u64>(),
                    parts[2].parse::<u64>(),
                ) else {
                    continue;
                };
                memory.available_ram += total * 1024;
                memory.used_ram += used * 1024;
            }
        }
        UsageDialect::SingleUnit => {
            for line in output.lines() {
                let trimmed = line.trim_start();
                let Some(rest) = trimmed.strip_prefix("Mem:") else {
                    continue;
                };
                let parts: Vec<&str> = rest.split_whitespace().collect();
                if parts.len() < 2 {
                    continue;
                }
                let (Ok(total), Ok(used)) = (parts[0].parse::<u64>(), parts[1].parse::<u64>())
                else {
                    continue;
                };
                memory.available_ram += total;
                memory.used_ram += used;
            }
        }
    }
    memory
}

/// Placeholder power entry until a real extractor exists.
///
/// Signals "not implemented": nominally healthy, sentinel capacity and
/// output.
pub fn power_placeholder() -> IndexMap<String, PowerSupply> {
    let mut power = IndexMap::new();
    power.insert(
        "1".to_string(),
        PowerSupply {
            status: true,
            capacity: -1.0,
            output: -1.0,
        },
    );
    power
}
