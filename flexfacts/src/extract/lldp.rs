//! LLDP neighbor table extraction.

use log::debug;

use crate::facts::{LldpNeighbor, LldpNeighbors};
use crate::parse::{LineScanner, canonicalize, is_separator_row};

/// The two neighbor-list layouts this family prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeighborTableDialect {
    /// `System Name  Local Interface  Chassis ID  Port ID` - four columns,
    /// remote system first.
    SystemNameFirst,
    /// `Local Interface ...` - local interface first, remote port and
    /// remote system as the last two columns.
    LocalInterfaceFirst,
}

impl NeighborTableDialect {
    fn header(&self) -> &'static str {
        match self {
            NeighborTableDialect::SystemNameFirst => "System Name",
            NeighborTableDialect::LocalInterfaceFirst => "Local Interface",
        }
    }
}

/// Parse the neighbor list, falling back across dialects.
///
/// The primary layout is tried first; only when it yields zero rows is the
/// secondary layout consulted, over the same response text. A port keeps
/// every neighbor the table lists for it, in order.
pub fn parse_lldp_neighbors(output: &str) -> LldpNeighbors {
    let neighbors = parse_neighbor_table(output, NeighborTableDialect::SystemNameFirst);
    if !neighbors.is_empty() {
        return neighbors;
    }
    debug!("no rows in the System Name layout, trying the Local Interface layout");
    parse_neighbor_table(output, NeighborTableDialect::LocalInterfaceFirst)
}

/// Parse one neighbor-table layout.
pub fn parse_neighbor_table(output: &str, dialect: NeighborTableDialect) -> LldpNeighbors {
    let header = dialect.header();
    let mut scanner = LineScanner::new(
        move |line: &str| line.trim_start().starts_with(header),
        |_: &str| false,
    );

    let mut neighbors = LldpNeighbors::new();
    for line in output.lines() {
        let Some(row) = scanner.feed(line) else {
            continue;
        };
        if row.trim().is_empty() || is_separator_row(row) {
            continue;
        }
        let parts: Vec<&str> = row.split_whitespace().collect();

        let (local, neighbor) = match dialect {
            NeighborTableDialect::SystemNameFirst => {
                if parts.len() != 4 {
                    continue;
                }
                (
                    canonicalize(parts[1]),
                    LldpNeighbor {
                        hostname: parts[0].to_string(),
                        port: parts[3].to_string(),
                    },
                )
            }
            NeighborTableDialect::LocalInterfaceFirst => {
                if parts.len() < 3 {
                    continue;
                }
                (
                    canonicalize(parts[0]),
                    LldpNeighbor {
                        hostname: parts[parts.len() - 1].to_string(),
                        port: parts[parts.len() - 2].to_string(),
                    },
                )
            }
        };
        neighbors.entry(local).or_default().push(neighbor);
    }
    neighbors
}
