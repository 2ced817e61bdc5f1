//! Error types for flexfacts.

use std::fmt;
use std::io;

use thiserror::Error;

/// Main error type for flexfacts operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Command channel errors (socket/EOF-class connectivity failures)
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    /// The requested fact category has no extractor on this platform
    #[error("Operation not supported: {0}")]
    Unsupported(Operation),
}

impl Error {
    /// Check whether this error marks an unimplemented fact category.
    ///
    /// Callers can use this to tell "not implemented" apart from an empty
    /// result or a connectivity failure.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Error::Unsupported(_))
    }
}

/// Command channel errors.
///
/// These are the only failures the core propagates unmodified; everything
/// else degrades to a partial result.
#[derive(Error, Debug)]
pub enum ChannelError {
    /// Connection was closed while a command was in flight
    #[error("Connection closed: {0}")]
    Closed(String),

    /// I/O error on the underlying session
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Fact operations exposed by the driver surface.
///
/// Used by [`Error::Unsupported`] to name the operation a device family has
/// no extractor for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    LldpNeighborsDetail,
    NtpServers,
    ArpTable,
    MacAddressTable,
    InterfacesCounters,
}

impl Operation {
    /// Operation name as exposed on the facts surface.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::LldpNeighborsDetail => "get_lldp_neighbors_detail",
            Operation::NtpServers => "get_ntp_servers",
            Operation::ArpTable => "get_arp_table",
            Operation::MacAddressTable => "get_mac_address_table",
            Operation::InterfacesCounters => "get_interfaces_counters",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result type alias using flexfacts's Error.
pub type Result<T> = std::result::Result<T, Error>;
