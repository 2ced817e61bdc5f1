//! # Flexfacts
//!
//! Device fact normalization for HPE FlexFabric / Comware CLI output.
//!
//! The same logical question - "what is the serial number", "what is the
//! fan status" - comes back in several textual shapes depending on
//! chassis-vs-stack hardware and firmware generation. Flexfacts detects
//! which dialect a response is written in and normalizes it into a stable,
//! strongly-typed set of device facts.
//!
//! ## Features
//!
//! - Identity, interface, LLDP neighbor, environment and configuration
//!   facts as plain serializable value objects
//! - Per-response dialect detection with ordered fallback between layouts
//! - Tolerant line scraping: malformed rows degrade a field, never the call
//! - Pluggable [`CommandChannel`] boundary - live session or captured text
//! - Pure, synchronous extractors, safe to drive from any session model
//!
//! ## Quick Start
//!
//! ```rust
//! use flexfacts::{FlexFabricDriver, ReplayChannel};
//!
//! fn main() -> Result<(), flexfacts::Error> {
//!     // Captured output replays offline; a live channel slots in the
//!     // same way.
//!     let channel = ReplayChannel::new().with_output(
//!         "display version",
//!         "HP Comware Platform Software\n\
//!          Comware Software, Version 5.20, Release 1211P06\n\
//!          S5820X-28S uptime is 0 weeks, 5 days, 2 hours, 52 minutes\n",
//!     );
//!     let mut driver = FlexFabricDriver::new(channel);
//!
//!     let facts = driver.get_facts()?;
//!     assert_eq!(facts.model, "S5820X-28S");
//!     assert_eq!(facts.os_version, "5.20, Release 1211P06");
//!     Ok(())
//! }
//! ```

pub mod channel;
pub mod driver;
pub mod error;
pub mod extract;
pub mod facts;
pub mod parse;

// Re-export main types for convenience
pub use channel::{CommandChannel, ReplayChannel};
pub use driver::FlexFabricDriver;
pub use error::{ChannelError, Error, Operation, Result};
pub use extract::config::ConfigScope;
pub use facts::{
    ConfigSnapshot, DeviceFacts, Environment, FanStatus, Interface, LldpNeighbor, LldpNeighbors,
    MemoryUsage, PowerSupply, TemperatureSensor,
};
