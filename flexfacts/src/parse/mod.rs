//! Low-level text parsing utilities.
//!
//! Pure, stateless helpers shared by every extractor: elapsed-time phrases,
//! interface-name abbreviation, MAC canonicalization and the two-state line
//! scanner for tabular output.

mod duration;
mod ifname;
mod mac;
mod scanner;

pub use duration::parse_duration;
pub use ifname::canonicalize;
pub use mac::canonical_mac;
pub use scanner::{LineScanner, is_separator_row};
