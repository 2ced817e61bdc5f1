//! Fact extractors.
//!
//! One module per fact category. Each extractor is a pure function from raw
//! command output to a structured result: no state survives a call, and
//! dialect detection happens on every call from the response text alone, so
//! successive calls stay correct even across dialect-inconsistent firmware.
//!
//! Extractors scrape tolerantly. A row that does not match the expected
//! column layout is a parsing miss, skipped and never fatal; an entire
//! table that never materializes simply yields zero entries, which is the
//! cue to try a fallback dialect where one exists.

pub mod config;
pub mod environment;
pub mod identity;
pub mod interfaces;
pub mod lldp;
