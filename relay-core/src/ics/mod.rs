//! ICS document generation.
//!
//! Writes the RFC 5545 VEVENT subset the relay tools need.

mod generate;

pub use generate::build_ics;
