//! Shared builders for the relay link tools.
//!
//! Four pure builders, each taking a plain input record and returning
//! formatted strings:
//! - [`calendar::build_calendar_links`] - Google Calendar / Outlook Web deep links
//! - [`ics::build_ics`] - an RFC 5545 VEVENT document
//! - [`tracking::build_tracking_link`] - UTM-tagged tracking URLs
//! - [`woo::build_woo_links`] - WooCommerce add-to-cart links
//!
//! The builders share no state; callers collect input, call exactly one
//! builder, and render or persist the result. [`history`] holds the bounded
//! per-tool record of recent submissions that callers persist.

pub mod calendar;
pub mod error;
pub mod event;
pub mod history;
pub mod ics;
pub mod tracking;
pub mod woo;

// Re-export the builder entry points at crate root for convenience
pub use calendar::build_calendar_links;
pub use error::{RelayError, RelayResult};
pub use ics::build_ics;
pub use tracking::build_tracking_link;
pub use woo::build_woo_links;
