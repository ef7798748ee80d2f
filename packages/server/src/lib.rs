// Sales Pipeline Dashboard - API Core
//
// This crate serves the lead pipeline dashboard: it relays browser actions
// (scan, enrich, draft, contact status) to the lead-generation backend and
// reads the persisted companies/contacts for each dashboard load.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
