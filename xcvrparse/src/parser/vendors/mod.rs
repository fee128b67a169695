//! Vendor-specific parsers.

pub mod nxos;
