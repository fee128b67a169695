//! # xcvrparse
//!
//! Interface transceiver inventory parser for network device CLI output.
//!
//! xcvrparse turns the raw text of "show interface transceiver" into a
//! structured, insertion-ordered map of interface name to transceiver
//! record. It does no device I/O: pair it with any SSH driver by
//! implementing [`CommandExecutor`], or feed it captured output.
//!
//! ## Features
//!
//! - Lazy, zero-copy segmentation of output into per-interface blocks
//! - Declarative "label is VALUE" field tables, compiled once
//! - Presence-aware records: absent transceivers carry no fields
//! - Diagnostics for incomplete records and output that breaks the block layout
//! - Caller-owned parser registry keyed by command and OS
//!
//! ## Quick Start
//!
//! ```rust
//! use xcvrparse::parser::vendors::nxos::ShowInterfaceTransceiver;
//!
//! # fn main() -> Result<(), xcvrparse::Error> {
//! let output = "\
//! Ethernet1/1
//!     transceiver is present
//!     type is Fabric
//!     name is CISCO-FINISAR
//!     part number is FTLX8570D3BCL-C2
//!     serial number is FNS1947100T
//! Ethernet1/2
//!     transceiver is not present
//! ";
//!
//! let parser = ShowInterfaceTransceiver::new()?;
//! let result = parser.parse(output);
//!
//! assert_eq!(result["Ethernet1/1"].vendor.as_deref(), Some("CISCO-FINISAR"));
//! assert!(!result["Ethernet1/2"].exists);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod executor;
pub mod extract;
pub mod parser;
pub mod record;
pub mod segment;
pub mod validate;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use executor::CommandExecutor;
pub use extract::{FieldSpec, FieldTable};
pub use parser::vendors::nxos::ShowInterfaceTransceiver;
pub use parser::{CommandParser, CommandTemplate, ParseOutcome, ParserRegistry};
pub use record::{ParseResult, TransceiverRecord};
pub use validate::{Diagnostic, validate, validate_strict};
