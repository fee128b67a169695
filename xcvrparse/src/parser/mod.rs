//! Command parsers and the registry that dispatches to them.
//!
//! A parser owns the command templates it understands and turns their raw
//! output into a [`ParseResult`]. Parsers are registered per OS in a
//! caller-owned [`ParserRegistry`].

mod command;
mod registry;
pub mod vendors;

pub use command::CommandTemplate;
pub use registry::ParserRegistry;

use crate::record::ParseResult;
use crate::validate::Diagnostic;

/// Trait for parsers of one command family on one OS.
pub trait CommandParser: Send + Sync {
    /// OS name this parser applies to (e.g., "nxos").
    fn os(&self) -> &str;

    /// Command templates handled by this parser.
    fn commands(&self) -> &[CommandTemplate];

    /// Parse raw command output.
    fn parse_output(&self, output: &str) -> ParseResult;

    /// Check if a concrete command is handled by this parser.
    fn handles(&self, command: &str) -> bool {
        self.commands().iter().any(|t| t.matches(command))
    }
}

/// Parse result together with the findings of the validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    /// Parsed records.
    pub result: ParseResult,

    /// Incomplete records and blocks that break the layout rules.
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutcome {
    /// Check if parsing produced no diagnostics.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Discard the diagnostics.
    pub fn into_result(self) -> ParseResult {
        self.result
    }
}
