//! Cisco NX-OS "show interface transceiver" parser.
//!
//! Handles both command forms:
//! - `show interface transceiver` - every interface
//! - `show interface {interface} transceiver` - one interface or a range
//!   such as `Ethernet1/1 - 2`
//!
//! # Output Example
//!
//! ```text
//! Ethernet2/2
//!     transceiver is present
//!     type is QSFP-H40G-AOC1M
//!     name is CISCO
//!     part number is FCBN410QE2C01-C1
//!     revision is D
//!     serial number is ABC1950011G-B
//!     nominal bitrate is 10300 MBit/sec
//!     Link length supported for AOC is 1 m
//!     cisco id is --
//!     cisco extended id number is 16
//! Ethernet2/3
//!     transceiver is not present
//! ```
//!
//! Revision, bitrate and the cisco id lines are printed but not modeled.
//! Add them to the field table to have them collected into
//! [`TransceiverRecord::extra`].

use indexmap::IndexMap;
use log::{debug, trace, warn};

use crate::error::{ParseError, Result};
use crate::executor::CommandExecutor;
use crate::extract::{CompiledTable, Extraction, FieldTable};
use crate::parser::{CommandParser, CommandTemplate, ParseOutcome};
use crate::record::{ParseResult, TransceiverRecord};
use crate::segment::{Block, Blocks};
use crate::validate::{Diagnostic, validate};

/// OS name for NX-OS parsers.
pub const OS: &str = "nxos";

/// Command for all interfaces.
pub const SHOW_ALL: &str = "show interface transceiver";

/// Command for one interface or a range.
pub const SHOW_ONE: &str = "show interface {interface} transceiver";

/// Parser for NX-OS interface transceiver inventory.
///
/// # Example
///
/// ```rust
/// use xcvrparse::parser::vendors::nxos::ShowInterfaceTransceiver;
///
/// let parser = ShowInterfaceTransceiver::new().unwrap();
/// let result = parser.parse("Ethernet1/2\n    transceiver is not present\n");
/// assert!(!result["Ethernet1/2"].exists);
/// ```
#[derive(Debug, Clone)]
pub struct ShowInterfaceTransceiver {
    table: CompiledTable,
    commands: Vec<CommandTemplate>,
}

impl ShowInterfaceTransceiver {
    /// Create a parser with the standard field table.
    pub fn new() -> Result<Self> {
        Self::with_table(FieldTable::nxos_transceiver())
    }

    /// Create a parser with a custom field table (e.g., extended with "revision is").
    pub fn with_table(table: FieldTable) -> Result<Self> {
        Ok(Self {
            table: table.build()?,
            commands: vec![CommandTemplate::new(SHOW_ALL)?, CommandTemplate::new(SHOW_ONE)?],
        })
    }

    /// Get the compiled field table.
    pub fn table(&self) -> &CompiledTable {
        &self.table
    }

    /// Build the command for all interfaces, or for the given interface spec.
    pub fn command(&self, interface: Option<&str>) -> Result<String> {
        match interface {
            None => self.commands[0].format(&[]),
            Some(interface) => self.commands[1].format(&[("interface", interface)]),
        }
    }

    /// Parse raw output, logging any diagnostics.
    pub fn parse(&self, output: &str) -> ParseResult {
        self.parse_checked(output).into_result()
    }

    /// Parse raw output and return the diagnostics with the result.
    ///
    /// Besides the record checks of [`validate`], this reports blocks the
    /// layout rules could not place: content without a presence line,
    /// several presence lines in one block, and a presence line in the
    /// text before the first interface.
    pub fn parse_checked(&self, output: &str) -> ParseOutcome {
        let mut result = ParseResult::new();
        let mut block_diagnostics: IndexMap<&str, Diagnostic> = IndexMap::new();
        let mut blocks = Blocks::new(output);

        for block in blocks.by_ref() {
            let extraction = self.table.extract(block.body);

            // Findings follow the record: a repeated block replaces both
            match self.check_block(&block, &extraction) {
                Some(diagnostic) => {
                    block_diagnostics.insert(block.name, diagnostic);
                }
                None => {
                    block_diagnostics.shift_remove(block.name);
                }
            }

            let record = TransceiverRecord::from(extraction);
            if result.insert(block.name.to_string(), record).is_some() {
                debug!("Interface '{}' repeated, keeping last block", block.name);
            }
        }

        if result.is_empty() {
            debug!("No interface blocks found in {} bytes of output", output.len());
        }

        let mut diagnostics = Vec::new();
        if self.table.presence_lines(blocks.preamble()) > 0 {
            diagnostics.push(Diagnostic::DiscardedPreamble {
                lines: blocks.discarded_lines(),
            });
        }
        diagnostics.extend(block_diagnostics.into_values());
        diagnostics.extend(validate(&result));

        for diagnostic in &diagnostics {
            warn!("{}", diagnostic);
        }

        ParseOutcome {
            result,
            diagnostics,
        }
    }

    /// Check that one block follows the name-line layout.
    fn check_block(&self, block: &Block<'_>, extraction: &Extraction) -> Option<Diagnostic> {
        let interface = block.name.to_string();

        if extraction.presence.is_none() {
            if block.is_blank() {
                return None;
            }
            trace!(
                "Interface '{}' has output but no '{}' line",
                block.name,
                self.table
                    .label(self.table.presence_field())
                    .unwrap_or_default()
            );
            return Some(Diagnostic::UnrecognizedBlock { interface });
        }

        if self.table.presence_lines(block.body) > 1 {
            return Some(Diagnostic::MergedBlock { interface });
        }

        None
    }

    /// Parse raw output bytes. Fails if the bytes are not UTF-8 text.
    pub fn parse_bytes(&self, output: &[u8]) -> Result<ParseResult> {
        self.parse_bytes_checked(output).map(ParseOutcome::into_result)
    }

    /// Parse raw output bytes and return the diagnostics with the result.
    pub fn parse_bytes_checked(&self, output: &[u8]) -> Result<ParseOutcome> {
        let text = std::str::from_utf8(output).map_err(|e| ParseError::MalformedInput {
            offset: e.valid_up_to(),
        })?;
        Ok(self.parse_checked(text))
    }

    /// Run the command through `executor` and parse its output.
    pub async fn cli<E: CommandExecutor>(
        &self,
        executor: &mut E,
        interface: Option<&str>,
    ) -> Result<ParseResult> {
        let command = self.command(interface)?;
        debug!("Executing '{}'", command);
        let output = executor.execute(&command).await?;
        Ok(self.parse(&output))
    }
}

impl CommandParser for ShowInterfaceTransceiver {
    fn os(&self) -> &str {
        OS
    }

    fn commands(&self) -> &[CommandTemplate] {
        &self.commands
    }

    fn parse_output(&self, output: &str) -> ParseResult {
        self.parse(output)
    }
}
