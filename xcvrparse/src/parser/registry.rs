//! Caller-owned parser registry keyed by command template and OS.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use log::debug;

use super::CommandParser;
use super::vendors::nxos::ShowInterfaceTransceiver;
use crate::error::{CommandError, Result};
use crate::executor::CommandExecutor;
use crate::record::ParseResult;

/// Registry for command parsers.
///
/// There is no global instance: build one, register parsers, and pass it
/// to whatever needs to dispatch commands.
///
/// # Example
///
/// ```rust
/// use xcvrparse::parser::ParserRegistry;
///
/// # fn main() -> Result<(), xcvrparse::Error> {
/// let registry = ParserRegistry::with_builtin_parsers()?;
/// let result = registry.parse(
///     "nxos",
///     "show interface Ethernet1/1 - 2 transceiver",
///     "Ethernet1/1\n    transceiver is not present\n",
/// )?;
/// assert_eq!(result.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct ParserRegistry {
    /// (command template, os) to parser.
    parsers: IndexMap<(String, String), Arc<dyn CommandParser>>,
}

impl ParserRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            parsers: IndexMap::new(),
        }
    }

    /// Create a registry with the built-in parsers.
    pub fn with_builtin_parsers() -> Result<Self> {
        let mut registry = Self::new();
        registry.register(Arc::new(ShowInterfaceTransceiver::new()?))?;
        Ok(registry)
    }

    /// Register a parser under every command template it handles.
    ///
    /// Fails without registering anything if any template is already taken
    /// for the parser's OS.
    pub fn register(&mut self, parser: Arc<dyn CommandParser>) -> Result<()> {
        let os = parser.os().to_string();

        for template in parser.commands() {
            let key = (template.as_str().to_string(), os.clone());
            if self.parsers.contains_key(&key) {
                return Err(CommandError::AlreadyRegistered {
                    command: key.0,
                    os: key.1,
                }
                .into());
            }
        }

        for template in parser.commands() {
            debug!("Registering parser for '{}' on {}", template, os);
            self.parsers.insert(
                (template.as_str().to_string(), os.clone()),
                Arc::clone(&parser),
            );
        }
        Ok(())
    }

    /// Find the parser for a concrete command on an OS.
    pub fn find(&self, command: &str, os: &str) -> Option<&Arc<dyn CommandParser>> {
        self.parsers
            .iter()
            .find(|((template, parser_os), parser)| {
                parser_os == os
                    && parser
                        .commands()
                        .iter()
                        .any(|t| t.as_str() == template && t.matches(command))
            })
            .map(|(_, parser)| parser)
    }

    /// Check if a command template is registered for an OS.
    pub fn contains(&self, template: &str, os: &str) -> bool {
        self.parsers
            .contains_key(&(template.to_string(), os.to_string()))
    }

    /// Parse command output with the registered parser.
    pub fn parse(&self, os: &str, command: &str, output: &str) -> Result<ParseResult> {
        let parser = self.find(command, os).ok_or_else(|| CommandError::NoParser {
            command: command.to_string(),
            os: os.to_string(),
        })?;
        Ok(parser.parse_output(output))
    }

    /// Run a command through `executor` and parse its output.
    ///
    /// The parser is resolved before the command is sent, so unsupported
    /// commands never reach the device.
    pub async fn execute_and_parse<E: CommandExecutor>(
        &self,
        executor: &mut E,
        os: &str,
        command: &str,
    ) -> Result<ParseResult> {
        let parser = self.find(command, os).ok_or_else(|| CommandError::NoParser {
            command: command.to_string(),
            os: os.to_string(),
        })?;
        let output = executor.execute(command).await?;
        Ok(parser.parse_output(&output))
    }

    /// List registered (command template, os) pairs.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.parsers
            .keys()
            .map(|(template, os)| (template.as_str(), os.as_str()))
    }

    /// Number of registered (command template, os) pairs.
    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}

impl fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("entries", &self.entries().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::parser::CommandTemplate;
    use crate::record::TransceiverRecord;

    /// Marks every interface it sees as present with fixed values.
    struct StubParser {
        os: &'static str,
        commands: Vec<CommandTemplate>,
    }

    impl StubParser {
        fn new(os: &'static str, template: &str) -> Self {
            Self {
                os,
                commands: vec![CommandTemplate::new(template).unwrap()],
            }
        }
    }

    impl CommandParser for StubParser {
        fn os(&self) -> &str {
            self.os
        }

        fn commands(&self) -> &[CommandTemplate] {
            &self.commands
        }

        fn parse_output(&self, output: &str) -> ParseResult {
            output
                .lines()
                .map(|name| (name.to_string(), TransceiverRecord::present("V", "T", "P", "S")))
                .collect()
        }
    }

    #[test]
    fn test_builtin_parsers() {
        let registry = ParserRegistry::with_builtin_parsers().unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("show interface transceiver", "nxos"));
        assert!(registry.contains("show interface {interface} transceiver", "nxos"));
        assert!(!registry.contains("show interface transceiver", "iosxe"));
    }

    #[test]
    fn test_find_by_concrete_command() {
        let registry = ParserRegistry::with_builtin_parsers().unwrap();

        assert!(registry.find("show interface transceiver", "nxos").is_some());
        assert!(registry.find("show interface Ethernet1/1 transceiver", "nxos").is_some());
        assert!(registry.find("show interface Ethernet1/1 - 2 transceiver", "nxos").is_some());
        assert!(registry.find("show version", "nxos").is_none());
        assert!(registry.find("show interface transceiver", "junos").is_none());
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = ParserRegistry::with_builtin_parsers().unwrap();
        let err = registry
            .register(Arc::new(StubParser::new("nxos", "show interface transceiver")))
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Command(CommandError::AlreadyRegistered { .. })
        ));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_same_command_other_os() {
        let mut registry = ParserRegistry::with_builtin_parsers().unwrap();
        registry
            .register(Arc::new(StubParser::new("eos", "show interface transceiver")))
            .unwrap();

        let result = registry
            .parse("eos", "show interface transceiver", "Et1\nEt2")
            .unwrap();
        assert_eq!(result.len(), 2);
        assert!(result["Et1"].exists);

        let result = registry
            .parse("nxos", "show interface transceiver", "Et1\nEt2")
            .unwrap();
        assert!(!result["Et1"].exists);
    }

    #[test]
    fn test_parse_unknown_command() {
        let registry = ParserRegistry::new();
        assert!(registry.is_empty());
        assert!(matches!(
            registry.parse("nxos", "show interface transceiver", ""),
            Err(Error::Command(CommandError::NoParser { .. }))
        ));
    }

    #[test]
    fn test_execute_and_parse() {
        let registry = ParserRegistry::with_builtin_parsers().unwrap();
        let mut calls = 0;
        let mut device = |_command: &str| -> Result<String> {
            calls += 1;
            Ok("Ethernet1/1\n    transceiver is not present\n".to_string())
        };

        let result = tokio_test::block_on(registry.execute_and_parse(
            &mut device,
            "nxos",
            "show interface Ethernet1/1 transceiver",
        ))
        .unwrap();
        assert_eq!(result.len(), 1);

        let err = tokio_test::block_on(registry.execute_and_parse(
            &mut device,
            "nxos",
            "show version",
        ))
        .unwrap_err();
        assert!(matches!(err, Error::Command(CommandError::NoParser { .. })));
        assert_eq!(calls, 1);
    }
}
