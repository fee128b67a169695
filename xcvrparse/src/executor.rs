//! Command execution boundary.
//!
//! xcvrparse never talks to devices. Whatever owns the session (an SSH
//! driver, a console server, a file of captured output) implements
//! [`CommandExecutor`] and hands back the raw text of each command.

use std::future::Future;

use crate::error::Result;

/// Trait for anything that can run a CLI command and return its output.
///
/// Closures of the form `FnMut(&str) -> Result<String>` implement it
/// directly, which covers captured output and test fixtures.
///
/// # Example
///
/// ```rust
/// use xcvrparse::parser::vendors::nxos::ShowInterfaceTransceiver;
///
/// # fn main() -> Result<(), xcvrparse::Error> {
/// let parser = ShowInterfaceTransceiver::new()?;
/// let mut device = |_command: &str| -> xcvrparse::Result<String> {
///     Ok("Ethernet1/1\n    transceiver is not present\n".to_string())
/// };
///
/// let result = tokio_test::block_on(parser.cli(&mut device, None))?;
/// assert!(!result["Ethernet1/1"].exists);
/// # Ok(())
/// # }
/// ```
pub trait CommandExecutor: Send {
    /// Run a command and return its raw output.
    fn execute(&mut self, command: &str) -> impl Future<Output = Result<String>> + Send;
}

impl<F> CommandExecutor for F
where
    F: FnMut(&str) -> Result<String> + Send,
{
    fn execute(&mut self, command: &str) -> impl Future<Output = Result<String>> + Send {
        std::future::ready(self(command))
    }
}
