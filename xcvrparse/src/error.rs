//! Error types for xcvrparse.

use thiserror::Error;

/// Main error type for xcvrparse operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Field table or command template errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Raw output could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Strict validation of a parse result failed
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Command formatting, execution or dispatch errors
    #[error("Command error: {0}")]
    Command(#[from] CommandError),
}

/// Field table and command template errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A field was declared without a name
    #[error("Field name must not be empty")]
    EmptyFieldName,

    /// A field was declared with an empty label phrase
    #[error("Label phrase for field '{field}' must not be empty")]
    EmptyLabel { field: String },

    /// The same field name was declared twice
    #[error("Field '{field}' declared more than once")]
    DuplicateField { field: String },

    /// The presence field is not part of the table
    #[error("Presence field '{field}' is not declared in the field table")]
    MissingPresenceField { field: String },

    /// A label compiled to an invalid pattern
    #[error("Invalid label pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A command template could not be compiled
    #[error("Invalid command template '{template}': {message}")]
    InvalidTemplate { template: String, message: String },
}

/// Raw output errors.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Output is not UTF-8 text
    #[error("Output is not valid UTF-8 text (invalid byte at offset {offset})")]
    MalformedInput { offset: usize },
}

/// Strict validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A present transceiver is missing one or more fields
    #[error("Interface '{interface}' is missing fields: {}", .missing.join(", "))]
    IncompleteRecord {
        interface: String,
        missing: Vec<String>,
    },

    /// An absent transceiver carries field values
    #[error("Interface '{interface}' has no transceiver but carries field values")]
    AbsentWithFields { interface: String },
}

/// Command layer errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// An argument cannot be placed into a command
    #[error("Invalid argument '{name}': {message}")]
    InvalidArgument { name: String, message: String },

    /// A template placeholder was not supplied
    #[error("Missing argument '{name}' for command '{template}'")]
    MissingArgument { name: String, template: String },

    /// The executor failed to run the command
    #[error("Command '{command}' failed: {message}")]
    ExecutionFailed { command: String, message: String },

    /// No parser handles this command on this OS
    #[error("No parser for '{command}' on os '{os}'")]
    NoParser { command: String, os: String },

    /// A parser is already registered for this command and OS
    #[error("Parser for '{command}' on os '{os}' is already registered")]
    AlreadyRegistered { command: String, os: String },
}

/// Result type alias using xcvrparse's Error.
pub type Result<T> = std::result::Result<T, Error>;
