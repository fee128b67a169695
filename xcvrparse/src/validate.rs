//! Invariant checks over a parse result.
//!
//! [`validate`] reports everything it finds as [`Diagnostic`]s and never
//! fails. Callers that need complete records use [`validate_strict`].

use std::fmt;

use crate::error::{Result, ValidationError};
use crate::record::{ParseResult, TransceiverRecord};

/// A finding about one interface in a parse result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Transceiver is present but some standard fields were not printed.
    Incomplete {
        interface: String,
        missing: Vec<&'static str>,
    },

    /// Record claims no transceiver yet carries field values.
    AbsentWithFields { interface: String },

    /// Block has content but no presence line. The output format may not
    /// follow the one-name-per-line layout.
    UnrecognizedBlock { interface: String },

    /// Text before the first name line carries a presence line, so an
    /// interface block was dropped along with the preamble.
    DiscardedPreamble { lines: usize },

    /// Block holds more than one presence line. A name line that broke the
    /// layout (e.g. trailing spaces) folded the next interface into it.
    MergedBlock { interface: String },
}

impl Diagnostic {
    /// Interface the diagnostic refers to, if any.
    pub fn interface(&self) -> Option<&str> {
        match self {
            Diagnostic::Incomplete { interface, .. }
            | Diagnostic::AbsentWithFields { interface }
            | Diagnostic::UnrecognizedBlock { interface }
            | Diagnostic::MergedBlock { interface } => Some(interface),
            Diagnostic::DiscardedPreamble { .. } => None,
        }
    }

    /// Check if the diagnostic marks a broken invariant rather than missing data.
    pub fn is_violation(&self) -> bool {
        matches!(self, Diagnostic::AbsentWithFields { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Incomplete { interface, missing } => {
                write!(f, "{}: missing {}", interface, missing.join(", "))
            }
            Diagnostic::AbsentWithFields { interface } => {
                write!(f, "{}: not present but has field values", interface)
            }
            Diagnostic::UnrecognizedBlock { interface } => {
                write!(f, "{}: block has no presence line", interface)
            }
            Diagnostic::DiscardedPreamble { lines } => {
                write!(
                    f,
                    "{} line(s) before the first interface include a presence line",
                    lines
                )
            }
            Diagnostic::MergedBlock { interface } => {
                write!(f, "{}: block has more than one presence line", interface)
            }
        }
    }
}

/// Check one record.
pub fn check_record(interface: &str, record: &TransceiverRecord) -> Option<Diagnostic> {
    if !record.exists {
        return record
            .has_values()
            .then(|| Diagnostic::AbsentWithFields {
                interface: interface.to_string(),
            });
    }

    let missing = record.missing_fields();
    if missing.is_empty() {
        None
    } else {
        Some(Diagnostic::Incomplete {
            interface: interface.to_string(),
            missing,
        })
    }
}

/// Check every record of a parse result.
pub fn validate(result: &ParseResult) -> Vec<Diagnostic> {
    result
        .iter()
        .filter_map(|(interface, record)| check_record(interface, record))
        .collect()
}

/// Fail on the first record that is incomplete or breaks the absence invariant.
pub fn validate_strict(result: &ParseResult) -> Result<()> {
    for (interface, record) in result {
        match check_record(interface, record) {
            None => {}
            Some(Diagnostic::Incomplete { interface, missing }) => {
                return Err(ValidationError::IncompleteRecord {
                    interface,
                    missing: missing.into_iter().map(String::from).collect(),
                }
                .into());
            }
            Some(Diagnostic::AbsentWithFields { interface }) => {
                return Err(ValidationError::AbsentWithFields { interface }.into());
            }
            Some(_) => {}
        }
    }
    Ok(())
}
