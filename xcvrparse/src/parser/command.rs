//! Command templates with `{name}` placeholders.

use std::fmt;

use indexmap::IndexMap;
use regex::Regex;

use crate::error::{CommandError, ConfigError, Result};

/// A CLI command with named placeholders, e.g. `show interface {interface} transceiver`.
///
/// A template can format a concrete command from arguments, and match a
/// concrete command back to its arguments. Runs of whitespace in the
/// template match any run of whitespace in the command.
#[derive(Clone)]
pub struct CommandTemplate {
    template: String,
    placeholders: Vec<String>,
    pattern: Regex,
}

impl CommandTemplate {
    /// Compile a template.
    pub fn new(template: impl Into<String>) -> std::result::Result<Self, ConfigError> {
        let template = template.into();
        let invalid = |message: &str| ConfigError::InvalidTemplate {
            template: template.clone(),
            message: message.to_string(),
        };

        if template.trim().is_empty() {
            return Err(invalid("template is empty"));
        }

        let mut placeholders = Vec::new();
        let mut pattern = String::from(r"^\s*");
        let mut rest = template.as_str();

        while let Some(open) = rest.find('{') {
            push_literal(&mut pattern, &rest[..open]);

            let after = &rest[open + 1..];
            let close = after.find('}').ok_or_else(|| invalid("unclosed '{'"))?;
            let name = &after[..close];

            if !is_identifier(name) {
                return Err(invalid("placeholder names must be identifiers"));
            }
            if placeholders.iter().any(|p| p == name) {
                return Err(invalid("placeholder used more than once"));
            }

            pattern.push_str(&format!(r"(?P<{}>\S.*?)", name));
            placeholders.push(name.to_string());
            rest = &after[close + 1..];
        }

        if rest.contains('}') {
            return Err(invalid("unmatched '}'"));
        }
        push_literal(&mut pattern, rest);
        pattern.push_str(r"\s*$");

        Ok(Self {
            pattern: Regex::new(&pattern)?,
            template,
            placeholders,
        })
    }

    /// The template text.
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Placeholder names in template order.
    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    /// Format a concrete command.
    ///
    /// Every placeholder must be supplied. Values must be non-empty single
    /// lines; anything else is rejected rather than sent to a device.
    pub fn format(&self, args: &[(&str, &str)]) -> Result<String> {
        let mut command = self.template.clone();

        for name in &self.placeholders {
            let value = args
                .iter()
                .find(|(key, _)| *key == name.as_str())
                .map(|(_, value)| value.trim())
                .ok_or_else(|| CommandError::MissingArgument {
                    name: name.clone(),
                    template: self.template.clone(),
                })?;

            if value.is_empty() {
                return Err(CommandError::InvalidArgument {
                    name: name.clone(),
                    message: "value is empty".to_string(),
                }
                .into());
            }
            if value.contains(['\n', '\r']) {
                return Err(CommandError::InvalidArgument {
                    name: name.clone(),
                    message: "value spans multiple lines".to_string(),
                }
                .into());
            }

            command = command.replace(&format!("{{{}}}", name), value);
        }

        Ok(command)
    }

    /// Match a concrete command, returning the placeholder values.
    pub fn match_command(&self, command: &str) -> Option<IndexMap<String, String>> {
        let caps = self.pattern.captures(command)?;
        Some(
            self.placeholders
                .iter()
                .filter_map(|name| {
                    caps.name(name)
                        .map(|m| (name.clone(), m.as_str().to_string()))
                })
                .collect(),
        )
    }

    /// Check if a concrete command matches this template.
    pub fn matches(&self, command: &str) -> bool {
        self.pattern.is_match(command)
    }
}

impl fmt::Debug for CommandTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandTemplate")
            .field("template", &self.template)
            .field("placeholders", &self.placeholders)
            .finish()
    }
}

impl fmt::Display for CommandTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.template)
    }
}

impl PartialEq for CommandTemplate {
    fn eq(&self, other: &Self) -> bool {
        self.template == other.template
    }
}

impl Eq for CommandTemplate {}

/// Append escaped literal text, turning whitespace runs into `\s+`.
fn push_literal(pattern: &mut String, literal: &str) {
    let mut in_space = false;
    let mut buf = [0u8; 4];
    for ch in literal.chars() {
        if ch.is_whitespace() {
            if !in_space {
                pattern.push_str(r"\s+");
                in_space = true;
            }
        } else {
            in_space = false;
            pattern.push_str(&regex::escape(ch.encode_utf8(&mut buf)));
        }
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
