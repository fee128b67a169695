//! Field table: which labels to look for and which field each one fills.

use std::fmt;

use indexmap::IndexMap;
use log::trace;
use regex::Regex;
use serde::Deserialize;

use super::patterns::{LabelMatcher, compile_label_pattern};
use crate::error::ConfigError;

/// Field name of the presence line.
pub const PRESENT: &str = "present";
/// Field name of the transceiver type.
pub const TYPE: &str = "type";
/// Field name of the vendor (printed as "name is" by NX-OS).
pub const VENDOR: &str = "vendor";
/// Field name of the part number.
pub const PART_NUMBER: &str = "part_number";
/// Field name of the serial number.
pub const SERIAL_NUMBER: &str = "serial_number";

/// One field declaration: a field name and the label phrase that precedes its value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldSpec {
    /// Field name in the output record (e.g., "vendor").
    pub name: String,

    /// Label phrase as printed by the device (e.g., "name is").
    pub label: String,
}

impl FieldSpec {
    /// Create a new field declaration.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
        }
    }
}

/// Declarative field table for one command family.
///
/// Built with `with_*` methods, then compiled once with [`build`](Self::build).
/// The table can also be deserialized, so callers may keep extra labels in
/// their own configuration files.
///
/// # Example
///
/// ```rust
/// use xcvrparse::extract::FieldTable;
///
/// let table = FieldTable::nxos_transceiver()
///     .with_field("revision", "revision is")
///     .build()
///     .unwrap();
/// assert_eq!(table.len(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldTable {
    /// Declared fields in declaration order.
    pub fields: Vec<FieldSpec>,

    /// Name of the field that decides whether a transceiver exists.
    #[serde(default = "default_presence_field")]
    pub presence_field: String,

    /// Value of the presence field that means "exists".
    #[serde(default = "default_present_value")]
    pub present_value: String,
}

fn default_presence_field() -> String {
    PRESENT.to_string()
}

fn default_present_value() -> String {
    "present".to_string()
}

impl FieldTable {
    /// Create an empty table using the default presence field.
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            presence_field: default_presence_field(),
            present_value: default_present_value(),
        }
    }

    /// Canonical table for NX-OS "show interface transceiver" output.
    pub fn nxos_transceiver() -> Self {
        Self::new()
            .with_field(PRESENT, "transceiver is")
            .with_field(TYPE, "type is")
            .with_field(VENDOR, "name is")
            .with_field(PART_NUMBER, "part number is")
            .with_field(SERIAL_NUMBER, "serial number is")
    }

    /// Add a field.
    pub fn with_field(mut self, name: impl Into<String>, label: impl Into<String>) -> Self {
        self.fields.push(FieldSpec::new(name, label));
        self
    }

    /// Set the presence field and the value that marks a transceiver as present.
    pub fn with_presence(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.presence_field = field.into();
        self.present_value = value.into();
        self
    }

    /// Validate the table and compile every label.
    pub fn build(self) -> Result<CompiledTable, ConfigError> {
        let mut compiled: IndexMap<String, CompiledField> = IndexMap::new();

        for spec in self.fields {
            if spec.name.is_empty() {
                return Err(ConfigError::EmptyFieldName);
            }
            if spec.label.trim().is_empty() {
                return Err(ConfigError::EmptyLabel { field: spec.name });
            }
            if compiled.contains_key(&spec.name) {
                return Err(ConfigError::DuplicateField { field: spec.name });
            }

            let pattern = compile_label_pattern(&spec.label)?;
            trace!("Compiled field '{}' as {}", spec.name, pattern.as_str());
            compiled.insert(
                spec.name.clone(),
                CompiledField {
                    label: spec.label,
                    pattern,
                },
            );
        }

        let presence = compiled.shift_remove(&self.presence_field).ok_or_else(|| {
            ConfigError::MissingPresenceField {
                field: self.presence_field.clone(),
            }
        })?;

        Ok(CompiledTable {
            presence_name: self.presence_field,
            presence,
            present_value: self.present_value,
            fields: compiled,
        })
    }
}

impl Default for FieldTable {
    fn default() -> Self {
        Self::new()
    }
}

/// A validated field with its compiled pattern.
#[derive(Debug, Clone)]
struct CompiledField {
    label: String,
    pattern: Regex,
}

/// Values pulled out of one block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Whether the presence line reported the transceiver as present.
    pub exists: bool,

    /// Raw value of the presence line, if one was found.
    pub presence: Option<String>,

    /// Values of the non-presence fields that were found, in table order.
    /// Empty when `exists` is false.
    pub fields: IndexMap<String, String>,
}

impl Extraction {
    /// Get a field value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Remove a field value by name.
    pub fn take(&mut self, name: &str) -> Option<String> {
        self.fields.shift_remove(name)
    }
}

/// Compiled, validated field table.
///
/// Immutable after [`FieldTable::build`]; share it freely between threads.
#[derive(Clone)]
pub struct CompiledTable {
    /// Name of the presence field.
    presence_name: String,

    /// Compiled presence field.
    presence: CompiledField,

    /// Presence value that means "exists".
    present_value: String,

    /// Value fields, presence excluded, in declaration order.
    fields: IndexMap<String, CompiledField>,
}

impl CompiledTable {
    /// Extract the configured fields from one block body.
    ///
    /// The presence field is checked first. When it is missing or does not
    /// report the transceiver as present, no other field is attempted.
    /// Fields whose label is not found are left out of the result.
    pub fn extract(&self, body: &str) -> Extraction {
        let presence = self.presence.pattern.find_value(body).map(str::to_string);
        let exists = presence.as_deref() == Some(self.present_value.as_str());

        let mut extraction = Extraction {
            exists,
            presence,
            fields: IndexMap::new(),
        };
        if !exists {
            return extraction;
        }

        for (name, field) in &self.fields {
            match field.pattern.find_value(body) {
                Some(value) if !value.trim().is_empty() => {
                    extraction.fields.insert(name.clone(), value.to_string());
                }
                _ => trace!("Label '{}' not found", field.label),
            }
        }

        extraction
    }

    /// Count the presence lines in `text`.
    ///
    /// One block normally has exactly one. More than one means several
    /// interfaces' output ended up in the same slice.
    pub fn presence_lines(&self, text: &str) -> usize {
        self.presence.pattern.find_iter(text).count()
    }

    /// Names of the fields filled when a transceiver is present, in table order.
    pub fn value_fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Name of the presence field.
    pub fn presence_field(&self) -> &str {
        &self.presence_name
    }

    /// Label phrase for a field.
    pub fn label(&self, name: &str) -> Option<&str> {
        if name == self.presence_name {
            return Some(self.presence.label.as_str());
        }
        self.fields.get(name).map(|f| f.label.as_str())
    }

    /// Number of declared fields, the presence field included.
    pub fn len(&self) -> usize {
        self.fields.len() + 1
    }

    /// Always false: a compiled table has at least its presence field.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Debug for CompiledTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledTable")
            .field("presence_field", &self.presence_name)
            .field("present_value", &self.present_value)
            .field(
                "fields",
                &self
                    .fields
                    .iter()
                    .map(|(name, field)| (name.as_str(), field.label.as_str()))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
