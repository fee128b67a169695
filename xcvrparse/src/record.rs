//! Transceiver record and parse result types.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::extract::{Extraction, PART_NUMBER, SERIAL_NUMBER, TYPE, VENDOR};

/// Parse output: interface name to transceiver record.
///
/// Iteration follows first appearance in the command output. A repeated
/// interface name replaces the earlier record in place.
pub type ParseResult = IndexMap<String, TransceiverRecord>;

/// Transceiver status of one interface.
///
/// When `exists` is false every optional field is `None`. When it is true
/// the four standard fields are expected, but a field the device did not
/// print stays `None` rather than being filled with a placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransceiverRecord {
    /// Whether a transceiver is inserted.
    pub exists: bool,

    /// Vendor name (NX-OS prints this as "name is ...").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,

    /// Transceiver type (e.g., "Fabric", "QSFP-H40G-AOC1M").
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Vendor part number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_number: Option<String>,

    /// Serial number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,

    /// Values of caller-declared fields beyond the standard four.
    #[serde(flatten)]
    pub extra: IndexMap<String, String>,
}

impl TransceiverRecord {
    /// Create a record for an interface with no transceiver.
    pub fn absent() -> Self {
        Self::default()
    }

    /// Create a record for a present transceiver with all standard fields.
    pub fn present(
        vendor: impl Into<String>,
        kind: impl Into<String>,
        part_number: impl Into<String>,
        serial_number: impl Into<String>,
    ) -> Self {
        Self {
            exists: true,
            vendor: Some(vendor.into()),
            kind: Some(kind.into()),
            part_number: Some(part_number.into()),
            serial_number: Some(serial_number.into()),
            extra: IndexMap::new(),
        }
    }

    /// Names of the standard fields that are not set.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            (VENDOR, &self.vendor),
            (TYPE, &self.kind),
            (PART_NUMBER, &self.part_number),
            (SERIAL_NUMBER, &self.serial_number),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name)
        .collect()
    }

    /// Check if a present transceiver has every standard field.
    pub fn is_complete(&self) -> bool {
        !self.exists || self.missing_fields().is_empty()
    }

    /// Check if any optional value is set.
    pub fn has_values(&self) -> bool {
        self.vendor.is_some()
            || self.kind.is_some()
            || self.part_number.is_some()
            || self.serial_number.is_some()
            || !self.extra.is_empty()
    }

    /// Get a field value by its field name, standard or extra.
    pub fn get(&self, name: &str) -> Option<&str> {
        match name {
            VENDOR => self.vendor.as_deref(),
            TYPE => self.kind.as_deref(),
            PART_NUMBER => self.part_number.as_deref(),
            SERIAL_NUMBER => self.serial_number.as_deref(),
            _ => self.extra.get(name).map(String::as_str),
        }
    }
}

impl From<Extraction> for TransceiverRecord {
    fn from(mut extraction: Extraction) -> Self {
        if !extraction.exists {
            return Self::absent();
        }

        Self {
            exists: true,
            vendor: extraction.take(VENDOR),
            kind: extraction.take(TYPE),
            part_number: extraction.take(PART_NUMBER),
            serial_number: extraction.take(SERIAL_NUMBER),
            extra: extraction.fields,
        }
    }
}

impl fmt::Display for TransceiverRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.exists {
            return write!(f, "not present");
        }

        let show = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
        write!(
            f,
            "{} {} pn={} sn={}",
            show(&self.vendor),
            show(&self.kind),
            show(&self.part_number),
            show(&self.serial_number)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_absent_extraction() {
        let mut extraction = Extraction::default();
        extraction.fields.insert("vendor".into(), "CISCO".into());

        // exists=false wins over stray values
        let record = TransceiverRecord::from(extraction);
        assert_eq!(record, TransceiverRecord::absent());
        assert!(!record.has_values());
    }

    #[test]
    fn test_from_present_extraction() {
        let mut extraction = Extraction {
            exists: true,
            presence: Some("present".into()),
            fields: IndexMap::new(),
        };
        extraction.fields.insert("type".into(), "Fabric".into());
        extraction.fields.insert("vendor".into(), "CISCO-FINISAR".into());
        extraction.fields.insert("revision".into(), "A".into());

        let record = TransceiverRecord::from(extraction);
        assert!(record.exists);
        assert_eq!(record.kind.as_deref(), Some("Fabric"));
        assert_eq!(record.vendor.as_deref(), Some("CISCO-FINISAR"));
        assert_eq!(record.get("revision"), Some("A"));
        assert_eq!(record.missing_fields(), ["part_number", "serial_number"]);
        assert!(!record.is_complete());
    }

    #[test]
    fn test_serialize_present() {
        let record =
            TransceiverRecord::present("CISCO-FINISAR", "Fabric", "FTLX8570D3BCL-C2", "FNS1947100T");
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "exists": true,
                "vendor": "CISCO-FINISAR",
                "type": "Fabric",
                "part_number": "FTLX8570D3BCL-C2",
                "serial_number": "FNS1947100T",
            })
        );
    }

    #[test]
    fn test_serialize_absent_omits_fields() {
        let json = serde_json::to_string(&TransceiverRecord::absent()).unwrap();
        assert_eq!(json, r#"{"exists":false}"#);
    }

    #[test]
    fn test_serialize_extra_flattened() {
        let mut record = TransceiverRecord::present("CISCO", "QSFP-H40G-AOC1M", "FCBN410QE2C01-C1", "X");
        record.extra.insert("revision".into(), "D".into());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["revision"], "D");
    }

    #[test]
    fn test_display() {
        assert_eq!(TransceiverRecord::absent().to_string(), "not present");

        let mut record = TransceiverRecord::present("CISCO", "Fabric", "PN1", "SN1");
        record.serial_number = None;
        assert_eq!(record.to_string(), "CISCO Fabric pn=PN1 sn=-");
    }
}
