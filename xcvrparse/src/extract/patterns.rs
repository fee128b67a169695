//! Label pattern compilation and matching.

use regex::Regex;

/// Trait for label matching - regex by default, extensible for custom matchers.
pub trait LabelMatcher: Send + Sync {
    /// Returns the value of the first matching line, or None if no line matches.
    fn find_value<'t>(&self, text: &'t str) -> Option<&'t str>;

    /// Check if any line of the text carries the label.
    fn is_match(&self, text: &str) -> bool {
        self.find_value(text).is_some()
    }
}

/// Regex-based label matcher (the default implementation).
///
/// The value is capture group 1.
impl LabelMatcher for Regex {
    fn find_value<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// Compile a label phrase into a line-anchored value pattern.
///
/// The resulting pattern matches a line made of optional indentation, the
/// literal label, one space and a non-empty value running to the end of the
/// line. A trailing `\r` is excluded from the value. Matching is
/// case-sensitive.
pub fn compile_label_pattern(label: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?m)^[ \t]*{} (.+?)\r?$", regex::escape(label)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_value_capture() {
        let pattern = compile_label_pattern("part number is").unwrap();
        let text = "    transceiver is present\n    part number is FTLX8570D3BCL-C2\n";
        assert_eq!(pattern.find_value(text), Some("FTLX8570D3BCL-C2"));
    }

    #[test]
    fn test_carriage_return_stripped() {
        let pattern = compile_label_pattern("type is").unwrap();
        assert_eq!(pattern.find_value("    type is Fabric\r\n"), Some("Fabric"));
    }

    #[test]
    fn test_line_anchored() {
        // "number is" must not match inside "serial number is"
        let pattern = compile_label_pattern("number is").unwrap();
        assert!(!pattern.is_match("    serial number is FNS1947100T\n"));

        // "name is" must not match a line where it is not the leading label
        let pattern = compile_label_pattern("name is").unwrap();
        assert!(!pattern.is_match("    vendor name is CISCO\n"));
    }

    #[test]
    fn test_case_sensitive() {
        let pattern = compile_label_pattern("type is").unwrap();
        assert!(!pattern.is_match("    Type is Fabric\n"));
    }

    #[test]
    fn test_first_occurrence_wins() {
        let pattern = compile_label_pattern("name is").unwrap();
        let text = "    name is CISCO-FINISAR\n    name is OTHER\n";
        assert_eq!(pattern.find_value(text), Some("CISCO-FINISAR"));
    }

    #[test]
    fn test_value_keeps_inner_spaces() {
        let pattern = compile_label_pattern("nominal bitrate is").unwrap();
        let text = "    nominal bitrate is 10300 MBit/sec\n";
        assert_eq!(pattern.find_value(text), Some("10300 MBit/sec"));
    }

    #[test]
    fn test_empty_value_does_not_match() {
        let pattern = compile_label_pattern("serial number is").unwrap();
        assert!(!pattern.is_match("    serial number is \n"));
        assert!(!pattern.is_match("    serial number is\n"));
    }

    #[test]
    fn test_label_metacharacters_escaped() {
        let pattern = compile_label_pattern("cisco id (hex) is").unwrap();
        assert_eq!(pattern.find_value("    cisco id (hex) is 0x0d\n"), Some("0x0d"));
    }
}
