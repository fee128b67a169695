//! Lazy per-interface block iterator.
//!
//! Walks the raw output one line at a time (newline search via `memchr`)
//! and yields a [`Block`] for every interface-name line. Block bodies are
//! borrowed slices of the input, so segmentation never copies output text.

use log::{debug, trace};
use memchr::memchr;

/// One interface's slice of the command output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    /// Interface name taken from the name line (e.g., "Ethernet1/1").
    pub name: &'a str,

    /// Everything after the name line up to the next name line or end of input.
    pub body: &'a str,
}

impl<'a> Block<'a> {
    /// Iterate over the body lines with trailing `\r` removed.
    pub fn lines(&self) -> impl Iterator<Item = &'a str> {
        self.body.lines()
    }

    /// Check if the body has no printable content.
    pub fn is_blank(&self) -> bool {
        self.body.trim().is_empty()
    }
}

/// Return the interface name if `line` is an interface-name line.
///
/// A name line is a single non-whitespace token that occupies the entire
/// line. Only a trailing carriage return is stripped; leading indentation
/// or trailing spaces disqualify the line.
pub fn is_interface_line(line: &str) -> Option<&str> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.is_empty() || line.chars().any(char::is_whitespace) {
        None
    } else {
        Some(line)
    }
}

/// Iterator over the interface blocks of a command output.
///
/// The iterator is lazy and finite. It is consumed as it runs; segment the
/// text again to start over.
///
/// # Example
///
/// ```rust
/// use xcvrparse::segment::Blocks;
///
/// let output = "Ethernet1/1\n    transceiver is present\nEthernet1/2\n";
/// let names: Vec<_> = Blocks::new(output).map(|b| b.name).collect();
/// assert_eq!(names, ["Ethernet1/1", "Ethernet1/2"]);
/// ```
#[derive(Debug)]
pub struct Blocks<'a> {
    /// The full command output.
    text: &'a str,

    /// Byte offset of the next unread line.
    pos: usize,

    /// Name and body start of the block currently being collected.
    current: Option<(&'a str, usize)>,

    /// Non-blank lines seen before the first name line.
    discarded: usize,

    /// Text before the first name line, or all of it if there is none.
    preamble: &'a str,
}

impl<'a> Blocks<'a> {
    /// Create a new block iterator over `text`.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            current: None,
            discarded: 0,
            preamble: "",
        }
    }

    /// Number of non-blank lines discarded before the first name line.
    pub fn discarded_lines(&self) -> usize {
        self.discarded
    }

    /// Text skipped before the first name line.
    ///
    /// Empty until the iterator has been advanced once.
    pub fn preamble(&self) -> &'a str {
        self.preamble
    }

    /// Read the next line, returning `(line_start, line)` and advancing past it.
    fn next_line(&mut self) -> Option<(usize, &'a str)> {
        if self.pos >= self.text.len() {
            return None;
        }

        let start = self.pos;
        let rest = &self.text.as_bytes()[start..];
        let line = match memchr(b'\n', rest) {
            Some(idx) => {
                self.pos = start + idx + 1;
                &self.text[start..start + idx]
            }
            None => {
                self.pos = self.text.len();
                &self.text[start..]
            }
        };

        Some((start, line))
    }

    /// Skip to the first name line.
    fn seek_first(&mut self) -> Option<(&'a str, usize)> {
        while let Some((line_start, line)) = self.next_line() {
            if let Some(name) = is_interface_line(line) {
                self.preamble = &self.text[..line_start];
                if self.discarded > 0 {
                    debug!(
                        "Discarded {} line(s) before first interface '{}'",
                        self.discarded, name
                    );
                }
                return Some((name, self.pos));
            }
            if !line.trim().is_empty() {
                self.discarded += 1;
            }
        }
        self.preamble = self.text;
        None
    }
}

impl<'a> Iterator for Blocks<'a> {
    type Item = Block<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (name, body_start) = match self.current.take() {
            Some(current) => current,
            None if self.pos == 0 => self.seek_first()?,
            None => return None,
        };

        while let Some((line_start, line)) = self.next_line() {
            if let Some(next_name) = is_interface_line(line) {
                self.current = Some((next_name, self.pos));
                trace!("Block '{}' ends at byte {}", name, line_start);
                return Some(Block {
                    name,
                    body: &self.text[body_start..line_start],
                });
            }
        }

        trace!("Block '{}' runs to end of output", name);
        Some(Block {
            name,
            body: &self.text[body_start..],
        })
    }
}

impl std::iter::FusedIterator for Blocks<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interface_line_detection() {
        assert_eq!(is_interface_line("Ethernet1/1"), Some("Ethernet1/1"));
        assert_eq!(is_interface_line("Ethernet1/1\r"), Some("Ethernet1/1"));
        assert_eq!(is_interface_line("mgmt0"), Some("mgmt0"));

        // Indented body lines and multi-token lines are not names
        assert_eq!(is_interface_line("    transceiver is present"), None);
        assert_eq!(is_interface_line("Ethernet1/1 "), None);
        assert_eq!(is_interface_line(" Ethernet1/1"), None);
        assert_eq!(is_interface_line(""), None);
        assert_eq!(is_interface_line("\r"), None);
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert_eq!(Blocks::new("").count(), 0);
        assert_eq!(Blocks::new("\n\n").count(), 0);
        assert_eq!(Blocks::new("    transceiver is present\n").count(), 0);
    }

    #[test]
    fn test_blocks_split_on_name_lines() {
        let text = "Ethernet1/1\n    transceiver is present\n    type is Fabric\nEthernet1/2\n    transceiver is not present\n";
        let blocks: Vec<_> = Blocks::new(text).collect();

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].name, "Ethernet1/1");
        assert_eq!(
            blocks[0].body,
            "    transceiver is present\n    type is Fabric\n"
        );
        assert_eq!(blocks[1].name, "Ethernet1/2");
        assert_eq!(blocks[1].body, "    transceiver is not present\n");
    }

    #[test]
    fn test_preamble_is_discarded() {
        let text = "show interface transceiver\n\n  some banner\nEthernet1/1\n    transceiver is present";
        let mut blocks = Blocks::new(text);

        let first = blocks.next().unwrap();
        assert_eq!(first.name, "Ethernet1/1");
        assert_eq!(first.body, "    transceiver is present");
        assert_eq!(blocks.discarded_lines(), 2);
        assert_eq!(blocks.preamble(), "show interface transceiver\n\n  some banner\n");
        assert!(blocks.next().is_none());
    }

    #[test]
    fn test_no_name_line_keeps_whole_text_as_preamble() {
        // Trailing space disqualifies the only name line
        let text = "Ethernet1/1 \n    transceiver is present\n";
        let mut blocks = Blocks::new(text);

        assert!(blocks.next().is_none());
        assert_eq!(blocks.preamble(), text);
        assert_eq!(blocks.discarded_lines(), 2);
    }

    #[test]
    fn test_adjacent_names_yield_empty_block() {
        let text = "Ethernet1/1\nEthernet1/2\n    transceiver is present\n";
        let blocks: Vec<_> = Blocks::new(text).collect();

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].body, "");
        assert!(blocks[0].is_blank());
        assert_eq!(blocks[1].name, "Ethernet1/2");
    }

    #[test]
    fn test_trailing_name_line_without_newline() {
        let blocks: Vec<_> = Blocks::new("Ethernet1/1\n    x is y\nEthernet1/2").collect();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].name, "Ethernet1/2");
        assert_eq!(blocks[1].body, "");
    }

    #[test]
    fn test_crlf_output() {
        let text = "Ethernet1/1\r\n    transceiver is present\r\nEthernet1/2\r\n";
        let blocks: Vec<_> = Blocks::new(text).collect();

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].name, "Ethernet1/1");
        assert_eq!(blocks[0].body, "    transceiver is present\r\n");
        assert_eq!(blocks[0].lines().collect::<Vec<_>>(), ["    transceiver is present"]);
    }

    #[test]
    fn test_iterator_is_fused() {
        let mut blocks = Blocks::new("Ethernet1/1\n");
        assert!(blocks.next().is_some());
        assert!(blocks.next().is_none());
        assert!(blocks.next().is_none());
    }
}
