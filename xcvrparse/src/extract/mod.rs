//! Field extraction from a single interface block.
//!
//! A [`FieldTable`] declares which "label is VALUE" lines to look for and
//! which field each one fills. Tables are validated and compiled once, then
//! applied to any number of blocks.

mod patterns;
mod table;

pub use patterns::{LabelMatcher, compile_label_pattern};
pub use table::{
    CompiledTable, Extraction, FieldSpec, FieldTable, PART_NUMBER, PRESENT, SERIAL_NUMBER, TYPE,
    VENDOR,
};
