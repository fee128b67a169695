//! Block segmentation of raw command output.
//!
//! Splits multi-interface output into per-interface blocks. Interface-name
//! lines (a single token on a line of its own) delimit the blocks.

mod blocks;

pub use blocks::{Block, Blocks, is_interface_line};
