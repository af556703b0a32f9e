//! Shorthand layer for gqls.
//!
//! This crate provides:
//! - `line`: Splitting shorthand into indentation-measured line records
//! - `converter`: The stack-driven indentation-to-brace conversion

pub mod converter;
pub mod line;

pub use converter::{
    convert, convert_with_options, ConvertOptions, ConvertResult, Converter, Frame, FrameKind,
};
pub use line::{lines, parse_line, LineRecord, Lines};
