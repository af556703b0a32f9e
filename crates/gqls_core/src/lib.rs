//! Core types for gqls.
//!
//! This crate provides the foundational types shared by the converter and
//! the rewriter:
//! - `span`: Source location tracking
//! - `diagnostics`: Structural problem reporting

pub mod diagnostics;
pub mod span;

pub use diagnostics::{Diagnostic, DiagnosticBag, DiagnosticSeverity, Label};
pub use span::Span;
