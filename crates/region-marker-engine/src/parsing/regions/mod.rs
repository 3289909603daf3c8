//! # Region Matching
//!
//! `RegionBuilder` consumes markers in order and keeps a stack of open
//! starts. Its state is just the stack depth: a start pushes, an end pops
//! (or becomes an orphan diagnostic at depth 0), and whatever is still open
//! at the end of input becomes an unterminated-start diagnostic.

pub mod builder;
pub mod ids;
pub mod types;

pub use builder::RegionBuilder;
pub use types::{Diagnostic, DiagnosticKind, ParseResult, Region};
