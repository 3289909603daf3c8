use serde::Serialize;

use crate::parsing::rope::span::Span;

/// Where a marker was found in the source text.
///
/// Positions order by line, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    /// 0-based line number.
    pub line: usize,
    /// Byte offset of the comment prefix within its line.
    pub column: usize,
    /// Byte span of the marker text, from the comment prefix to the end of
    /// the line content (trailing whitespace and terminator excluded).
    pub span: Span,
}

impl Position {
    /// Byte offset of the start of the line holding this marker.
    #[must_use]
    pub fn line_start(self) -> usize {
        self.span.start - self.column
    }
}

/// Whether a marker opens or closes a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MarkerKind {
    Start,
    End,
}

/// A single recognized marker line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Marker {
    pub kind: MarkerKind,
    /// Trimmed trailing text of a start marker (`""` when absent).
    /// Always `None` for end markers.
    pub name: Option<String>,
    pub position: Position,
}

impl Marker {
    pub fn start(name: impl Into<String>, position: Position) -> Self {
        Self {
            kind: MarkerKind::Start,
            name: Some(name.into()),
            position,
        }
    }

    pub fn end(position: Position) -> Self {
        Self {
            kind: MarkerKind::End,
            name: None,
            position,
        }
    }
}
