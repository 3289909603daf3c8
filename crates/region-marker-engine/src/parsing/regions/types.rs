use std::fmt;

use serde::Serialize;

use crate::parsing::{markers::Position, rope::span::Span};

/// A matched start/end pair with its nested regions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    /// `"<name>-<n>"`, or `"unnamed-<n>"` for regions without a name, where
    /// `n` counts start markers with that name seen so far.
    pub id: String,
    /// Name from the start marker, `""` when the marker had none.
    pub name: String,
    pub start: Position,
    pub end: Position,
    /// Nested regions in source order.
    pub children: Vec<Region>,
}

impl Region {
    /// The name, or `None` for an unnamed region.
    pub fn name(&self) -> Option<&str> {
        (!self.name.is_empty()).then_some(self.name.as_str())
    }

    pub fn display_name(&self) -> &str {
        self.name().unwrap_or("Unnamed region")
    }

    /// Fold range: from the start of the start-marker line to the end of the
    /// end-marker line content.
    pub fn range(&self) -> Span {
        Span {
            start: self.start.line_start(),
            end: self.end.span.end,
        }
    }

    /// Number of source lines covered, both marker lines included.
    pub fn line_count(&self) -> usize {
        self.end.line - self.start.line + 1
    }

    pub fn contains_line(&self, line: usize) -> bool {
        self.start.line <= line && line <= self.end.line
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticKind {
    /// An end marker with no open start to close.
    OrphanEnd,
    /// A start marker still open when the input ended.
    UnterminatedStart,
}

/// A malformed marker. Never fatal; the rest of the file still parses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub position: Position,
    pub name: Option<String>,
}

impl Diagnostic {
    pub fn orphan_end(position: Position) -> Self {
        Self {
            kind: DiagnosticKind::OrphanEnd,
            position,
            name: None,
        }
    }

    pub fn unterminated_start(position: Position, name: &str) -> Self {
        Self {
            kind: DiagnosticKind::UnterminatedStart,
            position,
            name: (!name.is_empty()).then(|| name.to_string()),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: ",
            self.position.line + 1,
            self.position.column + 1
        )?;
        match (self.kind, &self.name) {
            (DiagnosticKind::OrphanEnd, _) => write!(f, "region end has no matching start"),
            (DiagnosticKind::UnterminatedStart, Some(name)) => {
                write!(f, "region \"{name}\" is never closed")
            }
            (DiagnosticKind::UnterminatedStart, None) => {
                write!(f, "unnamed region is never closed")
            }
        }
    }
}

/// Everything a parse produces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    /// Top-level regions in source order.
    pub regions: Vec<Region>,
    /// Malformed markers in the order they were detected.
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseResult {
    pub fn is_well_formed(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Count of regions at every depth.
    pub fn region_count(&self) -> usize {
        fn count(regions: &[Region]) -> usize {
            regions.iter().map(|r| 1 + count(&r.children)).sum()
        }
        count(&self.regions)
    }
}
