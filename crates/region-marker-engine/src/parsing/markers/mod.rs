//! # Marker Tokenizer
//!
//! Finds region markers inside comment lines.
//!
//! - **`syntax`**: `MarkerSyntax`, the comment-prefix descriptor, compiled once
//! - **`classify`**: `MarkerClassifier` turns a single line into an optional `Marker`
//! - **`types`**: `Marker`, `MarkerKind`, `Position`
//!
//! The tokenizer never fails on input text: lines that are not marker lines
//! are skipped, and structural problems are the region builder's concern.

pub mod classify;
pub mod syntax;
pub mod types;

use xi_rope::Rope;

use crate::parsing::rope::{LineRef, lines_with_spans};

pub use classify::MarkerClassifier;
pub use syntax::{CommentSyntax, MarkerSyntax, SyntaxError};
pub use types::{Marker, MarkerKind, Position};

/// Lazy stream of markers over a sequence of lines, in source order.
pub struct Markers<'a, I> {
    lines: I,
    classifier: MarkerClassifier<'a>,
}

impl<'a, I> Markers<'a, I>
where
    I: Iterator<Item = LineRef>,
{
    pub fn new(lines: I, syntax: &'a MarkerSyntax) -> Self {
        Self {
            lines,
            classifier: MarkerClassifier::new(syntax),
        }
    }
}

impl<I> Iterator for Markers<'_, I>
where
    I: Iterator<Item = LineRef>,
{
    type Item = Marker;

    fn next(&mut self) -> Option<Marker> {
        for lr in self.lines.by_ref() {
            if let Some(marker) = self.classifier.classify(&lr) {
                log::trace!(
                    "{:?} marker at line {}",
                    marker.kind,
                    marker.position.line + 1
                );
                return Some(marker);
            }
        }
        None
    }
}

/// Tokenizes a whole document into its markers.
pub fn tokenize<'a>(
    rope: &'a Rope,
    syntax: &'a MarkerSyntax,
) -> Markers<'a, impl Iterator<Item = LineRef> + 'a> {
    Markers::new(lines_with_spans(rope), syntax)
}
