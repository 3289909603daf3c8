pub mod markers;
pub mod regions;
pub mod rope;
pub mod snapshot;

#[cfg(test)]
mod tests;

use std::{
    cell::Cell,
    sync::atomic::{AtomicBool, Ordering},
};

use thiserror::Error;
use xi_rope::Rope;

use markers::{MarkerSyntax, Markers, tokenize};
use regions::{ParseResult, RegionBuilder};
use rope::lines_with_spans;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The caller asked to stop; no partial result is kept.
    #[error("parse cancelled before line {}", .line + 1)]
    Cancelled { line: usize },
}

/// Parses every region in a document.
///
/// Never fails: malformed markers are reported in
/// [`ParseResult::diagnostics`] and the rest of the document still parses.
pub fn parse_regions(rope: &Rope, syntax: &MarkerSyntax) -> ParseResult {
    let mut builder = RegionBuilder::new();
    builder.extend(tokenize(rope, syntax));
    builder.finish()
}

/// Convenience: [`parse_regions`] over a plain string.
pub fn parse_str(text: &str, syntax: &MarkerSyntax) -> ParseResult {
    parse_regions(&Rope::from(text), syntax)
}

/// Like [`parse_regions`], but checks `cancel` before each line.
pub fn parse_regions_cancellable(
    rope: &Rope,
    syntax: &MarkerSyntax,
    cancel: &AtomicBool,
) -> Result<ParseResult, ParseError> {
    let cancelled_at = Cell::new(None);
    let lines = lines_with_spans(rope).take_while(|lr| {
        let stop = cancel.load(Ordering::Relaxed);
        if stop {
            cancelled_at.set(Some(lr.index));
        }
        !stop
    });

    let mut builder = RegionBuilder::new();
    builder.extend(Markers::new(lines, syntax));

    if let Some(line) = cancelled_at.get() {
        log::debug!("region parse cancelled at line {}", line + 1);
        return Err(ParseError::Cancelled { line });
    }
    Ok(builder.finish())
}
