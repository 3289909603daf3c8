use crate::parsing::rope::{lines::LineRef, span::Span};

use super::{
    syntax::{CommentPattern, MarkerSyntax},
    types::{Marker, Position},
};

/// Recognizes marker lines for one [`MarkerSyntax`].
///
/// Each line is classified on its own, without reference to surrounding
/// lines; pairing is left to the region builder.
#[derive(Debug, Clone, Copy)]
pub struct MarkerClassifier<'a> {
    syntax: &'a MarkerSyntax,
}

impl<'a> MarkerClassifier<'a> {
    pub fn new(syntax: &'a MarkerSyntax) -> Self {
        Self { syntax }
    }

    /// Returns the marker on this line, if the line is a marker line.
    pub fn classify(&self, lr: &LineRef) -> Option<Marker> {
        let content = lr.content();
        self.syntax
            .patterns
            .iter()
            .find_map(|pattern| classify_with(pattern, lr, content))
    }
}

fn classify_with(pattern: &CommentPattern, lr: &LineRef, content: &str) -> Option<Marker> {
    let caps = pattern.regex.captures(content)?;
    let column = caps.name("indent").map_or(0, |m| m.end());
    let position = Position {
        line: lr.index,
        column,
        span: Span {
            start: lr.span.start + column,
            end: lr.span.start + content.trim_end().len().max(column),
        },
    };

    let keyword = caps.name("keyword")?.as_str();
    if keyword == "endregion" {
        return Some(Marker::end(position));
    }

    let mut name = caps.name("rest").map_or("", |m| m.as_str()).trim();
    if let Some(suffix) = &pattern.suffix {
        name = name.strip_suffix(suffix.as_str()).unwrap_or(name).trim_end();
    }
    Some(Marker::start(name, position))
}
