use crate::parsing::markers::{Marker, MarkerKind, Position};

use super::{
    ids::RegionIds,
    types::{Diagnostic, ParseResult, Region},
};

/// A start marker still waiting for its end.
#[derive(Debug)]
struct OpenRegion {
    id: String,
    name: String,
    start: Position,
    /// Regions already closed inside this one.
    children: Vec<Region>,
}

impl OpenRegion {
    fn close(self, end: Position) -> Region {
        Region {
            id: self.id,
            name: self.name,
            start: self.start,
            end,
            children: self.children,
        }
    }
}

/// Pairs markers into a region tree using a stack of open starts.
///
/// Pairing is purely structural: an end always closes the most recently
/// opened start, whatever either marker says after the keyword.
#[derive(Debug, Default)]
pub struct RegionBuilder {
    open: Vec<OpenRegion>,
    ids: RegionIds,
    regions: Vec<Region>,
    diagnostics: Vec<Diagnostic>,
}

impl RegionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    pub fn push(&mut self, marker: Marker) {
        match marker.kind {
            MarkerKind::Start => self.open(marker.name.unwrap_or_default(), marker.position),
            MarkerKind::End => self.close(marker.position),
        }
    }

    pub fn finish(mut self) -> ParseResult {
        // Outermost first. Regions closed inside an unterminated start are
        // promoted to the top level instead of being dropped with it.
        for open in std::mem::take(&mut self.open) {
            log::debug!(
                "unterminated region {:?} at line {}",
                open.name,
                open.start.line + 1
            );
            self.diagnostics
                .push(Diagnostic::unterminated_start(open.start, &open.name));
            self.regions.extend(open.children);
        }

        ParseResult {
            regions: self.regions,
            diagnostics: self.diagnostics,
        }
    }

    fn open(&mut self, name: String, start: Position) {
        let id = self.ids.next_id(&name);
        self.open.push(OpenRegion {
            id,
            name,
            start,
            children: vec![],
        });
    }

    fn close(&mut self, end: Position) {
        let Some(open) = self.open.pop() else {
            log::debug!("orphan region end at line {}", end.line + 1);
            self.diagnostics.push(Diagnostic::orphan_end(end));
            return;
        };

        let region = open.close(end);
        match self.open.last_mut() {
            Some(parent) => parent.children.push(region),
            None => self.regions.push(region),
        }
    }
}

impl Extend<Marker> for RegionBuilder {
    fn extend<T: IntoIterator<Item = Marker>>(&mut self, markers: T) {
        for marker in markers {
            self.push(marker);
        }
    }
}
