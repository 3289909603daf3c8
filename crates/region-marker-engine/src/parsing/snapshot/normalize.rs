use serde::Serialize;

use crate::parsing::regions::{Diagnostic, DiagnosticKind, ParseResult, Region};

#[derive(Serialize)]
pub struct Snap {
    pub regions: Vec<RegionSnap>,
    pub diagnostics: Vec<DiagnosticSnap>,
}

#[derive(Serialize)]
pub struct RegionSnap {
    pub id: String,
    pub name: String,
    /// 1-based start and end line.
    pub lines: (usize, usize),
    pub children: Vec<RegionSnap>,
}

#[derive(Serialize)]
pub struct DiagnosticSnap {
    pub kind: String,
    /// 1-based line.
    pub line: usize,
    pub name: String,
}

pub fn normalize(result: &ParseResult) -> Snap {
    Snap {
        regions: result.regions.iter().map(region_snap).collect(),
        diagnostics: result.diagnostics.iter().map(diagnostic_snap).collect(),
    }
}

fn region_snap(region: &Region) -> RegionSnap {
    RegionSnap {
        id: region.id.clone(),
        name: region.display_name().to_string(),
        lines: (region.start.line + 1, region.end.line + 1),
        children: region.children.iter().map(region_snap).collect(),
    }
}

fn diagnostic_snap(diagnostic: &Diagnostic) -> DiagnosticSnap {
    let kind = match diagnostic.kind {
        DiagnosticKind::OrphanEnd => "OrphanEnd",
        DiagnosticKind::UnterminatedStart => "UnterminatedStart",
    };
    DiagnosticSnap {
        kind: kind.to_string(),
        line: diagnostic.position.line + 1,
        name: diagnostic.name.clone().unwrap_or_else(|| "none".to_string()),
    }
}
