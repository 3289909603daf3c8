//! # region-marker-engine
//!
//! Recognizes `region` / `endregion` markers in source-file comments and
//! pairs them into a nested region tree, reporting malformed markers as
//! diagnostics without ever aborting the scan.
//!
//! Data flows one way: text → [`Marker`]s → [`ParseResult`].

pub mod io;
pub mod navigation;
pub mod parsing;

// Re-export key types for easier usage
pub use io::{IoError, parse_file, read_source};
pub use navigation::{
    FlatRegion, Flattened, active_region, flatten_regions, matching_boundary, next_region,
    next_top_level_region, previous_region, region_parents, region_path,
};
pub use parsing::{
    ParseError,
    markers::{CommentSyntax, Marker, MarkerKind, MarkerSyntax, Position, SyntaxError, tokenize},
    parse_regions, parse_regions_cancellable, parse_str,
    regions::{Diagnostic, DiagnosticKind, ParseResult, Region},
    rope::Span,
};
