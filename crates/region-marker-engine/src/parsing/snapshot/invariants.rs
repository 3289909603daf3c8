use xi_rope::Rope;

use crate::parsing::{
    regions::{ParseResult, Region},
    rope::{preview, slice_to_string},
};

/// Validates parser output invariants.
///
/// Asserts that:
/// - All marker spans are within rope bounds and slice back to marker text
/// - Every region ends after it starts
/// - Children lie strictly inside their parent
/// - Siblings are in source order and do not overlap
/// - Diagnostics are within rope bounds
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(rope: &Rope, result: &ParseResult) {
    let n = rope.len();
    check_level(rope, &result.regions, None);
    for d in &result.diagnostics {
        assert!(
            d.position.span.start <= d.position.span.end && d.position.span.end <= n,
            "diagnostic span out of bounds: {:?} (rope len: {})",
            d.position.span,
            n
        );
    }
}

fn check_level(rope: &Rope, regions: &[Region], parent: Option<&Region>) {
    let n = rope.len();
    for r in regions {
        for pos in [r.start, r.end] {
            assert!(
                pos.span.start <= pos.span.end && pos.span.end <= n,
                "marker span out of bounds: {:?} (rope len: {})",
                pos.span,
                n
            );
            assert!(
                slice_to_string(rope, pos.span).contains("region"),
                "marker span does not slice to a marker: {:?} {:?}",
                pos.span,
                preview(rope, pos.span, 40)
            );
        }
        assert!(
            r.start < r.end,
            "region {} ends before it starts: {:?} .. {:?}",
            r.id,
            r.start,
            r.end
        );
        if let Some(p) = parent {
            assert!(
                p.start < r.start && r.end < p.end && p.range().contains(r.range()),
                "region {} not strictly inside parent {}",
                r.id,
                p.id
            );
        }
        check_level(rope, &r.children, Some(r));
    }
    for pair in regions.windows(2) {
        assert!(
            pair[0].end < pair[1].start,
            "sibling regions overlap or are out of order: {} and {}",
            pair[0].id,
            pair[1].id
        );
    }
}
