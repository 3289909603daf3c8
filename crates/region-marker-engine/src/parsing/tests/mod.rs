//! Behavioural tests for the tokenizer and matcher working together.

use std::sync::atomic::AtomicBool;

use pretty_assertions::assert_eq;
use rstest::rstest;
use xi_rope::Rope;

use crate::parsing::{
    ParseError, parse_regions, parse_regions_cancellable, parse_str,
    markers::{CommentSyntax, MarkerSyntax},
    regions::{DiagnosticKind, ParseResult, Region},
    snapshot,
};

fn slashes() -> MarkerSyntax {
    MarkerSyntax::new("//").unwrap()
}

fn parse(text: &str) -> ParseResult {
    let rope = Rope::from(text);
    let result = parse_regions(&rope, &slashes());
    snapshot::invariants(&rope, &result);
    result
}

/// Name tree used to compare structure without positions.
fn shape(regions: &[Region]) -> Vec<(String, Vec<String>)> {
    regions
        .iter()
        .map(|r| {
            (
                r.name.clone(),
                r.children.iter().map(|c| c.name.clone()).collect(),
            )
        })
        .collect()
}

fn kinds(result: &ParseResult) -> Vec<DiagnosticKind> {
    result.diagnostics.iter().map(|d| d.kind).collect()
}

#[test]
fn single_named_region() {
    let result = parse("//#region FirstRegion\nvar x = 42\n//#endregion\n");

    assert_eq!(result.regions.len(), 1);
    let region = &result.regions[0];
    assert_eq!(region.name, "FirstRegion");
    assert_eq!(region.id, "FirstRegion-1");
    assert_eq!(region.start.line, 0);
    assert_eq!(region.end.line, 2);
    assert!(region.children.is_empty());
    assert!(result.is_well_formed());
}

#[test]
fn end_before_any_start_is_an_orphan() {
    let result = parse("// #endregion\n");

    assert!(result.regions.is_empty());
    assert_eq!(kinds(&result), vec![DiagnosticKind::OrphanEnd]);
    assert_eq!(result.diagnostics[0].name, None);
    assert_eq!(result.diagnostics[0].position.line, 0);
}

#[test]
fn unclosed_outer_keeps_closed_inner() {
    let result = parse("// #region Outer\n// #region Inner\ncode\n// #endregion\n");

    assert_eq!(kinds(&result), vec![DiagnosticKind::UnterminatedStart]);
    assert_eq!(result.diagnostics[0].name.as_deref(), Some("Outer"));
    assert_eq!(result.diagnostics[0].position.line, 0);

    // Inner was closed correctly, so it survives its unterminated parent.
    assert_eq!(shape(&result.regions), vec![("Inner".to_string(), vec![])]);
}

#[test]
fn start_without_name_is_a_valid_region() {
    let result = parse("// #region\n// #endregion\n");

    assert!(result.is_well_formed());
    assert_eq!(result.regions.len(), 1);
    assert_eq!(result.regions[0].name, "");
    assert_eq!(result.regions[0].id, "unnamed-1");
}

#[test]
fn consecutive_orphan_ends_are_each_reported() {
    let result = parse("// #endregion\n// #endregion\n// #endregion\n");

    assert!(result.regions.is_empty());
    assert_eq!(kinds(&result), vec![DiagnosticKind::OrphanEnd; 3]);
    let lines: Vec<_> = result.diagnostics.iter().map(|d| d.position.line).collect();
    assert_eq!(lines, vec![0, 1, 2]);
}

#[test]
fn starts_only_yield_one_diagnostic_each() {
    let result = parse("// #region A\n// #region B\n// #region\n");

    assert!(result.regions.is_empty());
    assert_eq!(kinds(&result), vec![DiagnosticKind::UnterminatedStart; 3]);
    let names: Vec<_> = result
        .diagnostics
        .iter()
        .map(|d| d.name.as_deref())
        .collect();
    assert_eq!(names, vec![Some("A"), Some("B"), None]);
}

#[test]
fn nested_regions_and_end_commentary() {
    let text = "\
// #region      Second Region
type MyClass struct{}

// #region InnerRegion
func (m MyClass) myMethod() {}
        //        #endregion ends InnerRegion

        // #region
func (m MyClass) myMethod2() {}
//#endregion

// #endregion
";
    let result = parse(text);

    assert!(result.is_well_formed());
    assert_eq!(
        shape(&result.regions),
        vec![(
            "Second Region".to_string(),
            vec!["InnerRegion".to_string(), String::new()]
        )]
    );
    assert_eq!(result.region_count(), 3);
}

#[test]
fn end_commentary_never_affects_pairing() {
    // The end text names the outer region, but stack order still wins.
    let result = parse("// #region Outer\n// #region Inner\n// #endregion Outer\n// #endregion Inner\n");

    assert!(result.is_well_formed());
    assert_eq!(
        shape(&result.regions),
        vec![("Outer".to_string(), vec!["Inner".to_string()])]
    );
}

#[test]
fn invalid_markers_do_not_disturb_later_regions() {
    let text = "\
//#region FirstRegion
const x: number = 42;
//#endregion

// #endregion Invalid end boundary
// #region Invalid start boundary

// #region Second Region
  //   #region    InnerRegion
  //  #endregion   ends InnerRegion
  //  #region
  //#endregion
// #endregion
";
    let result = parse(text);

    assert_eq!(
        shape(&result.regions),
        vec![
            ("FirstRegion".to_string(), vec![]),
            (
                "Second Region".to_string(),
                vec!["InnerRegion".to_string(), String::new()]
            ),
        ]
    );
    assert_eq!(
        kinds(&result),
        vec![DiagnosticKind::OrphanEnd, DiagnosticKind::UnterminatedStart]
    );
    assert_eq!(
        result.diagnostics[1].name.as_deref(),
        Some("Invalid start boundary")
    );
}

#[test]
fn plain_text_is_not_an_error() {
    let result = parse("fn main() {\n    println!(\"no markers here\");\n}\n");
    assert_eq!(result, ParseResult::default());
}

#[test]
fn empty_input() {
    assert_eq!(parse(""), ParseResult::default());
}

#[test]
fn parsing_is_idempotent() {
    let text = "// #region A\n// #endregion\n// #endregion\n// #region B\n";
    assert_eq!(parse(text), parse(text));
}

#[rstest]
#[case("// #region A\n// #region B\n// #endregion\n// #endregion\n")]
#[case("//#region A\n//#region B\n//#endregion\n//#endregion\n")]
#[case("   //   #region   A   \n\t//\t#region\tB\n  //#endregion\n//    #endregion\n")]
#[case("// region A\n    // region B\n// endregion\n// endregion\n")]
fn whitespace_variants_parse_identically(#[case] text: &str) {
    let result = parse(text);
    assert!(result.is_well_formed());
    assert_eq!(
        shape(&result.regions),
        vec![("A".to_string(), vec!["B".to_string()])]
    );
}

#[test]
fn crlf_line_endings() {
    let result = parse("// #region A\r\nx\r\n// #endregion\r\n");
    assert!(result.is_well_formed());
    assert_eq!(result.regions[0].name, "A");
    assert_eq!(result.regions[0].end.line, 2);
}

#[test]
fn region_range_covers_both_marker_lines() {
    let text = "code\n    // #region A\nbody\n    // #endregion\ntail\n";
    let rope = Rope::from(text);
    let result = parse_regions(&rope, &slashes());

    let range = result.regions[0].range();
    assert_eq!(
        &text[range.start..range.end],
        "    // #region A\nbody\n    // #endregion"
    );
}

#[test]
fn parse_str_matches_parse_regions() {
    let text = "# region A\n# endregion\n";
    let syntax = MarkerSyntax::new("#").unwrap();
    assert_eq!(parse_str(text, &syntax), parse_regions(&Rope::from(text), &syntax));
}

#[test]
fn csharp_style_mixed_syntaxes() {
    let syntax = MarkerSyntax::from_comments([
        CommentSyntax::line("//"),
        CommentSyntax::line("#"),
    ])
    .unwrap();
    let text = "\
#region NativeRegion
    // #region InnerNativeRegion
    // #endregion
#endregion
";
    let result = parse_str(text, &syntax);
    assert!(result.is_well_formed());
    assert_eq!(
        shape(&result.regions),
        vec![(
            "NativeRegion".to_string(),
            vec!["InnerNativeRegion".to_string()]
        )]
    );
}

#[test]
fn cancellable_parse_completes_when_not_cancelled() {
    let rope = Rope::from("// #region A\n// #endregion\n");
    let cancel = AtomicBool::new(false);

    let result = parse_regions_cancellable(&rope, &slashes(), &cancel).unwrap();
    assert_eq!(result, parse_regions(&rope, &slashes()));
}

#[test]
fn cancelled_parse_reports_cancellation_not_diagnostics() {
    let rope = Rope::from("// #region A\n// #endregion\n");
    let cancel = AtomicBool::new(true);

    let err = parse_regions_cancellable(&rope, &slashes(), &cancel).unwrap_err();
    assert_eq!(err, ParseError::Cancelled { line: 0 });
    assert_eq!(err.to_string(), "parse cancelled before line 1");
}

#[test]
fn cancellable_parse_matches_plain_parse_on_malformed_input() {
    let text = "\
// #endregion stray
// #region Outer
    // #region Inner
    // #endregion
// #region
";
    let rope = Rope::from(text);
    let cancel = AtomicBool::new(false);

    let result = parse_regions_cancellable(&rope, &slashes(), &cancel).unwrap();
    assert_eq!(result, parse_regions(&rope, &slashes()));
    assert_eq!(result.diagnostics.len(), 3);
    assert_eq!(shape(&result.regions), vec![("Inner".to_string(), vec![])]);
}
