use anyhow::{Context, Result};
use region_marker_config::{Config, LanguageConfig};
use region_marker_engine::{
    CommentSyntax, Diagnostic, MarkerSyntax, ParseResult, Region, flatten_regions,
};
use std::path::Path;

use crate::args::CliArgs;

/// Picks the comment syntax: `--prefix`, then `--language`, then the file name.
///
/// The config is only loaded when no prefix was given.
pub fn resolve_syntax<F>(args: &CliArgs, load_config: F) -> Result<MarkerSyntax>
where
    F: FnOnce() -> Result<Config>,
{
    if let Some(prefix) = &args.prefix {
        return MarkerSyntax::new(prefix.clone())
            .with_context(|| format!("Invalid comment prefix {prefix:?}"));
    }

    let config = load_config()?;
    let language = match &args.language {
        Some(name) => config
            .language(name)
            .with_context(|| format!("Unknown language '{name}'"))?,
        None => {
            config
                .language_for_path(&args.file)?
                .with_context(|| {
                    format!(
                        "No language configured for '{}'; pass --language or --prefix",
                        args.file.display()
                    )
                })?
                .1
        }
    };

    syntax_for_language(language)
}

pub fn syntax_for_language(language: &LanguageConfig) -> Result<MarkerSyntax> {
    let comments = language.comments.iter().map(|c| CommentSyntax {
        prefix: c.prefix.clone(),
        suffix: c.suffix.clone(),
    });
    Ok(MarkerSyntax::from_comments(comments)?)
}

/// One line per region, indented by depth, with 1-based line ranges.
pub fn outline_lines(regions: &[Region]) -> Vec<String> {
    flatten_regions(regions)
        .regions
        .iter()
        .map(|f| format!("{}{}", "  ".repeat(f.depth), region_label(f.region)))
        .collect()
}

pub fn region_label(region: &Region) -> String {
    format!(
        "{} (lines {}-{})",
        region.display_name(),
        region.start.line + 1,
        region.end.line + 1
    )
}

pub fn diagnostic_line(path: &Path, diagnostic: &Diagnostic) -> String {
    format!("warning: {}:{diagnostic}", path.display())
}

/// Full plain-text report: outline, then a blank line and diagnostics if any.
pub fn report(path: &Path, result: &ParseResult) -> Vec<String> {
    let mut lines = outline_lines(&result.regions);
    if lines.is_empty() {
        lines.push(format!("No regions in {}", path.display()));
    }
    if !result.diagnostics.is_empty() {
        lines.push(String::new());
        lines.extend(
            result
                .diagnostics
                .iter()
                .map(|d| diagnostic_line(path, d)),
        );
    }
    lines
}
