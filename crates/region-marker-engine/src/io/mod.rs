use std::fs;
use std::path::{Path, PathBuf};

use xi_rope::Rope;

use crate::parsing::{markers::MarkerSyntax, parse_regions, regions::ParseResult};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read a source file into a rope
pub fn read_source(path: &Path) -> Result<Rope, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    Ok(Rope::from(content))
}

/// Read a source file and parse its regions
pub fn parse_file(path: &Path, syntax: &MarkerSyntax) -> Result<ParseResult, IoError> {
    let rope = read_source(path)?;
    log::debug!("parsing regions in {}", path.display());
    Ok(parse_regions(&rope, syntax))
}
