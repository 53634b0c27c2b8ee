//! Deciding what to do with a user-supplied input path.

use crate::detect::FileKind;
use crate::error::{Error, Result};
use std::path::Path;

/// What an input path is to be treated as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// A single workbook to convert.
    Spreadsheet,
    /// A zip archive to extract and scan.
    Archive,
    /// A directory to walk.
    Directory,
}

/// Classify `path` for processing.
///
/// Nothing is read or written; failures mean no work should be done.
pub fn resolve_input(path: impl AsRef<Path>, include_zip: bool) -> Result<InputKind> {
    let path = path.as_ref();

    if path.is_dir() {
        return Ok(InputKind::Directory);
    }
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(Error::UnsupportedFormat(format!(
            "{} is not a regular file",
            path.display()
        )));
    }

    match FileKind::from_path(path) {
        FileKind::Archive if include_zip => Ok(InputKind::Archive),
        FileKind::Archive => Err(Error::ArchiveDisabled(path.to_path_buf())),
        FileKind::Spreadsheet => Ok(InputKind::Spreadsheet),
        FileKind::Other => Err(Error::UnsupportedFormat(format!(
            "{} is not an .xls, .xlsx, extension-less, or .zip file",
            path.display()
        ))),
    }
}
