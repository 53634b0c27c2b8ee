//! Error types for the upsheet library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for upsheet operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting workbooks.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input path does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file content is not a recognizable spreadsheet.
    #[error("Unknown file format")]
    UnknownFormat,

    /// The input is of a kind that cannot be processed.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A zip archive was given but archive processing is disabled.
    #[error("{} is a zip archive; pass --include-zip to process it", .0.display())]
    ArchiveDisabled(PathBuf),

    /// Error reading the source workbook.
    #[error("Read error: {0}")]
    Read(String),

    /// Error writing the destination workbook.
    #[error("Write error: {0}")]
    Write(String),

    /// Error reading ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error while enumerating a directory.
    #[error("Directory walk error: {0}")]
    Walk(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<calamine::Error> for Error {
    fn from(err: calamine::Error) -> Self {
        Error::Read(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for Error {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Error::Write(err.to_string())
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::Walk(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownFormat;
        assert_eq!(err.to_string(), "Unknown file format");

        let err = Error::NotFound(PathBuf::from("missing.xls"));
        assert_eq!(err.to_string(), "File not found: missing.xls");

        let err = Error::ArchiveDisabled(PathBuf::from("batch.zip"));
        assert_eq!(
            err.to_string(),
            "batch.zip is a zip archive; pass --include-zip to process it"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
