//! Single-file conversion.

use crate::error::{Error, Result};
use crate::reader::read_spreadsheet;
use crate::writer::write_spreadsheet;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension given to every output file.
pub const OUTPUT_EXTENSION: &str = "xlsx";

/// Where and under what name a conversion writes its output.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Output base name, replacing the input's file stem
    pub rename: Option<String>,
    /// Output directory, replacing the input's parent (created if missing)
    pub output_dir: Option<PathBuf>,
}

impl ConvertOptions {
    /// Create default options: same name, same directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output base name.
    pub fn with_rename(mut self, name: impl Into<String>) -> Self {
        self.rename = Some(name.into());
        self
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }
}

/// A completed conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// Source workbook
    pub input: PathBuf,
    /// Written XLSX file
    pub output: PathBuf,
    /// Number of sheets written
    pub sheets: usize,
}

/// Compute the output path for `input` under `options`.
///
/// `report.xls` becomes `report.xlsx`, `report` becomes `report.xlsx`, and a
/// rename replaces the base name entirely.
pub fn output_path(input: &Path, options: &ConvertOptions) -> Result<PathBuf> {
    let base = match &options.rename {
        Some(name) => name.clone(),
        None => input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .ok_or_else(|| {
                Error::UnsupportedFormat(format!("no file name in {}", input.display()))
            })?,
    };

    let dir = match &options.output_dir {
        Some(dir) => dir.clone(),
        None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
    };

    Ok(dir.join(format!("{}.{}", base, OUTPUT_EXTENSION)))
}

/// Convert one workbook to XLSX.
///
/// The whole workbook is read before anything is written, so a file that
/// fails to parse leaves no trace in the output location.
///
/// # Example
///
/// ```no_run
/// use upsheet::{convert, ConvertOptions};
///
/// let done = convert("legacy/report.xls", &ConvertOptions::new().with_rename("summary"))?;
/// println!("{} -> {} ({} sheets)", done.input.display(), done.output.display(), done.sheets);
/// # Ok::<(), upsheet::Error>(())
/// ```
pub fn convert(input: impl AsRef<Path>, options: &ConvertOptions) -> Result<Conversion> {
    let input = input.as_ref();
    if !input.exists() {
        return Err(Error::NotFound(input.to_path_buf()));
    }

    let output = output_path(input, options)?;
    let book = read_spreadsheet(input)?;

    if let Some(dir) = &options.output_dir {
        fs::create_dir_all(dir)?;
    }
    write_spreadsheet(&book, &output)?;

    Ok(Conversion {
        input: input.to_path_buf(),
        output,
        sheets: book.sheet_count(),
    })
}
