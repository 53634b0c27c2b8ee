//! # upsheet
//!
//! Convert legacy Excel workbooks (`.xls`, or files with no extension) to
//! the Office Open XML format (`.xlsx`).
//!
//! Every sheet is carried over in order under its own name, with all cell
//! values written as text. Directories can be scanned (optionally
//! recursively) and zip archives extracted and scanned on the way.
//!
//! ## Quick Start
//!
//! ```no_run
//! use upsheet::{convert, walk, BatchOptions, ConvertOptions, NullReporter};
//!
//! // One file, written next to the input as report.xlsx
//! let done = convert("legacy/report.xls", &ConvertOptions::new())?;
//! println!("{} sheets", done.sheets);
//!
//! // A whole tree, outputs collected in one place
//! let options = BatchOptions::new()
//!     .with_recursive(true)
//!     .with_include_zip(true)
//!     .with_output_dir("converted");
//! let summary = walk("legacy", &options, &mut NullReporter);
//! println!("{} converted, {} failed", summary.converted, summary.failed);
//! # Ok::<(), upsheet::Error>(())
//! ```

pub mod archive;
pub mod convert;
pub mod detect;
pub mod dispatch;
pub mod error;
pub mod model;
pub mod reader;
pub mod report;
pub mod walk;
pub mod writer;

// Re-exports
pub use archive::extract_and_process;
pub use convert::{convert, output_path, Conversion, ConvertOptions};
pub use detect::{detect_format_from_bytes, detect_format_from_path, FileKind, SpreadsheetFormat};
pub use dispatch::{resolve_input, InputKind};
pub use error::{Error, Result};
pub use model::{Sheet, Spreadsheet};
pub use reader::{read_spreadsheet, read_spreadsheet_from_bytes};
pub use report::{BatchSummary, NullReporter, Reporter};
pub use walk::{walk, BatchOptions};
pub use writer::{write_spreadsheet, write_spreadsheet_to_bytes};
