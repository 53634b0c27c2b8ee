//! Workbook reading via calamine.
//!
//! The container format is sniffed from the file content rather than the
//! extension, then every sheet is loaded with all cells coerced to text.

use crate::detect::{detect_format_from_reader, SpreadsheetFormat};
use crate::error::{Error, Result};
use crate::model::{Sheet, Spreadsheet};
use calamine::{Data, DataType, Range, Reader, Sheets, Xls, Xlsx};
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::Path;

/// Read every sheet of a workbook file.
///
/// # Example
///
/// ```no_run
/// use upsheet::reader::read_spreadsheet;
///
/// let book = read_spreadsheet("legacy/report.xls")?;
/// for sheet in &book.sheets {
///     println!("{}: {} rows", sheet.name, sheet.rows.len());
/// }
/// # Ok::<(), upsheet::Error>(())
/// ```
pub fn read_spreadsheet(path: impl AsRef<Path>) -> Result<Spreadsheet> {
    let file = File::open(path.as_ref())?;
    read_from_reader(BufReader::new(file))
}

/// Read every sheet of a workbook held in memory.
pub fn read_spreadsheet_from_bytes(data: Vec<u8>) -> Result<Spreadsheet> {
    read_from_reader(Cursor::new(data))
}

fn read_from_reader<R: Read + Seek>(mut reader: R) -> Result<Spreadsheet> {
    let format = detect_format_from_reader(&mut reader)?;
    reader.seek(SeekFrom::Start(0))?;

    let mut workbook: Sheets<R> = match format {
        SpreadsheetFormat::Xls => {
            Sheets::Xls(Xls::new(reader).map_err(|e| open_error(format, e))?)
        }
        SpreadsheetFormat::Xlsx => {
            Sheets::Xlsx(Xlsx::new(reader).map_err(|e| open_error(format, e))?)
        }
    };

    let mut book = Spreadsheet::new();
    for name in workbook.sheet_names() {
        let range = workbook.worksheet_range(&name)?;
        book.add_sheet(sheet_from_range(name, &range));
    }

    Ok(book)
}

fn open_error(format: SpreadsheetFormat, err: impl std::fmt::Display) -> Error {
    Error::Read(format!("cannot open as {}: {}", format, err))
}

/// Convert a calamine range into a text sheet, keeping its position.
fn sheet_from_range(name: String, range: &Range<Data>) -> Sheet {
    let (row, col) = range.start().unwrap_or((0, 0));
    let mut sheet = Sheet::new(name).with_origin(row, col);

    for cells in range.rows() {
        sheet.push_row(cells.iter().map(cell_text));
    }

    sheet
}

/// Text form of a single cell value.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Bool(true) => "TRUE".to_string(),
        Data::Bool(false) => "FALSE".to_string(),
        // Serials below one carry no date part
        Data::DateTime(dt) if !dt.is_duration() && dt.as_f64() < 1.0 => {
            match cell.as_datetime() {
                Some(value) => value.time().to_string(),
                None => dt.as_f64().to_string(),
            }
        }
        Data::DateTime(dt) => match cell.as_datetime() {
            // `YYYY-MM-DD HH:MM:SS`
            Some(value) => value.to_string(),
            None => dt.as_f64().to_string(),
        },
        // Strings, numbers, ISO dates and error literals render as-is
        other => other.to_string(),
    }
}
