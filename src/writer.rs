//! XLSX output via rust_xlsxwriter.

use crate::error::{Error, Result};
use crate::model::{Sheet, Spreadsheet};
use rust_xlsxwriter::{Workbook, Worksheet};
use std::path::Path;

/// Write a workbook to `path` as XLSX, one worksheet per sheet.
///
/// Cells are written as text at the positions they occupied in the source.
/// Empty cells are left blank. The file is created or overwritten.
pub fn write_spreadsheet(book: &Spreadsheet, path: impl AsRef<Path>) -> Result<()> {
    let mut workbook = build_workbook(book)?;
    workbook.save(path.as_ref())?;
    Ok(())
}

/// Serialize a workbook to XLSX bytes.
pub fn write_spreadsheet_to_bytes(book: &Spreadsheet) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(book)?;
    Ok(workbook.save_to_buffer()?)
}

fn build_workbook(book: &Spreadsheet) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    for sheet in &book.sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;
        write_cells(worksheet, sheet)?;
    }
    Ok(workbook)
}

fn write_cells(worksheet: &mut Worksheet, sheet: &Sheet) -> Result<()> {
    let (origin_row, origin_col) = sheet.origin;

    for (r, row) in sheet.rows.iter().enumerate() {
        let row_num = offset(origin_row, r)?;
        for (c, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            let col_num = u16::try_from(offset(origin_col, c)?)
                .map_err(|_| out_of_range(&sheet.name, "column"))?;
            worksheet.write_string(row_num, col_num, value.as_str())?;
        }
    }

    Ok(())
}

fn offset(base: u32, index: usize) -> Result<u32> {
    u32::try_from(index)
        .ok()
        .and_then(|i| base.checked_add(i))
        .ok_or_else(|| Error::Write("cell position overflow".to_string()))
}

fn out_of_range(sheet: &str, what: &str) -> Error {
    Error::Write(format!("{} index out of range in sheet '{}'", what, sheet))
}
