//! File classification and spreadsheet format detection.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// ZIP file magic bytes: PK\x03\x04
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// OLE2 compound file signature used by legacy BIFF workbooks.
const OLE_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Content type for XLSX workbook part.
const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";

/// Content type for macro-enabled (XLSM) workbook part.
const XLSM_CONTENT_TYPE: &str = "application/vnd.ms-excel.sheet.macroEnabled.main+xml";

/// How a path is treated when scanning for work, judged by extension only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// A `.zip` archive that may hold more workbooks.
    Archive,
    /// `.xls`, `.xlsx`, or a file without an extension.
    Spreadsheet,
    /// Anything else; never touched.
    Other,
}

impl FileKind {
    /// Classify a path by its extension (case-insensitive).
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let ext = match path.as_ref().extension() {
            Some(ext) => ext.to_string_lossy().to_lowercase(),
            None => return FileKind::Spreadsheet,
        };

        match ext.as_str() {
            "zip" => FileKind::Archive,
            "xls" | "xlsx" => FileKind::Spreadsheet,
            _ => FileKind::Other,
        }
    }
}

/// Detected workbook container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadsheetFormat {
    /// Legacy binary workbook (.xls)
    Xls,
    /// Office Open XML workbook (.xlsx, .xlsm)
    Xlsx,
}

impl SpreadsheetFormat {
    /// Returns a human-readable name for this format.
    pub fn name(&self) -> &'static str {
        match self {
            SpreadsheetFormat::Xls => "Excel 97-2003 Workbook",
            SpreadsheetFormat::Xlsx => "Excel Workbook",
        }
    }
}

impl std::fmt::Display for SpreadsheetFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Detect the workbook format of a file from its content.
///
/// The extension is ignored, so files named `report` or mislabelled
/// `.xls` files holding XLSX data are recognized as what they are.
///
/// # Example
///
/// ```no_run
/// use upsheet::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("legacy/report")?;
/// println!("Detected format: {}", format);
/// # Ok::<(), upsheet::Error>(())
/// ```
pub fn detect_format_from_path(path: impl AsRef<Path>) -> Result<SpreadsheetFormat> {
    let file = File::open(path.as_ref())?;
    detect_format_from_reader(BufReader::new(file))
}

/// Detect the workbook format from a byte slice.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<SpreadsheetFormat> {
    detect_format_from_reader(std::io::Cursor::new(data))
}

/// Detect the workbook format from a reader.
pub fn detect_format_from_reader<R: Read + Seek>(mut reader: R) -> Result<SpreadsheetFormat> {
    let mut header = [0u8; 8];
    let read = read_header(&mut reader, &mut header)?;
    let header = &header[..read];

    if header.starts_with(&OLE_MAGIC) {
        return Ok(SpreadsheetFormat::Xls);
    }
    if !is_zip_file(header) {
        return Err(Error::UnknownFormat);
    }

    reader.seek(SeekFrom::Start(0))?;
    let mut archive = zip::ZipArchive::new(reader)?;

    let content_types = match archive.by_name("[Content_Types].xml") {
        Ok(mut file) => {
            let mut bytes = Vec::new();
            file.read_to_end(&mut bytes)?;
            Some(String::from_utf8_lossy(&bytes).into_owned())
        }
        Err(_) => None,
    };

    if let Some(types) = content_types {
        if types.contains(XLSX_CONTENT_TYPE) || types.contains(XLSM_CONTENT_TYPE) {
            return Ok(SpreadsheetFormat::Xlsx);
        }
    }

    // Fallback: some writers omit or mislabel content types
    if archive.file_names().any(|n| n.starts_with("xl/")) {
        Ok(SpreadsheetFormat::Xlsx)
    } else {
        Err(Error::UnknownFormat)
    }
}

/// Fill `buf` from the start of the reader, stopping early at EOF.
fn read_header<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}

/// Check if data starts with ZIP magic bytes.
pub fn is_zip_file(data: &[u8]) -> bool {
    data.len() >= 4 && data[..4] == ZIP_MAGIC
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn zip_with(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut buffer = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
            let options = SimpleFileOptions::default();
            for (name, content) in entries {
                zip.start_file(*name, options).unwrap();
                zip.write_all(content.as_bytes()).unwrap();
            }
            zip.finish().unwrap();
        }
        buffer
    }

    #[test]
    fn test_file_kind() {
        assert_eq!(FileKind::from_path("a.xls"), FileKind::Spreadsheet);
        assert_eq!(FileKind::from_path("b.XLSX"), FileKind::Spreadsheet);
        assert_eq!(FileKind::from_path("dir/report"), FileKind::Spreadsheet);
        assert_eq!(FileKind::from_path("batch.Zip"), FileKind::Archive);
        assert_eq!(FileKind::from_path("c.txt"), FileKind::Other);
        assert_eq!(FileKind::from_path("d.xlsm"), FileKind::Other);
    }

    #[test]
    fn test_format_name() {
        assert_eq!(SpreadsheetFormat::Xls.to_string(), "Excel 97-2003 Workbook");
        assert_eq!(SpreadsheetFormat::Xlsx.to_string(), "Excel Workbook");
    }

    #[test]
    fn test_is_zip_file() {
        assert!(is_zip_file(&[0x50, 0x4B, 0x03, 0x04, 0x00]));
        assert!(!is_zip_file(&[0x00, 0x00, 0x00, 0x00]));
        assert!(!is_zip_file(&[0x50, 0x4B])); // Too short
    }

    #[test]
    fn test_detect_ole_header() {
        let mut data = OLE_MAGIC.to_vec();
        data.extend_from_slice(&[0u8; 32]);
        assert_eq!(
            detect_format_from_bytes(&data).unwrap(),
            SpreadsheetFormat::Xls
        );
    }

    #[test]
    fn test_detect_xlsx_by_content_type() {
        let types = format!(
            r#"<Types><Override PartName="/xl/workbook.xml" ContentType="{}"/></Types>"#,
            XLSX_CONTENT_TYPE
        );
        let data = zip_with(&[("[Content_Types].xml", &types)]);
        assert_eq!(
            detect_format_from_bytes(&data).unwrap(),
            SpreadsheetFormat::Xlsx
        );
    }

    #[test]
    fn test_detect_xlsx_by_folder() {
        let data = zip_with(&[("xl/workbook.xml", "<workbook/>")]);
        assert_eq!(
            detect_format_from_bytes(&data).unwrap(),
            SpreadsheetFormat::Xlsx
        );
    }

    #[test]
    fn test_detect_plain_zip() {
        let data = zip_with(&[("notes.txt", "hello")]);
        assert!(matches!(
            detect_format_from_bytes(&data),
            Err(Error::UnknownFormat)
        ));
    }

    #[test]
    fn test_detect_invalid_data() {
        assert!(matches!(
            detect_format_from_bytes(b"not a spreadsheet"),
            Err(Error::UnknownFormat)
        ));
        assert!(matches!(
            detect_format_from_bytes(&[]),
            Err(Error::UnknownFormat)
        ));
    }
}
