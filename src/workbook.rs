//! Workbook I/O shared by the Excel exporters.

use std::path::Path;

use umya_spreadsheet::Spreadsheet;

use crate::core::ExportError;

/// Read a template workbook from disk.
///
/// A missing or corrupt template is fatal; there is no fallback layout.
pub fn read_template(path: &Path) -> Result<Spreadsheet, ExportError> {
    umya_spreadsheet::reader::xlsx::read(path)
        .map_err(|e| ExportError::TemplateLoad(format!("{}: {e}", path.display())))
}

/// Serialize a finished workbook to `path`.
pub fn save(book: &Spreadsheet, path: &Path) -> Result<(), ExportError> {
    umya_spreadsheet::writer::xlsx::write(book, path)
        .map_err(|e| ExportError::OutputWrite(format!("{}: {e}", path.display())))
}
