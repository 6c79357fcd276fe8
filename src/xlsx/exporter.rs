//! Excel export entry point

use log::debug;

use super::model::WorksheetData;
use super::package::PackageWriter;
use crate::error::{ExportError, Result};
use crate::events::ExportEvents;
use crate::exporter::{prepare_data, prepare_grid, ExportSaver, ExportTable, ExportedFile, GridSource};
use crate::options::{ExportFormat, ExportOptions};
use crate::types::RowData;

/// Exports grids and plain data as XLSX packages.
///
/// Each call builds its own model and node cache, so one exporter can run
/// any number of exports.
///
/// # Examples
///
/// ```
/// use gridexport::{record, ExcelExporter, ExportOptions, RowData};
///
/// let data: Vec<RowData> = vec![
///     record([("name", "Terrance Orta"), ("phone", "770-504-2217")]).into(),
/// ];
/// let mut exporter = ExcelExporter::new();
/// let file = exporter.export_data(&data, &ExportOptions::xlsx("Contacts"))?;
/// assert_eq!(file.file_name, "Contacts.xlsx");
/// # Ok::<(), gridexport::ExportError>(())
/// ```
#[derive(Debug, Default)]
pub struct ExcelExporter<'a> {
    events: ExportEvents<'a>,
}

impl<'a> ExcelExporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handlers fired while columns and rows are resolved
    pub fn events(&mut self) -> &mut ExportEvents<'a> {
        &mut self.events
    }

    /// Export what the grid currently shows
    pub fn export_grid(
        &mut self,
        source: &GridSource,
        options: &ExportOptions,
    ) -> Result<ExportedFile> {
        check_format(options)?;
        let table = prepare_grid(source, options, &mut self.events)?;
        build_package(&table, options)
    }

    /// Export plain records or scalars
    pub fn export_data(&mut self, data: &[RowData], options: &ExportOptions) -> Result<ExportedFile> {
        check_format(options)?;
        let table = prepare_data(data, options, &mut self.events)?;
        build_package(&table, options)
    }

    /// [`export_grid`](Self::export_grid), then save the package
    pub fn export_grid_to<S: ExportSaver + ?Sized>(
        &mut self,
        source: &GridSource,
        options: &ExportOptions,
        saver: &mut S,
    ) -> Result<ExportedFile> {
        let file = self.export_grid(source, options)?;
        file.save_to(saver)?;
        Ok(file)
    }

    /// [`export_data`](Self::export_data), then save the package
    pub fn export_data_to<S: ExportSaver + ?Sized>(
        &mut self,
        data: &[RowData],
        options: &ExportOptions,
        saver: &mut S,
    ) -> Result<ExportedFile> {
        let file = self.export_data(data, options)?;
        file.save_to(saver)?;
        Ok(file)
    }
}

fn check_format(options: &ExportOptions) -> Result<()> {
    if options.format != ExportFormat::Xlsx {
        return Err(ExportError::InvalidOption(format!(
            "the Excel exporter cannot write {:?}",
            options.format
        )));
    }
    Ok(())
}

fn build_package(table: &ExportTable, options: &ExportOptions) -> Result<ExportedFile> {
    let model = WorksheetData::new(table, options);
    let bytes = PackageWriter::new().write(&model)?;
    let file_name = options.file_name();
    debug!("excel export {} finished", file_name);
    Ok(ExportedFile { file_name, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exporter::MemorySaver;
    use crate::types::record;

    #[test]
    fn test_rejects_csv_format() {
        let err = ExcelExporter::new()
            .export_data(&[], &ExportOptions::csv("t"))
            .unwrap_err();
        assert!(matches!(err, ExportError::InvalidOption(_)));
    }

    #[test]
    fn test_export_to_saver() {
        let data: Vec<RowData> = vec![record([("name", "Terrance Orta")]).into()];
        let mut saver = MemorySaver::new();
        let file = ExcelExporter::new()
            .export_data_to(&data, &ExportOptions::xlsx("People"), &mut saver)
            .unwrap();
        assert_eq!(saver.files.len(), 1);
        assert_eq!(saver.files[0].0, "People.xlsx");
        assert_eq!(saver.files[0].1, file.bytes);
        assert_eq!(&file.bytes[..2], b"PK");
    }
}
