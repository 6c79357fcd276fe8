//! CSV, TSV and TAB export
//!
//! One header line, then one line per row. Every line ends with CRLF.

use std::borrow::Cow;

use log::debug;

use crate::error::{ExportError, Result};
use crate::events::ExportEvents;
use crate::exporter::{
    field_text, prepare_data, prepare_grid, ExportSaver, ExportTable, ExportedFile, GridSource,
};
use crate::options::{ExportFormat, ExportOptions};
use crate::types::RowData;

const LINE_END: &str = "\r\n";

/// Exports grids and plain data as delimiter separated text.
///
/// # Examples
///
/// ```
/// use gridexport::{record, CsvExporter, ExportOptions, RowData};
///
/// let data: Vec<RowData> = vec![
///     record([("name", "Terrance Orta"), ("phone", "770-504-2217")]).into(),
/// ];
/// let file = CsvExporter::new().export_data(&data, &ExportOptions::csv("Contacts"))?;
/// assert_eq!(file.file_name, "Contacts.csv");
/// assert_eq!(file.bytes, b"name,phone\r\nTerrance Orta,770-504-2217\r\n");
/// # Ok::<(), gridexport::ExportError>(())
/// ```
#[derive(Debug, Default)]
pub struct CsvExporter<'a> {
    events: ExportEvents<'a>,
}

impl<'a> CsvExporter<'a> {
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
        Ok(build_file(&table, options))
    }

    /// Export plain records or scalars
    pub fn export_data(&mut self, data: &[RowData], options: &ExportOptions) -> Result<ExportedFile> {
        check_format(options)?;
        let table = prepare_data(data, options, &mut self.events)?;
        Ok(build_file(&table, options))
    }

    /// [`export_grid`](Self::export_grid), then save the text
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

    /// [`export_data`](Self::export_data), then save the text
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
    if options.format == ExportFormat::Xlsx {
        return Err(ExportError::InvalidOption(
            "the CSV exporter cannot write Xlsx".to_string(),
        ));
    }
    Ok(())
}

fn build_file(table: &ExportTable, options: &ExportOptions) -> ExportedFile {
    let text = render_csv(table, options.delimiter());
    let file_name = options.file_name();
    debug!("csv export {} finished, {} bytes", file_name, text.len());
    ExportedFile {
        file_name,
        bytes: text.into_bytes(),
    }
}

/// Render a resolved table; an empty table renders as an empty string
pub fn render_csv(table: &ExportTable, delimiter: &str) -> String {
    if table.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    let headers: Vec<Cow<'_, str>> = table
        .active_columns()
        .map(|c| escape_field(&c.header, delimiter))
        .collect();
    out.push_str(&headers.join(delimiter));
    out.push_str(LINE_END);

    let fields: Vec<&str> = table.active_columns().map(|c| c.field.as_str()).collect();
    for record in &table.rows {
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                out.push_str(delimiter);
            }
            let text = field_text(record, field);
            out.push_str(&escape_field(&text, delimiter));
        }
        out.push_str(LINE_END);
    }
    out
}

/// Quote a field that contains the delimiter, CR or LF, or starts with a quote
pub fn escape_field<'v>(value: &'v str, delimiter: &str) -> Cow<'v, str> {
    let needs_quotes = value.contains(delimiter)
        || value.contains(['\r', '\n'])
        || value.starts_with('"');
    if !needs_quotes {
        return Cow::Borrowed(value);
    }
    Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
}
