//! # gridexport
//!
//! Export tabular grid data to Excel (XLSX) packages and CSV/TSV/TAB text.
//!
//! ## Features
//!
//! - **Grid aware**: honors hidden, reordered and pinned columns, filtering and sorting
//! - **Cancellable**: per-column and per-row callbacks can drop or rename what gets exported
//! - **Shared strings**: every distinct cell text is stored once in the workbook
//! - **Deterministic**: identical input produces byte-identical packages
//! - **Auto sizing**: column widths follow the widest text unless a width is given
//!
//! ## Quick Start
//!
//! ### Exporting a grid to Excel
//!
//! ```rust
//! use gridexport::{record, CellValue, ColumnDescriptor, ExcelExporter, ExportOptions, GridSource, RowData};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let columns = vec![
//!     ColumnDescriptor::new("ID", 0).pinned(),
//!     ColumnDescriptor::new("Name", 1).with_header("Full name"),
//!     ColumnDescriptor::new("Salary", 2).hidden(),
//! ];
//! let rows: Vec<RowData> = vec![
//!     record([("ID", CellValue::Int(1)), ("Name", "Casey Houston".into()), ("Salary", CellValue::Int(70000))]).into(),
//!     record([("ID", CellValue::Int(2)), ("Name", "Gilberto Todd".into()), ("Salary", CellValue::Int(65000))]).into(),
//! ];
//!
//! let mut exporter = ExcelExporter::new();
//! exporter.events().on_row_export(|args| args.cancel = args.row_index == 1);
//!
//! let file = exporter.export_grid(&GridSource::new(columns, rows), &ExportOptions::xlsx("Employees"))?;
//! assert_eq!(file.file_name, "Employees.xlsx");
//! # Ok(())
//! # }
//! ```
//!
//! ### Exporting plain data to CSV
//!
//! ```rust,no_run
//! use gridexport::{record, CsvExporter, DirectorySaver, ExportOptions, RowData};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data: Vec<RowData> = vec![
//!     record([("name", "Terrance Orta"), ("phone", "770-504-2217")]).into(),
//! ];
//! let mut saver = DirectorySaver::new("exports");
//! CsvExporter::new().export_data_to(&data, &ExportOptions::csv("Contacts"), &mut saver)?;
//! # Ok(())
//! # }
//! ```

pub mod csv;
pub mod error;
pub mod events;
pub mod exporter;
pub mod options;
pub mod types;
pub mod xlsx;

pub use csv::CsvExporter;
pub use error::{ExportError, Result};
pub use events::{ColumnExportingEventArgs, ExportEvents, RowExportingEventArgs};
pub use exporter::{DirectorySaver, ExportSaver, ExportedFile, GridSource, MemorySaver};
pub use options::{ExportFormat, ExportOptions, ExportOptionsBuilder};
pub use types::{
    record, CellValue, ColumnDescriptor, Record, RowData, SortDirection, SortExpression,
};
pub use xlsx::ExcelExporter;
