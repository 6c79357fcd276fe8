//! XLSX package writer
//!
//! The package is a tree of folders and files. Folder nodes decide their
//! children from the worksheet model, file nodes render one XML part each,
//! and [`PackageWriter`] walks the tree into a ZIP archive.

pub mod exporter;
pub mod factory;
pub mod files;
pub mod folders;
pub mod manifest;
pub mod model;
pub mod package;
pub mod shared_strings;
pub mod table;
pub mod templates;
pub mod text_metrics;
pub mod worksheet;
pub mod xml_writer;

pub use exporter::ExcelExporter;
pub use factory::ElementFactory;
pub use files::{ExcelFile, FileKind};
pub use folders::{ExcelFolder, FolderKind};
pub use model::WorksheetData;
pub use package::{ArchiveFolder, PackageWriter};
pub use shared_strings::StringDictionary;
pub use worksheet::column_letter;
