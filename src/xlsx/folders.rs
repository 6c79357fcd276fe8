//! Folder nodes of the package tree
//!
//! A folder only names its children by kind; the factory turns kinds into
//! nodes while the package is walked.

use std::rc::Rc;

use super::files::FileKind;
use super::model::WorksheetData;

/// Every folder a package can contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FolderKind {
    Root,
    RootRels,
    DocProps,
    Xl,
    XlRels,
    Theme,
    Worksheets,
    WorksheetsRels,
    Tables,
}

impl FolderKind {
    /// Build the node for this kind
    pub fn create(self) -> Rc<dyn ExcelFolder> {
        match self {
            FolderKind::Root => Rc::new(FixedFolder::new(
                "",
                &[FolderKind::RootRels, FolderKind::DocProps, FolderKind::Xl],
                &[FileKind::ContentTypes],
            )),
            FolderKind::RootRels => Rc::new(FixedFolder::new("_rels", &[], &[FileKind::RootRels])),
            FolderKind::DocProps => Rc::new(FixedFolder::new(
                "docProps",
                &[],
                &[FileKind::App, FileKind::Core],
            )),
            FolderKind::Xl => Rc::new(XlFolder),
            FolderKind::XlRels => {
                Rc::new(FixedFolder::new("_rels", &[], &[FileKind::WorkbookRels]))
            }
            FolderKind::Theme => Rc::new(FixedFolder::new("theme", &[], &[FileKind::Theme])),
            FolderKind::Worksheets => Rc::new(WorksheetsFolder),
            FolderKind::WorksheetsRels => {
                Rc::new(FixedFolder::new("_rels", &[], &[FileKind::WorksheetRels]))
            }
            FolderKind::Tables => Rc::new(FixedFolder::new("tables", &[], &[FileKind::Table])),
        }
    }
}

/// A folder whose children may depend on the worksheet model
pub trait ExcelFolder {
    /// Folder name, empty for the package root
    fn name(&self) -> &str;

    fn child_folders(&self, model: &WorksheetData) -> Vec<FolderKind>;

    fn child_files(&self, model: &WorksheetData) -> Vec<FileKind>;
}

/// Folder with the same children for every package
#[derive(Debug)]
pub struct FixedFolder {
    name: &'static str,
    folders: &'static [FolderKind],
    files: &'static [FileKind],
}

impl FixedFolder {
    pub fn new(
        name: &'static str,
        folders: &'static [FolderKind],
        files: &'static [FileKind],
    ) -> Self {
        FixedFolder {
            name,
            folders,
            files,
        }
    }
}

impl ExcelFolder for FixedFolder {
    fn name(&self) -> &str {
        self.name
    }

    fn child_folders(&self, _model: &WorksheetData) -> Vec<FolderKind> {
        self.folders.to_vec()
    }

    fn child_files(&self, _model: &WorksheetData) -> Vec<FileKind> {
        self.files.to_vec()
    }
}

/// `xl`
#[derive(Debug)]
pub struct XlFolder;

impl ExcelFolder for XlFolder {
    fn name(&self) -> &str {
        "xl"
    }

    fn child_folders(&self, model: &WorksheetData) -> Vec<FolderKind> {
        let mut folders = vec![
            FolderKind::XlRels,
            FolderKind::Theme,
            FolderKind::Worksheets,
        ];
        if model.has_table() {
            folders.push(FolderKind::Tables);
        }
        folders
    }

    fn child_files(&self, model: &WorksheetData) -> Vec<FileKind> {
        let mut files = vec![FileKind::Styles, FileKind::Workbook];
        if model.has_shared_strings() {
            files.push(FileKind::SharedStrings);
        }
        files
    }
}

/// `xl/worksheets`; its `_rels` folder only exists to point at the table
#[derive(Debug)]
pub struct WorksheetsFolder;

impl ExcelFolder for WorksheetsFolder {
    fn name(&self) -> &str {
        "worksheets"
    }

    fn child_folders(&self, model: &WorksheetData) -> Vec<FolderKind> {
        if model.has_table() {
            vec![FolderKind::WorksheetsRels]
        } else {
            Vec::new()
        }
    }

    fn child_files(&self, _model: &WorksheetData) -> Vec<FileKind> {
        vec![FileKind::Worksheet]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exporter::ExportTable;
    use crate::options::ExportOptions;
    use crate::types::{record, ExportColumn};

    fn full_model() -> WorksheetData {
        let table = ExportTable {
            columns: vec![ExportColumn::new("name", "name")],
            rows: vec![record([("name", "Terrance Orta")])],
            frozen_columns: 0,
        };
        WorksheetData::new(&table, &ExportOptions::xlsx("t"))
    }

    fn empty_model() -> WorksheetData {
        WorksheetData::new(&ExportTable::default(), &ExportOptions::xlsx("t"))
    }

    #[test]
    fn test_xl_children_depend_on_data() {
        let xl = FolderKind::Xl.create();
        assert_eq!(
            xl.child_folders(&full_model()),
            vec![
                FolderKind::XlRels,
                FolderKind::Theme,
                FolderKind::Worksheets,
                FolderKind::Tables
            ]
        );
        assert_eq!(
            xl.child_files(&full_model()),
            vec![FileKind::Styles, FileKind::Workbook, FileKind::SharedStrings]
        );

        assert!(!xl.child_folders(&empty_model()).contains(&FolderKind::Tables));
        assert!(!xl.child_files(&empty_model()).contains(&FileKind::SharedStrings));
    }

    #[test]
    fn test_worksheet_rels_only_with_table() {
        let worksheets = FolderKind::Worksheets.create();
        assert_eq!(
            worksheets.child_folders(&full_model()),
            vec![FolderKind::WorksheetsRels]
        );
        assert!(worksheets.child_folders(&empty_model()).is_empty());
    }

    #[test]
    fn test_root_layout() {
        let root = FolderKind::Root.create();
        assert_eq!(root.name(), "");
        assert_eq!(
            root.child_folders(&empty_model()),
            vec![FolderKind::RootRels, FolderKind::DocProps, FolderKind::Xl]
        );
        assert_eq!(root.child_files(&empty_model()), vec![FileKind::ContentTypes]);
    }
}
