//! File nodes of the package tree

use std::rc::Rc;

use super::manifest::{render_content_types, render_workbook_rels};
use super::model::WorksheetData;
use super::package::ArchiveFolder;
use super::shared_strings::render_shared_strings;
use super::table::render_table;
use super::templates;
use super::worksheet::render_worksheet;
use super::xml_writer::XML_DECLARATION;
use crate::error::Result;

/// Every file a package can contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    ContentTypes,
    RootRels,
    App,
    Core,
    WorkbookRels,
    Theme,
    Worksheet,
    WorksheetRels,
    Table,
    Styles,
    Workbook,
    SharedStrings,
}

impl FileKind {
    /// File name inside its folder
    pub fn file_name(self) -> &'static str {
        match self {
            FileKind::ContentTypes => "[Content_Types].xml",
            FileKind::RootRels => ".rels",
            FileKind::App => "app.xml",
            FileKind::Core => "core.xml",
            FileKind::WorkbookRels => "workbook.xml.rels",
            FileKind::Theme => "theme1.xml",
            FileKind::Worksheet => "sheet1.xml",
            FileKind::WorksheetRels => "sheet1.xml.rels",
            FileKind::Table => "table1.xml",
            FileKind::Styles => "styles.xml",
            FileKind::Workbook => "workbook.xml",
            FileKind::SharedStrings => "sharedStrings.xml",
        }
    }

    /// Build the node for this kind
    pub fn create(self) -> Rc<dyn ExcelFile> {
        let name = self.file_name();
        match self {
            FileKind::RootRels => Rc::new(StaticFile::new(name, templates::ROOT_RELS)),
            FileKind::App => Rc::new(StaticFile::new(name, templates::APP)),
            FileKind::Core => Rc::new(StaticFile::new(name, templates::CORE)),
            FileKind::Theme => Rc::new(StaticFile::new(name, templates::THEME)),
            FileKind::Styles => Rc::new(StaticFile::new(name, templates::STYLES)),
            FileKind::Workbook => Rc::new(StaticFile::new(name, templates::WORKBOOK)),
            FileKind::WorksheetRels => {
                Rc::new(StaticFile::new(name, templates::WORKSHEET_RELS))
            }
            FileKind::ContentTypes => Rc::new(RenderedFile::new(name, render_content_types)),
            FileKind::WorkbookRels => Rc::new(RenderedFile::new(name, render_workbook_rels)),
            FileKind::Worksheet => Rc::new(RenderedFile::new(name, render_worksheet)),
            FileKind::Table => Rc::new(RenderedFile::new(name, render_table)),
            FileKind::SharedStrings => Rc::new(RenderedFile::new(name, render_shared_strings)),
        }
    }
}

/// A file that writes itself into an archive folder
pub trait ExcelFile {
    fn write_element(&self, folder: &mut ArchiveFolder<'_>, model: &WorksheetData) -> Result<()>;
}

/// Part with a fixed body
#[derive(Debug)]
pub struct StaticFile {
    name: &'static str,
    body: &'static str,
}

impl StaticFile {
    pub fn new(name: &'static str, body: &'static str) -> Self {
        StaticFile { name, body }
    }
}

impl ExcelFile for StaticFile {
    fn write_element(&self, folder: &mut ArchiveFolder<'_>, _model: &WorksheetData) -> Result<()> {
        let mut contents = String::with_capacity(XML_DECLARATION.len() + self.body.len());
        contents.push_str(XML_DECLARATION);
        contents.push_str(self.body);
        folder.write_file(self.name, contents.as_bytes())
    }
}

type Renderer = fn(&WorksheetData) -> Result<String>;

/// Part rendered from the worksheet model
pub struct RenderedFile {
    name: &'static str,
    render: Renderer,
}

impl RenderedFile {
    pub fn new(name: &'static str, render: Renderer) -> Self {
        RenderedFile { name, render }
    }
}

impl ExcelFile for RenderedFile {
    fn write_element(&self, folder: &mut ArchiveFolder<'_>, model: &WorksheetData) -> Result<()> {
        let contents = (self.render)(model)?;
        folder.write_file(self.name, contents.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        assert_eq!(FileKind::ContentTypes.file_name(), "[Content_Types].xml");
        assert_eq!(FileKind::RootRels.file_name(), ".rels");
        assert_eq!(FileKind::WorksheetRels.file_name(), "sheet1.xml.rels");
    }
}
