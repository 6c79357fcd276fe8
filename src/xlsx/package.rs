//! Walks the package tree into a ZIP archive

use std::io::{Cursor, Write};

use log::{debug, trace};
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::{CompressionMethod, DateTime};

use super::factory::ElementFactory;
use super::folders::FolderKind;
use super::model::WorksheetData;
use crate::error::Result;

type ArchiveWriter = ZipWriter<Cursor<Vec<u8>>>;

/// Entry options shared by every file and folder.
///
/// The timestamp is pinned to the ZIP epoch so identical input produces
/// identical bytes.
fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(6))
        .last_modified_time(DateTime::default())
}

/// A folder position inside the archive being written
pub struct ArchiveFolder<'a> {
    zip: &'a mut ArchiveWriter,
    prefix: String,
}

impl<'a> ArchiveFolder<'a> {
    fn root(zip: &'a mut ArchiveWriter) -> Self {
        ArchiveFolder {
            zip,
            prefix: String::new(),
        }
    }

    /// Add a child folder entry and return it
    pub fn folder(&mut self, name: &str) -> Result<ArchiveFolder<'_>> {
        let prefix = format!("{}{}/", self.prefix, name);
        self.zip.add_directory(prefix.as_str(), entry_options())?;
        trace!("folder {}", prefix);
        Ok(ArchiveFolder {
            zip: &mut *self.zip,
            prefix,
        })
    }

    /// Write a file entry into this folder
    pub fn write_file(&mut self, name: &str, contents: &[u8]) -> Result<()> {
        let path = format!("{}{}", self.prefix, name);
        self.zip.start_file(path.as_str(), entry_options())?;
        self.zip.write_all(contents)?;
        trace!("part {} ({} bytes)", path, contents.len());
        Ok(())
    }
}

/// Serializes a worksheet model into an XLSX package
#[derive(Default)]
pub struct PackageWriter {
    factory: ElementFactory,
}

impl PackageWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk the tree from the root and return the finished archive
    pub fn write(&mut self, model: &WorksheetData) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        {
            let mut root = ArchiveFolder::root(&mut zip);
            self.walk(FolderKind::Root, &mut root, model)?;
        }
        debug!("package walked, {} nodes built", self.factory.cached());

        let bytes = zip.finish()?.into_inner();
        debug!("archived {} bytes", bytes.len());
        Ok(bytes)
    }

    fn walk(
        &mut self,
        kind: FolderKind,
        archive: &mut ArchiveFolder<'_>,
        model: &WorksheetData,
    ) -> Result<()> {
        let folder = self.factory.folder(kind);

        for child in folder.child_folders(model) {
            let name = self.factory.folder(child).name().to_string();
            let mut sub = archive.folder(&name)?;
            self.walk(child, &mut sub, model)?;
        }

        for file in folder.child_files(model) {
            self.factory.file(file).write_element(archive, model)?;
        }
        Ok(())
    }
}
