//! Per-export cache of package tree nodes

use std::collections::HashMap;
use std::rc::Rc;

use super::files::{ExcelFile, FileKind};
use super::folders::{ExcelFolder, FolderKind};

/// Builds each folder and file node at most once.
///
/// One factory lives for one export; nothing is shared between exports.
#[derive(Default)]
pub struct ElementFactory {
    folders: HashMap<FolderKind, Rc<dyn ExcelFolder>>,
    files: HashMap<FileKind, Rc<dyn ExcelFile>>,
}

impl ElementFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn folder(&mut self, kind: FolderKind) -> Rc<dyn ExcelFolder> {
        Rc::clone(self.folders.entry(kind).or_insert_with(|| kind.create()))
    }

    pub fn file(&mut self, kind: FileKind) -> Rc<dyn ExcelFile> {
        Rc::clone(self.files.entry(kind).or_insert_with(|| kind.create()))
    }

    /// Number of nodes built so far
    pub fn cached(&self) -> usize {
        self.folders.len() + self.files.len()
    }
}
