//! Synchronous "about to export" callbacks
//!
//! Handlers run inline while columns and rows are resolved. A handler may
//! set `cancel` (and, for columns, rename the header) before the exporter
//! reads the arguments back.

use crate::types::RowData;

/// Arguments passed to the column handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnExportingEventArgs {
    pub header: String,
    pub field: String,
    /// Position of the column in the resolved column list
    pub column_index: usize,
    pub cancel: bool,
}

/// Arguments passed to the row handler
#[derive(Debug, Clone, PartialEq)]
pub struct RowExportingEventArgs {
    pub row_data: RowData,
    /// Position of the row after filtering and sorting
    pub row_index: usize,
    pub cancel: bool,
}

type ColumnHandler<'a> = Box<dyn FnMut(&mut ColumnExportingEventArgs) + 'a>;
type RowHandler<'a> = Box<dyn FnMut(&mut RowExportingEventArgs) + 'a>;

/// Per-exporter set of handlers
#[derive(Default)]
pub struct ExportEvents<'a> {
    column_exporting: Option<ColumnHandler<'a>>,
    row_exporting: Option<RowHandler<'a>>,
}

impl<'a> ExportEvents<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the column handler, replacing any previous one
    pub fn on_column_export<F>(&mut self, handler: F)
    where
        F: FnMut(&mut ColumnExportingEventArgs) + 'a,
    {
        self.column_exporting = Some(Box::new(handler));
    }

    /// Install the row handler, replacing any previous one
    pub fn on_row_export<F>(&mut self, handler: F)
    where
        F: FnMut(&mut RowExportingEventArgs) + 'a,
    {
        self.row_exporting = Some(Box::new(handler));
    }

    pub(crate) fn emit_column(&mut self, args: &mut ColumnExportingEventArgs) {
        if let Some(handler) = self.column_exporting.as_mut() {
            handler(args);
        }
    }

    pub(crate) fn emit_row(&mut self, args: &mut RowExportingEventArgs) {
        if let Some(handler) = self.row_exporting.as_mut() {
            handler(args);
        }
    }
}

impl std::fmt::Debug for ExportEvents<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportEvents")
            .field("column_exporting", &self.column_exporting.is_some())
            .field("row_exporting", &self.row_exporting.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellValue;

    #[test]
    fn test_handler_can_cancel() {
        let mut seen = Vec::new();
        {
            let mut events = ExportEvents::new();
            events.on_column_export(|args| {
                seen.push(args.column_index);
                args.cancel = args.field == "ID";
            });

            let mut args = ColumnExportingEventArgs {
                header: "ID".to_string(),
                field: "ID".to_string(),
                column_index: 0,
                cancel: false,
            };
            events.emit_column(&mut args);
            assert!(args.cancel);
        }
        assert_eq!(seen, vec![0]);
    }

    #[test]
    fn test_no_handler_is_noop() {
        let mut events = ExportEvents::new();
        let mut args = RowExportingEventArgs {
            row_data: RowData::Scalar(CellValue::Int(1)),
            row_index: 3,
            cancel: false,
        };
        events.emit_row(&mut args);
        assert!(!args.cancel);
        assert_eq!(args.row_index, 3);
    }
}
