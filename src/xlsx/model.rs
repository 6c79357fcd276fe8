//! Immutable worksheet model built once per export

use log::debug;

use super::shared_strings::StringDictionary;
use crate::exporter::{field_text, ExportTable};
use crate::options::ExportOptions;

/// Width used when no better width is known, in character units
pub const MIN_COLUMN_WIDTH: f64 = 8.43;

/// One worksheet worth of interned cells.
///
/// Row 0 is the header row. Every cell holds a shared-string index, stored
/// flat at `row * column_count + column`.
#[derive(Debug, Clone)]
pub struct WorksheetData {
    column_count: usize,
    row_count: usize,
    keys: Vec<String>,
    headers: Vec<String>,
    values: Vec<u32>,
    dictionary: StringDictionary,
    column_width: Option<f64>,
    row_height: Option<f64>,
    frozen_columns: usize,
}

impl WorksheetData {
    /// Intern every header and cell of `table`
    pub fn new(table: &ExportTable, options: &ExportOptions) -> Self {
        let mut dictionary = if options.column_width.is_none() {
            StringDictionary::with_width_tracking()
        } else {
            StringDictionary::new()
        };

        let (keys, headers): (Vec<String>, Vec<String>) = table
            .active_columns()
            .map(|c| (c.field.clone(), c.header.clone()))
            .unzip();

        if table.rows.is_empty() || keys.is_empty() {
            debug!("worksheet model is empty");
            return WorksheetData {
                column_count: 0,
                row_count: 0,
                keys: Vec::new(),
                headers: Vec::new(),
                values: Vec::new(),
                dictionary,
                column_width: options.column_width,
                row_height: options.row_height,
                frozen_columns: 0,
            };
        }

        let column_count = keys.len();
        let row_count = table.rows.len() + 1;
        let mut values = Vec::with_capacity(column_count * row_count);

        for (col, header) in headers.iter().enumerate() {
            values.push(dictionary.interned_index(header));
            dictionary.observe_width(header, col);
        }
        for record in &table.rows {
            for (col, key) in keys.iter().enumerate() {
                let text = field_text(record, key);
                values.push(dictionary.interned_index(&text));
                dictionary.observe_width(&text, col);
            }
        }

        debug!(
            "worksheet model built: {} x {} cells, {} unique strings",
            column_count,
            row_count,
            dictionary.count()
        );

        WorksheetData {
            column_count,
            row_count,
            keys,
            headers,
            values,
            dictionary,
            column_width: options.column_width,
            row_height: options.row_height,
            frozen_columns: table.frozen_columns.min(column_count),
        }
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Data rows plus the header row
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Column fields in output order
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Header text in output order, unescaped
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn dictionary(&self) -> &StringDictionary {
        &self.dictionary
    }

    /// Shared-string index of a cell
    #[inline]
    pub fn cell_index(&self, row: usize, col: usize) -> u32 {
        self.values[row * self.column_count + col]
    }

    /// Total number of cell references, duplicates included
    pub fn cell_count(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.column_count == 0
    }

    /// Whether the package carries `xl/sharedStrings.xml`
    pub fn has_shared_strings(&self) -> bool {
        !self.is_empty()
    }

    /// Whether the package carries `xl/tables/table1.xml`
    pub fn has_table(&self) -> bool {
        !self.is_empty()
    }

    /// Leading columns covered by the freeze pane
    pub fn frozen_columns(&self) -> usize {
        self.frozen_columns
    }

    /// Width written for `column`
    pub fn column_width(&self, column: usize) -> f64 {
        match self.column_width {
            Some(width) if width > 0.0 => width,
            Some(_) => MIN_COLUMN_WIDTH,
            None => {
                let px = self.dictionary.column_width(column).unwrap_or(0.0);
                (px / 96.0 * 14.4).max(MIN_COLUMN_WIDTH)
            }
        }
    }

    /// Custom height written on every row, if any
    pub fn row_height(&self) -> Option<f64> {
        self.row_height.filter(|h| *h > 0.0)
    }
}
