//! Shared strings table: string interning and the `sharedStrings.xml` part

use std::collections::HashMap;

use super::model::WorksheetData;
use super::text_metrics::text_width_px;
use super::xml_writer::{escape_xml, render_part};
use crate::error::Result;

/// Interns cell text into dense indices in first-seen order.
///
/// Keys are the XML-escaped form of the text; column widths are measured on
/// the unescaped text.
#[derive(Debug, Clone, Default)]
pub struct StringDictionary {
    strings: Vec<String>,
    string_map: HashMap<String, u32>,
    column_widths: Option<Vec<f64>>,
}

impl StringDictionary {
    /// Dictionary without width tracking
    pub fn new() -> Self {
        Self::default()
    }

    /// Dictionary that records the widest rendered text per column
    pub fn with_width_tracking() -> Self {
        StringDictionary {
            column_widths: Some(Vec::new()),
            ..Self::default()
        }
    }

    /// Index of `raw`, assigning the next one if its escaped form is new
    pub fn interned_index(&mut self, raw: &str) -> u32 {
        let sanitized = escape_xml(raw);
        if let Some(&index) = self.string_map.get(&sanitized) {
            return index;
        }

        let index = self.strings.len() as u32;
        self.strings.push(sanitized.clone());
        self.string_map.insert(sanitized, index);
        index
    }

    /// Keep the running maximum width of `column`; no-op when tracking is off
    pub fn observe_width(&mut self, raw: &str, column: usize) {
        if let Some(widths) = self.column_widths.as_mut() {
            if widths.len() <= column {
                widths.resize(column + 1, 0.0);
            }
            let width = text_width_px(raw);
            if width > widths[column] {
                widths[column] = width;
            }
        }
    }

    /// Widest rendered text seen in `column`, in pixels
    pub fn column_width(&self, column: usize) -> Option<f64> {
        self.column_widths
            .as_ref()
            .map(|w| w.get(column).copied().unwrap_or(0.0))
    }

    pub fn tracks_widths(&self) -> bool {
        self.column_widths.is_some()
    }

    /// Escaped strings in index order
    pub fn sorted_values(&self) -> &[String] {
        &self.strings
    }

    /// Number of unique strings
    pub fn count(&self) -> usize {
        self.strings.len()
    }
}

/// Render `xl/sharedStrings.xml`
pub fn render_shared_strings(model: &WorksheetData) -> Result<String> {
    let dictionary = model.dictionary();
    render_part(|w| {
        w.declaration()?;
        w.start_element("sst")?;
        w.attribute(
            "xmlns",
            "http://schemas.openxmlformats.org/spreadsheetml/2006/main",
        )?;
        w.attribute_int("count", model.cell_count() as u64)?;
        w.attribute_int("uniqueCount", dictionary.count() as u64)?;
        w.close_start_tag()?;

        for value in dictionary.sorted_values() {
            // already escaped when interned
            w.write_str("<si><t>")?;
            w.write_str(value)?;
            w.write_str("</t></si>")?;
        }

        w.end_element("sst")
    })
}
