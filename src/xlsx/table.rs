//! Table definition part (`xl/tables/table1.xml`)

use super::model::WorksheetData;
use super::worksheet::dimension;
use super::xml_writer::render_part;
use crate::error::Result;

const TABLE_STYLE: &str = "TableStyleMedium2";

/// Render the table covering the whole worksheet, header row included
pub fn render_table(model: &WorksheetData) -> Result<String> {
    let range = dimension(model);
    render_part(|w| {
        w.declaration()?;
        w.start_element("table")?;
        w.attribute(
            "xmlns",
            "http://schemas.openxmlformats.org/spreadsheetml/2006/main",
        )?;
        w.attribute("id", "1")?;
        w.attribute("name", "Table1")?;
        w.attribute("displayName", "Table1")?;
        w.attribute("ref", &range)?;
        w.attribute("totalsRowShown", "0")?;
        w.close_start_tag()?;

        w.start_element("autoFilter")?;
        w.attribute("ref", &range)?;
        w.close_empty()?;

        w.start_element("tableColumns")?;
        w.attribute_int("count", model.column_count() as u64)?;
        w.close_start_tag()?;
        for (i, header) in model.headers().iter().enumerate() {
            w.start_element("tableColumn")?;
            w.attribute_int("id", i as u64 + 1)?;
            w.attribute("name", header)?;
            w.close_empty()?;
        }
        w.end_element("tableColumns")?;

        w.start_element("tableStyleInfo")?;
        w.attribute("name", TABLE_STYLE)?;
        w.attribute("showFirstColumn", "0")?;
        w.attribute("showLastColumn", "0")?;
        w.attribute("showRowStripes", "1")?;
        w.attribute("showColumnStripes", "0")?;
        w.close_empty()?;

        w.end_element("table")
    })
}
