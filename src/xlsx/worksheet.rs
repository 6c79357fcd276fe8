//! Worksheet part renderer (`xl/worksheets/sheet1.xml`)

use super::model::WorksheetData;
use super::xml_writer::{render_part, XmlWriter};
use crate::error::Result;

/// Excel column name for a 0-based index (0 = "A", 26 = "AA")
pub fn column_letter(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    letters.into_iter().map(char::from).collect()
}

/// Bounding box of the worksheet, `A1` when there is nothing in it
pub fn dimension(model: &WorksheetData) -> String {
    if model.is_empty() {
        return "A1".to_string();
    }
    format!(
        "A1:{}{}",
        column_letter(model.column_count() - 1),
        model.row_count()
    )
}

/// Render the worksheet part
pub fn render_worksheet(model: &WorksheetData) -> Result<String> {
    render_part(|w| {
        w.declaration()?;
        w.start_element("worksheet")?;
        w.attribute(
            "xmlns",
            "http://schemas.openxmlformats.org/spreadsheetml/2006/main",
        )?;
        w.attribute(
            "xmlns:r",
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships",
        )?;
        w.attribute(
            "xmlns:mc",
            "http://schemas.openxmlformats.org/markup-compatibility/2006",
        )?;
        w.attribute("mc:Ignorable", "x14ac")?;
        w.attribute(
            "xmlns:x14ac",
            "http://schemas.microsoft.com/office/spreadsheetml/2009/9/ac",
        )?;
        w.close_start_tag()?;

        w.start_element("dimension")?;
        w.attribute("ref", &dimension(model))?;
        w.close_empty()?;

        write_sheet_views(w, model)?;

        w.write_str("<sheetFormatPr defaultRowHeight=\"15\" x14ac:dyDescent=\"0.25\"/>")?;

        write_cols(w, model)?;
        write_sheet_data(w, model)?;

        w.write_str(
            "<pageMargins left=\"0.7\" right=\"0.7\" top=\"0.75\" bottom=\"0.75\" header=\"0.3\" footer=\"0.3\"/>",
        )?;
        if model.has_table() {
            w.write_str("<tableParts count=\"1\"><tablePart r:id=\"rId1\"/></tableParts>")?;
        }

        w.end_element("worksheet")
    })
}

fn write_sheet_views(w: &mut XmlWriter<&mut Vec<u8>>, model: &WorksheetData) -> Result<()> {
    w.write_str("<sheetViews><sheetView tabSelected=\"1\" workbookViewId=\"0\">")?;
    let frozen = model.frozen_columns();
    if frozen > 0 {
        w.start_element("pane")?;
        w.attribute_int("xSplit", frozen as u64)?;
        w.attribute("topLeftCell", &format!("{}1", column_letter(frozen)))?;
        w.attribute("activePane", "topRight")?;
        w.attribute("state", "frozen")?;
        w.close_empty()?;
    }
    w.write_str("</sheetView></sheetViews>")
}

fn write_cols(w: &mut XmlWriter<&mut Vec<u8>>, model: &WorksheetData) -> Result<()> {
    if model.is_empty() {
        return Ok(());
    }

    w.start_element("cols")?;
    w.close_start_tag()?;
    for col in 0..model.column_count() {
        let number = col as u64 + 1;
        w.start_element("col")?;
        w.attribute_int("min", number)?;
        w.attribute_int("max", number)?;
        w.attribute_num("width", model.column_width(col))?;
        w.attribute("customWidth", "1")?;
        w.close_empty()?;
    }
    w.end_element("cols")
}

fn write_sheet_data(w: &mut XmlWriter<&mut Vec<u8>>, model: &WorksheetData) -> Result<()> {
    if model.is_empty() {
        return w.empty_element("sheetData");
    }

    // Column letters are the same on every row
    let letters: Vec<String> = (0..model.column_count()).map(column_letter).collect();
    let row_height = model.row_height();

    w.start_element("sheetData")?;
    w.close_start_tag()?;
    for row in 0..model.row_count() {
        let row_number = row as u64 + 1;
        w.start_element("row")?;
        w.attribute_int("r", row_number)?;
        if let Some(height) = row_height {
            w.attribute_num("ht", height)?;
            w.attribute("customHeight", "1")?;
        }
        w.close_start_tag()?;

        for (col, letter) in letters.iter().enumerate() {
            w.write_str("<c r=\"")?;
            w.write_str(letter)?;
            w.write_int(row_number)?;
            w.write_str("\" t=\"s\"><v>")?;
            w.write_int(model.cell_index(row, col) as u64)?;
            w.write_str("</v></c>")?;
        }

        w.end_element("row")?;
    }
    w.end_element("sheetData")
}
