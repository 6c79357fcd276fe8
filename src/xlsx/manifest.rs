//! Parts whose content depends only on which other parts exist
//!
//! `[Content_Types].xml` and `xl/_rels/workbook.xml.rels` gain one entry each
//! for the shared strings part, and the content types gain one for the table.

use super::model::WorksheetData;
use super::xml_writer::render_part;
use crate::error::Result;

const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const OFFICE_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// `(PartName, ContentType)` of the parts every package has
const FIXED_OVERRIDES: [(&str, &str); 6] = [
    (
        "/xl/workbook.xml",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml",
    ),
    (
        "/xl/worksheets/sheet1.xml",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml",
    ),
    (
        "/xl/theme/theme1.xml",
        "application/vnd.openxmlformats-officedocument.theme+xml",
    ),
    (
        "/xl/styles.xml",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml",
    ),
    (
        "/docProps/core.xml",
        "application/vnd.openxmlformats-package.core-properties+xml",
    ),
    (
        "/docProps/app.xml",
        "application/vnd.openxmlformats-officedocument.extended-properties+xml",
    ),
];

const SHARED_STRINGS_OVERRIDE: (&str, &str) = (
    "/xl/sharedStrings.xml",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml",
);

const TABLE_OVERRIDE: (&str, &str) = (
    "/xl/tables/table1.xml",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.table+xml",
);

/// Render `[Content_Types].xml`
pub fn render_content_types(model: &WorksheetData) -> Result<String> {
    let mut overrides: Vec<(&str, &str)> = FIXED_OVERRIDES.to_vec();
    if model.has_shared_strings() {
        overrides.push(SHARED_STRINGS_OVERRIDE);
    }
    if model.has_table() {
        overrides.push(TABLE_OVERRIDE);
    }

    render_part(|w| {
        w.declaration()?;
        w.start_element("Types")?;
        w.attribute("xmlns", CONTENT_TYPES_NS)?;
        w.close_start_tag()?;

        for (extension, content_type) in [
            ("rels", "application/vnd.openxmlformats-package.relationships+xml"),
            ("xml", "application/xml"),
        ] {
            w.start_element("Default")?;
            w.attribute("Extension", extension)?;
            w.attribute("ContentType", content_type)?;
            w.close_empty()?;
        }

        for (part_name, content_type) in overrides {
            w.start_element("Override")?;
            w.attribute("PartName", part_name)?;
            w.attribute("ContentType", content_type)?;
            w.close_empty()?;
        }

        w.end_element("Types")
    })
}

/// Render `xl/_rels/workbook.xml.rels`
pub fn render_workbook_rels(model: &WorksheetData) -> Result<String> {
    let mut relationships = vec![
        ("rId3", "styles", "styles.xml"),
        ("rId2", "theme", "theme/theme1.xml"),
        ("rId1", "worksheet", "worksheets/sheet1.xml"),
    ];
    if model.has_shared_strings() {
        relationships.push(("rId4", "sharedStrings", "sharedStrings.xml"));
    }

    render_part(|w| {
        w.declaration()?;
        w.start_element("Relationships")?;
        w.attribute("xmlns", RELATIONSHIPS_NS)?;
        w.close_start_tag()?;

        for (id, kind, target) in relationships {
            w.start_element("Relationship")?;
            w.attribute("Id", id)?;
            w.attribute("Type", &format!("{}/{}", OFFICE_REL, kind))?;
            w.attribute("Target", target)?;
            w.close_empty()?;
        }

        w.end_element("Relationships")
    })
}
