//! Column and row resolution shared by the Excel and CSV exporters
//!
//! Both exporters run the same front half of an export: validate options,
//! resolve the grid's columns (visibility, order, pinning, cancellation),
//! then resolve rows (filtering, sorting, cancellation) into flattened
//! records. Only the serialization afterwards differs.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, trace, warn};

use crate::error::{ExportError, Result};
use crate::events::{ColumnExportingEventArgs, ExportEvents, RowExportingEventArgs};
use crate::options::ExportOptions;
use crate::types::{
    CellValue, ColumnDescriptor, ExportColumn, Record, RowData, SortDirection, SortExpression,
};

/// Field and header used for exports of bare scalars
pub const SCALAR_COLUMN: &str = "Column1";

/// Everything the grid hands over for one export
#[derive(Debug, Clone, Default)]
pub struct GridSource {
    pub columns: Vec<ColumnDescriptor>,
    /// All rows
    pub data: Vec<RowData>,
    /// Rows currently shown after filtering, if a filter is applied
    pub filtered_data: Option<Vec<RowData>>,
    pub sorting: Vec<SortExpression>,
}

impl GridSource {
    pub fn new(columns: Vec<ColumnDescriptor>, data: Vec<RowData>) -> Self {
        GridSource {
            columns,
            data,
            filtered_data: None,
            sorting: Vec::new(),
        }
    }

    pub fn with_filtered_data(mut self, rows: Vec<RowData>) -> Self {
        self.filtered_data = Some(rows);
        self
    }

    pub fn with_sorting(mut self, sorting: Vec<SortExpression>) -> Self {
        self.sorting = sorting;
        self
    }
}

/// Columns and rows that survived resolution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportTable {
    /// Resolved columns, cancelled ones kept with `skip = true`
    pub columns: Vec<ExportColumn>,
    /// One flattened record per exported row, keyed by active column fields
    pub rows: Vec<Record>,
    /// Leading columns to freeze in the worksheet
    pub frozen_columns: usize,
}

impl ExportTable {
    /// Columns that are actually written
    pub fn active_columns(&self) -> impl Iterator<Item = &ExportColumn> {
        self.columns.iter().filter(|c| !c.skip)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.active_columns().next().is_none()
    }
}

/// Resolve a grid export (`Idle -> ColumnsResolved -> RowsResolved`)
pub fn prepare_grid(
    source: &GridSource,
    options: &ExportOptions,
    events: &mut ExportEvents<'_>,
) -> Result<ExportTable> {
    options.validate()?;

    let columns = resolve_columns(&source.columns, options, events)?;
    let frozen_columns = if options.ignore_pinning || options.ignore_columns_order {
        0
    } else {
        frozen_through_last_pinned(&columns)
    };
    debug!(
        "columns resolved: {} exported, {} frozen",
        columns.iter().filter(|c| !c.skip).count(),
        frozen_columns
    );

    let source_rows = if options.ignore_filtering {
        &source.data
    } else {
        source.filtered_data.as_ref().unwrap_or(&source.data)
    };
    if source_rows.iter().any(|r| matches!(r, RowData::Scalar(_))) {
        return Err(ExportError::UnsupportedDataShape(
            "grid rows must be records".to_string(),
        ));
    }

    let mut ordered: Vec<&RowData> = source_rows.iter().collect();
    if !options.ignore_sorting && !source.sorting.is_empty() {
        sort_rows(&mut ordered, &source.sorting);
    }

    let rows = resolve_rows(&ordered, &columns, events)?;
    debug!("rows resolved: {} of {}", rows.len(), ordered.len());

    Ok(ExportTable {
        columns,
        rows,
        frozen_columns,
    })
}

/// Resolve a plain data export; columns come from the first row
pub fn prepare_data(
    data: &[RowData],
    options: &ExportOptions,
    events: &mut ExportEvents<'_>,
) -> Result<ExportTable> {
    options.validate()?;
    check_data_shape(data)?;

    let mut columns: Vec<ExportColumn> = match data.first() {
        None => Vec::new(),
        Some(RowData::Record(first)) => first
            .keys()
            .map(|k| ExportColumn::new(k.clone(), k.clone()))
            .collect(),
        Some(RowData::Scalar(_)) => vec![ExportColumn::new(SCALAR_COLUMN, SCALAR_COLUMN)],
    };

    if columns.is_empty() {
        debug!("data has no columns, exporting an empty table");
        return Ok(ExportTable::default());
    }

    fire_column_events(&mut columns, events)?;
    debug!("columns resolved: {} from first row", columns.len());

    let ordered: Vec<&RowData> = data.iter().collect();
    let rows = resolve_rows(&ordered, &columns, events)?;
    debug!("rows resolved: {} of {}", rows.len(), data.len());

    Ok(ExportTable {
        columns,
        rows,
        frozen_columns: 0,
    })
}

fn check_data_shape(data: &[RowData]) -> Result<()> {
    let records = data
        .iter()
        .filter(|r| matches!(r, RowData::Record(_)))
        .count();
    if records != 0 && records != data.len() {
        return Err(ExportError::UnsupportedDataShape(format!(
            "{} of {} rows are records, the rest are scalars",
            records,
            data.len()
        )));
    }
    Ok(())
}

pub(crate) fn resolve_columns(
    descriptors: &[ColumnDescriptor],
    options: &ExportOptions,
    events: &mut ExportEvents<'_>,
) -> Result<Vec<ExportColumn>> {
    if descriptors.is_empty() {
        return Ok(Vec::new());
    }

    let mut declared: Vec<&ColumnDescriptor> = descriptors.iter().collect();
    declared.sort_by_key(|c| c.index);

    let mut placed: Vec<Option<ExportColumn>> = Vec::new();
    let mut trailing: Vec<ExportColumn> = Vec::new();

    for descriptor in declared {
        if descriptor.hidden && !options.ignore_columns_visibility {
            continue;
        }
        let column = ExportColumn {
            header: descriptor.display_header().to_string(),
            field: descriptor.field.clone(),
            skip: false,
            pinned: descriptor.pinned,
        };
        let slot = if options.ignore_columns_order {
            Some(descriptor.index)
        } else {
            descriptor.visible_index
        };
        match slot {
            Some(i) if placed.get(i).map_or(true, Option::is_none) => {
                if i >= placed.len() {
                    placed.resize(i + 1, None);
                }
                placed[i] = Some(column);
            }
            _ => trailing.push(column),
        }
    }

    let mut columns: Vec<ExportColumn> = placed.into_iter().flatten().chain(trailing).collect();
    if columns.is_empty() {
        warn!("all {} columns are hidden", descriptors.len());
        return Err(ExportError::NoColumnsToExport);
    }

    fire_column_events(&mut columns, events)?;
    Ok(columns)
}

/// Active columns up to and including the last pinned one
fn frozen_through_last_pinned(columns: &[ExportColumn]) -> usize {
    columns
        .iter()
        .filter(|c| !c.skip)
        .enumerate()
        .filter(|(_, c)| c.pinned)
        .last()
        .map_or(0, |(position, _)| position + 1)
}

fn fire_column_events(columns: &mut [ExportColumn], events: &mut ExportEvents<'_>) -> Result<()> {
    for (column_index, column) in columns.iter_mut().enumerate() {
        let mut args = ColumnExportingEventArgs {
            header: column.header.clone(),
            field: column.field.clone(),
            column_index,
            cancel: false,
        };
        events.emit_column(&mut args);
        column.header = args.header;
        column.skip = args.cancel;
        if column.skip {
            trace!("column {} ({}) cancelled", column_index, column.field);
        }
    }

    if columns.iter().all(|c| c.skip) {
        warn!("all {} columns were cancelled", columns.len());
        return Err(ExportError::NoColumnsToExport);
    }
    Ok(())
}

pub(crate) fn resolve_rows(
    rows: &[&RowData],
    columns: &[ExportColumn],
    events: &mut ExportEvents<'_>,
) -> Result<Vec<Record>> {
    let active: Vec<&ExportColumn> = columns.iter().filter(|c| !c.skip).collect();
    let mut records = Vec::with_capacity(rows.len());

    for (row_index, row) in rows.iter().enumerate() {
        let mut args = RowExportingEventArgs {
            row_data: (*row).clone(),
            row_index,
            cancel: false,
        };
        events.emit_row(&mut args);
        if args.cancel {
            trace!("row {} cancelled", row_index);
            continue;
        }

        let record: Record = active
            .iter()
            .map(|c| (c.field.clone(), row.value(&c.field).clone()))
            .collect();
        records.push(record);
    }

    if !rows.is_empty() && records.is_empty() {
        warn!("all {} rows were cancelled", rows.len());
        return Err(ExportError::NoRowsToExport);
    }
    Ok(records)
}

fn sort_rows(rows: &mut [&RowData], sorting: &[SortExpression]) {
    rows.sort_by(|a, b| {
        for expr in sorting {
            let ord = a
                .value(&expr.field)
                .compare(b.value(&expr.field), expr.ignore_case);
            let ord = match expr.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            };
            if ord.is_ne() {
                return ord;
            }
        }
        std::cmp::Ordering::Equal
    });
}

/// A finished export, ready to be saved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    /// File name with the format's extension
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportedFile {
    /// Hand the export to a saver
    pub fn save_to<S: ExportSaver + ?Sized>(&self, saver: &mut S) -> Result<()> {
        saver.save(&self.file_name, &self.bytes)
    }
}

/// Collaborator that receives the finished export
pub trait ExportSaver {
    fn save(&mut self, file_name: &str, bytes: &[u8]) -> Result<()>;
}

/// Writes exports into a directory on disk
#[derive(Debug, Clone)]
pub struct DirectorySaver {
    dir: PathBuf,
}

impl DirectorySaver {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        DirectorySaver {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Full path an export named `file_name` is written to
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }
}

impl ExportSaver for DirectorySaver {
    fn save(&mut self, file_name: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path_for(file_name);
        let file = File::create(&path)?;
        let mut writer = BufWriter::with_capacity(64 * 1024, file);
        writer.write_all(bytes)?;
        writer.flush()?;
        debug!("saved {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}

/// Keeps exports in memory, in save order
#[derive(Debug, Clone, Default)]
pub struct MemorySaver {
    pub files: Vec<(String, Vec<u8>)>,
}

impl MemorySaver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ExportSaver for MemorySaver {
    fn save(&mut self, file_name: &str, bytes: &[u8]) -> Result<()> {
        self.files.push((file_name.to_string(), bytes.to_vec()));
        Ok(())
    }
}

/// Text of a flattened record field as written by both exporters
pub(crate) fn field_text(record: &Record, field: &str) -> String {
    record
        .get(field)
        .map(CellValue::as_string)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::record;

    fn columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("ID", 0),
            ColumnDescriptor::new("Name", 1),
            ColumnDescriptor::new("JobTitle", 2),
        ]
    }

    fn rows() -> Vec<RowData> {
        vec![
            record([("ID", CellValue::Int(2)), ("Name", "Gilberto Todd".into()), ("JobTitle", "Director".into())]).into(),
            record([("ID", CellValue::Int(1)), ("Name", "Casey Houston".into()), ("JobTitle", "Vice President".into())]).into(),
        ]
    }

    fn headers(table: &ExportTable) -> Vec<&str> {
        table.active_columns().map(|c| c.header.as_str()).collect()
    }

    #[test]
    fn test_cancelled_column_leaves_no_gap() {
        let source = GridSource::new(columns(), rows());
        let mut events = ExportEvents::new();
        events.on_column_export(|args| args.cancel = args.column_index == 1);

        let table = prepare_grid(&source, &ExportOptions::xlsx("t"), &mut events).unwrap();
        assert_eq!(table.columns.len(), 3);
        assert!(table.columns[1].skip);
        assert_eq!(headers(&table), vec!["ID", "JobTitle"]);
        assert_eq!(table.rows[0].keys().collect::<Vec<_>>(), vec!["ID", "JobTitle"]);
    }

    #[test]
    fn test_hidden_column_excluded_and_indices_shift() {
        let mut cols = columns();
        cols[0] = cols[0].clone().hidden();
        cols[1].visible_index = Some(0);
        cols[2].visible_index = Some(1);
        let source = GridSource::new(cols, rows());

        let mut seen = Vec::new();
        {
            let mut events = ExportEvents::new();
            events.on_column_export(|args| seen.push((args.header.clone(), args.column_index)));
            let table = prepare_grid(&source, &ExportOptions::xlsx("t"), &mut events).unwrap();
            assert_eq!(table.columns.len(), 2);
        }
        assert_eq!(
            seen,
            vec![("Name".to_string(), 0), ("JobTitle".to_string(), 1)]
        );
    }

    #[test]
    fn test_hidden_column_appended_when_visibility_ignored() {
        let mut cols = columns();
        cols[0] = cols[0].clone().hidden();
        cols[1].visible_index = Some(0);
        cols[2].visible_index = Some(1);
        let source = GridSource::new(cols, rows());
        let mut options = ExportOptions::xlsx("t");
        options.ignore_columns_visibility = true;

        let table = prepare_grid(&source, &options, &mut ExportEvents::new()).unwrap();
        assert_eq!(headers(&table), vec!["Name", "JobTitle", "ID"]);

        options.ignore_columns_order = true;
        let table = prepare_grid(&source, &options, &mut ExportEvents::new()).unwrap();
        assert_eq!(headers(&table), vec!["ID", "Name", "JobTitle"]);
    }

    #[test]
    fn test_all_hidden_is_error() {
        let cols = columns().into_iter().map(|c| c.hidden()).collect();
        let source = GridSource::new(cols, rows());
        let err = prepare_grid(&source, &ExportOptions::xlsx("t"), &mut ExportEvents::new())
            .unwrap_err();
        assert!(matches!(err, ExportError::NoColumnsToExport));
    }

    #[test]
    fn test_all_cancelled_rows_is_error() {
        let source = GridSource::new(columns(), rows());
        let mut events = ExportEvents::new();
        events.on_row_export(|args| args.cancel = true);
        let err = prepare_grid(&source, &ExportOptions::xlsx("t"), &mut events).unwrap_err();
        assert!(matches!(err, ExportError::NoRowsToExport));
    }

    #[test]
    fn test_filtering_and_sorting() {
        let source = GridSource::new(columns(), rows())
            .with_filtered_data(vec![rows().remove(1)])
            .with_sorting(vec![SortExpression::new("ID", SortDirection::Asc)]);

        let table = prepare_grid(&source, &ExportOptions::xlsx("t"), &mut ExportEvents::new())
            .unwrap();
        assert_eq!(table.rows.len(), 1);

        let mut options = ExportOptions::xlsx("t");
        options.ignore_filtering = true;
        let table = prepare_grid(&source, &options, &mut ExportEvents::new()).unwrap();
        assert_eq!(field_text(&table.rows[0], "ID"), "1");
        assert_eq!(field_text(&table.rows[1], "ID"), "2");

        options.ignore_sorting = true;
        let table = prepare_grid(&source, &options, &mut ExportEvents::new()).unwrap();
        assert_eq!(field_text(&table.rows[0], "ID"), "2");
    }

    #[test]
    fn test_frozen_columns() {
        let cols = vec![
            ColumnDescriptor::new("Name", 1).pinned().with_visible_index(0),
            ColumnDescriptor::new("ID", 0).with_visible_index(1),
            ColumnDescriptor::new("JobTitle", 2),
        ];
        let source = GridSource::new(cols, rows());
        let mut options = ExportOptions::xlsx("t");

        let table = prepare_grid(&source, &options, &mut ExportEvents::new()).unwrap();
        assert_eq!(headers(&table), vec!["Name", "ID", "JobTitle"]);
        assert_eq!(table.frozen_columns, 1);

        options.ignore_pinning = true;
        let table = prepare_grid(&source, &options, &mut ExportEvents::new()).unwrap();
        assert_eq!(table.frozen_columns, 0);
    }

    #[test]
    fn test_frozen_columns_reach_last_pinned() {
        let mut cols = columns();
        cols[1] = cols[1].clone().pinned();
        let source = GridSource::new(cols, rows());
        let table = prepare_grid(&source, &ExportOptions::xlsx("t"), &mut ExportEvents::new())
            .unwrap();
        assert_eq!(headers(&table), vec!["ID", "Name", "JobTitle"]);
        assert_eq!(table.frozen_columns, 2);

        // hidden pinned column lands last when visibility is ignored
        let mut cols = columns();
        cols[0] = cols[0].clone().hidden().pinned();
        cols[1].visible_index = Some(0);
        cols[2].visible_index = Some(1);
        let source = GridSource::new(cols, rows());
        let mut options = ExportOptions::xlsx("t");
        options.ignore_columns_visibility = true;
        let table = prepare_grid(&source, &options, &mut ExportEvents::new()).unwrap();
        assert_eq!(headers(&table), vec!["Name", "JobTitle", "ID"]);
        assert_eq!(table.frozen_columns, 3);
    }

    #[test]
    fn test_cancelled_columns_not_counted_for_pane() {
        let mut cols = columns();
        cols[2] = cols[2].clone().pinned();
        let source = GridSource::new(cols, rows());
        let mut events = ExportEvents::new();
        events.on_column_export(|args| args.cancel = args.column_index == 0);

        let table = prepare_grid(&source, &ExportOptions::xlsx("t"), &mut events).unwrap();
        assert_eq!(headers(&table), vec!["Name", "JobTitle"]);
        assert_eq!(table.frozen_columns, 2);

        let mut events = ExportEvents::new();
        events.on_column_export(|args| args.cancel = args.column_index == 2);
        let table = prepare_grid(&source, &ExportOptions::xlsx("t"), &mut events).unwrap();
        assert_eq!(table.frozen_columns, 0);
    }

    #[test]
    fn test_plain_data_columns_from_first_row() {
        let data: Vec<RowData> = vec![
            record([("name", "Terrance Orta"), ("phone", "770-504-2217")]).into(),
            record([("name", "Donna Price")]).into(),
        ];
        let table = prepare_data(&data, &ExportOptions::csv("t"), &mut ExportEvents::new()).unwrap();
        assert_eq!(headers(&table), vec!["name", "phone"]);
        assert_eq!(field_text(&table.rows[1], "phone"), "");
    }

    #[test]
    fn test_scalar_data_uses_synthetic_column() {
        let data: Vec<RowData> = vec![CellValue::Int(10).into(), CellValue::Int(20).into()];
        let table = prepare_data(&data, &ExportOptions::csv("t"), &mut ExportEvents::new()).unwrap();
        assert_eq!(headers(&table), vec![SCALAR_COLUMN]);
        assert_eq!(field_text(&table.rows[1], SCALAR_COLUMN), "20");
    }

    #[test]
    fn test_mixed_shapes_rejected() {
        let data: Vec<RowData> = vec![
            record([("name", "Terrance Orta")]).into(),
            CellValue::Int(3).into(),
        ];
        let err = prepare_data(&data, &ExportOptions::csv("t"), &mut ExportEvents::new())
            .unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedDataShape(_)));
    }

    #[test]
    fn test_empty_inputs_are_not_errors() {
        let table = prepare_data(&[], &ExportOptions::csv("t"), &mut ExportEvents::new()).unwrap();
        assert!(table.is_empty());

        let data: Vec<RowData> = vec![Record::new().into(), Record::new().into()];
        let table = prepare_data(&data, &ExportOptions::csv("t"), &mut ExportEvents::new()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_memory_saver_keeps_order() {
        let mut saver = MemorySaver::new();
        saver.save("a.csv", b"1").unwrap();
        saver.save("b.csv", b"2").unwrap();
        assert_eq!(saver.files[1].0, "b.csv");
    }
}
