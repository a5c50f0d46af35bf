use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use csv::ReaderBuilder;
use tracing::debug;

use crate::error::ExtractError;
use crate::model::Grid;
use crate::options::SheetSelection;

const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

pub(crate) fn read_grid(path: &Path, sheet: &SheetSelection) -> Result<Grid, ExtractError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => read_delimited(path, b','),
        "tsv" => read_delimited(path, b'\t'),
        ext if WORKBOOK_EXTENSIONS.contains(&ext) => read_workbook(path, sheet),
        _ => Err(ExtractError::UnsupportedFormat(format!(
            "'{}' (expected one of csv, tsv, {})",
            path.display(),
            WORKBOOK_EXTENSIONS.join(", ")
        ))),
    }
}

fn read_workbook(path: &Path, sheet: &SheetSelection) -> Result<Grid, ExtractError> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_names = workbook.sheet_names();

    let name = match sheet {
        SheetSelection::First => sheet_names.first().cloned(),
        SheetSelection::Index(index) => index
            .checked_sub(1)
            .and_then(|position| sheet_names.get(position))
            .cloned(),
        SheetSelection::Name(name) => sheet_names.iter().find(|candidate| *candidate == name).cloned(),
    }
    .ok_or_else(|| {
        ExtractError::SheetNotFound(format!(
            "{sheet:?} in '{}' (available: {})",
            path.display(),
            sheet_names.join(", ")
        ))
    })?;

    let range = workbook.worksheet_range(&name)?;
    let rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<_>>())
        .collect::<Vec<_>>();

    debug!(sheet = %name, rows = rows.len(), "loaded worksheet");
    Grid::from_rows(rows)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn read_delimited(path: &Path, delimiter: u8) -> Result<Grid, ExtractError> {
    let reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(path)?;
    collect_records(reader)
}

pub(crate) fn read_grid_from_csv_str(input: &str, delimiter: u8) -> Result<Grid, ExtractError> {
    let reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(input.as_bytes());
    collect_records(reader)
}

fn collect_records<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Grid, ExtractError> {
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }
    Grid::from_rows(rows)
}
