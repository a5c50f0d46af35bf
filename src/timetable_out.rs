use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::WriterBuilder;

use crate::error::ExtractError;
use crate::model::MergedRecord;
use crate::options::{ExtractOptions, OutputFormat};

pub const TIMETABLE_HEADERS: [&str; 4] = ["Day", "Time", "Course & Lecturer", "Venue"];

fn write_csv<W: Write>(
    writer: W,
    records: &[MergedRecord],
    options: &ExtractOptions,
) -> Result<W, ExtractError> {
    let mut writer = WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(writer);
    if options.include_header {
        writer.write_record(TIMETABLE_HEADERS)?;
    }
    for record in records {
        writer.write_record(record.to_row())?;
    }
    writer.flush()?;

    writer
        .into_inner()
        .map_err(|error| ExtractError::Io(error.into_error()))
}

/// Renders the merged rows as CSV or pretty-printed JSON.
pub fn render_timetable(
    records: &[MergedRecord],
    options: &ExtractOptions,
) -> Result<String, ExtractError> {
    match options.format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Csv => {
            let bytes = write_csv(Vec::<u8>::new(), records, options)?;
            String::from_utf8(bytes).map_err(|error| {
                ExtractError::InvalidOption(format!("invalid utf-8 csv output: {error}"))
            })
        }
    }
}

pub fn write_timetable(
    path: &Path,
    records: &[MergedRecord],
    options: &ExtractOptions,
) -> Result<(), ExtractError> {
    let file = BufWriter::new(File::create(path)?);
    match options.format {
        OutputFormat::Json => {
            let mut file = file;
            serde_json::to_writer_pretty(&mut file, records)?;
            file.flush()?;
        }
        OutputFormat::Csv => {
            write_csv(file, records, options)?.flush()?;
        }
    }
    Ok(())
}
