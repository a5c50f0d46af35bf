mod cell_match;
mod course_code;
mod day_fill;
mod discovery;
mod error;
mod grid_filter;
mod grid_reader;
mod model;
mod options;
mod text;
mod time_merge;
mod timetable_out;
mod warning;

use std::path::Path;

use tracing::{info, warn};

pub use cell_match::match_cells;
pub use course_code::canonicalize;
pub use day_fill::fill_days;
pub use discovery::discover_courses;
pub use error::ExtractError;
pub use grid_filter::filter_grid;
pub use model::{CandidateRecord, CanonicalRecord, Grid, LabeledGrid, MergedRecord, TimeRange};
pub use options::{CodePattern, ExtractOptions, OutputFormat, SheetSelection};
pub use text::CourseToken;
pub use time_merge::{format_clock, merge_times, parse_time_label, split_time_label};
pub use timetable_out::{TIMETABLE_HEADERS, render_timetable, write_timetable};
pub use warning::{ExtractWarning, WarningCode as ExtractWarningCode};

use crate::warning::WarningCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionReport {
    pub course: String,
    pub candidate_count: usize,
    pub row_count: usize,
    pub warnings: Vec<ExtractWarning>,
}

/// Reads the selected sheet of a workbook (or a CSV/TSV file) as a text grid.
pub fn read_grid(path: &Path, sheet: &SheetSelection) -> Result<Grid, ExtractError> {
    grid_reader::read_grid(path, sheet)
}

/// Parses CSV text into a grid; no header row is assumed.
pub fn read_grid_from_csv_str(input: &str, delimiter: u8) -> Result<Grid, ExtractError> {
    grid_reader::read_grid_from_csv_str(input, delimiter)
}

fn unknown_day_warnings(candidates: &[CandidateRecord]) -> Vec<ExtractWarning> {
    candidates
        .iter()
        .enumerate()
        .filter(|(_, candidate)| candidate.day.is_none())
        .map(|(index, candidate)| {
            ExtractWarning::new(
                WarningCode::UnknownDay,
                "matched cell appears before any weekday label",
            )
            .with_row(index)
            .with_text(candidate.matched_text.clone())
        })
        .collect()
}

/// Runs the full pipeline for one course over an already-loaded grid.
pub fn extract_timetable(
    grid: &Grid,
    course: &str,
    options: &ExtractOptions,
) -> Result<(Vec<MergedRecord>, ExtractionReport), ExtractError> {
    let token = CourseToken::new(course)?;
    let mut warnings = Vec::new();

    let filtered = filter_grid(grid, &token)?;
    let filled = fill_days(&filtered);
    let candidates = match_cells(&filled, &token);
    if candidates.is_empty() {
        warnings.push(ExtractWarning::new(
            WarningCode::NoCandidates,
            format!("no cells mention course '{}'", token.as_str()),
        ));
    }
    warnings.extend(unknown_day_warnings(&candidates));

    let canonical = canonicalize(&candidates, options.code_pattern, &mut warnings);
    let merged = merge_times(&canonical, &mut warnings);

    if merged.is_empty() {
        warn!(course = token.as_str(), "no timetable rows extracted");
    }
    info!(
        course = token.as_str(),
        candidates = candidates.len(),
        canonical = canonical.len(),
        rows = merged.len(),
        warnings = warnings.len(),
        "timetable extraction completed"
    );

    let report = ExtractionReport {
        course: token.as_str().to_string(),
        candidate_count: candidates.len(),
        row_count: merged.len(),
        warnings,
    };
    Ok((merged, report))
}

/// Reads `input`, extracts `course`'s timetable and writes it to `output`.
pub fn extract_timetable_file(
    input: &Path,
    output: &Path,
    course: &str,
    options: &ExtractOptions,
) -> Result<ExtractionReport, ExtractError> {
    let grid = read_grid(input, &options.sheet)?;
    let (merged, report) = extract_timetable(&grid, course, options)?;
    write_timetable(output, &merged, options)?;
    Ok(report)
}
