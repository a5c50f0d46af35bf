use crate::day_fill::DAY_HEADER;
use crate::model::{CandidateRecord, LabeledGrid};
use crate::text::{CourseToken, collapse_spaces};

fn day_of(row: &[String]) -> Option<String> {
    let day = collapse_spaces(row.first().map_or("", String::as_str));
    (!day.is_empty() && day != DAY_HEADER).then_some(day)
}

/// Emits one candidate per cell containing the course token, scanning in
/// row-major order. Column 0 carries the day, column 1 the venue.
#[must_use]
pub fn match_cells(grid: &LabeledGrid, course: &CourseToken) -> Vec<CandidateRecord> {
    let mut matches = Vec::new();

    for row in grid.rows() {
        for (col_index, cell) in row.iter().enumerate() {
            if !course.is_match(cell) {
                continue;
            }

            matches.push(CandidateRecord {
                day: day_of(row),
                venue: collapse_spaces(row.get(1).map_or("", String::as_str)),
                matched_text: collapse_spaces(cell),
                time_label: collapse_spaces(
                    grid.labels().get(col_index).map_or("", String::as_str),
                ),
            });
        }
    }

    matches
}
