use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::error::ExtractError;
use crate::model::{Grid, LabeledGrid};
use crate::text::CourseToken;

// Letters of a day name may be spaced out ("M O N D A Y"); a bare "day" also counts.
static DAY_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    let names = [
        "day",
        "monday",
        "tuesday",
        "wednesday",
        "thursday",
        "friday",
        "saturday",
        "sunday",
    ];
    let alternatives = names
        .iter()
        .map(|name| {
            name.chars()
                .map(|ch| ch.to_string())
                .collect::<Vec<_>>()
                .join(r"\s*")
        })
        .collect::<Vec<_>>()
        .join("|");

    RegexBuilder::new(&format!("({alternatives})"))
        .case_insensitive(true)
        .build()
        .expect("hardcoded day-name regex is valid")
});

static ROOM_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new("NAME OF ROOM")
        .case_insensitive(true)
        .build()
        .expect("hardcoded room header regex is valid")
});

static CLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{1,2}\.\d{2}\b").expect("hardcoded clock regex is valid"));

#[derive(Debug, Clone, Copy, Default)]
struct CellMask {
    /// Course token or day name; selects both the row and the column.
    anchor: bool,
    /// Room header or clock time; selects the column only.
    column_only: bool,
}

fn classify(cell: &str, course: &CourseToken) -> CellMask {
    let anchor = course.is_match(cell) || DAY_NAME_RE.is_match(cell);
    let column_only = !anchor && (ROOM_HEADER_RE.is_match(cell) || CLOCK_RE.is_match(cell));
    CellMask {
        anchor,
        column_only,
    }
}

/// Keeps the rows and columns that belong to `course`'s timetable block and
/// promotes the first surviving row to column labels.
pub fn filter_grid(grid: &Grid, course: &CourseToken) -> Result<LabeledGrid, ExtractError> {
    let width = grid.width();
    let mut keep_columns = vec![false; width];
    let mut keep_rows = vec![false; grid.rows().len()];

    for (row_index, row) in grid.rows().iter().enumerate() {
        for (col_index, cell) in row.iter().enumerate() {
            let mask = classify(cell, course);
            if mask.anchor {
                keep_rows[row_index] = true;
            }
            if mask.anchor || mask.column_only {
                keep_columns[col_index] = true;
            }
        }
    }

    let columns = keep_columns
        .iter()
        .enumerate()
        .filter_map(|(index, keep)| keep.then_some(index))
        .collect::<Vec<_>>();

    let mut kept = grid
        .rows()
        .iter()
        .zip(&keep_rows)
        .filter(|(_, keep)| **keep)
        .map(|(row, _)| {
            columns
                .iter()
                .map(|&index| row[index].clone())
                .collect::<Vec<_>>()
        });

    let Some(labels) = kept.next() else {
        return Ok(LabeledGrid::default());
    };
    let rows = kept.collect::<Vec<_>>();

    LabeledGrid::new(labels, rows)
}
