use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::Grid;

// Programme, year and semester, e.g. "BMCS Y2S2".
static COURSE_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z]+ Y\d+S\d+\b").expect("hardcoded course token regex is valid")
});

/// Collects every course-selection token that appears anywhere in the grid.
#[must_use]
pub fn discover_courses(grid: &Grid) -> BTreeSet<String> {
    grid.rows()
        .iter()
        .flatten()
        .flat_map(|cell| COURSE_TOKEN_RE.find_iter(cell))
        .map(|found| found.as_str().to_string())
        .collect()
}
