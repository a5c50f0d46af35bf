use crate::model::LabeledGrid;

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Repeated column header marking the start of a timetable block.
pub(crate) const DAY_HEADER: &str = "Day";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DayCell {
    Weekday(&'static str),
    Header,
    Absent,
}

fn title_case(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn normalize_day(cell: &str) -> DayCell {
    let compact = cell
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect::<String>();
    let titled = title_case(&compact);

    if titled == DAY_HEADER {
        return DayCell::Header;
    }

    WEEKDAYS
        .iter()
        .find(|day| **day == titled)
        .map_or(DayCell::Absent, |day| DayCell::Weekday(*day))
}

/// One fold step: the running day after `cell`, and the value written back.
fn fill_step(current: Option<&'static str>, cell: &str) -> (Option<&'static str>, String) {
    match normalize_day(cell) {
        DayCell::Header => (current, DAY_HEADER.to_string()),
        DayCell::Weekday(day) => (Some(day), day.to_string()),
        DayCell::Absent => (current, current.unwrap_or_default().to_string()),
    }
}

/// Normalizes the first column to weekday names and carries the last seen
/// day down into rows that lack one. Header rows are kept as `Day` and do not
/// change the running day; rows before the first weekday stay empty.
#[must_use]
pub fn fill_days(grid: &LabeledGrid) -> LabeledGrid {
    let filled = grid
        .rows()
        .iter()
        .map(|row| row.first().map_or("", String::as_str))
        .scan(None, |current, cell| {
            let (next, value) = fill_step(*current, cell);
            *current = next;
            Some(value)
        })
        .collect::<Vec<_>>();

    grid.with_first_column(filled)
}
