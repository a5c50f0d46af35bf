use chrono::NaiveTime;
use serde::Serialize;

use crate::error::ExtractError;

/// Rectangular grid of cell text read from a timetable sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    pub fn from_rows(rows: Vec<Vec<String>>) -> Result<Self, ExtractError> {
        check_width(&rows, None)?;
        Ok(Self { rows })
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A grid whose first surviving row was promoted to column labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabeledGrid {
    labels: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl LabeledGrid {
    pub fn new(labels: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, ExtractError> {
        check_width(&rows, Some(labels.len()))?;
        Ok(Self { labels, rows })
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Copy of the grid with the first cell of each row replaced in order.
    pub(crate) fn with_first_column(&self, values: impl IntoIterator<Item = String>) -> Self {
        let rows = self
            .rows
            .iter()
            .zip(values)
            .map(|(row, value)| {
                let mut row = row.clone();
                if let Some(first) = row.first_mut() {
                    *first = value;
                }
                row
            })
            .collect();

        Self {
            labels: self.labels.clone(),
            rows,
        }
    }
}

fn check_width(rows: &[Vec<String>], expected: Option<usize>) -> Result<(), ExtractError> {
    let Some(expected) = expected.or_else(|| rows.first().map(Vec::len)) else {
        return Ok(());
    };

    match rows.iter().position(|row| row.len() != expected) {
        Some(row) => Err(ExtractError::RaggedGrid {
            row,
            expected,
            found: rows[row].len(),
        }),
        None => Ok(()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRecord {
    pub day: Option<String>,
    pub venue: String,
    pub matched_text: String,
    pub time_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalRecord {
    pub day: Option<String>,
    pub time_label: String,
    pub course_code: String,
    pub venue: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedRecord {
    #[serde(rename = "Day")]
    pub day: Option<String>,
    #[serde(rename = "Time")]
    pub time_range: String,
    #[serde(rename = "Course & Lecturer")]
    pub course_code: String,
    #[serde(rename = "Venue")]
    pub venues: String,
}

impl MergedRecord {
    /// The record as a `(Day, Time, Course & Lecturer, Venue)` row.
    #[must_use]
    pub fn to_row(&self) -> [&str; 4] {
        [
            self.day.as_deref().unwrap_or_default(),
            &self.time_range,
            &self.course_code,
            &self.venues,
        ]
    }
}
