use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use chrono::{NaiveTime, Timelike};
use regex::Regex;
use tracing::debug;

use crate::model::{CanonicalRecord, MergedRecord, TimeRange};
use crate::warning::{ExtractWarning, WarningCode};

static MERIDIEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.?([ap])\.?m\.?").expect("hardcoded meridiem regex is valid"));

static MERIDIEM_SEARCH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(am|pm)").expect("hardcoded meridiem regex is valid"));

static CLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})(?:[.:](\d{2}))?(am|pm)$").expect("hardcoded clock regex is valid")
});

fn is_range_sep(ch: char) -> bool {
    matches!(ch, '-' | '–' | '—' | '－' | '~' | '～')
}

/// Lowercases, removes whitespace, unifies range separators to `-` and
/// meridiem spellings (`a.m.`, `P.M`) to `am`/`pm`.
pub(crate) fn normalize_time_label(label: &str) -> String {
    let compact = label
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .map(|ch| if is_range_sep(ch) { '-' } else { ch })
        .collect::<String>()
        .to_lowercase();

    MERIDIEM_RE.replace_all(&compact, "${1}m").into_owned()
}

fn has_meridiem(bound: &str) -> bool {
    bound.ends_with("am") || bound.ends_with("pm")
}

/// Splits a time label into start/end strings, both carrying a meridiem.
/// A bound without one inherits the end bound's, defaulting to `am`.
#[must_use]
pub fn split_time_label(label: &str) -> Option<(String, String)> {
    let normalized = normalize_time_label(label);
    let mut parts = normalized.split('-');
    let (Some(start), Some(end), None) = (parts.next(), parts.next(), parts.next()) else {
        return None;
    };
    if start.is_empty() || end.is_empty() {
        return None;
    }

    let reference = MERIDIEM_SEARCH_RE
        .find(end)
        .map_or("am", |found| found.as_str());
    let with_reference = |bound: &str| {
        if has_meridiem(bound) {
            bound.to_string()
        } else {
            format!("{bound}{reference}")
        }
    };

    Some((with_reference(start), with_reference(end)))
}

/// Parses a 12-hour clock bound such as `9.30am`, `9:30pm` or `9am`.
pub(crate) fn parse_clock(bound: &str) -> Option<NaiveTime> {
    let captures = CLOCK_RE.captures(bound)?;
    let hour = captures.get(1)?.as_str().parse::<u32>().ok()?;
    let minute = captures
        .get(2)
        .map_or(Some(0), |value| value.as_str().parse::<u32>().ok())?;
    if !(1..=12).contains(&hour) {
        return None;
    }

    let is_pm = captures.get(3)?.as_str() == "pm";
    let hour24 = hour % 12 + if is_pm { 12 } else { 0 };
    NaiveTime::from_hms_opt(hour24, minute, 0)
}

/// Parses a raw time label into comparable instants.
#[must_use]
pub fn parse_time_label(label: &str) -> Option<TimeRange> {
    let (start, end) = split_time_label(label)?;
    Some(TimeRange {
        start: parse_clock(&start)?,
        end: parse_clock(&end)?,
    })
}

/// Formats an instant as `9am` or `5.30pm`.
#[must_use]
pub fn format_clock(time: NaiveTime) -> String {
    let (is_pm, hour) = time.hour12();
    let meridiem = if is_pm { "pm" } else { "am" };
    match time.minute() {
        0 => format!("{hour}{meridiem}"),
        minute => format!("{hour}.{minute:02}{meridiem}"),
    }
}

#[derive(Debug)]
struct MergeGroup {
    day: Option<String>,
    course_code: String,
    start: NaiveTime,
    end: NaiveTime,
    venues: BTreeSet<String>,
}

impl MergeGroup {
    fn absorb(&mut self, range: TimeRange, venue: &str) {
        self.start = self.start.min(range.start);
        self.end = self.end.max(range.end);
        if !venue.is_empty() {
            self.venues.insert(venue.to_string());
        }
    }

    fn into_record(self) -> MergedRecord {
        MergedRecord {
            day: self.day,
            time_range: format!("{}-{}", format_clock(self.start), format_clock(self.end)),
            course_code: self.course_code,
            venues: self.venues.into_iter().collect::<Vec<_>>().join(", "),
        }
    }
}

/// Collapses records sharing a (day, course code) into one row spanning the
/// earliest start to the latest end, with the sorted union of venues.
/// Records whose time label cannot be parsed are skipped with a
/// `MalformedTimeLabel` warning.
pub fn merge_times(
    records: &[CanonicalRecord],
    warnings: &mut Vec<ExtractWarning>,
) -> Vec<MergedRecord> {
    let mut groups: Vec<MergeGroup> = Vec::new();
    let mut positions: HashMap<(Option<String>, String), usize> = HashMap::new();

    for (index, record) in records.iter().enumerate() {
        let Some(range) = parse_time_label(&record.time_label) else {
            debug!(label = %record.time_label, "unparsable time label");
            warnings.push(
                ExtractWarning::new(
                    WarningCode::MalformedTimeLabel,
                    "time label is not a start-end range; skipped",
                )
                .with_row(index)
                .with_text(record.time_label.clone()),
            );
            continue;
        };

        let key = (record.day.clone(), record.course_code.clone());
        if let Some(&position) = positions.get(&key) {
            groups[position].absorb(range, &record.venue);
            continue;
        }

        positions.insert(key, groups.len());
        let mut group = MergeGroup {
            day: record.day.clone(),
            course_code: record.course_code.clone(),
            start: range.start,
            end: range.end,
            venues: BTreeSet::new(),
        };
        group.absorb(range, &record.venue);
        groups.push(group);
    }

    groups.into_iter().map(MergeGroup::into_record).collect()
}
