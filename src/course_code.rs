use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::model::{CandidateRecord, CanonicalRecord};
use crate::options::CodePattern;
use crate::warning::{ExtractWarning, WarningCode};

// Code, optional spaces, colon, then the lecturer or description up to the end.
static THREE_LETTER_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Z]{3}\s*\d{4}\s*:\s*.*").expect("hardcoded course code regex is valid")
});

static ANY_LETTER_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z]+\s*\d{4}\s*:\s*.*").expect("hardcoded course code regex is valid")
});

fn code_regex(pattern: CodePattern) -> &'static Regex {
    match pattern {
        CodePattern::ThreeLetter => &THREE_LETTER_CODE_RE,
        CodePattern::AnyLetters => &ANY_LETTER_CODE_RE,
    }
}

pub(crate) fn extract_course_code(text: &str, pattern: CodePattern) -> Option<String> {
    code_regex(pattern)
        .find(text)
        .map(|found| found.as_str().trim().to_string())
}

/// Replaces each candidate's matched text with its course code and drops
/// exact duplicates, keeping first-seen order. Candidates without a
/// recognizable code are dropped with an `UnparsableCourseText` warning.
pub fn canonicalize(
    records: &[CandidateRecord],
    pattern: CodePattern,
    warnings: &mut Vec<ExtractWarning>,
) -> Vec<CanonicalRecord> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let Some(course_code) = extract_course_code(&record.matched_text, pattern) else {
            debug!(text = %record.matched_text, "no course code in matched cell");
            warnings.push(
                ExtractWarning::new(
                    WarningCode::UnparsableCourseText,
                    "matched cell has no course code; skipped",
                )
                .with_row(index)
                .with_text(record.matched_text.clone()),
            );
            continue;
        };

        let canonical = CanonicalRecord {
            day: record.day.clone(),
            time_label: record.time_label.clone(),
            course_code,
            venue: record.venue.clone(),
        };
        if seen.insert(canonical.clone()) {
            out.push(canonical);
        }
    }

    out
}
