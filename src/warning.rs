#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningCode {
    NoCandidates,
    UnparsableCourseText,
    MalformedTimeLabel,
    UnknownDay,
}

/// A record-level problem that was skipped rather than failing the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractWarning {
    pub code: WarningCode,
    pub message: String,
    pub row: Option<usize>,
    pub text: Option<String>,
}

impl ExtractWarning {
    #[must_use]
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            row: None,
            text: None,
        }
    }

    #[must_use]
    pub fn with_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}
