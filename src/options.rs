use std::str::FromStr;

/// Which worksheet of a workbook becomes the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SheetSelection {
    #[default]
    First,
    /// 1-based position in workbook order.
    Index(usize),
    Name(String),
}

impl FromStr for SheetSelection {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err("sheet selection cannot be empty".to_string());
        }

        if trimmed.chars().all(|ch| ch.is_ascii_digit()) {
            let index: usize = trimmed
                .parse()
                .map_err(|_| format!("invalid sheet index: '{trimmed}'"))?;
            if index == 0 {
                return Err("sheet indexes are 1-based".to_string());
            }
            return Ok(Self::Index(index));
        }

        Ok(Self::Name(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{other}', expected csv or json")),
        }
    }
}

/// Shape of the course-code prefix searched for in matched cell text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CodePattern {
    /// Exactly three uppercase letters before the four digits.
    #[default]
    ThreeLetter,
    /// Any run of uppercase letters at a word boundary.
    AnyLetters,
}

impl FromStr for CodePattern {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "three-letter" | "strict" => Ok(Self::ThreeLetter),
            "any-letters" | "lenient" => Ok(Self::AnyLetters),
            other => Err(format!(
                "unknown code pattern '{other}', expected three-letter or any-letters"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    pub sheet: SheetSelection,
    pub delimiter: u8,
    pub format: OutputFormat,
    pub code_pattern: CodePattern,
    pub include_header: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            sheet: SheetSelection::First,
            delimiter: b',',
            format: OutputFormat::Csv,
            code_pattern: CodePattern::ThreeLetter,
            include_header: true,
        }
    }
}
