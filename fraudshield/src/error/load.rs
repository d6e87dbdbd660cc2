use thiserror::Error;

/// Everything that can go wrong while turning an uploaded file into a
/// transaction table. Messages are shown to the user as-is.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("The file is empty: expected a header row with sender, receiver and amount columns")]
    MissingHeader,

    #[error("Missing required column(s): {}. Found columns: {}", .missing.join(", "), found_columns(.found))]
    MissingColumns { missing: Vec<String>, found: Vec<String> },

    #[error("Column '{0}' appears more than once (column names are case-insensitive)")]
    DuplicateColumn(String),

    #[error("Malformed CSV at line {line}: {reason}")]
    Malformed { line: u64, reason: String },

    #[error("Empty {column} at line {line}")]
    EmptyAccount { line: u64, column: &'static str },

    #[error("Invalid amount '{value}' at line {line}: expected a number")]
    InvalidAmount { line: u64, value: String },

    #[error("Negative amount {value} at line {line}: amounts must be non-negative")]
    NegativeAmount { line: u64, value: f64 },

    #[error("Failed to read the file: {0}")]
    Io(#[from] std::io::Error),
}

fn found_columns(found: &[String]) -> String {
    if found.is_empty() { "none".to_string() } else { found.join(", ") }
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        match err.into_kind() {
            csv::ErrorKind::Io(e) => LoadError::Io(e),
            csv::ErrorKind::UnequalLengths { expected_len, len, .. } => LoadError::Malformed {
                line,
                reason: format!("expected {} fields, found {}", expected_len, len),
            },
            csv::ErrorKind::Utf8 { err, .. } => LoadError::Malformed { line, reason: format!("invalid UTF-8 ({})", err) },
            other => LoadError::Malformed { line, reason: format!("{:?}", other) },
        }
    }
}
