use std::path::PathBuf;
use wasm_bindgen::JsValue;

#[derive(Debug)]
pub enum TimelineError {
    Io(std::io::Error),
    InputNotFound(PathBuf),
    WrongExtension(PathBuf),
    JsonParse(serde_json::Error),
    MissingKey(&'static str),
    InvalidSegment {
        index: usize,
        reason: String,
    },
    InvalidTimestamp {
        value: String,
    },
    InvalidCoordinate {
        value: String,
    },
    InvalidDateRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },
    EmptyResult,
    Csv(csv::Error),
}

impl std::fmt::Display for TimelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InputNotFound(path) => {
                write!(f, "Input file '{}' does not exist", path.display())
            }
            Self::WrongExtension(path) => {
                write!(f, "Input file '{}' is not a .json file", path.display())
            }
            Self::JsonParse(e) => write!(f, "JSON parse error: {e}"),
            Self::MissingKey(key) => write!(f, "Missing top-level key '{key}'"),
            Self::InvalidSegment { index, reason } => {
                write!(f, "Invalid segment #{index}: {reason}")
            }
            Self::InvalidTimestamp { value } => write!(f, "Invalid timestamp '{value}'"),
            Self::InvalidCoordinate { value } => write!(f, "Invalid coordinate '{value}'"),
            Self::InvalidDateRange { start, end } => {
                write!(f, "Start date {start} is after end date {end}")
            }
            Self::EmptyResult => write!(f, "No location points matched the date range"),
            Self::Csv(e) => write!(f, "CSV error: {e}"),
        }
    }
}

impl std::error::Error for TimelineError {}

impl From<std::io::Error> for TimelineError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for TimelineError {
    fn from(e: serde_json::Error) -> Self {
        Self::JsonParse(e)
    }
}

impl From<csv::Error> for TimelineError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e)
    }
}

impl From<TimelineError> for JsValue {
    fn from(e: TimelineError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}
