use serde::{Deserialize, Serialize};

/// Parsed timeline export: the `semanticSegments` list, in document order.
#[derive(Debug, Default)]
pub struct Timeline {
    pub segments: Vec<Segment>,
}

/// One semantic segment. Visits and activities only contribute their
/// time span; movement segments also carry a `timelinePath`.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub timeline_path: Option<Vec<PathPoint>>,
}

/// A timestamped sample as stored in the export, e.g.
/// `{"point": "48.8584°, 2.2945°", "time": "2024-01-01T08:00:00.000+01:00"}`.
#[derive(Debug, Clone, Deserialize)]
pub struct PathPoint {
    pub point: String,
    pub time: String,
}

/// Output row. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub time: String,
    pub lat: String,
    pub lng: String,
}

impl Record {
    pub fn new(time: impl Into<String>, lat: impl Into<String>, lng: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            lat: lat.into(),
            lng: lng.into(),
        }
    }
}
