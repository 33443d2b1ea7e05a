use chrono::{DateTime, NaiveDate};
use log::info;
use serde_json::Value as JsonValue;

use crate::error::TimelineError;
use crate::timeline_types::*;

type Result<T> = std::result::Result<T, TimelineError>;

pub const SEGMENTS_KEY: &str = "semanticSegments";

const POINT_SEPARATOR: &str = ", ";
const DEGREE: char = '°';

/// Parse a timeline export into its segment list.
pub fn parse_timeline(json: &str) -> Result<Timeline> {
    let mut doc: JsonValue = serde_json::from_str(json)?;

    let Some(root) = doc.as_object_mut() else {
        return Err(TimelineError::MissingKey(SEGMENTS_KEY));
    };
    info!("Top-level keys: {:?}", root.keys().collect::<Vec<_>>());

    let Some(JsonValue::Array(items)) = root.remove(SEGMENTS_KEY) else {
        return Err(TimelineError::MissingKey(SEGMENTS_KEY));
    };

    let segments = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| parse_segment(index, item))
        .collect::<Result<Vec<_>>>()?;

    Ok(Timeline { segments })
}

fn parse_segment(index: usize, item: JsonValue) -> Result<Segment> {
    serde_json::from_value(item).map_err(|e| TimelineError::InvalidSegment {
        index,
        reason: e.to_string(),
    })
}

/// Split a `"<lat>°, <lng>°"` point string into its latitude and longitude
/// text. Both halves must be finite numbers within WGS84 bounds; the
/// returned slices keep the original digits.
pub fn parse_point(point: &str) -> Result<(&str, &str)> {
    let invalid = || TimelineError::InvalidCoordinate {
        value: point.to_string(),
    };

    let mut parts = point.split(POINT_SEPARATOR);
    let (Some(lat), Some(lng), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };

    let lat = strip_degree(lat);
    let lng = strip_degree(lng);

    match (parse_degrees(lat, 90.0), parse_degrees(lng, 180.0)) {
        (Some(_), Some(_)) => Ok((lat, lng)),
        _ => Err(invalid()),
    }
}

/// Numeric latitude/longitude of an extracted record.
pub fn record_coords(record: &Record) -> Result<(f64, f64)> {
    let invalid = || TimelineError::InvalidCoordinate {
        value: format!("{}, {}", record.lat, record.lng),
    };
    let lat = parse_degrees(&record.lat, 90.0).ok_or_else(invalid)?;
    let lng = parse_degrees(&record.lng, 180.0).ok_or_else(invalid)?;
    Ok((lat, lng))
}

/// Calendar date of a timestamp, in the timestamp's own offset.
pub fn parse_date(time: &str) -> Result<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(time) {
        return Ok(dt.date_naive());
    }

    // Exports occasionally carry bare dates or non-RFC 3339 times.
    let separated = matches!(time.as_bytes().get(10), None | Some(b'T' | b' '));
    time.get(..10)
        .filter(|_| separated)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        .ok_or_else(|| TimelineError::InvalidTimestamp {
            value: time.to_string(),
        })
}

fn strip_degree(part: &str) -> &str {
    part.strip_suffix(DEGREE).unwrap_or(part)
}

fn parse_degrees(text: &str, limit: f64) -> Option<f64> {
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.abs() <= limit)
}
