use log::{debug, info};

use crate::error::TimelineError;
use crate::options::DateRange;
use crate::parser::{parse_date, parse_point};
use crate::timeline_types::*;

type Result<T> = std::result::Result<T, TimelineError>;

/// Records pulled out of a timeline, with traversal counts.
#[derive(Debug, Default)]
pub struct Extraction {
    pub records: Vec<Record>,
    /// Segments that carried a `timelinePath`, whether or not any of their
    /// points survived the date filter.
    pub path_segments: usize,
}

impl Extraction {
    pub fn point_count(&self) -> usize {
        self.records.len()
    }

    /// The records, or `EmptyResult` when the filter left nothing.
    pub fn into_records(self) -> Result<Vec<Record>> {
        if self.records.is_empty() {
            return Err(TimelineError::EmptyResult);
        }
        Ok(self.records)
    }
}

/// Flatten every `timelinePath` into records, keeping points whose date
/// falls inside `range`. Order follows segment order, then point order.
pub fn extract_records(timeline: &Timeline, range: &DateRange) -> Result<Extraction> {
    let mut extraction = Extraction::default();

    for (index, segment) in timeline.segments.iter().enumerate() {
        let Some(path) = &segment.timeline_path else {
            continue;
        };

        let before = extraction.records.len();
        for location in path {
            if !range.contains(parse_date(&location.time)?) {
                continue;
            }
            let (lat, lng) = parse_point(&location.point)?;
            extraction
                .records
                .push(Record::new(location.time.as_str(), lat, lng));
        }
        extraction.path_segments += 1;

        debug!(
            "Segment #{index} ({} to {}): kept {} of {} path points",
            segment.start_time.as_deref().unwrap_or("?"),
            segment.end_time.as_deref().unwrap_or("?"),
            extraction.records.len() - before,
            path.len()
        );
    }

    info!("Number of 'timelinePath' segments: {}", extraction.path_segments);
    info!("Number of location data points: {}", extraction.point_count());
    if let Some(first) = extraction.records.first() {
        info!("First data point: {first:?}");
    }

    Ok(extraction)
}
