use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::TimelineError;

/// Options for timeline conversion.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertOptions {
    /// First calendar date to keep, inclusive (default: no lower bound)
    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    /// Last calendar date to keep, inclusive (default: today)
    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    /// Draw one marker per point on the map (default: false)
    #[serde(default)]
    pub raw_points: bool,
}

impl ConvertOptions {
    /// Resolve the filter bounds, with `today` standing in for a missing end.
    pub fn date_range(&self, today: NaiveDate) -> Result<DateRange, TimelineError> {
        DateRange::new(self.start_date, self.end_date, today)
    }
}

/// Inclusive calendar-date window applied to path points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Self, TimelineError> {
        let start = start.unwrap_or(NaiveDate::MIN);
        let end = end.unwrap_or(today);
        if start > end {
            return Err(TimelineError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range that accepts every representable date.
    pub fn unbounded() -> Self {
        Self {
            start: NaiveDate::MIN,
            end: NaiveDate::MAX,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_defaults() {
        let today = date(2024, 6, 1);
        let range = ConvertOptions::default().date_range(today).unwrap();
        assert_eq!(range.start, NaiveDate::MIN);
        assert_eq!(range.end, today);
        assert!(range.contains(date(1970, 1, 1)));
        assert!(!range.contains(date(2024, 6, 2)));
    }

    #[test]
    fn test_bounds_inclusive() {
        let range = DateRange::new(Some(date(2024, 2, 1)), Some(date(2024, 2, 29)), date(2025, 1, 1))
            .unwrap();
        assert!(range.contains(date(2024, 2, 1)));
        assert!(range.contains(date(2024, 2, 29)));
        assert!(!range.contains(date(2024, 1, 31)));
        assert!(!range.contains(date(2024, 3, 1)));
    }

    #[test]
    fn test_single_day_range() {
        let day = date(2024, 2, 1);
        let range = DateRange::new(Some(day), Some(day), day).unwrap();
        assert!(range.contains(day));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = DateRange::new(Some(date(2024, 3, 1)), Some(date(2024, 2, 1)), date(2025, 1, 1))
            .unwrap_err();
        assert!(matches!(err, TimelineError::InvalidDateRange { .. }));
    }

    #[test]
    fn test_deserialize_camel_case() {
        let opts: ConvertOptions = serde_json::from_str(
            r#"{"startDate": "2024-01-01", "endDate": "2024-12-31", "rawPoints": true}"#,
        )
        .unwrap();
        assert_eq!(opts.start_date, Some(date(2024, 1, 1)));
        assert_eq!(opts.end_date, Some(date(2024, 12, 31)));
        assert!(opts.raw_points);

        let empty: ConvertOptions = serde_json::from_str("{}").unwrap();
        assert!(empty.start_date.is_none());
        assert!(!empty.raw_points);
    }
}
