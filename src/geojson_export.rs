use geojson::{Feature, FeatureCollection, Geometry, Value};
use serde_json::{Map, Value as JsonValue};

use crate::error::TimelineError;
use crate::parser::record_coords;
use crate::timeline_types::Record;

/// Convert records to a FeatureCollection of `Point` features, one per
/// record, each carrying its timestamp as the `time` property.
pub fn to_feature_collection(records: &[Record]) -> Result<FeatureCollection, TimelineError> {
    let features = records
        .iter()
        .map(record_to_feature)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

fn record_to_feature(record: &Record) -> Result<Feature, TimelineError> {
    let (lat, lng) = record_coords(record)?;
    // GeoJSON positions are [lon, lat].
    let geometry = Geometry::new(Value::Point(vec![lng, lat]));

    let mut props = Map::new();
    props.insert("time".to_string(), JsonValue::String(record.time.clone()));

    Ok(Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: Some(props),
        foreign_members: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_order_and_time() {
        let records = vec![Record::new("2024-01-01T00:00:00Z", "35.6762", "139.6503")];
        let fc = to_feature_collection(&records).unwrap();

        assert_eq!(fc.features.len(), 1);
        let geom = fc.features[0].geometry.as_ref().unwrap();
        if let Value::Point(coords) = &geom.value {
            assert!((coords[0] - 139.6503).abs() < 1e-10); // lon
            assert!((coords[1] - 35.6762).abs() < 1e-10); // lat
        } else {
            panic!("Expected Point geometry");
        }

        let props = fc.features[0].properties.as_ref().unwrap();
        assert_eq!(props["time"], "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_empty_records() {
        let fc = to_feature_collection(&[]).unwrap();
        assert!(fc.features.is_empty());
    }

    #[test]
    fn test_invalid_coordinate() {
        let records = vec![Record::new("2024-01-01T00:00:00Z", "x", "0")];
        assert!(matches!(
            to_feature_collection(&records),
            Err(TimelineError::InvalidCoordinate { .. })
        ));
    }
}
