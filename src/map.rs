//! Interactive heatmap output.
//!
//! The map is a single self-contained HTML page driving Leaflet with the
//! `leaflet.heat` and `Leaflet.draw` plugins. Point data is embedded as JSON.

use std::fs;
use std::path::PathBuf;

use log::info;
use serde::Serialize;
use serde_json::json;

use crate::error::TimelineError;
use crate::geojson_export::to_feature_collection;
use crate::parser::record_coords;
use crate::timeline_types::Record;

type Result<T> = std::result::Result<T, TimelineError>;

const TEMPLATE: &str = include_str!("map_template.html");

pub const MAP_FILE_NAME: &str = "index.html";
pub const INITIAL_ZOOM: u8 = 10;

const HEAT_MIN_OPACITY: f64 = 0.3;
const HEAT_RADIUS: u32 = 10;
const HEAT_BLUR: u32 = 15;
const HEAT_GRADIENT: [(&str, &str); 5] = [
    ("0.2", "blue"),
    ("0.4", "cyan"),
    ("0.6", "lime"),
    ("0.8", "yellow"),
    ("1.0", "red"),
];

/// Frames per second for the time-indexed heatmap.
const TIME_MIN_SPEED: f64 = 0.1;
const TIME_MAX_SPEED: f64 = 10.0;
const TIME_SPEED_STEP: f64 = 0.1;
const TIME_DEFAULT_SPEED: f64 = 1.0;

/// Something that turns records into a persisted visual artifact.
pub trait Renderer {
    /// Render `records` and return the path of the written artifact.
    fn render(&self, records: &[Record]) -> Result<PathBuf>;
}

/// Writes `<out_dir>/index.html`.
#[derive(Debug, Clone)]
pub struct LeafletRenderer {
    pub out_dir: PathBuf,
    pub raw_points: bool,
}

impl LeafletRenderer {
    pub fn new(out_dir: impl Into<PathBuf>, raw_points: bool) -> Self {
        Self {
            out_dir: out_dir.into(),
            raw_points,
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.out_dir.join(MAP_FILE_NAME)
    }
}

impl Renderer for LeafletRenderer {
    fn render(&self, records: &[Record]) -> Result<PathBuf> {
        let html = render_html(records, self.raw_points)?;

        fs::create_dir_all(&self.out_dir)?;
        let path = self.output_path();
        fs::write(&path, html)?;

        info!("Wrote map to {}", path.display());
        Ok(path)
    }
}

/// Build the map page for `records` without touching the filesystem.
pub fn render_html(records: &[Record], raw_points: bool) -> Result<String> {
    if records.is_empty() {
        return Err(TimelineError::EmptyResult);
    }

    let points = records
        .iter()
        .map(|r| record_coords(r).map(|(lat, lng)| [lat, lng]))
        .collect::<Result<Vec<_>>>()?;
    let times: Vec<&str> = records.iter().map(|r| r.time.as_str()).collect();

    let center = median_center(&points).ok_or(TimelineError::EmptyResult)?;
    let raw = if raw_points {
        Some(to_feature_collection(records)?)
    } else {
        None
    };

    let gradient: serde_json::Map<String, serde_json::Value> = HEAT_GRADIENT
        .iter()
        .map(|(stop, color)| (stop.to_string(), json!(color)))
        .collect();
    let heat_options = json!({
        "minOpacity": HEAT_MIN_OPACITY,
        "radius": HEAT_RADIUS,
        "blur": HEAT_BLUR,
        "gradient": gradient,
    });
    let time_options = json!({
        "minSpeed": TIME_MIN_SPEED,
        "maxSpeed": TIME_MAX_SPEED,
        "speedStep": TIME_SPEED_STEP,
        "speed": TIME_DEFAULT_SPEED,
    });

    Ok(TEMPLATE
        .replace("__CENTER__", &script_json(&center)?)
        .replace("__ZOOM__", &INITIAL_ZOOM.to_string())
        .replace("__POINTS__", &script_json(&points)?)
        .replace("__TIMES__", &script_json(&times)?)
        .replace("__RAW_POINTS__", &script_json(&raw)?)
        .replace("__HEAT_OPTIONS__", &script_json(&heat_options)?)
        .replace("__TIME_OPTIONS__", &script_json(&time_options)?))
}

/// Median latitude and median longitude, taken independently.
pub fn median_center(points: &[[f64; 2]]) -> Option<[f64; 2]> {
    let lat = median(points.iter().map(|p| p[0]).collect())?;
    let lng = median(points.iter().map(|p| p[1]).collect())?;
    Some([lat, lng])
}

fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

/// JSON safe to paste inside a `<script>` element.
fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Record> {
        vec![
            Record::new("2024-01-01T00:00:00Z", "10.0", "20.0"),
            Record::new("2024-01-01T00:01:00Z", "11.0", "21.0"),
            Record::new("2024-01-01T00:02:00Z", "80.0", "-170.0"),
        ]
    }

    #[test]
    fn test_median_odd() {
        let c = median_center(&[[10.0, 20.0], [11.0, 21.0], [80.0, -170.0]]).unwrap();
        assert_eq!(c, [11.0, 20.0]);
    }

    #[test]
    fn test_median_even() {
        let c = median_center(&[[1.0, 4.0], [3.0, 2.0]]).unwrap();
        assert_eq!(c, [2.0, 3.0]);
    }

    #[test]
    fn test_median_empty() {
        assert!(median_center(&[]).is_none());
    }

    #[test]
    fn test_html_layers() {
        let html = render_html(&sample(), false).unwrap();
        assert!(html.contains("var center = [11.0,20.0];"));
        assert!(html.contains("zoom: 10"));
        assert!(html.contains("preferCanvas: true"));
        assert!(html.contains("var rawPoints = null;"));
        assert!(html.contains(r#""2024-01-01T00:02:00Z""#));
        assert!(html.contains("[80.0,-170.0]"));
        assert!(html.contains("L.Control.Draw"));
        assert!(html.contains("L.control.layers"));
        assert!(!html.contains("__"));
    }

    #[test]
    fn test_html_raw_points() {
        let html = render_html(&sample(), true).unwrap();
        assert!(html.contains("FeatureCollection"));
        assert!(html.contains("L.circleMarker"));
    }

    #[test]
    fn test_html_escapes_script_end() {
        let records = vec![Record::new("</script><b>", "1.0", "2.0")];
        let html = render_html(&records, true).unwrap();
        assert!(!html.contains("</script><b>"));
        assert!(html.contains(r"<\/script><b>"));
    }

    #[test]
    fn test_html_empty() {
        assert!(matches!(render_html(&[], false), Err(TimelineError::EmptyResult)));
    }

    #[test]
    fn test_invalid_coordinate_aborts() {
        let records = vec![Record::new("2024-01-01T00:00:00Z", "ten", "20.0")];
        assert!(matches!(
            render_html(&records, false),
            Err(TimelineError::InvalidCoordinate { .. })
        ));
    }
}
