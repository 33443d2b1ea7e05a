pub mod csv_writer;
pub mod error;
pub mod extractor;
pub mod geojson_export;
pub mod loader;
pub mod map;
pub mod options;
pub mod parser;
pub mod pipeline;
pub mod timeline_types;

use chrono::NaiveDate;
use wasm_bindgen::prelude::*;

use crate::error::TimelineError;
use crate::options::ConvertOptions;
use crate::timeline_types::Record;

/// Convert a timeline export to CSV text.
#[wasm_bindgen(js_name = timelineToCsv)]
pub fn timeline_to_csv(json: &str, options: JsValue) -> Result<String, JsValue> {
    console_error_panic_hook::set_once();

    let opts = parse_options(options)?;
    let records = records_from_json(json, &opts)?;
    Ok(csv_writer::to_csv_string(&records)?)
}

/// Convert a timeline export to GeoJSON points, returned as a JS object.
#[wasm_bindgen(js_name = timelineToGeoJson)]
pub fn timeline_to_geojson(json: &str, options: JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let opts = parse_options(options)?;
    let records = records_from_json(json, &opts)?;
    let fc = geojson_export::to_feature_collection(&records)?;
    serde_wasm_bindgen::to_value(&fc).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Convert a timeline export to GeoJSON points, returned as a JSON string.
#[wasm_bindgen(js_name = timelineToGeoJsonString)]
pub fn timeline_to_geojson_string(json: &str, options: JsValue) -> Result<String, JsValue> {
    console_error_panic_hook::set_once();

    let opts = parse_options(options)?;
    let records = records_from_json(json, &opts)?;
    let fc = geojson_export::to_feature_collection(&records)?;
    serde_json::to_string(&fc).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Render the standalone heatmap page for a timeline export.
#[wasm_bindgen(js_name = timelineToMapHtml)]
pub fn timeline_to_map_html(json: &str, options: JsValue) -> Result<String, JsValue> {
    console_error_panic_hook::set_once();

    let opts = parse_options(options)?;
    let records = records_from_json(json, &opts)?;
    Ok(map::render_html(&records, opts.raw_points)?)
}

/// Parse, filter and extract in one step. Fails with `EmptyResult` when no
/// point survives the filter.
pub fn records_from_json(json: &str, opts: &ConvertOptions) -> Result<Vec<Record>, TimelineError> {
    let range = opts.date_range(today())?;
    let timeline = parser::parse_timeline(json)?;
    extractor::extract_records(&timeline, &range)?.into_records()
}

fn parse_options(options: JsValue) -> Result<ConvertOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        Ok(ConvertOptions::default())
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

/// The local calendar date, from the JS clock in the browser.
#[cfg(target_arch = "wasm32")]
pub fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .unwrap_or(NaiveDate::MAX)
}

/// The local calendar date.
#[cfg(not(target_arch = "wasm32"))]
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
