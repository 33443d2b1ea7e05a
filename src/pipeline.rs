use std::path::PathBuf;

use chrono::NaiveDate;
use log::info;

use crate::csv_writer::write_csv_file;
use crate::error::TimelineError;
use crate::extractor::extract_records;
use crate::loader::{check_input_path, load_timeline};
use crate::map::{LeafletRenderer, Renderer};
use crate::options::ConvertOptions;

type Result<T> = std::result::Result<T, TimelineError>;

/// Everything one file-to-file run needs.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output_csv: PathBuf,
    pub options: ConvertOptions,
    /// Directory for the map page; `None` skips the map.
    pub map_dir: Option<PathBuf>,
}

#[derive(Debug)]
pub struct RunSummary {
    pub segments: usize,
    pub path_segments: usize,
    pub points: usize,
    pub csv_path: PathBuf,
    pub map_path: Option<PathBuf>,
}

/// Load, filter, then write the CSV and the Leaflet map.
pub fn run(config: &RunConfig, today: NaiveDate) -> Result<RunSummary> {
    let renderer = config
        .map_dir
        .as_ref()
        .map(|dir| LeafletRenderer::new(dir, config.options.raw_points));
    run_with(config, today, renderer.as_ref().map(|r| r as &dyn Renderer))
}

/// Same as [`run`] with a caller-supplied renderer.
pub fn run_with(
    config: &RunConfig,
    today: NaiveDate,
    renderer: Option<&dyn Renderer>,
) -> Result<RunSummary> {
    check_input_path(&config.input)?;
    let range = config.options.date_range(today)?;
    info!("Keeping points dated {} through {}", range.start, range.end);

    let timeline = load_timeline(&config.input)?;
    let segments = timeline.segments.len();

    let extraction = extract_records(&timeline, &range)?;
    drop(timeline);
    let path_segments = extraction.path_segments;
    let records = extraction.into_records()?;

    let csv_path = write_csv_file(&records, &config.output_csv)?;
    let map_path = match renderer {
        Some(renderer) => Some(renderer.render(&records)?),
        None => None,
    };

    Ok(RunSummary {
        segments,
        path_segments,
        points: records.len(),
        csv_path,
        map_path,
    })
}
