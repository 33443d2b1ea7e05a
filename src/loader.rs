use std::fs;
use std::path::Path;

use log::info;

use crate::error::TimelineError;
use crate::parser::parse_timeline;
use crate::timeline_types::Timeline;

type Result<T> = std::result::Result<T, TimelineError>;

/// Reject paths that don't exist or don't carry a `.json` extension.
pub fn check_input_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(TimelineError::InputNotFound(path.to_path_buf()));
    }

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        return Err(TimelineError::WrongExtension(path.to_path_buf()));
    }

    Ok(())
}

/// Read and parse a timeline export from disk.
pub fn load_timeline(path: &Path) -> Result<Timeline> {
    check_input_path(path)?;

    let text = fs::read_to_string(path)?;
    let timeline = parse_timeline(&text)?;

    info!(
        "Number of 'semantic segments' in {}: {}",
        path.display(),
        timeline.segments.len()
    );
    Ok(timeline)
}
