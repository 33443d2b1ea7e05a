use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::Parser;
use env_logger::{Env, Target};
use log::{error, info};

use timeline2csv::options::ConvertOptions;
use timeline2csv::pipeline::{RunConfig, run};
use timeline2csv::today;

#[derive(Parser, Debug)]
#[command(version, about = "Convert a location-history timeline export to CSV and a heatmap")]
struct Cli {
    /// Timeline export to read
    #[arg(default_value = "Timeline.json")]
    input_json: PathBuf,

    /// CSV file to write (".csv" is appended if missing)
    #[arg(short, long = "output_csv", default_value = "timeline.csv")]
    output_csv: PathBuf,

    /// First date to include, YYYY-MM-DD
    #[arg(short, long = "start_date")]
    start_date: Option<NaiveDate>,

    /// Last date to include, YYYY-MM-DD (default: today)
    #[arg(short, long = "end_date")]
    end_date: Option<NaiveDate>,

    /// Draw every point as a marker on the map
    #[arg(short, long = "raw_points")]
    raw_points: bool,

    /// Directory for the generated map page
    #[arg(short, long = "map_dir", default_value = "map")]
    map_dir: PathBuf,

    /// Only write the CSV
    #[arg(long = "no_map")]
    no_map: bool,
}

impl Cli {
    fn into_config(self) -> RunConfig {
        RunConfig {
            input: self.input_json,
            output_csv: self.output_csv,
            options: ConvertOptions {
                start_date: self.start_date,
                end_date: self.end_date,
                raw_points: self.raw_points,
            },
            map_dir: (!self.no_map).then_some(self.map_dir),
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stdout)
        .format_target(false)
        .init();

    let config = Cli::parse().into_config();

    match run(&config, today()) {
        Ok(summary) => {
            info!(
                "Done: {} segments, {} with paths, {} points -> {}",
                summary.segments,
                summary.path_segments,
                summary.points,
                summary.csv_path.display()
            );
            if let Some(map) = summary.map_path {
                info!("Map: {}", map.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
