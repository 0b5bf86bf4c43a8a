//! CLI inspection entry point.
//!
//! # Responsibility
//! - Load a dataset and map geometry from JSON files.
//! - Print the ordered count-circle render list for one surface size.
//!
//! Usage: `dotsmap <dataset.json> <map.json> [--width W] [--height H]
//! [--collapse REGION]... [--selected KEY] [--log-dir DIR] [--verbose]`

use clap::Parser;
use dotsmap_core::{
    DatasetStore, GeometricProjector, Granularity, Interaction, LogSettings, MapConfig,
    MapGeometry, ProjectQuery, RegionAggregator, Surface,
};
use log::{error, info};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about = "Print the projects dots map render list")]
struct Args {
    /// Dataset JSON: array of project records
    dataset: PathBuf,

    /// Map geometry JSON: `{ "countries": [...], "regions": [...] }`
    map: PathBuf,

    /// Surface width in pixels
    #[arg(long, default_value_t = 1000.0, value_parser = parse_dimension)]
    width: f64,

    /// Surface height in pixels
    #[arg(long, default_value_t = 500.0, value_parser = parse_dimension)]
    height: f64,

    /// Region drawn as one circle instead of its member countries (repeatable)
    #[arg(long = "collapse", value_name = "REGION", value_delimiter = ',')]
    collapse: Vec<String>,

    /// Circle key rendered as selected
    #[arg(long)]
    selected: Option<String>,

    /// Absolute directory for rolling log files
    #[arg(long, env = "DOTSMAP_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, default_value_t = dotsmap_core::default_log_level().to_string())]
    log_level: String,

    /// Echo log events to stderr as well (needs --log-dir)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn granularity(&self) -> Granularity {
        let regions: Vec<String> = self
            .collapse
            .iter()
            .map(|region| region.trim().to_string())
            .filter(|region| !region.is_empty())
            .collect();
        if regions.is_empty() {
            Granularity::Country
        } else {
            Granularity::Collapsed { regions }
        }
    }

    fn log_settings(&self) -> Result<Option<LogSettings>, dotsmap_core::LoggingError> {
        self.log_dir
            .as_ref()
            .map(|dir| {
                LogSettings::new(&self.log_level, dir)
                    .map(|settings| settings.echo_to_stderr(self.verbose))
            })
            .transpose()
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("dotsmap: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    if let Some(settings) = args.log_settings()? {
        dotsmap_core::init_logging(&settings)?;
    }

    let config = MapConfig::from_env()?;
    let dataset = DatasetStore::from_json_file(&args.dataset)?;
    let geometry = MapGeometry::from_json_file(&args.map)?;
    let query = ProjectQuery::new(Arc::new(dataset), Arc::new(geometry));

    let granularity = args.granularity();
    let entries = RegionAggregator::new(&query).aggregate(&granularity);
    let projector = GeometricProjector::new(query.geometry(), &config);
    let circles = projector.render_list(
        &entries,
        Some(Surface::new(args.width, args.height)),
        &Interaction::new(args.selected.as_deref(), None),
    );
    info!(
        "event=cli_run module=cli status=ok granularity={:?} circles={}",
        granularity,
        circles.len()
    );

    println!("dotsmap_core version={}", dotsmap_core::core_version());
    for circle in circles {
        println!(
            "{} count={} x={:.1} y={:.1} r={} fill={}",
            circle.display_name,
            circle.display_label,
            circle.x,
            circle.y,
            circle.radius,
            circle.fill_color
        );
    }
    Ok(())
}

fn parse_dimension(raw: &str) -> Result<f64, String> {
    raw.parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite() && *parsed > 0.0)
        .ok_or_else(|| format!("`{raw}` is not a positive pixel size"))
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::{CommandFactory, Parser};
    use dotsmap_core::Granularity;

    #[test]
    fn args_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_render_countries_on_a_1000_by_500_surface() {
        let args = Args::try_parse_from(["dotsmap", "data.json", "map.json"]).unwrap();
        assert_eq!(args.dataset.to_str(), Some("data.json"));
        assert_eq!(args.map.to_str(), Some("map.json"));
        assert_eq!((args.width, args.height), (1000.0, 500.0));
        assert_eq!(args.granularity(), Granularity::Country);
        assert!(!args.verbose);
    }

    #[test]
    fn collapse_accepts_repeats_and_commas() {
        let args = Args::try_parse_from([
            "dotsmap",
            "data.json",
            "map.json",
            "--collapse",
            "europe",
            "--collapse",
            "global, ",
            "--width",
            "640",
        ])
        .unwrap();
        assert_eq!(
            args.granularity(),
            Granularity::Collapsed {
                regions: vec!["europe".to_string(), "global".to_string()]
            }
        );
        assert_eq!(args.width, 640.0);
    }

    #[test]
    fn rejects_missing_map_and_bad_dimensions() {
        assert!(Args::try_parse_from(["dotsmap", "data.json"]).is_err());
        assert!(
            Args::try_parse_from(["dotsmap", "data.json", "map.json", "--height", "-5"]).is_err()
        );
        assert!(
            Args::try_parse_from(["dotsmap", "data.json", "map.json", "--width", "NaN"]).is_err()
        );
    }

    #[test]
    fn log_settings_follow_log_dir_and_verbose() {
        let without = Args::try_parse_from(["dotsmap", "d.json", "m.json"]).unwrap();
        if without.log_dir.is_none() {
            assert!(without.log_settings().unwrap().is_none());
        }

        let relative = Args::try_parse_from([
            "dotsmap", "d.json", "m.json", "--log-dir", "logs", "-v",
        ])
        .unwrap();
        assert!(relative.log_settings().is_err());
    }
}
