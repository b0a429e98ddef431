//! Command line tool finding the pole of inaccessibility of points read from CSV files.
//!
//! ```shell
//! nemo-cli coastline_north.csv coastline_south.csv --geojson result.geojson
//! ```
//!
//! Every file must have a header row followed by `longitude,latitude` records.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use nemo::render::{CartesianDump, GeoJsonRenderer, ResultRenderer};
use nemo::{Deduplication, DistanceModel, FinderOptions, PoleFinder};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "nemo-cli")]
#[command(about = "Find the point farthest from all points of the input files", long_about = None)]
struct Cli {
    /// CSV files with a header row and `longitude,latitude` records
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Radius of the sphere the Voronoi diagram is built on, in meters
    #[arg(long, default_value = "6378137")]
    radius: f64,

    /// How distances to the targets are measured
    #[arg(long, value_enum, default_value = "geodesic")]
    distance: Distance,

    /// Merge candidates closer than this many meters (default: exact duplicates only)
    #[arg(long)]
    dedup_tolerance_m: Option<f64>,

    /// Latitude offset of the second Voronoi pass, in degrees
    #[arg(long, default_value = "45", allow_hyphen_values = true)]
    lat_shift: f64,

    /// Longitude offset of the second Voronoi pass, in degrees
    #[arg(long, default_value = "90", allow_hyphen_values = true)]
    lon_shift: f64,

    /// Write targets, candidates and the result as GeoJSON to this file
    #[arg(long)]
    geojson: Option<PathBuf>,

    /// Write targets, candidates and the result as `role,x,y,z` CSV to this file
    #[arg(long)]
    cartesian: Option<PathBuf>,

    /// Measure candidates on all cores (requires the `parallel` feature)
    #[arg(long)]
    parallel: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Distance {
    /// Shortest path on the WGS84 ellipsoid
    Geodesic,
    /// Great circle on the sphere
    GreatCircle,
}

impl From<Distance> for DistanceModel {
    fn from(value: Distance) -> Self {
        match value {
            Distance::Geodesic => DistanceModel::Geodesic,
            Distance::GreatCircle => DistanceModel::GreatCircle,
        }
    }
}

impl Cli {
    fn options(&self) -> FinderOptions {
        let deduplication = match self.dedup_tolerance_m {
            Some(meters) => Deduplication::Tolerance { meters },
            None => Deduplication::Exact,
        };

        FinderOptions::default()
            .with_radius(self.radius)
            .with_shift(self.lat_shift, self.lon_shift)
            .with_distance_model(self.distance.into())
            .with_deduplication(deduplication)
            .with_parallel(self.parallel)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let targets = nemo::input::read_targets_files(cli.files.as_slice())
        .context("Failed to read target points")?;
    log::info!("Read {} targets from {} files", targets.len(), cli.files.len());

    let options = cli.options();
    let finder = PoleFinder::new(options).context("Invalid options")?;
    let solution = finder
        .find(&targets)
        .context("Failed to find the most remote point")?;

    println!("The most remote point is at {}", solution.remote);

    if let Some(path) = &cli.geojson {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        GeoJsonRenderer::new(BufWriter::new(file))
            .render(&targets, &solution.candidates, &solution.remote)
            .context("Failed to write GeoJSON")?;
        log::info!("GeoJSON written to {}", path.display());
    }

    if let Some(path) = &cli.cartesian {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        CartesianDump::new(BufWriter::new(file), options.radius())
            .render(&targets, &solution.candidates, &solution.remote)
            .context("Failed to write cartesian points")?;
        log::info!("Cartesian points written to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_options() {
        let cli = Cli::try_parse_from([
            "nemo-cli",
            "a.csv",
            "b.csv",
            "--distance",
            "great-circle",
            "--lat-shift",
            "-30",
            "--dedup-tolerance-m",
            "2.5",
        ])
        .unwrap();

        assert_eq!(cli.files.len(), 2);
        let options = cli.options();
        assert_eq!(options.distance_model(), DistanceModel::GreatCircle);
        assert_eq!(options.shift(), (-30.0, 90.0));
        assert_eq!(
            options.deduplication(),
            Deduplication::Tolerance { meters: 2.5 }
        );
        assert_eq!(options.radius(), 6_378_137.0);
    }

    #[test]
    fn requires_files() {
        assert!(Cli::try_parse_from(["nemo-cli"]).is_err());
    }
}
