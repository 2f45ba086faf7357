//! Build a light or vision area and report its geometry

use anyhow::Result;
use clap::Parser;
use console::style;
use serde::Serialize;
use std::time::Instant;

use grid_core::{Area, ArcParams, CellPoint, MovementMetric, ShapeKind, TokenFootprint, ZoneSettings};

use super::OutputFormat;
use crate::grid_args::{GridArgs, parse_metric, parse_pair, parse_shape};

/// Build a vision area around a token
#[derive(Parser)]
pub struct Vision {
    #[command(flatten)]
    grid: GridArgs,

    /// Shape (circle, square, cone, hex, grid_conforming)
    #[arg(long, default_value = "grid_conforming", value_parser = parse_shape)]
    shape: ShapeKind,

    /// Range in zone distance units; 0 uses the zone's token vision
    #[arg(short, long, default_value_t = 15.0)]
    range: f64,

    /// Zone distance units per cell
    #[arg(long, default_value_t = 5.0)]
    units_per_cell: f64,

    /// Movement metric for grid-conforming areas
    #[arg(long, default_value = "one_two_one", value_parser = parse_metric)]
    metric: MovementMetric,

    /// Token footprint in cells, as WIDTH,HEIGHT
    #[arg(long, value_name = "W,H", default_value = "1,1", value_parser = parse_pair)]
    token: (i32, i32),

    /// Token facing in degrees
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    facing: f64,

    /// Cone arc in degrees
    #[arg(long, default_value_t = 90.0)]
    arc: f64,

    /// Cone offset from the facing, in degrees
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    arc_offset: f64,

    /// Grow the area with the token's footprint
    #[arg(long)]
    scale_with_token: bool,

    /// Build the area this many times to exercise the cache
    #[arg(long, default_value_t = 1)]
    repeat: u32,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Serialize)]
struct VisionReport {
    shape: String,
    regions: usize,
    vertex_count: usize,
    measure: f64,
    bounds: Option<[f64; 4]>,
    radius_builds: u64,
    elapsed_micros: u64,
    polygons: Vec<Vec<[f64; 2]>>,
}

impl Vision {
    pub fn execute(self) -> Result<()> {
        let grid = self.grid.build()?;
        let zone = ZoneSettings::new(self.units_per_cell, self.metric);
        let (width, height) = self.token;
        let token = TokenFootprint::block(&grid, CellPoint::ORIGIN, width.max(1), height.max(1))
            .with_facing(self.facing);
        let arc = ArcParams::new(self.arc, self.arc_offset);

        let started = Instant::now();
        let mut area = Area::new();
        for _ in 0..self.repeat.max(1) {
            area = grid.shaped_area(
                &zone,
                self.shape,
                &token,
                self.range,
                arc,
                self.scale_with_token,
            );
        }
        let elapsed = started.elapsed();
        tracing::info!(
            shape = %self.shape,
            repeat = self.repeat,
            elapsed_ms = elapsed.as_millis() as u64,
            "vision area built"
        );

        let report = VisionReport {
            shape: self.shape.to_string(),
            regions: area.polygons().len(),
            vertex_count: area.vertex_count(),
            measure: area.measure(),
            bounds: area
                .bounds()
                .map(|b| [b.min.x, b.min.y, b.width(), b.height()]),
            radius_builds: grid.vision_cache().build_count(),
            elapsed_micros: elapsed.as_micros() as u64,
            polygons: area
                .polygons()
                .iter()
                .map(|p| p.exterior().iter().map(|v| v.to_array()).collect())
                .collect(),
        };

        match self.format {
            OutputFormat::Summary => print_summary(&report),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        }
        Ok(())
    }
}

fn print_summary(report: &VisionReport) {
    println!("{}", style("=== Vision Area ===").bold().green());
    println!("  Shape: {}", report.shape);
    println!("  Regions: {}", report.regions);
    println!("  Vertices: {}", report.vertex_count);
    println!("  Area: {:.1} px²", report.measure);
    match report.bounds {
        Some([x, y, w, h]) => println!("  Bounds: ({x:.1}, {y:.1}) {w:.1} x {h:.1}"),
        None => println!("  Bounds: {}", style("empty").yellow()),
    }
    println!();
    println!("{}", style("Cache:").bold().yellow());
    println!("  Radius areas built: {}", report.radius_builds);
    println!("  Elapsed: {} µs", report.elapsed_micros);
}
