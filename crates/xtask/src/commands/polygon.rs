//! Print a cell polygon's vertices and derived metrics

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use serde::Serialize;

use grid_core::{CellPolygon, CellPolygonSpec};

use super::OutputFormat;

/// Build a regular cell polygon and print its geometry
#[derive(Parser)]
pub struct PolygonCmd {
    /// Number of vertices (0, 3, 4 or 6)
    #[arg(short = 'n', long, default_value_t = 6)]
    vertices: u8,

    /// Inscribed-circle radius in pixels
    #[arg(short, long, default_value_t = 50.0)]
    inradius: f64,

    /// Rotation in degrees
    #[arg(short, long, default_value_t = 0.0, allow_hyphen_values = true)]
    rotation: f64,

    /// Apply the isometric squash
    #[arg(long)]
    isometric: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Serialize)]
struct PolygonReport {
    vertex_count: usize,
    circumradius: f64,
    side_length: f64,
    side_lengths: Vec<f64>,
    perimeter: f64,
    aspect_ratio: f64,
    irregular: bool,
    vertices: Vec<[f64; 2]>,
    half_path: Vec<[f64; 2]>,
}

impl PolygonCmd {
    pub fn execute(self) -> Result<()> {
        let spec =
            CellPolygonSpec::try_new(self.vertices, self.inradius, self.rotation, self.isometric)
                .context("Cannot build cell polygon")?;
        let polygon = CellPolygon::new(spec);

        let report = PolygonReport {
            vertex_count: polygon.vertex_count(),
            circumradius: polygon.circumradius(),
            side_length: polygon.side_length(),
            side_lengths: polygon.side_lengths().to_vec(),
            perimeter: polygon.perimeter(),
            aspect_ratio: polygon.aspect_ratio(),
            irregular: polygon.is_irregular(),
            vertices: polygon.vertices().iter().map(|v| v.to_array()).collect(),
            half_path: polygon.half_path().iter().map(|v| v.to_array()).collect(),
        };

        match self.format {
            OutputFormat::Summary => print_summary(&report),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        }
        Ok(())
    }
}

fn print_summary(report: &PolygonReport) {
    println!("{}", style("=== Cell Polygon ===").bold().green());
    println!("  Vertices: {}", report.vertex_count);
    println!("  Circumradius: {:.3}", report.circumradius);
    println!("  Side length: {:.3}", report.side_length);
    println!("  Perimeter: {:.3}", report.perimeter);
    println!("  Aspect ratio: {:.3}", report.aspect_ratio);
    if report.irregular {
        println!("  {}", style("Irregular after isometric squash").yellow());
    }
    println!();

    println!("{}", style("Path:").bold().yellow());
    for [x, y] in &report.vertices {
        println!("  ({x:.3}, {y:.3})");
    }
    println!("{}", style("Half path:").bold().yellow());
    for [x, y] in &report.half_path {
        println!("  ({x:.3}, {y:.3})");
    }
}
