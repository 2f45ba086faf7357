//! Inspect a grid's cell metrics and coordinate conversions

use anyhow::Result;
use clap::Parser;
use console::style;
use serde::Serialize;

use grid_core::{CellPoint, Grid, MovementMetric, Rect, ZonePoint, alpha_label};

use super::OutputFormat;
use crate::grid_args::{GridArgs, parse_metric, parse_pair};

/// Inspect grid metrics and conversions
#[derive(Parser)]
pub struct Inspect {
    #[command(flatten)]
    grid: GridArgs,

    /// Cell to convert to pixel space
    #[arg(long, value_name = "X,Y", value_parser = parse_pair, allow_hyphen_values = true)]
    cell: Option<(i32, i32)>,

    /// Pixel point to convert to cell space
    #[arg(long, value_name = "X,Y", value_parser = parse_pair, allow_hyphen_values = true)]
    point: Option<(i32, i32)>,

    /// Measure the distance from --cell to this cell
    #[arg(long, value_name = "X,Y", value_parser = parse_pair, allow_hyphen_values = true, requires = "cell")]
    distance_to: Option<(i32, i32)>,

    /// Movement metric for distances (no_diagonals, chebyshev, one_two_one)
    #[arg(long, default_value = "one_two_one", value_parser = parse_metric)]
    metric: MovementMetric,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Serialize)]
struct GridReport {
    kind: String,
    legacy_name: &'static str,
    size_in_pixels: i32,
    offset: (i32, i32),
    cell_width: f64,
    cell_height: f64,
    circumradius: f64,
    side_length: f64,
    facings: Vec<i32>,
    cell: Option<CellReport>,
    point: Option<PointReport>,
    distance: Option<f64>,
}

#[derive(Serialize)]
struct CellReport {
    cell: CellPoint,
    label: String,
    point: ZonePoint,
    center: (f64, f64),
    draw_bounds: Rect,
}

#[derive(Serialize)]
struct PointReport {
    point: ZonePoint,
    cell: CellPoint,
    nearest_vertex: ZonePoint,
}

impl Inspect {
    pub fn execute(self) -> Result<()> {
        let grid = self.grid.build()?;
        let report = self.report(&grid);

        match self.format {
            OutputFormat::Summary => print_summary(&report),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        }
        Ok(())
    }

    fn report(&self, grid: &Grid) -> GridReport {
        let cell = self.cell.map(|(x, y)| {
            let cell = CellPoint::new(x, y);
            let center = grid.cell_center(cell);
            CellReport {
                cell,
                label: format!("{}{}", alpha_label(x), y),
                point: grid.convert_cell_to_point(cell),
                center: (center.x, center.y),
                draw_bounds: grid.draw_bounds(cell),
            }
        });

        let point = self.point.map(|(x, y)| {
            let point = ZonePoint::new(x, y);
            PointReport {
                point,
                cell: grid.convert_point_to_cell(point),
                nearest_vertex: grid.nearest_vertex(point),
            }
        });

        let distance = self.cell.zip(self.distance_to).map(|((ax, ay), (bx, by))| {
            grid.cell_distance(CellPoint::new(ax, ay), CellPoint::new(bx, by), self.metric)
        });

        let polygon = grid.polygon();
        GridReport {
            kind: grid.kind().to_string(),
            legacy_name: grid.kind().legacy_name(),
            size_in_pixels: grid.size_in_pixels(),
            offset: grid.offset(),
            cell_width: grid.cell_width(),
            cell_height: grid.cell_height(),
            circumradius: polygon.circumradius(),
            side_length: polygon.side_length(),
            facings: grid.facing_angles().to_vec(),
            cell,
            point,
            distance,
        }
    }
}

fn print_summary(report: &GridReport) {
    println!("{}", style("=== Grid ===").bold().green());
    println!(
        "  Kind: {} ({})",
        style(&report.kind).bold(),
        report.legacy_name
    );
    println!("  Size: {} px", report.size_in_pixels);
    println!("  Offset: {:?}", report.offset);
    println!(
        "  Cell: {:.2} x {:.2} px, circumradius {:.2}, side {:.2}",
        report.cell_width, report.cell_height, report.circumradius, report.side_length
    );
    println!("  Facings: {:?}", report.facings);

    if let Some(cell) = &report.cell {
        println!();
        println!("{}", style("Cell:").bold().yellow());
        println!("  {:?} [{}]", cell.cell, cell.label);
        println!("  Point: {:?}", cell.point);
        println!("  Center: ({:.2}, {:.2})", cell.center.0, cell.center.1);
        println!("  Draw bounds: {:?}", cell.draw_bounds);
    }

    if let Some(point) = &report.point {
        println!();
        println!("{}", style("Point:").bold().yellow());
        println!("  {:?}", point.point);
        println!("  Cell: {:?}", point.cell);
        println!("  Nearest vertex: {:?}", point.nearest_vertex);
    }

    if let Some(distance) = report.distance {
        println!();
        println!("{} {}", style("Distance:").bold().yellow(), distance);
    }
}
