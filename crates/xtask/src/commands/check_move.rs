//! Check whether a player move passes the fog-of-war gate

use anyhow::{Result, bail};
use clap::Parser;
use console::style;

use grid_core::{CellPoint, ExposedRegion, MovementValidator, Rect, check_region};

use crate::grid_args::{GridArgs, parse_pair};

/// Check a player move into a fogged destination
#[derive(Parser)]
pub struct CheckMove {
    #[command(flatten)]
    grid: GridArgs,

    /// Destination cell
    #[arg(long, value_name = "X,Y", value_parser = parse_pair, allow_hyphen_values = true)]
    to: (i32, i32),

    /// Travel direction
    #[arg(long, value_name = "DX,DY", default_value = "0,0", value_parser = parse_pair, allow_hyphen_values = true)]
    direction: (i32, i32),

    /// Revealed cell (repeatable)
    #[arg(long = "reveal-cell", value_name = "X,Y", value_parser = parse_pair, allow_hyphen_values = true)]
    reveal_cells: Vec<(i32, i32)>,

    /// Revealed pixel rectangle (repeatable)
    #[arg(long = "reveal", value_name = "X,Y,W,H", value_parser = parse_rect, allow_hyphen_values = true)]
    reveal_rects: Vec<Rect>,

    /// Also sample the whole destination, accepting it above this many open pieces
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=9))]
    tolerance: Option<u32>,
}

impl CheckMove {
    pub fn execute(self) -> Result<()> {
        let grid = self.grid.build()?;
        if grid.kind().is_gridless() {
            bail!("Gridless boards have no cells to move into");
        }

        let mut fog = ExposedRegion::from_rects(self.reveal_rects.iter().copied());
        fog.extend(
            self.reveal_cells
                .iter()
                .map(|&(x, y)| grid.draw_bounds(CellPoint::new(x, y))),
        );

        let destination = grid.draw_bounds(CellPoint::new(self.to.0, self.to.1));
        let allowed = MovementValidator::new().can_enter(&destination, self.direction, &fog);
        tracing::debug!(?destination, direction = ?self.direction, revealed = fog.rects().len(), allowed, "checked move");

        println!("{} {:?}", style("Destination:").bold().cyan(), destination);
        println!("{} {:?}", style("Direction:").bold().cyan(), self.direction);
        println!("{} {}", style("Revealed rects:").bold().cyan(), fog.rects().len());
        println!();
        println!("{} {}", style("Move:").bold().yellow(), verdict(allowed));

        if let Some(tolerance) = self.tolerance {
            let open = check_region(&destination, &fog, tolerance);
            println!(
                "{} {}",
                style(format!("Region (tolerance {tolerance}):")).bold().yellow(),
                verdict(open)
            );
        }
        Ok(())
    }
}

fn verdict(allowed: bool) -> String {
    if allowed {
        style("allowed").green().bold().to_string()
    } else {
        style("denied").red().bold().to_string()
    }
}

/// Parses `X,Y,W,H` into a rectangle.
fn parse_rect(value: &str) -> Result<Rect, String> {
    let parts: Vec<i32> = value
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<i32>()
                .map_err(|err| format!("`{part}`: {err}"))
        })
        .collect::<Result<_, _>>()?;
    match parts.as_slice() {
        &[x, y, width, height] => Ok(Rect::new(x, y, width, height)),
        _ => Err(format!("expected X,Y,W,H but got `{value}`")),
    }
}
