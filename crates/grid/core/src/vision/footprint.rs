use glam::DVec2;

use crate::geometry::{CellPoint, Rect};
use crate::grid::Grid;

/// Cells a token covers plus its pixel bounding box and facing.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenFootprint {
    cells: Vec<CellPoint>,
    bounds: Rect,
    facing_degrees: f64,
}

impl TokenFootprint {
    pub fn new(cells: Vec<CellPoint>, bounds: Rect) -> Self {
        Self {
            cells,
            bounds,
            facing_degrees: 0.0,
        }
    }

    /// Footprint covering `cells`, with bounds taken from the grid.
    pub fn occupying(grid: &Grid, cells: Vec<CellPoint>) -> Self {
        let bounds = cells
            .iter()
            .map(|&cell| grid.draw_bounds(cell))
            .reduce(|a, b| a.union(&b))
            .unwrap_or_default();
        Self::new(cells, bounds)
    }

    /// A `width × height` block of cells starting at `origin`.
    pub fn block(grid: &Grid, origin: CellPoint, width: i32, height: i32) -> Self {
        let cells = (0..height)
            .flat_map(|dy| (0..width).map(move |dx| origin.offset(dx, dy)))
            .collect();
        Self::occupying(grid, cells)
    }

    pub fn with_facing(mut self, degrees: f64) -> Self {
        self.facing_degrees = degrees;
        self
    }

    pub fn cells(&self) -> &[CellPoint] {
        &self.cells
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn facing_degrees(&self) -> f64 {
        self.facing_degrees
    }

    pub fn center(&self) -> DVec2 {
        self.bounds.center()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::GridKind;

    #[test]
    fn block_bounds_cover_every_cell() {
        let grid = Grid::new(GridKind::Square, 50);
        let token = TokenFootprint::block(&grid, CellPoint::new(1, 1), 2, 2);
        assert_eq!(token.cells().len(), 4);
        assert_eq!(token.bounds(), Rect::new(50, 50, 100, 100));
        assert_eq!(token.center(), DVec2::new(100.0, 100.0));
    }

    #[test]
    fn single_hex_is_centred_on_its_cell() {
        let grid = Grid::new(GridKind::HexVertical, 50);
        let cell = CellPoint::new(3, 2);
        let token = TokenFootprint::occupying(&grid, vec![cell]);
        assert!(token.center().distance(grid.cell_center(cell)) < 2.0);
    }
}
