//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod check_move;
mod inspect;
mod polygon;
mod vision;

pub use check_move::CheckMove;
pub use inspect::Inspect;
pub use polygon::PolygonCmd;
pub use vision::Vision;

/// Output format shared by the reporting commands
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Summary,
    /// Pretty-printed JSON
    Json,
}
