//! Grid selection shared by every command
//!
//! A grid comes from a TOML settings file when one is given, otherwise from
//! the command-line flags with `GRID_*` environment defaults behind them.

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use grid_core::{Grid, GridConfig, GridSettings, MovementMetric, ShapeKind};

#[derive(Args, Debug, Clone)]
pub struct GridArgs {
    /// Grid settings file (TOML with kind, size, offset_x, offset_y)
    #[arg(long, value_name = "FILE", conflicts_with_all = ["kind", "size", "offset"])]
    settings: Option<PathBuf>,

    /// Grid kind, canonical or legacy name (e.g. square, "Vertical Hex")
    #[arg(short, long)]
    kind: Option<String>,

    /// Pixels per cell
    #[arg(short, long)]
    size: Option<i32>,

    /// Pixel offset of the grid origin
    #[arg(long, value_name = "X,Y", value_parser = parse_pair, allow_hyphen_values = true)]
    offset: Option<(i32, i32)>,
}

impl GridArgs {
    pub fn build(&self) -> Result<Grid> {
        let config = GridConfig::from_env();
        let settings = match &self.settings {
            Some(path) => load_settings(path)?,
            None => {
                let (x, y) = self.offset.unwrap_or_default();
                GridSettings {
                    kind: self
                        .kind
                        .clone()
                        .unwrap_or_else(|| config.default_kind.to_string()),
                    size: self.size.unwrap_or(config.default_size),
                    offset_x: x,
                    offset_y: y,
                }
            }
        };

        let grid = Grid::from_settings(&settings, &config)
            .with_context(|| format!("Invalid grid settings: {settings:?}"))?;
        tracing::debug!(?grid, "grid ready");
        Ok(grid)
    }
}

/// Reads persisted grid settings from a TOML file.
pub fn load_settings(path: &Path) -> Result<GridSettings> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
    toml::from_str(&text)
        .with_context(|| format!("Failed to parse settings file: {}", path.display()))
}

/// Parses `X,Y` into a pair of integers.
pub fn parse_pair(value: &str) -> Result<(i32, i32), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got `{value}`"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<i32>()
            .map_err(|err| format!("`{part}`: {err}"))
    };
    Ok((parse(x)?, parse(y)?))
}

/// Parses a movement metric by name or alias.
pub fn parse_metric(value: &str) -> Result<MovementMetric, String> {
    value
        .parse()
        .map_err(|_| format!("unknown movement metric `{value}`"))
}

/// Parses a vision shape name.
pub fn parse_shape(value: &str) -> Result<ShapeKind, String> {
    value
        .parse()
        .map_err(|_| format!("unknown shape `{value}`"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_core::GridKind;
    use std::io::Write;

    #[test]
    fn settings_file_with_legacy_kind() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "kind = \"Horizontal Hex\"\nsize = 64\noffset_x = -3").expect("write");

        let settings = load_settings(file.path()).expect("settings load");
        assert_eq!(settings.size, 64);
        assert_eq!(settings.offset_x, -3);
        assert_eq!(settings.offset_y, 0);

        let args = GridArgs {
            settings: Some(file.path().to_path_buf()),
            kind: None,
            size: None,
            offset: None,
        };
        let grid = args.build().expect("grid builds");
        assert_eq!(grid.kind(), GridKind::HexHorizontal);
        assert_eq!(grid.offset(), (-3, 0));
    }

    #[test]
    fn malformed_settings_report_the_path() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "kind = 4").expect("write");
        let err = load_settings(file.path()).expect_err("should not parse");
        assert!(err.to_string().contains("Failed to parse settings file"));
    }

    #[test]
    fn flags_reject_unknown_kinds() {
        let args = GridArgs {
            settings: None,
            kind: Some("octagonal".into()),
            size: Some(50),
            offset: None,
        };
        assert!(args.build().is_err());
    }

    #[test]
    fn pairs_accept_negative_values() {
        assert_eq!(parse_pair("-12, 7"), Ok((-12, 7)));
        assert!(parse_pair("12").is_err());
        assert!(parse_pair("a,1").is_err());
    }

    #[test]
    fn names_accept_aliases() {
        assert_eq!(parse_metric("Manhattan"), Ok(MovementMetric::NoDiagonals));
        assert_eq!(parse_shape("grid_conforming"), Ok(ShapeKind::GridConforming));
        assert!(parse_shape("star").is_err());
    }
}
