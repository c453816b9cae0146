//! Plot configuration types
//!
//! Everything here is plain data with `Default` and serde support, so a
//! configuration can be spelled out with struct-update syntax or loaded from
//! JSON with missing fields filled in.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use plotters::prelude::SeriesLabelPosition;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The ten-colour cycle "C0".."C9"
pub const DEFAULT_PALETTE: [(u8, u8, u8); 10] = [
    (31, 119, 180),  // C0 blue
    (255, 127, 14),  // C1 orange
    (44, 160, 44),   // C2 green
    (214, 39, 40),   // C3 red
    (148, 103, 189), // C4 purple
    (140, 86, 75),   // C5 brown
    (227, 119, 194), // C6 pink
    (127, 127, 127), // C7 grey
    (188, 189, 34),  // C8 olive
    (23, 190, 207),  // C9 cyan
];

/// Marker size used when none is given
pub const DEFAULT_MARKER_SIZE: u32 = 5;

/// Opacity of the ±1 std bands
pub const BAND_ALPHA: f64 = 0.15;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputType {
    /// PNG image
    PNG,
    /// SVG document
    SVG,
}

impl OutputType {
    /// Guess the format from a file extension, defaulting to PNG
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => OutputType::SVG,
            _ => OutputType::PNG,
        }
    }
}

/// Line style of a plotted series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineStyle {
    #[serde(rename = "-", alias = "solid")]
    Solid,
    #[serde(rename = "--", alias = "dashed")]
    Dashed,
    #[serde(rename = ":", alias = "dotted")]
    Dotted,
}

impl FromStr for LineStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "-" | "solid" => Ok(LineStyle::Solid),
            "--" | "dashed" => Ok(LineStyle::Dashed),
            ":" | "dotted" => Ok(LineStyle::Dotted),
            other => Err(Error::InvalidValue(format!("unknown line style '{}'", other))),
        }
    }
}

/// Marker drawn at every data point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerShape {
    Circle,
    Square,
}

/// Legend anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendPosition {
    UpperLeft,
    UpperMiddle,
    UpperRight,
    MiddleLeft,
    Center,
    MiddleRight,
    LowerLeft,
    LowerMiddle,
    LowerRight,
}

impl From<LegendPosition> for SeriesLabelPosition {
    fn from(pos: LegendPosition) -> Self {
        match pos {
            LegendPosition::UpperLeft => SeriesLabelPosition::UpperLeft,
            LegendPosition::UpperMiddle => SeriesLabelPosition::UpperMiddle,
            LegendPosition::UpperRight => SeriesLabelPosition::UpperRight,
            LegendPosition::MiddleLeft => SeriesLabelPosition::MiddleLeft,
            LegendPosition::Center => SeriesLabelPosition::MiddleMiddle,
            LegendPosition::MiddleRight => SeriesLabelPosition::MiddleRight,
            LegendPosition::LowerLeft => SeriesLabelPosition::LowerLeft,
            LegendPosition::LowerMiddle => SeriesLabelPosition::LowerMiddle,
            LegendPosition::LowerRight => SeriesLabelPosition::LowerRight,
        }
    }
}

/// Legend settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendConfig {
    /// Anchor inside the plotting area
    pub position: LegendPosition,
    /// Opacity of the white legend background
    pub background_alpha: f64,
    /// Draw a black frame around the legend
    pub show_border: bool,
}

impl Default for LegendConfig {
    fn default() -> Self {
        LegendConfig {
            position: LegendPosition::UpperRight,
            background_alpha: 0.8,
            show_border: true,
        }
    }
}

impl LegendConfig {
    /// Default legend anchored at `position`
    pub fn at(position: LegendPosition) -> Self {
        LegendConfig {
            position,
            ..LegendConfig::default()
        }
    }
}

/// Figure construction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Where `Figure::show` writes the chart
    pub output_path: PathBuf,
    /// Output format
    pub output_type: OutputType,
    /// Colour cycle; series `i` uses entry `i % len`
    pub color_palette: Vec<(u8, u8, u8)>,
    /// Caption font size
    pub title_font_size: u32,
    /// Outer margin in pixels
    pub margin: u32,
}

impl Default for FigureConfig {
    fn default() -> Self {
        FigureConfig {
            width: 800,
            height: 600,
            output_path: PathBuf::from("figure.png"),
            output_type: OutputType::PNG,
            color_palette: DEFAULT_PALETTE.to_vec(),
            title_font_size: 24,
            margin: 10,
        }
    }
}

impl FigureConfig {
    /// Default figure written to `path`, format inferred from the extension
    pub fn with_output<P: AsRef<Path>>(path: P) -> Self {
        FigureConfig {
            output_path: path.as_ref().to_path_buf(),
            output_type: OutputType::from_path(&path),
            ..FigureConfig::default()
        }
    }

    /// Parse from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
