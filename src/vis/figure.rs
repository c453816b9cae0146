//! Explicit figure handle
//!
//! A [`Figure`] records what should be drawn (lines, shaded bands, axis
//! decorations) and renders it with plotters when [`Figure::show`] is
//! called. Recorded elements stay inspectable, so callers and tests can check
//! what a chart contains without decoding the image.

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use crate::error::{Error, Result};
use crate::vis::config::{FigureConfig, LegendConfig, LineStyle, MarkerShape, OutputType};

/// Scale of the x axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisScale {
    #[default]
    Linear,
    /// Base-10 logarithm; every x must be positive
    Log10,
}

impl AxisScale {
    /// Map a data value to the plotting coordinate
    pub fn transform(&self, value: f64) -> Result<f64> {
        match self {
            AxisScale::Linear => Ok(value),
            AxisScale::Log10 if value > 0.0 => Ok(value.log10()),
            AxisScale::Log10 => Err(Error::InvalidValue(format!(
                "log-scaled axis cannot show non-positive value {}",
                value
            ))),
        }
    }

    /// Tick label for a plotting coordinate, in data units
    pub fn format_tick(&self, coord: f64) -> String {
        match self {
            AxisScale::Linear => format_number(coord),
            AxisScale::Log10 => format_number(10f64.powf(coord)),
        }
    }
}

fn format_number(value: f64) -> String {
    if value.abs() >= 1000.0 || (value.fract() == 0.0 && value.abs() >= 1.0) {
        format!("{:.0}", value)
    } else if value.abs() >= 0.01 || value == 0.0 {
        format!("{:.2}", value)
    } else {
        format!("{:.1e}", value)
    }
}

/// A plotted line with markers
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub color: (u8, u8, u8),
    pub style: LineStyle,
    pub marker: MarkerShape,
    pub markersize: u32,
    /// Legend label; empty labels stay out of the legend
    pub label: String,
}

/// A translucent region between two curves
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    pub xs: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
    pub color: (u8, u8, u8),
    pub alpha: f64,
}

/// Drawing state for a single chart
#[derive(Debug, Clone)]
pub struct Figure {
    config: FigureConfig,
    lines: Vec<Line>,
    bands: Vec<Band>,
    grid: bool,
    xlabel: Option<String>,
    ylabel: Option<String>,
    ylim: Option<(f64, f64)>,
    xscale: AxisScale,
    legend: Option<LegendConfig>,
    title: Option<String>,
}

fn check_len(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(Error::LengthMismatch { expected, actual });
    }
    Ok(())
}

impl Figure {
    /// Create an empty figure
    pub fn new(config: FigureConfig) -> Self {
        Figure {
            config,
            lines: Vec::new(),
            bands: Vec::new(),
            grid: false,
            xlabel: None,
            ylabel: None,
            ylim: None,
            xscale: AxisScale::Linear,
            legend: None,
            title: None,
        }
    }

    pub fn config(&self) -> &FigureConfig {
        &self.config
    }

    /// Colour `i` of the palette cycle
    pub fn color(&self, i: usize) -> (u8, u8, u8) {
        let palette = &self.config.color_palette;
        if palette.is_empty() {
            (0, 0, 0)
        } else {
            palette[i % palette.len()]
        }
    }

    /// Add a line
    pub fn plot(&mut self, line: Line) -> Result<()> {
        check_len(line.xs.len(), line.ys.len())?;
        self.lines.push(line);
        Ok(())
    }

    /// Shade the region between `upper` and `lower`
    pub fn fill_between(
        &mut self,
        xs: &[f64],
        upper: &[f64],
        lower: &[f64],
        color: (u8, u8, u8),
        alpha: f64,
    ) -> Result<()> {
        check_len(xs.len(), upper.len())?;
        check_len(xs.len(), lower.len())?;
        self.bands.push(Band {
            xs: xs.to_vec(),
            upper: upper.to_vec(),
            lower: lower.to_vec(),
            color,
            alpha,
        });
        Ok(())
    }

    /// Toggle grid lines
    pub fn grid(&mut self, on: bool) {
        self.grid = on;
    }

    pub fn set_xlabel<S: Into<String>>(&mut self, label: S) {
        self.xlabel = Some(label.into());
    }

    pub fn set_ylabel<S: Into<String>>(&mut self, label: S) {
        self.ylabel = Some(label.into());
    }

    /// Fix the y range, or return to automatic limits with `None`
    pub fn set_ylim(&mut self, ylim: Option<(f64, f64)>) -> Result<()> {
        if let Some((lo, hi)) = ylim {
            if !(lo.is_finite() && hi.is_finite() && lo < hi) {
                return Err(Error::InvalidValue(format!(
                    "y limits must be finite with lower < upper, got ({}, {})",
                    lo, hi
                )));
            }
        }
        self.ylim = ylim;
        Ok(())
    }

    /// Switch the x axis to a base-10 log scale
    pub fn semilogx(&mut self) {
        self.xscale = AxisScale::Log10;
    }

    /// Show a legend with the given settings
    pub fn legend(&mut self, config: LegendConfig) {
        self.legend = Some(config);
    }

    pub fn set_title<S: Into<String>>(&mut self, title: S) {
        self.title = Some(title.into());
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    pub fn has_grid(&self) -> bool {
        self.grid
    }

    pub fn xlabel(&self) -> Option<&str> {
        self.xlabel.as_deref()
    }

    pub fn ylabel(&self) -> Option<&str> {
        self.ylabel.as_deref()
    }

    pub fn ylim(&self) -> Option<(f64, f64)> {
        self.ylim
    }

    pub fn xscale(&self) -> AxisScale {
        self.xscale
    }

    pub fn legend_config(&self) -> Option<&LegendConfig> {
        self.legend.as_ref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Render the figure to its configured output file
    ///
    /// Returns once the file has been written.
    pub fn show(&self) -> Result<()> {
        let path = &self.config.output_path;
        let size = (self.config.width, self.config.height);
        log::debug!(
            "rendering {} lines and {} bands to {}",
            self.lines.len(),
            self.bands.len(),
            path.display()
        );

        // Backends write their file when dropped, so fail before creating one
        let x_range = self.x_range()?;
        match self.config.output_type {
            OutputType::PNG => {
                self.render(BitMapBackend::new(path, size).into_drawing_area(), x_range)?
            }
            OutputType::SVG => {
                self.render(SVGBackend::new(path, size).into_drawing_area(), x_range)?
            }
        }

        log::info!("figure written to {}", path.display());
        Ok(())
    }

    /// Render the figure as an SVG document in memory
    pub fn to_svg_string(&self) -> Result<String> {
        let x_range = self.x_range()?;
        let mut buffer = String::new();
        {
            let root = SVGBackend::with_string(&mut buffer, (self.config.width, self.config.height))
                .into_drawing_area();
            self.render(root, x_range)?;
        }
        Ok(buffer)
    }

    /// Transformed x extent of every recorded element
    fn x_range(&self) -> Result<(f64, f64)> {
        let mut xs = Vec::new();
        for x in self
            .lines
            .iter()
            .flat_map(|l| l.xs.iter())
            .chain(self.bands.iter().flat_map(|b| b.xs.iter()))
        {
            xs.push(self.xscale.transform(*x)?);
        }
        Ok(padded_extent(xs.into_iter()))
    }

    fn y_range(&self) -> (f64, f64) {
        if let Some(ylim) = self.ylim {
            return ylim;
        }
        let values = self
            .lines
            .iter()
            .flat_map(|l| l.ys.iter())
            .chain(
                self.bands
                    .iter()
                    .flat_map(|b| b.upper.iter().chain(b.lower.iter())),
            )
            .copied();
        padded_extent(values)
    }

    fn render<DB: DrawingBackend>(
        &self,
        root: DrawingArea<DB, Shift>,
        (x_min, x_max): (f64, f64),
    ) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        root.fill(&WHITE)?;

        let (y_min, y_max) = self.y_range();

        let mut builder = ChartBuilder::on(&root);
        builder
            .margin(self.config.margin)
            .x_label_area_size(40)
            .y_label_area_size(50);
        if let Some(title) = &self.title {
            builder.caption(title, ("sans-serif", self.config.title_font_size).into_font());
        }
        let mut chart = builder.build_cartesian_2d(x_min..x_max, y_min..y_max)?;

        let xscale = self.xscale;
        let x_formatter = move |v: &f64| xscale.format_tick(*v);
        let y_formatter = |v: &f64| format_number(*v);

        let mut mesh = chart.configure_mesh();
        mesh.x_labels(10)
            .y_labels(10)
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter);
        if !self.grid {
            mesh.disable_mesh();
        }
        if let Some(label) = &self.xlabel {
            mesh.x_desc(label.as_str());
        }
        if let Some(label) = &self.ylabel {
            mesh.y_desc(label.as_str());
        }
        mesh.draw()?;

        for band in &self.bands {
            let rgb = RGBColor(band.color.0, band.color.1, band.color.2);
            let mut outline = Vec::with_capacity(band.xs.len() * 2);
            for (x, y) in band.xs.iter().zip(band.upper.iter()) {
                outline.push((self.xscale.transform(*x)?, *y));
            }
            for (x, y) in band.xs.iter().zip(band.lower.iter()).rev() {
                outline.push((self.xscale.transform(*x)?, *y));
            }
            chart.draw_series(std::iter::once(Polygon::new(
                outline,
                rgb.mix(band.alpha).filled(),
            )))?;
        }

        let mut labelled = 0;
        for line in &self.lines {
            let rgb = RGBColor(line.color.0, line.color.1, line.color.2);
            let stroke = rgb.stroke_width(2);
            let mut points = Vec::with_capacity(line.xs.len());
            for (x, y) in line.xs.iter().zip(line.ys.iter()) {
                points.push((self.xscale.transform(*x)?, *y));
            }

            let anno = match line.style {
                LineStyle::Solid => chart.draw_series(LineSeries::new(points.clone(), stroke))?,
                LineStyle::Dashed => {
                    chart.draw_series(DashedLineSeries::new(points.clone(), 8, 5, stroke))?
                }
                LineStyle::Dotted => {
                    chart.draw_series(DashedLineSeries::new(points.clone(), 2, 4, stroke))?
                }
            };
            if !line.label.is_empty() {
                labelled += 1;
                anno.label(line.label.clone()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], rgb.stroke_width(2))
                });
            }

            let size = i32::try_from(line.markersize).map_err(|_| {
                Error::InvalidValue(format!("marker size {} is too large", line.markersize))
            })?;
            match line.marker {
                MarkerShape::Circle => {
                    chart.draw_series(
                        points
                            .iter()
                            .map(|&p| Circle::new(p, line.markersize, rgb.filled())),
                    )?;
                }
                MarkerShape::Square => {
                    chart.draw_series(points.iter().map(|&p| {
                        EmptyElement::at(p)
                            + Rectangle::new([(-size, -size), (size, size)], rgb.filled())
                    }))?;
                }
            }
        }

        if let Some(legend) = &self.legend {
            if labelled == 0 {
                log::warn!("no labelled series found; legend skipped");
            } else {
                let background = WHITE.mix(legend.background_alpha);
                let mut labels = chart.configure_series_labels();
                labels
                    .position(legend.position.into())
                    .background_style(&background);
                if legend.show_border {
                    labels.border_style(&BLACK);
                }
                labels.draw()?;
            }
        }

        root.present()?;
        Ok(())
    }
}

/// Min/max of the finite values with a 5% margin
fn padded_extent<I: Iterator<Item = f64>>(values: I) -> (f64, f64) {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !min.is_finite() {
        return (0.0, 1.0);
    }
    if (max - min).abs() < f64::EPSILON {
        return (min - 0.5, max + 0.5);
    }

    let margin = (max - min) * 0.05;
    (min - margin, max + margin)
}
