//! Chart construction.
//!
//! A [`Figure`] is a plain description of a chart: its marks, title and
//! axis labels. Figures live in a [`DrawingContext`] that the caller owns
//! and passes explicitly; nothing here touches global state, so two
//! contexts can be filled independently. Persisting a figure goes through
//! [`DrawingContext::save`], which renders SVG via [`render`].

pub mod render;

use super::frequency::{column, frequency_table};
use crate::config::Settings;
use crate::error::{AnalyzerError, Result};
use polars::prelude::*;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlotKind {
    Bar,
    Scatter,
    Line,
    Histogram,
}

impl PlotKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Scatter => "scatter",
            Self::Line => "line",
            Self::Histogram => "histogram",
        }
    }

    fn capitalized(self) -> &'static str {
        match self {
            Self::Bar => "Bar",
            Self::Scatter => "Scatter",
            Self::Line => "Line",
            Self::Histogram => "Histogram",
        }
    }
}

impl fmt::Display for PlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlotKind {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bar" => Ok(Self::Bar),
            "scatter" => Ok(Self::Scatter),
            "line" => Ok(Self::Line),
            "histogram" => Ok(Self::Histogram),
            other => Err(AnalyzerError::UnsupportedPlotType(other.to_owned())),
        }
    }
}

/// What to plot. `y_column` is required for scatter and optional otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlotRequest {
    pub kind: PlotKind,
    pub x_column: String,
    pub y_column: Option<String>,
    pub title: Option<String>,
}

impl PlotRequest {
    pub fn new(kind: PlotKind, x_column: impl Into<String>) -> Self {
        Self {
            kind,
            x_column: x_column.into(),
            y_column: None,
            title: None,
        }
    }

    /// Builds a request from a plot type name such as `"scatter"`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::UnsupportedPlotType`] for unknown names.
    pub fn parse(plot_type: &str, x_column: impl Into<String>) -> Result<Self> {
        Ok(Self::new(plot_type.parse()?, x_column))
    }

    #[must_use]
    pub fn with_y(mut self, y_column: impl Into<String>) -> Self {
        self.y_column = Some(y_column.into());
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// The explicit title, or "{Kind} Plot of {x_column}".
    pub fn resolved_title(&self) -> String {
        self.title.clone().unwrap_or_else(|| {
            format!("{} Plot of {}", self.kind.capitalized(), self.x_column)
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Marks {
    /// Category and count, most frequent first
    Bars(Vec<(String, usize)>),
    Points(Vec<(f64, f64)>),
    Line(Vec<(f64, f64)>),
    /// `edges.len() == counts.len() + 1`
    Histogram { edges: Vec<f64>, counts: Vec<usize> },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    pub kind: PlotKind,
    pub title: String,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    /// Requested label angle in degrees; bar charts ask for 45.
    ///
    /// The SVG renderer only has quarter-turn text transforms, so any
    /// non-zero angle is drawn as vertical labels.
    pub x_tick_rotation: u16,
    pub width: u32,
    pub height: u32,
    pub marks: Marks,
}

/// Handle to a figure inside the [`DrawingContext`] that created it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FigureId(usize);

/// Caller-owned collection of figures.
#[derive(Debug)]
pub struct DrawingContext {
    width: u32,
    height: u32,
    figures: Vec<Figure>,
}

impl Default for DrawingContext {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl DrawingContext {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            figures: Vec::new(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.figure_width, settings.figure_height)
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn push(&mut self, figure: Figure) -> FigureId {
        self.figures.push(figure);
        FigureId(self.figures.len() - 1)
    }

    pub fn figure(&self, id: FigureId) -> Option<&Figure> {
        self.figures.get(id.0)
    }

    /// The most recently created figure.
    pub fn current(&self) -> Option<&Figure> {
        self.figures.last()
    }

    pub fn len(&self) -> usize {
        self.figures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    /// Renders the figure behind `id` as an SVG document.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Render`] if `id` belongs to another context
    /// or the backend fails.
    pub fn render_svg(&self, id: FigureId) -> Result<String> {
        let figure = self
            .figure(id)
            .ok_or_else(|| AnalyzerError::Render(format!("no figure {} in this context", id.0)))?;
        render::to_svg(figure)
    }

    /// Renders the figure as SVG and writes it to `path`.
    ///
    /// # Errors
    ///
    /// - [`AnalyzerError::UnsupportedFormat`] unless `path` ends in `.svg`;
    ///   nothing is written in that case
    /// - [`AnalyzerError::Render`] if rendering fails
    /// - [`AnalyzerError::Io`] if the file cannot be written
    pub fn save(&self, id: FigureId, path: &Path) -> Result<()> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if ext != "svg" {
            return Err(AnalyzerError::UnsupportedFormat(ext));
        }
        let svg = self.render_svg(id)?;
        std::fs::write(path, svg).map_err(|e| AnalyzerError::io(path, e))?;
        tracing::info!("Figure saved to {}", path.display());
        Ok(())
    }
}

/// Builds a figure from the table.
///
/// # Errors
///
/// Fails before anything is drawn if a column is missing
/// (`ColumnNotFound`), not numeric where it must be (`NonNumericColumn`)
/// or scatter has no y column (`MissingParameter`).
pub fn build_figure(
    df: &DataFrame,
    request: &PlotRequest,
    histogram_bins: usize,
    (width, height): (u32, u32),
) -> Result<Figure> {
    let x = request.x_column.as_str();
    let y = request.y_column.as_deref();

    let (marks, x_label, y_label, x_tick_rotation) = match request.kind {
        PlotKind::Bar => {
            let table = frequency_table(df, x)?;
            let bars = table.iter().map(|e| (e.value.clone(), e.count)).collect();
            (Marks::Bars(bars), None, None, 45)
        }
        PlotKind::Scatter => {
            let y = y.ok_or_else(|| AnalyzerError::MissingParameter("y_column".to_owned()))?;
            let points = paired(&numeric_values(df, x)?, &numeric_values(df, y)?);
            (
                Marks::Points(points),
                Some(x.to_owned()),
                Some(y.to_owned()),
                0,
            )
        }
        PlotKind::Line => {
            let xs = numeric_values(df, x)?;
            let points = match y {
                Some(y) => paired(&xs, &numeric_values(df, y)?),
                None => xs
                    .iter()
                    .enumerate()
                    .filter_map(|(row, v)| v.map(|v| (v, row as f64)))
                    .collect(),
            };
            (
                Marks::Line(points),
                Some(x.to_owned()),
                y.map(str::to_owned),
                0,
            )
        }
        PlotKind::Histogram => {
            let values: Vec<f64> = numeric_values(df, x)?.into_iter().flatten().collect();
            let (edges, counts) = histogram(&values, histogram_bins);
            (
                Marks::Histogram { edges, counts },
                Some(x.to_owned()),
                Some("Frequency".to_owned()),
                0,
            )
        }
    };

    Ok(Figure {
        kind: request.kind,
        title: request.resolved_title(),
        x_label,
        y_label,
        x_tick_rotation,
        width,
        height,
        marks,
    })
}

fn numeric_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let col = column(df, name)?;
    if !col.dtype().is_primitive_numeric() {
        return Err(AnalyzerError::NonNumericColumn(name.to_owned()));
    }
    let series = col.as_materialized_series().cast(&DataType::Float64)?;
    Ok(series
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| x.is_finite()))
        .collect())
}

// Rows missing either coordinate are dropped.
fn paired(xs: &[Option<f64>], ys: &[Option<f64>]) -> Vec<(f64, f64)> {
    xs.iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect()
}

/// Equal-width bins over `[min, max]`, the last bin closed on the right.
///
/// A constant sample is binned over `[v - 0.5, v + 0.5]`; an empty one over `[0, 1]`.
pub fn histogram(values: &[f64], bins: usize) -> (Vec<f64>, Vec<usize>) {
    let bins = bins.max(1);
    let min = values.iter().copied().reduce(f64::min);
    let max = values.iter().copied().reduce(f64::max);

    let (lo, hi) = match (min, max) {
        (Some(lo), Some(hi)) if (hi - lo).abs() < f64::EPSILON => (lo - 0.5, hi + 0.5),
        (Some(lo), Some(hi)) => (lo, hi),
        _ => (0.0, 1.0),
    };
    // Near ±f64::MAX the span itself overflows; scale before subtracting.
    let span = hi - lo;
    let finite = span.is_finite();
    let width = if finite {
        span / bins as f64
    } else {
        hi / bins as f64 - lo / bins as f64
    };

    let edges = (0..=bins)
        .map(|i| {
            if finite {
                lo + i as f64 * width
            } else {
                let t = i as f64 / bins as f64;
                lo * (1.0 - t) + hi * t
            }
        })
        .collect();
    let mut counts = vec![0; bins];
    for &v in values {
        let offset = if finite {
            (v - lo) / width
        } else {
            v / width - lo / width
        };
        let idx = (offset.floor() as usize).min(bins - 1);
        if let Some(count) = counts.get_mut(idx) {
            *count += 1;
        }
    }
    (edges, counts)
}
