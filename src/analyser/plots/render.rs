use super::{Figure, Marks};
use crate::error::{AnalyzerError, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;
use std::ops::Range;

const FONT: &str = "sans-serif";
const ACCENT: RGBColor = RGBColor(31, 119, 180);

type Root<'a> = DrawingArea<SVGBackend<'a>, Shift>;

fn render_err<E: std::fmt::Display>(err: E) -> AnalyzerError {
    AnalyzerError::Render(err.to_string())
}

/// Renders a figure to an SVG document.
pub fn to_svg(figure: &Figure) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (figure.width, figure.height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        match &figure.marks {
            Marks::Bars(bars) => draw_bars(&root, figure, bars)?,
            Marks::Points(points) => draw_points(&root, figure, points)?,
            Marks::Line(points) => draw_line(&root, figure, points)?,
            Marks::Histogram { edges, counts } => draw_histogram(&root, figure, edges, counts)?,
        }

        root.present().map_err(render_err)?;
    }
    Ok(svg)
}

fn builder<'a, 'b>(root: &'a Root<'b>, figure: &Figure) -> ChartBuilder<'a, 'static, SVGBackend<'b>> {
    let tick_area = if figure.x_tick_rotation == 0 { 48 } else { 110 };
    let mut builder = ChartBuilder::on(root);
    builder
        .caption(figure.title.as_str(), (FONT, 24))
        .margin(16)
        .x_label_area_size(tick_area)
        .y_label_area_size(64);
    builder
}

fn draw_bars(root: &Root<'_>, figure: &Figure, bars: &[(String, usize)]) -> Result<()> {
    let top = bars.iter().map(|(_, c)| *c).max().unwrap_or(0).max(1) as f64;
    let mut chart = builder(root, figure)
        .build_cartesian_2d(-0.5..(bars.len().max(1) as f64 - 0.5), 0.0..top * 1.05)
        .map_err(render_err)?;

    // Ticks land on bar indices; anything between them stays blank.
    let category = |x: &f64| -> String {
        let i = x.round();
        if (x - i).abs() > 1e-6 || i < 0.0 {
            return String::new();
        }
        bars.get(i as usize)
            .map(|(name, _)| name.clone())
            .unwrap_or_default()
    };

    let mut mesh = chart.configure_mesh();
    mesh.disable_x_mesh()
        .x_labels(bars.len().max(1))
        .x_label_formatter(&category);
    if figure.x_tick_rotation != 0 {
        mesh.x_label_style(TextStyle::from((FONT, 12).into_font()).transform(FontTransform::Rotate90));
    }
    if let Some(label) = &figure.x_label {
        mesh.x_desc(label.as_str());
    }
    if let Some(label) = &figure.y_label {
        mesh.y_desc(label.as_str());
    }
    mesh.draw().map_err(render_err)?;

    chart
        .draw_series(bars.iter().enumerate().map(|(i, (_, count))| {
            let x = i as f64;
            Rectangle::new([(x - 0.4, 0.0), (x + 0.4, *count as f64)], ACCENT.filled())
        }))
        .map_err(render_err)?;
    Ok(())
}

fn draw_points(root: &Root<'_>, figure: &Figure, points: &[(f64, f64)]) -> Result<()> {
    let mut chart = builder(root, figure)
        .build_cartesian_2d(
            extent(points.iter().map(|p| p.0)),
            extent(points.iter().map(|p| p.1)),
        )
        .map_err(render_err)?;

    let mut mesh = chart.configure_mesh();
    if let Some(label) = &figure.x_label {
        mesh.x_desc(label.as_str());
    }
    if let Some(label) = &figure.y_label {
        mesh.y_desc(label.as_str());
    }
    mesh.draw().map_err(render_err)?;

    chart
        .draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 4, ACCENT.filled())),
        )
        .map_err(render_err)?;
    Ok(())
}

fn draw_line(root: &Root<'_>, figure: &Figure, points: &[(f64, f64)]) -> Result<()> {
    let mut chart = builder(root, figure)
        .build_cartesian_2d(
            extent(points.iter().map(|p| p.0)),
            extent(points.iter().map(|p| p.1)),
        )
        .map_err(render_err)?;

    let mut mesh = chart.configure_mesh();
    if let Some(label) = &figure.x_label {
        mesh.x_desc(label.as_str());
    }
    if let Some(label) = &figure.y_label {
        mesh.y_desc(label.as_str());
    }
    mesh.draw().map_err(render_err)?;

    chart
        .draw_series(LineSeries::new(points.iter().copied(), ACCENT.stroke_width(2)))
        .map_err(render_err)?;
    Ok(())
}

fn draw_histogram(root: &Root<'_>, figure: &Figure, edges: &[f64], counts: &[usize]) -> Result<()> {
    let lo = edges.first().copied().unwrap_or(0.0);
    let hi = edges.last().copied().unwrap_or(1.0);
    let top = counts.iter().copied().max().unwrap_or(0).max(1) as f64;
    let mut chart = builder(root, figure)
        .build_cartesian_2d(lo..hi, 0.0..top * 1.05)
        .map_err(render_err)?;

    let mut mesh = chart.configure_mesh();
    mesh.disable_x_mesh();
    if let Some(label) = &figure.x_label {
        mesh.x_desc(label.as_str());
    }
    if let Some(label) = &figure.y_label {
        mesh.y_desc(label.as_str());
    }
    mesh.draw().map_err(render_err)?;

    chart
        .draw_series(edges.windows(2).zip(counts).filter_map(|(bounds, &count)| {
            let (&left, &right) = (bounds.first()?, bounds.get(1)?);
            Some(Rectangle::new(
                [(left, 0.0), (right, count as f64)],
                ACCENT.mix(0.85).filled(),
            ))
        }))
        .map_err(render_err)?;
    Ok(())
}

fn extent(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return 0.0..1.0;
    }
    if (hi - lo).abs() < f64::EPSILON {
        return (lo - 1.0)..(hi + 1.0);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad)..(hi + pad)
}
