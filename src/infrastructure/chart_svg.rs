// SVG line chart renderer
use crate::domain::chart::ChartSpec;
use crate::domain::error::SiteError;
use crate::domain::severity::Severity;
use plotters::prelude::*;

const BACKGROUND: RGBColor = RGBColor(0x27, 0x27, 0x27);
const OK_GREEN: RGBColor = RGBColor(0x4e, 0x9a, 0x06);
const WARNING_ORANGE: RGBColor = RGBColor(0xf5, 0x79, 0x00);
const ERROR_RED: RGBColor = RGBColor(0xcc, 0x00, 0x00);

fn severity_color(severity: Severity) -> RGBColor {
    match severity {
        Severity::Ok => OK_GREEN,
        Severity::Warning => WARNING_ORANGE,
        Severity::Error => ERROR_RED,
    }
}

fn render_err(e: impl std::fmt::Display) -> SiteError {
    SiteError::Render(e.to_string())
}

/// Dark-background line chart: Y from 0 to the observed maximum, HH:MM
/// tick labels, one severity-colored series plus a matching legend.
pub fn render_chart(spec: &ChartSpec) -> Result<String, SiteError> {
    let points = spec.series.points();
    if points.len() < 2 {
        // Callers route short series to the placeholder instead.
        return Err(SiteError::Render("series too short to chart".to_string()));
    }
    let labels: Vec<String> = points
        .iter()
        .map(|(timestamp, _)| timestamp.format("%H:%M").to_string())
        .collect();
    let max = spec.series.max_value();
    // An all-zero series still needs a non-degenerate coordinate range.
    let y_max = if max > 0.0 { max } else { 1.0 };
    let color = severity_color(spec.severity);

    let mut svg = String::new();
    {
        let root =
            SVGBackend::with_string(&mut svg, (spec.width, spec.height)).into_drawing_area();
        root.fill(&BACKGROUND).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(12)
            .x_label_area_size(30)
            .y_label_area_size(40)
            .build_cartesian_2d(0..points.len() - 1, 0f64..y_max)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(8)
            .x_label_formatter(&|idx| labels.get(*idx).cloned().unwrap_or_default())
            .y_label_formatter(&|value| format!("{value:.0}"))
            .axis_style(&WHITE)
            .label_style(("sans-serif", 12).into_font().color(&WHITE))
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(LineSeries::new(
                points.iter().enumerate().map(|(i, (_, value))| (i, *value)),
                color.stroke_width(2),
            ))
            .map_err(render_err)?
            .label(spec.label.clone())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 25, y)], color.stroke_width(2))
            });

        chart
            .configure_series_labels()
            .background_style(BACKGROUND.filled())
            .border_style(&WHITE)
            .label_font(("sans-serif", 14).into_font().color(&color))
            .draw()
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
    }

    Ok(svg)
}
