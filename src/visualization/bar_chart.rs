//! Grouped wall clock bar chart

use super::layout::BarLayout;
use crate::error::{ReportError, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

/// Series colours, cycled by test name index
const COLORS: &[RGBColor] = &[
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// Colour of the `idx`-th test name
pub fn series_color(idx: usize) -> RGBColor {
    COLORS[idx % COLORS.len()]
}

fn render_err(e: impl std::fmt::Display) -> ReportError {
    ReportError::Render(e.to_string())
}

pub struct BarChartPlotter;

impl BarChartPlotter {
    /// Plot the grouped bars to `path`; `.svg` writes SVG, anything else a bitmap
    pub fn plot(layout: &BarLayout, path: &Path, size: (u32, u32)) -> Result<()> {
        let is_svg = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("svg"))
            .unwrap_or(false);

        if is_svg {
            let root = SVGBackend::new(path, size).into_drawing_area();
            Self::draw(&root, layout)
        } else {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            Self::draw(&root, layout)
        }
    }

    fn draw<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, layout: &BarLayout) -> Result<()> {
        root.fill(&WHITE).map_err(render_err)?;

        let max_value = layout.max_value();
        let y_max = if max_value > 0.0 { max_value * 1.1 } else { 1.0 };

        let mut chart = ChartBuilder::on(root)
            .caption("Wall Clock Time by Payload Size", ("sans-serif", 40))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d(layout.x_range(), 0f64..y_max)
            .map_err(render_err)?;

        // Byte size labels sit under cluster centres, not at the axis' own ticks
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_label_formatter(&|_| String::new())
            .x_desc("number of bytes")
            .y_desc("Wall Clock Time (us)")
            .y_label_formatter(&|y| format!("{:.0}", y))
            .draw()
            .map_err(render_err)?;

        for (x, size) in layout.ticks() {
            let (px, py) = chart.backend_coord(&(x, 0.0));
            root.draw(&Text::new(
                size.to_string(),
                (px, py + 8),
                ("sans-serif", 16)
                    .into_font()
                    .color(&BLACK)
                    .pos(Pos::new(HPos::Center, VPos::Top)),
            ))
            .map_err(render_err)?;
        }

        for (series, name) in layout.test_names().iter().enumerate() {
            let color = series_color(series);
            chart
                .draw_series(
                    layout
                        .bars()
                        .filter(|bar| bar.series == series)
                        .map(|bar| {
                            Rectangle::new([(bar.x0, 0.0), (bar.x1, bar.value)], color.filled())
                        }),
                )
                .map_err(render_err)?
                .label(name.as_str())
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.filled())
                });

            tracing::trace!(series = name.as_str(), "drew series");
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
        Ok(())
    }
}
