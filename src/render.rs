// Bubble chart rendering surface: consumes a ChartSpec blindly

use crate::chart::{ChartSpec, MarkerSizing};
use crate::palette::ColorPalette;
use crate::RenderOptions;
use anyhow::{Context, Result};
use image::ImageEncoder;
use plotters::prelude::*;

const BUBBLE_OPACITY: f64 = 0.7;

/// Render a chart spec into PNG bytes
pub fn render_png(spec: &ChartSpec, options: &RenderOptions) -> Result<Vec<u8>> {
    let mut buffer = vec![0u8; (options.width * options.height * 3) as usize];
    draw_chart(spec, &mut buffer, options.width, options.height)?;

    let mut png_bytes = Vec::new();
    {
        let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
        encoder
            .write_image(&buffer, options.width, options.height, image::ColorType::Rgb8)
            .context("Failed to encode PNG")?;
    }

    Ok(png_bytes)
}

fn draw_chart(spec: &ChartSpec, buffer: &mut [u8], width: u32, height: u32) -> Result<()> {
    let root = BitMapBackend::with_buffer(buffer, (width, height)).into_drawing_area();
    root.fill(&WHITE).context("Failed to fill background")?;

    // One panel per facet combination; a missing facet role contributes a
    // single unlabeled slot
    let col_values = facet_values(spec.facet_col.as_ref().map(|f| f.categories.as_slice()));
    let row_values = facet_values(spec.facet_row.as_ref().map(|f| f.categories.as_slice()));
    let panels = root.split_evenly((row_values.len(), col_values.len()));

    let palette = ColorPalette::category10();
    let color_map = spec
        .color
        .as_ref()
        .map(|c| palette.assign_colors(&c.categories));

    let x_categories = spec.x.categories.clone();
    let y_categories = spec.y.categories.clone();
    let nx = x_categories.len().max(1) as f64;
    let ny = y_categories.len().max(1) as f64;

    for (panel_idx, area) in panels.iter().enumerate() {
        let row_idx = panel_idx / col_values.len();
        let col_idx = panel_idx % col_values.len();
        let col_value = &col_values[col_idx];
        let row_value = &row_values[row_idx];

        let caption = panel_caption(spec, col_value.as_deref(), row_value.as_deref());
        let mut chart = ChartBuilder::on(area)
            .margin(10)
            .caption(&caption, ("sans-serif", 14))
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(-0.5..(nx - 0.5), -0.5..(ny - 0.5))
            .context("Failed to build chart")?;

        let x_labels = x_categories.clone();
        let y_labels = y_categories.clone();
        chart
            .configure_mesh()
            .x_labels(x_categories.len().max(1))
            .y_labels(y_categories.len().max(1))
            .x_label_formatter(&move |v| category_label(*v, &x_labels))
            .y_label_formatter(&move |v| category_label(*v, &y_labels))
            .draw()
            .context("Failed to draw mesh")?;

        // Draw one series per color category so the legend can name them
        let color_keys: Vec<Option<String>> = match &spec.color {
            Some(encoding) => encoding.categories.iter().cloned().map(Some).collect(),
            None => vec![None],
        };

        for key in &color_keys {
            let color = match (key, &color_map) {
                (Some(k), Some(map)) => map[k],
                _ => palette.default_color(),
            };

            let points: Vec<(f64, f64, i32)> = spec
                .points
                .iter()
                .filter(|p| p.facet_col.as_deref() == col_value.as_deref())
                .filter(|p| p.facet_row.as_deref() == row_value.as_deref())
                .filter(|p| p.color.as_deref() == key.as_deref())
                .filter_map(|p| {
                    let x = x_categories.iter().position(|c| c == &p.x)?;
                    let y = y_categories.iter().position(|c| c == &p.y)?;
                    Some((x as f64, y as f64, marker_radius(p.count, &spec.sizing)))
                })
                .collect();

            let series = chart
                .draw_series(points.into_iter().map(move |(x, y, r)| {
                    Circle::new((x, y), r, color.mix(BUBBLE_OPACITY).filled())
                }))
                .context("Failed to draw bubble series")?;

            if spec.show_legend && panel_idx == 0 {
                if let Some(k) = key {
                    series.label(k.clone()).legend(move |(x, y)| {
                        Circle::new((x, y), 4, color.filled())
                    });
                }
            }
        }

        if spec.show_legend && panel_idx == 0 {
            chart
                .configure_series_labels()
                .border_style(&BLACK)
                .background_style(&WHITE.mix(0.8))
                .draw()
                .context("Failed to draw legend")?;
        }
    }

    root.present().context("Failed to present drawing")?;
    Ok(())
}

fn facet_values(categories: Option<&[String]>) -> Vec<Option<String>> {
    match categories {
        Some(labels) if !labels.is_empty() => labels.iter().cloned().map(Some).collect(),
        _ => vec![None],
    }
}

fn panel_caption(spec: &ChartSpec, col_value: Option<&str>, row_value: Option<&str>) -> String {
    let mut parts = Vec::new();
    if let (Some(facet), Some(value)) = (&spec.facet_col, col_value) {
        parts.push(format!("{}={}", facet.field, value));
    }
    if let (Some(facet), Some(value)) = (&spec.facet_row, row_value) {
        parts.push(format!("{}={}", facet.field, value));
    }
    if parts.is_empty() {
        spec.title.clone()
    } else {
        parts.join(", ")
    }
}

fn category_label(value: f64, categories: &[String]) -> String {
    let idx = value.round();
    if idx < 0.0 || (value - idx).abs() > 1e-6 {
        return String::new();
    }
    categories.get(idx as usize).cloned().unwrap_or_default()
}

/// Rendered radius in pixels: area proportional to count via the spec's
/// sizeref, with the sizemin diameter floor applied
fn marker_radius(count: f64, sizing: &MarkerSizing) -> i32 {
    let diameter = if sizing.sizeref > 0.0 {
        2.0 * (count / (std::f64::consts::PI * sizing.sizeref)).sqrt()
    } else {
        sizing.sizemin
    };
    (diameter.max(sizing.sizemin) / 2.0).round() as i32
}
