//! Chart builders for the study figures. These consume the reducer's cleaned
//! collections and only do rendering; no metric is computed here beyond the
//! error-breakdown percentages.

use crate::aggregate::StudyData;
use crate::error::{MetricsError, SmResult};
use crate::layouts::Layout;
use crate::metrics::classify_errors;
use crate::stats::summarize;
use plotters::prelude::*;
use std::fmt::Display;
use std::path::Path;
use strum::IntoEnumIterator;
use tracing::debug;

const FIGURE_SIZE: (u32, u32) = (1024, 768);

fn chart_err<E: Display>(e: E) -> MetricsError {
    MetricsError::Chart(e.to_string())
}

fn layout_color(layout: Layout) -> RGBColor {
    match layout {
        Layout::SliderOnly => BLACK,
        Layout::ArcType => RED,
        Layout::TiltType => BLUE,
        Layout::Raycast => GREEN,
    }
}

/// Render every figure of the study into `dir`.
pub fn render_all(data: &StudyData, dir: &Path) -> SmResult<()> {
    render_position_cloud(data, &dir.join("pos-cloud.png"))?;
    render_position_cloud_2d(data, (0, 2), &dir.join("pos-2d-cloud-0-2.png"))?;
    render_position_cloud_2d(data, (1, 2), &dir.join("pos-2d-cloud-1-2.png"))?;
    render_wpm_bars(data, &dir.join("stacked-wpm-awpm.png"))?;
    render_travel_bars(data, &dir.join("travel-by-interface-error-bars.png"))?;
    render_pit_bars(data, &dir.join("pit-by-interface-error-bars.png"))?;
    render_error_breakdown(data, &dir.join("error-chart.png"))?;
    Ok(())
}

/// Keypress positions in the cave on a fixed viewing window, one series per
/// layout. SliderOnly has no meaningful press positions and is skipped.
pub fn render_position_cloud(data: &StudyData, out: &Path) -> SmResult<()> {
    let root = BitMapBackend::new(out, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .build_cartesian_3d(-4.5f64..1.0, -1.0f64..4.5, 0.0f64..5.5)
        .map_err(chart_err)?;
    chart.configure_axes().draw().map_err(chart_err)?;

    for layout in Layout::iter().filter(|l| *l != Layout::SliderOnly) {
        let posses = &data.positions[&layout];
        if posses.is_empty() {
            continue;
        }
        let color = layout_color(layout);
        chart
            .draw_series(
                posses
                    .iter()
                    .map(|p| Circle::new((p[0], p[1], p[2]), 3, color.filled())),
            )
            .map_err(chart_err)?
            .label(layout.to_string())
            .legend(move |(x, y)| Circle::new((x, y), 3, color.filled()));
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()
        .map_err(chart_err)?;
    root.present().map_err(chart_err)?;
    Ok(())
}

/// A 2D projection of the position cloud onto an axis pair of the recorded
/// [x, y, z] positions.
pub fn render_position_cloud_2d(data: &StudyData, axes: (usize, usize), out: &Path) -> SmResult<()> {
    let axis_labels = ["X (ft)", "Y (ft)", "Z (ft)"];
    let layouts: Vec<Layout> = Layout::iter()
        .filter(|l| *l != Layout::SliderOnly && !data.positions[l].is_empty())
        .collect();

    let mut bounds = (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY);
    for layout in &layouts {
        for p in &data.positions[layout] {
            bounds.0 = bounds.0.min(p[axes.0]);
            bounds.1 = bounds.1.max(p[axes.0]);
            bounds.2 = bounds.2.min(p[axes.1]);
            bounds.3 = bounds.3.max(p[axes.1]);
        }
    }
    if !bounds.0.is_finite() {
        debug!("no positions recorded, skipping 2d cloud {}", out.display());
        return Ok(());
    }
    let pad_x = ((bounds.1 - bounds.0).abs()).max(1e-6) * 0.05;
    let pad_y = ((bounds.3 - bounds.2).abs()).max(1e-6) * 0.05;

    let root = BitMapBackend::new(out, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(
            (bounds.0 - pad_x)..(bounds.1 + pad_x),
            (bounds.2 - pad_y)..(bounds.3 + pad_y),
        )
        .map_err(chart_err)?;
    chart
        .configure_mesh()
        .x_desc(axis_labels[axes.0])
        .y_desc(axis_labels[axes.1])
        .draw()
        .map_err(chart_err)?;

    for layout in layouts {
        let color = layout_color(layout);
        chart
            .draw_series(
                data.positions[&layout]
                    .iter()
                    .map(|p| Circle::new((p[axes.0], p[axes.1]), 3, color.filled())),
            )
            .map_err(chart_err)?
            .label(layout.to_string())
            .legend(move |(x, y)| Circle::new((x, y), 3, color.filled()));
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()
        .map_err(chart_err)?;
    root.present().map_err(chart_err)?;
    Ok(())
}

struct BarGroup {
    name: String,
    lower_mean: f64,
    upper_mean: f64,
    upper_std: f64,
}

/// Shared renderer for the stacked two-series bar figures: the lower series
/// fills to `lower_mean`, the upper series stacks the remainder up to
/// `upper_mean` with a std-dev error bar on top.
fn render_stacked_bars(
    groups: &[BarGroup],
    labels: (&str, &str),
    y_desc: &str,
    out: &Path,
) -> SmResult<()> {
    if groups.is_empty() {
        debug!("no samples for {}, skipping", out.display());
        return Ok(());
    }

    let y_max = groups
        .iter()
        .map(|g| (g.upper_mean + g.upper_std).max(g.lower_mean))
        .fold(0.0f64, f64::max)
        .max(1e-6)
        * 1.15;
    let names: Vec<String> = groups.iter().map(|g| g.name.clone()).collect();

    let root = BitMapBackend::new(out, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((0..groups.len()).into_segmented(), 0f64..y_max)
        .map_err(chart_err)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|seg: &SegmentValue<usize>| match seg {
            SegmentValue::CenterOf(i) if *i < names.len() => names[*i].clone(),
            _ => String::new(),
        })
        .y_desc(y_desc)
        .draw()
        .map_err(chart_err)?;

    let lower_color = layout_color(Layout::TiltType);
    let upper_color = layout_color(Layout::ArcType);

    chart
        .draw_series(groups.iter().enumerate().map(|(i, g)| {
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0.0),
                    (SegmentValue::Exact(i + 1), g.lower_mean),
                ],
                lower_color.filled(),
            );
            bar.set_margin(0, 0, 30, 30);
            bar
        }))
        .map_err(chart_err)?
        .label(labels.0)
        .legend(move |(x, y)| {
            Rectangle::new([(x - 5, y - 5), (x + 5, y + 5)], lower_color.filled())
        });

    chart
        .draw_series(groups.iter().enumerate().map(|(i, g)| {
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(i), g.lower_mean),
                    (SegmentValue::Exact(i + 1), g.upper_mean),
                ],
                upper_color.filled(),
            );
            bar.set_margin(0, 0, 30, 30);
            bar
        }))
        .map_err(chart_err)?
        .label(labels.1)
        .legend(move |(x, y)| {
            Rectangle::new([(x - 5, y - 5), (x + 5, y + 5)], upper_color.filled())
        });

    chart
        .draw_series(groups.iter().enumerate().map(|(i, g)| {
            ErrorBar::new_vertical(
                SegmentValue::CenterOf(i),
                g.upper_mean - g.upper_std,
                g.upper_mean,
                g.upper_mean + g.upper_std,
                BLACK.filled(),
                12,
            )
        }))
        .map_err(chart_err)?;

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()
        .map_err(chart_err)?;
    root.present().map_err(chart_err)?;
    Ok(())
}

/// Stacked aWPM/WPM bars per layout with WPM std-dev error bars.
pub fn render_wpm_bars(data: &StudyData, out: &Path) -> SmResult<()> {
    let groups: Vec<BarGroup> = Layout::iter()
        .filter(|l| *l != Layout::SliderOnly)
        .filter_map(|layout| {
            let wpm = summarize(&data.wpm[&layout]);
            let awpm = summarize(&data.awpm[&layout]);
            if !wpm.mean.is_finite() || !awpm.mean.is_finite() {
                return None;
            }
            Some(BarGroup {
                name: layout.to_string(),
                lower_mean: awpm.mean,
                upper_mean: wpm.mean,
                upper_std: wpm.std,
            })
        })
        .collect();

    render_stacked_bars(
        &groups,
        ("aWPM", "WPM"),
        "(Accurate) Words per Minute",
        out,
    )
}

/// Ideal travel stacked under actual travel, per travel-model layout.
pub fn render_travel_bars(data: &StudyData, out: &Path) -> SmResult<()> {
    let groups: Vec<BarGroup> = Layout::iter()
        .filter(Layout::has_travel_model)
        .filter_map(|layout| {
            let ideal = summarize(data.ideal_travel.get(&layout)?);
            let actual = summarize(data.actual_travel.get(&layout)?);
            if !ideal.mean.is_finite() || !actual.mean.is_finite() {
                return None;
            }
            Some(BarGroup {
                name: layout.to_string(),
                lower_mean: ideal.mean,
                upper_mean: actual.mean,
                upper_std: actual.std,
            })
        })
        .collect();

    render_stacked_bars(
        &groups,
        ("Ideal", "Actual"),
        "Total Angular Displacement (degrees)",
        out,
    )
}

/// Percent-of-Ideal-Travel bars with std-dev error bars.
pub fn render_pit_bars(data: &StudyData, out: &Path) -> SmResult<()> {
    let groups: Vec<BarGroup> = Layout::iter()
        .filter(Layout::has_travel_model)
        .filter_map(|layout| {
            let pit = summarize(data.pit.get(&layout)?);
            if !pit.mean.is_finite() {
                return None;
            }
            Some(BarGroup {
                name: layout.to_string(),
                lower_mean: 0.0,
                upper_mean: pit.mean,
                upper_std: pit.std,
            })
        })
        .collect();

    render_stacked_bars(&groups, ("", "PIT"), "PIT (%)", out)
}

/// Dipped and off-by-one error shares per layout, stacked.
pub fn render_error_breakdown(data: &StudyData, out: &Path) -> SmResult<()> {
    let mut groups = Vec::new();
    for layout in Layout::iter().filter(|l| *l != Layout::SliderOnly) {
        let pairs = match data.blind_io.get(&layout) {
            Some(pairs) => pairs,
            None => continue,
        };
        if let Some(breakdown) = classify_errors(layout, pairs)? {
            groups.push(BarGroup {
                name: layout.to_string(),
                lower_mean: breakdown.dipped_pct(),
                upper_mean: breakdown.off_by_one_pct(),
                upper_std: 0.0,
            });
        }
    }

    render_stacked_bars(
        &groups,
        ("Dipped (y + 1)", "Off-by-One"),
        "Percent of Errors",
        out,
    )
}
