use std::f64::consts::TAU;

use eframe::egui::{RichText, Stroke, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, Polygon};

use maritime_board::engine::aggregate::{CategoryShare, Month, RankedEntity, TimeSeries};

use crate::color::{gradient, ColorMap, COLOR_ACCENT, COLOR_SUCCESS};
use crate::state::AppState;
use crate::ui::format_thousands;

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Dashboard layout
// ---------------------------------------------------------------------------

/// All charts for the current selection, two per row.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let agg = &state.outcome.aggregation;

    ui.columns(2, |cols| {
        ranking_chart(&mut cols[0], "Top Buyers (t)", &agg.buyers);
        ranking_chart(&mut cols[1], "Top Sellers (t)", &agg.sellers);
    });
    ui.add_space(8.0);
    ui.columns(2, |cols| {
        ranking_chart(&mut cols[0], "Countries of Origin (t)", &agg.countries);
        category_donut(&mut cols[1], &agg.categories, &state.category_colors);
    });
    ui.add_space(8.0);
    ranking_chart(ui, "HS Codes (t)", &agg.hs_codes);
    ui.add_space(8.0);
    time_series_chart(ui, &agg.time_series, state.config.engine.value_axis_divisor);
}

fn chart_title(ui: &mut Ui, title: &str) {
    ui.label(RichText::new(title).strong());
}

// ---------------------------------------------------------------------------
// Ranked bars
// ---------------------------------------------------------------------------

/// Horizontal bars, largest at the top, coloured by share of the leader.
pub fn ranking_chart(ui: &mut Ui, title: &str, entities: &[RankedEntity]) {
    chart_title(ui, title);
    if entities.is_empty() {
        ui.label(RichText::new("No data").weak());
        return;
    }

    let max = entities
        .iter()
        .map(|e| e.metric_tons)
        .fold(0.0_f64, f64::max);
    let n = entities.len();

    let bars: Vec<Bar> = entities
        .iter()
        .enumerate()
        .map(|(rank, e)| {
            let t = if max > 0.0 { e.metric_tons / max } else { 0.0 };
            Bar::new((n - 1 - rank) as f64, e.metric_tons)
                .name(&e.label)
                .fill(gradient(t as f32))
                .width(0.7)
        })
        .collect();

    // Position n-1-rank carries the label of entity `rank`.
    let labels: Vec<String> = entities.iter().rev().map(|e| e.label.clone()).collect();

    let chart = BarChart::new(bars)
        .horizontal()
        .element_formatter(Box::new(|bar: &Bar, _chart: &BarChart| {
            format!("{}\n{} t", bar.name, format_thousands(bar.value))
        }));

    Plot::new(title)
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show_grid([true, false])
        .y_axis_min_width(120.0)
        .y_axis_formatter(move |mark: GridMark, _range| {
            axis_label(&labels, mark.value).unwrap_or_default()
        })
        .x_axis_formatter(|mark: GridMark, _range| format_thousands(mark.value))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}

/// Label for an integral axis position, if one exists there.
fn axis_label(labels: &[String], value: f64) -> Option<String> {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return None;
    }
    labels.get(rounded as usize).cloned()
}

// ---------------------------------------------------------------------------
// Category donut
// ---------------------------------------------------------------------------

const DONUT_OUTER: f64 = 1.0;
const DONUT_INNER: f64 = 0.55;
/// Arc resolution per full turn.
const DONUT_STEPS: f64 = 120.0;

/// Share of tonnage per category, drawn as a ring.
pub fn category_donut(ui: &mut Ui, shares: &[CategoryShare], colors: &ColorMap) {
    chart_title(ui, "Category Share (t)");
    if shares.is_empty() {
        ui.label(RichText::new("No data").weak());
        return;
    }

    let mut slices = Vec::new();
    let mut start = 0.0;
    for share in shares {
        let sweep = share.fraction * TAU;
        let name = format!(
            "{}  {:.1}%  ({} t)",
            share.description,
            share.fraction * 100.0,
            format_thousands(share.metric_tons)
        );
        let color = colors.color_for(&share.code);
        for quad in ring_segment(start, start + sweep) {
            slices.push(
                Polygon::new(quad)
                    .fill_color(color)
                    .stroke(Stroke::new(0.0, color))
                    .name(&name),
            );
        }
        start += sweep;
    }

    Plot::new("category_donut")
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show_x(false)
        .show_y(false)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            for slice in slices {
                plot_ui.polygon(slice);
            }
        });
}

/// Convex quads covering the ring between angles `from` and `to`
/// (radians, clockwise from twelve o'clock).
fn ring_segment(from: f64, to: f64) -> Vec<Vec<[f64; 2]>> {
    let steps = (((to - from) / TAU) * DONUT_STEPS).ceil().max(1.0) as usize;
    let point = |angle: f64, radius: f64| [radius * angle.sin(), radius * angle.cos()];

    (0..steps)
        .map(|i| {
            let a0 = from + (to - from) * i as f64 / steps as f64;
            let a1 = from + (to - from) * (i + 1) as f64 / steps as f64;
            vec![
                point(a0, DONUT_INNER),
                point(a0, DONUT_OUTER),
                point(a1, DONUT_OUTER),
                point(a1, DONUT_INNER),
            ]
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Monthly time series
// ---------------------------------------------------------------------------

/// Tons and scaled value per month on a shared month axis.
pub fn time_series_chart(ui: &mut Ui, series: &TimeSeries, divisor: f64) {
    chart_title(ui, "Monthly Volume and Value");
    if series.is_empty() {
        ui.label(RichText::new("No data").weak());
        return;
    }

    let value_name = if divisor == 1_000_000.0 {
        "Value ($M)".to_string()
    } else {
        format!("Value ($ / {})", format_thousands(divisor))
    };

    Plot::new("time_series")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .allow_scroll(false)
        .x_axis_formatter(|mark: GridMark, _range| month_label(mark.value).unwrap_or_default())
        .y_axis_formatter(|mark: GridMark, _range| format_thousands(mark.value))
        .label_formatter(|name, point| match month_label(point.x.round()) {
            Some(month) if !name.is_empty() => format!("{name}\n{month}: {:.1}", point.y),
            Some(month) => month,
            None => String::new(),
        })
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(series.volume())
                    .name("Volume (t)")
                    .color(COLOR_ACCENT)
                    .width(2.0),
            );
            plot_ui.line(
                Line::new(series.scaled_value(divisor))
                    .name(&value_name)
                    .color(COLOR_SUCCESS)
                    .width(2.0),
            );
        });
}

fn month_label(value: f64) -> Option<String> {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 {
        return None;
    }
    Some(Month::from_ordinal(rounded as i64).to_string())
}
