use chrono::{Local, NaiveDate};
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use maritime_board::data::export::default_export_name;
use maritime_board::data::filter::Facet;
use maritime_board::data::model::category_label;

use crate::color::{COLOR_ACCENT, COLOR_PANEL};
use crate::state::AppState;
use crate::ui::{format_money, format_thousands};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };
    let date_range = dataset.date_range();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            date_filters(ui, state, date_range);
            ui.separator();

            // Selections are applied after the loop so the options being
            // iterated are not recomputed underneath it.
            let mut change: Option<(Facet, Option<String>)> = None;
            for &facet in Facet::all() {
                if let Some(c) = facet_combo(ui, state, facet) {
                    change = Some(c);
                }
                ui.add_space(4.0);
            }
            match change {
                Some((facet, Some(value))) => state.set_facet(facet, value),
                Some((facet, None)) => state.clear_facet(facet),
                None => {}
            }

            ui.separator();
            if ui.button("Clear All Filters").clicked() {
                state.clear_all();
            }
        });
}

fn date_filters(ui: &mut Ui, state: &mut AppState, range: Option<(NaiveDate, NaiveDate)>) {
    let Some((first, last)) = range else {
        return;
    };

    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Date range");
        let dated = state.criteria.start_date.is_some() || state.criteria.end_date.is_some();
        if dated && ui.small_button("Clear").clicked() {
            state.clear_dates();
        }
    });
    egui::Grid::new("date_grid")
        .num_columns(3)
        .spacing([6.0, 4.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("From");
            let mut start = state.criteria.start_date.unwrap_or(first);
            if ui
                .add(DatePickerButton::new(&mut start).id_salt("start_date"))
                .changed()
            {
                state.set_start_date(Some(start));
            }
            if state.criteria.start_date.is_some() && ui.small_button("Any").clicked() {
                state.set_start_date(None);
            }
            ui.end_row();

            ui.label("To");
            let mut end = state.criteria.end_date.unwrap_or(last);
            if ui
                .add(DatePickerButton::new(&mut end).id_salt("end_date"))
                .changed()
            {
                state.set_end_date(Some(end));
            }
            if state.criteria.end_date.is_some() && ui.small_button("Any").clicked() {
                state.set_end_date(None);
            }
            ui.end_row();
        });
}

/// One combo box per facet; returns the new selection if the user changed it.
fn facet_combo(ui: &mut Ui, state: &AppState, facet: Facet) -> Option<(Facet, Option<String>)> {
    let options = state.outcome.options.get(facet);
    let current = state.criteria.get(facet);
    let display = |value: &str| match facet {
        Facet::Category => category_label(value),
        _ => value.to_string(),
    };

    let mut change = None;
    ui.horizontal(|ui: &mut Ui| {
        ui.strong(facet.label());
        ui.label(RichText::new(format!("({})", options.len())).weak());
        if current.is_some() && ui.small_button("Clear").clicked() {
            change = Some((facet, None));
        }
    });

    let selected_text = current.map(display).unwrap_or_else(|| "All".to_string());
    egui::ComboBox::from_id_salt(facet.label())
        .selected_text(selected_text)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(current.is_none(), "All").clicked() {
                change = Some((facet, None));
            }
            for value in options {
                let mut text = RichText::new(display(value));
                if facet == Facet::Category {
                    text = text.color(state.category_colors.color_for(value));
                }
                if ui
                    .selectable_label(current == Some(value.as_str()), text)
                    .clicked()
                {
                    change = Some((facet, Some(value.clone())));
                }
            }
        });
    change
}

// ---------------------------------------------------------------------------
// KPI cards
// ---------------------------------------------------------------------------

/// Headline figures for the current selection.
pub fn kpi_row(ui: &mut Ui, state: &AppState) {
    let kpis = &state.outcome.kpis;
    let cards = [
        ("Total Volume", format!("{} t", format_thousands(kpis.total_metric_tons))),
        ("Total Value $", format_thousands(kpis.total_value)),
        ("Avg $/KG", format_money(kpis.mean_value_per_kg)),
        ("Transactions", format_thousands(kpis.record_count as f64)),
    ];

    ui.columns(cards.len(), |columns| {
        for (col, (title, value)) in columns.iter_mut().zip(cards) {
            egui::Frame::group(col.style())
                .fill(COLOR_PANEL)
                .show(col, |ui: &mut Ui| {
                    ui.set_width(ui.available_width());
                    ui.vertical_centered(|ui: &mut Ui| {
                        ui.label(RichText::new(title).small());
                        ui.label(RichText::new(value).heading().color(COLOR_ACCENT));
                    });
                });
        }
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.dataset.is_some() && state.matching() > 0;
            if ui
                .add_enabled(can_export, egui::Button::new("Export filtered…"))
                .clicked()
            {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} shipments loaded, {} matching",
                format_thousands(ds.len() as f64),
                format_thousands(state.matching() as f64)
            ));
            ui.separator();
            if ui
                .add_enabled(!state.criteria.is_empty(), egui::Button::new("Clear All Filters"))
                .clicked()
            {
                state.clear_all();
            }
        }

        if state.loading {
            ui.spinner();
            ui.label("Loading…");
        }

        if let Some(msg) = &state.status_message {
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                Color32::LIGHT_GREEN
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open shipment data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.start_loading(path);
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export filtered shipments")
        .set_file_name(default_export_name(Local::now().naive_local()))
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        state.export_filtered(&path);
    }
}
