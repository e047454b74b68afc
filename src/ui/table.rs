use eframe::egui::{Button, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use maritime_board::data::model::{category_label, Record};

use crate::state::AppState;
use crate::ui::{format_money, format_thousands};

const PAGE_SIZE: usize = 100;
const ROW_HEIGHT: f32 = 20.0;

const HEADERS: [&str; 9] = [
    "Date",
    "Category",
    "Seller",
    "Buyer",
    "HS Code",
    "Country",
    "Metric Tons",
    "Total Value $",
    "$/KG",
];

/// Number of pages needed for `rows` rows (at least one).
fn page_count(rows: usize) -> usize {
    rows.div_ceil(PAGE_SIZE).max(1)
}

/// The matching shipments, one page at a time.
pub fn shipments_table(ui: &mut Ui, state: &mut AppState) {
    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    let total = state.outcome.indices.len();
    let pages = page_count(total);
    state.table_page = state.table_page.min(pages - 1);

    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Shipments");
        if ui
            .add_enabled(state.table_page > 0, Button::new("◀"))
            .clicked()
        {
            state.table_page -= 1;
        }
        ui.label(format!("Page {} of {}", state.table_page + 1, pages));
        if ui
            .add_enabled(state.table_page + 1 < pages, Button::new("▶"))
            .clicked()
        {
            state.table_page += 1;
        }
        ui.label(RichText::new(format!("{} rows", format_thousands(total as f64))).weak());
    });

    let start = state.table_page * PAGE_SIZE;
    let end = (start + PAGE_SIZE).min(total);
    let page: Vec<&Record> = state.outcome.indices[start..end]
        .iter()
        .filter_map(|&i| dataset.records().get(i))
        .collect();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .auto_shrink([false, false])
        .column(Column::auto().at_least(80.0))
        .columns(Column::remainder().at_least(60.0), HEADERS.len() - 1)
        .header(ROW_HEIGHT, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, page.len(), |mut row| {
                let record = page[row.index()];
                let cells = [
                    record.date.format("%Y-%m-%d").to_string(),
                    category_label(&record.category_code),
                    record.seller().to_string(),
                    record.buyer.clone(),
                    record.hs_code.to_string(),
                    record.country_of_origin.clone(),
                    format_thousands(record.metric_tons),
                    format_thousands(record.total_value),
                    format_money(record.value_per_kg),
                ];
                for text in cells {
                    row.col(|ui| {
                        ui.label(text);
                    });
                }
            });
        });
}
