use eframe::egui;

use maritime_board::config::AppConfig;

use crate::color::{COLOR_ACCENT, COLOR_BG, COLOR_PANEL, COLOR_TEXT};
use crate::state::AppState;
use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct MaritimeBoardApp {
    pub state: AppState,
}

impl MaritimeBoardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        apply_theme(&cc.egui_ctx);

        let mut state = AppState::new(config);
        if let Some(path) = state.config.data_path.clone() {
            log::info!("Loading {} at startup", path.display());
            state.start_loading(path);
        }
        Self { state }
    }
}

fn apply_theme(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = COLOR_BG;
    visuals.window_fill = COLOR_PANEL;
    visuals.extreme_bg_color = COLOR_PANEL;
    visuals.override_text_color = Some(COLOR_TEXT);
    visuals.selection.bg_fill = COLOR_ACCENT;
    visuals.hyperlink_color = COLOR_ACCENT;
    ctx.set_visuals(visuals);
}

impl eframe::App for MaritimeBoardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_loader();
        if self.state.loading {
            ctx.request_repaint();
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: matching shipments ----
        egui::TopBottomPanel::bottom("table_panel")
            .default_height(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                table::shipments_table(ui, &mut self.state);
            });

        // ---- Central panel: KPIs and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                ui.centered_and_justified(|ui| {
                    if self.state.loading {
                        ui.spinner();
                    } else {
                        ui.heading("Open a shipments file to begin  (File → Open…)");
                    }
                });
                return;
            }
            panels::kpi_row(ui, &self.state);
            ui.separator();
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    charts::dashboard(ui, &self.state);
                });
        });
    }
}
