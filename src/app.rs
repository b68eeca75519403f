use eframe::egui;

use crate::data::loader;
use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct EvExplorerApp {
    pub state: AppState,
}

impl Default for EvExplorerApp {
    fn default() -> Self {
        // Preload the bundled sample so the dashboard opens populated,
        // mirroring the "no upload yet" default.
        let mut state = AppState::default();
        match loader::load_default() {
            Ok(dataset) => state.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load bundled dataset: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
        Self { state }
    }
}

impl eframe::App for EvExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar and headline metrics ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters and export ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts, insights, table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::central_panel(ui, &self.state);
        });
    }
}
