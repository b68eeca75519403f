use std::path::Path;

use anyhow::Context as _;
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::loader;
use crate::export;
use crate::state::AppState;
use crate::ui::charts;

/// Cap on the table preview; exports always carry the full view.
const PREVIEW_ROWS: usize = 500;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar with the headline metrics.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open CSV…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Load sample data").clicked() {
                load_sample(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} vehicles loaded, {} visible",
                ds.len(),
                state.view.len()
            ));
            ui.separator();
        }

        if let Some(summary) = &state.summary {
            ui.label(format!("Avg range: {:.0} mi", summary.mean_range));
            ui.label(format!("Avg price: ${:.2}k", summary.mean_price));
            ui.separator();
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – filter widgets and export buttons
// ---------------------------------------------------------------------------

/// Render the filter panel. Any change refilters the cached view.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(ds) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Copy the widget bounds so we can mutate criteria below.
    let makes = ds.makes.clone();
    let (year_min, year_max) = ds.year_bounds;
    let (price_min, price_max) = ds.price_bounds;
    let (range_min, range_max) = ds.range_bounds;

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Brand selector ----
            ui.strong("Brand");
            let selected = state
                .criteria
                .brand
                .clone()
                .unwrap_or_else(|| "All".to_string());
            egui::ComboBox::from_id_salt("brand_selector")
                .selected_text(&selected)
                .show_ui(ui, |ui: &mut Ui| {
                    if ui
                        .selectable_label(state.criteria.brand.is_none(), "All")
                        .clicked()
                    {
                        state.criteria.brand = None;
                        changed = true;
                    }
                    for make in &makes {
                        if ui.selectable_label(selected == *make, make).clicked() {
                            state.criteria.brand = Some(make.clone());
                            changed = true;
                        }
                    }
                });
            ui.separator();

            // ---- Model year ceiling ----
            ui.strong("Model Year");
            changed |= ui
                .add(egui::Slider::new(
                    &mut state.criteria.max_model_year,
                    year_min..=year_max,
                ))
                .changed();
            ui.separator();

            // ---- Price interval ----
            ui.strong("Price Range ($1k)");
            changed |= ui
                .add(
                    egui::Slider::new(&mut state.criteria.price_interval.0, price_min..=price_max)
                        .text("min"),
                )
                .changed();
            changed |= ui
                .add(
                    egui::Slider::new(&mut state.criteria.price_interval.1, price_min..=price_max)
                        .text("max"),
                )
                .changed();
            keep_ordered(&mut state.criteria.price_interval);
            ui.separator();

            // ---- Range interval ----
            ui.strong("Range (miles)");
            changed |= ui
                .add(
                    egui::Slider::new(&mut state.criteria.range_interval.0, range_min..=range_max)
                        .text("min"),
                )
                .changed();
            changed |= ui
                .add(
                    egui::Slider::new(&mut state.criteria.range_interval.1, range_min..=range_max)
                        .text("max"),
                )
                .changed();
            keep_ordered(&mut state.criteria.range_interval);
            ui.separator();

            // ---- Toggles ----
            changed |= ui
                .checkbox(&mut state.criteria.show_outliers, "Show Outliers")
                .changed();
            ui.checkbox(
                &mut state.criteria.show_advanced_charts,
                "Show Advanced Charts",
            );
            ui.separator();

            // ---- Export ----
            ui.strong("Export");
            if ui.button("Download filtered data (CSV)").clicked() {
                export_csv(state);
            }
            if ui.button("Download insights (PDF)").clicked() {
                export_pdf(state);
            }
        });

    if changed {
        state.refilter();
    }
}

/// Sliders can cross; keep the interval well-formed.
fn keep_ordered(interval: &mut (f64, f64)) {
    if interval.0 > interval.1 {
        std::mem::swap(&mut interval.0, &mut interval.1);
    }
}

// ---------------------------------------------------------------------------
// Central panel – charts, insights, table preview
// ---------------------------------------------------------------------------

/// Render the charts, the insight expanders, and the filtered-table preview.
pub fn central_panel(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a CSV to explore EV prices  (File → Open CSV…)");
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Visualizations");
            charts::strip_plot(ui, &state.view);
            ui.add_space(8.0);
            charts::heatmap(ui, &state.view);
            if state.criteria.show_advanced_charts {
                ui.add_space(8.0);
                if let Some(colors) = &state.make_colors {
                    charts::advanced_scatter(ui, &state.view, colors);
                }
            }

            ui.add_space(12.0);
            ui.heading("Business Insights");
            egui::CollapsingHeader::new("Business Recommendations")
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    ui.label(
                        "• Target education: high-price, low-range EVs \
                         (e.g. >$40k, <100 miles) need buyer education on value.",
                    );
                    ui.label("• Dealer strategy: offer incentives for low-range models to boost sales.");
                    ui.label("• Manufacturer focus: adjust MSRP for better range-price balance.");
                });
            egui::CollapsingHeader::new("Final Thoughts")
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    ui.label(
                        "This analysis highlights the need for transparent pricing \
                         to retain EV customers.",
                    );
                });

            ui.add_space(12.0);
            egui::CollapsingHeader::new(format!("Filtered data ({} rows)", state.view.len()))
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    filtered_table(ui, state);
                });
        });
}

fn filtered_table(ui: &mut Ui, state: &AppState) {
    if state.view.is_empty() {
        ui.weak("No records match the current filters.");
        return;
    }
    if state.view.len() > PREVIEW_ROWS {
        ui.weak(format!("Showing first {PREVIEW_ROWS} rows."));
    }

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in [
                "Model Year",
                "Make",
                "Electric Range",
                "Expected Price ($1k)",
                "Price per Mile",
            ] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for row in state.view.rows.iter().take(PREVIEW_ROWS) {
                body.row(18.0, |mut table_row| {
                    table_row.col(|ui| {
                        ui.label(row.record.model_year.to_string());
                    });
                    table_row.col(|ui| {
                        ui.label(&row.record.make);
                    });
                    table_row.col(|ui| {
                        ui.label(format!("{:.0}", row.record.electric_range));
                    });
                    table_row.col(|ui| {
                        ui.label(format!("{:.1}", row.record.expected_price));
                    });
                    table_row.col(|ui| {
                        ui.label(format!("{:.2}", row.price_per_mile));
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// File dialogs and export actions
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open EV dataset")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match loader::load_path(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} vehicles across {} makes",
                    dataset.len(),
                    dataset.makes.len()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

fn load_sample(state: &mut AppState) {
    match loader::load_default() {
        Ok(dataset) => state.set_dataset(dataset),
        Err(e) => {
            log::error!("Failed to load bundled dataset: {e}");
            state.status_message = Some(format!("Error: {e}"));
        }
    }
}

fn export_csv(state: &mut AppState) {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Save filtered data")
        .set_file_name("ev_filtered_data.csv")
        .add_filter("CSV", &["csv"])
        .save_file()
    else {
        return;
    };

    let result = export::to_csv(&state.view)
        .map_err(anyhow::Error::from)
        .and_then(|bytes| write_export(&path, &bytes));
    finish_export(state, &path, result);
}

fn export_pdf(state: &mut AppState) {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Save insights")
        .set_file_name("ev_insights.pdf")
        .add_filter("PDF", &["pdf"])
        .save_file()
    else {
        return;
    };

    let result = export::to_pdf(&state.view)
        .map_err(anyhow::Error::from)
        .and_then(|bytes| write_export(&path, &bytes));
    finish_export(state, &path, result);
}

fn write_export(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}

fn finish_export(state: &mut AppState, path: &Path, result: anyhow::Result<()>) {
    match result {
        Ok(()) => {
            log::info!("Exported {} rows to {}", state.view.len(), path.display());
            state.status_message = Some(format!("Saved {}", path.display()));
        }
        Err(e) => {
            log::error!("Export failed: {e:#}");
            state.status_message = Some(format!("Export failed: {e:#}"));
        }
    }
}
