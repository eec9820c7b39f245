use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::{Selection, DIRECTION_OPTIONS};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.sample.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    // ---- Transaction type ----
    ui.strong("Select Transaction Type");
    if let Some(choice) = dropdown(ui, "direction_filter", &state.filters.direction, DIRECTION_OPTIONS)
    {
        state.set_direction(choice);
    }
    ui.add_space(8.0);

    // ---- Shipping method (options depend on the transaction type) ----
    ui.strong("Select Shipping Method");
    let options = state.shipping_options.clone();
    if let Some(choice) = dropdown(
        ui,
        "shipping_filter",
        &state.filters.shipping_method,
        options.iter().map(String::as_str),
    ) {
        state.set_shipping_method(choice);
    }

    ui.separator();
    if let Some(sample) = &state.sample {
        if sample.is_empty() {
            ui.label(RichText::new("The sample is empty.").color(Color32::YELLOW));
        }
        ui.small(format!(
            "Sample of {} from {} rows, seed {}",
            sample.len(),
            sample.population,
            sample.seed
        ));
    }
}

/// A combo box over `options`; returns the new selection when it changed.
fn dropdown<'a>(
    ui: &mut Ui,
    id: &str,
    current: &Selection,
    options: impl IntoIterator<Item = &'a str>,
) -> Option<Selection> {
    let mut picked = None;
    egui::ComboBox::from_id_salt(id)
        .selected_text(current.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for label in options {
                let option = Selection::from_label(label);
                if ui.selectable_label(*current == option, label).clicked() {
                    picked = Some(option);
                }
            }
        });
    picked.filter(|p| p != current)
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
        });

        ui.separator();

        if let Some(sample) = &state.sample {
            ui.label(format!(
                "{} rows sampled, {} visible",
                sample.len(),
                state.visible_indices.len()
            ));
            ui.separator();
            ui.label(state.config.input.display().to_string());
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open transactions")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}
