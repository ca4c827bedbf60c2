use std::collections::BTreeSet;
use std::path::Path;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::config::DashboardMode;
use crate::data::model::CellValue;
use crate::state::AppState;

const ALL: &str = "All";

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel for the active dashboard.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match state.mode {
            DashboardMode::Explorer => explorer_filters(ui, state),
            DashboardMode::District => district_filters(ui, state),
        });
}

fn explorer_filters(ui: &mut Ui, state: &mut AppState) {
    let Some(ds) = state.dataset.clone() else {
        return;
    };
    let categorical = ds.schema().categorical_columns();
    if categorical.is_empty() {
        ui.label(RichText::new("No categorical columns to filter on.").weak());
        return;
    }

    ui.strong("Select Category");
    let current = state.explorer.filter_column.clone();
    egui::ComboBox::from_id_salt("filter_column")
        .selected_text(current.as_deref().unwrap_or(ALL))
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(current.is_none(), ALL).clicked() {
                state.set_filter_column(None);
            }
            for col in &categorical {
                if ui
                    .selectable_label(current.as_deref() == Some(col.as_str()), col)
                    .clicked()
                {
                    state.set_filter_column(Some(col.clone()));
                }
            }
        });

    let Some(column) = state.explorer.filter_column.clone() else {
        return;
    };
    ui.add_space(6.0);
    ui.strong(format!("Select {column}"));
    match state.filter_options() {
        Ok(options) => {
            let selected = state.explorer.filter_value.clone();
            if let Some(value) = value_combo(ui, "filter_value", selected.as_ref(), &options) {
                state.set_filter_value(value);
            }
        }
        Err(e) => error_label(ui, &e.to_string()),
    }
}

fn district_filters(ui: &mut Ui, state: &mut AppState) {
    let levels = state.cascade.levels().to_vec();
    for (level, column) in levels.iter().enumerate() {
        ui.strong(format!("Select {column}"));
        match state.level_options(level) {
            Ok(options) => {
                let selected = state.cascade.selection(level).cloned();
                let id = format!("level_{level}");
                if let Some(value) = value_combo(ui, &id, selected.as_ref(), &options) {
                    state.select_level(level, value);
                }
            }
            Err(e) => {
                error_label(ui, &e.to_string());
                break;
            }
        }
        ui.add_space(6.0);
    }
}

/// Dropdown over `options`. Returns the value the user clicked, if any.
///
/// An empty option set renders a disabled placeholder instead of a combo.
fn value_combo(
    ui: &mut Ui,
    id: &str,
    selected: Option<&CellValue>,
    options: &BTreeSet<CellValue>,
) -> Option<CellValue> {
    if options.is_empty() {
        ui.add_enabled(false, egui::Label::new(RichText::new("No options available").italics()));
        return None;
    }

    let mut clicked = None;
    let text = selected.map(|v| v.to_string()).unwrap_or_default();
    egui::ComboBox::from_id_salt(id)
        .selected_text(text)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for value in options {
                if ui
                    .selectable_label(selected == Some(value), value.to_string())
                    .clicked()
                {
                    clicked = Some(value.clone());
                }
            }
        });
    clicked
}

fn error_label(ui: &mut Ui, msg: &str) {
    ui.label(RichText::new(msg).color(Color32::RED));
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

        for mode in [DashboardMode::Explorer, DashboardMode::District] {
            if ui
                .selectable_label(state.mode == mode, mode.label())
                .clicked()
            {
                state.set_mode(mode);
            }
        }

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{}: {} rows loaded, {} visible",
                ds.source,
                ds.len(),
                state.view.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File loading
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open survey data")
        .add_filter("Supported files", &["csv", "tsv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("TSV", &["tsv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        load_path(state, &path);
    }
}

/// Load `path` into `state`, reporting failures in the status line.
pub fn load_path(state: &mut AppState, path: &Path) {
    match crate::data::loader::load_file(path) {
        Ok(dataset) => state.set_dataset(dataset),
        Err(e) => {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
