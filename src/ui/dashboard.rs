use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::aggregate::{column_means, group_mean, histogram, numeric_series};
use crate::data::filter::Lookup;
use crate::data::model::Dataset;
use crate::state::AppState;
use crate::ui::{metrics, plot, table};

// ---------------------------------------------------------------------------
// Explorer dashboard (central panel)
// ---------------------------------------------------------------------------

pub fn explorer_dashboard(ui: &mut Ui, state: &mut AppState) {
    let Some(ds) = state.dataset.clone() else {
        empty_hint(ui);
        return;
    };
    if ds.is_empty() {
        no_rows_hint(ui);
        return;
    }
    let numeric = ds.schema().numeric_columns();
    let categorical = ds.schema().categorical_columns();

    egui::CollapsingHeader::new(RichText::new("🔍 View Data").strong())
        .id_salt("explorer_data")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            table::data_table(ui, &ds, &state.view);
        });

    ui.add_space(8.0);
    ui.heading("Key Metrics");
    match column_means(&ds, &state.view, state.settings.max_kpis) {
        Ok(means) => metrics::metric_row(ui, &means),
        Err(e) => error_text(ui, &e.to_string()),
    }

    if numeric.is_empty() {
        return;
    }

    ui.add_space(8.0);
    ui.heading("Visual Analysis");
    column_combo(
        ui,
        "series_column",
        "Select Numeric Column",
        &numeric,
        &mut state.explorer.series_column,
    );
    if let Some(column) = state.explorer.series_column.clone() {
        match numeric_series(&ds, &state.view, &column) {
            Ok(series) => {
                let values: Vec<f64> = series.iter().map(|(_, v)| *v).collect();
                let bins = histogram(&values, state.settings.histogram_bins);
                ui.columns(2, |cols| {
                    cols[0].strong(format!("{column} Trend"));
                    plot::trend_plot(&mut cols[0], &column, &series);
                    cols[1].strong(format!("{column} Distribution"));
                    plot::histogram_plot(&mut cols[1], &column, &bins);
                });
            }
            Err(e) => error_text(ui, &e.to_string()),
        }
    }

    if categorical.is_empty() {
        return;
    }

    ui.add_space(8.0);
    ui.heading("Category Comparison");
    ui.horizontal(|ui: &mut Ui| {
        column_combo(
            ui,
            "group_column",
            "Category Column",
            &categorical,
            &mut state.explorer.group_column,
        );
        column_combo(
            ui,
            "group_value_column",
            "Numeric Column",
            &numeric,
            &mut state.explorer.group_value_column,
        );
    });

    let (Some(group), Some(value)) = (
        state.explorer.group_column.clone(),
        state.explorer.group_value_column.clone(),
    ) else {
        return;
    };
    match group_mean(&ds, &state.view, &group, &value) {
        Ok(mut groups) => {
            groups.sort_by(|a, b| a.0.cmp(&b.0));
            ui.strong(format!("Average {value} by {group}"));
            plot::category_bars(ui, "group_mean_plot", &value, &groups, false);
        }
        Err(e) => error_text(ui, &e.to_string()),
    }
}

// ---------------------------------------------------------------------------
// District lookup dashboard (central panel)
// ---------------------------------------------------------------------------

pub fn district_dashboard(ui: &mut Ui, state: &AppState) {
    let Some(ds) = state.dataset.clone() else {
        empty_hint(ui);
        return;
    };
    if ds.is_empty() {
        no_rows_hint(ui);
        return;
    }
    if state.status_message.is_some() && state.view.is_empty() {
        ui.label(
            "The district lookup needs the columns State, District Name, Category, \
             Indicator, NFHS 4, NFHS 5 and Change.",
        );
        return;
    }

    let selected = |level: usize| {
        state
            .cascade
            .selection(level)
            .map(|v| v.to_string())
            .unwrap_or_default()
    };
    let (district, category, indicator) = (selected(1), selected(2), selected(3));

    ui.heading(format!("{district}, {}", selected(0)));
    ui.label(RichText::new(format!("{category} › {indicator}")).weak());
    ui.add_space(8.0);

    match state.district_lookup() {
        None => {
            ui.label("Select a value at every level to see the survey figures.");
        }
        Some(Lookup::Empty) => {
            warning_text(ui, "No survey record for this combination.");
        }
        Some(Lookup::Single(row)) => {
            indicator_metrics(ui, &ds, row);
            let (nfhs4, nfhs5) = (number(&ds, row, "NFHS 4"), number(&ds, row, "NFHS 5"));
            plot::survey_comparison(ui, &indicator, nfhs4, nfhs5);
        }
        Some(found @ Lookup::Multiple(_)) => {
            let rows = found.rows();
            warning_text(
                ui,
                &format!("{} records match this combination; each is shown below.", rows.len()),
            );
            for &row in rows {
                ui.label(RichText::new(format!("Row {row}")).weak());
                indicator_metrics(ui, &ds, row);
            }
        }
    }

    ui.add_space(8.0);
    ui.heading(format!("Change across {category} indicators"));
    match group_mean(&ds, &state.view, "Indicator", "Change") {
        Ok(mut groups) => {
            groups.sort_by(|a, b| a.0.cmp(&b.0));
            plot::category_bars(ui, "indicator_change_plot", "Change", &groups, true);
        }
        Err(e) => error_text(ui, &e.to_string()),
    }

    egui::CollapsingHeader::new(RichText::new("🔍 View Data").strong())
        .id_salt("district_data")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            table::data_table(ui, &ds, &state.view);
        });
}

fn indicator_metrics(ui: &mut Ui, ds: &Dataset, row: usize) {
    let change = number(ds, row, "Change");
    ui.horizontal_wrapped(|ui: &mut Ui| {
        metrics::metric_card(ui, "NFHS 4", number(ds, row, "NFHS 4"), None);
        metrics::metric_card(ui, "NFHS 5", number(ds, row, "NFHS 5"), change);
        metrics::metric_card(ui, "Change", change, None);
    });
}

fn number(ds: &Dataset, row: usize, column: &str) -> Option<f64> {
    ds.value(row, column).ok().and_then(|v| v.as_f64())
}

// ---------------------------------------------------------------------------
// Shared widgets
// ---------------------------------------------------------------------------

/// Labelled dropdown choosing one of `columns` into `selected`.
fn column_combo(
    ui: &mut Ui,
    id: &str,
    label: &str,
    columns: &[String],
    selected: &mut Option<String>,
) {
    ui.label(label);
    egui::ComboBox::from_id_salt(id)
        .selected_text(selected.clone().unwrap_or_default())
        .show_ui(ui, |ui: &mut Ui| {
            for col in columns {
                ui.selectable_value(selected, Some(col.clone()), col);
            }
        });
}

fn empty_hint(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("Open a file to explore the data  (File → Open…)");
    });
}

fn no_rows_hint(ui: &mut Ui) {
    ui.label(RichText::new("The file has a header but no data rows.").italics());
}

fn error_text(ui: &mut Ui, msg: &str) {
    ui.label(RichText::new(format!("Error: {msg}")).color(Color32::RED));
}

fn warning_text(ui: &mut Ui, msg: &str) {
    ui.label(RichText::new(msg).color(Color32::from_rgb(230, 160, 30)));
}
