use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::filter::FilteredView;
use crate::data::model::{ColumnType, Dataset};

const ROW_HEIGHT: f32 = 18.0;

/// Scrollable table of the rows in `view`, every column of the dataset.
pub fn data_table(ui: &mut Ui, dataset: &Dataset, view: &FilteredView) {
    if view.is_empty() {
        ui.label(RichText::new("No rows match the current filters.").italics());
        return;
    }

    let columns = dataset.schema().columns();
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(40.0))
        .columns(Column::auto().at_least(60.0).clip(true), columns.len())
        .max_scroll_height(320.0)
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("#");
            });
            for col in columns {
                header.col(|ui| {
                    ui.strong(&col.name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, view.len(), |mut row| {
                let idx = view.indices()[row.index()];
                row.col(|ui| {
                    ui.label(RichText::new(idx.to_string()).weak());
                });
                let Some(cells) = dataset.row(idx) else {
                    return;
                };
                for (cell, def) in cells.iter().zip(columns) {
                    row.col(|ui| {
                        if cell.is_null() {
                            ui.label(RichText::new("–").weak());
                        } else if def.kind == ColumnType::Numeric {
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                ui.label(cell.to_string());
                            });
                        } else {
                            ui.label(cell.to_string());
                        }
                    });
                }
            });
        });
}
