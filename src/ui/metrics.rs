use eframe::egui::{self, Color32, RichText, Ui};

use crate::color::change_color;

/// A labelled scalar, optionally with a signed delta underneath.
pub fn metric_card(ui: &mut Ui, label: &str, value: Option<f64>, delta: Option<f64>) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_min_width(120.0);
        ui.label(RichText::new(label).weak());
        ui.label(RichText::new(format_metric(value)).size(24.0).strong());
        if let Some(delta) = delta {
            let arrow = if delta >= 0.0 { "▲" } else { "▼" };
            ui.label(RichText::new(format!("{arrow} {delta:+.2}")).color(change_color(delta)));
        }
    });
}

/// Row of cards, one per `(label, value)`.
pub fn metric_row(ui: &mut Ui, metrics: &[(String, Option<f64>)]) {
    if metrics.is_empty() {
        ui.label(RichText::new("No numeric columns.").color(Color32::GRAY));
        return;
    }
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (label, value) in metrics {
            metric_card(ui, label, *value, None);
        }
    });
}

/// Values are rounded to two decimals; a missing value shows as a dash.
pub fn format_metric(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.2}"),
        _ => "–".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_round_to_two_decimals() {
        assert_eq!(format_metric(Some(1.005_1)), "1.01");
        assert_eq!(format_metric(Some(-2.0)), "-2.00");
        assert_eq!(format_metric(None), "–");
        assert_eq!(format_metric(Some(f64::NAN)), "–");
    }
}
