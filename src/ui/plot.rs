use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints};

use crate::color::{change_color, ColorMap};
use crate::data::aggregate::Bin;
use crate::data::model::CellValue;

const PLOT_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Trend and distribution (explorer)
// ---------------------------------------------------------------------------

/// Line of `column` values against their row index.
pub fn trend_plot(ui: &mut Ui, column: &str, series: &[(usize, f64)]) {
    let points: PlotPoints = series.iter().map(|&(row, v)| [row as f64, v]).collect();

    Plot::new("trend_plot")
        .height(PLOT_HEIGHT)
        .x_axis_label("Index")
        .y_axis_label(column)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(points)
                    .name(format!("{column} Trend"))
                    .color(Color32::LIGHT_BLUE)
                    .width(1.5),
            );
        });
}

/// Histogram bars, one per bin, placed at the bin centre.
pub fn histogram_plot(ui: &mut Ui, column: &str, bins: &[Bin]) {
    let bars: Vec<Bar> = bins
        .iter()
        .map(|bin| {
            // Constant data collapses into a zero-width bin.
            let width = if bin.width() > 0.0 { bin.width() } else { 1.0 };
            Bar::new(bin.center(), bin.count as f64)
                .width(width)
                .name(format!("{:.2} – {:.2}", bin.start, bin.end))
        })
        .collect();

    Plot::new("histogram_plot")
        .height(PLOT_HEIGHT)
        .x_axis_label(column)
        .y_axis_label("Count")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .name(format!("{column} Distribution"))
                    .color(Color32::LIGHT_BLUE),
            );
        });
}

// ---------------------------------------------------------------------------
// Category comparisons
// ---------------------------------------------------------------------------

/// Vertical bars of one value per category, labelled on the x axis.
///
/// With `signed` set, bars are coloured by the sign of their value instead of
/// by category.
pub fn category_bars(
    ui: &mut Ui,
    id: &str,
    y_label: &str,
    groups: &[(CellValue, f64)],
    signed: bool,
) {
    let colors = ColorMap::new(groups.iter().map(|(key, _)| key));
    let labels: Vec<String> = groups.iter().map(|(key, _)| key.to_string()).collect();

    let bars: Vec<Bar> = groups
        .iter()
        .enumerate()
        .map(|(i, (key, value))| {
            let fill = if signed {
                change_color(*value)
            } else {
                colors.color_for(key)
            };
            Bar::new(i as f64, *value)
                .width(0.7)
                .name(key.to_string())
                .fill(fill)
        })
        .collect();

    Plot::new(id)
        .height(PLOT_HEIGHT)
        .y_axis_label(y_label)
        .x_axis_formatter(move |mark: GridMark, _range| category_tick(&labels, mark.value))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(y_label));
        });
}

/// Side-by-side NFHS 4 / NFHS 5 bars for one indicator.
pub fn survey_comparison(ui: &mut Ui, indicator: &str, nfhs4: Option<f64>, nfhs5: Option<f64>) {
    let rounds = [("NFHS 4", nfhs4), ("NFHS 5", nfhs5)];
    let palette = crate::color::generate_palette(rounds.len());
    let labels: Vec<String> = rounds.iter().map(|(name, _)| name.to_string()).collect();

    Plot::new("survey_comparison")
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .y_axis_label(indicator)
        .x_axis_formatter(move |mark: GridMark, _range| category_tick(&labels, mark.value))
        .show(ui, |plot_ui| {
            for (i, ((name, value), color)) in rounds.iter().zip(palette).enumerate() {
                let Some(value) = value else {
                    continue;
                };
                let bar = Bar::new(i as f64, *value).width(0.6).name(*name);
                plot_ui.bar_chart(BarChart::new(vec![bar]).name(*name).color(color));
            }
        });
}

/// Label for an integer tick position, blank between categories.
fn category_tick(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_label_integer_positions_only() {
        let labels = vec!["NFHS 4".to_string(), "NFHS 5".to_string()];
        assert_eq!(category_tick(&labels, 0.0), "NFHS 4");
        assert_eq!(category_tick(&labels, 1.0), "NFHS 5");
        assert_eq!(category_tick(&labels, 0.5), "");
        assert_eq!(category_tick(&labels, 2.0), "");
        assert_eq!(category_tick(&labels, -1.0), "");
    }
}
