use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Align2, Color32, RichText, ScrollArea, Stroke, Ui};
use egui_plot::{
    uniform_grid_spacer, Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Line, MarkerShape,
    Plot, PlotPoint, PlotPoints, Points, Polygon, Text,
};

use crate::color::{contrasting_text, coolwarm, generate_palette, set3, ColorMap};
use crate::data::aggregate::{
    BoxStats, CorrelationMatrix, DashboardAggregates, DirectionCount, MonthlySeries,
    ShippingTotal, CORRELATION_COLUMNS,
};
use crate::state::AppState;

const CHART_HEIGHT: f32 = 320.0;
const EMPTY_VIEW: &str = "No transactions match the current filters";

// ---------------------------------------------------------------------------
// Dashboard grid (central panel)
// ---------------------------------------------------------------------------

/// Render the title and the fixed grid of five charts.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    if state.sample.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a transactions file to start  (File → Open…)");
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(RichText::new("Dashboard for Imports and Exports").size(26.0).strong());
            ui.add_space(8.0);

            if let Some(err) = &state.aggregate_error {
                ui.label(RichText::new(format!("Error: {err}")).color(Color32::RED));
                return;
            }
            let Some(agg) = &state.aggregates else {
                return;
            };

            // ---- Row 1: pie + line ----
            subheader(ui, "Overview of Imports and Exports");
            ui.columns(2, |cols: &mut [Ui]| {
                chart_cell(&mut cols[0], "Distribution of Import vs Export", agg, |ui| {
                    pie_chart(ui, &agg.direction_counts, &state.direction_colors)
                });
                chart_cell(&mut cols[1], "Average Value of Transactions by Month", agg, |ui| {
                    monthly_line_chart(ui, &agg.monthly_mean, &state.direction_colors)
                });
            });

            // ---- Row 2: box plot, full width ----
            subheader(ui, "Detailed Distribution");
            chart_cell(ui, "Distribution of Transaction Value by Category", agg, |ui| {
                category_box_plot(ui, &agg.categories)
            });

            // ---- Row 3: bar + heatmap ----
            ui.columns(2, |cols: &mut [Ui]| {
                chart_cell(&mut cols[0], "Quantity of Products by Shipping Method", agg, |ui| {
                    shipping_bar_chart(ui, &agg.shipping_quantity)
                });
                chart_cell(
                    &mut cols[1],
                    "Correlation Between Quantity, Value, and Weight",
                    agg,
                    |ui| correlation_heatmap(ui, &agg.correlation),
                );
            });
        });
}

fn subheader(ui: &mut Ui, text: &str) {
    ui.add_space(12.0);
    ui.label(RichText::new(text).size(20.0).strong());
    ui.separator();
}

/// Title plus chart, or a placeholder when the filtered view is empty.
fn chart_cell(
    ui: &mut Ui,
    title: &str,
    agg: &DashboardAggregates,
    draw: impl FnOnce(&mut Ui),
) {
    ui.label(RichText::new(title).size(16.0).strong());
    if agg.is_empty() {
        ui.allocate_ui(egui::vec2(ui.available_width(), CHART_HEIGHT), |ui: &mut Ui| {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label(RichText::new(EMPTY_VIEW).italics().weak());
            });
        });
    } else {
        draw(ui);
    }
    ui.add_space(8.0);
}

/// A plot with zoom, drag and hover read-outs switched off.
fn static_plot(id: &str) -> Plot<'static> {
    Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .allow_double_click_reset(false)
        .show_x(false)
        .show_y(false)
}

/// Axis text for category positions 0, 1, 2, …; blank between them.
fn category_label(names: &[String], value: f64) -> String {
    let i = value.round();
    if (value - i).abs() > 1e-6 || i < 0.0 {
        return String::new();
    }
    names.get(i as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Points of the circle segment from `start` to `end` (radians) around 0.
fn pie_slice(start: f64, end: f64) -> Vec<[f64; 2]> {
    let steps = (((end - start) / TAU) * 96.0).ceil().max(2.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push([0.0, 0.0]);
    for s in 0..=steps {
        let a = start + (end - start) * s as f64 / steps as f64;
        points.push([a.cos(), a.sin()]);
    }
    points
}

/// Direction share, starting at 12 o'clock and running counter-clockwise.
pub fn pie_chart(ui: &mut Ui, counts: &[DirectionCount], colors: &ColorMap) {
    let total: usize = counts.iter().map(|c| c.count).sum();

    static_plot("direction_pie")
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .include_x(-1.35)
        .include_x(1.35)
        .include_y(-1.2)
        .include_y(1.2)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            let mut angle = FRAC_PI_2;
            for c in counts {
                let share = c.count as f64 / total as f64;
                let end = angle + share * TAU;
                let color = colors.color_for(&c.direction);

                plot_ui.polygon(
                    Polygon::new(PlotPoints::new(pie_slice(angle, end)))
                        .name(&c.direction)
                        .fill_color(color)
                        .stroke(Stroke::new(1.5, Color32::WHITE)),
                );

                let mid = (angle + end) / 2.0;
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(0.6 * mid.cos(), 0.6 * mid.sin()),
                        RichText::new(format!("{:.1}%", share * 100.0)).strong(),
                    )
                    .color(contrasting_text(color)),
                );
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(1.15 * mid.cos(), 1.15 * mid.sin()),
                        RichText::new(&c.direction),
                    )
                    .anchor(Align2::CENTER_CENTER),
                );
                angle = end;
            }
        });
}

// ---------------------------------------------------------------------------
// Line chart
// ---------------------------------------------------------------------------

/// One line with circle markers per direction, x = month 1-12.
pub fn monthly_line_chart(ui: &mut Ui, series: &[MonthlySeries], colors: &ColorMap) {
    ui.horizontal(|ui: &mut Ui| {
        ui.small("Transaction Type:");
        for (name, color) in colors.legend_entries() {
            if series.iter().any(|s| s.direction == name) {
                ui.colored_label(color, name);
            }
        }
    });

    static_plot("monthly_mean_line")
        .x_axis_label("Month")
        .y_axis_label("Average Transaction Value")
        .include_x(0.5)
        .include_x(12.5)
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 3.0, 12.0]))
        .x_axis_formatter(|mark, _range| {
            let m = mark.value.round();
            if (mark.value - m).abs() < 1e-6 && (1.0..=12.0).contains(&m) {
                format!("{m}")
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            for s in series {
                let color = colors.color_for(&s.direction);
                let pts: Vec<[f64; 2]> = s.points.iter().map(|&(m, v)| [m as f64, v]).collect();

                plot_ui.line(
                    Line::new(PlotPoints::new(pts.clone()))
                        .name(&s.direction)
                        .color(color)
                        .width(2.0),
                );
                plot_ui.points(
                    Points::new(PlotPoints::new(pts))
                        .name(&s.direction)
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(4.0)
                        .color(color),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Box plot
// ---------------------------------------------------------------------------

/// Value distribution per category, Set3 colours, outliers as points.
pub fn category_box_plot(ui: &mut Ui, categories: &[BoxStats]) {
    let names: Vec<String> = categories.iter().map(|c| c.category.clone()).collect();

    static_plot("category_box")
        .x_axis_label("Category")
        .y_axis_label("Value")
        .include_x(-0.6)
        .include_x(categories.len() as f64 - 0.4)
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .x_axis_formatter(move |mark, _range| category_label(&names, mark.value))
        .show(ui, |plot_ui| {
            let elems: Vec<BoxElem> = categories
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    BoxElem::new(
                        i as f64,
                        BoxSpread::new(c.lower_whisker, c.q1, c.median, c.q3, c.upper_whisker),
                    )
                    .name(format!("{} (n = {})", c.category, c.count))
                    .fill(set3(i))
                    .stroke(Stroke::new(1.0, Color32::DARK_GRAY))
                    .box_width(0.6)
                    .whisker_width(0.3)
                })
                .collect();
            plot_ui.box_plot(BoxPlot::new(elems).name("Value"));

            let outliers: Vec<[f64; 2]> = categories
                .iter()
                .enumerate()
                .flat_map(|(i, c)| c.outliers.iter().map(move |&v| [i as f64, v]))
                .collect();
            if !outliers.is_empty() {
                plot_ui.points(
                    Points::new(PlotPoints::new(outliers))
                        .shape(MarkerShape::Diamond)
                        .radius(2.5)
                        .color(Color32::DARK_GRAY),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Bar chart
// ---------------------------------------------------------------------------

/// Total quantity per shipping method, one hue per bar.
pub fn shipping_bar_chart(ui: &mut Ui, totals: &[ShippingTotal]) {
    let names: Vec<String> = totals.iter().map(|t| t.method.clone()).collect();
    let palette = generate_palette(totals.len());

    static_plot("shipping_bars")
        .x_axis_label("Shipping Method")
        .y_axis_label("Quantity")
        .include_y(0.0)
        .include_x(-0.6)
        .include_x(totals.len() as f64 - 0.4)
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .x_axis_formatter(move |mark, _range| category_label(&names, mark.value))
        .show(ui, |plot_ui| {
            let bars: Vec<Bar> = totals
                .iter()
                .zip(palette)
                .enumerate()
                .map(|(i, (t, color))| {
                    Bar::new(i as f64, t.quantity)
                        .name(&t.method)
                        .fill(color)
                        .width(0.6)
                })
                .collect();
            plot_ui.bar_chart(BarChart::new(bars).name("Quantity"));
        });
}

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

/// 3×3 annotated heatmap; row 0 at the top.
pub fn correlation_heatmap(ui: &mut Ui, corr: &CorrelationMatrix) {
    let labels: Vec<String> = CORRELATION_COLUMNS.iter().map(|s| s.to_string()).collect();
    let y_labels: Vec<String> = labels.iter().rev().cloned().collect();
    let n = CORRELATION_COLUMNS.len();

    static_plot("correlation_heatmap")
        .data_aspect(1.0)
        .show_grid(false)
        .include_x(-0.5)
        .include_x(n as f64 - 0.5)
        .include_y(-0.5)
        .include_y(n as f64 - 0.5)
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .y_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .y_axis_formatter(move |mark, _range| category_label(&y_labels, mark.value))
        .show(ui, |plot_ui| {
            for row in 0..n {
                for col in 0..n {
                    let value = corr.get(row, col);
                    let fill = value.map(coolwarm).unwrap_or(Color32::LIGHT_GRAY);
                    let x = col as f64;
                    let y = (n - 1 - row) as f64;

                    plot_ui.polygon(
                        Polygon::new(PlotPoints::new(vec![
                            [x - 0.5, y - 0.5],
                            [x + 0.5, y - 0.5],
                            [x + 0.5, y + 0.5],
                            [x - 0.5, y + 0.5],
                        ]))
                        .fill_color(fill)
                        .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );

                    let text = value.map_or_else(|| "n/a".to_string(), |r| format!("{r:.2}"));
                    plot_ui.text(
                        Text::new(PlotPoint::new(x, y), RichText::new(text).strong())
                            .color(contrasting_text(fill)),
                    );
                }
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_runs_counter_clockwise_from_top() {
        let pts = pie_slice(FRAC_PI_2, FRAC_PI_2 + TAU / 4.0);
        assert_eq!(pts[0], [0.0, 0.0]);
        let first = pts[1];
        let last = pts[pts.len() - 1];
        assert!(first[0].abs() < 1e-9 && (first[1] - 1.0).abs() < 1e-9);
        assert!((last[0] + 1.0).abs() < 1e-9 && last[1].abs() < 1e-9);
    }

    #[test]
    fn category_labels_only_on_integers() {
        let names = vec!["Air".to_string(), "Sea".to_string()];
        assert_eq!(category_label(&names, 0.0), "Air");
        assert_eq!(category_label(&names, 1.0), "Sea");
        assert_eq!(category_label(&names, 0.5), "");
        assert_eq!(category_label(&names, 2.0), "");
        assert_eq!(category_label(&names, -1.0), "");
    }
}
