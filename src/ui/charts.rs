use eframe::egui::{self, Color32, RichText, ScrollArea, Sense, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Line, Plot, PlotPoints, Points};

use crop_yield_dashboard::color::{viridis, with_opacity, ColorMap};
use crop_yield_dashboard::state::AppState;
use crop_yield_dashboard::views::{
    BoxSummary, GeoProjection, GroupedScatter, Histogram, TrendScatter,
};

use super::panels::kpi_row;

const CHART_HEIGHT: f32 = 280.0;

/// Colour bands the geospatial points are drawn in.
const GEO_BANDS: usize = 16;

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render KPIs and the five charts for the current frame.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(frame) = &state.frame else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No dataset loaded  (set CROP_DASHBOARD_DATA and restart)");
        });
        return;
    };

    let fallback = ColorMap::new(&Default::default());
    let colors = state.crop_colors.as_ref().unwrap_or(&fallback);
    let charts = &frame.charts;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            kpi_row(ui, &frame.summary);
            ui.add_space(8.0);

            ui.columns(2, |cols| {
                section(&mut cols[0], "Yield Distribution", |ui| {
                    distribution_chart(ui, &charts.distribution)
                });
                section(&mut cols[1], "NDVI vs Yield", |ui| {
                    vegetation_chart(ui, &charts.vegetation, colors)
                });
            });

            ui.columns(2, |cols| {
                section(&mut cols[0], "Rainfall vs Yield", |ui| {
                    rainfall_chart(ui, &charts.rainfall, colors)
                });
                section(&mut cols[1], "Yield vs Sowing Month", |ui| {
                    temporal_chart(ui, &charts.temporal)
                });
            });

            section(ui, "Geospatial Yield Distribution", |ui| {
                geo_chart(ui, &charts.geo)
            });
        });
}

fn section(ui: &mut Ui, title: &str, body: impl FnOnce(&mut Ui)) {
    ui.group(|ui: &mut Ui| {
        ui.strong(title);
        body(ui);
    });
}

fn no_data(ui: &mut Ui) {
    ui.allocate_ui(egui::vec2(ui.available_width(), CHART_HEIGHT), |ui: &mut Ui| {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(RichText::new("No data for the current selection").weak());
        });
    });
}

// ---------------------------------------------------------------------------
// Individual charts
// ---------------------------------------------------------------------------

fn distribution_chart(ui: &mut Ui, hist: &Histogram) {
    if hist.is_empty() {
        no_data(ui);
        return;
    }

    let bars: Vec<Bar> = hist
        .bins
        .iter()
        .map(|b| {
            Bar::new(b.center(), b.count as f64)
                .width(b.width())
                .name(format!("{:.1} – {:.1}", b.start, b.end))
        })
        .collect();

    Plot::new("yield_distribution")
        .height(CHART_HEIGHT)
        .x_axis_label("yield_kg_per_hectare")
        .y_axis_label("count")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(Color32::LIGHT_BLUE));
        });
}

fn scatter_points(plot_ui: &mut egui_plot::PlotUi, scatter: &GroupedScatter, colors: &ColorMap) {
    for group in &scatter.groups {
        let color = with_opacity(colors.color_for(&group.crop_type), scatter.opacity);
        let points: PlotPoints = group.points.iter().copied().collect();
        plot_ui.points(
            Points::new(points)
                .name(&group.crop_type)
                .color(color)
                .radius(2.5),
        );
    }
}

fn vegetation_chart(ui: &mut Ui, scatter: &GroupedScatter, colors: &ColorMap) {
    if scatter.is_empty() {
        no_data(ui);
        return;
    }

    Plot::new("ndvi_vs_yield")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(scatter.x_label)
        .y_axis_label(scatter.y_label)
        .allow_scroll(false)
        .show(ui, |plot_ui| scatter_points(plot_ui, scatter, colors));
}

fn rainfall_chart(ui: &mut Ui, trend: &TrendScatter, colors: &ColorMap) {
    if trend.scatter.is_empty() {
        no_data(ui);
        return;
    }

    Plot::new("rainfall_vs_yield")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(trend.scatter.x_label)
        .y_axis_label(trend.scatter.y_label)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            scatter_points(plot_ui, &trend.scatter, colors);
            for line in &trend.trends {
                let points: PlotPoints = line.points.iter().copied().collect();
                plot_ui.line(
                    Line::new(points)
                        .name(&line.crop_type)
                        .color(colors.color_for(&line.crop_type))
                        .width(2.0),
                );
            }
        });
}

fn temporal_chart(ui: &mut Ui, boxes: &[BoxSummary]) {
    if boxes.is_empty() {
        no_data(ui);
        return;
    }

    let elems: Vec<BoxElem> = boxes
        .iter()
        .enumerate()
        .map(|(i, b)| {
            BoxElem::new(
                i as f64,
                BoxSpread::new(b.lower_whisker, b.q1, b.median, b.q3, b.upper_whisker),
            )
            .name(&b.category)
            .box_width(0.6)
        })
        .collect();

    let outliers: PlotPoints = boxes
        .iter()
        .enumerate()
        .flat_map(|(i, b)| b.outliers.iter().map(move |&v| [i as f64, v]))
        .collect();

    let labels: Vec<String> = boxes.iter().map(|b| b.category.clone()).collect();

    Plot::new("yield_vs_sowing_month")
        .height(CHART_HEIGHT)
        .x_axis_label("sowing_month")
        .y_axis_label("yield_kg_per_hectare")
        .allow_scroll(false)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() < 1e-6 && idx >= 0.0 {
                labels.get(idx as usize).cloned().unwrap_or_default()
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.box_plot(BoxPlot::new(elems).color(Color32::LIGHT_GREEN));
            plot_ui.points(
                Points::new(outliers)
                    .name("outliers")
                    .color(Color32::LIGHT_RED)
                    .radius(2.0),
            );
        });

    egui::CollapsingHeader::new("Summary table")
        .id_salt("temporal_table")
        .show(ui, |ui: &mut Ui| box_table(ui, boxes));
}

fn box_table(ui: &mut Ui, boxes: &[BoxSummary]) {
    TableBuilder::new(ui)
        .striped(true)
        .columns(Column::auto().at_least(60.0), 7)
        .header(18.0, |mut header| {
            for title in ["Month", "n", "Min", "Q1", "Median", "Q3", "Max"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for b in boxes {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(&b.category);
                    });
                    row.col(|ui| {
                        ui.label(b.count.to_string());
                    });
                    for v in [b.min, b.q1, b.median, b.q3, b.max] {
                        row.col(|ui| {
                            ui.label(format!("{v:.1}"));
                        });
                    }
                });
            }
        });
}

fn geo_chart(ui: &mut Ui, geo: &GeoProjection) {
    let Some((lo, hi)) = geo.yield_range else {
        no_data(ui);
        return;
    };

    // One series per colour band; egui_plot colours whole series.
    let mut bands: Vec<Vec<[f64; 2]>> = vec![Vec::new(); GEO_BANDS];
    for p in &geo.points {
        let band = ((p.scale * GEO_BANDS as f64) as usize).min(GEO_BANDS - 1);
        bands[band].push([p.longitude, p.latitude]);
    }

    Plot::new("geo_yield")
        .height(CHART_HEIGHT * 1.4)
        .data_aspect(1.0)
        .include_x(-180.0)
        .include_x(180.0)
        .include_y(-90.0)
        .include_y(90.0)
        .x_axis_label("longitude")
        .y_axis_label("latitude")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, pts) in bands.into_iter().enumerate() {
                if pts.is_empty() {
                    continue;
                }
                let t = (i as f64 + 0.5) / GEO_BANDS as f64;
                plot_ui.points(Points::new(PlotPoints::from(pts)).color(viridis(t)).radius(3.0));
            }
        });

    color_scale_legend(ui, lo, hi);
}

/// Horizontal Viridis gradient labelled with the yield range.
fn color_scale_legend(ui: &mut Ui, lo: f64, hi: f64) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("{lo:.0}"));
        let (rect, _) = ui.allocate_exact_size(egui::vec2(200.0, 12.0), Sense::hover());
        let steps = 50;
        let step_width = rect.width() / steps as f32;
        for i in 0..steps {
            let x0 = rect.left() + i as f32 * step_width;
            let slice = egui::Rect::from_min_max(
                egui::pos2(x0, rect.top()),
                egui::pos2(x0 + step_width + 0.5, rect.bottom()),
            );
            ui.painter()
                .rect_filled(slice, 0.0, viridis(i as f64 / (steps - 1) as f64));
        }
        ui.label(format!("{hi:.0}  yield_kg_per_hectare"));
    });
}
