use std::collections::BTreeMap;

use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Legend, Plot, PlotPoints, Points, Polygon};

use crate::color::{self, MakeColors};
use crate::data::filter::FilteredView;

// ---------------------------------------------------------------------------
// Strip plot – price per mile by model year
// ---------------------------------------------------------------------------

/// Categorical scatter: x = model year (with deterministic jitter),
/// y = price per mile, one point per record.
pub fn strip_plot(ui: &mut Ui, view: &FilteredView) {
    ui.strong("Price per Mile by Model Year");
    if view.is_empty() {
        ui.weak("No records match the current filters.");
        return;
    }

    let points: PlotPoints = view
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| [row.record.model_year as f64 + jitter(i), row.price_per_mile])
        .collect();

    Plot::new("strip_plot")
        .height(260.0)
        .x_axis_label("Model Year")
        .y_axis_label("Price per Mile ($)")
        .x_axis_formatter(|mark, _| {
            // Years are categorical; skip fractional grid marks.
            if mark.value.fract() == 0.0 {
                format!("{:.0}", mark.value)
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(points)
                    .color(Color32::LIGHT_BLUE)
                    .radius(2.5),
            );
        });
}

/// Deterministic per-row horizontal jitter in (-0.175, 0.175), so points of
/// the same year do not stack into a single vertical line.
fn jitter(i: usize) -> f64 {
    let h = (i as u64).wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    ((h >> 11) as f64 / (1u64 << 53) as f64 - 0.5) * 0.35
}

// ---------------------------------------------------------------------------
// Heatmap – mean price by range × year
// ---------------------------------------------------------------------------

struct Pivot {
    /// Distinct model years, ascending (columns).
    years: Vec<i64>,
    /// Distinct electric ranges, ascending (rows).
    ranges: Vec<f64>,
    /// (range index, year index, mean price) for populated cells only.
    cells: Vec<(usize, usize, f64)>,
    min_mean: f64,
    max_mean: f64,
}

fn build_pivot(view: &FilteredView) -> Option<Pivot> {
    if view.is_empty() {
        return None;
    }

    let mut years: Vec<i64> = view.rows.iter().map(|r| r.record.model_year).collect();
    years.sort_unstable();
    years.dedup();

    let mut ranges: Vec<f64> = view.rows.iter().map(|r| r.record.electric_range).collect();
    ranges.sort_by(f64::total_cmp);
    ranges.dedup();

    let mut sums = vec![0.0f64; ranges.len() * years.len()];
    let mut counts = vec![0usize; ranges.len() * years.len()];
    for row in &view.rows {
        let Ok(ri) = ranges.binary_search_by(|v| v.total_cmp(&row.record.electric_range)) else {
            continue;
        };
        let Ok(yi) = years.binary_search(&row.record.model_year) else {
            continue;
        };
        sums[ri * years.len() + yi] += row.record.expected_price;
        counts[ri * years.len() + yi] += 1;
    }

    let mut cells = Vec::new();
    let mut min_mean = f64::INFINITY;
    let mut max_mean = f64::NEG_INFINITY;
    for ri in 0..ranges.len() {
        for yi in 0..years.len() {
            let count = counts[ri * years.len() + yi];
            if count == 0 {
                continue; // empty cell stays blank
            }
            let mean = sums[ri * years.len() + yi] / count as f64;
            min_mean = min_mean.min(mean);
            max_mean = max_mean.max(mean);
            cells.push((ri, yi, mean));
        }
    }

    Some(Pivot {
        years,
        ranges,
        cells,
        min_mean,
        max_mean,
    })
}

/// Pivoted heatmap: rows = distinct electric ranges, columns = distinct
/// model years, cell fill = mean expected price. Cells with no matching
/// records are left blank.
pub fn heatmap(ui: &mut Ui, view: &FilteredView) {
    ui.strong("Price vs Range Heatmap");
    let Some(pivot) = build_pivot(view) else {
        ui.weak("No records match the current filters.");
        return;
    };

    let span = (pivot.max_mean - pivot.min_mean).max(f64::EPSILON);
    let min_mean = pivot.min_mean;

    let years = pivot.years.clone();
    let ranges = pivot.ranges.clone();

    Plot::new("price_range_heatmap")
        .height(300.0)
        .x_axis_label("Model Year")
        .y_axis_label("Electric Range (miles)")
        .show_grid(false)
        .x_axis_formatter(move |mark, _| axis_label(mark.value, years.len(), |i| years[i].to_string()))
        .y_axis_formatter(move |mark, _| {
            axis_label(mark.value, ranges.len(), |i| format!("{:.0}", ranges[i]))
        })
        .label_formatter(|name, _| name.to_string())
        .show(ui, |plot_ui| {
            for &(ri, yi, mean) in &pivot.cells {
                let t = ((mean - min_mean) / span) as f32;
                let color = color::heat_color(t);
                let x = yi as f64;
                let y = ri as f64;
                let corners: PlotPoints =
                    vec![[x, y], [x + 1.0, y], [x + 1.0, y + 1.0], [x, y + 1.0]].into();
                plot_ui.polygon(
                    Polygon::new(corners)
                        .stroke(Stroke::new(1.0, color))
                        .fill_color(color)
                        .name(format!("${mean:.1}k")),
                );
            }
        });
}

/// Map an index-coordinate grid mark back to its category label.
fn axis_label(value: f64, len: usize, label: impl Fn(usize) -> String) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-4 || idx < 0.0 || idx >= len as f64 {
        return String::new();
    }
    label(idx as usize)
}

// ---------------------------------------------------------------------------
// Advanced scatter – price vs range with hover details
// ---------------------------------------------------------------------------

/// Interactive scatter: x = electric range, y = expected price, one series
/// per make, with year/make shown when hovering a point.
pub fn advanced_scatter(ui: &mut Ui, view: &FilteredView, colors: &MakeColors) {
    ui.strong("Price vs Range with Tooltips");
    if view.is_empty() {
        ui.weak("No records match the current filters.");
        return;
    }

    let mut by_make: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for row in &view.rows {
        by_make
            .entry(row.record.make.as_str())
            .or_default()
            .push([row.record.electric_range, row.record.expected_price]);
    }

    // Point metadata for the hover label, matched by coordinates.
    let meta: Vec<(f64, f64, i64, String)> = view
        .rows
        .iter()
        .map(|row| {
            (
                row.record.electric_range,
                row.record.expected_price,
                row.record.model_year,
                row.record.make.clone(),
            )
        })
        .collect();

    Plot::new("advanced_scatter")
        .height(300.0)
        .legend(Legend::default())
        .x_axis_label("Electric Range (miles)")
        .y_axis_label("Expected Price ($1k)")
        .label_formatter(move |name, value| {
            let hit = meta
                .iter()
                .find(|(x, y, _, _)| (x - value.x).abs() < 1e-9 && (y - value.y).abs() < 1e-9);
            match hit {
                Some((x, y, year, make)) => format!("{make} {year}\n{x:.0} mi, ${y:.1}k"),
                None if name.is_empty() => format!("{:.0} mi, ${:.1}k", value.x, value.y),
                None => format!("{name}\n{:.0} mi, ${:.1}k", value.x, value.y),
            }
        })
        .show(ui, |plot_ui| {
            for (make, pts) in by_make {
                plot_ui.points(
                    Points::new(pts)
                        .name(make)
                        .color(colors.color_for(make))
                        .radius(3.0),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::ViewRow;
    use crate::data::model::Record;

    fn view(rows: Vec<(i64, &str, f64, f64)>) -> FilteredView {
        FilteredView {
            rows: rows
                .into_iter()
                .map(|(year, make, range, price)| {
                    let record = Record {
                        model_year: year,
                        make: make.to_string(),
                        electric_range: range,
                        expected_price: price,
                    };
                    let price_per_mile = record.price_per_mile();
                    ViewRow {
                        record,
                        price_per_mile,
                    }
                })
                .collect(),
        }
    }

    #[test]
    fn pivot_means_and_blank_cells() {
        let pivot = build_pivot(&view(vec![
            (2020, "A", 100.0, 40.0),
            (2020, "B", 100.0, 60.0),
            (2021, "A", 200.0, 80.0),
        ]))
        .unwrap();
        assert_eq!(pivot.years, vec![2020, 2021]);
        assert_eq!(pivot.ranges, vec![100.0, 200.0]);
        // (100 mi, 2020) averages to 50; (200 mi, 2021) is 80; other cells blank.
        assert_eq!(pivot.cells, vec![(0, 0, 50.0), (1, 1, 80.0)]);
        assert_eq!(pivot.min_mean, 50.0);
        assert_eq!(pivot.max_mean, 80.0);
    }

    #[test]
    fn pivot_of_empty_view_is_none() {
        assert!(build_pivot(&FilteredView::default()).is_none());
    }

    #[test]
    fn jitter_is_deterministic_and_bounded() {
        for i in 0..100 {
            let j = jitter(i);
            assert_eq!(j, jitter(i));
            assert!(j.abs() <= 0.175);
        }
    }

    #[test]
    fn axis_label_maps_indices_only() {
        let years = [2020i64, 2021];
        let label = |i: usize| years[i].to_string();
        assert_eq!(axis_label(0.0, years.len(), label), "2020");
        assert_eq!(axis_label(1.0, years.len(), label), "2021");
        assert_eq!(axis_label(0.5, years.len(), label), "");
        assert_eq!(axis_label(5.0, years.len(), label), "");
    }
}
