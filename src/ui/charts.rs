use std::collections::BTreeMap;

use eframe::egui::{self, Align2, Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint, PlotUi, Points, Text};

use crate::data::filter::with_min_reviews;
use crate::data::model::ListingDataset;
use crate::data::summary::{self, format_count};
use crate::state::{AppState, ChartKind, MAP_REVIEWS_MAX};

/// Plot height shared by all four charts.
const CHART_HEIGHT: f32 = 380.0;

/// Fill colour for the price histogram.
const HISTOGRAM_FILL: Color32 = Color32::from_rgb(99, 110, 250);

/// Marker sizes on the map are bucketed into this many tiers, because one
/// point series carries a single radius.
const MAP_RADIUS_TIERS: usize = 7;

// ---------------------------------------------------------------------------
// Chart dispatch
// ---------------------------------------------------------------------------

/// Render the selected chart plus its one-line insight caption.
pub fn show_chart(ui: &mut Ui, state: &mut AppState) {
    if state.visible_indices.is_empty() {
        ui.label("No listings available to display.");
        return;
    }

    match state.chart {
        ChartKind::RoomCounts => room_counts(ui, state),
        ChartKind::PriceVsReviews => price_vs_reviews(ui, state),
        ChartKind::Map => listings_map(ui, state),
        ChartKind::PriceDistribution => price_distribution(ui, state),
    }

    ui.add_space(2.0);
    ui.label(
        RichText::new(format!("Insight: {}", state.chart.insight()))
            .weak()
            .italics(),
    );
}

// ---------------------------------------------------------------------------
// Room type counts (bar chart)
// ---------------------------------------------------------------------------

/// One bar per room type in the view, most frequent first.
fn room_counts(ui: &mut Ui, state: &AppState) {
    let counts = summary::room_type_counts(&state.dataset, &state.visible_indices);
    let max_count = counts.iter().map(|&(_, n)| n).max().unwrap_or(1).max(1) as f64;

    // Bars are labelled directly, so the bar chart skips the legend.
    Plot::new("room_counts_chart")
        .height(CHART_HEIGHT)
        .y_axis_label("Count")
        .show_axes([false, true])
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .include_x(-0.5)
        .include_x(counts.len() as f64 - 0.5)
        .include_y(-max_count * 0.08)
        .include_y(max_count * 1.12)
        .show(ui, |plot_ui| {
            let bars: Vec<Bar> = counts
                .iter()
                .enumerate()
                .map(|(x, &(room, count))| {
                    Bar::new(x as f64, count as f64)
                        .width(0.6)
                        .name(room)
                        .fill(state.colors.color_for(room))
                })
                .collect();
            plot_ui.bar_chart(BarChart::new(bars));

            // Category label under each bar, count above it.
            for (x, &(room, count)) in counts.iter().enumerate() {
                plot_ui.text(Text::new(
                    PlotPoint::new(x as f64, -max_count * 0.04),
                    RichText::new(room),
                ));
                plot_ui.text(Text::new(
                    PlotPoint::new(x as f64, count as f64 + max_count * 0.04),
                    RichText::new(format_count(count)),
                ));
            }
        });
}

// ---------------------------------------------------------------------------
// Price vs reviews (scatter)
// ---------------------------------------------------------------------------

fn price_vs_reviews(ui: &mut Ui, state: &AppState) {
    let series = scatter_series(&state.dataset, &state.visible_indices);

    Plot::new("price_vs_reviews_chart")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Price ($)")
        .y_axis_label("Number of Reviews")
        .show(ui, |plot_ui| {
            for (room, pts) in &series {
                plot_ui.points(
                    Points::new(pts.clone())
                        .name(*room)
                        .color(state.colors.color_for(room))
                        .radius(2.0),
                );
            }
            hover_listing(plot_ui, state);
        });
}

/// Scatter points per room type, price on x and review count on y. One
/// series per room type keeps the legend to one entry per category.
fn scatter_series<'a>(
    dataset: &'a ListingDataset,
    indices: &[usize],
) -> BTreeMap<&'a str, Vec<[f64; 2]>> {
    let mut series: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for &i in indices {
        let l = &dataset.listings[i];
        series
            .entry(l.room_type.as_str())
            .or_default()
            .push([l.price, l.number_of_reviews as f64]);
    }
    series
}

/// Floating label for the listing nearest the pointer. Distances are
/// normalised by the current plot bounds so the pick tracks what the eye
/// sees at any zoom level.
fn hover_listing(plot_ui: &mut PlotUi, state: &AppState) {
    let Some(pointer) = plot_ui.pointer_coordinate() else {
        return;
    };
    let bounds = plot_ui.plot_bounds();
    let w = bounds.width().max(f64::EPSILON);
    let h = bounds.height().max(f64::EPSILON);

    let mut nearest: Option<(f64, usize)> = None;
    for &i in &state.visible_indices {
        let l = &state.dataset.listings[i];
        let dx = (l.price - pointer.x) / w;
        let dy = (l.number_of_reviews as f64 - pointer.y) / h;
        let d2 = dx * dx + dy * dy;
        if nearest.map_or(true, |(best, _)| d2 < best) {
            nearest = Some((d2, i));
        }
    }

    if let Some((d2, i)) = nearest {
        if d2.sqrt() < 0.03 {
            let l = &state.dataset.listings[i];
            let name = l.display_name();
            let label = if name.is_empty() {
                format!("${}, {} reviews", l.price, l.number_of_reviews)
            } else {
                format!("{}\n${}, {} reviews", name, l.price, l.number_of_reviews)
            };
            plot_ui.text(
                Text::new(
                    PlotPoint::new(l.price, l.number_of_reviews as f64),
                    RichText::new(label).strong(),
                )
                .anchor(Align2::LEFT_BOTTOM),
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Map of listings (geographic scatter)
// ---------------------------------------------------------------------------

fn listings_map(ui: &mut Ui, state: &mut AppState) {
    // Threshold slider lives with the map; it touches no other view.
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Minimum number of reviews");
        ui.add(egui::Slider::new(&mut state.map_min_reviews, 0..=MAP_REVIEWS_MAX));
    });
    ui.add_space(4.0);

    let indices = with_min_reviews(&state.dataset, &state.visible_indices, state.map_min_reviews);

    let max_reviews = indices
        .iter()
        .map(|&i| state.dataset.listings[i].number_of_reviews)
        .max()
        .unwrap_or(0)
        .max(1) as f64;

    // Bucket (room type, size tier) so marker area tracks review count.
    let mut buckets: BTreeMap<(&str, usize), Vec<[f64; 2]>> = BTreeMap::new();
    for &i in &indices {
        let l = &state.dataset.listings[i];
        let scaled = (l.number_of_reviews as f64 / max_reviews).sqrt();
        let tier = (scaled * (MAP_RADIUS_TIERS - 1) as f64).round() as usize;
        buckets
            .entry((l.room_type.as_str(), tier))
            .or_default()
            .push([l.longitude, l.latitude]);
    }

    Plot::new("listings_map_chart")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .data_aspect(1.0)
        .show(ui, |plot_ui| {
            for (&(room, tier), pts) in &buckets {
                // Equal names collapse to a single legend entry.
                plot_ui.points(
                    Points::new(pts.clone())
                        .name(room)
                        .color(state.colors.color_for(room))
                        .radius(1.5 + tier as f32 * 0.7),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Price distribution (histogram)
// ---------------------------------------------------------------------------

fn price_distribution(ui: &mut Ui, state: &AppState) {
    let bins = summary::price_histogram(&state.dataset, &state.visible_indices, 50);

    let bars: Vec<Bar> = bins
        .iter()
        .map(|b| {
            let width = b.end - b.start;
            Bar::new((b.start + b.end) * 0.5, b.count as f64)
                .width(if width > 0.0 { width } else { 1.0 })
                .fill(HISTOGRAM_FILL)
        })
        .collect();

    Plot::new("price_distribution_chart")
        .height(CHART_HEIGHT)
        .x_axis_label("Price ($)")
        .y_axis_label("Count")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Listing;

    fn listing(room: &str, price: f64, reviews: u32) -> Listing {
        Listing {
            name: Some(format!("{room} at {price}")),
            neighbourhood_group: "Manhattan".to_string(),
            room_type: room.to_string(),
            price,
            number_of_reviews: reviews,
            latitude: 40.7,
            longitude: -74.0,
        }
    }

    /// The scatter puts price on the x axis and review count on the y axis,
    /// matching its axis labels.
    #[test]
    fn scatter_points_are_price_by_reviews() {
        let ds = ListingDataset::from_listings(vec![
            listing("Private room", 120.0, 35),
            listing("Entire home/apt", 400.0, 2),
        ]);

        let series = scatter_series(&ds, &[0, 1]);
        assert_eq!(series["Private room"], vec![[120.0, 35.0]]);
        assert_eq!(series["Entire home/apt"], vec![[400.0, 2.0]]);
    }

    /// Listings sharing a room type land in one series, in view order.
    #[test]
    fn scatter_groups_points_by_room_type() {
        let ds = ListingDataset::from_listings(vec![
            listing("Private room", 100.0, 1),
            listing("Entire home/apt", 250.0, 8),
            listing("Private room", 150.0, 2),
        ]);

        let series = scatter_series(&ds, &[0, 1, 2]);
        assert_eq!(series.len(), 2);
        assert_eq!(series["Private room"], vec![[100.0, 1.0], [150.0, 2.0]]);
    }
}
