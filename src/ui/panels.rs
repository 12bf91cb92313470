use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::export;
use crate::data::filter::{PRICE_MAX, PRICE_MIN};
use crate::data::model::{Facet, Listing, ListingDataset};
use crate::data::summary::{self, format_count, ColumnStats};
use crate::state::{AppState, ChartKind};
use crate::ui::charts;

const TABLE_ROW_HEIGHT: f32 = 18.0;

/// Label on the toggle for the describe-style statistics table.
const STATS_CHECKBOX_LABEL: &str = "Show Descriptive Statistics";

/// A listings-table column: header text plus the cell text for one row.
type ListingColumn = (&'static str, fn(&Listing) -> String);

static LISTING_COLUMNS: [ListingColumn; 5] = [
    ("Name", |l| l.display_name().to_string()),
    ("Neighbourhood Group", |l| l.neighbourhood_group.clone()),
    ("Room Type", |l| l.room_type.clone()),
    ("Price ($)", |l| l.price.to_string()),
    ("Reviews", |l| l.number_of_reviews.to_string()),
];

/// Columns of the most-expensive table, which leaves the review count out.
fn top_listing_columns() -> &'static [ListingColumn] {
    &LISTING_COLUMNS[..4]
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top toolbar: app title, view count, status message.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.label(RichText::new("Listing Lens").strong());
        ui.separator();

        ui.label(format!(
            "{} of {} listings shown",
            format_count(state.visible_indices.len()),
            format_count(state.dataset.len())
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                ui.visuals().weak_text_color()
            };
            ui.colored_label(color, msg.as_str());
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – search and filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.add_space(4.0);
    ui.heading("Explore Listings");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Free-text search ----
            ui.strong("Search");
            ui.add(
                egui::TextEdit::singleline(&mut state.criteria.search_term)
                    .hint_text("Name, neighbourhood group, or room type"),
            );
            ui.add_space(6.0);

            // ---- Facet checkboxes (collapsible) ----
            for facet in Facet::ALL {
                // Clone the values so we can mutate state inside the loop.
                let all_values = state.dataset.facet_values(facet).to_vec();
                let n_selected = state.criteria.facet_selection(facet).len();
                let header_text =
                    format!("{}  ({n_selected}/{})", facet.label(), all_values.len());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(facet.label())
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        // Select all / none buttons
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(facet);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(facet);
                            }
                        });

                        for value in &all_values {
                            let mut checked = state
                                .criteria
                                .facet_selection(facet)
                                .contains(value.as_str());

                            // Room types carry their chart colour.
                            let mut text = RichText::new(value.as_str());
                            if facet == Facet::RoomType {
                                text = text.color(state.colors.color_for(value));
                            }

                            if ui.checkbox(&mut checked, text).changed() {
                                state.toggle_facet_value(facet, value);
                            }
                        }
                    });
            }

            ui.add_space(6.0);

            // ---- Price range ----
            ui.strong("Price Range ($)");
            let mut min_price = state.criteria.min_price;
            let mut max_price = state.criteria.max_price;
            let min_changed = ui
                .add(egui::Slider::new(&mut min_price, PRICE_MIN..=PRICE_MAX).text("min"))
                .changed();
            let max_changed = ui
                .add(egui::Slider::new(&mut max_price, PRICE_MIN..=PRICE_MAX).text("max"))
                .changed();

            // Dragging one handle past the other pushes the other along.
            if min_changed && min_price > max_price {
                max_price = min_price;
            }
            if max_changed && max_price < min_price {
                min_price = max_price;
            }
            state.criteria.min_price = min_price;
            state.criteria.max_price = max_price;
        });

    // Recompute visible indices after any widget changes.
    state.refilter();
}

// ---------------------------------------------------------------------------
// Central panel – metrics, chart viewer, tables
// ---------------------------------------------------------------------------

/// Render the main dashboard column.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            summary_tiles(ui, state);
            ui.separator();

            chart_viewer(ui, state);
            ui.separator();

            top_listings(ui, state);
            ui.separator();

            filtered_table(ui, state);
            ui.separator();

            stats_table(ui, state);
            ui.add_space(8.0);
        });
}

/// Three metric tiles over the filtered view.
fn summary_tiles(ui: &mut Ui, state: &AppState) {
    ui.heading("Summary Overview");
    ui.add_space(4.0);

    let summary = summary::summarize(&state.dataset, &state.visible_indices);
    ui.columns(3, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Total Listings", &format_count(summary.count));

        let avg = summary
            .avg_price
            .map_or_else(|| "N/A".to_string(), |p| format!("${p:.2}"));
        metric(&mut cols[1], "Average Price", &avg);

        let top = summary.top_room_type.unwrap_or_else(|| "N/A".to_string());
        metric(&mut cols[2], "Top Room Type", &top);
    });
}

fn metric(ui: &mut Ui, label: &str, value: &str) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).small().weak());
        ui.label(RichText::new(value).heading());
    });
}

/// Chart selector row plus the selected chart.
fn chart_viewer(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Interactive Chart Viewer");
    ui.add_space(4.0);

    ui.horizontal(|ui: &mut Ui| {
        for kind in ChartKind::ALL {
            if ui
                .selectable_label(state.chart == kind, kind.label())
                .clicked()
            {
                state.chart = kind;
            }
        }
    });
    ui.add_space(4.0);

    charts::show_chart(ui, state);
}

/// The five most expensive listings in the current view.
fn top_listings(ui: &mut Ui, state: &AppState) {
    ui.heading("Top 5 Most Expensive Listings");
    ui.add_space(4.0);

    if state.visible_indices.is_empty() {
        ui.label("No listings available to display.");
        return;
    }

    let top = summary::top_expensive(&state.dataset, &state.visible_indices, 5);
    listing_table(
        ui,
        &state.dataset,
        &top,
        "top_listings_table",
        false,
        top_listing_columns(),
    );
}

/// Full filtered view as a virtualised table, with CSV download.
fn filtered_table(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filtered Listings Table");
    ui.add_space(4.0);

    if state.visible_indices.is_empty() {
        ui.label("No listings match the selected filters or search.");
        return;
    }

    listing_table(
        ui,
        &state.dataset,
        &state.visible_indices,
        "filtered_listings_table",
        true,
        &LISTING_COLUMNS,
    );

    ui.add_space(4.0);
    if ui.button("Download filtered data as CSV…").clicked() {
        save_filtered_dialog(state);
    }
}

/// Listings table over the given columns, rows virtualised. The name column
/// takes the remaining width; the rest size to their content.
fn listing_table(
    ui: &mut Ui,
    dataset: &ListingDataset,
    indices: &[usize],
    id: &str,
    scroll: bool,
    columns: &[ListingColumn],
) {
    ui.push_id(id, |ui: &mut Ui| {
        let builder = TableBuilder::new(ui)
            .striped(true)
            .column(Column::remainder().clip(true))
            .columns(Column::auto(), columns.len() - 1);
        let builder = if scroll {
            builder.max_scroll_height(360.0)
        } else {
            builder.vscroll(false)
        };

        builder
            .header(20.0, |mut header| {
                for (title, _) in columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(*title);
                    });
                }
            })
            .body(|body| {
                body.rows(TABLE_ROW_HEIGHT, indices.len(), |mut row| {
                    let listing = &dataset.listings[indices[row.index()]];
                    for (_, cell) in columns {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell(listing));
                        });
                    }
                });
            });
    });
}

/// Optional describe-style statistics table.
fn stats_table(ui: &mut Ui, state: &mut AppState) {
    ui.checkbox(&mut state.show_stats, STATS_CHECKBOX_LABEL);
    if !state.show_stats {
        return;
    }

    if state.visible_indices.is_empty() {
        ui.label("No listings match the selected filters or search.");
        return;
    }

    let stats = summary::describe(&state.dataset, &state.visible_indices);
    let rows: [(&str, fn(&ColumnStats) -> f64); 7] = [
        ("mean", |s| s.mean),
        ("std", |s| s.std),
        ("min", |s| s.min),
        ("25%", |s| s.q1),
        ("50%", |s| s.median),
        ("75%", |s| s.q3),
        ("max", |s| s.max),
    ];

    egui::Grid::new("summary_stats_grid")
        .striped(true)
        .min_col_width(80.0)
        .show(ui, |ui: &mut Ui| {
            ui.label("");
            for s in &stats {
                ui.strong(s.column);
            }
            ui.end_row();

            ui.label("count");
            for s in &stats {
                ui.label(format_count(s.count));
            }
            ui.end_row();

            for (name, field) in rows {
                ui.label(name);
                for s in &stats {
                    ui.label(format!("{:.2}", field(s)));
                }
                ui.end_row();
            }
        });
}

// ---------------------------------------------------------------------------
// CSV export dialog
// ---------------------------------------------------------------------------

fn save_filtered_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Save filtered listings")
        .add_filter("CSV", &["csv"])
        .set_file_name("filtered_listings.csv")
        .save_file();

    if let Some(path) = file {
        match export::export_to_path(&state.dataset, &state.visible_indices, &path) {
            Ok(()) => {
                log::info!(
                    "Exported {} listings to {}",
                    state.visible_indices.len(),
                    path.display()
                );
                state.status_message = Some(format!(
                    "Saved {} listings to {}",
                    format_count(state.visible_indices.len()),
                    path.display()
                ));
            }
            Err(e) => {
                log::error!("Failed to export CSV: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
