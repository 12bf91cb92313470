use crate::color::ColorMap;
use crate::data::filter::{filtered_indices, FilterCriteria};
use crate::data::model::{Facet, ListingDataset};

// ---------------------------------------------------------------------------
// Chart selection
// ---------------------------------------------------------------------------

/// The four chart views offered by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    RoomCounts,
    PriceVsReviews,
    Map,
    PriceDistribution,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::RoomCounts,
        ChartKind::PriceVsReviews,
        ChartKind::Map,
        ChartKind::PriceDistribution,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::RoomCounts => "Room Type Count",
            ChartKind::PriceVsReviews => "Price vs Reviews",
            ChartKind::Map => "Map of Listings",
            ChartKind::PriceDistribution => "Price Distribution",
        }
    }

    /// One-line reading of the chart, shown as a caption beneath it.
    pub fn insight(self) -> &'static str {
        match self {
            ChartKind::RoomCounts => "Most listings are either private rooms or entire homes.",
            ChartKind::PriceVsReviews => {
                "Listings with a high number of reviews are typically priced below $300."
            }
            ChartKind::Map => {
                "Higher review listings are concentrated in central areas like Manhattan and Brooklyn."
            }
            ChartKind::PriceDistribution => {
                "Most listings fall under $300, with fewer high-end options."
            }
        }
    }
}

/// Upper bound of the map view's minimum-reviews slider.
pub const MAP_REVIEWS_MAX: u32 = 200;
/// Initial minimum-reviews threshold for the map view.
pub const DEFAULT_MAP_MIN_REVIEWS: u32 = 10;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset, fixed for the lifetime of the app.
    pub dataset: ListingDataset,

    /// Search, facet, and price range selections.
    pub criteria: FilterCriteria,

    /// Indices of listings passing the current filters (cached, in dataset
    /// order).
    pub visible_indices: Vec<usize>,

    /// Which chart the viewer shows.
    pub chart: ChartKind,

    /// Minimum review count applied on top of the filtered view, map only.
    pub map_min_reviews: u32,

    /// Whether the summary statistics table is expanded.
    pub show_stats: bool,

    /// Room type → colour, shared by all charts.
    pub colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build the initial state: every facet value selected, default price
    /// range, every chart state at its default.
    pub fn new(dataset: ListingDataset) -> Self {
        let criteria = FilterCriteria::select_all(&dataset);
        let colors = ColorMap::new(&dataset.room_types);
        let mut state = Self {
            dataset,
            criteria,
            visible_indices: Vec::new(),
            chart: ChartKind::default(),
            map_min_reviews: DEFAULT_MAP_MIN_REVIEWS,
            show_stats: false,
            colors,
            status_message: None,
        };
        state.refilter();
        state
    }

    /// Recompute `visible_indices` after a filter change.
    pub fn refilter(&mut self) {
        self.visible_indices = filtered_indices(&self.dataset, &self.criteria);
    }

    /// Toggle a single facet value in or out of the selection.
    pub fn toggle_facet_value(&mut self, facet: Facet, value: &str) {
        let selected = self.criteria.facet_selection_mut(facet);
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        self.refilter();
    }

    /// Select every value of a facet.
    pub fn select_all(&mut self, facet: Facet) {
        *self.criteria.facet_selection_mut(facet) = self
            .dataset
            .facet_values(facet)
            .iter()
            .cloned()
            .collect();
        self.refilter();
    }

    /// Deselect every value of a facet.
    pub fn select_none(&mut self, facet: Facet) {
        self.criteria.facet_selection_mut(facet).clear();
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Listing;

    fn listing(group: &str, room: &str, price: f64, reviews: u32) -> Listing {
        Listing {
            name: Some(format!("{group} {room}")),
            neighbourhood_group: group.to_string(),
            room_type: room.to_string(),
            price,
            number_of_reviews: reviews,
            latitude: 40.7,
            longitude: -74.0,
        }
    }

    fn sample_state() -> AppState {
        AppState::new(ListingDataset::from_listings(vec![
            listing("Manhattan", "Private room", 100.0, 12),
            listing("Brooklyn", "Entire home/apt", 200.0, 3),
            listing("Queens", "Private room", 300.0, 40),
        ]))
    }

    /// A fresh state shows every listing and starts on the room type chart
    /// with the default map threshold.
    #[test]
    fn initial_state_shows_everything() {
        let state = sample_state();
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
        assert_eq!(state.chart, ChartKind::RoomCounts);
        assert_eq!(state.map_min_reviews, DEFAULT_MAP_MIN_REVIEWS);
        assert!(!state.show_stats);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn toggling_a_room_type_off_hides_its_listings() {
        let mut state = sample_state();
        state.toggle_facet_value(Facet::RoomType, "Private room");
        assert_eq!(state.visible_indices, vec![1]);

        // Toggling it back restores the full view.
        state.toggle_facet_value(Facet::RoomType, "Private room");
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
    }

    #[test]
    fn select_none_then_all_round_trips() {
        let mut state = sample_state();
        state.select_none(Facet::NeighbourhoodGroup);
        assert!(state.visible_indices.is_empty());

        state.select_all(Facet::NeighbourhoodGroup);
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
    }

    /// The map threshold only belongs to the map view, but its value
    /// survives switching charts.
    #[test]
    fn map_threshold_persists_across_chart_switches() {
        let mut state = sample_state();
        state.chart = ChartKind::Map;
        state.map_min_reviews = 42;

        state.chart = ChartKind::RoomCounts;
        assert_eq!(state.chart, ChartKind::RoomCounts);

        state.chart = ChartKind::Map;
        assert_eq!(state.map_min_reviews, 42);

        // Switching charts never touches the filtered view.
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
    }

    #[test]
    fn search_term_refilters_the_view() {
        let mut state = sample_state();
        state.criteria.search_term = "brooklyn".to_string();
        state.refilter();
        assert_eq!(state.visible_indices, vec![1]);
    }
}
