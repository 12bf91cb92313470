use std::collections::BTreeSet;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Listing – one row of the dataset
// ---------------------------------------------------------------------------

/// A single short-term rental listing. Rows are immutable once loaded; every
/// downstream view is a list of indices into [`ListingDataset::listings`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Listing {
    /// Listing title. Some source rows leave it blank.
    #[serde(default)]
    pub name: Option<String>,
    pub neighbourhood_group: String,
    pub room_type: String,
    /// Nightly price in dollars. Validated non-negative and finite on load.
    pub price: f64,
    pub number_of_reviews: u32,
    pub latitude: f64,
    pub longitude: f64,
}

impl Listing {
    /// Name as shown and searched; a missing name reads as the empty string.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

// ---------------------------------------------------------------------------
// Facet – a categorical filter dimension
// ---------------------------------------------------------------------------

/// The two categorical columns the user can filter on. Keeping them as an
/// enum lets the side panel render both with one generic widget loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    NeighbourhoodGroup,
    RoomType,
}

impl Facet {
    pub const ALL: [Facet; 2] = [Facet::NeighbourhoodGroup, Facet::RoomType];

    /// Widget header label.
    pub fn label(self) -> &'static str {
        match self {
            Facet::NeighbourhoodGroup => "Neighbourhood Group(s)",
            Facet::RoomType => "Room Type(s)",
        }
    }

    /// The listing's value in this dimension.
    pub fn value_of(self, listing: &Listing) -> &str {
        match self {
            Facet::NeighbourhoodGroup => &listing.neighbourhood_group,
            Facet::RoomType => &listing.room_type,
        }
    }
}

// ---------------------------------------------------------------------------
// ListingDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed facet value lists.
#[derive(Debug, Clone, Default)]
pub struct ListingDataset {
    /// All listings in file order.
    pub listings: Vec<Listing>,
    /// Sorted unique neighbourhood groups.
    pub neighbourhood_groups: Vec<String>,
    /// Sorted unique room types.
    pub room_types: Vec<String>,
}

impl ListingDataset {
    /// Build the facet indices from the loaded rows.
    pub fn from_listings(listings: Vec<Listing>) -> Self {
        let mut groups: BTreeSet<String> = BTreeSet::new();
        let mut rooms: BTreeSet<String> = BTreeSet::new();

        for listing in &listings {
            groups.insert(listing.neighbourhood_group.clone());
            rooms.insert(listing.room_type.clone());
        }

        ListingDataset {
            listings,
            neighbourhood_groups: groups.into_iter().collect(),
            room_types: rooms.into_iter().collect(),
        }
    }

    /// Sorted unique values of a facet.
    pub fn facet_values(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::NeighbourhoodGroup => &self.neighbourhood_groups,
            Facet::RoomType => &self.room_types,
        }
    }

    /// Number of listings.
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}
