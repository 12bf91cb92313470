use std::fs::File;
use std::path::{Path, PathBuf};

use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{Listing, ListingDataset};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Everything that can go wrong while loading a listings file. Any of these
/// is fatal at startup; there is no partial load.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a top-level JSON array of listing records")]
    JsonShape,

    #[error("row {row}: {message}")]
    Row { row: usize, message: String },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a listings dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row naming at least the seven model columns; extra
///             columns are ignored
/// * `.json` – `[{ "name": ..., "neighbourhood_group": ..., ... }, ...]`
pub fn load_file(path: &Path) -> Result<ListingDataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names; each record deserializes
/// straight into a [`Listing`]. Columns beyond the model are ignored, a
/// missing `name` cell becomes `None`.
fn load_csv(path: &Path) -> Result<ListingDataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let mut listings = Vec::new();
    for (row, result) in reader.deserialize::<Listing>().enumerate() {
        let listing = result?;
        validate(row, &listing)?;
        listings.push(listing);
    }

    Ok(ListingDataset::from_listings(listings))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (the default `df.to_json(orient='records')`):
/// a top-level array of objects, one per listing.
fn load_json(path: &Path) -> Result<ListingDataset, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text)?;
    let records = root.as_array().ok_or(LoadError::JsonShape)?;

    let mut listings = Vec::with_capacity(records.len());
    for (row, record) in records.iter().enumerate() {
        let listing: Listing =
            serde_json::from_value(record.clone()).map_err(|e| LoadError::Row {
                row,
                message: e.to_string(),
            })?;
        validate(row, &listing)?;
        listings.push(listing);
    }

    Ok(ListingDataset::from_listings(listings))
}

// ---------------------------------------------------------------------------
// Row validation
// ---------------------------------------------------------------------------

/// Enforce the model invariants the types alone cannot: prices are
/// non-negative finite numbers, coordinates are finite.
fn validate(row: usize, listing: &Listing) -> Result<(), LoadError> {
    if !listing.price.is_finite() || listing.price < 0.0 {
        return Err(LoadError::Row {
            row,
            message: format!("price {} is negative or not a number", listing.price),
        });
    }
    if !listing.latitude.is_finite() || !listing.longitude.is_finite() {
        return Err(LoadError::Row {
            row,
            message: "latitude/longitude is not a number".to_string(),
        });
    }
    Ok(())
}
