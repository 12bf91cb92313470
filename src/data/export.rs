use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::ListingDataset;

// ---------------------------------------------------------------------------
// CSV export of the filtered view
// ---------------------------------------------------------------------------

/// Columns written to the export, in the order the on-screen table shows
/// them.
const EXPORT_HEADERS: [&str; 5] = [
    "name",
    "neighbourhood_group",
    "room_type",
    "price",
    "number_of_reviews",
];

/// Write the filtered view as CSV: header row, then one row per index in
/// view order. Prices render in their shortest decimal form, so
/// whole-dollar values come out as `100`, not `100.0`.
pub fn write_filtered_csv<W: Write>(
    dataset: &ListingDataset,
    indices: &[usize],
    writer: W,
) -> Result<(), csv::Error> {
    let mut w = csv::Writer::from_writer(writer);
    w.write_record(EXPORT_HEADERS)?;

    for &i in indices {
        let l = &dataset.listings[i];
        let price = l.price.to_string();
        let reviews = l.number_of_reviews.to_string();
        w.write_record([
            l.display_name(),
            l.neighbourhood_group.as_str(),
            l.room_type.as_str(),
            price.as_str(),
            reviews.as_str(),
        ])?;
    }

    w.flush()?;
    Ok(())
}

/// Materialise the filtered view at `path`. Used by the download action;
/// failures surface in the status line rather than aborting.
pub fn export_to_path(dataset: &ListingDataset, indices: &[usize], path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating export file {}", path.display()))?;
    write_filtered_csv(dataset, indices, file)
        .with_context(|| format!("writing filtered listings to {}", path.display()))?;
    Ok(())
}
