use super::model::ListingDataset;

// ---------------------------------------------------------------------------
// Headline metrics
// ---------------------------------------------------------------------------

/// Count, mean price and most frequent room type over a filtered view.
/// `None` fields mean the view was empty and render as "N/A"; a NaN never
/// leaves this module.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSummary {
    pub count: usize,
    pub avg_price: Option<f64>,
    pub top_room_type: Option<String>,
}

/// Compute the three headline metrics for the given view.
pub fn summarize(dataset: &ListingDataset, indices: &[usize]) -> ViewSummary {
    if indices.is_empty() {
        return ViewSummary {
            count: 0,
            avg_price: None,
            top_room_type: None,
        };
    }

    let total: f64 = indices.iter().map(|&i| dataset.listings[i].price).sum();
    let avg_price = Some(total / indices.len() as f64);

    ViewSummary {
        count: indices.len(),
        avg_price,
        top_room_type: most_frequent_room_type(dataset, indices),
    }
}

/// Mode of `room_type` over the view. Ties resolve to whichever tied value
/// appears first in dataset order.
fn most_frequent_room_type(dataset: &ListingDataset, indices: &[usize]) -> Option<String> {
    room_type_counts(dataset, indices)
        .first()
        .map(|&(room, _)| room.to_string())
}

/// Room types present in the view with their row counts, most frequent
/// first. The sort is stable, so tied room types keep the order they first
/// appear in.
pub fn room_type_counts<'a>(
    dataset: &'a ListingDataset,
    indices: &[usize],
) -> Vec<(&'a str, usize)> {
    let mut counts: Vec<(&'a str, usize)> = Vec::new();
    for &i in indices {
        let room = dataset.listings[i].room_type.as_str();
        match counts.iter().position(|&(r, _)| r == room) {
            Some(pos) => counts[pos].1 += 1,
            None => counts.push((room, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

// ---------------------------------------------------------------------------
// Top-N most expensive
// ---------------------------------------------------------------------------

/// Indices of the `n` most expensive listings in the view, price descending.
/// The sort is stable, so equal prices keep their dataset order.
pub fn top_expensive(dataset: &ListingDataset, indices: &[usize], n: usize) -> Vec<usize> {
    let mut sorted: Vec<usize> = indices.to_vec();
    sorted.sort_by(|&a, &b| {
        dataset.listings[b]
            .price
            .total_cmp(&dataset.listings[a].price)
    });
    sorted.truncate(n);
    sorted
}

// ---------------------------------------------------------------------------
// Price histogram
// ---------------------------------------------------------------------------

/// One fixed-width histogram bin, `start..end` with the final bin closed.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Histogram of price over the view with `bin_count` equal-width bins
/// spanning the view's own price range. All prices equal collapses to a
/// single bin; the maximum price always lands in the last bin.
pub fn price_histogram(
    dataset: &ListingDataset,
    indices: &[usize],
    bin_count: usize,
) -> Vec<HistogramBin> {
    if indices.is_empty() || bin_count == 0 {
        return Vec::new();
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &i in indices {
        let p = dataset.listings[i].price;
        min = min.min(p);
        max = max.max(p);
    }

    if max <= min {
        return vec![HistogramBin {
            start: min,
            end: max,
            count: indices.len(),
        }];
    }

    let width = (max - min) / bin_count as f64;
    let mut counts = vec![0usize; bin_count];
    for &i in indices {
        let p = dataset.listings[i].price;
        let bin = (((p - min) / width) as usize).min(bin_count - 1);
        counts[bin] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: min + i as f64 * width,
            end: min + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Descriptive statistics
// ---------------------------------------------------------------------------

/// Per-column summary in the pandas `describe()` convention: sample std
/// (n - 1 denominator) and linearly interpolated quartiles.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    pub column: &'static str,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Descriptive statistics for each numeric column over the view. An empty
/// view yields an empty vector; the caller shows a message instead.
pub fn describe(dataset: &ListingDataset, indices: &[usize]) -> Vec<ColumnStats> {
    if indices.is_empty() {
        return Vec::new();
    }

    let columns: [(&'static str, fn(&super::model::Listing) -> f64); 4] = [
        ("price", |l| l.price),
        ("number_of_reviews", |l| l.number_of_reviews as f64),
        ("latitude", |l| l.latitude),
        ("longitude", |l| l.longitude),
    ];

    columns
        .iter()
        .map(|&(name, extract)| {
            let values: Vec<f64> = indices.iter().map(|&i| extract(&dataset.listings[i])).collect();
            column_stats(name, values)
        })
        .collect()
}

fn column_stats(column: &'static str, mut values: Vec<f64>) -> ColumnStats {
    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;

    // Sample standard deviation; a single value has no spread.
    let std = if n < 2 {
        0.0
    } else {
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        var.sqrt()
    };

    values.sort_by(f64::total_cmp);

    ColumnStats {
        column,
        count: n,
        mean,
        std,
        min: values[0],
        q1: quantile(&values, 0.25),
        median: quantile(&values, 0.5),
        q3: quantile(&values, 0.75),
        max: values[n - 1],
    }
}

/// Linear-interpolation quantile over sorted values (the pandas default).
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * q;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Render a count with thousands separators: 1234567 → "1,234,567".
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
