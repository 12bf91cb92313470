/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

struct Borough {
    name: &'static str,
    lat: f64,
    lon: f64,
    spread: f64,
    price_factor: f64,
    weight: f64,
}

static BOROUGHS: [Borough; 5] = [
    Borough { name: "Manhattan", lat: 40.7831, lon: -73.9712, spread: 0.045, price_factor: 1.5, weight: 0.44 },
    Borough { name: "Brooklyn", lat: 40.6782, lon: -73.9442, spread: 0.055, price_factor: 1.0, weight: 0.41 },
    Borough { name: "Queens", lat: 40.7282, lon: -73.7949, spread: 0.065, price_factor: 0.8, weight: 0.11 },
    Borough { name: "Bronx", lat: 40.8448, lon: -73.8648, spread: 0.045, price_factor: 0.7, weight: 0.03 },
    Borough { name: "Staten Island", lat: 40.5795, lon: -74.1502, spread: 0.06, price_factor: 0.75, weight: 0.01 },
];

/// (label, weight, median nightly price)
const ROOM_TYPES: [(&str, f64, f64); 3] = [
    ("Entire home/apt", 0.52, 180.0),
    ("Private room", 0.45, 80.0),
    ("Shared room", 0.03, 55.0),
];

const ADJECTIVES: [&str; 10] = [
    "Cozy", "Sunny", "Modern", "Charming", "Spacious", "Quiet", "Bright", "Stylish", "Comfy",
    "Lovely",
];

const SPACES: [&str; 8] = [
    "Studio",
    "Loft",
    "1BR Apartment",
    "2BR Apartment",
    "Room",
    "Brownstone",
    "Duplex",
    "Penthouse",
];

const HOOKS: [&str; 8] = [
    "near the subway",
    "with skyline views",
    "steps from the park",
    "in the heart of the city",
    "close to cafes",
    "with a private balcony",
    "on a tree-lined street",
    "perfect for couples",
];

fn pick<'a>(rng: &mut SimpleRng, items: &'a [&'a str]) -> &'a str {
    items[(rng.next_u64() as usize) % items.len()]
}

fn pick_borough(rng: &mut SimpleRng) -> &'static Borough {
    let mut roll = rng.next_f64();
    for b in &BOROUGHS {
        if roll < b.weight {
            return b;
        }
        roll -= b.weight;
    }
    &BOROUGHS[0]
}

fn pick_room(rng: &mut SimpleRng) -> (&'static str, f64) {
    let mut roll = rng.next_f64();
    for &(name, weight, median) in &ROOM_TYPES {
        if roll < weight {
            return (name, median);
        }
        roll -= weight;
    }
    (ROOM_TYPES[0].0, ROOM_TYPES[0].2)
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let n_listings = 5000;
    let output_path = "cleaned_listings.csv";

    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record([
            "name",
            "neighbourhood_group",
            "room_type",
            "price",
            "number_of_reviews",
            "latitude",
            "longitude",
        ])
        .expect("Failed to write header");

    for _ in 0..n_listings {
        let borough = pick_borough(&mut rng);
        let (room_type, median_price) = pick_room(&mut rng);

        // Log-normal nightly price around the room type median, scaled by
        // borough. A handful of luxury outliers land above the UI's slider
        // ceiling.
        let price = (median_price * borough.price_factor * rng.gauss(0.0, 0.5).exp())
            .clamp(10.0, 2000.0)
            .round();

        // Review counts are heavily skewed toward zero.
        let reviews = (-rng.next_f64().max(1e-12).ln() * 32.0).min(450.0) as u32;

        let lat = rng.gauss(borough.lat, borough.spread);
        let lon = rng.gauss(borough.lon, borough.spread * 1.2);

        // A small share of rows has no name, like scraped data does.
        let name = if rng.next_f64() < 0.02 {
            String::new()
        } else if rng.next_f64() < 0.3 {
            format!(
                "{} {} in {}",
                pick(&mut rng, &ADJECTIVES),
                pick(&mut rng, &SPACES),
                borough.name
            )
        } else {
            format!(
                "{} {} {}",
                pick(&mut rng, &ADJECTIVES),
                pick(&mut rng, &SPACES),
                pick(&mut rng, &HOOKS)
            )
        };

        let price_s = price.to_string();
        let reviews_s = reviews.to_string();
        let lat_s = format!("{lat:.5}");
        let lon_s = format!("{lon:.5}");
        writer
            .write_record([
                name.as_str(),
                borough.name,
                room_type,
                price_s.as_str(),
                reviews_s.as_str(),
                lat_s.as_str(),
                lon_s.as_str(),
            ])
            .expect("Failed to write row");
    }

    writer.flush().expect("Failed to flush output");

    println!("Wrote {n_listings} listings to {output_path}");
}
