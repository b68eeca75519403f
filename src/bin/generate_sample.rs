//! Writes a deterministic sample EV dataset to `assets/ev_sample.csv`.
//!
//! The output carries the four columns the dashboard requires plus a
//! `County` column it ignores, a handful of rows with missing values that
//! the loader drops, and a few deliberate price outliers for exercising the
//! IQR trim.

use anyhow::{Context, Result};

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

/// Per-make baseline: (typical range in miles, typical price in $1k).
const MAKES: &[(&str, f64, f64)] = &[
    ("Tesla", 320.0, 85.0),
    ("Nissan", 180.0, 33.0),
    ("Chevrolet", 250.0, 40.0),
    ("Ford", 260.0, 48.0),
    ("BMW", 140.0, 52.0),
    ("Kia", 200.0, 38.0),
    ("Hyundai", 210.0, 40.0),
    ("Audi", 215.0, 70.0),
];

const COUNTIES: &[&str] = &["King", "Kitsap", "Thurston", "Snohomish", "Pierce"];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let output_path = "assets/ev_sample.csv";
    let mut wtr = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    wtr.write_record([
        "Model Year",
        "Make",
        "Electric Range",
        "Expected Price ($1k)",
        "County",
    ])?;

    let mut rows = 0usize;
    for &(make, base_range, base_price) in MAKES {
        for year in 2016..=2023 {
            // Ranges and prices drift upward with newer model years.
            let year_gain = (year - 2016) as f64;
            let range = (rng.gauss(base_range + 8.0 * year_gain, 20.0)).max(40.0);
            let price = (rng.gauss(base_price + 1.5 * year_gain, 5.0)).max(18.0);
            let county = COUNTIES[(rng.next_u64() % COUNTIES.len() as u64) as usize];

            // Sprinkle in missing cells so the loader has rows to drop.
            if rng.next_f64() < 0.04 {
                wtr.write_record([year.to_string(), make.to_string(), String::new(), format!("{price:.1}"), county.to_string()])?;
            } else {
                wtr.write_record([
                    year.to_string(),
                    make.to_string(),
                    format!("{range:.0}"),
                    format!("{price:.1}"),
                    county.to_string(),
                ])?;
            }
            rows += 1;
        }
    }

    // A few deliberate price outliers (high-price, low-range).
    for &(year, make, range, price) in &[
        (2022, "Tesla", 90.0, 185.0),
        (2021, "Audi", 75.0, 160.0),
        (2019, "BMW", 60.0, 9.5),
    ] {
        wtr.write_record([
            year.to_string(),
            make.to_string(),
            format!("{range:.0}"),
            format!("{price:.1}"),
            COUNTIES[0].to_string(),
        ])?;
        rows += 1;
    }

    wtr.flush()?;
    println!("Wrote {rows} vehicles to {output_path}");
    Ok(())
}
