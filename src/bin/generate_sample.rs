use anyhow::{Context, Result};
use serde::Serialize;

/// One district-level indicator record, in the column layout the district
/// lookup expects.
#[derive(Debug, Serialize)]
struct Record<'a> {
    #[serde(rename = "State")]
    state: &'a str,
    #[serde(rename = "District Name")]
    district: &'a str,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Indicator")]
    indicator: &'a str,
    #[serde(rename = "NFHS 4")]
    nfhs4: f64,
    #[serde(rename = "NFHS 5")]
    nfhs5: f64,
    #[serde(rename = "Change")]
    change: f64,
}

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

/// Survey percentages are reported to one decimal and stay within 0–100.
fn percent(v: f64) -> f64 {
    (v.clamp(0.0, 100.0) * 10.0).round() / 10.0
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "India_Change.csv".to_string());
    let mut rng = SimpleRng::new(42);

    let districts: &[(&str, &[&str])] = &[
        ("Goa", &["North Goa", "South Goa"]),
        ("Kerala", &["Kollam", "Thrissur", "Wayanad"]),
        ("Bihar", &["Patna", "Gaya", "Purnia"]),
        ("Rajasthan", &["Jaipur", "Barmer"]),
        ("Assam", &["Kamrup", "Dhubri"]),
    ];

    // (category, indicator, NFHS 4 baseline %, expected change in points)
    let indicators: &[(&str, &str, f64, f64)] = &[
        ("Population and Household Profile", "Households with electricity (%)", 88.0, 6.0),
        ("Population and Household Profile", "Households using improved sanitation (%)", 52.0, 14.0),
        ("Maternal and Child Health", "Institutional births (%)", 79.0, 9.0),
        ("Maternal and Child Health", "Mothers with 4+ antenatal visits (%)", 51.0, 7.0),
        ("Nutrition", "Children under 5 years who are stunted (%)", 38.0, -2.5),
        ("Nutrition", "Children under 5 years who are wasted (%)", 21.0, -1.5),
        ("Anaemia", "All women age 15-49 years who are anaemic (%)", 53.0, 4.0),
        ("Anaemia", "Children age 6-59 months who are anaemic (%)", 58.0, 8.5),
    ];

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    let mut rows = 0usize;

    for &(state, names) in districts {
        // Shared state-level offset so districts of one state look alike.
        let state_offset = rng.gauss(0.0, 6.0);
        for &district in names {
            for &(category, indicator, baseline, trend) in indicators {
                let nfhs4 = percent(baseline + state_offset + rng.gauss(0.0, 5.0));
                let nfhs5 = percent(nfhs4 + trend + rng.gauss(0.0, 3.0));
                let change = ((nfhs5 - nfhs4) * 10.0).round() / 10.0;
                writer.serialize(Record {
                    state,
                    district,
                    category,
                    indicator,
                    nfhs4,
                    nfhs5,
                    change,
                })?;
                rows += 1;
            }
        }
    }
    writer.flush().context("flushing CSV writer")?;

    println!("Wrote {rows} district indicator records to {output_path}");
    Ok(())
}
