//! Writes a synthetic natality CSV whose headers use alternate spellings
//! (`State`, `Gender`, `Birth Count`, ...) plus a few dirty rows.

use std::path::PathBuf;

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

    /// Uniform integer in `[lo, hi)`.
    fn range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + (self.next_f64() * (hi - lo) as f64) as u64
    }
}

const HEADERS: [&str; 7] = [
    "State",
    "Month",
    "Month-Code",
    "YEAR CODE",
    "Gender",
    "Birth Count",
    "Notes",
];

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// (state, typical monthly births per sex)
const STATES: [(&str, u64); 6] = [
    ("California", 17_000),
    ("Texas", 16_000),
    ("Florida", 9_500),
    ("New York", 8_500),
    ("Ohio", 5_500),
    ("Wyoming", 250),
];

const SEXES: [&str; 2] = ["Female", "Male"];

fn main() -> Result<()> {
    env_logger::init();

    let output_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_natality.csv"));

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    writer.write_record(HEADERS).context("writing header")?;

    let mut rows = 0usize;
    for (state, base) in STATES {
        for (m, month) in MONTHS.into_iter().enumerate() {
            for sex in SEXES {
                let spread = base / 10 + 1;
                let births = base - spread / 2 + rng.range(0, spread);
                let code = (m + 1).to_string();
                // Padded text exercises trimming on load.
                let state_cell = if rng.next_f64() < 0.1 {
                    format!(" {state} ")
                } else {
                    state.to_string()
                };
                writer
                    .write_record([
                        state_cell.as_str(),
                        month,
                        code.as_str(),
                        "2025",
                        sex,
                        births.to_string().as_str(),
                        "",
                    ])
                    .context("writing row")?;
                rows += 1;
            }
        }
    }

    // Rows the loader must handle: suppressed count (dropped), unknown month
    // code (kept with an absent code).
    writer
        .write_record(["Wyoming", "December", "12", "2025", "Female", "Suppressed", "suppressed"])
        .context("writing row")?;
    writer
        .write_record(["Ohio", "Unknown", "N/A", "2025", "Male", "12", "month not stated"])
        .context("writing row")?;
    rows += 2;

    writer.flush().context("flushing CSV")?;
    log::info!("wrote {rows} rows to {}", output_path.display());
    println!("Wrote {rows} rows to {}", output_path.display());
    Ok(())
}
