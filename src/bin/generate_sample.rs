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

/// Typical operating point per equipment family:
/// (type, prefix, flowrate m³/h, pressure bar, temperature °C).
const FAMILIES: &[(&str, &str, f64, f64, f64)] = &[
    ("Pump", "P", 120.0, 4.5, 45.0),
    ("Compressor", "C", 85.0, 9.0, 70.0),
    ("Heat Exchanger", "E", 150.0, 3.0, 110.0),
    ("Valve", "V", 60.0, 6.0, 40.0),
    ("Reactor", "R", 40.0, 12.0, 180.0),
];

const UNITS_PER_FAMILY: usize = 8;

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let output_path = "sample_equipment.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    writer.write_record([
        "equipment_name",
        "equipment_type",
        "flowrate",
        "pressure",
        "temperature",
    ])?;

    let mut rows = 0usize;
    for &(family, prefix, flow, pressure, temperature) in FAMILIES {
        for unit in 1..=UNITS_PER_FAMILY {
            let name = format!("{prefix}-{unit:03}");
            let flowrate = format!("{:.2}", rng.gauss(flow, flow * 0.08));
            let pressure = format!("{:.2}", rng.gauss(pressure, pressure * 0.05));
            let temperature = format!("{:.2}", rng.gauss(temperature, temperature * 0.04));
            writer.write_record([
                name.as_str(),
                family,
                flowrate.as_str(),
                pressure.as_str(),
                temperature.as_str(),
            ])?;
            rows += 1;
        }
    }

    writer.flush().context("flushing CSV")?;
    println!(
        "Wrote {rows} equipment records ({} types) to {output_path}",
        FAMILIES.len()
    );
    Ok(())
}
