use serde_json::{json, Map, Value as JsonValue};

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Minimal deterministic PRNG (xoshiro256**)
pub struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
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

    /// Uniform in `[-amplitude, amplitude)`.
    pub fn jitter(&mut self, amplitude: f64) -> f64 {
        (self.next_f64() * 2.0 - 1.0) * amplitude
    }
}

/// (field, data type, peak time, width, amplitude)
const SERIES: &[(&str, &str, f64, f64, f64)] = &[
    ("displacement", "l1norms", 0.6, 0.25, 1.0),
    ("displacement", "l2norms", 0.6, 0.25, 0.7),
    ("displacement", "maxs", 0.5, 0.20, 0.4),
    ("temperature", "avgs", 0.3, 0.40, 300.0),
    ("temperature", "maxs", 0.3, 0.30, 450.0),
];

/// Number of time steps in a sample document.
pub const SAMPLE_STEPS: usize = 200;

/// Build a baseline document and a test copy whose values are shifted by
/// at most `noise`.
pub fn sample_pair(seed: u64, noise: f64) -> (JsonValue, JsonValue) {
    let mut rng = SimpleRng::new(seed);
    let times: Vec<f64> = (0..SAMPLE_STEPS)
        .map(|i| i as f64 / (SAMPLE_STEPS - 1) as f64)
        .collect();

    let mut baseline = Map::new();
    let mut test = Map::new();
    for curves in [&mut baseline, &mut test] {
        curves.insert("t".into(), json!({ "value": &times }));
        curves.insert("sidre_group_name".into(), json!("curves"));
    }

    for &(field, data_type, mu, sigma, amplitude) in SERIES {
        let base: Vec<f64> = times
            .iter()
            .map(|&t| gaussian(t, mu, sigma, amplitude))
            .collect();
        let perturbed: Vec<f64> = base.iter().map(|&v| v + rng.jitter(noise)).collect();

        insert_series(&mut baseline, field, data_type, base);
        insert_series(&mut test, field, data_type, perturbed);
    }

    (
        json!({ "curves": baseline }),
        json!({ "curves": test }),
    )
}

fn insert_series(curves: &mut Map<String, JsonValue>, field: &str, data_type: &str, values: Vec<f64>) {
    let entry = curves
        .entry(field.to_string())
        .or_insert_with(|| JsonValue::Object(Map::new()));
    if let JsonValue::Object(series) = entry {
        series.insert(data_type.to_string(), json!(values));
    }
}
