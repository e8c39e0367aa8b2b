//! Unit-interval random sources used to place and time falling hearts.

/// Produces floats uniformly distributed in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;

    /// Uniform draw in the half-open range `[lo, hi)`.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        let v = lo + (hi - lo) * self.next_unit();
        // lo + span * u can round up onto hi for u just below 1.0
        if v >= hi { below(hi).max(lo) } else { v }
    }
}

/// Largest float strictly less than `x` (for finite `x`).
fn below(x: f64) -> f64 {
    if x > 0.0 {
        f64::from_bits(x.to_bits() - 1)
    } else if x == 0.0 {
        -f64::from_bits(1)
    } else {
        f64::from_bits(x.to_bits() + 1)
    }
}

/// Maps 53 random bits onto `[0, 1)`.
fn unit_from_bits(bits: u64) -> f64 {
    (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

/// Browser entropy via `getrandom` when the `rng` feature is on, otherwise a
/// linear congruential generator seeded from `performance.now()`.
pub struct EntropySource {
    state: u64,
}

#[allow(clippy::new_without_default)]
impl EntropySource {
    pub fn new() -> Self {
        let seed = web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0);
        Self::seeded(seed.to_bits())
    }

    pub fn seeded(seed: u64) -> Self {
        Self { state: seed ^ 0x9E37_79B9_7F4A_7C15 }
    }

    fn lcg_next(&mut self) -> u64 {
        // Knuth MMIX constants
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }
}

impl RandomSource for EntropySource {
    #[cfg(feature = "rng")]
    fn next_unit(&mut self) -> f64 {
        let mut buf = [0u8; 8];
        match getrandom::getrandom(&mut buf) {
            Ok(()) => unit_from_bits(u64::from_le_bytes(buf)),
            Err(err) => {
                tracing::debug!("getrandom failed ({err}), using lcg");
                unit_from_bits(self.lcg_next())
            }
        }
    }

    #[cfg(not(feature = "rng"))]
    fn next_unit(&mut self) -> f64 {
        unit_from_bits(self.lcg_next())
    }
}

/// Replays a fixed cycle of unit values. Values are clamped into `[0, 1)`.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    pos: usize,
}

impl SequenceSource {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let values: Vec<f64> = values.into();
        let values = if values.is_empty() { vec![0.0] } else { values };
        Self { values, pos: 0 }
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        let v = self.values[self.pos % self.values.len()];
        self.pos = (self.pos + 1) % self.values.len();
        v.clamp(0.0, below(1.0))
    }
}
