//! Scripted random source for deterministic tests.

use rand::RngCore;

/// Replays a fixed list of `[0, 1)` fractions; the last one repeats forever.
///
/// Every `rng.random::<f64>()` consumes exactly one `next_u64`, which keeps
/// the top 53 bits, so the fractions come back unchanged when they are
/// multiples of 2^-53 and within one ulp otherwise.
pub(crate) struct ScriptedRng {
    values: Vec<f64>,
    next: usize,
}

impl ScriptedRng {
    pub(crate) fn new(values: &[f64]) -> Self {
        assert!(!values.is_empty());
        Self {
            values: values.to_vec(),
            next: 0,
        }
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let idx = self.next.min(self.values.len() - 1);
        self.next += 1;
        let mantissa = (self.values[idx] * (1u64 << 53) as f64) as u64;
        mantissa << 11
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}
