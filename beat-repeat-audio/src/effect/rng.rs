//! Deterministic linear congruential generator for the playback gate.
//!
//! Same seed, same sequence: slice selection is reproducible in tests.

/// 32-bit LCG (`state * 1664525 + 1013904223`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub const DEFAULT_SEED: u32 = 0x1234_5678;

    pub const fn new(seed: u32) -> Self {
        Lcg { state: seed }
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(1_664_525)
            .wrapping_add(1_013_904_223);
        self.state
    }

    /// Weighted coin flip. Always advances the generator, so the sequence
    /// does not depend on the probability values passed in.
    pub fn chance(&mut self, probability: f32) -> bool {
        // Upper 16 bits have the longest period in an LCG.
        let draw = self.next_u32() >> 16;
        let threshold = (probability.clamp(0.0, 1.0) * 65_536.0) as u32;
        draw < threshold
    }
}

impl Default for Lcg {
    fn default() -> Self {
        Lcg::new(Lcg::DEFAULT_SEED)
    }
}
