//! Reproducible stream of noise seeds.
//!
//! Regenerating a world "with a new seed" draws the next value from a
//! [`SeedSequence`], so a run started from the same initial seed visits the
//! same worlds in the same order.

/// Xorshift64 generator yielding 32-bit noise seeds.
#[derive(Debug, Clone)]
pub struct SeedSequence {
    state: u64,
}

impl SeedSequence {
    /// Replaces a zero state, which xorshift never leaves.
    const FALLBACK_STATE: u64 = 0x5EED_DEAD_BEEF_CAFE;

    pub fn new(initial: u32) -> Self {
        let state = (u64::from(initial) << 32) | u64::from(initial.rotate_left(16));
        Self {
            state: if state == 0 { Self::FALLBACK_STATE } else { state },
        }
    }

    /// Advances the state (shifts 13, 7, 17) and returns the upper 32 bits.
    pub fn next_seed(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        (self.state >> 32) as u32
    }
}

impl Iterator for SeedSequence {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        Some(self.next_seed())
    }
}
