//! Test RNG — deterministic `DeterministicRng` implementations for tests.

use galaxy_core::rng::DeterministicRng;

/// A no-op RNG that always returns `min`. Every session id it mints is
/// `"0000000000000000"`.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }
}

/// An RNG that returns values from a predetermined sequence. Panics if the
/// sequence is exhausted. Used in tests that need specific, repeatable
/// session identifiers.
#[derive(Debug)]
pub struct SequenceRng {
    values: Vec<u32>,
    index: usize,
}

impl SequenceRng {
    /// Create a new `SequenceRng` with the given values.
    #[must_use]
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, index: 0 }
    }

    /// A sequence that mints the given base-36 identifiers in order.
    ///
    /// # Panics
    ///
    /// Panics if an identifier contains a character outside `[0-9a-z]`.
    #[must_use]
    pub fn minting(ids: &[&str]) -> Self {
        let values = ids
            .iter()
            .flat_map(|id| id.chars())
            .map(|c| c.to_digit(36).expect("base-36 character"))
            .collect();
        Self::new(values)
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, _min: u32, _max: u32) -> u32 {
        let val = self.values[self.index];
        self.index += 1;
        val
    }
}
