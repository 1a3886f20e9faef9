//! CSPRNG-backed pattern generation on top of `srm-patterns`.

use rand::rngs::ThreadRng;

pub use srm_patterns::{default_sequence, kind_for_pass, OverwritePatternKind, DEFAULT_SEQUENCE};

/// Produces overwrite buffers. `Random` draws from the thread-local CSPRNG,
/// which is reseeded from the OS and never repeats output across calls.
#[derive(Debug, Default)]
pub struct PatternGenerator {
    rng: ThreadRng,
}

impl PatternGenerator {
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }

    /// Returns exactly `size` bytes of `kind`.
    pub fn generate(&mut self, size: usize, kind: OverwritePatternKind) -> Vec<u8> {
        srm_patterns::generate(size, kind, &mut self.rng)
    }

    /// Fills `buf` as the slice of the pattern starting at file `offset`.
    pub fn fill(&mut self, buf: &mut [u8], kind: OverwritePatternKind, offset: u64) {
        srm_patterns::fill_pattern(buf, kind, offset, &mut self.rng);
    }

    /// The five-element pass order, applied cyclically.
    pub fn default_sequence() -> &'static [OverwritePatternKind; 5] {
        default_sequence()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_sizes() {
        let mut generator = PatternGenerator::new();
        for kind in OverwritePatternKind::ALL {
            for size in [0usize, 1, 1023] {
                assert_eq!(generator.generate(size, kind).len(), size);
            }
        }
    }

    #[test]
    fn test_random_not_reused() {
        let mut generator = PatternGenerator::new();
        let a = generator.generate(32, OverwritePatternKind::Random);
        let b = generator.generate(32, OverwritePatternKind::Random);
        assert_ne!(a, b);
    }
}
