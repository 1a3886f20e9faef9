// srm-patterns/src/sequence/mod.rs

use crate::pattern::OverwritePatternKind;

/// The pass order applied cyclically: pass `n` uses `DEFAULT_SEQUENCE[n % 5]`.
pub const DEFAULT_SEQUENCE: [OverwritePatternKind; 5] = [
    OverwritePatternKind::Random,
    OverwritePatternKind::Zeros,
    OverwritePatternKind::Ones,
    OverwritePatternKind::Alternating,
    OverwritePatternKind::Random,
];

pub fn default_sequence() -> &'static [OverwritePatternKind; 5] {
    &DEFAULT_SEQUENCE
}

/// Selects the pattern for zero-based pass index `pass`.
pub fn kind_for_pass(pass: usize) -> OverwritePatternKind {
    DEFAULT_SEQUENCE[pass % DEFAULT_SEQUENCE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_order() {
        assert_eq!(
            default_sequence(),
            &[
                OverwritePatternKind::Random,
                OverwritePatternKind::Zeros,
                OverwritePatternKind::Ones,
                OverwritePatternKind::Alternating,
                OverwritePatternKind::Random,
            ]
        );
    }

    #[test]
    fn test_kind_for_pass_cycles() {
        assert_eq!(kind_for_pass(0), OverwritePatternKind::Random);
        assert_eq!(kind_for_pass(3), OverwritePatternKind::Alternating);
        assert_eq!(kind_for_pass(5), OverwritePatternKind::Random);
        assert_eq!(kind_for_pass(6), OverwritePatternKind::Zeros);
        assert_eq!(kind_for_pass(34), OverwritePatternKind::Random);
    }
}
