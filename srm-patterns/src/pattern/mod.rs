//! Byte-generation rules for a single overwrite pass.
//!
//! Every rule is a pure function of `(offset, length, kind)` except
//! [`OverwritePatternKind::Random`], which draws from the caller's RNG.
//! Taking the absolute file offset lets a caller stream a pattern in
//! chunks of any size and still land on the same bytes as one big buffer.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;
use rand_core::RngCore;

use crate::{ALTERNATING_EVEN, ALTERNATING_ODD};

/// The byte-generation rule used for one overwrite pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverwritePatternKind {
    /// Fresh random bytes from the supplied generator.
    Random,
    /// `0x00` repeated.
    Zeros,
    /// `0xFF` repeated.
    Ones,
    /// `0xAA` at even offsets, `0x55` at odd offsets.
    Alternating,
}

impl OverwritePatternKind {
    /// All kinds, in declaration order.
    pub const ALL: [OverwritePatternKind; 4] = [
        OverwritePatternKind::Random,
        OverwritePatternKind::Zeros,
        OverwritePatternKind::Ones,
        OverwritePatternKind::Alternating,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OverwritePatternKind::Random => "random",
            OverwritePatternKind::Zeros => "zeros",
            OverwritePatternKind::Ones => "ones",
            OverwritePatternKind::Alternating => "alternating",
        }
    }

    /// True when the output does not depend on an RNG.
    pub fn is_deterministic(&self) -> bool {
        !matches!(self, OverwritePatternKind::Random)
    }

    /// The byte this kind produces at `offset`, or `None` for random data.
    pub fn byte_at(&self, offset: u64) -> Option<u8> {
        match self {
            OverwritePatternKind::Random => None,
            OverwritePatternKind::Zeros => Some(0x00),
            OverwritePatternKind::Ones => Some(0xFF),
            OverwritePatternKind::Alternating => Some(if offset % 2 == 0 {
                ALTERNATING_EVEN
            } else {
                ALTERNATING_ODD
            }),
        }
    }
}

impl fmt::Display for OverwritePatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a pattern name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePatternKindError;

impl fmt::Display for ParsePatternKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid pattern; expected one of: random, zeros, ones, alternating")
    }
}

impl FromStr for OverwritePatternKind {
    type Err = ParsePatternKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OverwritePatternKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or(ParsePatternKindError)
    }
}

/// Fills `buf` with `kind`, treating `buf[0]` as the byte at file `offset`.
pub fn fill_pattern<R: RngCore + ?Sized>(
    buf: &mut [u8],
    kind: OverwritePatternKind,
    offset: u64,
    rng: &mut R,
) {
    match kind {
        OverwritePatternKind::Random => rng.fill_bytes(buf),
        OverwritePatternKind::Zeros => buf.fill(0x00),
        OverwritePatternKind::Ones => buf.fill(0xFF),
        OverwritePatternKind::Alternating => {
            // Phase flips when the chunk starts on an odd offset.
            let (first, second) = if offset % 2 == 0 {
                (ALTERNATING_EVEN, ALTERNATING_ODD)
            } else {
                (ALTERNATING_ODD, ALTERNATING_EVEN)
            };
            for pair in buf.chunks_mut(2) {
                pair[0] = first;
                if let Some(b) = pair.get_mut(1) {
                    *b = second;
                }
            }
        }
    }
}

/// Returns a buffer of exactly `size` bytes of `kind`, starting at offset 0.
pub fn generate<R: RngCore + ?Sized>(size: usize, kind: OverwritePatternKind, rng: &mut R) -> Vec<u8> {
    let mut buf = vec![0u8; size];
    fill_pattern(&mut buf, kind, 0, rng);
    buf
}
