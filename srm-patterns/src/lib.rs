// srm-patterns/src/lib.rs
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod pattern;
pub mod sequence;

pub use pattern::{fill_pattern, generate, OverwritePatternKind, ParsePatternKindError};
pub use sequence::{default_sequence, kind_for_pass, DEFAULT_SEQUENCE};

/// Byte written at even offsets by the alternating pattern.
pub const ALTERNATING_EVEN: u8 = 0xAA;
/// Byte written at odd offsets by the alternating pattern.
pub const ALTERNATING_ODD: u8 = 0x55;
