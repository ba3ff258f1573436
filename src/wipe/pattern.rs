/// Fill patterns for overwrite passes
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Byte content of one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    /// Every byte 0x00
    Zero,
    /// Every byte 0xFF
    One,
    /// Fresh pseudo-random bytes
    Random,
}

impl PatternKind {
    /// The constant fill byte, or `None` for random passes.
    pub fn constant(self) -> Option<u8> {
        match self {
            PatternKind::Zero => Some(0x00),
            PatternKind::One => Some(0xFF),
            PatternKind::Random => None,
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternKind::Zero => write!(f, "zeros (0x00)"),
            PatternKind::One => write!(f, "ones (0xFF)"),
            PatternKind::Random => write!(f, "random"),
        }
    }
}

/// Produces chunk content for a pass.
///
/// Random output only has to differ between passes and chunks; it is filler,
/// not key material, so a fast non-cryptographic generator is used.
pub struct PatternSource {
    rng: SmallRng,
}

impl PatternSource {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }

    /// Fill `buf` completely with `kind`.
    pub fn fill(&mut self, kind: PatternKind, buf: &mut [u8]) {
        match kind.constant() {
            Some(byte) => buf.fill(byte),
            None => self.rng.fill_bytes(buf),
        }
    }

    /// Allocate and fill exactly `len` bytes.
    pub fn generate(&mut self, kind: PatternKind, len: usize) -> Vec<u8> {
        let mut buf = vec![0u8; len];
        self.fill(kind, &mut buf);
        buf
    }
}

impl Default for PatternSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_patterns() {
        let mut source = PatternSource::new();
        let zeros = source.generate(PatternKind::Zero, 1000);
        assert_eq!(zeros.len(), 1000);
        assert!(zeros.iter().all(|&b| b == 0x00));

        let ones = source.generate(PatternKind::One, 17);
        assert_eq!(ones.len(), 17);
        assert!(ones.iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_random_pattern_length_and_variation() {
        let mut source = PatternSource::new();
        let a = source.generate(PatternKind::Random, 4096);
        let b = source.generate(PatternKind::Random, 4096);
        assert_eq!(a.len(), 4096);
        assert_ne!(a, b);
        // 4 KiB of random filler is never a single repeated byte
        assert!(a.iter().any(|&x| x != a[0]));
    }

    #[test]
    fn test_zero_length() {
        let mut source = PatternSource::new();
        assert!(source.generate(PatternKind::Random, 0).is_empty());
    }
}
