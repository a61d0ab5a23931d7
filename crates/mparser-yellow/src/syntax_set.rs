use crate::SyntaxKind;

const SIZE: usize = 2;

/// A constant-friendly bitset of kinds, used by the parser for
/// recovery and lookahead sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyntaxSet {
    bits: [u64; SIZE],
}

impl SyntaxSet {
    pub const EMPTY: Self = Self { bits: [0; SIZE] };
    const BITS_PER_SLOT: u16 = u64::BITS as u16;

    const fn locate(kind: SyntaxKind) -> (usize, u64) {
        let kind = kind as u16;
        let slot = (kind / Self::BITS_PER_SLOT) as usize;
        debug_assert!(slot < SIZE, "SyntaxSet is too small for this kind");
        (slot, 1 << (kind % Self::BITS_PER_SLOT))
    }

    pub const fn new<const N: usize>(kinds: [SyntaxKind; N]) -> Self {
        let mut set = Self::EMPTY;
        let mut i = 0;
        while i < N {
            set = set.with(kinds[i]);
            i += 1;
        }
        set
    }

    #[must_use]
    pub const fn with(mut self, kind: SyntaxKind) -> Self {
        let (slot, mask) = Self::locate(kind);
        self.bits[slot] |= mask;
        self
    }

    #[must_use]
    pub const fn union(mut self, other: &Self) -> Self {
        let mut i = 0;
        while i < SIZE {
            self.bits[i] |= other.bits[i];
            i += 1;
        }
        self
    }

    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let (slot, mask) = Self::locate(kind);
        self.bits[slot] & mask != 0
    }

    pub const fn is_empty(&self) -> bool {
        let mut i = 0;
        while i < SIZE {
            if self.bits[i] != 0 {
                return false;
            }
            i += 1;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPENERS: SyntaxSet = SyntaxSet::new([
        SyntaxKind::OPENING_BRACKET,
        SyntaxKind::OPENING_SQUARE_BRACKET,
        SyntaxKind::OPENING_BRACE,
    ]);

    #[test]
    fn spans_both_words() {
        let set = OPENERS.with(SyntaxKind::MAGIC_COLON_EXPRESSION);
        assert!(set.contains(SyntaxKind::OPENING_BRACE));
        assert!(set.contains(SyntaxKind::MAGIC_COLON_EXPRESSION));
        assert!(!set.contains(SyntaxKind::CLOSING_BRACE));
        assert!(!set.contains(SyntaxKind::FILE));
    }

    #[test]
    fn union_and_empty() {
        assert!(SyntaxSet::EMPTY.is_empty());
        let set = SyntaxSet::EMPTY.union(&OPENERS);
        assert_eq!(set, OPENERS);
        assert!(!set.is_empty());
    }
}
