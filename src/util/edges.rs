//! Edge bitmask used for interactive resize and surface anchoring.

use bitflags::bitflags;

bitflags! {
    /// Which edges of a box an operation refers to.
    ///
    /// The bit values match the toolkit's wire encoding, so the raw bits
    /// can be passed through unchanged.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Edges: u32 {
        const TOP = 1;
        const BOTTOM = 2;
        const LEFT = 4;
        const RIGHT = 8;
    }
}

impl Edges {
    /// The mirrored edge set, for anchoring the opposite side during a
    /// resize.
    pub fn opposite(self) -> Edges {
        let mut out = Edges::empty();
        if self.contains(Edges::TOP) {
            out |= Edges::BOTTOM;
        }
        if self.contains(Edges::BOTTOM) {
            out |= Edges::TOP;
        }
        if self.contains(Edges::LEFT) {
            out |= Edges::RIGHT;
        }
        if self.contains(Edges::RIGHT) {
            out |= Edges::LEFT;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_match_wire_encoding() {
        assert_eq!(Edges::TOP.bits(), 1);
        assert_eq!(Edges::BOTTOM.bits(), 2);
        assert_eq!(Edges::LEFT.bits(), 4);
        assert_eq!(Edges::RIGHT.bits(), 8);
        assert_eq!(Edges::from_bits(16), None);
    }

    #[test]
    fn opposite_mirrors_corners() {
        let corner = Edges::TOP | Edges::LEFT;
        assert_eq!(corner.opposite(), Edges::BOTTOM | Edges::RIGHT);
        assert_eq!(Edges::empty().opposite(), Edges::empty());
    }
}
