use super::Dimensions;
use derive_more::Display;
use test_strategy::Arbitrary;

/// A cell of the [`Board`][super::Board], addressed by row and column.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
#[display(fmt = "({}, {})", row, col)]
pub struct Square {
    #[strategy(0..Dimensions::MAX)]
    pub row: u8,
    #[strategy(0..Dimensions::MAX)]
    pub col: u8,
}

impl Square {
    /// The top-left cell, where newly declared pieces land.
    pub const ORIGIN: Self = Square { row: 0, col: 0 };

    /// Constructs a [`Square`] from a pair of coordinates.
    pub fn new(row: u8, col: u8) -> Self {
        Square { row, col }
    }
}
