use super::{Dimensions, Square};

/// The rectangular grid pieces are placed on.
///
/// Cells carry no payload of their own; the pieces standing on them are
/// tracked by the [`Roster`][super::Roster]. A board is always replaced
/// wholesale, never resized in place.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    dimensions: Dimensions,
}

impl Board {
    /// Constructs an empty board of the given size.
    ///
    /// The 1x1..=20x20 bound is guaranteed by [`Dimensions`].
    pub fn new(dimensions: Dimensions) -> Self {
        Board { dimensions }
    }

    /// This board's size.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Whether the square lies within this board.
    pub fn contains(&self, sq: Square) -> bool {
        sq.row < self.dimensions.rows() && sq.col < self.dimensions.cols()
    }

    /// All squares of this board, in row-major order.
    pub fn squares(&self) -> impl Iterator<Item = Square> {
        let d = self.dimensions;
        (0..d.rows()).flat_map(move |row| (0..d.cols()).map(move |col| Square::new(row, col)))
    }
}
