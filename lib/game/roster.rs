use super::{Piece, PieceId, Square};
use derive_more::{Display, Error};

/// The square a piece was headed to is already taken.
#[derive(Debug, Display, Clone, Eq, PartialEq, Hash, Error)]
#[display(fmt = "square {} is already occupied", _0)]
pub struct SquareOccupied(#[error(not(source))] pub Square);

/// The reason why a piece could not be moved.
#[derive(Debug, Display, Clone, Eq, PartialEq, Hash, Error)]
pub enum MoveError {
    #[display(fmt = "no piece `{}` on the board", _0)]
    Unknown(#[error(not(source))] PieceId),
    #[display(fmt = "square {} is already occupied", _0)]
    Occupied(#[error(not(source))] Square),
    #[display(fmt = "square {} is outside the board", _0)]
    OffBoard(#[error(not(source))] Square),
}

impl From<SquareOccupied> for MoveError {
    fn from(SquareOccupied(sq): SquareOccupied) -> Self {
        MoveError::Occupied(sq)
    }
}

/// The pieces on the board, in order of arrival.
///
/// Invariant: no two pieces ever stand on the same square. The occupancy
/// scan does not exempt the piece being moved, so a piece cannot be
/// relocated onto its own square either.
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash)]
pub struct Roster {
    pieces: Vec<Piece>,
}

impl Roster {
    /// Adds a piece, provided its square is free.
    pub fn place(&mut self, piece: Piece) -> Result<&Piece, SquareOccupied> {
        if self.at(piece.square()).is_some() {
            return Err(SquareOccupied(piece.square()));
        }

        self.pieces.push(piece);
        Ok(&self.pieces[self.pieces.len() - 1])
    }

    /// Moves the identified piece, provided the target square is free.
    pub fn relocate(&mut self, id: &PieceId, to: Square) -> Result<&Piece, MoveError> {
        let idx = self
            .pieces
            .iter()
            .position(|p| p.id() == id)
            .ok_or_else(|| MoveError::Unknown(id.clone()))?;

        if self.at(to).is_some() {
            return Err(MoveError::Occupied(to));
        }

        self.pieces[idx].relocate(to);
        Ok(&self.pieces[idx])
    }

    /// The piece standing on the given square, if any.
    pub fn at(&self, sq: Square) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.square() == sq)
    }

    /// The piece with the given identity, if any.
    pub fn get(&self, id: &PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id() == id)
    }

    /// The most recently added piece, if any.
    pub fn last(&self) -> Option<&Piece> {
        self.pieces.last()
    }

    /// All pieces, in order of arrival.
    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }

    /// The number of pieces on the board.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Whether the board is empty of pieces.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Removes every piece.
    pub fn clear(&mut self) {
        self.pieces.clear();
    }
}

impl FromIterator<Piece> for Roster {
    /// Collects pieces known to stand on distinct squares.
    fn from_iter<I: IntoIterator<Item = Piece>>(iter: I) -> Self {
        let pieces: Vec<_> = iter.into_iter().collect();

        debug_assert!(pieces
            .iter()
            .enumerate()
            .all(|(i, p)| pieces[..i].iter().all(|q| q.square() != p.square())));

        Roster { pieces }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Visual;
    use proptest::prop_assume;
    use test_strategy::proptest;

    fn piece(id: &str, sq: Square) -> Piece {
        Piece::new(PieceId::new(id), id, sq, Visual::initials(id))
    }

    #[proptest]
    fn placing_on_an_occupied_square_fails(a: Square, b: Square) {
        let mut roster = Roster::default();
        roster.place(piece("first", a))?;

        if a == b {
            assert_eq!(roster.place(piece("second", b)), Err(SquareOccupied(b)));
            assert_eq!(roster.len(), 1);
        } else {
            assert!(roster.place(piece("second", b)).is_ok());
            assert_eq!(roster.len(), 2);
        }
    }

    #[proptest]
    fn relocating_moves_only_the_identified_piece(a: Square, b: Square, to: Square) {
        prop_assume!(a != b && a != to && b != to);

        let mut roster = Roster::default();
        roster.place(piece("stays", a))?;
        roster.place(piece("moves", b))?;

        roster.relocate(&PieceId::new("moves"), to)?;

        assert_eq!(roster.at(a).map(Piece::id), Some(&PieceId::new("stays")));
        assert_eq!(roster.at(to).map(Piece::id), Some(&PieceId::new("moves")));
        assert_eq!(roster.at(b), None);
    }

    #[proptest]
    fn relocating_an_unknown_piece_fails(id: PieceId, to: Square) {
        let mut roster = Roster::default();

        assert_eq!(
            roster.relocate(&id, to),
            Err(MoveError::Unknown(id.clone()))
        );
    }

    #[proptest]
    fn relocating_onto_an_occupied_square_fails(a: Square, b: Square) {
        prop_assume!(a != b);

        let mut roster = Roster::default();
        roster.place(piece("one", a))?;
        roster.place(piece("two", b))?;

        assert_eq!(
            roster.relocate(&PieceId::new("two"), a),
            Err(MoveError::Occupied(a))
        );

        assert_eq!(roster.at(b).map(Piece::id), Some(&PieceId::new("two")));
    }

    #[proptest]
    fn relocating_a_piece_onto_its_own_square_fails(sq: Square) {
        let mut roster = Roster::default();
        roster.place(piece("only", sq))?;

        assert_eq!(
            roster.relocate(&PieceId::new("only"), sq),
            Err(MoveError::Occupied(sq))
        );
    }

    #[proptest]
    fn the_last_piece_is_the_most_recently_added(a: Square, b: Square) {
        prop_assume!(a != b);

        let mut roster = Roster::default();
        assert_eq!(roster.last(), None);

        roster.place(piece("one", a))?;
        roster.place(piece("two", b))?;

        assert_eq!(roster.last().map(Piece::id), Some(&PieceId::new("two")));
    }
}
