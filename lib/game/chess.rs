use super::{Piece, PieceId, Square, Visual};

const BLACK_RANK: [char; 8] = ['♜', '♞', '♝', '♛', '♚', '♝', '♞', '♜'];
const WHITE_RANK: [char; 8] = ['♖', '♘', '♗', '♕', '♔', '♗', '♘', '♖'];

/// The 32 pieces of the standard chess starting position.
///
/// Black occupies rows 0 and 1, white rows 6 and 7.
pub(super) fn starting_pieces() -> impl Iterator<Item = Piece> {
    (0..8u8).flat_map(|file| {
        [
            piece(format!("b{}", file), "black", Square::new(0, file), BLACK_RANK[file as usize]),
            piece(format!("bp{}", file), "black", Square::new(1, file), '♟'),
            piece(format!("wp{}", file), "white", Square::new(6, file), '♙'),
            piece(format!("w{}", file), "white", Square::new(7, file), WHITE_RANK[file as usize]),
        ]
    })
}

fn piece(id: String, owner: &str, square: Square, glyph: char) -> Piece {
    Piece::new(PieceId::new(id), owner, square, Visual::Glyph(glyph.to_string()))
}
