use super::Square;
use derive_more::Display;
use test_strategy::Arbitrary;

/// The immutable identity of a piece.
#[derive(Debug, Display, Clone, Eq, PartialEq, Hash, Arbitrary)]
pub struct PieceId(#[strategy("[a-z]{1,8}-[0-9]{1,3}")] String);

impl PieceId {
    /// Constructs a [`PieceId`] from its textual form.
    pub fn new(id: impl Into<String>) -> Self {
        PieceId(id.into())
    }
}

/// How a piece is drawn on its square.
#[derive(Debug, Display, Clone, Eq, PartialEq, Hash, Arbitrary)]
pub enum Visual {
    /// A short text drawn directly on the square.
    #[display(fmt = "{}", _0)]
    Glyph(#[strategy("[A-Z]{1,3}")] String),
    /// An embeddable reference to an image asset.
    #[display(fmt = "▣")]
    Image(#[strategy("[a-z]{1,8}\\.png")] String),
}

impl Visual {
    /// The visual of a piece declared by name only.
    ///
    /// The first three characters of the owner label, upper-cased.
    pub fn initials(owner: &str) -> Self {
        Visual::Glyph(owner.chars().take(3).flat_map(char::to_uppercase).collect())
    }

    /// The visual of a piece backed by a file in the shared uploads area.
    pub fn file(name: &str) -> Self {
        Visual::Image(format!("/uploads/{}", name))
    }

    /// The image reference, if this visual has one.
    pub fn reference(&self) -> Option<&str> {
        match self {
            Visual::Glyph(_) => None,
            Visual::Image(r) => Some(r),
        }
    }
}

/// A piece standing on a square of the board.
///
/// Everything but the square is immutable; the square only changes through
/// the [`Roster`][super::Roster].
#[derive(Debug, Clone, Eq, PartialEq, Hash, Arbitrary)]
pub struct Piece {
    id: PieceId,
    #[strategy("[a-z]{1,8}")]
    owner: String,
    square: Square,
    visual: Visual,
}

impl Piece {
    /// Constructs a [`Piece`] standing on the given square.
    pub fn new(id: PieceId, owner: impl Into<String>, square: Square, visual: Visual) -> Self {
        Piece {
            id,
            owner: owner.into(),
            square,
            visual,
        }
    }

    /// This piece's identity.
    pub fn id(&self) -> &PieceId {
        &self.id
    }

    /// The label of the player who declared this piece.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The square this piece stands on.
    pub fn square(&self) -> Square {
        self.square
    }

    /// How this piece is drawn.
    pub fn visual(&self) -> &Visual {
        &self.visual
    }

    pub(super) fn relocate(&mut self, square: Square) {
        self.square = square;
    }
}

/// A piece whose image is yet to be supplied.
///
/// At most one of these exists at a time; a newer request silently replaces
/// an older one.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Arbitrary)]
pub struct PendingPiece {
    #[strategy("[a-z]{1,8}")]
    owner: String,
}

impl PendingPiece {
    /// Constructs a request on behalf of the given owner.
    pub fn new(owner: impl Into<String>) -> Self {
        PendingPiece {
            owner: owner.into(),
        }
    }

    /// The label of the player who requested the upload.
    pub fn owner(&self) -> &str {
        &self.owner
    }
}
