use super::{chess, Board, Dimensions, MoveError, PendingPiece, Piece, PieceId, Roster};
use super::{Square, SquareOccupied, UnsupportedMedia, Upload, Visual};
use crate::build::Build;
use anyhow::Error as Anyhow;
use derive_more::{Display, Error, From};
use serde::Deserialize;
use std::fmt::{self, Formatter};
use std::str::FromStr;

/// The reason why a pending image request could not be resolved.
#[derive(Debug, Display, Clone, Eq, PartialEq, Hash, Error)]
pub enum ResolveError {
    #[display(fmt = "no piece is awaiting an image")]
    NothingPending,
    #[display(fmt = "{}", _0)]
    Media(UnsupportedMedia),
    #[display(fmt = "{}", _0)]
    Occupied(SquareOccupied),
}

impl From<UnsupportedMedia> for ResolveError {
    fn from(e: UnsupportedMedia) -> Self {
        ResolveError::Media(e)
    }
}

impl From<SquareOccupied> for ResolveError {
    fn from(e: SquareOccupied) -> Self {
        ResolveError::Occupied(e)
    }
}

/// The whole of the shared game state.
///
/// Every mutation either fully succeeds or leaves the table untouched.
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash)]
pub struct Table {
    board: Option<Board>,
    roster: Roster,
    pending: Option<PendingPiece>,
    seq: u32,
}

impl Table {
    /// The current board, if one has been set up.
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    /// The pieces currently on the board.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The outstanding image request, if any.
    pub fn pending(&self) -> Option<&PendingPiece> {
        self.pending.as_ref()
    }

    /// Replaces the board with an empty one of the given size.
    ///
    /// All pieces are removed; an outstanding image request survives.
    pub fn reset(&mut self, dimensions: Dimensions) {
        self.board = Some(Board::new(dimensions));
        self.roster.clear();
    }

    /// Replaces the table with a standard chess setup.
    ///
    /// Resets the board to 8x8 and populates the 32-piece starting position.
    pub fn chess(&mut self) {
        self.reset(Dimensions::CHESS);
        self.roster = chess::starting_pieces().collect();
    }

    /// Declares a new piece on the origin square.
    pub fn declare(&mut self, owner: &str, visual: Visual) -> Result<&Piece, SquareOccupied> {
        let id = PieceId::new(format!("{}-{}", owner, self.seq));
        let piece = Piece::new(id, owner, Square::ORIGIN, visual);
        let piece = self.roster.place(piece)?;
        self.seq += 1;
        Ok(piece)
    }

    /// Requests an image for a piece yet to be declared.
    ///
    /// A newer request silently replaces an older one.
    pub fn request_image(&mut self, owner: &str) -> &PendingPiece {
        self.pending.insert(PendingPiece::new(owner))
    }

    /// Discards the outstanding image request, if any.
    pub fn abandon_upload(&mut self) -> Option<PendingPiece> {
        self.pending.take()
    }

    /// Resolves the outstanding image request with an uploaded image.
    ///
    /// The piece is created on the origin square and the request is consumed
    /// in the same step; a rejected upload leaves the request open.
    pub fn resolve_image(&mut self, upload: &Upload) -> Result<&Piece, ResolveError> {
        let pending = self.pending.as_ref().ok_or(ResolveError::NothingPending)?;

        if !upload.is_png() {
            return Err(UnsupportedMedia(upload.media_type().to_string()).into());
        }

        let owner = pending.owner().to_string();
        let id = PieceId::new(format!("{}-{}", owner, self.seq));
        let visual = Visual::Image(upload.reference().to_string());
        let piece = Piece::new(id, owner, Square::ORIGIN, visual);
        let piece = self.roster.place(piece)?;
        self.pending = None;
        self.seq += 1;
        Ok(piece)
    }

    /// Moves the most recently added piece to the given square.
    ///
    /// Returns `Ok(None)` if there is no piece to move.
    pub fn click(&mut self, to: Square) -> Result<Option<&Piece>, MoveError> {
        if !self.board.map_or(false, |b| b.contains(to)) {
            return Err(MoveError::OffBoard(to));
        }

        let id = match self.roster.last() {
            Some(piece) => piece.id().clone(),
            None => return Ok(None),
        };

        Ok(Some(self.roster.relocate(&id, to)?))
    }

    /// Moves the identified piece to the given square.
    pub fn drag(&mut self, id: &PieceId, to: Square) -> Result<&Piece, MoveError> {
        if !self.board.map_or(false, |b| b.contains(to)) {
            return Err(MoveError::OffBoard(to));
        }

        self.roster.relocate(id, to)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let board = match &self.board {
            Some(board) => board,
            None => return Ok(()),
        };

        for row in 0..board.dimensions().rows() {
            for col in 0..board.dimensions().cols() {
                match self.roster.at(Square::new(row, col)) {
                    Some(piece) => write!(f, "|{:^3}", piece.visual().to_string())?,
                    None => write!(f, "|   ")?,
                }
            }

            writeln!(f, "|")?;
        }

        Ok(())
    }
}

/// Runtime configuration for the initial [`Table`].
#[derive(Debug, Clone, Eq, PartialEq, Hash, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "lowercase")]
pub enum TableBuilder {
    Empty(),
    Grid(u8, u8),
    Chess(),
}

impl Default for TableBuilder {
    fn default() -> Self {
        TableBuilder::Empty()
    }
}

/// The reason why parsing a [`TableBuilder`] failed.
#[derive(Debug, Display, Error, From)]
#[display(fmt = "failed to parse table builder")]
pub struct ParseTableBuilderError(ron::error::SpannedError);

impl FromStr for TableBuilder {
    type Err = ParseTableBuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}

impl Build for TableBuilder {
    type Output = Table;

    fn build(self) -> Result<Self::Output, Anyhow> {
        let mut table = Table::default();

        match self {
            TableBuilder::Empty() => {}
            TableBuilder::Grid(rows, cols) => table.reset(Dimensions::new(rows, cols)?),
            TableBuilder::Chess() => table.chess(),
        }

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prop_assume;
    use test_strategy::proptest;

    #[proptest]
    fn reset_replaces_the_board_and_clears_the_pieces(d: Dimensions, e: Dimensions) {
        let mut table = Table::default();
        table.reset(d);
        table.declare("alice", Visual::initials("alice"))?;

        table.reset(e);

        assert_eq!(table.board().map(Board::dimensions), Some(e));
        assert!(table.roster().is_empty());
    }

    #[proptest]
    fn reset_preserves_a_pending_image_request(d: Dimensions) {
        let mut table = Table::default();
        table.request_image("alice");

        table.reset(d);

        assert_eq!(table.pending().map(PendingPiece::owner), Some("alice"));
    }

    #[proptest]
    fn pieces_are_declared_on_the_origin_square(d: Dimensions, v: Visual) {
        let mut table = Table::default();
        table.reset(d);

        let piece = table.declare("alice", v.clone())?;

        assert_eq!(piece.square(), Square::ORIGIN);
        assert_eq!(piece.visual(), &v);
    }

    #[proptest]
    fn declaring_on_an_occupied_origin_fails(d: Dimensions) {
        let mut table = Table::default();
        table.reset(d);
        table.declare("alice", Visual::initials("alice"))?;

        assert_eq!(
            table.declare("bob", Visual::initials("bob")),
            Err(SquareOccupied(Square::ORIGIN))
        );

        assert_eq!(table.roster().len(), 1);
    }

    #[proptest]
    fn declared_pieces_have_distinct_ids(d: Dimensions, to: Square) {
        prop_assume!(d.rows() > 1 || d.cols() > 1);
        prop_assume!(to != Square::ORIGIN && to.row < d.rows() && to.col < d.cols());

        let mut table = Table::default();
        table.reset(d);

        let first = table.declare("alice", Visual::initials("alice"))?.id().clone();
        table.drag(&first, to)?;
        let second = table.declare("alice", Visual::initials("alice"))?.id().clone();

        assert_ne!(first, second);
    }

    #[proptest]
    fn a_newer_image_request_replaces_an_older_one(
        #[strategy("[a-z]{1,8}")] a: String,
        #[strategy("[a-z]{1,8}")] b: String,
    ) {
        let mut table = Table::default();
        table.request_image(&a);
        table.request_image(&b);

        assert_eq!(table.pending().map(PendingPiece::owner), Some(&*b));
    }

    #[proptest]
    fn an_abandoned_image_request_is_gone(#[strategy("[a-z]{1,8}")] owner: String) {
        let mut table = Table::default();
        table.request_image(&owner);

        assert_eq!(table.abandon_upload(), Some(PendingPiece::new(owner)));
        assert_eq!(table.pending(), None);
        assert_eq!(table.abandon_upload(), None);
    }

    #[proptest]
    fn resolving_without_a_pending_request_fails(d: Dimensions, u: Upload) {
        let mut table = Table::default();
        table.reset(d);

        assert_eq!(
            table.resolve_image(&u),
            Err(ResolveError::NothingPending)
        );
    }

    #[proptest]
    fn a_png_upload_resolves_the_pending_request(d: Dimensions) {
        let mut table = Table::default();
        table.reset(d);
        table.request_image("alice");

        let upload = Upload::new("image/png", "file://a.png");
        let piece = table.resolve_image(&upload)?;

        assert_eq!(piece.square(), Square::ORIGIN);
        assert_eq!(piece.owner(), "alice");
        assert_eq!(piece.visual().reference(), Some("file://a.png"));
        assert_eq!(table.pending(), None);
    }

    #[proptest]
    fn a_rejected_upload_leaves_the_request_open(
        d: Dimensions,
        #[strategy("image/(jpeg|gif|webp)")] media: String,
    ) {
        let mut table = Table::default();
        table.reset(d);
        table.request_image("alice");

        let upload = Upload::new(&*media, "file://a.jpg");

        assert_eq!(
            table.resolve_image(&upload),
            Err(UnsupportedMedia(media).into())
        );

        assert_eq!(table.pending().map(PendingPiece::owner), Some("alice"));
        assert!(table.roster().is_empty());
    }

    #[proptest]
    fn an_upload_onto_an_occupied_origin_leaves_the_request_open(d: Dimensions) {
        let mut table = Table::default();
        table.reset(d);
        table.declare("alice", Visual::initials("alice"))?;
        table.request_image("bob");

        let upload = Upload::new("image/png", "file://b.png");

        assert_eq!(
            table.resolve_image(&upload),
            Err(SquareOccupied(Square::ORIGIN).into())
        );

        assert_eq!(table.pending().map(PendingPiece::owner), Some("bob"));
        assert_eq!(table.roster().len(), 1);
    }

    #[proptest]
    fn clicking_moves_the_most_recently_added_piece(d: Dimensions, to: Square) {
        prop_assume!(to != Square::ORIGIN && to.row < d.rows() && to.col < d.cols());

        let mut table = Table::default();
        table.reset(d);
        let id = table.declare("alice", Visual::initials("alice"))?.id().clone();

        let piece = table.click(to)?;

        assert_eq!(piece.map(Piece::id), Some(&id));
        assert_eq!(table.roster().at(to).map(Piece::id), Some(&id));
    }

    #[proptest]
    fn clicking_an_empty_board_moves_nothing(d: Dimensions, to: Square) {
        prop_assume!(to.row < d.rows() && to.col < d.cols());

        let mut table = Table::default();
        table.reset(d);

        assert_eq!(table.click(to), Ok(None));
    }

    #[proptest]
    fn clicking_outside_the_board_fails(d: Dimensions, to: Square) {
        prop_assume!(to.row >= d.rows() || to.col >= d.cols());

        let mut table = Table::default();
        table.reset(d);
        table.declare("alice", Visual::initials("alice"))?;

        assert_eq!(table.click(to), Err(MoveError::OffBoard(to)));
    }

    #[proptest]
    fn dragging_an_unknown_piece_fails(d: Dimensions, id: PieceId, to: Square) {
        prop_assume!(to.row < d.rows() && to.col < d.cols());

        let mut table = Table::default();
        table.reset(d);

        assert_eq!(table.drag(&id, to), Err(MoveError::Unknown(id.clone())));
    }

    #[test]
    fn an_empty_table_renders_nothing() {
        assert_eq!(Table::default().to_string(), "");
    }

    #[proptest]
    fn every_cell_of_the_board_is_rendered(d: Dimensions) {
        let mut table = Table::default();
        table.reset(d);

        let rendered = table.to_string();

        assert_eq!(rendered.lines().count(), d.rows() as usize);
        assert!(rendered
            .lines()
            .all(|l| l.matches('|').count() == d.cols() as usize + 1));
    }

    #[test]
    fn table_builders_are_parsed_from_ron() {
        assert_eq!("empty()".parse::<TableBuilder>().ok(), Some(TableBuilder::Empty()));
        assert_eq!("grid(5,5)".parse::<TableBuilder>().ok(), Some(TableBuilder::Grid(5, 5)));
        assert_eq!("chess()".parse::<TableBuilder>().ok(), Some(TableBuilder::Chess()));
        assert!("bogus()".parse::<TableBuilder>().is_err());
    }

    #[proptest]
    fn grid_builders_set_up_an_empty_board(d: Dimensions) {
        let table = TableBuilder::Grid(d.rows(), d.cols()).build().unwrap();
        assert_eq!(table.board().map(Board::dimensions), Some(d));
        assert!(table.roster().is_empty());
    }

    #[proptest]
    fn out_of_range_grid_builders_fail(#[strategy(21..=99u8)] r: u8, d: Dimensions) {
        assert!(TableBuilder::Grid(r, d.cols()).build().is_err());
    }

    #[test]
    fn chess_builders_set_up_the_full_game() {
        let mut expected = Table::default();
        expected.chess();

        assert_eq!(TableBuilder::Chess().build().ok(), Some(expected));
    }
}
