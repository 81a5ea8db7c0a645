use crate::command::{Appearance, Command, ParseCommandError};
use crate::game::{MoveError, Piece, PieceId, ResolveError, Square, SquareOccupied};
use crate::game::{Table, Upload, Visual};
use crate::transcript::Transcript;
use derive_more::{Display, Error, From};
use tracing::instrument;

/// What the caller must do after a player event has been handled.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Effect {
    /// Nothing further.
    None,
    /// Forward this chat line to the other players.
    Relay(String),
    /// Ask the player for a PNG image for the named piece.
    AwaitUpload(String),
}

/// The reason why a player event was rejected.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum Fault {
    #[display(fmt = "{}", _0)]
    Parse(ParseCommandError),
    #[display(fmt = "{}", _0)]
    Occupied(SquareOccupied),
    #[display(fmt = "{}", _0)]
    Move(MoveError),
    #[display(fmt = "{}", _0)]
    Upload(ResolveError),
}

/// Funnels every player event through the parser and onto the table.
///
/// Every handler either fully succeeds or leaves both the table and the
/// transcript untouched.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct Session {
    table: Table,
    transcript: Transcript,
}

impl Session {
    /// Constructs a [`Session`] around an initial table.
    pub fn new(table: Table) -> Self {
        Session {
            table,
            transcript: Transcript::default(),
        }
    }

    /// The shared game state.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// The log of chat lines and notices.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Interprets a line typed by the player.
    ///
    /// Whitespace-only lines are ignored; commands mutate the table and
    /// append their notices; anything else is logged once and handed back
    /// for relaying.
    #[instrument(level = "debug", skip(self), err)]
    pub fn submit(&mut self, raw: &str) -> Result<Effect, Fault> {
        let line = raw.trim();

        if line.is_empty() {
            return Ok(Effect::None);
        }

        match line.parse()? {
            Command::Table(dimensions) => {
                self.table.reset(dimensions);
                self.transcript.append(format!("board size set to {}", dimensions));
                Ok(Effect::None)
            }

            Command::Chess => {
                self.table.chess();
                self.transcript.append("chessboard created");
                Ok(Effect::None)
            }

            Command::Piece(name, Appearance::Upload) => {
                self.table.request_image(&name);
                Ok(Effect::AwaitUpload(name))
            }

            Command::Piece(name, appearance) => {
                let visual = match appearance {
                    Appearance::File(file) => Visual::file(&file),
                    _ => Visual::initials(&name),
                };

                self.table.declare(&name, visual)?;
                Ok(Effect::None)
            }

            Command::Chat(message) => {
                self.transcript.append(message.clone());
                Ok(Effect::Relay(message))
            }
        }
    }

    /// Logs a chat line received from the other players.
    #[instrument(level = "debug", skip(self))]
    pub fn receive(&mut self, line: &str) {
        self.transcript.append(line);
    }

    /// Moves the most recently added piece to the clicked square.
    pub fn click(&mut self, square: Square) -> Result<Option<&Piece>, Fault> {
        Ok(self.table.click(square)?)
    }

    /// Moves the identified piece to the square it was dropped on.
    pub fn drag(&mut self, id: &PieceId, to: Square) -> Result<&Piece, Fault> {
        Ok(self.table.drag(id, to)?)
    }

    /// Resolves the outstanding image request with an uploaded image.
    pub fn upload(&mut self, upload: &Upload) -> Result<&Piece, Fault> {
        Ok(self.table.resolve_image(upload)?)
    }
}
