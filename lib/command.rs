use crate::game::{Dimensions, InvalidDimensions, ParseDimensionsError};
use derive_more::{Display, Error};
use std::str::FromStr;

/// How a declared piece should be drawn.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Appearance {
    /// The player will upload a PNG image.
    Upload,
    /// A PNG file in the shared uploads area.
    File(String),
    /// The piece's name, abbreviated.
    Initials,
}

/// A line of player input, classified.
///
/// Only the lower-case prefixes `/table` and `/piece` and the exact string
/// `/chess` are commands; everything else is chat.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Command {
    /// `/table <rows>x<cols>` — start over with an empty board.
    Table(Dimensions),
    /// `/piece <name> <appearance>` — declare a piece on the origin square.
    Piece(String, Appearance),
    /// `/chess` — the standard chess setup.
    Chess,
    /// A chat line, relayed verbatim.
    Chat(String),
}

/// The reason why a line could not be interpreted.
#[derive(Debug, Display, Clone, Eq, PartialEq, Hash, Error)]
pub enum ParseCommandError {
    #[display(fmt = "invalid command, usage: `/table <rows>x<cols>` (e.g. `/table 5x5`)")]
    TableUsage,
    #[display(fmt = "invalid command, usage: `/piece <name> <png|name|file.png>`")]
    PieceUsage,
    #[display(fmt = "invalid appearance `{}`, only PNG or 'name' is supported", _0)]
    Appearance(#[error(not(source))] String),
    #[display(fmt = "{}", _0)]
    Dimensions(InvalidDimensions),
    #[display(fmt = "cannot interpret an empty line")]
    Empty,
}

impl From<InvalidDimensions> for ParseCommandError {
    fn from(e: InvalidDimensions) -> Self {
        ParseCommandError::Dimensions(e)
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();

        if let Some(args) = line.strip_prefix("/table") {
            if !args.starts_with(char::is_whitespace) {
                return Err(ParseCommandError::TableUsage);
            }

            return match args.trim().parse() {
                Ok(dimensions) => Ok(Command::Table(dimensions)),
                Err(ParseDimensionsError::Malformed) => Err(ParseCommandError::TableUsage),
                Err(ParseDimensionsError::Invalid(e)) => Err(e.into()),
            };
        }

        if let Some(args) = line.strip_prefix("/piece") {
            if !args.starts_with(char::is_whitespace) {
                return Err(ParseCommandError::PieceUsage);
            }

            let mut tokens = args.split_whitespace();
            let (name, appearance) = match (tokens.next(), tokens.next(), tokens.next()) {
                (Some(name), Some(appearance), None) => (name, appearance),
                _ => return Err(ParseCommandError::PieceUsage),
            };

            if !name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
                return Err(ParseCommandError::PieceUsage);
            }

            let appearance = if appearance == "png" {
                Appearance::Upload
            } else if appearance.ends_with(".png") {
                Appearance::File(appearance.to_string())
            } else if appearance == "name" {
                Appearance::Initials
            } else {
                return Err(ParseCommandError::Appearance(appearance.to_string()));
            };

            return Ok(Command::Piece(name.to_string(), appearance));
        }

        if line == "/chess" {
            Ok(Command::Chess)
        } else if line.is_empty() {
            Err(ParseCommandError::Empty)
        } else {
            Ok(Command::Chat(line.to_string()))
        }
    }
}
