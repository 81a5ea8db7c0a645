use derive_more::{Display, Error};
use std::str::FromStr;
use test_strategy::Arbitrary;

/// The size of a [`Board`][super::Board].
///
/// This type guarantees that it only holds sizes between 1x1 and 20x20.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
#[display(fmt = "{}x{}", rows, cols)]
pub struct Dimensions {
    #[strategy(1..=Dimensions::MAX)]
    rows: u8,
    #[strategy(1..=Dimensions::MAX)]
    cols: u8,
}

/// The reason why a board size is not allowed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum InvalidDimensions {
    #[display(fmt = "the board must have at least one row and one column")]
    TooSmall,
    #[display(fmt = "the maximum board size is {0}x{0}", "Dimensions::MAX")]
    TooLarge,
}

impl Dimensions {
    /// The largest number of rows or columns allowed.
    pub const MAX: u8 = 20;

    /// The size of a standard chess board.
    pub const CHESS: Self = Dimensions { rows: 8, cols: 8 };

    /// Constructs [`Dimensions`] if the size is within bounds.
    pub fn new(rows: u8, cols: u8) -> Result<Self, InvalidDimensions> {
        if rows < 1 || cols < 1 {
            Err(InvalidDimensions::TooSmall)
        } else if rows > Self::MAX || cols > Self::MAX {
            Err(InvalidDimensions::TooLarge)
        } else {
            Ok(Dimensions { rows, cols })
        }
    }

    /// The number of rows.
    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// The number of columns.
    pub fn cols(&self) -> u8 {
        self.cols
    }
}

/// The reason why parsing [`Dimensions`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Hash, Error)]
pub enum ParseDimensionsError {
    #[display(fmt = "failed to parse dimensions, expected `<rows>x<cols>`")]
    Malformed,
    #[display(fmt = "{}", _0)]
    Invalid(InvalidDimensions),
}

impl From<InvalidDimensions> for ParseDimensionsError {
    fn from(e: InvalidDimensions) -> Self {
        ParseDimensionsError::Invalid(e)
    }
}

impl FromStr for Dimensions {
    type Err = ParseDimensionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use ParseDimensionsError::Malformed;

        let (rows, cols) = s
            .split_once(|c| c == 'x' || c == 'X')
            .ok_or(Malformed)?;

        for side in [rows, cols] {
            if side.is_empty() || side.len() > 2 || !side.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Malformed);
            }
        }

        let rows = rows.parse().map_err(|_| Malformed)?;
        let cols = cols.parse().map_err(|_| Malformed)?;

        Ok(Dimensions::new(rows, cols)?)
    }
}
