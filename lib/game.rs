mod board;
mod chess;
mod dimensions;
mod piece;
mod roster;
mod square;
mod table;
mod upload;

pub use board::*;
pub use dimensions::*;
pub use piece::*;
pub use roster::*;
pub use square::*;
pub use table::*;
pub use upload::*;
