/// Runtime configuration plumbing.
pub mod build;
/// The slash-command parser.
pub mod command;
/// Board, piece, and placement domain types.
pub mod game;
/// The command interpreter driving a shared table.
pub mod session;
/// The append-only message log.
pub mod transcript;
