use crate::io::{Io, Pipe};
use crate::upload;
use anyhow::Error as Anyhow;
use clap::Parser;
use lib::build::Build;
use lib::game::{PieceId, Square, TableBuilder};
use lib::session::{Effect, Session};
use std::io::ErrorKind::UnexpectedEof;
use std::{future, path::PathBuf};
use tokio::io::{stdin, stdout};
use tracing::{instrument, warn};

/// An interactive table shared with other players.
#[derive(Debug, Default, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Play {
    /// The address of the relay that carries chat between players.
    #[clap(short, long)]
    relay: Option<String>,

    /// The initial table.
    #[clap(short, long, default_value = "empty()")]
    setup: TableBuilder,
}

impl Play {
    #[instrument(level = "trace", skip(self), err)]
    pub async fn execute(self) -> Result<(), Anyhow> {
        let relay = match &self.relay {
            Some(addr) => Some(Pipe::tcp(addr.as_str()).await?),
            None => None,
        };

        let session = Session::new(self.setup.build()?);
        let player = Pipe::new(stdout(), stdin());

        Surface::new(session, player, relay).run().await
    }
}

/// An event the render surface reports out of band.
#[derive(Debug, Clone, Eq, PartialEq)]
enum Directive {
    Click(Square),
    Drop(PieceId, Square),
    Upload(PathBuf),
    Quit,
}

/// Interprets a player line as a [`Directive`].
///
/// Anything that is not a well-formed directive goes through the session
/// like any other line.
fn directive(line: &str) -> Option<Directive> {
    let mut tokens = line.split_whitespace();

    let directive = match tokens.next()? {
        "/quit" => Directive::Quit,

        "/click" => {
            let row = tokens.next()?.parse().ok()?;
            let col = tokens.next()?.parse().ok()?;
            Directive::Click(Square::new(row, col))
        }

        "/drop" => {
            let id = PieceId::new(tokens.next()?);
            let row = tokens.next()?.parse().ok()?;
            let col = tokens.next()?.parse().ok()?;
            Directive::Drop(id, Square::new(row, col))
        }

        "/upload" => Directive::Upload(tokens.next()?.into()),

        _ => return None,
    };

    match tokens.next() {
        None => Some(directive),
        Some(_) => None,
    }
}

enum Event {
    Player(String),
    Relay(String),
    Hangup,
}

/// The line-oriented render surface of a [`Session`].
struct Surface<P: Io, R: Io> {
    session: Session,
    player: P,
    relay: Option<R>,
    cursor: usize,
    shown: String,
}

async fn inbound<R: Io>(relay: &mut Option<R>) -> std::io::Result<String> {
    match relay {
        Some(io) => io.recv().await,
        None => future::pending().await,
    }
}

impl<P: Io, R: Io> Surface<P, R> {
    fn new(session: Session, player: P, relay: Option<R>) -> Self {
        Surface {
            session,
            player,
            relay,
            cursor: 0,
            shown: String::new(),
        }
    }

    async fn run(&mut self) -> Result<(), Anyhow> {
        self.refresh().await?;

        loop {
            let event = tokio::select! {
                line = self.player.recv() => match line {
                    Err(e) if e.kind() == UnexpectedEof => return Ok(()),
                    line => Event::Player(line?),
                },

                line = inbound(&mut self.relay) => match line {
                    Err(e) if e.kind() == UnexpectedEof => Event::Hangup,
                    line => Event::Relay(line?),
                },
            };

            match event {
                Event::Player(line) => {
                    if !self.handle(line.trim()).await? {
                        return Ok(());
                    }
                }

                Event::Relay(line) => self.session.receive(line.trim()),

                Event::Hangup => {
                    warn!("the relay disconnected, chat is no longer shared");
                    self.relay = None;
                }
            }

            self.refresh().await?;
        }
    }

    /// Interprets one player line; returns `false` once the player quits.
    async fn handle(&mut self, line: &str) -> Result<bool, Anyhow> {
        match directive(line) {
            Some(Directive::Quit) => return Ok(false),

            Some(Directive::Click(square)) => {
                let fault = self.session.click(square).err();
                if let Some(e) = fault {
                    self.player.send(&format!("error: {}", e)).await?;
                }
            }

            Some(Directive::Drop(id, square)) => {
                let fault = self.session.drag(&id, square).err();
                if let Some(e) = fault {
                    self.player.send(&format!("error: {}", e)).await?;
                }
            }

            Some(Directive::Upload(path)) => match upload::read(&path).await {
                Err(e) => self.player.send(&format!("error: {:#}", e)).await?,
                Ok(upload) => {
                    let fault = self.session.upload(&upload).err();
                    if let Some(e) = fault {
                        self.player.send(&format!("error: {}", e)).await?;
                    }
                }
            },

            None => match self.session.submit(line) {
                Err(e) => self.player.send(&format!("error: {}", e)).await?,

                Ok(Effect::None) => {}

                Ok(Effect::AwaitUpload(name)) => {
                    let prompt = format!("upload a PNG image for `{}`", name);
                    self.player.send(&prompt).await?;
                }

                Ok(Effect::Relay(message)) => {
                    if let Some(io) = &mut self.relay {
                        io.send(&message).await?;
                        io.flush().await?;
                    }
                }
            },
        }

        Ok(true)
    }

    /// Shows the player what changed since the last event.
    async fn refresh(&mut self) -> Result<(), Anyhow> {
        let news: Vec<String> = self
            .session
            .transcript()
            .iter()
            .skip(self.cursor)
            .map(String::from)
            .collect();

        for line in news {
            self.player.send(&line).await?;
            self.cursor += 1;
        }

        let board = self.session.table().to_string();
        if board != self.shown {
            if !board.is_empty() {
                self.player.send(board.trim_end()).await?;
            }

            self.shown = board;
        }

        self.player.flush().await?;
        Ok(())
    }
}
