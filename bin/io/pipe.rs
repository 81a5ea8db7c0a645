use super::Io;
use async_trait::async_trait;
use std::io;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpStream, ToSocketAddrs};
use tracing::instrument;

/// A line-delimited [`Io`] interface.
#[derive(Debug)]
pub struct Pipe<W: AsyncWrite, R: AsyncRead> {
    writer: W,
    reader: Lines<BufReader<R>>,
}

impl<W: AsyncWrite, R: AsyncRead> Pipe<W, R> {
    pub fn new(writer: W, reader: R) -> Self {
        Pipe {
            writer,
            reader: BufReader::new(reader).lines(),
        }
    }
}

impl<W: AsyncWrite, R: AsyncRead> From<(W, R)> for Pipe<W, R> {
    fn from((writer, reader): (W, R)) -> Self {
        Pipe::new(writer, reader)
    }
}

impl Pipe<OwnedWriteHalf, OwnedReadHalf> {
    /// Connects to a relay listening at the given address.
    #[instrument(level = "debug", skip(addr), err)]
    pub async fn tcp<A: ToSocketAddrs>(addr: A) -> io::Result<Self> {
        let (reader, writer) = TcpStream::connect(addr).await?.into_split();
        Ok(Pipe::new(writer, reader))
    }
}

#[async_trait]
impl<W: AsyncWrite + Send + Unpin, R: AsyncRead + Send + Unpin> Io for Pipe<W, R> {
    #[instrument(level = "trace", skip(self), ret, err)]
    async fn recv(&mut self) -> io::Result<String> {
        use io::ErrorKind::UnexpectedEof;
        Ok(self.reader.next_line().await?.ok_or(UnexpectedEof)?)
    }

    #[instrument(level = "trace", skip(self), err)]
    async fn send(&mut self, msg: &str) -> io::Result<()> {
        self.writer.write_all(msg.as_bytes()).await?;
        self.writer.write_u8(b'\n').await?;
        Ok(())
    }

    #[instrument(level = "trace", skip(self), err)]
    async fn flush(&mut self) -> io::Result<()> {
        self.writer.flush().await?;
        Ok(())
    }
}
