//! Minimal interactive client for the `connect` subcommand.
//!
//! Prints each server message, then reads one non-empty line from the
//! player and sends it. Stops when a message contains `Goodbye!` or the
//! server closes the connection.

use anyhow::{anyhow, Result};
use log::debug;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::logutil::preview_bytes;

/// Marker the server puts in its final message.
pub const FAREWELL_MARKER: &str = "Goodbye!";

const RECV_BUFFER: usize = 4096;

/// Connect to a running server and play on stdin/stdout.
pub async fn connect(host: &str, port: u16) -> Result<()> {
    let stream = TcpStream::connect((host, port))
        .await
        .map_err(|e| anyhow!("Could not reach {}:{} ({}). Is the server running?", host, port, e))?;
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    play(stream, stdin, tokio::io::stdout()).await
}

/// Client loop over arbitrary streams.
pub async fn play<S, I, O>(mut server: S, mut input: I, mut output: O) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
    I: AsyncBufRead + Unpin,
    O: AsyncWrite + Unpin,
{
    let mut buf = vec![0u8; RECV_BUFFER];
    loop {
        let n = server.read(&mut buf).await?;
        if n == 0 {
            output.write_all(b"Server closed the connection.\n").await?;
            output.flush().await?;
            return Ok(());
        }
        debug!("client received {}", preview_bytes(&buf[..n]));
        let message = String::from_utf8_lossy(&buf[..n]).into_owned();
        output.write_all(message.trim_end().as_bytes()).await?;
        output.write_all(b"\n").await?;

        if message.contains(FAREWELL_MARKER) {
            output.flush().await?;
            return Ok(());
        }

        let line = loop {
            output.write_all(b"> ").await?;
            output.flush().await?;
            let mut line = String::new();
            if input.read_line(&mut line).await? == 0 {
                return Ok(());
            }
            let line = line.trim().to_string();
            if !line.is_empty() {
                break line;
            }
        };
        server.write_all(line.as_bytes()).await?;
        server.flush().await?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn skips_blank_lines_and_stops_at_goodbye() {
        let (client_side, mut server_side) = tokio::io::duplex(1024);
        let input: &[u8] = b"\n   \nquit\n";
        let mut printed = Vec::new();

        let server = tokio::spawn(async move {
            server_side.write_all(b"OK! Welcome!").await.unwrap();
            let mut buf = [0u8; 32];
            let n = server_side.read(&mut buf).await.unwrap();
            assert_eq!(&buf[..n], b"quit");
            server_side.write_all(b"OK! Goodbye!").await.unwrap();
        });

        play(client_side, input, &mut printed).await.unwrap();
        server.await.unwrap();

        let printed = String::from_utf8(printed).unwrap();
        assert!(printed.contains("OK! Welcome!\n"));
        assert!(printed.ends_with("OK! Goodbye!\n"));
    }

    #[tokio::test]
    async fn reports_closed_connection() {
        let (client_side, server_side) = tokio::io::duplex(64);
        drop(server_side);
        let mut printed = Vec::new();
        play(client_side, &b""[..], &mut printed).await.unwrap();
        assert_eq!(printed, b"Server closed the connection.\n");
    }
}
