//! # GSH01 Request/Response Client
//!
//! Sends encoded commands over a byte channel supplied by the caller and
//! reads back one reply frame per request. The channel is any tokio
//! `AsyncRead + AsyncWrite` stream, e.g. a serial port wrapper that already
//! handles link framing and CRC.
//!
//! The bus is half duplex: `request` takes `&mut self`, so only one command
//! is ever outstanding. Timeouts and retries belong to the channel.

use crate::constants::GSH01_HEADER_LEN;
use crate::error::Gsh01Error;
use crate::gsh01::command::Command;
use crate::gsh01::frame::{decode_frame, encode, Gsh01Frame};
use crate::gsh01::status_word::StatusWord;
use crate::logging::{log_debug, log_frame_hex, log_warn};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

pub struct Gsh01Client<P> {
    port: P,
}

impl<P: AsyncRead + AsyncWrite + Unpin + Send> Gsh01Client<P> {
    pub fn new(port: P) -> Self {
        Gsh01Client { port }
    }

    /// Gives back the underlying channel.
    pub fn into_inner(self) -> P {
        self.port
    }

    /// Writes the request frame of `command`.
    pub async fn send_command(&mut self, command: &Command) -> Result<(), Gsh01Error> {
        let frame = encode(command);
        log_frame_hex(&format!("TX {}", command.kind()), &frame);
        self.port.write_all(&frame).await?;
        self.port.flush().await?;
        Ok(())
    }

    /// Reads one frame: the header first, then as many bytes as it declares.
    pub async fn recv_frame(&mut self) -> Result<Gsh01Frame, Gsh01Error> {
        let mut buf = vec![0u8; GSH01_HEADER_LEN];
        self.port.read_exact(&mut buf).await?;

        let declared = u16::from_le_bytes([buf[2], buf[3]]);
        if usize::from(declared) < GSH01_HEADER_LEN {
            return Err(Gsh01Error::InvalidDeclaredLength(declared));
        }
        buf.resize(usize::from(declared), 0);
        self.port.read_exact(&mut buf[GSH01_HEADER_LEN..]).await?;

        log_frame_hex("RX", &buf);
        decode_frame(&buf)
    }

    /// Sends `command` and returns the meter's reply.
    ///
    /// Fails if the reply belongs to another command or carries a non-OK status.
    pub async fn request(&mut self, command: &Command) -> Result<Gsh01Frame, Gsh01Error> {
        self.send_command(command).await?;
        let reply = self.recv_frame().await?;

        if reply.command_type != command.kind().code() {
            return Err(Gsh01Error::ResponseMismatch {
                expected: command.kind().to_string(),
                received: reply.command_type,
            });
        }
        if !reply.is_ok() {
            log_warn(&format!(
                "{} rejected with status 0x{:02X}",
                command.kind(),
                reply.status.code()
            ));
            return Err(Gsh01Error::CommandRejected {
                kind: command.kind().to_string(),
                status: reply.status.code(),
            });
        }
        log_debug(&format!("{} ok, {} payload bytes", command.kind(), reply.payload.len()));
        Ok(reply)
    }

    /// Reads and decodes the status word.
    pub async fn read_status_word(&mut self) -> Result<StatusWord, Gsh01Error> {
        let reply = self.request(&Command::get_status_word()).await?;
        let word = reply.status_word()?;
        word.log_conditions();
        Ok(word)
    }

    /// Reads a text reply such as a version string or the device type.
    pub async fn read_text(&mut self, command: &Command) -> Result<String, Gsh01Error> {
        Ok(self.request(command).await?.text())
    }
}
