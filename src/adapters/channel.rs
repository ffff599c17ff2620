//! Blocking framed channel to one peer process.
//!
//! # Frame layout
//!
//! ```text
//! Offset  Size  Description
//! 0       4     Message kind tag (big-endian)
//! 4       4     Payload length (big-endian)
//! 8       N     Payload
//! ```
//!
//! Reads block until a whole frame has arrived or the peer hangs up. There
//! is no timeout; the supervisor owns that policy.

use std::io::{ErrorKind, Read, Write};

use crate::domain::{MessageKind, RawBuffer, FRAME_HEADER_LEN};
use crate::infra::error::ChannelError;

/// Exclusively owned, message-framed endpoint.
pub struct Channel<S: Read + Write> {
    stream: S,
    peer: &'static str,
    max_payload: usize,
}

impl<S: Read + Write> Channel<S> {
    /// Wrap a connected stream. `peer` only labels log lines.
    pub fn new(stream: S, peer: &'static str, max_payload: usize) -> Self {
        Self {
            stream,
            peer,
            max_payload,
        }
    }

    /// Block until one frame of kind `expected` arrives.
    pub fn read_message(&mut self, expected: MessageKind) -> Result<RawBuffer, ChannelError> {
        let mut header = [0u8; FRAME_HEADER_LEN];
        self.read_full(&mut header, expected)?;

        let tag = u32::from_be_bytes([header[0], header[1], header[2], header[3]]);
        let len = u32::from_be_bytes([header[4], header[5], header[6], header[7]]) as usize;

        let found = MessageKind::from_tag(tag).ok_or(ChannelError::UnknownKind(tag))?;
        if found != expected {
            return Err(ChannelError::UnexpectedKind { expected, found });
        }
        if len > self.max_payload {
            return Err(ChannelError::Oversized {
                kind: expected,
                len,
                max: self.max_payload,
            });
        }

        let mut payload = vec![0u8; len];
        self.read_full(&mut payload, expected)?;
        log::debug!("{}: read {expected} ({len} bytes)", self.peer);
        Ok(RawBuffer::new(payload))
    }

    /// Send one frame and flush it.
    pub fn write_message(&mut self, kind: MessageKind, payload: &[u8]) -> Result<(), ChannelError> {
        let len = u32::try_from(payload.len()).map_err(|_| ChannelError::Oversized {
            kind,
            len: payload.len(),
            max: u32::MAX as usize,
        })?;
        let io = |source| ChannelError::Io { kind, source };
        self.stream.write_all(&kind.header(len)).map_err(io)?;
        self.stream.write_all(payload).map_err(io)?;
        self.stream.flush().map_err(io)?;
        log::debug!("{}: wrote {kind} ({len} bytes)", self.peer);
        Ok(())
    }

    /// Send a UTF-8 string payload.
    pub fn write_str(&mut self, kind: MessageKind, value: &str) -> Result<(), ChannelError> {
        self.write_message(kind, value.as_bytes())
    }

    /// Flush and release the endpoint.
    pub fn close(mut self) {
        if let Err(e) = self.stream.flush() {
            log::debug!("{}: flush on close failed: {e}", self.peer);
        }
        log::debug!("{}: channel closed", self.peer);
    }

    fn read_full(&mut self, buf: &mut [u8], kind: MessageKind) -> Result<(), ChannelError> {
        self.stream.read_exact(buf).map_err(|source| {
            if source.kind() == ErrorKind::UnexpectedEof {
                ChannelError::Closed { kind }
            } else {
                ChannelError::Io { kind, source }
            }
        })
    }
}
