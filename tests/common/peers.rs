//! Scripted in-memory peer endpoints.

use std::cell::RefCell;
use std::io::{self, Cursor, Read, Write};
use std::rc::Rc;

use certproc::MessageKind;

/// Everything the worker did to one scripted endpoint.
#[derive(Default)]
pub struct Transcript {
    pub written: Vec<u8>,
    pub bytes_read: usize,
}

/// Endpoint whose inbound bytes are fixed up front.
pub struct ScriptedPeer {
    inbound: Cursor<Vec<u8>>,
    transcript: Rc<RefCell<Transcript>>,
}

impl ScriptedPeer {
    pub fn new(inbound: Vec<u8>) -> (Self, Rc<RefCell<Transcript>>) {
        let transcript = Rc::new(RefCell::new(Transcript::default()));
        let peer = Self {
            inbound: Cursor::new(inbound),
            transcript: Rc::clone(&transcript),
        };
        (peer, transcript)
    }
}

impl Read for ScriptedPeer {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inbound.read(buf)?;
        self.transcript.borrow_mut().bytes_read += n;
        Ok(n)
    }
}

impl Write for ScriptedPeer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.transcript.borrow_mut().written.extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Encode one frame the way a peer would send it.
pub fn frame(kind: MessageKind, payload: &[u8]) -> Vec<u8> {
    let mut bytes = kind.header(payload.len() as u32).to_vec();
    bytes.extend_from_slice(payload);
    bytes
}

/// Split a byte stream back into `(kind, payload)` frames.
pub fn parse_frames(mut bytes: &[u8]) -> Vec<(MessageKind, Vec<u8>)> {
    let mut frames = Vec::new();
    while !bytes.is_empty() {
        let tag = u32::from_be_bytes(bytes[..4].try_into().unwrap());
        let len = u32::from_be_bytes(bytes[4..8].try_into().unwrap()) as usize;
        let kind = MessageKind::from_tag(tag).expect("known tag");
        frames.push((kind, bytes[8..8 + len].to_vec()));
        bytes = &bytes[8 + len..];
    }
    frames
}
