//! Raw terminal input decoding for dualpane.
//!
//! Turns the byte stream coming from the terminal into one logical [Key] per call.
//! Escape sequences (arrows, paging keys) are told apart from a lone Esc press by a small
//! state machine: `Idle -> GotEsc -> ReadingSeq`.
//!
//! Input is read through the [ByteSource] trait so the decoder can be driven by the real
//! terminal ([StdinSource]) as well as by canned bytes ([ScriptedSource]).

use crossbeam_channel::{Receiver, RecvTimeoutError, unbounded};
use phf::phf_map;

use std::collections::VecDeque;
use std::io::{self, Read};
use std::thread;
use std::time::Duration;

const ESC: u8 = 0x1B;
const CSI: u8 = b'[';

/// Longest CSI body kept; the rest of a longer sequence is dropped and it surfaces as unknown.
pub const MAX_SEQUENCE_LEN: usize = 16;

/// One logical key event.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// A single printable or control byte.
    Byte(u8),
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
    /// Esc pressed on its own.
    Escape,
    /// Nothing arrived within the poll window.
    Timeout,
    /// An escape sequence not in the lookup table, raw bytes included.
    Unknown(Vec<u8>),
}

impl Key {
    /// Ctrl+letter as a byte key, e.g. `Key::ctrl(b'u')` for 0x15.
    #[inline]
    pub fn ctrl(letter: u8) -> Self {
        Key::Byte(letter.to_ascii_lowercase() & 0x1F)
    }
}

/// Known CSI bodies (the bytes after `ESC [`).
static SEQUENCES: phf::Map<&'static str, Key> = phf_map! {
    "A" => Key::Up,
    "B" => Key::Down,
    "C" => Key::Right,
    "D" => Key::Left,
    "5~" => Key::PageUp,
    "6~" => Key::PageDown,
    "H" => Key::Home,
    "1~" => Key::Home,
    "7~" => Key::Home,
    "F" => Key::End,
    "4~" => Key::End,
    "8~" => Key::End,
};

/// Maps a complete CSI body to its key, or [Key::Unknown] carrying the full raw sequence.
pub fn lookup_sequence(body: &[u8]) -> Key {
    std::str::from_utf8(body)
        .ok()
        .and_then(|s| SEQUENCES.get(s))
        .cloned()
        .unwrap_or_else(|| unknown(body))
}

/// A byte oriented input source.
pub trait ByteSource {
    /// Waits at most `timeout` for a byte. `Ok(None)` means the wait timed out.
    fn poll_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>>;

    /// Reads the continuation byte of an escape sequence. `Ok(None)` means none is available.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;
}

/// Terminal input: a reader thread pumps stdin into a channel.
///
/// Continuation reads wait at most `escape_timeout`, so a lone Esc on a live terminal
/// resolves to [Key::Escape] instead of blocking until the next key press.
#[derive(Debug)]
pub struct StdinSource {
    rx: Receiver<u8>,
    escape_timeout: Duration,
}

impl StdinSource {
    pub fn spawn(escape_timeout: Duration) -> Self {
        let (tx, rx) = unbounded::<u8>();

        thread::spawn(move || {
            let mut stdin = io::stdin().lock();
            let mut buf = [0u8; 64];
            loop {
                match stdin.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => {
                        if buf[..n].iter().any(|b| tx.send(*b).is_err()) {
                            break;
                        }
                    }
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => {
                        log::error!("stdin reader stopped: {}", e);
                        break;
                    }
                }
            }
        });

        Self { rx, escape_timeout }
    }

    fn recv(&self, timeout: Duration) -> io::Result<Option<u8>> {
        match self.rx.recv_timeout(timeout) {
            Ok(b) => Ok(Some(b)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "terminal input closed",
            )),
        }
    }
}

impl ByteSource for StdinSource {
    fn poll_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>> {
        self.recv(timeout)
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        self.recv(self.escape_timeout)
    }
}

/// Replays a fixed byte sequence. Once drained every read returns `None`.
#[derive(Debug, Default, Clone)]
pub struct ScriptedSource {
    bytes: VecDeque<u8>,
}

impl ScriptedSource {
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.iter().copied().collect(),
        }
    }

    pub fn push(&mut self, bytes: &[u8]) {
        self.bytes.extend(bytes);
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl ByteSource for ScriptedSource {
    fn poll_byte(&mut self, _timeout: Duration) -> io::Result<Option<u8>> {
        Ok(self.bytes.pop_front())
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.bytes.pop_front())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DecodeState {
    Idle,
    GotEsc,
    ReadingSeq(Vec<u8>),
}

/// Turns bytes from a [ByteSource] into [Key]s.
///
/// A byte read after a lone Esc is kept and returned by the next call, so nothing typed
/// right after Esc is lost.
#[derive(Debug)]
pub struct KeyDecoder<S> {
    source: S,
    pending: Option<u8>,
}

impl<S: ByteSource> KeyDecoder<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            pending: None,
        }
    }

    #[inline]
    pub fn source(&self) -> &S {
        &self.source
    }

    #[inline]
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Produces exactly one key, or [Key::Timeout] when nothing arrived within `timeout`.
    pub fn next_key(&mut self, timeout: Duration) -> io::Result<Key> {
        let mut state = DecodeState::Idle;
        loop {
            state = match state {
                DecodeState::Idle => {
                    let byte = match self.pending.take() {
                        Some(b) => b,
                        None => match self.source.poll_byte(timeout)? {
                            Some(b) => b,
                            None => return Ok(Key::Timeout),
                        },
                    };
                    if byte != ESC {
                        return Ok(Key::Byte(byte));
                    }
                    DecodeState::GotEsc
                }
                DecodeState::GotEsc => match self.source.read_byte()? {
                    Some(CSI) => DecodeState::ReadingSeq(Vec::with_capacity(4)),
                    Some(other) => {
                        self.pending = Some(other);
                        return Ok(Key::Escape);
                    }
                    None => return Ok(Key::Escape),
                },
                DecodeState::ReadingSeq(mut body) => match self.source.read_byte()? {
                    Some(b) => {
                        body.push(b);
                        if is_final(b) {
                            return Ok(lookup_sequence(&body));
                        }
                        if body.len() >= MAX_SEQUENCE_LEN {
                            self.discard_sequence()?;
                            return Ok(unknown(&body));
                        }
                        DecodeState::ReadingSeq(body)
                    }
                    None => return Ok(unknown(&body)),
                },
            };
        }
    }

    /// Drops the rest of an overlong sequence up to and including its final byte.
    fn discard_sequence(&mut self) -> io::Result<()> {
        while let Some(b) = self.source.read_byte()? {
            if is_final(b) {
                break;
            }
        }
        Ok(())
    }
}

#[inline]
fn is_final(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'~'
}

fn unknown(body: &[u8]) -> Key {
    let mut raw = vec![ESC, CSI];
    raw.extend_from_slice(body);
    Key::Unknown(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(bytes: &[u8]) -> Vec<Key> {
        let mut decoder = KeyDecoder::new(ScriptedSource::new(bytes));
        let mut keys = Vec::new();
        loop {
            match decoder.next_key(Duration::ZERO) {
                Ok(Key::Timeout) | Err(_) => break,
                Ok(key) => keys.push(key),
            }
        }
        keys
    }

    #[test]
    fn arrows_and_paging() {
        assert_eq!(decode_all(b"\x1b[A"), vec![Key::Up]);
        assert_eq!(
            decode_all(b"\x1b[B\x1b[C\x1b[D"),
            vec![Key::Down, Key::Right, Key::Left]
        );
        assert_eq!(
            decode_all(b"\x1b[5~\x1b[6~\x1b[H\x1b[1~\x1b[F\x1b[4~"),
            vec![
                Key::PageUp,
                Key::PageDown,
                Key::Home,
                Key::Home,
                Key::End,
                Key::End
            ]
        );
    }

    #[test]
    fn lone_escape() {
        assert_eq!(decode_all(b"\x1b"), vec![Key::Escape]);
    }

    #[test]
    fn escape_keeps_following_byte() {
        assert_eq!(decode_all(b"\x1bq"), vec![Key::Escape, Key::Byte(b'q')]);
        assert_eq!(decode_all(b"\x1b\x1b"), vec![Key::Escape, Key::Escape]);
        assert_eq!(decode_all(b"\x1b\x1b[A"), vec![Key::Escape, Key::Up]);
    }

    #[test]
    fn plain_bytes() {
        assert_eq!(
            decode_all(b"jk\t\r\x7f"),
            vec![
                Key::Byte(b'j'),
                Key::Byte(b'k'),
                Key::Byte(b'\t'),
                Key::Byte(b'\r'),
                Key::Byte(0x7F)
            ]
        );
    }

    #[test]
    fn unknown_sequences_surface_raw_bytes() {
        assert_eq!(
            decode_all(b"\x1b[2~x"),
            vec![Key::Unknown(b"\x1b[2~".to_vec()), Key::Byte(b'x')]
        );
        assert_eq!(
            decode_all(b"\x1b[1;5A"),
            vec![Key::Unknown(b"\x1b[1;5A".to_vec())]
        );
        // truncated mid-sequence
        assert_eq!(decode_all(b"\x1b[12"), vec![Key::Unknown(b"\x1b[12".to_vec())]);
    }

    #[test]
    fn overlong_sequence_is_cut() {
        let mut bytes = b"\x1b[".to_vec();
        bytes.extend(std::iter::repeat_n(b'1', MAX_SEQUENCE_LEN + 4));
        let keys = decode_all(&bytes);
        assert_eq!(keys.len(), 1);
        match &keys[0] {
            Key::Unknown(raw) => assert_eq!(raw.len(), MAX_SEQUENCE_LEN + 2),
            other => panic!("expected unknown sequence, got {:?}", other),
        }
    }

    #[test]
    fn overlong_sequence_is_dropped_up_to_final_byte() {
        let mut bytes = b"\x1b[".to_vec();
        bytes.extend(std::iter::repeat_n(b'1', MAX_SEQUENCE_LEN));
        bytes.extend_from_slice(b";5qj");

        let mut raw = b"\x1b[".to_vec();
        raw.extend(std::iter::repeat_n(b'1', MAX_SEQUENCE_LEN));
        assert_eq!(decode_all(&bytes), vec![Key::Unknown(raw), Key::Byte(b'j')]);
    }

    #[test]
    fn timeout_without_input() -> io::Result<()> {
        let mut decoder = KeyDecoder::new(ScriptedSource::default());
        assert_eq!(decoder.next_key(Duration::from_millis(1))?, Key::Timeout);
        decoder.source_mut().push(b"a");
        assert_eq!(decoder.next_key(Duration::from_millis(1))?, Key::Byte(b'a'));
        assert!(decoder.source().is_empty());
        Ok(())
    }

    #[test]
    fn ctrl_keys() {
        assert_eq!(Key::ctrl(b'u'), Key::Byte(0x15));
        assert_eq!(Key::ctrl(b'D'), Key::Byte(0x04));
    }
}
