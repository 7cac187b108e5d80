//! Inline line editor shown in the status bar.
//!
//! A [Prompt] collects one line of input from decoded [Key]s. Multi-byte UTF-8 characters
//! arrive one byte per key and are reassembled before they reach the buffer.

use crate::core::input::Key;

use std::path::PathBuf;

const BACKSPACE: u8 = 0x7F;
const CTRL_H: u8 = 0x08;

/// What the submitted text is used for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PromptKind {
    GoToPath,
    Filter,
    Search,
    GoToLine,
    /// Single key y/N confirmation.
    ConfirmDelete {
        target: PathBuf,
        name: String,
        is_dir: bool,
    },
}

/// Result of feeding one key to a [Prompt].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PromptEvent {
    Pending,
    Submit(String),
    Cancel,
}

#[derive(Debug, Clone)]
pub(crate) struct Prompt {
    kind: PromptKind,
    label: String,
    buffer: String,
    utf8: Vec<u8>,
}

impl Prompt {
    pub(crate) fn new(kind: PromptKind) -> Self {
        let label = match &kind {
            PromptKind::GoToPath => " Go to path: ".to_string(),
            PromptKind::Filter | PromptKind::Search => " Search: ".to_string(),
            PromptKind::GoToLine => " Go to line: ".to_string(),
            PromptKind::ConfirmDelete { name, .. } => format!(" Delete {}? (y/N) ", name),
        };
        Self {
            kind,
            label,
            buffer: String::new(),
            utf8: Vec::with_capacity(4),
        }
    }

    #[inline]
    pub(crate) fn kind(&self) -> &PromptKind {
        &self.kind
    }

    #[inline]
    pub(crate) fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub(crate) fn buffer(&self) -> &str {
        &self.buffer
    }

    pub(crate) fn feed(&mut self, key: &Key) -> PromptEvent {
        if matches!(self.kind, PromptKind::ConfirmDelete { .. }) {
            return match key {
                Key::Byte(b) => PromptEvent::Submit(char::from(*b).to_string()),
                Key::Timeout => PromptEvent::Pending,
                _ => PromptEvent::Cancel,
            };
        }

        match key {
            Key::Escape => PromptEvent::Cancel,
            Key::Byte(b'\r' | b'\n') => PromptEvent::Submit(self.buffer.trim().to_string()),
            Key::Byte(BACKSPACE | CTRL_H) => {
                self.utf8.clear();
                self.buffer.pop();
                PromptEvent::Pending
            }
            Key::Byte(b) if b.is_ascii() => {
                self.utf8.clear();
                if !b.is_ascii_control() {
                    self.buffer.push(char::from(*b));
                }
                PromptEvent::Pending
            }
            Key::Byte(b) => {
                self.push_utf8(*b);
                PromptEvent::Pending
            }
            _ => PromptEvent::Pending,
        }
    }

    fn push_utf8(&mut self, byte: u8) {
        self.utf8.push(byte);
        match std::str::from_utf8(&self.utf8) {
            Ok(s) => {
                self.buffer.push_str(s);
                self.utf8.clear();
            }
            // incomplete sequence, wait for more bytes
            Err(e) if e.error_len().is_none() && self.utf8.len() < 4 => {}
            Err(_) => self.utf8.clear(),
        }
    }
}
