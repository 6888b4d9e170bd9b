//! Loading the text to scan.

use std::fs;
use std::io::Read;
use std::path::Path;

use crate::error::{LexError, LexResult};

/// The full text of one input, read up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    name: String,
    text: String,
}

impl Source {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Reads `reader` to exhaustion. Non-UTF-8 input is a read failure.
    pub fn read<R: Read>(name: impl Into<String>, mut reader: R) -> LexResult<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text).map_err(LexError::InputRead)?;
        Ok(Self::new(name, text))
    }

    pub fn open<P: AsRef<Path>>(path: P) -> LexResult<Self> {
        let path = path.as_ref();
        log::debug!("Reading {}", path.display());
        let text = fs::read_to_string(path).map_err(LexError::InputRead)?;
        Ok(Self::new(path.display().to_string(), text))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
