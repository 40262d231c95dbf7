use std::io::{self, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

pub trait Clipboard {
    fn copy(&mut self, text: &str) -> io::Result<()>;
}

/// Sets the system clipboard through the terminal's OSC 52 escape sequence.
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn copy(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "\x1b]52;c;{}\x07", STANDARD.encode(text))?;
        self.out.flush()
    }
}
