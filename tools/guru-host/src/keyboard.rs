use std::{
    io::{self, IsTerminal, Write},
    time::Duration,
};

use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal,
};
use guru::ExitTrigger;
use tracing::warn;

/// Any key press on the controlling terminal ends the run.
///
/// Holds the terminal in raw mode so keys arrive without Enter.
pub struct KeyPress(());

impl KeyPress {
    /// `None` if stdin isn't a terminal or raw mode can't be set.
    pub fn new() -> Option<Self> {
        if !std::io::stdin().is_terminal() {
            return None;
        }
        match terminal::enable_raw_mode() {
            Ok(()) => Some(Self(())),
            Err(err) => {
                warn!("no keyboard exit, raw mode failed: {}", err);
                None
            }
        }
    }
}

impl ExitTrigger for KeyPress {
    fn exit_requested(&mut self) -> bool {
        while let Ok(true) = event::poll(Duration::ZERO) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => return true,
                Ok(_) => {}
                Err(_) => return false,
            }
        }
        false
    }
}

impl Drop for KeyPress {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Log writer that ends lines with `\r\n`.
///
/// Raw mode turns off the terminal's newline translation, so bare `\n`
/// leaves the cursor in its column.
pub struct CrlfWriter<W> {
    inner: W,
    crlf: bool,
}

impl<W: Write> CrlfWriter<W> {
    pub fn new(inner: W, crlf: bool) -> Self {
        Self { inner, crlf }
    }
}

impl<W: Write> Write for CrlfWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.crlf {
            return self.inner.write(buf);
        }
        for line in buf.split_inclusive(|&b| b == b'\n') {
            match line.strip_suffix(b"\n") {
                Some(body) => {
                    self.inner.write_all(body)?;
                    self.inner.write_all(b"\r\n")?;
                }
                None => self.inner.write_all(line)?,
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Stderr for the log subscriber, translating line ends while a
/// [`KeyPress`] holds raw mode.
pub fn raw_mode_stderr() -> CrlfWriter<io::Stderr> {
    CrlfWriter::new(io::stderr(), terminal::is_raw_mode_enabled().unwrap_or(false))
}
