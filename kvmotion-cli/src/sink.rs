//! Console implementations of the loop's operator-facing seams.
//!
//! The original recorder flashed a fullscreen window white and beeped the
//! sound card; in a terminal the equivalents are a styled marker line and
//! the bell character. Both are best-effort: a failed write to the
//! terminal never disturbs the recording loop.

use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use console::{style, Term};

use kvmotion::{MarkButton, SignalSink};

/// Sync sink that writes to the terminal.
pub struct ConsoleSink {
    term: Term,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalSink for ConsoleSink {
    fn set_visual_state(&mut self, marked: bool) {
        // A scrolling console has nothing to revert; only the marked
        // transition is rendered.
        if marked {
            let _ = self
                .term
                .write_line(&style("  ▌ SYNC MARK ▐").bold().reverse().to_string());
        }
    }

    fn emit_tone(&mut self) {
        let _ = self.term.write_str("\x07");
    }
}

/// Mark button driven by the ENTER key.
///
/// A plain terminal cannot report key-down state, so a background thread
/// reads stdin lines into a channel and each received line counts as the
/// button being down for exactly one tick - every press yields one pulse
/// and an immediate release on the next tick. The thread is CLI glue; the
/// recording loop itself stays single-threaded.
pub struct EnterMarkButton {
    lines: Receiver<()>,
}

impl EnterMarkButton {
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                if line.is_err() || tx.send(()).is_err() {
                    break;
                }
            }
        });
        Self { lines: rx }
    }
}

impl MarkButton for EnterMarkButton {
    fn is_down(&mut self) -> bool {
        let mut down = false;
        loop {
            match self.lines.try_recv() {
                Ok(()) => down = true,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        down
    }
}
