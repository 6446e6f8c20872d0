//! Background progress indicator
//!
//! A worker thread redraws a spinner line every `interval` until its stop
//! flag is set, then clears the line. Output shares a locked writer with the
//! reporter so whole lines never interleave with spinner frames.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};

use crate::ui::widgets::spinner::Spinner;

pub const SPIN_INTERVAL: Duration = Duration::from_millis(200);
pub const STOP_GRACE: Duration = Duration::from_secs(1);

/// Output stream shared between the spinner thread and line printers.
pub type SharedWriter<W> = Arc<Mutex<W>>;

/// Erase the current terminal line and return the cursor to column 0.
pub fn clear_line(out: &mut impl Write) -> std::io::Result<()> {
    queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine))
}

/// Handle to a running spinner thread
pub struct Indicator {
    stop: Arc<AtomicBool>,
    finished: mpsc::Receiver<()>,
    handle: JoinHandle<()>,
}

impl Indicator {
    pub fn start<W: Write + Send + 'static>(
        out: SharedWriter<W>,
        message: impl Into<String>,
        unicode: bool,
        interval: Duration,
    ) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let (tx, finished) = mpsc::channel();
        let mut spinner = Spinner::new(unicode, message);

        let flag = stop.clone();
        let handle = thread::spawn(move || {
            while !flag.load(Ordering::SeqCst) {
                {
                    let mut w = out.lock().unwrap_or_else(PoisonError::into_inner);
                    let _ = clear_line(&mut *w);
                    let _ = write!(w, "{}", spinner.render());
                    let _ = w.flush();
                }
                spinner.advance();
                thread::sleep(interval);
            }

            let mut w = out.lock().unwrap_or_else(PoisonError::into_inner);
            let _ = clear_line(&mut *w);
            let _ = w.flush();
            drop(w);
            let _ = tx.send(());
        });

        Self {
            stop,
            finished,
            handle,
        }
    }

    /// Signal the thread and wait up to `grace` for it to clear its line.
    ///
    /// Returns `false` if the thread did not finish in time; it is left
    /// detached and the caller carries on.
    pub fn stop(self, grace: Duration) -> bool {
        self.stop.store(true, Ordering::SeqCst);
        match self.finished.recv_timeout(grace) {
            Ok(()) => {
                let _ = self.handle.join();
                true
            }
            Err(_) => false,
        }
    }
}
