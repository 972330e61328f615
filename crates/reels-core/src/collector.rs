//! Link collection through a modal prompt.
//!
//! A [`Modal`] is handed a [`SubmitHandle`] when opened. Submitting consumes the
//! handle, so a prompt resolves at most once; dropping it unsubmitted is a
//! dismissal. [`collect`] closes every modal it opened before returning.

use std::io::{self, BufRead, Write};
use thiserror::Error;
use tokio::sync::oneshot;

/// Errors raised by a modal implementation.
#[derive(Debug, Error)]
pub enum ModalError {
    #[error("modal is already open")]
    AlreadyOpen,
    #[error("modal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Errors raised while collecting a link.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("could not open link prompt: {0}")]
    Open(#[from] ModalError),
}

/// One-shot submission slot given to an open modal.
#[derive(Debug)]
pub struct SubmitHandle {
    tx: oneshot::Sender<String>,
}

impl SubmitHandle {
    pub(crate) fn channel() -> (Self, oneshot::Receiver<String>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx }, rx)
    }

    /// Resolves the prompt with `value`.
    pub fn submit(self, value: impl Into<String>) {
        // The receiver only goes away once collection has given up.
        let _ = self.tx.send(value.into());
    }
}

/// Dialog capable of collecting one string from the user.
pub trait Modal: Send {
    /// Render the dialog. Submission happens through `submit`, either before
    /// this returns or later from elsewhere.
    fn open(&mut self, title: &str, submit: SubmitHandle) -> Result<(), ModalError>;

    /// Tear the dialog down. Called exactly once per successful `open`, on
    /// every path; never after a failed one.
    fn close(&mut self);
}

/// Closes the wrapped modal when dropped.
struct OpenModal<'a, M: Modal + ?Sized> {
    modal: &'a mut M,
}

impl<M: Modal + ?Sized> Drop for OpenModal<'_, M> {
    fn drop(&mut self) {
        self.modal.close();
    }
}

/// Opens `modal`, waits for it to resolve and returns the submitted text,
/// or `None` if it was dismissed.
pub async fn collect<M: Modal + ?Sized>(
    modal: &mut M,
    title: &str,
) -> Result<Option<String>, CollectError> {
    let (handle, rx) = SubmitHandle::channel();
    modal.open(title, handle)?;
    let guard = OpenModal { modal };
    let submitted = rx.await.ok();
    drop(guard);
    Ok(submitted)
}

/// Line-oriented modal on a reader/writer pair (stdin/stdout in the CLI).
///
/// End of input dismisses the prompt. Surrounding whitespace, including the
/// line terminator, is trimmed from a submitted line. The line is read
/// synchronously inside `open`, which suits a CLI running one prompt at a time.
pub struct TerminalModal<R, W> {
    input: R,
    output: W,
    is_open: bool,
}

impl<R: BufRead + Send, W: Write + Send> TerminalModal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            is_open: false,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn prompt(&mut self, title: &str, submit: SubmitHandle) -> Result<(), ModalError> {
        writeln!(self.output, "{title}")?;
        write!(self.output, "> ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            tracing::debug!("link prompt dismissed (end of input)");
            return Ok(());
        }
        submit.submit(line.trim());
        Ok(())
    }
}

impl TerminalModal<io::BufReader<io::Stdin>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead + Send, W: Write + Send> Modal for TerminalModal<R, W> {
    fn open(&mut self, title: &str, submit: SubmitHandle) -> Result<(), ModalError> {
        if self.is_open {
            return Err(ModalError::AlreadyOpen);
        }
        let result = self.prompt(title, submit);
        self.is_open = result.is_ok();
        result
    }

    fn close(&mut self) {
        if self.is_open {
            self.is_open = false;
            // Finish the prompt line so later output starts cleanly.
            if let Err(e) = writeln!(self.output).and_then(|_| self.output.flush()) {
                tracing::debug!("failed to finish prompt line: {}", e);
            }
        }
    }
}
