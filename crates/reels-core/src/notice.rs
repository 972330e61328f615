//! User-facing notices and the sink that displays them.

use std::fmt;
use std::io::Write;
use std::sync::Mutex;

/// Transient, user-facing message produced by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The link passed validation and is being processed.
    Processing { link: String },
    /// The submitted text is not a supported video link.
    InvalidLink { link: String },
    /// Something unexpected failed; details are in the log.
    Failure,
    /// The command was invoked while its prompt was still open.
    AlreadyOpen,
    /// The external transcriber finished.
    Transcribed { chars: usize },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Processing { link } => write!(f, "Processing video link: {link}"),
            Notice::InvalidLink { link } => write!(f, "Invalid video link: {link}"),
            Notice::Failure => write!(f, "Something went wrong. Check the log for details."),
            Notice::AlreadyOpen => write!(f, "A link prompt is already open."),
            Notice::Transcribed { chars } => {
                write!(f, "Transcription finished ({chars} characters).")
            }
        }
    }
}

/// Displays notices to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);
}

/// Writes each notice as one line to the wrapped writer (stdout in the CLI).
pub struct ConsoleNotifier<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> ConsoleNotifier<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ConsoleNotifier<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> Notifier for ConsoleNotifier<W> {
    fn notify(&self, notice: &Notice) {
        let mut out = match self.out.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(out, "{notice}").and_then(|_| out.flush()) {
            tracing::warn!("failed to display notice: {}", e);
        }
    }
}

/// Keeps every notice in memory instead of displaying it.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        match self.notices.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &Notice) {
        match self.notices.lock() {
            Ok(mut guard) => guard.push(notice.clone()),
            Err(poisoned) => poisoned.into_inner().push(notice.clone()),
        }
    }
}
