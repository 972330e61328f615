//! The "process video link" command: collect, validate, report.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::collector::{self, Modal};
use crate::config::{ReelsConfig, ReentryPolicy};
use crate::notice::{Notice, Notifier};
use crate::transcribe::Transcriber;
use crate::validator::LinkValidator;

/// How one invocation of the command ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Prompt dismissed; nothing shown.
    Dismissed,
    /// Empty text submitted; nothing shown.
    Empty,
    /// Link accepted. Carries the transcription when a transcriber ran successfully.
    Processing {
        link: String,
        transcript: Option<String>,
    },
    /// Link rejected by the validator.
    Invalid { link: String },
    /// Another invocation still had its prompt open.
    Busy,
    /// Collection failed unexpectedly.
    Failed,
}

/// Clears the in-flight flag when the invocation ends.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct LinkCommand {
    validator: LinkValidator,
    reentry: ReentryPolicy,
    prompt_title: String,
    transcriber: Option<Transcriber>,
    in_flight: AtomicBool,
}

impl LinkCommand {
    pub fn new(
        validator: LinkValidator,
        reentry: ReentryPolicy,
        prompt_title: impl Into<String>,
    ) -> Self {
        Self {
            validator,
            reentry,
            prompt_title: prompt_title.into(),
            transcriber: None,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn from_config(cfg: &ReelsConfig) -> Self {
        let cmd = Self::new(
            LinkValidator::new(cfg.host_pattern),
            cfg.reentry,
            cfg.prompt_title.clone(),
        );
        match &cfg.transcribe {
            Some(t) => cmd.with_transcriber(Transcriber::new(t.clone())),
            None => cmd,
        }
    }

    pub fn with_transcriber(mut self, transcriber: Transcriber) -> Self {
        self.transcriber = Some(transcriber);
        self
    }

    /// Runs one invocation. Never fails: unexpected errors are logged and
    /// reported through `notifier` as [`Notice::Failure`].
    pub async fn run<M: Modal + ?Sized>(
        &self,
        modal: &mut M,
        notifier: &dyn Notifier,
    ) -> Outcome {
        let _in_flight = match self.enter() {
            Some(guard) => guard,
            None => {
                tracing::warn!("link prompt already open; rejecting invocation");
                notifier.notify(&Notice::AlreadyOpen);
                return Outcome::Busy;
            }
        };

        let text = match collector::collect(modal, &self.prompt_title).await {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::debug!("link prompt dismissed");
                return Outcome::Dismissed;
            }
            Err(e) => {
                tracing::error!("failed to collect video link: {}", e);
                notifier.notify(&Notice::Failure);
                return Outcome::Failed;
            }
        };

        if text.is_empty() {
            tracing::debug!("empty link submitted");
            return Outcome::Empty;
        }

        match self.validator.classify(&text) {
            Some(host) => {
                tracing::info!(%host, "processing video link {}", text);
                notifier.notify(&Notice::Processing { link: text.clone() });
                let transcript = self.transcribe(&text, notifier).await;
                Outcome::Processing {
                    link: text,
                    transcript,
                }
            }
            None => {
                tracing::info!("rejected video link {:?}", text);
                notifier.notify(&Notice::InvalidLink { link: text.clone() });
                Outcome::Invalid { link: text }
            }
        }
    }

    fn enter(&self) -> Option<InFlight<'_>> {
        let was_busy = self.in_flight.swap(true, Ordering::AcqRel);
        if was_busy && self.reentry == ReentryPolicy::Reject {
            return None;
        }
        Some(InFlight(&self.in_flight))
    }

    async fn transcribe(&self, link: &str, notifier: &dyn Notifier) -> Option<String> {
        let transcriber = self.transcriber.as_ref()?;
        match transcriber.transcribe(link).await {
            Ok(text) => {
                notifier.notify(&Notice::Transcribed {
                    chars: text.chars().count(),
                });
                Some(text)
            }
            Err(e) => {
                tracing::error!("transcription failed for {}: {}", link, e);
                notifier.notify(&Notice::Failure);
                None
            }
        }
    }
}
