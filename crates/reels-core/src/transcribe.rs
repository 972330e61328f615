//! Optional external transcriber run on accepted links.
//!
//! The transcriber is any program that takes the video link as its last
//! argument and prints the transcription to stdout, optionally after a
//! [`RESULT_MARKER`] line (everything before it is progress chatter).

use serde::{Deserialize, Serialize};
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;

/// Line printed by the transcription script right before the result text.
pub const RESULT_MARKER: &str = "Transcription complete. Here is the result:";

/// Bytes of stderr kept in a [`TranscribeError::Exit`].
const STDERR_TAIL_BYTES: usize = 512;

/// `[transcribe]` section in config.toml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscribeConfig {
    /// Program to run, e.g. `python3`.
    pub program: String,
    /// Arguments placed before the link, e.g. `["whisper_transcribe.py"]`.
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Error)]
pub enum TranscribeError {
    #[error("failed to start transcriber `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("transcriber exited with {status}: {stderr}")]
    Exit { status: String, stderr: String },
}

#[derive(Debug, Clone)]
pub struct Transcriber {
    config: TranscribeConfig,
}

impl Transcriber {
    pub fn new(config: TranscribeConfig) -> Self {
        Self { config }
    }

    /// Runs the transcriber for `link` and returns the transcription text.
    pub async fn transcribe(&self, link: &str) -> Result<String, TranscribeError> {
        tracing::info!(program = %self.config.program, "starting transcriber for {}", link);
        let output = Command::new(&self.config.program)
            .args(&self.config.args)
            .arg(link)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| TranscribeError::Spawn {
                program: self.config.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TranscribeError::Exit {
                status: output.status.to_string(),
                stderr: tail(stderr.trim(), STDERR_TAIL_BYTES).to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let text = extract_transcription(&stdout).to_string();
        tracing::debug!("transcriber produced {} characters", text.chars().count());
        Ok(text)
    }
}

/// Returns the text after [`RESULT_MARKER`], or all of `stdout` when the
/// marker is missing. Surrounding whitespace is trimmed.
pub fn extract_transcription(stdout: &str) -> &str {
    match stdout.rfind(RESULT_MARKER) {
        Some(idx) => stdout[idx + RESULT_MARKER.len()..].trim(),
        None => stdout.trim(),
    }
}

fn tail(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut start = s.len() - max_bytes;
    while !s.is_char_boundary(start) {
        start += 1;
    }
    &s[start..]
}
