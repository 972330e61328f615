//! `reels extract` – prompt for a video link and report on it.

use anyhow::Result;
use reels_core::collector::{Modal, TerminalModal};
use reels_core::command::Outcome;
use reels_core::config::ReelsConfig;
use reels_core::notice::{ConsoleNotifier, Notifier};
use reels_core::plugin::{CommandRegistry, ReelsPlugin, PROCESS_VIDEO_LINK};

pub async fn run_extract(cfg: &ReelsConfig) -> Result<()> {
    let mut registry = CommandRegistry::new();
    let notifier = ConsoleNotifier::stdout();
    let mut plugin = ReelsPlugin::new(cfg);
    let mut modal = TerminalModal::stdio();

    if let Some(text) = extract_with(&mut plugin, &mut registry, &mut modal, &notifier).await? {
        println!("{text}");
    }
    Ok(())
}

/// Loads the plugin, runs the link command once and unloads it. Returns the
/// transcription, if one was produced.
///
/// A plugin that fails to load has already logged it and shown a notice, so
/// that ends the command without an error.
pub async fn extract_with<M: Modal + ?Sized>(
    plugin: &mut ReelsPlugin,
    registry: &mut CommandRegistry,
    modal: &mut M,
    notifier: &dyn Notifier,
) -> Result<Option<String>> {
    if let Err(e) = plugin.initialize(registry, notifier) {
        tracing::warn!("link command unavailable: {}", e);
        return Ok(None);
    }

    let result = plugin
        .execute(PROCESS_VIDEO_LINK.id, modal, notifier)
        .await;
    plugin.shutdown(registry);

    let outcome = result?;
    tracing::debug!("extract finished: {:?}", outcome);
    match outcome {
        Outcome::Processing { transcript, .. } => Ok(transcript),
        _ => Ok(None),
    }
}
