//! Plugin lifecycle and command registration.
//!
//! The host (the `reels` CLI, or a test harness) owns a [`CommandRegistry`]
//! and drives the plugin explicitly: `initialize`, any number of `execute`
//! calls, then `shutdown`.

use thiserror::Error;
use tracing::instrument::WithSubscriber;
use tracing::Dispatch;

use crate::collector::Modal;
use crate::command::{LinkCommand, Outcome};
use crate::config::ReelsConfig;
use crate::notice::{Notice, Notifier};

/// A user-invocable command as listed in the host's command palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandInfo {
    pub id: &'static str,
    pub name: &'static str,
}

/// The only command this plugin provides.
pub const PROCESS_VIDEO_LINK: CommandInfo = CommandInfo {
    id: "process-video-link",
    name: "Extract Restaurant Info from Video",
};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("command `{0}` is already registered")]
    Duplicate(&'static str),
}

#[derive(Debug, Error)]
pub enum PluginError {
    #[error("plugin is not loaded")]
    NotLoaded,
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Commands registered by plugins, in registration order.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: Vec<CommandInfo>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, info: CommandInfo) -> Result<(), RegistryError> {
        if self.get(info.id).is_some() {
            return Err(RegistryError::Duplicate(info.id));
        }
        self.commands.push(info);
        Ok(())
    }

    /// Removes the command with `id`; returns whether it was registered.
    pub fn unregister(&mut self, id: &str) -> bool {
        let before = self.commands.len();
        self.commands.retain(|c| c.id != id);
        self.commands.len() != before
    }

    pub fn get(&self, id: &str) -> Option<&CommandInfo> {
        self.commands.iter().find(|c| c.id == id)
    }

    pub fn commands(&self) -> &[CommandInfo] {
        &self.commands
    }
}

pub struct ReelsPlugin {
    command: LinkCommand,
    loaded: bool,
    dispatch: Option<Dispatch>,
}

impl ReelsPlugin {
    pub fn new(cfg: &ReelsConfig) -> Self {
        Self::with_command(LinkCommand::from_config(cfg))
    }

    pub fn with_command(command: LinkCommand) -> Self {
        Self {
            command,
            loaded: false,
            dispatch: None,
        }
    }

    /// Sends this plugin's logs to `dispatch` instead of the global subscriber.
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Registers the plugin's commands. On failure the plugin stays unloaded,
    /// the error is logged and a generic notice is shown.
    pub fn initialize(
        &mut self,
        registry: &mut CommandRegistry,
        notifier: &dyn Notifier,
    ) -> Result<(), PluginError> {
        let dispatch = self.dispatch.clone();
        in_scope(dispatch.as_ref(), || {
            if self.loaded {
                tracing::debug!("plugin already loaded");
                return Ok(());
            }
            tracing::info!("Loading Reels Info Extractor");
            if let Err(e) = registry.register(PROCESS_VIDEO_LINK) {
                tracing::error!("failed to load plugin: {}", e);
                notifier.notify(&Notice::Failure);
                return Err(e.into());
            }
            self.loaded = true;
            Ok(())
        })
    }

    /// Unregisters the plugin's commands. Safe to call more than once.
    pub fn shutdown(&mut self, registry: &mut CommandRegistry) {
        let dispatch = self.dispatch.clone();
        in_scope(dispatch.as_ref(), || {
            if !self.loaded {
                return;
            }
            tracing::info!("Unloading Reels Info Extractor");
            if !registry.unregister(PROCESS_VIDEO_LINK.id) {
                tracing::warn!("command {} was not registered", PROCESS_VIDEO_LINK.id);
            }
            self.loaded = false;
        });
    }

    /// Runs the command registered as `id`.
    pub async fn execute<M: Modal + ?Sized>(
        &self,
        id: &str,
        modal: &mut M,
        notifier: &dyn Notifier,
    ) -> Result<Outcome, PluginError> {
        if !self.loaded {
            return Err(PluginError::NotLoaded);
        }
        if id != PROCESS_VIDEO_LINK.id {
            return Err(PluginError::UnknownCommand(id.to_string()));
        }

        let run = self.command.run(modal, notifier);
        let outcome = match &self.dispatch {
            Some(dispatch) => run.with_subscriber(dispatch.clone()).await,
            None => run.await,
        };
        Ok(outcome)
    }
}

fn in_scope<T>(dispatch: Option<&Dispatch>, f: impl FnOnce() -> T) -> T {
    match dispatch {
        Some(d) => tracing::dispatcher::with_default(d, f),
        None => f(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::{ModalError, SubmitHandle};
    use crate::notice::RecordingNotifier;

    struct Answer(&'static str);

    impl Modal for Answer {
        fn open(&mut self, _title: &str, submit: SubmitHandle) -> Result<(), ModalError> {
            submit.submit(self.0);
            Ok(())
        }

        fn close(&mut self) {}
    }

    #[test]
    fn registry_rejects_duplicates() {
        let mut registry = CommandRegistry::new();
        registry.register(PROCESS_VIDEO_LINK).unwrap();
        assert!(matches!(
            registry.register(PROCESS_VIDEO_LINK),
            Err(RegistryError::Duplicate("process-video-link"))
        ));
        assert_eq!(registry.commands().len(), 1);
        assert!(registry.unregister("process-video-link"));
        assert!(!registry.unregister("process-video-link"));
    }

    #[test]
    fn initialize_registers_and_shutdown_unregisters() {
        let mut registry = CommandRegistry::new();
        let notifier = RecordingNotifier::new();
        let mut plugin = ReelsPlugin::new(&ReelsConfig::default());

        plugin.initialize(&mut registry, &notifier).unwrap();
        assert!(plugin.is_loaded());
        assert_eq!(
            registry.get("process-video-link").map(|c| c.name),
            Some("Extract Restaurant Info from Video")
        );

        // idempotent
        plugin.initialize(&mut registry, &notifier).unwrap();
        assert_eq!(registry.commands().len(), 1);

        plugin.shutdown(&mut registry);
        plugin.shutdown(&mut registry);
        assert!(!plugin.is_loaded());
        assert!(registry.commands().is_empty());
        assert!(notifier.notices().is_empty());
    }

    #[test]
    fn failed_registration_leaves_plugin_unloaded() {
        let mut registry = CommandRegistry::new();
        registry.register(PROCESS_VIDEO_LINK).unwrap();
        let notifier = RecordingNotifier::new();
        let mut plugin = ReelsPlugin::new(&ReelsConfig::default());

        let err = plugin.initialize(&mut registry, &notifier).unwrap_err();
        assert!(matches!(err, PluginError::Registry(_)));
        assert!(!plugin.is_loaded());
        assert_eq!(notifier.notices(), vec![Notice::Failure]);
    }

    #[tokio::test]
    async fn execute_requires_initialize_and_known_id() {
        let mut registry = CommandRegistry::new();
        let notifier = RecordingNotifier::new();
        let mut plugin = ReelsPlugin::new(&ReelsConfig::default());
        let mut modal = Answer("https://youtu.be/abc");

        assert!(matches!(
            plugin
                .execute("process-video-link", &mut modal, &notifier)
                .await,
            Err(PluginError::NotLoaded)
        ));

        plugin.initialize(&mut registry, &notifier).unwrap();
        assert!(matches!(
            plugin.execute("summarize", &mut modal, &notifier).await,
            Err(PluginError::UnknownCommand(id)) if id == "summarize"
        ));

        let outcome = plugin
            .execute("process-video-link", &mut modal, &notifier)
            .await
            .unwrap();
        assert!(matches!(outcome, Outcome::Processing { .. }));
    }

    #[tokio::test]
    async fn logs_go_to_injected_dispatch() {
        let (dispatch, logs) = crate::logging::capture();
        let mut registry = CommandRegistry::new();
        let notifier = RecordingNotifier::new();
        let mut plugin = ReelsPlugin::new(&ReelsConfig::default()).with_dispatch(dispatch);

        plugin.initialize(&mut registry, &notifier).unwrap();
        plugin
            .execute(
                "process-video-link",
                &mut Answer("ftp://example.com/video"),
                &notifier,
            )
            .await
            .unwrap();
        plugin.shutdown(&mut registry);

        let logs = logs.contents();
        assert!(logs.contains("Loading Reels Info Extractor"));
        assert!(logs.contains("rejected video link"));
        assert!(logs.contains("Unloading Reels Info Extractor"));
    }
}
