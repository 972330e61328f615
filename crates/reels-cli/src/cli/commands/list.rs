//! `reels commands` – list registered plugin commands.

use anyhow::Result;
use reels_core::config::ReelsConfig;
use reels_core::notice::ConsoleNotifier;
use reels_core::plugin::{CommandRegistry, ReelsPlugin};

pub fn run_commands(cfg: &ReelsConfig) -> Result<()> {
    let mut registry = CommandRegistry::new();
    let mut plugin = ReelsPlugin::new(cfg);
    plugin.initialize(&mut registry, &ConsoleNotifier::stdout())?;

    println!("{:<24} {}", "ID", "NAME");
    for c in registry.commands() {
        println!("{:<24} {}", c.id, c.name);
    }

    plugin.shutdown(&mut registry);
    Ok(())
}
