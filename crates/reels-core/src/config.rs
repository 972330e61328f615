use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::transcribe::TranscribeConfig;
use crate::validator::HostPattern;

/// What to do when the link command is invoked while its prompt is still open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReentryPolicy {
    /// Refuse the second invocation with an "already open" notice.
    #[default]
    Reject,
    /// Let every invocation open its own prompt.
    Allow,
}

/// Global configuration loaded from `~/.config/reels/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReelsConfig {
    /// Title shown above the link prompt.
    #[serde(default = "default_prompt_title")]
    pub prompt_title: String,
    /// Link pattern: "permissive" (default) or "strict".
    #[serde(default)]
    pub host_pattern: HostPattern,
    /// Behaviour on re-entry: "reject" (default) or "allow".
    #[serde(default)]
    pub reentry: ReentryPolicy,
    /// Optional external transcriber run on accepted links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcribe: Option<TranscribeConfig>,
}

fn default_prompt_title() -> String {
    "Enter video link".to_string()
}

impl Default for ReelsConfig {
    fn default() -> Self {
        Self {
            prompt_title: default_prompt_title(),
            host_pattern: HostPattern::default(),
            reentry: ReentryPolicy::default(),
            transcribe: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("reels")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from the XDG config dir, creating a default file if none exists.
pub fn load_or_init() -> Result<ReelsConfig> {
    load_from(&config_path()?)
}

/// Load configuration from `path`, writing defaults there if the file is missing.
pub fn load_from(path: &Path) -> Result<ReelsConfig> {
    if !path.exists() {
        let default_cfg = ReelsConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: ReelsConfig = toml::from_str(&data)?;
    Ok(cfg)
}
