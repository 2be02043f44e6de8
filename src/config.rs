use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::pattern::{ApprovedPattern, PatternError};

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

/// Why the pattern source could not be turned into a pattern set.
///
/// These are hard failures: an unreadable or malformed config means the
/// operator's intent is unknown, which is not the same as an intentionally
/// empty approve list. The hook reports them as Ask, never Allow.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed config {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid approved pattern `{text}`: {source}")]
    Pattern {
        text: String,
        source: PatternError,
    },
}

// ── Final (merged) config types ──

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub patterns: Patterns,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Patterns {
    #[serde(default)]
    pub approve: Vec<String>,
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    patterns: PatternsOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct PatternsOverlay {
    #[serde(default)]
    replace: bool,
    #[serde(default)]
    approve: Vec<String>,
    #[serde(default)]
    remove_approve: Vec<String>,
}

// ── Merge logic ──

/// Merge a user list into a default list.
/// In replace mode: user list replaces default entirely.
/// In merge mode: remove items first, then extend with additions (deduped).
fn merge_list(base: &mut Vec<String>, add: Vec<String>, remove: &[String], replace: bool) {
    if replace {
        *base = add;
    } else {
        base.retain(|item| !remove.contains(item));
        for item in add {
            if !base.contains(&item) {
                base.push(item);
            }
        }
    }
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Load configuration with resolution order:
    /// 1. Start with embedded defaults
    /// 2. Merge user overlay from ~/.config/bashgate/config.toml (if exists)
    ///
    /// A present-but-broken overlay is an error, not an empty overlay.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default_config();
        if let Some(overlay) = Self::load_overlay()? {
            config.apply_overlay(overlay);
        }
        Ok(config)
    }

    /// Compile the approve list into matchable patterns.
    pub fn compile(&self) -> Result<Vec<ApprovedPattern>, ConfigError> {
        self.patterns
            .approve
            .iter()
            .map(|text| {
                ApprovedPattern::parse(text).map_err(|source| ConfigError::Pattern {
                    text: text.clone(),
                    source,
                })
            })
            .collect()
    }

    /// Try to load user overlay from ~/.config/bashgate/config.toml.
    fn load_overlay() -> Result<Option<ConfigOverlay>, ConfigError> {
        let Some(home) = std::env::var_os("HOME") else {
            return Ok(None);
        };
        let path = std::path::Path::new(&home).join(".config/bashgate/config.toml");
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(ConfigError::Unreadable { path, source }),
        };
        let overlay =
            toml::from_str(&content).map_err(|source| ConfigError::Malformed { path, source })?;
        Ok(Some(overlay))
    }

    /// Apply an overlay on top of this config (merge semantics).
    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        let p = overlay.patterns;
        merge_list(
            &mut self.patterns.approve,
            p.approve,
            &p.remove_approve,
            p.replace,
        );
    }

    /// Apply an overlay from a TOML string. Used for testing.
    #[cfg(test)]
    fn apply_overlay_str(&mut self, toml_str: &str) {
        let overlay: ConfigOverlay = toml::from_str(toml_str).unwrap();
        self.apply_overlay(overlay);
    }
}
