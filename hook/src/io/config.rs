//! Hook configuration stored under `.autodev/config.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Hook configuration (TOML).
///
/// This file is intended to be edited by humans and must remain stable and
/// automatable. Missing fields default to sensible values; a missing file is
/// equivalent to the defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HookConfig {
    /// Status document path, relative to the workflow's working directory.
    pub status_doc_path: String,

    /// Rolling tail window of transcript text scanned per invocation.
    pub transcript_window_bytes: usize,

    /// Decision log path, relative to the workflow's working directory.
    pub decision_log_path: String,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            status_doc_path: "PROJECT_STATUS.md".to_string(),
            transcript_window_bytes: 50_000,
            decision_log_path: ".autodev/logs/decisions.log".to_string(),
        }
    }
}

impl HookConfig {
    pub fn validate(&self) -> Result<()> {
        if self.status_doc_path.trim().is_empty() {
            return Err(anyhow!("status_doc_path must be non-empty"));
        }
        if self.transcript_window_bytes == 0 {
            return Err(anyhow!("transcript_window_bytes must be > 0"));
        }
        if self.decision_log_path.trim().is_empty() {
            return Err(anyhow!("decision_log_path must be non-empty"));
        }
        Ok(())
    }
}

/// Load config from `.autodev/config.toml` under `root`.
///
/// If the file is missing, returns `HookConfig::default()`.
pub fn load_config(root: &Path) -> Result<HookConfig> {
    let path = root.join(".autodev").join("config.toml");
    if !path.exists() {
        let cfg = HookConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg: HookConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(temp.path()).expect("load");
        assert_eq!(cfg, HookConfig::default());
    }

    #[test]
    fn load_parses_overrides_and_fills_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let dir = temp.path().join(".autodev");
        fs::create_dir_all(&dir).expect("create dir");
        fs::write(dir.join("config.toml"), "status_doc_path = \"docs/STATUS.md\"\n")
            .expect("write config");

        let cfg = load_config(temp.path()).expect("load");
        assert_eq!(cfg.status_doc_path, "docs/STATUS.md");
        assert_eq!(
            cfg.transcript_window_bytes,
            HookConfig::default().transcript_window_bytes
        );
    }

    #[test]
    fn validate_rejects_zero_window() {
        let cfg = HookConfig {
            transcript_window_bytes: 0,
            ..HookConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
