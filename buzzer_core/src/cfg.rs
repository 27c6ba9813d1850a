use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Observers may not poll faster than this.
pub const MIN_POLL_INTERVAL_MS: u64 = 50;

#[derive(Debug, thiserror::Error)]
pub enum CfgError {
    #[error("invalid session config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid session config value: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionCfg {
    /// Observer refresh cadence. Bounded staleness equals this interval.
    pub poll_interval_ms: u64,
    /// Only roster members may buzz.
    pub strict_roster: bool,
    /// Render elapsed labels with a decimal comma.
    pub european_decimals: bool,
}

impl Default for SessionCfg {
    fn default() -> Self {
        Self {
            poll_interval_ms: 500,
            strict_roster: false,
            european_decimals: false,
        }
    }
}

impl SessionCfg {
    /// Parse a (possibly partial) TOML document; missing keys keep their defaults.
    pub fn from_toml_str(src: &str) -> Result<Self, CfgError> {
        let cfg: SessionCfg = toml::from_str(src)?;
        if cfg.poll_interval_ms == 0 {
            return Err(CfgError::Invalid("poll_interval_ms must be positive".into()));
        }
        Ok(cfg)
    }

    #[inline]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(MIN_POLL_INTERVAL_MS))
    }
}
