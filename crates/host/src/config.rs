use std::fs;
use std::path::Path;

use serde::Deserialize;
use types::{BridgeError, BridgeResult, Revision};

pub struct Config;

impl Config {
    pub const MAX_CALL_DEPTH: u32 = 1024;
    pub const DEFAULT_REVISION: Revision = Revision::Byzantium;
    pub const CODE_SIZE_LIMIT: usize = 0x6000;
    /// Native stack left when a frame is entered below which a new segment is allocated.
    pub const STACK_RED_ZONE: usize = 128 * 1024;
    pub const STACK_SEGMENT: usize = 2 * 1024 * 1024;
}

/// Runtime settings of a [`crate::Host`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    /// Frames at this depth or deeper are rejected before the VM runs.
    pub max_call_depth: u32,
    pub revision: Revision,
}

impl Default for HostConfig {
    fn default() -> Self {
        HostConfig {
            max_call_depth: Config::MAX_CALL_DEPTH,
            revision: Config::DEFAULT_REVISION,
        }
    }
}

impl HostConfig {
    pub fn from_json(json: &str) -> BridgeResult<Self> {
        let config: HostConfig =
            serde_json::from_str(json).map_err(|e| BridgeError::Config(e.to_string()))?;
        config.validate()
    }

    pub fn load(path: impl AsRef<Path>) -> BridgeResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| BridgeError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    pub fn validate(self) -> BridgeResult<Self> {
        if self.max_call_depth == 0 {
            return Err(BridgeError::Config(
                "max_call_depth must allow at least the root frame".to_string(),
            ));
        }
        Ok(self)
    }
}
