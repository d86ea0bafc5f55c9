use serde::Deserialize;

use crate::types::Credentials;

pub const DEFAULT_ROOT: &str = "http://127.0.0.1:1145";
pub const TEST_NAME: &str = "test";
pub const TEST_PASS: &str = "test";

/// Where the shim points and which identity `init`/`login` use.
///
/// Every field has a default, so a partial document deserializes into the
/// fixed local test setup with only the named fields overridden.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShimConfig {
    pub root: String,
    pub name: String,
    pub pass: String,
}

impl Default for ShimConfig {
    fn default() -> Self {
        Self {
            root: DEFAULT_ROOT.to_string(),
            name: TEST_NAME.to_string(),
            pass: TEST_PASS.to_string(),
        }
    }
}

impl ShimConfig {
    pub fn with_root(root: &str) -> Self {
        Self {
            root: root.to_string(),
            ..Self::default()
        }
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            name: self.name.clone(),
            pass: self.pass.clone(),
        }
    }
}
