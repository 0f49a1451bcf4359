//! Caller-supplied feature flags

use crate::manifest::{ManifestFile, ManifestKey};
use std::collections::HashSet;

/// Flag that opts in to pnpm lockfile detection
pub const PNPM_FEATURE_FLAG: &str = "enablePnpmCli";

/// Set of enabled flag names, passed explicitly to every detection call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    enabled: HashSet<String>,
}

impl FeatureFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.enabled.insert(flag.into());
        self
    }

    pub fn contains(&self, flag: &str) -> bool {
        self.enabled.contains(flag)
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.enabled.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for FeatureFlags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            enabled: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Whether a registered key may be detected under the given flags.
pub fn is_key_eligible(key: &ManifestKey, flags: &FeatureFlags) -> bool {
    if key.is(ManifestFile::PnpmLock) && !flags.contains(PNPM_FEATURE_FLAG) {
        return false;
    }
    true
}
