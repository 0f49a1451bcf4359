//! Manifest registry

use crate::manifest::{ManifestFile, ManifestKey};
use crate::package_manager::PackageManagerId;
use crate::validators::{self, ContentValidator};
use anyhow::{bail, Result};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

static DEFAULT_REGISTRY: OnceLock<Arc<ManifestRegistry>> = OnceLock::new();

/// Candidate package manager for a manifest key
#[derive(Clone, Copy)]
pub struct DetectorEntry {
    pub package_manager: PackageManagerId,
    pub validator: Option<ContentValidator>,
}

impl DetectorEntry {
    pub const fn new(package_manager: PackageManagerId) -> Self {
        Self {
            package_manager,
            validator: None,
        }
    }

    pub const fn validated(package_manager: PackageManagerId, validator: ContentValidator) -> Self {
        Self {
            package_manager,
            validator: Some(validator),
        }
    }

    /// Unvalidated entries match any content.
    pub fn matches(&self, content: &str) -> bool {
        self.validator.map_or(true, |validate| validate(content))
    }
}

impl fmt::Debug for DetectorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetectorEntry")
            .field("package_manager", &self.package_manager)
            .field("validated", &self.validator.is_some())
            .finish()
    }
}

/// Maps manifest keys to candidates in priority order
#[derive(Debug, Clone, Default)]
pub struct ManifestRegistry {
    entries: HashMap<String, Vec<DetectorEntry>>,
    order: Vec<String>,
}

impl ManifestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        use ManifestFile as F;
        use PackageManagerId as P;

        let table: &[(ManifestFile, DetectorEntry)] = &[
            (F::Gemfile, DetectorEntry::new(P::RubyGems)),
            (F::GemfileLock, DetectorEntry::new(P::RubyGems)),
            (F::Gemspec, DetectorEntry::new(P::RubyGems)),
            (F::PackageLockJson, DetectorEntry::new(P::Npm)),
            (F::PomXml, DetectorEntry::new(P::Maven)),
            (F::Jar, DetectorEntry::new(P::Maven)),
            (F::War, DetectorEntry::new(P::Maven)),
            (F::BuildGradle, DetectorEntry::new(P::Gradle)),
            (F::BuildGradleKts, DetectorEntry::new(P::Gradle)),
            (F::BuildSbt, DetectorEntry::new(P::Sbt)),
            (F::YarnLock, DetectorEntry::new(P::Yarn)),
            (F::PnpmLock, DetectorEntry::new(P::Pnpm)),
            (
                F::PackageJson,
                DetectorEntry::validated(P::Npm, validators::npm_package_json),
            ),
            (F::Pipfile, DetectorEntry::new(P::Pip)),
            (F::SetupPy, DetectorEntry::new(P::Pip)),
            (F::RequirementsTxt, DetectorEntry::new(P::Pip)),
            (F::GopkgLock, DetectorEntry::new(P::GolangDep)),
            (F::GoMod, DetectorEntry::new(P::GoModules)),
            (F::VendorJson, DetectorEntry::new(P::GoVendor)),
            (F::ProjectAssetsJson, DetectorEntry::new(P::NuGet)),
            (F::PackagesConfig, DetectorEntry::new(P::NuGet)),
            (
                F::ProjectJson,
                DetectorEntry::validated(P::NuGet, validators::nuget_project_json),
            ),
            (F::PaketDependencies, DetectorEntry::new(P::Paket)),
            (F::ComposerLock, DetectorEntry::new(P::Composer)),
            (F::PodfileLock, DetectorEntry::new(P::CocoaPods)),
            (F::CocoaPodsPodfileYaml, DetectorEntry::new(P::CocoaPods)),
            (F::CocoaPodsPodfile, DetectorEntry::new(P::CocoaPods)),
            (F::Podfile, DetectorEntry::new(P::CocoaPods)),
            (F::PoetryLock, DetectorEntry::new(P::Poetry)),
            (F::MixExs, DetectorEntry::new(P::Hex)),
            (F::PackageSwift, DetectorEntry::new(P::Swift)),
        ];

        let mut registry = Self::new();
        for (file, entry) in table {
            registry.push(file.as_str(), *entry);
        }
        registry
    }

    /// Process-wide default registry, built on first use.
    pub fn global() -> &'static ManifestRegistry {
        Self::shared_default()
    }

    /// Shared handle to the default registry
    pub fn shared() -> Arc<ManifestRegistry> {
        Arc::clone(Self::shared_default())
    }

    fn shared_default() -> &'static Arc<ManifestRegistry> {
        DEFAULT_REGISTRY.get_or_init(|| Arc::new(Self::with_defaults()))
    }

    /// Appends candidates to a key. Earlier registrations take priority.
    pub fn register(&mut self, key: impl Into<String>, entries: Vec<DetectorEntry>) -> Result<()> {
        let key = key.into();
        if entries.is_empty() {
            bail!("Manifest key {:?} must have at least one candidate", key);
        }
        for entry in entries {
            self.push(&key, entry);
        }
        Ok(())
    }

    fn push(&mut self, key: &str, entry: DetectorEntry) {
        if !self.entries.contains_key(key) {
            self.order.push(key.to_string());
        }
        self.entries.entry(key.to_string()).or_default().push(entry);
    }

    pub fn lookup(&self, key: &ManifestKey) -> Option<&[DetectorEntry]> {
        self.entries.get(key.as_str()).map(Vec::as_slice)
    }

    pub fn is_manifest(&self, key: &ManifestKey) -> bool {
        self.entries.contains_key(key.as_str())
    }

    /// Registered keys in registration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Keys with their candidates, in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[DetectorEntry])> {
        self.order.iter().filter_map(|key| {
            self.entries
                .get(key)
                .map(|entries| (key.as_str(), entries.as_slice()))
        })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
