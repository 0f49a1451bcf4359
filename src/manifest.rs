//! Manifest file shapes and key normalization
//!
//! A [`ManifestKey`] is what the registry is indexed by: either an exact
//! basename such as `package.json`, or a suffix token such as `.jar` that
//! stands for every file with that extension.

use std::fmt;

/// Suffixes that collapse to a shared registry key. Matching is case-sensitive.
const SUFFIX_KEYS: &[&str] = &[".gemspec", ".jar", ".war"];

macro_rules! manifest_files {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// Every manifest shape the default registry knows about
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ManifestFile {
            $($variant,)*
        }

        impl ManifestFile {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }

            pub fn all_variants() -> &'static [Self] {
                &[$(Self::$variant,)*]
            }
        }
    };
}

manifest_files! {
    Gemfile => "Gemfile",
    GemfileLock => "Gemfile.lock",
    Gemspec => ".gemspec",
    PackageLockJson => "package-lock.json",
    PomXml => "pom.xml",
    Jar => ".jar",
    War => ".war",
    BuildGradle => "build.gradle",
    BuildGradleKts => "build.gradle.kts",
    BuildSbt => "build.sbt",
    YarnLock => "yarn.lock",
    PnpmLock => "pnpm-lock.yaml",
    PackageJson => "package.json",
    Pipfile => "Pipfile",
    SetupPy => "setup.py",
    RequirementsTxt => "requirements.txt",
    GopkgLock => "Gopkg.lock",
    GoMod => "go.mod",
    VendorJson => "vendor.json",
    ProjectAssetsJson => "project.assets.json",
    PackagesConfig => "packages.config",
    ProjectJson => "project.json",
    PaketDependencies => "paket.dependencies",
    ComposerLock => "composer.lock",
    PodfileLock => "Podfile.lock",
    CocoaPodsPodfileYaml => "CocoaPods.podfile.yaml",
    CocoaPodsPodfile => "CocoaPods.podfile",
    Podfile => "Podfile",
    PoetryLock => "poetry.lock",
    MixExs => "mix.exs",
    PackageSwift => "Package.swift",
}

impl fmt::Display for ManifestFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized registry lookup key derived from a file path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ManifestKey(String);

impl ManifestKey {
    /// Reduces a path to its registry key.
    ///
    /// Both `/` and `\` separate segments, so POSIX, relative and Windows-style
    /// paths normalize the same way.
    pub fn from_path(path: &str) -> Self {
        let key = basename(path);

        for suffix in SUFFIX_KEYS {
            if key.ends_with(suffix) {
                return Self((*suffix).to_string());
            }
        }

        Self(key.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is(&self, file: ManifestFile) -> bool {
        self.0 == file.as_str()
    }
}

impl fmt::Display for ManifestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ManifestFile> for ManifestKey {
    fn from(file: ManifestFile) -> Self {
        Self(file.as_str().to_string())
    }
}

/// Final path segment, independent of separator style.
fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    let trimmed = strip_drive_prefix(trimmed);

    match trimmed.rfind(['/', '\\']) {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

fn strip_drive_prefix(path: &str) -> &str {
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        &path[2..]
    } else {
        path
    }
}
