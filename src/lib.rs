//! manifest-detect - package manager detection for dependency manifests
//!
//! Given a manifest path such as `package.json`, `Gemfile.lock` or `app.jar`,
//! [`Detector`] returns the [`PackageManagerId`] that governs it. Most files are
//! classified from the filename alone. Ambiguous ones (`package.json`,
//! `project.json`) are disambiguated by inspecting their content.
//!
//! # Example
//!
//! ```no_run
//! use manifest_detect::{detect_package_manager, FeatureFlags, PackageManagerId, PNPM_FEATURE_FLAG};
//!
//! let flags = FeatureFlags::new().with_flag(PNPM_FEATURE_FLAG);
//! let pm = detect_package_manager("/repo/pnpm-lock.yaml", &flags).unwrap();
//! assert_eq!(pm, PackageManagerId::Pnpm);
//! ```

pub mod cli;
pub mod config;
pub mod detector;
pub mod error;
pub mod feature_flags;
pub mod fs;
mod id_enum_macro;
pub mod manifest;
pub mod package_manager;
pub mod registry;
pub mod util;
pub mod validators;

pub use config::{ConfigError, DetectorConfig};
pub use detector::{detect_package_manager, Detector};
pub use error::DetectError;
pub use feature_flags::{FeatureFlags, PNPM_FEATURE_FLAG};
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use manifest::{ManifestFile, ManifestKey};
pub use package_manager::PackageManagerId;
pub use registry::{DetectorEntry, ManifestRegistry};
pub use validators::ContentValidator;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
