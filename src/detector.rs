//! Package manager detection from a manifest path
//!
//! Detection runs normalizer, registry lookup, eligibility gate, and then
//! content disambiguation when the candidates need it. Keys with a single
//! unvalidated candidate never touch the file system.

use crate::error::DetectError;
use crate::feature_flags::{is_key_eligible, FeatureFlags};
use crate::fs::{FileSystem, RealFileSystem};
use crate::manifest::ManifestKey;
use crate::package_manager::PackageManagerId;
use crate::registry::{DetectorEntry, ManifestRegistry};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, trace, warn};

pub struct Detector {
    registry: Arc<ManifestRegistry>,
    fs: Arc<dyn FileSystem>,
}

impl Detector {
    /// Detector over the real file system and the default registry
    pub fn new() -> Self {
        Self::with_fs(Arc::new(RealFileSystem::new()))
    }

    pub fn with_fs(fs: Arc<dyn FileSystem>) -> Self {
        Self::with_registry(ManifestRegistry::shared(), fs)
    }

    pub fn with_registry(registry: Arc<ManifestRegistry>, fs: Arc<dyn FileSystem>) -> Self {
        Self { registry, fs }
    }

    pub fn registry(&self) -> &ManifestRegistry {
        &self.registry
    }

    /// Detects the package manager governing `path`.
    ///
    /// Fails with `InvalidArgument` when the path is not valid UTF-8.
    pub fn detect(
        &self,
        path: impl AsRef<Path>,
        flags: &FeatureFlags,
    ) -> Result<PackageManagerId, DetectError> {
        let path = path.as_ref();
        let path_str = path.to_str().ok_or_else(|| {
            DetectError::InvalidArgument(format!(
                "The \"path\" argument must be of type string. Received non-UTF-8 path {:?}",
                path
            ))
        })?;
        self.detect_str(path_str, flags)
    }

    /// Detects from a dynamically typed value, as received from JSON input.
    pub fn detect_value(
        &self,
        value: &Value,
        flags: &FeatureFlags,
    ) -> Result<PackageManagerId, DetectError> {
        let received = match value {
            Value::String(path) => return self.detect_str(path, flags),
            Value::Null => "null".to_string(),
            Value::Bool(b) => format!("type boolean ({})", b),
            Value::Number(n) => format!("type number ({})", n),
            Value::Array(_) => "an instance of Array".to_string(),
            Value::Object(_) => "an instance of Object".to_string(),
        };
        Err(DetectError::InvalidArgument(format!(
            "The \"path\" argument must be of type string. Received {}",
            received
        )))
    }

    fn detect_str(&self, file: &str, flags: &FeatureFlags) -> Result<PackageManagerId, DetectError> {
        let key = ManifestKey::from_path(file);

        let candidates = match self.registry.lookup(&key) {
            Some(candidates) if !candidates.is_empty() && is_key_eligible(&key, flags) => {
                candidates
            }
            _ => {
                debug!(file, key = %key, "No eligible manifest entry");
                return Err(DetectError::not_detected(file));
            }
        };

        if let [only] = candidates {
            if only.validator.is_none() {
                debug!(file, package_manager = %only.package_manager, "Detected from filename");
                return Ok(only.package_manager);
            }
        }

        match self.read_content(file) {
            Some(content) => select_candidate(candidates, &content)
                .ok_or_else(|| DetectError::not_detected(file)),
            None => {
                let first = candidates
                    .first()
                    .ok_or_else(|| DetectError::not_detected(file))?;
                debug!(
                    file,
                    package_manager = %first.package_manager,
                    "Content unavailable, using first candidate"
                );
                Ok(first.package_manager)
            }
        }
    }

    /// Empty or unreadable content is treated as unavailable.
    fn read_content(&self, file: &str) -> Option<String> {
        let path = Path::new(file);
        if !self.fs.exists(path) {
            return None;
        }

        match self.fs.read_to_string(path) {
            Ok(content) if !content.is_empty() => Some(content),
            Ok(_) => None,
            Err(e) => {
                warn!(file, error = %e, "Failed to read manifest, ignoring content");
                None
            }
        }
    }
}

impl Default for Detector {
    fn default() -> Self {
        Self::new()
    }
}

fn select_candidate(candidates: &[DetectorEntry], content: &str) -> Option<PackageManagerId> {
    for candidate in candidates {
        let matched = candidate.matches(content);
        trace!(
            package_manager = %candidate.package_manager,
            validated = candidate.validator.is_some(),
            matched,
            "Evaluated candidate"
        );
        if matched {
            return Some(candidate.package_manager);
        }
    }
    None
}

/// Detects with a default detector over the real file system.
pub fn detect_package_manager(
    path: impl AsRef<Path>,
    flags: &FeatureFlags,
) -> Result<PackageManagerId, DetectError> {
    Detector::new().detect(path, flags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature_flags::PNPM_FEATURE_FLAG;
    use crate::fs::MockFileSystem;
    use crate::validators;
    use anyhow::Result;
    use serde_json::json;

    struct PanickingFileSystem;

    impl FileSystem for PanickingFileSystem {
        fn exists(&self, path: &Path) -> bool {
            panic!("unexpected exists({:?})", path);
        }

        fn read_to_string(&self, path: &Path) -> Result<String> {
            panic!("unexpected read_to_string({:?})", path);
        }
    }

    fn mock_detector() -> (Arc<MockFileSystem>, Detector) {
        let fs = Arc::new(MockFileSystem::new());
        let detector = Detector::with_fs(fs.clone());
        (fs, detector)
    }

    #[test]
    fn test_fast_path_does_no_io() {
        let detector = Detector::with_fs(Arc::new(PanickingFileSystem));
        let flags = FeatureFlags::new();

        assert_eq!(detector.detect("Gemfile", &flags).unwrap(), PackageManagerId::RubyGems);
        assert_eq!(detector.detect("go.mod", &flags).unwrap(), PackageManagerId::GoModules);
        assert_eq!(detector.detect("app.jar", &flags).unwrap(), PackageManagerId::Maven);
    }

    #[test]
    fn test_unknown_file_fails_without_io() {
        let detector = Detector::with_fs(Arc::new(PanickingFileSystem));
        let err = detector.detect("unsupported.txt", &FeatureFlags::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Could not detect package manager for file: unsupported.txt"
        );
    }

    #[test]
    fn test_pnpm_gate() {
        let detector = Detector::with_fs(Arc::new(PanickingFileSystem));

        let err = detector.detect("pnpm-lock.yaml", &FeatureFlags::new()).unwrap_err();
        assert_eq!(
            err,
            DetectError::NotDetected("pnpm-lock.yaml".to_string())
        );

        let flags = FeatureFlags::new().with_flag(PNPM_FEATURE_FLAG);
        assert_eq!(detector.detect("pnpm-lock.yaml", &flags).unwrap(), PackageManagerId::Pnpm);
    }

    #[test]
    fn test_missing_content_falls_back_to_first_candidate() {
        let (fs, detector) = mock_detector();

        let result = detector.detect("project.json", &FeatureFlags::new()).unwrap();
        assert_eq!(result, PackageManagerId::NuGet);
        assert_eq!(fs.exists_calls(), 1);
        assert_eq!(fs.read_calls(), 0);
    }

    #[test]
    fn test_read_error_falls_back_to_first_candidate() {
        let (fs, detector) = mock_detector();
        fs.add_unreadable("/path/to/project.json", "ENOENT: no such file or directory");

        let result = detector.detect("/path/to/project.json", &FeatureFlags::new()).unwrap();
        assert_eq!(result, PackageManagerId::NuGet);
        assert_eq!(fs.read_calls(), 1);
    }

    #[test]
    fn test_empty_content_is_unavailable() {
        let (fs, detector) = mock_detector();
        fs.add_file("project.json", "");

        let result = detector.detect("project.json", &FeatureFlags::new()).unwrap();
        assert_eq!(result, PackageManagerId::NuGet);
    }

    #[test]
    fn test_validator_rejection_fails() {
        let (fs, detector) = mock_detector();
        fs.add_file("./project.json", "{ invalid json }");

        let err = detector.detect("./project.json", &FeatureFlags::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Could not detect package manager for file: ./project.json"
        );
    }

    #[test]
    fn test_unity_package_json_not_npm() {
        let (fs, detector) = mock_detector();
        fs.add_file("Packages/com.example/package.json", r#"{"name": "com.example", "unity": "2022.3"}"#);

        let err = detector
            .detect("Packages/com.example/package.json", &FeatureFlags::new())
            .unwrap_err();
        assert!(err.is_not_detected());
    }

    #[test]
    fn test_non_utf8_content_still_validated() {
        let (fs, detector) = mock_detector();
        fs.add_bytes(
            "package.json",
            b"{\"name\": \"com.x\", \"displayName\": \"Caf\xe9\", \"unity\": \"2021.3\"}",
        );

        let err = detector.detect("package.json", &FeatureFlags::new()).unwrap_err();
        assert!(err.is_not_detected());
    }

    #[test]
    fn test_first_matching_candidate_wins() {
        let mut registry = ManifestRegistry::new();
        registry
            .register(
                "project.json",
                vec![
                    DetectorEntry::validated(PackageManagerId::NuGet, validators::nuget_project_json),
                    DetectorEntry::new(PackageManagerId::Npm),
                ],
            )
            .unwrap();
        let fs = Arc::new(MockFileSystem::new());
        let detector = Detector::with_registry(Arc::new(registry), fs.clone());

        fs.add_file("project.json", r#"{"name": "nx-app", "targets": {}}"#);
        assert_eq!(
            detector.detect("project.json", &FeatureFlags::new()).unwrap(),
            PackageManagerId::Npm
        );

        fs.add_file("project.json", r#"{"frameworks": {"net8.0": {}}}"#);
        assert_eq!(
            detector.detect("project.json", &FeatureFlags::new()).unwrap(),
            PackageManagerId::NuGet
        );
    }

    #[test]
    fn test_detect_value_rejects_non_strings() {
        let detector = Detector::with_fs(Arc::new(PanickingFileSystem));
        let flags = FeatureFlags::new();

        let err = detector.detect_value(&Value::Null, &flags).unwrap_err();
        assert_eq!(
            err,
            DetectError::InvalidArgument(
                "The \"path\" argument must be of type string. Received null".to_string()
            )
        );

        let err = detector.detect_value(&json!(42), &flags).unwrap_err();
        assert!(err.to_string().ends_with("Received type number (42)"));

        let err = detector.detect_value(&json!(true), &flags).unwrap_err();
        assert!(err.to_string().ends_with("Received type boolean (true)"));

        let err = detector.detect_value(&json!(["package.json"]), &flags).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().ends_with("Received an instance of Array"));

        let err = detector.detect_value(&json!({"path": "go.mod"}), &flags).unwrap_err();
        assert!(err.to_string().ends_with("Received an instance of Object"));
    }

    #[test]
    fn test_detect_value_accepts_strings() {
        let detector = Detector::with_fs(Arc::new(PanickingFileSystem));
        let result = detector
            .detect_value(&json!("/repo/yarn.lock"), &FeatureFlags::new())
            .unwrap();
        assert_eq!(result, PackageManagerId::Yarn);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_path_is_invalid_argument() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let detector = Detector::with_fs(Arc::new(PanickingFileSystem));
        let path = Path::new(OsStr::from_bytes(b"/repo/\xffpackage.json"));
        let err = detector.detect(path, &FeatureFlags::new()).unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
