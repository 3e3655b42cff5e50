//! Per-package analysis
//!
//! [`PackageAnalyzer`] reads one package archive in a single pass and runs
//! every detector over it: the framework classifier, native library
//! enumeration, the tech-stack tagger and signature digests.
//!
//! An unreadable package is not an error for the caller. It is reported as
//! [`AppType::Unknown`] with empty results and the reason in
//! [`PackageAnalysis::error`].
//!
//! # Example
//!
//! ```no_run
//! use apklens::analyzer::PackageAnalyzer;
//! use apklens::ApklensConfig;
//!
//! let analyzer = PackageAnalyzer::new(&ApklensConfig::default());
//! let analysis = analyzer.analyze("/data/app/com.example/base.apk");
//! println!("{}: {}", analysis.file_name, analysis.app_type);
//! ```

use crate::archive::{PackageArchive, PackageContents, ReadOptions, ZipPackageArchive};
use crate::config::ApklensConfig;
use crate::signing::{digest_signature_blocks, SignatureDigest};
use crate::stack::{
    enumerate_native_libraries, AppType, EntryIndex, FrameworkScore, NativeLibrary,
    PackageClassifier, TechStack,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageAnalysis {
    pub path: PathBuf,
    pub file_name: String,
    pub app_type: AppType,
    pub scores: FrameworkScore,
    pub native_libraries: Vec<NativeLibrary>,
    pub tech_stack: TechStack,
    pub signatures: Vec<SignatureDigest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PackageAnalysis {
    /// Result for a package that could not be read.
    pub fn unreadable(path: &Path, reason: impl Into<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            file_name: file_name_of(path),
            app_type: AppType::Unknown,
            scores: FrameworkScore::default(),
            native_libraries: Vec::new(),
            tech_stack: TechStack::default(),
            signatures: Vec::new(),
            error: Some(reason.into()),
        }
    }

    pub fn is_readable(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct PackageAnalyzer {
    classifier: PackageClassifier,
    read_options: ReadOptions,
}

impl Default for PackageAnalyzer {
    fn default() -> Self {
        Self {
            classifier: PackageClassifier::default(),
            read_options: ReadOptions::default(),
        }
    }
}

impl PackageAnalyzer {
    pub fn new(config: &ApklensConfig) -> Self {
        Self {
            classifier: PackageClassifier::new(config.score_threshold),
            read_options: config.read_options(),
        }
    }

    pub fn with_parts(classifier: PackageClassifier, read_options: ReadOptions) -> Self {
        Self {
            classifier,
            read_options,
        }
    }

    /// Analyzes the zip package at `path`.
    pub fn analyze(&self, path: impl AsRef<Path>) -> PackageAnalysis {
        self.analyze_archive(&ZipPackageArchive::new(path.as_ref()))
    }

    pub fn analyze_archive(&self, archive: &dyn PackageArchive) -> PackageAnalysis {
        let start = Instant::now();
        let path = archive.location();

        let analysis = match archive.read_contents(&self.read_options) {
            Ok(contents) => self.analyze_contents(path, &contents),
            Err(e) => {
                warn!(package = %path.display(), error = %e, "Package unreadable, reporting as unknown");
                PackageAnalysis::unreadable(path, e.to_string())
            }
        };

        debug!(
            package = %path.display(),
            app_type = %analysis.app_type,
            native_libraries = analysis.native_libraries.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "Package analyzed"
        );

        analysis
    }

    pub fn analyze_contents(&self, path: &Path, contents: &PackageContents) -> PackageAnalysis {
        let index = EntryIndex::new(&contents.entries);
        let scores = self.classifier.score(&index, contents.manifest.as_deref());
        let app_type = scores.decide(self.classifier.threshold());

        debug!(
            package = %path.display(),
            entries = index.len(),
            flutter = scores.flutter,
            react_native = scores.react_native,
            expo = scores.expo,
            "Framework scores"
        );

        PackageAnalysis {
            path: path.to_path_buf(),
            file_name: file_name_of(path),
            app_type,
            scores,
            native_libraries: enumerate_native_libraries(&contents.entries),
            tech_stack: TechStack::detect(&index),
            signatures: digest_signature_blocks(&contents.signature_blocks),
            error: None,
        }
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
