//! Package content classifier
//!
//! Scores the entry listing of one application package against the indicator
//! catalog and picks a single [`AppType`]. The classifier holds no state
//! between calls and is safe to share across threads.

use super::indicator::{
    Framework, FrameworkIndicator, IndicatorKind, ManifestFragment, INDICATORS, MANIFEST_BONUS,
    MANIFEST_FRAGMENTS, PATH_WEIGHT, SHARED_INDICATORS,
};
use super::native_libs::split_library_path;
use super::score::{FrameworkScore, DEFAULT_THRESHOLD};
use super::AppType;
use std::collections::HashSet;
use tracing::trace;

/// Lower-cased entry names plus the set of native library file names
#[derive(Debug, Clone, Default)]
pub struct EntryIndex {
    names: Vec<String>,
    native_libraries: HashSet<String>,
}

impl EntryIndex {
    pub fn new<S: AsRef<str>>(entries: &[S]) -> Self {
        let names: Vec<String> = entries.iter().map(|e| e.as_ref().to_lowercase()).collect();
        let native_libraries = names
            .iter()
            .filter_map(|name| split_library_path(name).map(|(_, file)| file.to_string()))
            .collect();

        Self {
            names,
            native_libraries,
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn any_contains(&self, pattern: &str) -> bool {
        self.names.iter().any(|name| name.contains(pattern))
    }

    pub fn has_native_library(&self, file_name: &str) -> bool {
        self.native_libraries.contains(file_name)
    }

    fn matches(&self, indicator: &FrameworkIndicator) -> bool {
        match indicator.kind {
            IndicatorKind::NativeLibrary => indicator
                .patterns
                .iter()
                .any(|p| self.has_native_library(p)),
            IndicatorKind::Asset | IndicatorKind::Path => {
                indicator.patterns.iter().any(|p| self.any_contains(p))
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PackageClassifier {
    threshold: u32,
}

impl Default for PackageClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl PackageClassifier {
    pub fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn score(&self, index: &EntryIndex, manifest: Option<&[u8]>) -> FrameworkScore {
        let mut score = FrameworkScore::default();

        for indicator in INDICATORS {
            if index.matches(indicator) {
                trace!(
                    patterns = ?indicator.patterns,
                    framework = ?indicator.framework,
                    weight = indicator.weight,
                    "Indicator matched"
                );
                score.add(indicator.framework, indicator.weight);
            }
        }

        if let Some(bytes) = manifest {
            let lowered = bytes.to_ascii_lowercase();
            for fragment in MANIFEST_FRAGMENTS {
                if manifest_contains(&lowered, fragment) {
                    trace!(
                        fragment = fragment.fragment,
                        framework = ?fragment.framework,
                        "Manifest fragment matched"
                    );
                    score.add(fragment.framework, MANIFEST_BONUS);
                }
            }
        }

        for framework in Framework::ALL {
            if let Some(base) = framework.base() {
                if score.get(framework) > 0 {
                    score.add(framework, score.get(base));
                }
            }
        }

        for pattern in SHARED_INDICATORS {
            if index.any_contains(pattern) {
                for framework in Framework::ALL {
                    score.add(framework, PATH_WEIGHT);
                }
            }
        }

        score
    }

    pub fn classify<S: AsRef<str>>(&self, entries: &[S], manifest: Option<&[u8]>) -> AppType {
        let index = EntryIndex::new(entries);
        self.score(&index, manifest).decide(self.threshold)
    }
}

/// Classifies a package listing with the default threshold.
pub fn classify<S: AsRef<str>>(entries: &[S], manifest: Option<&[u8]>) -> AppType {
    PackageClassifier::default().classify(entries, manifest)
}

// Compiled manifests keep strings as UTF-16LE, text manifests as ASCII; both
// spellings are tried. `lowered` must already be ASCII lower-cased.
fn manifest_contains(lowered: &[u8], fragment: &ManifestFragment) -> bool {
    let ascii = fragment.fragment.as_bytes();
    if contains_subslice(lowered, ascii) {
        return true;
    }

    let utf16: Vec<u8> = fragment
        .fragment
        .encode_utf16()
        .flat_map(|unit| unit.to_le_bytes())
        .collect();
    contains_subslice(lowered, &utf16)
}

fn contains_subslice(haystack: &[u8], needle: &[u8]) -> bool {
    !needle.is_empty()
        && haystack.len() >= needle.len()
        && haystack.windows(needle.len()).any(|window| window == needle)
}
