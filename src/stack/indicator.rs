//! Indicator catalog for framework detection
//!
//! An indicator is a `(patterns, framework, weight)` rule evaluated against the
//! normalized entry names of one package. The patterns of one indicator are
//! alternative spellings of the same signal, so the indicator adds its weight
//! at most once. Indicators are independent: one entry may satisfy indicators
//! of several frameworks, and the conflict is resolved by scoring rather than
//! by rejecting the match.

use serde::{Deserialize, Serialize};

/// Weight of a framework-specific native library found under `lib/<arch>/`
pub const NATIVE_LIBRARY_WEIGHT: u32 = 3;
/// Weight of an asset folder or bundle match
pub const ASSET_WEIGHT: u32 = 2;
/// Weight of a generic path substring match
pub const PATH_WEIGHT: u32 = 1;
/// Bonus per framework fragment found in the manifest bytes
pub const MANIFEST_BONUS: u32 = 2;

/// Frameworks that are scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Framework {
    Flutter,
    ReactNative,
    Expo,
}

impl Framework {
    pub const ALL: [Framework; 3] = [Framework::Flutter, Framework::ReactNative, Framework::Expo];

    /// Framework this one is built on top of.
    ///
    /// Expo packages ship the whole React Native runtime, so React Native
    /// evidence also counts toward Expo once Expo's own evidence is present.
    pub fn base(&self) -> Option<Framework> {
        match self {
            Framework::Expo => Some(Framework::ReactNative),
            Framework::Flutter | Framework::ReactNative => None,
        }
    }
}

/// How an indicator pattern is matched against an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorKind {
    /// File name of an entry under `lib/<arch>/` equals a pattern
    NativeLibrary,
    /// Entry contains a pattern (asset folders, JS bundles)
    Asset,
    /// Entry contains a pattern anywhere
    Path,
}

impl IndicatorKind {
    pub fn default_weight(&self) -> u32 {
        match self {
            IndicatorKind::NativeLibrary => NATIVE_LIBRARY_WEIGHT,
            IndicatorKind::Asset => ASSET_WEIGHT,
            IndicatorKind::Path => PATH_WEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameworkIndicator {
    pub patterns: &'static [&'static str],
    pub framework: Framework,
    pub kind: IndicatorKind,
    pub weight: u32,
}

impl FrameworkIndicator {
    const fn new(
        patterns: &'static [&'static str],
        framework: Framework,
        kind: IndicatorKind,
        weight: u32,
    ) -> Self {
        Self {
            patterns,
            framework,
            kind,
            weight,
        }
    }

    const fn native_library(patterns: &'static [&'static str], framework: Framework) -> Self {
        Self::new(
            patterns,
            framework,
            IndicatorKind::NativeLibrary,
            NATIVE_LIBRARY_WEIGHT,
        )
    }

    const fn asset(patterns: &'static [&'static str], framework: Framework) -> Self {
        Self::new(patterns, framework, IndicatorKind::Asset, ASSET_WEIGHT)
    }

    const fn path(patterns: &'static [&'static str], framework: Framework) -> Self {
        Self::new(patterns, framework, IndicatorKind::Path, PATH_WEIGHT)
    }
}

/// Framework-identifying fragment searched in the raw manifest bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManifestFragment {
    pub fragment: &'static str,
    pub framework: Framework,
}

const FLUTTER_LIBRARIES: &[&str] = &["libflutter.so"];

// Any one of these is the React Native runtime; several together are no
// stronger evidence than one.
const REACT_NATIVE_LIBRARIES: &[&str] = &[
    "libreactnativejni.so",
    "libhermes.so",
    "libjsc.so",
    "libreactnative.so",
];

const EXPO_LIBRARIES: &[&str] = &["libexpo_modules_core.so", "libexpo-modules-core.so"];

// Library names also score as plain paths, so a library outside `lib/<arch>/`
// still counts at path weight.
pub static INDICATORS: &[FrameworkIndicator] = &[
    FrameworkIndicator::native_library(FLUTTER_LIBRARIES, Framework::Flutter),
    FrameworkIndicator::asset(&["flutter_assets/"], Framework::Flutter),
    FrameworkIndicator::path(&["io/flutter/"], Framework::Flutter),
    FrameworkIndicator::path(FLUTTER_LIBRARIES, Framework::Flutter),
    FrameworkIndicator::native_library(REACT_NATIVE_LIBRARIES, Framework::ReactNative),
    FrameworkIndicator::asset(&["index.android.bundle"], Framework::ReactNative),
    FrameworkIndicator::path(&["com/facebook/react/"], Framework::ReactNative),
    FrameworkIndicator::path(REACT_NATIVE_LIBRARIES, Framework::ReactNative),
    FrameworkIndicator::native_library(EXPO_LIBRARIES, Framework::Expo),
    FrameworkIndicator::asset(&["assets/app.config"], Framework::Expo),
    FrameworkIndicator::asset(&["assets/app.manifest"], Framework::Expo),
    FrameworkIndicator::path(&["expo/modules/"], Framework::Expo),
    FrameworkIndicator::path(&["host/exp/exponent/"], Framework::Expo),
    FrameworkIndicator::path(EXPO_LIBRARIES, Framework::Expo),
];

/// Weak signals present in almost every package. Each match adds
/// [`PATH_WEIGHT`] to every framework, so it never shifts the balance.
pub static SHARED_INDICATORS: &[&str] = &["classes.dex"];

// A bare "expo" would match the `android:exported` attribute of any manifest.
pub static MANIFEST_FRAGMENTS: &[ManifestFragment] = &[
    ManifestFragment {
        fragment: "io.flutter",
        framework: Framework::Flutter,
    },
    ManifestFragment {
        fragment: "com.facebook.react",
        framework: Framework::ReactNative,
    },
    ManifestFragment {
        fragment: "expo.modules",
        framework: Framework::Expo,
    },
    ManifestFragment {
        fragment: "host.exp.exponent",
        framework: Framework::Expo,
    },
];

pub fn indicators_for(framework: Framework) -> impl Iterator<Item = &'static FrameworkIndicator> {
    INDICATORS.iter().filter(move |i| i.framework == framework)
}
