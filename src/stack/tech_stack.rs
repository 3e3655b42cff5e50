//! Display-oriented multi-label technology tags
//!
//! This detector is independent of [`super::classifier`]: it uses
//! a looser indicator set and no scoring, so its tags may disagree with the
//! single classification of the same package.

use super::classifier::EntryIndex;
use serde::{Deserialize, Serialize};

pub const FALLBACK_LABEL: &str = "Native (Likely)";

struct TechRule {
    label: &'static str,
    patterns: &'static [&'static str],
}

static TECH_RULES: &[TechRule] = &[
    TechRule {
        label: "Flutter",
        patterns: &["libflutter.so", "flutter_assets/"],
    },
    TechRule {
        label: "React Native",
        patterns: &["libreactnativejni.so", "index.android.bundle"],
    },
    TechRule {
        label: "Kotlin",
        patterns: &["kotlin/"],
    },
];

/// Ordered, de-duplicated set of technology labels
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TechStack(Vec<String>);

impl TechStack {
    pub fn detect(index: &EntryIndex) -> Self {
        let mut labels: Vec<String> = TECH_RULES
            .iter()
            .filter(|rule| rule.patterns.iter().any(|p| index.any_contains(p)))
            .map(|rule| rule.label.to_string())
            .collect();

        if labels.is_empty() {
            labels.push(FALLBACK_LABEL.to_string());
        }

        Self(labels)
    }

    pub fn labels(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|l| l == label)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
