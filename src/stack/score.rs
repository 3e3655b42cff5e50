use super::indicator::Framework;
use super::AppType;
use serde::{Deserialize, Serialize};

/// Minimum score a framework needs before it can be selected
pub const DEFAULT_THRESHOLD: u32 = 2;

/// Accumulated indicator weights per framework. Scores only ever grow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkScore {
    pub flutter: u32,
    pub react_native: u32,
    pub expo: u32,
}

impl FrameworkScore {
    pub fn new(flutter: u32, react_native: u32, expo: u32) -> Self {
        Self {
            flutter,
            react_native,
            expo,
        }
    }

    pub fn add(&mut self, framework: Framework, weight: u32) {
        let slot = match framework {
            Framework::Flutter => &mut self.flutter,
            Framework::ReactNative => &mut self.react_native,
            Framework::Expo => &mut self.expo,
        };
        *slot = slot.saturating_add(weight);
    }

    pub fn get(&self, framework: Framework) -> u32 {
        match framework {
            Framework::Flutter => self.flutter,
            Framework::ReactNative => self.react_native,
            Framework::Expo => self.expo,
        }
    }

    pub fn total(&self) -> u32 {
        self.flutter + self.react_native + self.expo
    }

    /// Picks the classification for these scores.
    ///
    /// Flutter must strictly beat both other scores. Expo is checked before
    /// plain React Native and wins ties against it. Anything below `threshold`
    /// falls through to [`AppType::Native`].
    pub fn decide(&self, threshold: u32) -> AppType {
        if self.flutter >= threshold
            && self.flutter > self.react_native
            && self.flutter > self.expo
        {
            AppType::Flutter
        } else if self.expo >= threshold && self.expo >= self.react_native {
            AppType::ReactNativeExpo
        } else if self.react_native >= threshold {
            AppType::ReactNative
        } else {
            AppType::Native
        }
    }
}
