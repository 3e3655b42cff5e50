crate::define_label_enum! {
    /// Best-guess framework an application package was built with
    AppType (fallback = Unknown) {
        Flutter => "flutter" : "Flutter" | "FLUTTER",
        ReactNative => "react-native" : "React Native" | "REACT_NATIVE",
        ReactNativeExpo => "react-native-expo" : "React Native with Expo" | "REACT_NATIVE_EXPO",
        Native => "native" : "Native Only" | "NATIVE",
        /// Package could not be opened or read
        Unknown => "unknown" : "Unknown" | "UNKNOWN",
    }
}

impl AppType {
    pub fn is_cross_platform(&self) -> bool {
        matches!(
            self,
            AppType::Flutter | AppType::ReactNative | AppType::ReactNativeExpo
        )
    }
}
