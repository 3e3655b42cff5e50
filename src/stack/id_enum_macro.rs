/// Defines a closed identifier enum with a stable serialized label, a display
/// name, optional aliases, and a fallback variant for unrecognized labels.
///
/// Parsing never fails: any label that is not a known label, display name or
/// alias resolves to the fallback variant.
#[macro_export]
macro_rules! define_label_enum {
    (
        $(#[$enum_meta:meta])*
        $enum_name:ident (fallback = $fallback:ident) {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $label:literal : $display_name:literal
                $( | $alias:literal )*
            ),* $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $enum_name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl serde::Serialize for $enum_name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.label())
            }
        }

        impl<'de> serde::Deserialize<'de> for $enum_name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Ok(Self::from_label(&s))
            }
        }

        impl $enum_name {
            /// Stable machine-readable label
            pub fn label(&self) -> &'static str {
                match self {
                    $(
                        Self::$variant => $label,
                    )*
                }
            }

            /// Human-readable name
            pub fn name(&self) -> &'static str {
                match self {
                    $(
                        Self::$variant => $display_name,
                    )*
                }
            }

            pub fn from_label(label: &str) -> Self {
                match label.trim() {
                    $(
                        $label | $display_name $(| $alias)* => Self::$variant,
                    )*
                    _ => Self::$fallback,
                }
            }

            pub fn all_variants() -> &'static [Self] {
                &[
                    $(
                        Self::$variant,
                    )*
                ]
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::from_label(s))
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.name())
            }
        }
    };
}
