//! Framework detection for application packages.
//!
//! Two independent detectors live here:
//!
//! 1. **Classifier**: weighted indicator scoring that assigns exactly one
//!    [`AppType`] per package (see [`classifier`] and [`score`]).
//! 2. **Tech stack**: a looser multi-label tagger used for display
//!    (see [`tech_stack`]). Its labels may disagree with the classification.
//!
//! Native library enumeration ([`native_libs`]) shares the `lib/<arch>/`
//! path rules with the classifier.
//!
//! # Example
//!
//! ```
//! use apklens::stack::{classify, AppType};
//!
//! let entries = ["lib/arm64-v8a/libflutter.so", "assets/flutter_assets/kernel_blob.bin"];
//! assert_eq!(classify(&entries, None), AppType::Flutter);
//! ```

#[macro_use]
pub mod id_enum_macro;

pub mod app_type;
pub mod classifier;
pub mod indicator;
pub mod native_libs;
pub mod score;
pub mod tech_stack;

pub use app_type::AppType;
pub use classifier::{classify, EntryIndex, PackageClassifier};
pub use indicator::{Framework, FrameworkIndicator, IndicatorKind};
pub use native_libs::{enumerate_native_libraries, NativeLibrary};
pub use score::{FrameworkScore, DEFAULT_THRESHOLD};
pub use tech_stack::TechStack;
