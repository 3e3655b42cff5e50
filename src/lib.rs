//! apklens - framework detection for Android application packages
//!
//! This library inspects the entries of an application package (APK) and
//! decides which cross-platform framework produced it: Flutter, React Native,
//! React Native with Expo, or none (native).
//!
//! # Core Concepts
//!
//! - **Indicators**: `(pattern, framework, weight)` rules matched against the
//!   lower-cased entry names and, optionally, the manifest bytes
//! - **Scoring**: matched indicator weights are summed per framework and a fixed
//!   priority rule picks one [`AppType`]
//! - **Unreadable packages**: reported as [`AppType::Unknown`], never as errors
//!
//! # Example Usage
//!
//! ```no_run
//! use apklens::{ApklensConfig, PackageAnalyzer};
//!
//! let analyzer = PackageAnalyzer::new(&ApklensConfig::default());
//! let analysis = analyzer.analyze("base.apk");
//!
//! println!("Framework: {}", analysis.app_type);
//! for lib in &analysis.native_libraries {
//!     println!("{} {} {}", lib.arch, lib.name, lib.size);
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`stack`]: indicator catalog, scoring, classification and tech-stack tags
//! - [`archive`]: package archive access (zip on disk, in-memory mock)
//! - [`analyzer`]: single-package analysis with failure recovery
//! - [`scan`]: package discovery and concurrent batch analysis

pub mod analyzer;
pub mod archive;
pub mod cli;
pub mod config;
pub mod scan;
pub mod signing;
pub mod stack;
pub mod util;

pub use analyzer::{PackageAnalysis, PackageAnalyzer};
pub use archive::{ArchiveEntry, ArchiveError, PackageArchive, ZipPackageArchive};
pub use config::{ApklensConfig, ConfigError};
pub use scan::{discover_packages, BatchScanner, ScanError, ScanSummary};
pub use stack::{classify, enumerate_native_libraries, AppType, FrameworkScore, NativeLibrary};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
