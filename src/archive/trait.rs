//! PackageArchive trait definition

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the manifest entry at the archive root
pub const MANIFEST_ENTRY: &str = "AndroidManifest.xml";

const DEFAULT_MAX_MANIFEST_BYTES: u64 = 1_048_576;
const DEFAULT_MAX_SIGNATURE_BYTES: u64 = 1_048_576;

/// Errors that make a package unreadable
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Package not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to open package {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt package archive {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Package unavailable: {0}")]
    Unavailable(String),
}

/// One file record inside a package archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Full path inside the archive, as stored
    pub name: String,
    /// Uncompressed size in bytes
    pub size: u64,
}

impl ArchiveEntry {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

impl AsRef<str> for ArchiveEntry {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

/// Raw bytes of one archive entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryBytes {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Which optional payloads to read alongside the entry listing
#[derive(Debug, Clone)]
pub struct ReadOptions {
    pub read_manifest: bool,
    pub max_manifest_bytes: u64,
    pub read_signatures: bool,
    pub max_signature_bytes: u64,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            read_manifest: true,
            max_manifest_bytes: DEFAULT_MAX_MANIFEST_BYTES,
            read_signatures: true,
            max_signature_bytes: DEFAULT_MAX_SIGNATURE_BYTES,
        }
    }
}

impl ReadOptions {
    pub fn listing_only() -> Self {
        Self {
            read_manifest: false,
            read_signatures: false,
            ..Default::default()
        }
    }
}

/// Everything read from one package in a single pass
#[derive(Debug, Clone, Default)]
pub struct PackageContents {
    pub entries: Vec<ArchiveEntry>,
    /// Manifest bytes, `None` when absent, skipped or over the size limit
    pub manifest: Option<Vec<u8>>,
    pub signature_blocks: Vec<EntryBytes>,
}

/// Read access to one application package.
///
/// Implementations open their own handle per call so that concurrent reads of
/// different packages never share state.
pub trait PackageArchive: Send + Sync {
    fn location(&self) -> &Path;

    fn read_contents(&self, options: &ReadOptions) -> Result<PackageContents, ArchiveError>;
}
