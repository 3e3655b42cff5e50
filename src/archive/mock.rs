use super::{
    ArchiveEntry, ArchiveError, EntryBytes, PackageArchive, PackageContents, ReadOptions,
    MANIFEST_ENTRY,
};
use crate::signing::is_signature_block;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

#[derive(Debug, Clone)]
struct MockEntry {
    name: String,
    size: u64,
    content: Option<Vec<u8>>,
}

/// In-memory package archive for tests
pub struct MockPackageArchive {
    entries: RwLock<Vec<MockEntry>>,
    failure: Option<String>,
    location: PathBuf,
}

impl MockPackageArchive {
    pub fn new() -> Self {
        Self::with_location(PathBuf::from("/mock/app.apk"))
    }

    pub fn with_location(location: PathBuf) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            failure: None,
            location,
        }
    }

    /// An archive whose every read fails, standing in for a missing or
    /// corrupt package.
    pub fn unreadable(reason: &str) -> Self {
        Self {
            failure: Some(reason.to_string()),
            ..Self::new()
        }
    }

    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        let archive = Self::new();
        for name in names {
            archive.add_entry(name.as_ref(), 0);
        }
        archive
    }

    /// Adds an entry with a declared size and no readable content.
    pub fn add_entry(&self, name: &str, size: u64) {
        self.entries.write().unwrap().push(MockEntry {
            name: name.to_string(),
            size,
            content: None,
        });
    }

    pub fn add_file(&self, name: &str, content: &[u8]) {
        self.entries.write().unwrap().push(MockEntry {
            name: name.to_string(),
            size: content.len() as u64,
            content: Some(content.to_vec()),
        });
    }
}

impl Default for MockPackageArchive {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageArchive for MockPackageArchive {
    fn location(&self) -> &Path {
        &self.location
    }

    fn read_contents(&self, options: &ReadOptions) -> Result<PackageContents, ArchiveError> {
        if let Some(reason) = &self.failure {
            return Err(ArchiveError::Unavailable(reason.clone()));
        }

        let entries = self.entries.read().unwrap();
        // Directory records are skipped, as the zip reader does.
        let files: Vec<&MockEntry> = entries.iter().filter(|e| !is_directory(&e.name)).collect();

        let mut contents = PackageContents {
            entries: files
                .iter()
                .map(|e| ArchiveEntry::new(e.name.clone(), e.size))
                .collect(),
            ..Default::default()
        };

        for entry in files {
            let Some(content) = &entry.content else {
                continue;
            };

            if entry.name == MANIFEST_ENTRY
                && options.read_manifest
                && entry.size <= options.max_manifest_bytes
            {
                contents.manifest = Some(content.clone());
            } else if is_signature_block(&entry.name)
                && options.read_signatures
                && entry.size <= options.max_signature_bytes
            {
                contents.signature_blocks.push(EntryBytes {
                    name: entry.name.clone(),
                    bytes: content.clone(),
                });
            }
        }

        Ok(contents)
    }
}

fn is_directory(name: &str) -> bool {
    name.ends_with('/') || name.ends_with('\\')
}
