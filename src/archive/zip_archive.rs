use super::{
    ArchiveEntry, ArchiveError, EntryBytes, PackageArchive, PackageContents, ReadOptions,
    MANIFEST_ENTRY,
};
use crate::signing::is_signature_block;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use zip::ZipArchive;

/// Package archive backed by a zip file on disk
#[derive(Debug, Clone)]
pub struct ZipPackageArchive {
    path: PathBuf,
}

impl ZipPackageArchive {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn open(&self) -> Result<ZipArchive<BufReader<File>>, ArchiveError> {
        let file = File::open(&self.path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ArchiveError::NotFound(self.path.clone())
            } else {
                ArchiveError::Unreadable {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;

        ZipArchive::new(BufReader::new(file)).map_err(|source| self.corrupt(source))
    }

    fn corrupt(&self, source: zip::result::ZipError) -> ArchiveError {
        ArchiveError::Corrupt {
            path: self.path.clone(),
            source,
        }
    }

    // Optional payloads never fail the whole read.
    fn read_entry(
        &self,
        zip: &mut ZipArchive<BufReader<File>>,
        index: usize,
        name: &str,
        max_bytes: u64,
    ) -> Option<Vec<u8>> {
        let entry = match zip.by_index(index) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(package = %self.path.display(), entry = name, error = %e, "Failed to open entry");
                return None;
            }
        };

        if entry.size() > max_bytes {
            debug!(
                package = %self.path.display(),
                entry = name,
                size = entry.size(),
                max_bytes,
                "Entry exceeds size limit, skipping"
            );
            return None;
        }

        let mut bytes = Vec::with_capacity(entry.size() as usize);
        match entry.take(max_bytes).read_to_end(&mut bytes) {
            Ok(_) => Some(bytes),
            Err(e) => {
                warn!(package = %self.path.display(), entry = name, error = %e, "Failed to read entry");
                None
            }
        }
    }
}

impl PackageArchive for ZipPackageArchive {
    fn location(&self) -> &Path {
        &self.path
    }

    fn read_contents(&self, options: &ReadOptions) -> Result<PackageContents, ArchiveError> {
        let mut zip = self.open()?;

        let mut entries = Vec::with_capacity(zip.len());
        let mut manifest_index = None;
        let mut signature_indices = Vec::new();

        for index in 0..zip.len() {
            let entry = zip.by_index_raw(index).map_err(|e| self.corrupt(e))?;
            if entry.is_dir() {
                continue;
            }

            let name = entry.name().to_string();
            if name == MANIFEST_ENTRY {
                manifest_index = Some(index);
            } else if is_signature_block(&name) {
                signature_indices.push((index, name.clone()));
            }
            entries.push(ArchiveEntry::new(name, entry.size()));
        }

        let manifest = match manifest_index {
            Some(index) if options.read_manifest => {
                self.read_entry(&mut zip, index, MANIFEST_ENTRY, options.max_manifest_bytes)
            }
            _ => None,
        };

        let signature_blocks = if options.read_signatures {
            signature_indices
                .into_iter()
                .filter_map(|(index, name)| {
                    self.read_entry(&mut zip, index, &name, options.max_signature_bytes)
                        .map(|bytes| EntryBytes { name, bytes })
                })
                .collect()
        } else {
            Vec::new()
        };

        debug!(
            package = %self.path.display(),
            entries = entries.len(),
            has_manifest = manifest.is_some(),
            signature_blocks = signature_blocks.len(),
            "Read package contents"
        );

        Ok(PackageContents {
            entries,
            manifest,
            signature_blocks,
        })
    }
}
