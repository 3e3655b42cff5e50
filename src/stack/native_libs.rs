use crate::archive::ArchiveEntry;
use serde::{Deserialize, Serialize};

/// A shared library shipped under `lib/<arch>/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeLibrary {
    pub name: String,
    pub size: u64,
    pub arch: String,
}

/// Splits a normalized entry name into `(arch, file name)` when it lies under
/// `lib/<arch>/`.
pub(crate) fn split_library_path(normalized: &str) -> Option<(&str, &str)> {
    if !normalized.starts_with("lib/") {
        return None;
    }
    let segments: Vec<&str> = normalized.split('/').collect();
    let file_name = segments[segments.len() - 1];
    if segments.len() < 3 || file_name.is_empty() {
        return None;
    }
    Some((segments[1], file_name))
}

/// Lists every native library entry, one record per physical entry.
///
/// A library shipped for several ABIs appears once per ABI. Names and
/// architectures are reported lower-cased.
pub fn enumerate_native_libraries(entries: &[ArchiveEntry]) -> Vec<NativeLibrary> {
    entries
        .iter()
        .filter_map(|entry| {
            let normalized = entry.name.to_lowercase();
            split_library_path(&normalized).map(|(arch, name)| NativeLibrary {
                name: name.to_string(),
                size: entry.size,
                arch: arch.to_string(),
            })
        })
        .collect()
}
