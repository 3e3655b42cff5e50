//! Package archive abstraction for testable package reads

mod mock;
mod r#trait;
mod zip_archive;

pub use mock::MockPackageArchive;
pub use r#trait::{
    ArchiveEntry, ArchiveError, EntryBytes, PackageArchive, PackageContents, ReadOptions,
    MANIFEST_ENTRY,
};
pub use zip_archive::ZipPackageArchive;
