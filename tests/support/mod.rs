//! Shared helpers for building package archives in integration tests

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Writes a zip package at `dir/name` with the given entries.
pub fn write_package(dir: &Path, name: &str, files: &[(&str, &[u8])]) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).expect("Failed to create package file");
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (entry, bytes) in files {
        writer
            .start_file(*entry, options)
            .expect("Failed to start zip entry");
        writer.write_all(bytes).expect("Failed to write zip entry");
    }
    writer.finish().expect("Failed to finish zip archive");

    path
}

/// Writes a package whose entries are all empty files.
pub fn write_listing(dir: &Path, name: &str, entries: &[&str]) -> PathBuf {
    let files: Vec<(&str, &[u8])> = entries.iter().map(|e| (*e, &b""[..])).collect();
    write_package(dir, name, &files)
}

pub fn flutter_package(dir: &Path) -> PathBuf {
    write_package(
        dir,
        "flutter.apk",
        &[
            ("AndroidManifest.xml", b"<manifest/>".as_slice()),
            ("classes.dex", b"dex\n035".as_slice()),
            ("lib/arm64-v8a/libflutter.so", [0u8; 2048].as_slice()),
            ("lib/arm64-v8a/libapp.so", [0u8; 1024].as_slice()),
            ("assets/flutter_assets/kernel_blob.bin", b"kernel".as_slice()),
            ("META-INF/CERT.RSA", b"certificate".as_slice()),
        ],
    )
}

pub fn react_native_package(dir: &Path) -> PathBuf {
    write_package(
        dir,
        "react-native.apk",
        &[
            ("classes.dex", b"dex\n035".as_slice()),
            ("assets/index.android.bundle", b"__d(function(){})".as_slice()),
            ("lib/armeabi-v7a/libhermes.so", [0u8; 512].as_slice()),
            ("lib/armeabi-v7a/libreactnativejni.so", [0u8; 256].as_slice()),
            ("kotlin/kotlin.kotlin_builtins", b"".as_slice()),
        ],
    )
}

pub fn native_package(dir: &Path) -> PathBuf {
    write_package(
        dir,
        "native.apk",
        &[
            ("AndroidManifest.xml", b"<manifest android:exported=\"true\"/>".as_slice()),
            ("classes.dex", b"dex\n035".as_slice()),
            ("res/layout/activity_main.xml", b"".as_slice()),
        ],
    )
}
