//! Integration tests for package analysis
//!
//! These tests build real zip packages on disk and run the analyzer and the
//! batch scanner over them.

mod support;

use apklens::archive::ReadOptions;
use apklens::stack::PackageClassifier;
use apklens::{discover_packages, AppType, ApklensConfig, BatchScanner, PackageAnalyzer, ScanSummary};
use std::fs;
use tempfile::TempDir;

fn utf16le(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(|unit| unit.to_le_bytes()).collect()
}

#[test]
fn test_compiled_manifest_strings_are_matched() {
    let dir = TempDir::new().unwrap();
    let manifest = utf16le("<meta-data android:name=\"expo.modules.updates.ENABLED\"/>");
    let path = support::write_package(
        dir.path(),
        "expo.apk",
        &[
            ("AndroidManifest.xml", manifest.as_slice()),
            ("lib/arm64-v8a/libhermes.so", [0u8; 64].as_slice()),
        ],
    );

    let analysis = PackageAnalyzer::default().analyze(&path);
    assert_eq!(analysis.scores.react_native, 4);
    assert_eq!(analysis.scores.expo, 2 + 4);
    assert_eq!(analysis.app_type, AppType::ReactNativeExpo);
}

#[test]
fn test_manifest_inspection_can_be_disabled() {
    let dir = TempDir::new().unwrap();
    let path = support::write_package(
        dir.path(),
        "expo.apk",
        &[
            ("AndroidManifest.xml", b"host.exp.exponent".as_slice()),
            ("lib/arm64-v8a/libhermes.so", [0u8; 64].as_slice()),
            ("assets/index.android.bundle", b"__d()".as_slice()),
        ],
    );

    let with_manifest = PackageAnalyzer::default().analyze(&path);
    assert_eq!(with_manifest.app_type, AppType::ReactNativeExpo);

    let listing_only =
        PackageAnalyzer::with_parts(PackageClassifier::default(), ReadOptions::listing_only());
    let analysis = listing_only.analyze(&path);
    assert_eq!(analysis.app_type, AppType::ReactNative);
    assert!(analysis.signatures.is_empty());
}

#[test]
fn test_oversized_manifest_is_skipped() {
    let dir = TempDir::new().unwrap();
    let mut manifest = b"io.flutter ".to_vec();
    manifest.resize(4096, b' ');
    let path = support::write_package(
        dir.path(),
        "big-manifest.apk",
        &[
            ("AndroidManifest.xml", manifest.as_slice()),
            ("lib/arm64-v8a/libflutter.so", [0u8; 16].as_slice()),
        ],
    );

    let options = ReadOptions {
        max_manifest_bytes: 1024,
        ..ReadOptions::default()
    };
    let analyzer = PackageAnalyzer::with_parts(PackageClassifier::default(), options);
    let analysis = analyzer.analyze(&path);

    assert!(analysis.is_readable());
    assert_eq!(analysis.scores.flutter, 4);
    assert_eq!(analysis.app_type, AppType::Flutter);
}

#[test]
fn test_threshold_from_config() {
    let dir = TempDir::new().unwrap();
    let path = support::write_listing(dir.path(), "weak.apk", &["assets/flutter_assets/a.bin"]);

    let config = ApklensConfig {
        score_threshold: 3,
        ..ApklensConfig::default()
    };
    assert_eq!(PackageAnalyzer::new(&config).analyze(&path).app_type, AppType::Native);
    assert_eq!(PackageAnalyzer::default().analyze(&path).app_type, AppType::Flutter);
}

#[test]
fn test_directory_entries_are_ignored() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dirs.apk");
    {
        use std::io::Write;
        use zip::write::SimpleFileOptions;

        let mut writer = zip::ZipWriter::new(fs::File::create(&path).unwrap());
        let options = SimpleFileOptions::default();
        writer.add_directory("lib/arm64-v8a/", options).unwrap();
        writer.start_file("lib/arm64-v8a/libflutter.so", options).unwrap();
        writer.write_all(&[0u8; 32]).unwrap();
        writer.finish().unwrap();
    }

    let analysis = PackageAnalyzer::default().analyze(&path);
    assert_eq!(analysis.native_libraries.len(), 1);
    assert_eq!(analysis.native_libraries[0].name, "libflutter.so");
    assert_eq!(analysis.native_libraries[0].size, 32);
}

#[tokio::test]
async fn test_batch_scan_over_directory() {
    let dir = TempDir::new().unwrap();
    support::flutter_package(dir.path());
    support::react_native_package(dir.path());
    support::native_package(dir.path());
    fs::write(dir.path().join("broken.apk"), b"not a zip archive").unwrap();

    let packages = discover_packages(dir.path(), true).unwrap();
    assert_eq!(packages.len(), 4);

    let scanner = BatchScanner::new(PackageAnalyzer::default(), 2);
    let results = scanner.scan(packages.clone()).await;

    assert_eq!(results.len(), 4);
    for (result, path) in results.iter().zip(&packages) {
        assert_eq!(&result.path, path);
    }

    let summary = ScanSummary::from_results(&results);
    assert_eq!(summary.total, 4);
    assert_eq!(summary.count(AppType::Flutter), 1);
    assert_eq!(summary.count(AppType::ReactNative), 1);
    assert_eq!(summary.count(AppType::Native), 1);
    assert_eq!(summary.count(AppType::Unknown), 1);
    assert_eq!(summary.count(AppType::ReactNativeExpo), 0);
}

#[tokio::test]
async fn test_batch_scan_reports_progress_for_each_package() {
    let dir = TempDir::new().unwrap();
    let paths = vec![
        support::flutter_package(dir.path()),
        support::native_package(dir.path()),
        dir.path().join("missing.apk"),
    ];

    let mut seen = Vec::new();
    let results = BatchScanner::new(PackageAnalyzer::default(), 1)
        .scan_with_progress(paths, |analysis| seen.push(analysis.file_name.clone()))
        .await;

    seen.sort();
    assert_eq!(seen, vec!["flutter.apk", "missing.apk", "native.apk"]);
    assert_eq!(results[2].app_type, AppType::Unknown);
}
