//! Package discovery and concurrent batch analysis

use crate::analyzer::{PackageAnalysis, PackageAnalyzer};
use crate::stack::AppType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info};
use walkdir::WalkDir;

const PACKAGE_EXTENSION: &str = "apk";

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Scan root not found: {0}")]
    RootNotFound(PathBuf),

    #[error("Failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Finds package files under `root`.
///
/// A file root is returned as-is regardless of its extension. Directory
/// results are sorted for stable output.
pub fn discover_packages(root: &Path, recursive: bool) -> Result<Vec<PathBuf>, ScanError> {
    if !root.exists() {
        return Err(ScanError::RootNotFound(root.to_path_buf()));
    }
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut packages = Vec::new();

    for entry in WalkDir::new(root).max_depth(max_depth) {
        let entry = entry.map_err(|source| ScanError::Walk {
            path: root.to_path_buf(),
            source,
        })?;

        if entry.file_type().is_file() && is_package_file(entry.path()) {
            packages.push(entry.into_path());
        }
    }

    packages.sort();
    debug!(root = %root.display(), found = packages.len(), "Discovered packages");
    Ok(packages)
}

fn is_package_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(PACKAGE_EXTENSION))
        .unwrap_or(false)
}

/// Runs [`PackageAnalyzer`] over many packages on the blocking pool.
///
/// Every package gets its own task and its own archive handle; at most
/// `max_concurrency` packages are read at once.
pub struct BatchScanner {
    analyzer: Arc<PackageAnalyzer>,
    permits: Arc<Semaphore>,
    max_concurrency: usize,
}

impl BatchScanner {
    pub fn new(analyzer: PackageAnalyzer, max_concurrency: usize) -> Self {
        let max_concurrency = max_concurrency.max(1);
        Self {
            analyzer: Arc::new(analyzer),
            permits: Arc::new(Semaphore::new(max_concurrency)),
            max_concurrency,
        }
    }

    pub async fn scan(&self, paths: Vec<PathBuf>) -> Vec<PackageAnalysis> {
        self.scan_with_progress(paths, |_| {}).await
    }

    /// Scans `paths`, calling `on_complete` as each package finishes.
    /// Results come back in input order.
    pub async fn scan_with_progress<F>(
        &self,
        paths: Vec<PathBuf>,
        mut on_complete: F,
    ) -> Vec<PackageAnalysis>
    where
        F: FnMut(&PackageAnalysis),
    {
        info!(
            packages = paths.len(),
            max_concurrency = self.max_concurrency,
            "Starting batch scan"
        );
        let start = std::time::Instant::now();

        let mut tasks = JoinSet::new();
        for (position, path) in paths.iter().cloned().enumerate() {
            let analyzer = Arc::clone(&self.analyzer);
            let permits = Arc::clone(&self.permits);

            tasks.spawn(async move {
                let _permit = permits.acquire_owned().await;
                let worker_path = path.clone();
                let analysis =
                    tokio::task::spawn_blocking(move || analyzer.analyze(&worker_path)).await;

                let analysis = match analysis {
                    Ok(analysis) => analysis,
                    Err(e) => {
                        error!(package = %path.display(), error = %e, "Analysis task failed");
                        PackageAnalysis::unreadable(&path, format!("analysis task failed: {}", e))
                    }
                };
                (position, analysis)
            });
        }

        let mut results: Vec<Option<PackageAnalysis>> = vec![None; paths.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((position, analysis)) => {
                    on_complete(&analysis);
                    results[position] = Some(analysis);
                }
                Err(e) => error!(error = %e, "Scan task aborted"),
            }
        }

        let results: Vec<PackageAnalysis> = results
            .into_iter()
            .zip(paths.iter())
            .map(|(analysis, path)| {
                analysis.unwrap_or_else(|| PackageAnalysis::unreadable(path, "scan task aborted"))
            })
            .collect();

        info!(
            packages = results.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "Batch scan completed"
        );

        results
    }
}

/// Package counts per classification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    pub total: usize,
    pub by_type: BTreeMap<String, usize>,
}

impl ScanSummary {
    pub fn from_results(results: &[PackageAnalysis]) -> Self {
        let mut by_type = BTreeMap::new();
        for analysis in results {
            *by_type
                .entry(analysis.app_type.label().to_string())
                .or_insert(0) += 1;
        }

        Self {
            total: results.len(),
            by_type,
        }
    }

    pub fn count(&self, app_type: AppType) -> usize {
        self.by_type.get(app_type.label()).copied().unwrap_or(0)
    }
}
