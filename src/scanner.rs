//! Scan orchestration.
//!
//! Ties discovery, extraction, resolution and normalization together into
//! one parallel pipeline. Per-artifact work is independent, so artifacts are
//! fanned out over a bounded worker pool; every artifact is claimed exactly
//! once by its symlink-resolved path before any work happens on it, and the
//! final record list is deterministically ordered regardless of worker
//! scheduling.

use crate::discovery;
use crate::extract::{self, Evidence};
use crate::knowledge::KnowledgeBase;
use crate::normalize;
use crate::record::{Artifact, PluginRecord, PluginType};
use crate::resolve::{self, UNKNOWN_MANUFACTURER};
use dashmap::DashSet;
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("no scan roots given and no standard plugin directories exist on this system")]
    NoRoots,
    #[error(transparent)]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Aggregate counters for one scan.
#[derive(Debug, Clone, Default)]
pub struct ScanStats {
    /// Artifacts processed, before deduplication.
    pub artifacts: usize,
    /// Unique records after deduplication.
    pub unique: usize,
    pub vst2: usize,
    pub vst3: usize,
    pub unknown: usize,
    /// Most common manufacturers, largest first.
    pub top_manufacturers: Vec<(String, usize)>,
}

/// Everything a scan produces: the deduplicated catalogue plus counters.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub records: Vec<PluginRecord>,
    pub stats: ScanStats,
}

impl ScanOutcome {
    /// Records whose manufacturer could not be resolved.
    pub fn unresolved(&self) -> Vec<&PluginRecord> {
        self.records
            .iter()
            .filter(|r| r.manufacturer == UNKNOWN_MANUFACTURER)
            .collect()
    }
}

/// Configured scan pipeline. Cheap to construct; one instance per scan.
pub struct Scanner {
    knowledge: KnowledgeBase,
    threads: Option<usize>,
}

impl Scanner {
    pub fn new(knowledge: KnowledgeBase) -> Self {
        Self {
            knowledge,
            threads: None,
        }
    }

    /// Cap the worker pool. `None` leaves the sizing to the pool.
    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    /// Scan the given roots, falling back to the platform's standard plugin
    /// directories when none are given.
    pub fn scan(&self, roots: &[PathBuf]) -> Result<ScanOutcome, ScanError> {
        let roots = if roots.is_empty() {
            discovery::default_roots()
        } else {
            roots.to_vec()
        };
        if roots.is_empty() {
            return Err(ScanError::NoRoots);
        }

        tracing::info!("scanning {} root(s)", roots.len());
        let artifacts = discovery::discover(&roots);
        tracing::info!("found {} candidate artifact(s)", artifacts.len());

        let claimed: DashSet<PathBuf> = DashSet::new();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads.unwrap_or(0))
            .build()?;

        let records: Vec<PluginRecord> = pool.install(|| {
            artifacts
                .par_iter()
                .filter(|artifact| {
                    // Claim by resolved path so symlinked and overlapping
                    // roots cannot process the same artifact twice.
                    let resolved = std::fs::canonicalize(&artifact.path)
                        .unwrap_or_else(|_| artifact.path.clone());
                    claimed.insert(resolved)
                })
                .map(|artifact| self.process(artifact))
                .collect()
        });

        let processed = records.len();
        let mut records = normalize::normalize_and_merge(&self.knowledge, records);
        records.sort_by(|a, b| {
            (a.manufacturer.to_lowercase(), a.name.to_lowercase(), a.plugin_type)
                .cmp(&(b.manufacturer.to_lowercase(), b.name.to_lowercase(), b.plugin_type))
        });

        let stats = compute_stats(processed, &records);
        tracing::info!(
            "catalogued {} unique plugin(s), {} unresolved",
            stats.unique,
            stats.unknown
        );
        Ok(ScanOutcome { records, stats })
    }

    /// Full per-artifact pipeline: gather evidence, resolve identity, build
    /// the raw (pre-normalization) record.
    fn process(&self, artifact: &Artifact) -> PluginRecord {
        let evidence = extract::extract(artifact);
        let head = extract::binary_candidates(artifact)
            .first()
            .map(|p| extract::read_binary_head(p))
            .unwrap_or_default();

        let (manufacturer, name) =
            resolve::resolve(artifact, &evidence, &head, &self.knowledge);
        tracing::debug!(
            "{} -> {} / {}",
            artifact.path.display(),
            manufacturer,
            name
        );

        let arch = detect_arch(artifact, &head);
        build_record(artifact, evidence, manufacturer, name, arch)
    }
}

fn build_record(
    artifact: &Artifact,
    evidence: Evidence,
    manufacturer: String,
    name: String,
    arch: Option<&'static str>,
) -> PluginRecord {
    PluginRecord {
        name,
        manufacturer,
        plugin_type: artifact.plugin_type,
        path: artifact.path.clone(),
        identifier: evidence.identifier().map(str::to_string),
        version: evidence.version().map(str::to_string),
        arch: arch.map(str::to_string),
        extra: evidence.into_map(),
    }
}

/// Architecture of the artifact's binary. Bundles advertise it through
/// their per-architecture directory layout; flat files through the image
/// header in the already-read prefix.
fn detect_arch(artifact: &Artifact, head: &[u8]) -> Option<&'static str> {
    if artifact.path.is_dir() {
        let contents = artifact.path.join("Contents");
        if contents.join("x86_64-win").is_dir() {
            return Some("x64");
        }
        if contents.join("x86-win").is_dir() {
            return Some("x86");
        }
    }
    crate::resource::pe_architecture(head)
}

fn compute_stats(processed: usize, records: &[PluginRecord]) -> ScanStats {
    let mut by_manufacturer: HashMap<&str, usize> = HashMap::new();
    let mut stats = ScanStats {
        artifacts: processed,
        unique: records.len(),
        ..ScanStats::default()
    };

    for record in records {
        match record.plugin_type {
            PluginType::Vst2 => stats.vst2 += 1,
            PluginType::Vst3 => stats.vst3 += 1,
        }
        if record.manufacturer == UNKNOWN_MANUFACTURER {
            stats.unknown += 1;
        } else {
            *by_manufacturer.entry(record.manufacturer.as_str()).or_default() += 1;
        }
    }

    let mut counts: Vec<(String, usize)> = by_manufacturer
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts.truncate(5);
    stats.top_manufacturers = counts;
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scanner() -> Scanner {
        Scanner::new(KnowledgeBase::new()).with_threads(Some(2))
    }

    #[test]
    fn no_roots_is_an_error() {
        // Linux has no standard plugin directories, so an empty root list
        // cannot fall back to anything.
        #[cfg(target_os = "linux")]
        assert!(matches!(scanner().scan(&[]), Err(ScanError::NoRoots)));
    }

    #[test]
    fn overlapping_roots_yield_each_plugin_once() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("Gullfoss.dll"), b"").unwrap();

        let root = tmp.path().to_path_buf();
        let outcome = scanner().scan(&[root.clone(), root]).unwrap();
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.stats.artifacts, 1);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_root_does_not_duplicate() {
        let tmp = tempfile::tempdir().unwrap();
        let real = tmp.path().join("real");
        fs::create_dir(&real).unwrap();
        fs::write(real.join("Plugin.dll"), b"").unwrap();
        let link = tmp.path().join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let outcome = scanner().scan(&[real, link]).unwrap();
        assert_eq!(outcome.records.len(), 1);
    }

    #[test]
    fn records_are_sorted_and_counted() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("Ozone 11.dll"), b"").unwrap();
        fs::write(tmp.path().join("Gullfoss.vst3"), b"").unwrap();
        fs::write(tmp.path().join("enigma9.dll"), b"").unwrap();
        fs::write(
            tmp.path().join("Gullfoss.vst3.metadata.json"),
            r#"{"manufacturer": "2caudio", "version": "1.8.0"}"#,
        )
        .unwrap();

        let outcome = scanner().scan(&[tmp.path().to_path_buf()]).unwrap();
        let summary: Vec<(&str, &str)> = outcome
            .records
            .iter()
            .map(|r| (r.manufacturer.as_str(), r.name.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("2CAudio", "Gullfoss"),
                ("iZotope", "Ozone 11"),
                ("Unknown", "enigma9"),
            ]
        );
        assert_eq!(outcome.stats.vst2, 2);
        assert_eq!(outcome.stats.vst3, 1);
        assert_eq!(outcome.stats.unknown, 1);
        assert_eq!(outcome.unresolved().len(), 1);
        assert_eq!(outcome.records[0].version.as_deref(), Some("1.8.0"));
    }

    #[test]
    fn bundle_arch_comes_from_directory_layout() {
        let tmp = tempfile::tempdir().unwrap();
        let bundle = tmp.path().join("Thing.vst3");
        fs::create_dir_all(bundle.join("Contents/x86_64-win")).unwrap();
        fs::write(bundle.join("Contents/x86_64-win/Thing.vst3"), b"").unwrap();

        let outcome = scanner().scan(&[tmp.path().to_path_buf()]).unwrap();
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].arch.as_deref(), Some("x64"));
    }
}
