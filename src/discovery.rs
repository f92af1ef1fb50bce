//! Candidate discovery.
//!
//! Turns a set of root paths into a duplicate-tolerant list of artifact
//! references. Traversal errors reduce coverage but never abort the scan.

use crate::record::{Artifact, PluginType};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recognize a candidate by its extension. `.vst3` directories are bundle
/// artifacts; `.vst3` files are single-file VST3 plugins; `.dll` and `.vst`
/// entries are VST2.
fn candidate_type(path: &Path) -> Option<PluginType> {
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "vst3" => Some(PluginType::Vst3),
        "dll" | "vst" => Some(PluginType::Vst2),
        _ => None,
    }
}

/// Walk the given roots and collect candidate artifacts.
///
/// Bundle directories are emitted as a single artifact and not descended
/// into, so a multi-binary `.vst3` bundle yields one candidate rather than
/// one per architecture. No ordering guarantee across roots; the same
/// resolved path may appear more than once when roots overlap (the
/// orchestrator claims paths before processing).
pub fn discover(roots: &[PathBuf]) -> Vec<Artifact> {
    let mut artifacts = Vec::new();

    for root in roots {
        let mut walker = WalkDir::new(root).follow_links(false).into_iter();
        while let Some(entry) = walker.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!("skipping unreadable entry under {}: {err}", root.display());
                    continue;
                }
            };

            let path = entry.path();
            let Some(plugin_type) = candidate_type(path) else {
                continue;
            };

            if entry.file_type().is_dir() {
                artifacts.push(Artifact::new(path, plugin_type));
                walker.skip_current_dir();
            } else if entry.file_type().is_file() {
                artifacts.push(Artifact::new(path, plugin_type));
            }
        }
    }

    artifacts
}

/// Standard plugin install locations for the current platform. Only
/// existing directories are returned; on platforms without conventional
/// install paths the list is empty and the caller decides whether that is
/// a usage error.
pub fn default_roots() -> Vec<PathBuf> {
    let mut roots: Vec<PathBuf> = Vec::new();

    #[cfg(target_os = "windows")]
    {
        for dir in [
            r"C:\Program Files\Common Files\VST3",
            r"C:\Program Files (x86)\Common Files\VST3",
            r"C:\Program Files\Common Files\Steinberg\VST2",
            r"C:\Program Files (x86)\VstPlugins",
            r"C:\Program Files (x86)\Steinberg\VstPlugins",
        ] {
            roots.push(PathBuf::from(dir));
        }
        for (var, tail) in [
            ("USERPROFILE", r"Documents\VST"),
            ("USERPROFILE", r"Documents\VST3"),
            ("LOCALAPPDATA", r"Programs\VST"),
            ("LOCALAPPDATA", r"Programs\VST3"),
            ("APPDATA", "VST3"),
        ] {
            if let Ok(base) = std::env::var(var) {
                roots.push(PathBuf::from(base).join(tail));
            }
        }
        // Vendor subfolders of the standard VST3 directories are roots of
        // their own so per-vendor installs are covered even when the parent
        // is not readable.
        let standard: Vec<PathBuf> = roots
            .iter()
            .filter(|p| p.ends_with("VST3"))
            .cloned()
            .collect();
        for base in standard {
            if let Ok(entries) = std::fs::read_dir(&base) {
                for entry in entries.flatten() {
                    let path = entry.path();
                    if path.is_dir() {
                        roots.push(path);
                    }
                }
            }
        }
    }

    #[cfg(target_os = "macos")]
    {
        roots.push(PathBuf::from("/Library/Audio/Plug-Ins/VST"));
        roots.push(PathBuf::from("/Library/Audio/Plug-Ins/VST3"));
        if let Ok(home) = std::env::var("HOME") {
            roots.push(PathBuf::from(&home).join("Library/Audio/Plug-Ins/VST"));
            roots.push(PathBuf::from(&home).join("Library/Audio/Plug-Ins/VST3"));
        }
    }

    roots.sort();
    roots.dedup();
    roots.retain(|p| p.is_dir());
    roots
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn discovers_files_and_bundles_without_descending_into_bundles() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();

        fs::write(root.join("Plugin.dll"), b"").unwrap();
        fs::write(root.join("Other.vst3"), b"").unwrap();
        fs::write(root.join("notes.txt"), b"").unwrap();

        let bundle = root.join("Bundle.vst3");
        fs::create_dir_all(bundle.join("Contents/x86_64-win")).unwrap();
        fs::write(bundle.join("Contents/x86_64-win/Bundle.vst3"), b"").unwrap();

        let mut found = discover(&[root.to_path_buf()]);
        found.sort_by(|a, b| a.path.cmp(&b.path));

        assert_eq!(found.len(), 3);
        assert!(found
            .iter()
            .any(|a| a.path == bundle && a.plugin_type == PluginType::Vst3));
        assert!(found
            .iter()
            .any(|a| a.path.ends_with("Plugin.dll") && a.plugin_type == PluginType::Vst2));
        assert!(found
            .iter()
            .any(|a| a.path.ends_with("Other.vst3") && a.plugin_type == PluginType::Vst3));
        // The inner architecture binary must not surface as its own artifact.
        assert!(!found.iter().any(|a| a.path.ends_with("x86_64-win/Bundle.vst3")));
    }

    #[test]
    fn missing_root_is_tolerated() {
        let found = discover(&[PathBuf::from("/definitely/not/here")]);
        assert!(found.is_empty());
    }

    #[test]
    fn nested_directories_are_walked() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a/b/c");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("Deep.dll"), b"").unwrap();

        let found = discover(&[tmp.path().to_path_buf()]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].plugin_type, PluginType::Vst2);
    }
}
