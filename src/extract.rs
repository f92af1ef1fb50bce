//! Per-artifact evidence extraction.
//!
//! Every source here follows the same contract: it either contributes
//! key/value evidence or contributes nothing. Parse failures are local to
//! one source and never surface past `extract`: less evidence, never an
//! error.

use crate::record::Artifact;
use crate::resource;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Content inspection reads at most this many bytes of a binary.
pub const BINARY_HEAD_LIMIT: usize = 256 * 1024;

/// Files larger than this are skipped entirely for content scanning.
pub const BINARY_SIZE_CEILING: u64 = 20 * 1024 * 1024;

/// Flat key/value bag of raw metadata gathered for one artifact.
///
/// Keys keep their source spelling (`CFBundleName`, `CompanyName`,
/// sidecar `manufacturer`, ...) so the untouched evidence can be retained
/// on the record for audit. Accessors encode the preference order between
/// sources for each logical field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evidence(BTreeMap<String, String>);

impl Evidence {
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        if !value.trim().is_empty() {
            self.0.insert(key.into(), value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.0
    }

    fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.get(key))
    }

    /// Declared display name, preferring the module descriptor over the
    /// bundle descriptor over a sidecar.
    pub fn declared_name(&self) -> Option<&str> {
        self.first_of(&["Name", "CFBundleName", "CFBundleDisplayName", "name"])
    }

    /// Explicit vendor/manufacturer declaration, preferring the module
    /// descriptor, then the audio-component-specific bundle field over the
    /// generic one, then a sidecar.
    pub fn declared_vendor(&self) -> Option<&str> {
        self.first_of(&[
            "Vendor",
            "AudioComponentManufacturer",
            "Manufacturer",
            "manufacturer",
        ])
    }

    pub fn identifier(&self) -> Option<&str> {
        self.first_of(&["CFBundleIdentifier", "identifier"])
    }

    pub fn version(&self) -> Option<&str> {
        self.first_of(&["CFBundleShortVersionString", "Version", "version"])
    }

    pub fn copyright(&self) -> Option<&str> {
        self.first_of(&["NSHumanReadableCopyright"])
    }
}

/// Pull whatever evidence exists for the artifact. Never fails: each source
/// that is absent or malformed simply contributes nothing.
pub fn extract(artifact: &Artifact) -> Evidence {
    let mut evidence = Evidence::default();

    if artifact.path.is_dir() {
        read_moduleinfo(&artifact.path, &mut evidence);
        read_info_plist(&artifact.path, &mut evidence);
    } else {
        read_sidecar(&artifact.path, &mut evidence);
    }

    for candidate in binary_candidates(artifact) {
        let head = read_binary_head(&candidate);
        if head.is_empty() {
            continue;
        }
        for (key, value) in resource::string_table(&head) {
            evidence.insert(key, value);
        }
        break;
    }

    evidence
}

/// Binary files backing the artifact, most preferred first. For bundles
/// these are the per-architecture `Contents/<arch>/<stem>.vst3` images; a
/// plain file backs itself.
pub fn binary_candidates(artifact: &Artifact) -> Vec<PathBuf> {
    if artifact.path.is_file() {
        return vec![artifact.path.clone()];
    }
    let stem = artifact.stem();
    ["x86_64-win", "x86-win"]
        .iter()
        .map(|arch| {
            artifact
                .path
                .join("Contents")
                .join(arch)
                .join(format!("{stem}.vst3"))
        })
        .filter(|p| p.is_file())
        .collect()
}

/// Bounded read of a binary prefix. Oversized files and read failures all
/// degrade to an empty buffer.
pub fn read_binary_head(path: &Path) -> Vec<u8> {
    let Ok(metadata) = fs::metadata(path) else {
        return Vec::new();
    };
    if metadata.len() > BINARY_SIZE_CEILING {
        tracing::debug!("skipping content scan of oversized file {}", path.display());
        return Vec::new();
    }
    let Ok(file) = fs::File::open(path) else {
        return Vec::new();
    };
    let mut buf = Vec::with_capacity(BINARY_HEAD_LIMIT.min(metadata.len() as usize));
    match file.take(BINARY_HEAD_LIMIT as u64).read_to_end(&mut buf) {
        Ok(_) => buf,
        Err(_) => Vec::new(),
    }
}

/// `Contents/Resources/moduleinfo.json`: the bundle's own vendor/name
/// declaration.
fn read_moduleinfo(bundle: &Path, evidence: &mut Evidence) {
    let path = bundle.join("Contents").join("Resources").join("moduleinfo.json");
    let Ok(text) = fs::read_to_string(&path) else {
        return;
    };
    let Ok(value) = serde_json::from_str::<Value>(&text) else {
        tracing::debug!("malformed moduleinfo.json at {}", path.display());
        return;
    };
    let vendor = value
        .get("Vendor")
        .or_else(|| value.get("Manufacturer"))
        .and_then(Value::as_str);
    if let Some(vendor) = vendor {
        evidence.insert("Vendor", vendor);
    }
    if let Some(name) = value.get("Name").and_then(Value::as_str) {
        evidence.insert("Name", name);
    }
    if let Some(version) = value.get("Version").and_then(Value::as_str) {
        evidence.insert("Version", version);
    }
}

/// `Contents/Info.plist`: flat key/string pairs from the bundle descriptor.
fn read_info_plist(bundle: &Path, evidence: &mut Evidence) {
    let path = bundle.join("Contents").join("Info.plist");
    let Ok(text) = fs::read_to_string(&path) else {
        return;
    };
    for (key, value) in parse_plist_pairs(&text) {
        evidence.insert(key, value);
    }
}

/// Minimal plist reader: walks `<key>` elements and the `<string>`,
/// `<real>` or `<integer>` value immediately following each. Anything the
/// reader does not understand is skipped; full property-list parsing is
/// deliberately out of scope.
fn parse_plist_pairs(text: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    let mut rest = text;
    while let Some((key, after_key)) = next_element(rest, "key") {
        rest = after_key;
        let Some((tag, value, after_value)) = peek_value_element(rest) else {
            continue;
        };
        if matches!(tag, "string" | "real" | "integer") {
            pairs.push((key, value));
            rest = after_value;
        }
    }
    pairs
}

/// Find the next `<tag>...</tag>` element, returning its unescaped text and
/// the remainder of the input.
fn next_element<'a>(text: &'a str, tag: &str) -> Option<(String, &'a str)> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let start = text.find(&open)? + open.len();
    let end = start + text[start..].find(&close)?;
    Some((unescape_xml(&text[start..end]), &text[end + close.len()..]))
}

/// Inspect the element that follows a `<key>` without committing to a tag
/// name. Returns `(tag, text, remainder)` for the first element found.
fn peek_value_element(text: &str) -> Option<(&'static str, String, &str)> {
    let lt = text.find('<')?;
    let after = &text[lt + 1..];
    for tag in ["string", "real", "integer"] {
        if after.starts_with(&format!("{tag}>")) {
            let (value, rest) = next_element(&text[lt..], tag)?;
            return Some((tag, value, rest));
        }
    }
    // The next element is something else (another key, a nested dict, a
    // boolean). Report it so the caller moves on without consuming a value.
    Some(("", String::new(), &text[lt + 1..]))
}

fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

/// Sidecar description file next to a binary: `<file>.metadata.json` then
/// `<file>.json`. The first candidate that parses wins; an unreadable or
/// malformed candidate falls through to the next suffix.
fn read_sidecar(path: &Path, evidence: &mut Evidence) {
    let Some(file_name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
        return;
    };
    let Some(parent) = path.parent() else {
        return;
    };

    for suffix in [".metadata.json", ".json"] {
        let candidate = parent.join(format!("{file_name}{suffix}"));
        if !candidate.is_file() {
            continue;
        }
        let Ok(text) = fs::read_to_string(&candidate) else {
            continue;
        };
        if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(&text) {
            for (key, value) in map {
                if let Value::String(s) = value {
                    evidence.insert(key, s);
                }
            }
            return;
        }
        tracing::debug!("ignoring malformed sidecar {}", candidate.display());
    }
}
