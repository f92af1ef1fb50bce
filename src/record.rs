use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Plugin container format.
///
/// VST2 plugins are flat binary files (`.dll`, `.vst`); VST3 plugins are
/// either single files or bundle directories with a `Contents/` layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PluginType {
    #[serde(rename = "VST2")]
    Vst2,
    #[serde(rename = "VST3")]
    Vst3,
}

impl PluginType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PluginType::Vst2 => "VST2",
            PluginType::Vst3 => "VST3",
        }
    }
}

impl std::fmt::Display for PluginType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A filesystem location tagged with a provisional plugin type.
///
/// Produced by discovery, consumed by extraction. Short-lived; everything
/// durable ends up in a [`PluginRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub plugin_type: PluginType,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, plugin_type: PluginType) -> Self {
        Self {
            path: path.into(),
            plugin_type,
        }
    }

    /// Filename stem with any container suffix removed.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// A single catalogued plugin after identity resolution.
///
/// `manufacturer` and `name` always hold the canonicalized forms; the raw
/// evidence that produced them is retained in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginRecord {
    pub name: String,
    pub manufacturer: String,
    #[serde(rename = "type")]
    pub plugin_type: PluginType,
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl PluginRecord {
    /// Stable key used to collapse duplicate artifacts into one record.
    pub fn dedup_key(&self) -> (PluginType, String, String) {
        (
            self.plugin_type,
            self.manufacturer.trim().to_lowercase(),
            self.name.trim().to_lowercase(),
        )
    }

    /// Merge metadata from another record for the same dedup key.
    ///
    /// The receiver is the merge target: missing identifier/version are
    /// filled in, strictly longer trimmed manufacturer/name text wins, and
    /// the incoming evidence is underlaid beneath the target's own keys.
    /// "Longer wins" is a known approximation: it has no semantic check that
    /// the two strings describe the same company.
    pub fn merge(&mut self, other: PluginRecord) {
        if self.identifier.is_none() && other.identifier.is_some() {
            self.identifier = other.identifier;
        }
        if self.version.is_none() && other.version.is_some() {
            self.version = other.version;
        }
        if self.arch.is_none() && other.arch.is_some() {
            self.arch = other.arch;
        }
        if is_richer_text(&other.manufacturer, &self.manufacturer) {
            self.manufacturer = other.manufacturer;
        }
        if is_richer_text(&other.name, &self.name) {
            self.name = other.name;
        }
        for (key, value) in other.extra {
            self.extra.entry(key).or_insert(value);
        }
    }
}

fn is_richer_text(candidate: &str, current: &str) -> bool {
    if candidate.trim().is_empty() {
        return false;
    }
    if current.trim().is_empty() {
        return true;
    }
    candidate.trim().chars().count() > current.trim().chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(manufacturer: &str, name: &str) -> PluginRecord {
        PluginRecord {
            name: name.to_string(),
            manufacturer: manufacturer.to_string(),
            plugin_type: PluginType::Vst2,
            path: PathBuf::from("/tmp/x.dll"),
            identifier: None,
            version: None,
            arch: None,
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn dedup_key_is_case_insensitive() {
        let a = record("Waves", "L1 Ultramaximizer");
        let b = record("waves ", "l1 ultramaximizer");
        assert_eq!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn merge_prefers_richer_text_regardless_of_order() {
        let mut a = record("Acme", "Gadget");
        let mut b = record("Acme Audio Systems", "Gadget");

        let mut first = a.clone();
        first.merge(b.clone());
        assert_eq!(first.manufacturer, "Acme Audio Systems");

        b.merge(std::mem::replace(&mut a, record("", "")));
        assert_eq!(b.manufacturer, "Acme Audio Systems");
    }

    #[test]
    fn merge_fills_absent_identifier_and_version() {
        let mut target = record("Sonible", "smartEQ 2");
        let mut incoming = record("Sonible", "smartEQ 2");
        incoming.identifier = Some("com.sonible.smarteq".to_string());
        incoming.version = Some("1.0.0".to_string());

        target.merge(incoming);
        assert_eq!(target.identifier.as_deref(), Some("com.sonible.smarteq"));
        assert_eq!(target.version.as_deref(), Some("1.0.0"));
    }

    #[test]
    fn merge_keeps_target_evidence_on_conflict() {
        let mut target = record("Waves", "L1");
        target.extra.insert("CompanyName".into(), "Waves Inc".into());
        let mut incoming = record("Waves", "L1");
        incoming
            .extra
            .insert("CompanyName".into(), "Waves Audio Ltd".into());
        incoming
            .extra
            .insert("ProductName".into(), "L1 Ultramaximizer".into());

        target.merge(incoming);
        assert_eq!(target.extra["CompanyName"], "Waves Inc");
        assert_eq!(target.extra["ProductName"], "L1 Ultramaximizer");
    }

    #[test]
    fn plugin_type_serializes_as_uppercase_tag() {
        assert_eq!(
            serde_json::to_string(&PluginType::Vst3).unwrap(),
            "\"VST3\""
        );
    }
}
