//! Canonicalization and deduplication.
//!
//! Every record passes through canonicalization before its dedup key is
//! computed, so records differing only in cosmetic formatting collapse.
//! Merging keeps the earliest-seen record as the target and folds later
//! collisions into it.

use crate::knowledge::KnowledgeBase;
use crate::record::PluginRecord;
use std::collections::HashMap;

/// Canonical manufacturer spelling for a resolved record.
///
/// Naming-convention heuristics run first (a `bx_` plugin is Brainworx no
/// matter what the vendor string says), then the alias table on the whole
/// string, then token-wise alias salvage for strings like
/// "Brainworx (Plugin Alliance)" where only one token is registered.
pub fn canonicalize_manufacturer(
    kb: &KnowledgeBase,
    manufacturer: &str,
    plugin_name: &str,
) -> String {
    let candidate = manufacturer.trim();
    let name_lower = plugin_name.to_lowercase();

    if name_lower.starts_with("bx_") {
        return "Brainworx (Plugin Alliance)".to_string();
    }
    if name_lower.contains("sonible") {
        return "Sonible".to_string();
    }

    if let Some(alias) = kb.alias(candidate) {
        return alias.to_string();
    }

    for token in candidate.split(|c: char| c.is_whitespace() || matches!(c, '|' | '/' | '-')) {
        if token.is_empty() {
            continue;
        }
        if let Some(alias) = kb.alias(token) {
            return alias.to_string();
        }
    }

    if candidate.is_empty() {
        crate::resolve::UNKNOWN_MANUFACTURER.to_string()
    } else {
        candidate.to_string()
    }
}

/// Canonical display name: underscore/hyphen runs become single spaces,
/// whitespace collapses, trademark marks are stripped. Applying this to an
/// already-canonical name is a no-op.
pub fn canonicalize_name(name: &str) -> String {
    let mut cleaned = String::with_capacity(name.len());
    let mut pending_space = false;
    for c in name.trim().chars() {
        match c {
            '®' | '™' | '\u{00C2}' => continue,
            c if c.is_whitespace() || c == '_' || c == '-' => {
                pending_space = !cleaned.is_empty();
            }
            c => {
                if pending_space {
                    cleaned.push(' ');
                    pending_space = false;
                }
                cleaned.push(c);
            }
        }
    }

    if cleaned.is_empty() {
        "Unknown Plugin".to_string()
    } else {
        cleaned
    }
}

/// Canonicalize one record in place. Manufacturer canonicalization sees the
/// raw name first: prefix heuristics like `bx_` depend on the underscore
/// the name cleanup is about to remove.
pub fn canonicalize_record(kb: &KnowledgeBase, record: &mut PluginRecord) {
    record.manufacturer = canonicalize_manufacturer(kb, &record.manufacturer, &record.name);
    record.name = canonicalize_name(&record.name);
}

/// Canonicalize all records and collapse dedup-key collisions.
///
/// The earliest-seen record for a key is kept as the merge target;
/// membership of the output does not depend on input order, but which
/// physical record survives (and which fields win) does. A partial input
/// list is handled the same as a complete one.
pub fn normalize_and_merge(kb: &KnowledgeBase, records: Vec<PluginRecord>) -> Vec<PluginRecord> {
    let mut order = Vec::new();
    let mut by_key: HashMap<_, PluginRecord> = HashMap::new();

    for mut record in records {
        canonicalize_record(kb, &mut record);
        let key = record.dedup_key();
        match by_key.get_mut(&key) {
            Some(target) => target.merge(record),
            None => {
                order.push(key.clone());
                by_key.insert(key, record);
            }
        }
    }

    order.into_iter().filter_map(|key| by_key.remove(&key)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::PluginType;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn record(manufacturer: &str, name: &str, path: &str) -> PluginRecord {
        PluginRecord {
            name: name.to_string(),
            manufacturer: manufacturer.to_string(),
            plugin_type: PluginType::Vst2,
            path: PathBuf::from(path),
            identifier: None,
            version: None,
            arch: None,
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn bx_prefix_overrides_vendor_string() {
        let kb = KnowledgeBase::new();
        assert_eq!(
            canonicalize_manufacturer(&kb, "Plugin Alliance", "bx_console"),
            "Brainworx (Plugin Alliance)"
        );
    }

    #[test]
    fn alias_table_fixes_casing() {
        let kb = KnowledgeBase::new();
        assert_eq!(
            canonicalize_manufacturer(&kb, "acustica audio", "Aquarius"),
            "Acustica Audio"
        );
        assert_eq!(canonicalize_manufacturer(&kb, "2caudio", "Gullfoss"), "2CAudio");
    }

    #[test]
    fn token_salvage_recovers_known_vendor() {
        let kb = KnowledgeBase::new();
        assert_eq!(
            canonicalize_manufacturer(&kb, "Brainworx GmbH | distributed", "Console"),
            "Brainworx (Plugin Alliance)"
        );
    }

    #[test]
    fn empty_manufacturer_becomes_unknown() {
        let kb = KnowledgeBase::new();
        assert_eq!(canonicalize_manufacturer(&kb, "   ", "Thing"), "Unknown");
    }

    #[test]
    fn canonicalization_is_idempotent() {
        let kb = KnowledgeBase::new();
        for (manufacturer, name) in [
            ("Brainworx (Plugin Alliance)", "bx console"),
            ("Sonible", "smartEQ 2"),
            ("Acustica Audio", "Aquarius"),
            ("Waves", "L1 Ultramaximizer"),
            ("Unknown", "enigma9"),
        ] {
            assert_eq!(
                canonicalize_manufacturer(&kb, manufacturer, name),
                manufacturer
            );
            assert_eq!(canonicalize_name(name), name);
        }
    }

    #[test]
    fn name_cleanup_collapses_separators() {
        assert_eq!(canonicalize_name("bx_console  N"), "bx console N");
        assert_eq!(canonicalize_name("Pro-Q 3"), "Pro Q 3");
        assert_eq!(canonicalize_name("  Serum®  "), "Serum");
        assert_eq!(canonicalize_name("___"), "Unknown Plugin");
    }

    #[test]
    fn cosmetically_different_records_collapse() {
        let kb = KnowledgeBase::new();
        let records = vec![
            record("Waves", "Vocal Rider", "/a/VocalRider.dll"),
            record("waves", "Vocal_Rider", "/b/VocalRider.dll"),
        ];
        let merged = normalize_and_merge(&kb, records);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].path, PathBuf::from("/a/VocalRider.dll"));
    }

    #[test]
    fn no_two_output_records_share_a_dedup_key() {
        let kb = KnowledgeBase::new();
        let records = vec![
            record("Sonible", "smartEQ 2", "/a"),
            record("sonible gmbh", "smartEQ 2", "/b"),
            record("Waves", "L1", "/c"),
            record("Waves", "L2", "/d"),
        ];
        let merged = normalize_and_merge(&kb, records);
        let mut keys: Vec<_> = merged.iter().map(PluginRecord::dedup_key).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), merged.len());
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn merge_fills_fields_from_later_records() {
        let kb = KnowledgeBase::new();
        let first = record("2CAudio", "Gullfoss", "/a/Gullfoss.vst3");
        let mut second = record("2CAudio", "Gullfoss", "/b/Gullfoss.vst3");
        second.version = Some("1.8.0".to_string());
        second.identifier = Some("com.soundtheory.gullfoss".to_string());

        let merged = normalize_and_merge(&kb, vec![first, second]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].version.as_deref(), Some("1.8.0"));
        assert_eq!(merged[0].path, PathBuf::from("/a/Gullfoss.vst3"));
    }
}
