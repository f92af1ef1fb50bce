//! Report writers.
//!
//! Three consumer-facing formats over the same record list: a grouped
//! plain-text catalogue, a JSON dump of the full records, and a flat CSV.
//! Unresolved entries get a companion report of their own so they can be
//! reviewed and fed back into the alias table.

use crate::record::PluginRecord;
use chrono::Utc;
use std::collections::HashMap;
use std::io::{self, Write};
use std::path::Path;

/// Grouped text catalogue. One `[Manufacturer]` section per manufacturer,
/// unresolved records grouped under `[Unknown]`, entries sorted by name.
pub fn write_text_report(path: &Path, records: &[PluginRecord]) -> io::Result<()> {
    let mut out = io::BufWriter::new(std::fs::File::create(path)?);

    let mut by_manufacturer: HashMap<&str, Vec<&PluginRecord>> = HashMap::new();
    for record in records {
        by_manufacturer
            .entry(record.manufacturer.as_str())
            .or_default()
            .push(record);
    }
    let mut groups: Vec<(&str, Vec<&PluginRecord>)> = by_manufacturer.into_iter().collect();
    groups.sort_by_key(|(manufacturer, _)| manufacturer.to_lowercase());

    let mut first = true;
    for (manufacturer, mut members) in groups {
        if !first {
            writeln!(out)?;
        }
        first = false;

        writeln!(out, "[{manufacturer}]")?;
        members.sort_by_key(|r| (r.name.to_lowercase(), r.plugin_type));
        for record in members {
            write!(out, "- {} ({})", record.name, record.plugin_type)?;
            if let Some(version) = &record.version {
                write!(out, " v{version}")?;
            }
            writeln!(out, " :: {}", record.path.display())?;
        }
    }
    out.flush()
}

/// Companion report of unresolved entries, one block per record.
pub fn write_unknown_report(path: &Path, records: &[&PluginRecord]) -> io::Result<()> {
    let mut out = io::BufWriter::new(std::fs::File::create(path)?);

    writeln!(out, "# Unresolved plugins")?;
    writeln!(
        out,
        "# Generated: {}",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(
        out,
        "# Review these entries and extend the alias or name tables as needed."
    )?;

    for record in records {
        writeln!(out)?;
        writeln!(out, "Name: {}", record.name)?;
        writeln!(out, "Path: {}", record.path.display())?;
        writeln!(out, "Type: {}", record.plugin_type)?;
    }
    out.flush()
}

/// Full records, machine-readable.
pub fn write_json_report(path: &Path, records: &[PluginRecord]) -> io::Result<()> {
    let mut out = io::BufWriter::new(std::fs::File::create(path)?);
    serde_json::to_writer_pretty(&mut out, records)?;
    writeln!(out)?;
    out.flush()
}

/// Flat CSV of the whole catalogue, unresolved records included.
pub fn write_csv_report(path: &Path, records: &[PluginRecord]) -> io::Result<()> {
    let mut out = io::BufWriter::new(std::fs::File::create(path)?);

    writeln!(out, "Manufacturer,Name,Type,Arch,Version,Path")?;
    for record in records {
        let fields = [
            record.manufacturer.as_str(),
            record.name.as_str(),
            record.plugin_type.as_str(),
            record.arch.as_deref().unwrap_or(""),
            record.version.as_deref().unwrap_or(""),
        ];
        for field in fields {
            write!(out, "{},", csv_field(field))?;
        }
        writeln!(out, "{}", csv_field(&record.path.display().to_string()))?;
    }
    out.flush()
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::PluginType;
    use crate::resolve::UNKNOWN_MANUFACTURER;
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::PathBuf;

    fn record(manufacturer: &str, name: &str, plugin_type: PluginType) -> PluginRecord {
        PluginRecord {
            name: name.to_string(),
            manufacturer: manufacturer.to_string(),
            plugin_type,
            path: PathBuf::from(format!("/plugs/{name}.dll")),
            identifier: None,
            version: None,
            arch: None,
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn text_report_groups_by_manufacturer() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("report.txt");

        let mut gullfoss = record("2CAudio", "Gullfoss", PluginType::Vst3);
        gullfoss.version = Some("1.8.0".to_string());
        // Deliberately interleaved: grouping must key on the manufacturer,
        // not on adjacency in the input order.
        let records = vec![
            record("Waves", "L1 Ultramaximizer", PluginType::Vst2),
            gullfoss,
            record(UNKNOWN_MANUFACTURER, "enigma9", PluginType::Vst2),
            record("Waves", "H-Delay", PluginType::Vst2),
        ];

        write_text_report(&out, &records).unwrap();
        let text = fs::read_to_string(&out).unwrap();
        assert_eq!(
            text,
            "[2CAudio]\n\
             - Gullfoss (VST3) v1.8.0 :: /plugs/Gullfoss.dll\n\
             \n\
             [Unknown]\n\
             - enigma9 (VST2) :: /plugs/enigma9.dll\n\
             \n\
             [Waves]\n\
             - H-Delay (VST2) :: /plugs/H-Delay.dll\n\
             - L1 Ultramaximizer (VST2) :: /plugs/L1 Ultramaximizer.dll\n"
        );
    }

    #[test]
    fn text_report_keeps_unresolved_records_in_the_catalogue() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("report.txt");

        let records = vec![record(UNKNOWN_MANUFACTURER, "enigma9", PluginType::Vst2)];
        write_text_report(&out, &records).unwrap();
        let text = fs::read_to_string(&out).unwrap();
        assert_eq!(text, "[Unknown]\n- enigma9 (VST2) :: /plugs/enigma9.dll\n");
    }

    #[test]
    fn unknown_report_lists_each_entry() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("unknown.txt");

        let orphan = record(UNKNOWN_MANUFACTURER, "enigma9", PluginType::Vst2);
        write_unknown_report(&out, &[&orphan]).unwrap();
        let text = fs::read_to_string(&out).unwrap();
        assert!(text.starts_with("# Unresolved plugins\n"));
        assert!(text.contains("\nName: enigma9\nPath: /plugs/enigma9.dll\nType: VST2\n"));
    }

    #[test]
    fn csv_quotes_awkward_fields() {
        assert_eq!(csv_field("Waves"), "Waves");
        assert_eq!(
            csv_field("Brainworx, distributed"),
            "\"Brainworx, distributed\""
        );
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn json_report_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("report.json");

        let records = vec![record("Sonible", "smartEQ 2", PluginType::Vst3)];
        write_json_report(&out, &records).unwrap();

        let parsed: Vec<PluginRecord> =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].manufacturer, "Sonible");
        assert_eq!(parsed[0].plugin_type, PluginType::Vst3);
    }
}
