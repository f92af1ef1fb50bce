//! End-to-end scans over synthetic plugin trees.

use std::fs;
use std::path::Path;
use vstcatalog::{report, KnowledgeBase, PluginType, Scanner, UNKNOWN_MANUFACTURER};

fn scan(roots: &[&Path]) -> vstcatalog::ScanOutcome {
    let roots: Vec<_> = roots.iter().map(|p| p.to_path_buf()).collect();
    Scanner::new(KnowledgeBase::new())
        .with_threads(Some(2))
        .scan(&roots)
        .unwrap()
}

fn write_vst3_bundle(dir: &Path, name: &str, plist_entries: &[(&str, &str)]) {
    let bundle = dir.join(format!("{name}.vst3"));
    fs::create_dir_all(bundle.join("Contents")).unwrap();

    let mut plist = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<plist version=\"1.0\">\n<dict>\n",
    );
    for (key, value) in plist_entries {
        plist.push_str(&format!(
            "    <key>{key}</key>\n    <string>{value}</string>\n"
        ));
    }
    plist.push_str("</dict>\n</plist>\n");
    fs::write(bundle.join("Contents/Info.plist"), plist).unwrap();
}

fn write_dll_with_sidecar(dir: &Path, file_name: &str, sidecar_json: &str) {
    fs::write(dir.join(file_name), b"MZ\x90\x00").unwrap();
    fs::write(dir.join(format!("{file_name}.metadata.json")), sidecar_json).unwrap();
}

#[test]
fn bundle_with_vendor_declaration_resolves_and_keeps_metadata() {
    let tmp = tempfile::tempdir().unwrap();
    write_vst3_bundle(
        tmp.path(),
        "smartEQ 2",
        &[
            ("CFBundleName", "smartEQ 2"),
            ("CFBundleIdentifier", "com.sonible.smarteq"),
            ("AudioComponentManufacturer", "sonible"),
            ("CFBundleShortVersionString", "1.0.0"),
        ],
    );

    let outcome = scan(&[tmp.path()]);
    assert_eq!(outcome.records.len(), 1);
    let record = &outcome.records[0];
    assert_eq!(record.manufacturer, "Sonible");
    assert_eq!(record.name, "smartEQ 2");
    assert_eq!(record.plugin_type, PluginType::Vst3);
    assert_eq!(record.identifier.as_deref(), Some("com.sonible.smarteq"));
    assert_eq!(record.version.as_deref(), Some("1.0.0"));
}

#[test]
fn same_plugin_in_two_roots_collapses_to_one_record() {
    let tmp = tempfile::tempdir().unwrap();
    let root_a = tmp.path().join("a");
    let root_b = tmp.path().join("b");
    fs::create_dir_all(&root_a).unwrap();
    fs::create_dir_all(&root_b).unwrap();

    write_dll_with_sidecar(
        &root_a,
        "Gullfoss.vst3",
        r#"{"name": "Gullfoss", "manufacturer": "2caudio"}"#,
    );
    write_dll_with_sidecar(
        &root_b,
        "Gullfoss.vst3",
        r#"{"manufacturer": "2CAudio", "version": "1.8.0"}"#,
    );

    let outcome = scan(&[&root_a, &root_b]);
    assert_eq!(outcome.stats.artifacts, 2);
    assert_eq!(outcome.records.len(), 1);
    let record = &outcome.records[0];
    assert_eq!(record.manufacturer, "2CAudio");
    assert_eq!(record.name, "Gullfoss");
    assert_eq!(record.version.as_deref(), Some("1.8.0"));
}

#[test]
fn bx_prefixed_plugin_is_attributed_to_brainworx() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("bx_console.dll"), b"MZ\x90\x00").unwrap();

    let outcome = scan(&[tmp.path()]);
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(
        outcome.records[0].manufacturer,
        "Brainworx (Plugin Alliance)"
    );
    assert_eq!(outcome.records[0].name, "bx console");
}

#[test]
fn sidecar_vendor_is_canonicalized_through_the_alias_table() {
    let tmp = tempfile::tempdir().unwrap();
    write_dll_with_sidecar(
        tmp.path(),
        "Aquarius.dll",
        r#"{"name": "Aquarius", "manufacturer": "acustica audio"}"#,
    );

    let outcome = scan(&[tmp.path()]);
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].manufacturer, "Acustica Audio");
    assert_eq!(outcome.records[0].name, "Aquarius");
}

#[test]
fn install_folder_is_the_fallback_for_anonymous_binaries() {
    let tmp = tempfile::tempdir().unwrap();
    let vendor_dir = tmp.path().join("Waves");
    fs::create_dir_all(&vendor_dir).unwrap();
    fs::write(vendor_dir.join("MysteryPlug.dll"), b"MZ\x90\x00").unwrap();

    let outcome = scan(&[tmp.path()]);
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].manufacturer, "Waves");
    assert_eq!(outcome.records[0].name, "MysteryPlug");
}

#[test]
fn waveshell_override_beats_embedded_vendor_fields() {
    let tmp = tempfile::tempdir().unwrap();
    write_dll_with_sidecar(
        tmp.path(),
        "WaveShell1-VST 14.0.dll",
        r#"{"manufacturer": "Some Reseller Inc"}"#,
    );

    let outcome = scan(&[tmp.path()]);
    assert_eq!(outcome.records[0].manufacturer, "Waves");
}

#[test]
fn unresolved_plugins_are_kept_and_reported_separately() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("misc");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("enigma9.dll"), b"MZ\x90\x00").unwrap();
    write_dll_with_sidecar(
        &root,
        "Aquarius.dll",
        r#"{"manufacturer": "acustica audio"}"#,
    );

    let outcome = scan(&[&root]);
    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.stats.unknown, 1);

    let unresolved = outcome.unresolved();
    assert_eq!(unresolved.len(), 1);
    assert_eq!(unresolved[0].name, "enigma9");
    assert_eq!(unresolved[0].manufacturer, UNKNOWN_MANUFACTURER);

    let txt = tmp.path().join("report.txt");
    let unknown_txt = tmp.path().join("report_unknown.txt");
    report::write_text_report(&txt, &outcome.records).unwrap();
    report::write_unknown_report(&unknown_txt, &unresolved).unwrap();

    let text = fs::read_to_string(&txt).unwrap();
    assert!(text.contains("[Acustica Audio]"));
    assert!(text.contains("[Unknown]\n- enigma9 (VST2)"));
    let unknown_text = fs::read_to_string(&unknown_txt).unwrap();
    assert!(unknown_text.contains("Name: enigma9"));
}

#[test]
fn alias_overrides_apply_before_the_scan() {
    let tmp = tempfile::tempdir().unwrap();
    write_dll_with_sidecar(
        tmp.path(),
        "Homebrew.dll",
        r#"{"manufacturer": "garage labs"}"#,
    );

    let knowledge =
        KnowledgeBase::with_aliases([("garage labs".to_string(), "Garage Labs".to_string())]);
    let outcome = Scanner::new(knowledge)
        .with_threads(Some(1))
        .scan(&[tmp.path().to_path_buf()])
        .unwrap();
    assert_eq!(outcome.records[0].manufacturer, "Garage Labs");
}

#[test]
fn full_catalogue_is_deterministically_ordered() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("bx_console.dll"), b"MZ\x90\x00").unwrap();
    fs::write(tmp.path().join("Ozone 11.dll"), b"MZ\x90\x00").unwrap();
    write_vst3_bundle(
        tmp.path(),
        "smartEQ 2",
        &[("AudioComponentManufacturer", "sonible")],
    );

    let first = scan(&[tmp.path()]);
    let second = scan(&[tmp.path()]);

    let order: Vec<&str> = first.records.iter().map(|r| r.manufacturer.as_str()).collect();
    assert_eq!(
        order,
        vec!["Brainworx (Plugin Alliance)", "iZotope", "Sonible"]
    );
    let again: Vec<&str> = second.records.iter().map(|r| r.manufacturer.as_str()).collect();
    assert_eq!(order, again);
}
