//! Version-info string table reader for binary artifacts.
//!
//! Windows plugin binaries carry vendor/product/copyright strings in a
//! UTF-16 version-info resource. Rather than parsing the full resource
//! directory, this reader scans the bounded binary prefix for the
//! well-known UTF-16 key names and lifts the string value that follows
//! each. It is a heuristic: it only ever adds evidence, and any input it
//! cannot make sense of yields an empty contribution.

use std::collections::BTreeMap;

/// String-table keys worth lifting, in resolution-priority order.
pub const STRING_TABLE_KEYS: &[&str] = &[
    "CompanyName",
    "LegalTrademarks",
    "LegalCopyright",
    "ProductName",
    "FileDescription",
];

/// Extract string-table entries from a binary prefix.
pub fn string_table(data: &[u8]) -> BTreeMap<String, String> {
    let mut table = BTreeMap::new();
    if data.len() < 4 {
        return table;
    }

    let units: Vec<u16> = data
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    for key in STRING_TABLE_KEYS {
        if let Some(value) = find_value(&units, key) {
            table.insert((*key).to_string(), value);
        }
    }
    table
}

/// Find the first occurrence of `key` as UTF-16 text and read the
/// null-terminated string that follows it (skipping the key terminator and
/// alignment padding).
fn find_value(units: &[u16], key: &str) -> Option<String> {
    let needle: Vec<u16> = key.encode_utf16().collect();
    let mut search_from = 0usize;

    while let Some(offset) = find_units(&units[search_from..], &needle) {
        let start = search_from + offset + needle.len();
        if let Some(value) = read_string(&units[start.min(units.len())..]) {
            return Some(value);
        }
        search_from = start;
    }
    None
}

fn find_units(haystack: &[u16], needle: &[u16]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Read the next printable, null-terminated UTF-16 string. Leading nulls
/// and padding words are skipped; a value shorter than two characters is
/// rejected as noise.
fn read_string(units: &[u16]) -> Option<String> {
    let start = units.iter().position(|&u| is_printable(u))?;
    // Only a small amount of terminator/padding is expected between a key
    // and its value; a distant printable run belongs to something else.
    if start > 8 {
        return None;
    }

    let mut value = String::new();
    for &unit in &units[start..] {
        if unit == 0 {
            break;
        }
        match char::from_u32(u32::from(unit)) {
            Some(c) if !c.is_control() => value.push(c),
            _ => break,
        }
    }

    let value = value.trim();
    if value.chars().count() >= 2 {
        Some(value.to_string())
    } else {
        None
    }
}

fn is_printable(unit: u16) -> bool {
    matches!(char::from_u32(u32::from(unit)), Some(c) if !c.is_control() && c != '\u{0}')
}

/// COFF machine field of a PE image, from the same bounded prefix used for
/// content scanning. Mirrors the standard MZ -> PE header walk; anything
/// unexpected is reported as unknown.
pub fn pe_architecture(data: &[u8]) -> Option<&'static str> {
    if data.len() < 0x40 || &data[0..2] != b"MZ" {
        return None;
    }
    let pe_offset = u32::from_le_bytes([data[0x3C], data[0x3D], data[0x3E], data[0x3F]]) as usize;
    if pe_offset + 6 > data.len() || &data[pe_offset..pe_offset + 4] != b"PE\0\0" {
        return None;
    }
    let machine = u16::from_le_bytes([data[pe_offset + 4], data[pe_offset + 5]]);
    match machine {
        0x8664 => Some("x64"),
        0x014C => Some("x86"),
        _ => None,
    }
}
