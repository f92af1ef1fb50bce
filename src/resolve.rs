//! Identity resolution.
//!
//! A strictly ordered, short-circuiting chain of resolver stages. Earlier
//! stages are trusted more: embedded vendor and copyright fields are often
//! a reseller or distribution platform, while a plugin's own name checked
//! against the curated table rarely lies. Each stage either answers with a
//! manufacturer (and possibly a refined display name) or passes to the
//! next; an artifact that exhausts the chain is catalogued as "Unknown"
//! rather than dropped.

use crate::extract::Evidence;
use crate::knowledge::KnowledgeBase;
use crate::record::Artifact;
use crate::resource::STRING_TABLE_KEYS;

pub const UNKNOWN_MANUFACTURER: &str = "Unknown";

/// One stage's answer: a manufacturer, plus a display name when the stage's
/// source is authoritative for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub manufacturer: String,
    pub name: Option<String>,
}

impl Resolution {
    fn of(manufacturer: impl Into<String>) -> Self {
        Self {
            manufacturer: manufacturer.into(),
            name: None,
        }
    }

    fn named(manufacturer: impl Into<String>, name: Option<&str>) -> Self {
        Self {
            manufacturer: manufacturer.into(),
            name: name.map(str::to_string),
        }
    }
}

struct ResolveCtx<'a> {
    artifact: &'a Artifact,
    stem: String,
    evidence: &'a Evidence,
    head: &'a [u8],
    kb: &'a KnowledgeBase,
}

type Stage = for<'a> fn(&ResolveCtx<'a>) -> Option<Resolution>;

/// The fallback chain, in trust order. First non-empty answer wins.
const STAGES: &[Stage] = &[
    stage_shell_override,
    stage_name_fragment,
    stage_declared_vendor,
    stage_copyright_pattern,
    stage_resource_table,
    stage_filename_pattern,
    stage_binary_scan,
    stage_folder_heuristic,
];

/// Resolve one artifact to a `(manufacturer, name)` pair.
pub fn resolve(
    artifact: &Artifact,
    evidence: &Evidence,
    head: &[u8],
    kb: &KnowledgeBase,
) -> (String, String) {
    let ctx = ResolveCtx {
        artifact,
        stem: artifact.stem(),
        evidence,
        head,
        kb,
    };

    for stage in STAGES {
        if let Some(resolution) = stage(&ctx) {
            let name = resolution.name.unwrap_or_else(|| ctx.stem.clone());
            return (resolution.manufacturer, name);
        }
    }
    (UNKNOWN_MANUFACTURER.to_string(), ctx.stem)
}

/// Stage 1: the WaveShell plugin-host family always belongs to Waves, no
/// matter what any embedded field claims.
fn stage_shell_override(ctx: &ResolveCtx<'_>) -> Option<Resolution> {
    if ctx.stem.to_lowercase().contains("waveshell") {
        Some(Resolution::of("Waves"))
    } else {
        None
    }
}

/// Stage 2: the artifact's own name against the curated name table.
fn stage_name_fragment(ctx: &ResolveCtx<'_>) -> Option<Resolution> {
    ctx.kb.match_name(&ctx.stem).map(Resolution::of)
}

/// Stage 3: an explicit vendor declaration from a module descriptor,
/// bundle descriptor, or sidecar, accepted only when it cleans up to a
/// non-generic value.
fn stage_declared_vendor(ctx: &ResolveCtx<'_>) -> Option<Resolution> {
    let declared = ctx.evidence.declared_vendor()?;
    let cleaned = ctx.kb.clean_manufacturer(declared)?;
    Some(Resolution::named(cleaned, ctx.evidence.declared_name()))
}

/// Stage 4: manufacturer patterns against the bundle's human-readable
/// copyright string.
fn stage_copyright_pattern(ctx: &ResolveCtx<'_>) -> Option<Resolution> {
    let copyright = ctx.evidence.copyright()?;
    let manufacturer = ctx.kb.match_pattern(copyright)?;
    Some(Resolution::named(manufacturer, ctx.evidence.declared_name()))
}

/// Stage 5: version-info string-table fields in priority order. Patterns
/// are tried against every field; only `CompanyName` may additionally be
/// accepted as a literal value once cleaned, and only when non-trivial.
fn stage_resource_table(ctx: &ResolveCtx<'_>) -> Option<Resolution> {
    let product_name = ctx
        .evidence
        .get("ProductName")
        .or_else(|| ctx.evidence.get("FileDescription"));

    for key in &STRING_TABLE_KEYS[..4] {
        let Some(value) = ctx.evidence.get(key) else {
            continue;
        };
        if let Some(manufacturer) = ctx.kb.match_pattern(value) {
            return Some(Resolution::named(manufacturer, product_name));
        }
        if *key == "CompanyName" {
            if let Some(cleaned) = ctx.kb.clean_manufacturer(value) {
                if cleaned.chars().count() > 2 {
                    return Some(Resolution::named(cleaned, product_name));
                }
            }
        }
    }
    None
}

/// Stage 6: the pattern table against the bare filename.
fn stage_filename_pattern(ctx: &ResolveCtx<'_>) -> Option<Resolution> {
    ctx.kb.match_pattern(&ctx.stem).map(Resolution::of)
}

/// Stage 7: scan the bounded binary prefix.
fn stage_binary_scan(ctx: &ResolveCtx<'_>) -> Option<Resolution> {
    ctx.kb.search_binary(ctx.head).map(Resolution::of)
}

/// Stage 8: install-folder heuristic, last because shared and
/// reseller-branded folders routinely mislead.
fn stage_folder_heuristic(ctx: &ResolveCtx<'_>) -> Option<Resolution> {
    ctx.kb.match_folder(&ctx.artifact.path).map(Resolution::of)
}
