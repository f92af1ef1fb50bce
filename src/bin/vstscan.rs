use anyhow::Context;
use clap::Parser;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use vstcatalog::{discovery, report, KnowledgeBase, Scanner};

/// Scan the filesystem for VST2/VST3 plugins and write catalogue reports.
#[derive(Parser)]
#[command(name = "vstscan", version)]
struct Cli {
    /// Directories to scan. Standard plugin locations are used when omitted.
    paths: Vec<PathBuf>,

    /// Base path for report files; a per-format extension is appended.
    #[arg(short, long, default_value = "vst_report")]
    output: PathBuf,

    /// Also write a JSON report.
    #[arg(long)]
    json: bool,

    /// Also write a CSV report.
    #[arg(long)]
    csv: bool,

    /// Skip the plain-text reports.
    #[arg(long)]
    no_txt: bool,

    /// JSON file of manufacturer alias overrides ({"raw": "Canonical", ...}).
    #[arg(long)]
    aliases: Option<PathBuf>,

    /// Cap the worker thread count.
    #[arg(long)]
    threads: Option<usize>,

    /// Scan the standard plugin locations in addition to the given paths.
    #[arg(long)]
    include_default_paths: bool,

    /// Verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    let knowledge = match &cli.aliases {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading alias file {}", path.display()))?;
            let overrides: HashMap<String, String> = serde_json::from_str(&text)
                .with_context(|| format!("parsing alias file {}", path.display()))?;
            KnowledgeBase::with_aliases(overrides)
        }
        None => KnowledgeBase::new(),
    };

    let mut roots = cli.paths.clone();
    if cli.include_default_paths {
        roots.extend(discovery::default_roots());
    }

    let outcome = Scanner::new(knowledge)
        .with_threads(cli.threads)
        .scan(&roots)?;

    if !cli.no_txt {
        let txt = with_suffix(&cli.output, ".txt");
        report::write_text_report(&txt, &outcome.records)
            .with_context(|| format!("writing {}", txt.display()))?;
        println!("Report written to {}", txt.display());

        let unresolved = outcome.unresolved();
        if !unresolved.is_empty() {
            let unknown = with_suffix(&cli.output, "_unknown.txt");
            report::write_unknown_report(&unknown, &unresolved)
                .with_context(|| format!("writing {}", unknown.display()))?;
            println!("Unresolved entries written to {}", unknown.display());
        }
    }
    if cli.json {
        let json = with_suffix(&cli.output, ".json");
        report::write_json_report(&json, &outcome.records)
            .with_context(|| format!("writing {}", json.display()))?;
        println!("JSON written to {}", json.display());
    }
    if cli.csv {
        let csv = with_suffix(&cli.output, ".csv");
        report::write_csv_report(&csv, &outcome.records)
            .with_context(|| format!("writing {}", csv.display()))?;
        println!("CSV written to {}", csv.display());
    }

    let stats = &outcome.stats;
    println!();
    println!(
        "Scanned {} artifact(s): {} unique plugin(s) ({} VST2, {} VST3), {} unresolved",
        stats.artifacts, stats.unique, stats.vst2, stats.vst3, stats.unknown
    );
    if !stats.top_manufacturers.is_empty() {
        println!("Top manufacturers:");
        for (manufacturer, count) in &stats.top_manufacturers {
            println!("  {count:>4}  {manufacturer}");
        }
    }

    Ok(())
}

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name = base
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "vst_report".to_string());
    name.push_str(suffix);
    base.with_file_name(name)
}
