// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::io;
use std::path::Path;
use std::time::Instant;

use clap::Parser;

use prefixdex::bench::{write_csv, write_json, BenchConfig, Comparator, Origin};
use prefixdex::binary::{self, BlobFooter, BlobHeader, VERSION};
use prefixdex::{load_corpus, PrefixIndex, StructureKind};

mod cli;
use cli::display::{
    accuracy_value, check_mark, dim, double_footer, double_header, format_size, kind_label, row,
    row_double, savings_colored, section_bot, section_top, timing_ms, title, truncate_path,
};
use cli::{interactive, render, Cli, Commands};

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    // inspect needs neither corpus nor structures
    if let Some(Commands::Inspect { file }) = &cli.command {
        return inspect_file(file);
    }

    let config = match &cli.config {
        Some(path) => BenchConfig::from_file(path)?,
        None => BenchConfig::default(),
    };
    let comparator = initialize(&cli, config)?;

    match cli.command {
        Some(Commands::Search { prefix }) => {
            let results = comparator.run_single_test(&prefix);
            println!("{}", render::single_test(&prefix, &results, "Efficiency Ranking:"));
            print_accuracy(&results);
            Ok(())
        }
        Some(Commands::Bench { runs, csv, json }) => {
            let runs = runs.unwrap_or(comparator.config().runs);
            let prefixes = comparator.default_prefixes();
            eprintln!(
                "Benchmarking {} prefixes × {} runs over {} words",
                prefixes.len(),
                runs,
                comparator.corpus().len()
            );
            let summaries = comparator.run_benchmark(&prefixes, runs)?;
            println!("{}", render::benchmark(&summaries));

            write_csv(&summaries, &csv)?;
            eprintln!("✓ Results saved to {}", csv.display());
            if let Some(json) = json {
                write_json(&summaries, &json)?;
                eprintln!("✓ Summary saved to {}", json.display());
            }
            Ok(())
        }
        Some(Commands::Build) => {
            print_build_report(&comparator, &cli.cache_dir, cli.no_cache);
            Ok(())
        }
        Some(Commands::Interactive) | None => {
            let csv = Path::new("benchmark_results.csv");
            let stdin = io::stdin();
            interactive::run(&comparator, csv, stdin.lock(), io::stdout())
                .map_err(|e| format!("Interactive session failed: {}", e))
        }
        Some(Commands::Inspect { .. }) => Ok(()),
    }
}

fn initialize(cli: &Cli, config: BenchConfig) -> Result<Comparator, String> {
    let corpus = load_corpus(&cli.corpus)
        .map_err(|e| format!("Failed to read corpus {}: {}", cli.corpus.display(), e))?;
    if !cli.corpus.exists() {
        eprintln!(
            "⚠️  {} not found; using the {}-word sample corpus",
            cli.corpus.display(),
            corpus.len()
        );
    }

    let cache_dir = if cli.no_cache {
        None
    } else {
        fs::create_dir_all(&cli.cache_dir)
            .map_err(|e| format!("Failed to create {}: {}", cli.cache_dir.display(), e))?;
        Some(cli.cache_dir.as_path())
    };
    // `build` always rebuilds from the corpus
    if let (Some(dir), Some(Commands::Build)) = (cache_dir, &cli.command) {
        clear_cache(dir)?;
    }

    let show_progress = matches!(cli.command, Some(Commands::Bench { .. }));
    Ok(Comparator::initialize(corpus, cache_dir)?
        .with_config(config)
        .with_progress(show_progress))
}

fn clear_cache(dir: &Path) -> Result<(), String> {
    for kind in StructureKind::ALL {
        let path = dir.join(binary::cache_file_name(kind));
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(format!("Failed to remove {}: {}", path.display(), e)),
        }
    }
    Ok(())
}

/// Any structure that missed a true match is broken; say so loudly.
fn print_accuracy(results: &[prefixdex::bench::TestResult]) {
    for r in results {
        if r.accuracy.total > 0 && r.accuracy.correct < r.accuracy.total {
            eprintln!(
                "❌ {} returned {}/{} matches ({})",
                r.kind,
                r.accuracy.correct,
                r.accuracy.total,
                accuracy_value(r.accuracy.percent, r.accuracy.total)
            );
        }
    }
}

fn print_build_report(comparator: &Comparator, cache_dir: &Path, no_cache: bool) {
    println!();
    double_header();
    title("PREFIXDEX BUILD");
    double_footer();
    println!();

    section_top("STRUCTURES");
    row(&format!(
        "  {:<14}{:>10}{:>10}{:>14}{:>12}   {}",
        "Structure", "Words", "Nodes", "Memory (KB)", "Search ''", "Source"
    ));
    for (index, (_, origin)) in comparator.structures().iter().zip(comparator.origins()) {
        let start = Instant::now();
        let everything = index.search("");
        let ms = start.elapsed().as_secs_f64() * 1000.0;
        debug_assert_eq!(everything.len(), index.len());
        let source = match origin {
            Origin::Cache => dim("cache"),
            Origin::Built => "built".to_string(),
        };
        row(&format!(
            "  {}{}{:>10}{:>10}{:>14.1}{}   {}",
            kind_label(index.kind()),
            " ".repeat(14usize.saturating_sub(index.kind().name().len())),
            index.len(),
            index.node_count(),
            index.memory_estimate(),
            timing_ms(ms),
            source
        ));
    }
    section_bot();

    if no_cache {
        eprintln!("⚠️  --no-cache: nothing written");
    } else {
        eprintln!("✓ Cache files in {}", cache_dir.display());
    }
}

fn inspect_file(path: &Path) -> Result<(), String> {
    let bytes = fs::read(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let summary = binary::inspect(&bytes).map_err(|e| format!("{}: {}", path.display(), e))?;

    println!();
    double_header();
    title("PDEX FILE INSPECTOR");
    row_double(&format!(
        "  File:     {}",
        truncate_path(&path.display().to_string(), 55)
    ));
    row_double(&format!("  Size:     {}", format_size(summary.total_len)));
    row_double(&format!(
        "  Version:  {} (current: {})",
        summary.version, VERSION
    ));
    row_double(&format!("  Kind:     {}", kind_label(summary.kind)));
    double_footer();
    println!();

    section_top("METADATA");
    row(&format!("  Words:          {:>10}", summary.word_count));
    row(&format!("  Nodes:          {:>10}", summary.node_count));
    row(&format!(
        "  Memory est.:    {:>10.1} KB",
        prefixdex::node_cost_kb(summary.node_count as usize, summary.kind.node_cost())
    ));
    section_bot();
    println!();

    let vocab_offset = BlobHeader::SIZE;
    let tree_offset = vocab_offset + summary.vocab_len as usize;
    let footer_offset = tree_offset + summary.tree_len as usize;
    section_top("SECTIONS");
    for (name, offset, size) in [
        ("HEADER", 0, summary.header_len),
        ("VOCABULARY", vocab_offset, summary.vocab_len as usize),
        ("TREE", tree_offset, summary.tree_len as usize),
        ("FOOTER", footer_offset, BlobFooter::SIZE),
    ] {
        row(&format!(
            "  {:<12} @ {:>8}   {:>10}",
            name,
            offset,
            format_size(size)
        ));
    }
    section_bot();
    println!();

    section_top("INTEGRITY");
    row(&format!("  CRC32:          {}", check_mark(summary.crc_valid)));
    let decoded = binary::from_bytes(&bytes);
    row(&format!(
        "  Invariants:     {}",
        check_mark(decoded.is_ok())
    ));
    row(&format!(
        "  Brotli:         {:>10}  {}",
        format_size(summary.brotli_len),
        savings_colored(summary.total_len, summary.brotli_len)
    ));
    section_bot();

    if let Err(e) = decoded {
        eprintln!("❌ {}", e);
    }
    Ok(())
}
