// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the prefixdex command-line interface.
//!
//! Five subcommands: `search` to compare all four structures on one prefix,
//! `bench` for the full benchmark, `interactive` for the prompt (also what
//! you get with no subcommand), `build` to rebuild the cache from scratch, and `inspect` to
//! look inside a cached `.pdex` file.

pub mod display;
pub mod interactive;
pub mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "prefixdex",
    about = "Compare four prefix indexes for autocomplete",
    version
)]
pub struct Cli {
    /// Corpus file, one word per line (falls back to a tiny sample if missing)
    #[arg(long, global = true, default_value = "sample_corpus.txt")]
    pub corpus: PathBuf,

    /// Directory for cached structures (`<name>_structure.pdex`)
    #[arg(long, global = true, default_value = ".")]
    pub cache_dir: PathBuf,

    /// Always rebuild, never read or write cache files
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Benchmark config (JSON: prefixes, runs, corpus_sizes, prefix_count)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search every structure for one prefix and rank them
    Search {
        /// Prefix to complete
        prefix: String,
    },

    /// Run the full benchmark over the test prefixes
    Bench {
        /// Repetitions per prefix (overrides the config file)
        #[arg(short, long)]
        runs: Option<usize>,

        /// CSV report path
        #[arg(long, default_value = "benchmark_results.csv")]
        csv: PathBuf,

        /// Also write a JSON report
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Prompt for prefixes until told to stop
    Interactive,

    /// Rebuild every structure and overwrite the cache files
    Build,

    /// Inspect a .pdex cache file
    Inspect {
        /// Path to .pdex file
        file: PathBuf,
    },
}
