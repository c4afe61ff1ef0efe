// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The interactive prompt.
//!
//! ```text
//! Enter prefix: app         → single test, ranking, "Continue testing? (y/n)"
//! Enter prefix: benchmark   → full benchmark, CSV report, then exit
//! Enter prefix: quit        → exit (also "exit", "q", or end of input)
//! ```
//!
//! Generic over reader and writer so it can be driven from a test.

use std::io::{self, BufRead, Write};
use std::path::Path;

use prefixdex::bench::{write_csv, Comparator};

use super::render;

fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, text: &str) -> io::Result<Option<String>> {
    write!(out, "{}", text)?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Run the prompt until the user quits, input ends, or a benchmark finishes.
pub fn run<R: BufRead, W: Write>(
    comparator: &Comparator,
    csv_path: &Path,
    mut input: R,
    mut out: W,
) -> io::Result<()> {
    loop {
        let Some(prefix) = prompt(&mut input, &mut out, "Enter prefix: ")? else {
            break;
        };

        match prefix.to_lowercase().as_str() {
            "quit" | "exit" | "q" => break,
            "benchmark" => {
                let prefixes = comparator.default_prefixes();
                match comparator.run_benchmark(&prefixes, comparator.config().runs) {
                    Ok(summaries) => {
                        writeln!(out, "{}", render::benchmark(&summaries))?;
                        match write_csv(&summaries, csv_path) {
                            Ok(()) => writeln!(out, "✓ Results saved to {}", csv_path.display())?,
                            Err(e) => writeln!(out, "❌ Error: {}", e)?,
                        }
                        break;
                    }
                    Err(e) => writeln!(out, "❌ Error: {}", e)?,
                }
            }
            "" => writeln!(out, "Please enter a valid prefix.")?,
            _ => {
                let results = comparator.run_single_test(&prefix);
                writeln!(
                    out,
                    "{}",
                    render::single_test(&prefix, &results, "Efficiency Ranking for this test:")
                )?;

                let answer = prompt(&mut input, &mut out, "Continue testing? (y/n): ")?;
                if answer.map(|a| a.to_lowercase()) != Some("y".to_string()) {
                    break;
                }
            }
        }
    }
    Ok(())
}
