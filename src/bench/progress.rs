// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Progress reporting. A real bar with `parallel`, nothing without it.

#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressStyle};

#[cfg(feature = "parallel")]
fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
    )
    .map(|style| style.progress_chars("━━╸"))
    .unwrap_or_else(|_| ProgressStyle::default_bar())
}

pub(crate) struct Progress {
    #[cfg(feature = "parallel")]
    bar: ProgressBar,
}

impl Progress {
    /// A bar of `len` steps; hidden unless `visible`.
    #[allow(unused_variables)]
    pub(crate) fn new(len: usize, prefix: &'static str, visible: bool) -> Self {
        #[cfg(feature = "parallel")]
        {
            let bar = if visible {
                ProgressBar::new(len as u64)
            } else {
                ProgressBar::hidden()
            };
            bar.set_style(create_progress_style());
            bar.set_prefix(prefix);
            Self { bar }
        }
        #[cfg(not(feature = "parallel"))]
        Self {}
    }

    #[allow(unused_variables)]
    pub(crate) fn step(&self, msg: &str) {
        #[cfg(feature = "parallel")]
        {
            self.bar.set_message(msg.to_string());
            self.bar.inc(1);
        }
    }

    #[allow(unused_variables)]
    pub(crate) fn finish(&self, msg: &str) {
        #[cfg(feature = "parallel")]
        self.bar.finish_with_message(msg.to_string());
    }
}
