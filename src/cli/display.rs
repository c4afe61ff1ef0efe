// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the prefixdex CLI.
//!
//! OneDark for dark terminals, One Light for light ones. Detection tries
//! `PREFIXDEX_THEME` first, then `COLORFGBG`, then defaults to dark. Colors
//! switch off for `NO_COLOR` and whenever stdout isn't a TTY, so piping a
//! benchmark into a file gives you clean text.
//!
//! # Theme detection order
//!
//! 1. `PREFIXDEX_THEME` env var ("dark" or "light")
//! 2. `COLORFGBG` env var (terminal background hint)
//! 3. Default to dark theme

use std::sync::OnceLock;

use prefixdex::StructureKind;

// Box drawing constants - width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 72;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn parse_theme(explicit: Option<&str>, colorfgbg: Option<&str>) -> Theme {
    if let Some(theme) = explicit {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg": colors 0-6 and 8 are dark backgrounds
    if let Some(bg) = colorfgbg.and_then(|v| v.split(';').next_back()) {
        if let Ok(bg_num) = bg.parse::<u8>() {
            if bg_num >= 7 && bg_num != 8 {
                return Theme::Light;
            }
        }
    }

    Theme::Dark
}

fn detect_theme() -> Theme {
    let explicit = std::env::var("PREFIXDEX_THEME").ok();
    let colorfgbg = std::env::var("COLORFGBG").ok();
    parse_theme(explicit.as_deref(), colorfgbg.as_deref())
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// PALETTES (True Color)
// ═══════════════════════════════════════════════════════════════════════════
//
// OneDark: https://github.com/joshdick/onedark.vim
// One Light: https://github.com/sonph/onehalf

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117); // #e06c75
    pub const GREEN: (u8, u8, u8) = (152, 195, 121); // #98c379
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123); // #e5c07b
    pub const BLUE: (u8, u8, u8) = (97, 175, 239); // #61afef
    pub const MAGENTA: (u8, u8, u8) = (198, 120, 221); // #c678dd
    pub const CYAN: (u8, u8, u8) = (86, 182, 194); // #56b6c2
    pub const GRAY: (u8, u8, u8) = (92, 99, 112); // #5c6370
    pub const BRIGHT_CYAN: (u8, u8, u8) = (102, 217, 239);
}

mod onelight {
    pub const RED: (u8, u8, u8) = (228, 86, 73); // #e45649
    pub const GREEN: (u8, u8, u8) = (80, 161, 79); // #50a14f
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1); // #c18401
    pub const BLUE: (u8, u8, u8) = (64, 120, 242); // #4078f2
    pub const MAGENTA: (u8, u8, u8) = (166, 38, 164); // #a626a4
    pub const CYAN: (u8, u8, u8) = (1, 132, 188); // #0184bc
    pub const GRAY: (u8, u8, u8) = (160, 161, 167); // #a0a1a7
    pub const BRIGHT_CYAN: (u8, u8, u8) = (1, 112, 158);
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            let (r, g, b) = match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            };
            rgb(r, g, b)
        }
    };
}

theme_color!(RED);
theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(MAGENTA);
theme_color!(CYAN);
theme_color!(GRAY);
theme_color!(BRIGHT_CYAN);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply theme color with optional modifiers
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Visible length, excluding ANSI escapes.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

/// Drop ANSI escapes, for asserting on rendered text.
#[cfg(test)]
pub fn plain(s: &str) -> String {
    let mut out = String::new();
    let mut in_escape = false;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            out.push(c);
        }
    }
    out
}

fn border(color_fn: fn() -> String) -> (String, &'static str) {
    if use_colors() {
        (color_fn(), RESET)
    } else {
        (String::new(), "")
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// │ content          │
pub fn row(content: &str) {
    let (b, reset) = border(GRAY);
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!("{b}│{reset}{content}{}{b}│{reset}", " ".repeat(pad));
}

/// ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let (b, reset) = border(GRAY);
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!("{b}┌{reset}{label_part}{b}{}┐{reset}", "─".repeat(remaining));
}

/// └──────────────────┘
pub fn section_bot() {
    let (b, reset) = border(GRAY);
    println!("{b}└{}┘{reset}", "─".repeat(BOX_WIDTH));
}

/// ╔══════════════════╗
pub fn double_header() {
    let (b, reset) = border(BLUE);
    println!("{b}╔{}╗{reset}", "═".repeat(BOX_WIDTH));
}

/// ╚══════════════════╝
pub fn double_footer() {
    let (b, reset) = border(BLUE);
    println!("{b}╚{}╝{reset}", "═".repeat(BOX_WIDTH));
}

/// ║ content          ║
pub fn row_double(content: &str) {
    let (b, reset) = border(BLUE);
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!("{b}║{reset}{content}{}{b}║{reset}", " ".repeat(pad));
}

/// Centered bold title inside a double box row.
pub fn title(text: &str) {
    let (b, reset) = border(BLUE);
    let colored = themed(BRIGHT_CYAN, &[BOLD], text);
    let total_pad = BOX_WIDTH.saturating_sub(visible_len(&colored));
    let left_pad = total_pad / 2;
    println!(
        "{b}║{reset}{}{colored}{}{b}║{reset}",
        " ".repeat(left_pad),
        " ".repeat(total_pad - left_pad)
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// One color per structure, stable across every table.
pub fn kind_label(kind: StructureKind) -> String {
    let color: fn() -> String = match kind {
        StructureKind::Trie => GREEN,
        StructureKind::AvlTree => BLUE,
        StructureKind::SegmentTree => MAGENTA,
        StructureKind::SuffixTree => YELLOW,
    };
    themed(color, &[BOLD], kind.name())
}

/// ✓ / ❌ with color.
pub fn check_mark(ok: bool) -> String {
    if ok {
        themed(GREEN, &[BOLD], "✓")
    } else {
        themed(RED, &[BOLD], "❌")
    }
}

/// Accuracy percentage; anything short of 100 is a bug and shows red.
pub fn accuracy_value(percent: f64, total: usize) -> String {
    let text = format!("{:>6.1}%", percent);
    if total == 0 {
        themed(GRAY, &[], &text)
    } else if percent >= 100.0 {
        themed(GREEN, &[], &text)
    } else {
        themed(RED, &[BOLD], &text)
    }
}

/// Color-coded timing value in ms (green=fast, yellow=medium, red=slow)
pub fn timing_ms(value: f64) -> String {
    let text = format!("{:>10.4}", value);
    let color: fn() -> String = if value < 0.1 {
        GREEN
    } else if value < 5.0 {
        YELLOW
    } else {
        RED
    };
    themed(color, &[], &text)
}

/// Savings percentage of `compressed` over `raw`.
pub fn savings_colored(raw: usize, compressed: usize) -> String {
    if raw == 0 {
        return themed(GRAY, &[], "   N/A");
    }
    let saved_pct = (1.0 - compressed as f64 / raw as f64) * 100.0;
    if saved_pct.abs() < 0.5 {
        themed(GRAY, &[], "    0%")
    } else if saved_pct > 0.0 {
        themed(GREEN, &[BOLD], &format!("{:>5.0}%", saved_pct))
    } else {
        themed(RED, &[BOLD], &format!("{:>+5.0}%", saved_pct))
    }
}

pub fn dim(text: &str) -> String {
    themed(GRAY, &[DIM], text)
}

/// Format bytes as human-readable size
pub fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

/// Keep the tail of a long path, prefixed with "...". Counts chars, not bytes.
pub fn truncate_path(path: &str, max_len: usize) -> String {
    let len = path.chars().count();
    if len <= max_len {
        return path.to_string();
    }
    let keep = max_len.saturating_sub(3);
    let tail: String = path.chars().skip(len - keep).collect();
    format!("...{}", tail)
}
