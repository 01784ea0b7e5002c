use anyhow::{Context, Result};
use std::env;
use std::path::Path;

#[cfg(feature = "colors")]
use owo_colors::OwoColorize;

// Provide a no-op color shim when "colors" feature is disabled
#[cfg(not(feature = "colors"))]
pub mod color_shim {
    use std::fmt::{self, Display, Formatter};

    #[derive(Clone)]
    pub struct Plain(pub String);

    impl Display for Plain {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            f.write_str(&self.0)
        }
    }

    pub trait ColorizeShim {
        fn as_str(&self) -> &str;

        fn bright_black(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
        fn green(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
        fn yellow(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
        fn cyan(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
        fn white(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
        fn bold(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
    }

    impl ColorizeShim for &str {
        fn as_str(&self) -> &str {
            self
        }
    }
    impl ColorizeShim for String {
        fn as_str(&self) -> &str {
            self.as_str()
        }
    }
    impl ColorizeShim for Plain {
        fn as_str(&self) -> &str {
            &self.0
        }
    }
}

#[cfg(not(feature = "colors"))]
use color_shim::ColorizeShim as OwoColorize;

use crate::classify::{classify, provider_emoji};
use crate::models::{EnergyResult, SourceCounts};
use crate::utils::{format_co2, format_count, format_energy, format_tokens};

/// Inner width of the report box
const BOX_WIDTH: usize = 35;
const TREES_PER_ROW: usize = 10;
const MAX_TREE_ROWS: usize = 15;
const QUIET_MAX_TREES: u64 = 15;

const TREE: &str = "🌳";
const SPROUT: &str = "🌱";

fn colors_enabled() -> bool {
    env::var("NO_COLOR").is_err()
}

fn paint(s: &str, f: impl Fn(&str) -> String) -> String {
    if colors_enabled() { f(s) } else { s.to_string() }
}

fn gray(s: &str) -> String {
    paint(s, |s| s.bright_black().to_string())
}

/// Terminal columns taken by `s`; emoji count double, variation selectors zero.
fn display_width(s: &str) -> usize {
    s.chars()
        .map(|c| match c as u32 {
            0xFE0F | 0x200D => 0,
            0x2600..=u32::MAX => 2,
            _ => 1,
        })
        .sum()
}

fn box_top() -> String {
    gray(&format!("  ┏{}┓", "━".repeat(BOX_WIDTH)))
}

fn box_mid() -> String {
    gray(&format!("  ┣{}┫", "━".repeat(BOX_WIDTH)))
}

fn box_bottom() -> String {
    gray(&format!("  ┗{}┛", "━".repeat(BOX_WIDTH)))
}

/// One boxed row; `plain` is the uncolored text used for padding.
fn box_row(plain: &str, styled: String) -> String {
    let pad = BOX_WIDTH.saturating_sub(display_width(plain));
    format!("{}{}{}{}", gray("  ┃"), styled, " ".repeat(pad), gray("┃"))
}

fn stat_row(label: &str, value: &str, color: impl Fn(&str) -> String) -> String {
    let value = format!("{value:>12}");
    let plain = format!("{label}{value}");
    box_row(&plain, format!("{label}{}", paint(&value, color)))
}

/// Whole tree-days, rounded up
fn tree_count(tree_days: f64) -> u64 {
    if tree_days.is_finite() && tree_days > 0.0 {
        tree_days.ceil() as u64
    } else {
        0
    }
}

/// Glyph-only summary: one tree per tree-day up to 15, then `+N`.
pub fn quiet_trees(tree_days: f64) -> String {
    let count = tree_count(tree_days).min(QUIET_MAX_TREES);
    if count == 0 {
        return SPROUT.to_string();
    }
    let mut out = TREE.repeat(count as usize);
    if tree_days > QUIET_MAX_TREES as f64 {
        out.push_str(&format!(" +{}", (tree_days - QUIET_MAX_TREES as f64).round() as u64));
    }
    out
}

fn impact_header(lines: &mut Vec<String>) {
    lines.push(String::new());
    lines.push(paint("  🌍 ENVIRONMENTAL IMPACT", |s| s.bold().green().to_string()));
    lines.push(gray("  ─────────────────────────────────────────"));
    lines.push(String::new());
}

fn tree_section(tree_days: f64, lines: &mut Vec<String>) {
    let green = |s: &str| s.green().to_string();
    let trees = tree_count(tree_days);

    if trees == 0 {
        lines.push(paint(&format!("     {SPROUT}"), green));
        lines.push(gray("     A tiny sprout. You're eco-friendly!"));
        return;
    }

    if trees < 10 {
        lines.push(paint(&format!("     {}", TREE.repeat(trees as usize)), green));
        let plural = if trees == 1 { "" } else { "s" };
        lines.push(gray(&format!(
            "     {trees} tree-day{plural} needed to absorb your CO2"
        )));
        return;
    }

    // One glyph per ten trees from here on
    let glyphs = trees.div_ceil(10) as usize;
    let max_glyphs = MAX_TREE_ROWS * TREES_PER_ROW;
    if glyphs <= max_glyphs {
        let mut left = glyphs;
        while left > 0 {
            let n = left.min(TREES_PER_ROW);
            lines.push(paint(&format!("     {}", TREE.repeat(n)), green));
            left -= n;
        }
    } else {
        for _ in 0..MAX_TREE_ROWS {
            lines.push(paint(&format!("     {}", TREE.repeat(TREES_PER_ROW)), green));
        }
        let remaining = trees - (max_glyphs as u64 * 10);
        lines.push(paint(
            &format!(
                "     ...and {} more trees working overtime",
                format_count(remaining)
            ),
            |s| s.yellow().to_string(),
        ));
    }
    lines.push(gray(&format!(
        "     {TREE} = 10 trees | {} tree-days needed",
        format_count(trees)
    )));
}

fn sessions_line(session_count: usize, counts: &SourceCounts) -> String {
    if counts.total() > 0 {
        let mut parts = Vec::new();
        if counts.claude_code > 0 {
            parts.push(format!("🟠 Claude Code: {}", counts.claude_code));
        }
        if counts.opencode > 0 {
            parts.push(format!("🔷 OpenCode: {}", counts.opencode));
        }
        gray(&format!("  📁 {}", parts.join("  ")))
    } else {
        gray(&format!("  📁 Analyzed {session_count} sessions"))
    }
}

/// Full text report as a list of lines
pub fn render_report(
    result: &EnergyResult,
    session_count: usize,
    counts: &SourceCounts,
) -> Vec<String> {
    let mut lines = Vec::new();
    impact_header(&mut lines);
    tree_section(result.tree_days, &mut lines);
    lines.push(String::new());
    lines.push(String::new());

    let title = " ⚡ USAGE REPORT";
    lines.push(box_top());
    lines.push(box_row(title, paint(title, |s| s.bold().white().to_string())));
    lines.push(box_mid());

    let bold_yellow = |s: &str| s.bold().yellow().to_string();
    let bold_cyan = |s: &str| s.bold().cyan().to_string();
    let bold_green = |s: &str| s.bold().green().to_string();
    let white = |s: &str| s.white().to_string();

    lines.push(stat_row(" ⚡ Power    ", &format_energy(result.energy_wh), bold_yellow));
    lines.push(stat_row(" 💨 CO2      ", &format_co2(result.co2_grams), bold_cyan));
    let days = format!("{} days", format_count(tree_count(result.tree_days)));
    lines.push(stat_row(" 🌳 Trees    ", &days, bold_green));

    lines.push(box_mid());
    lines.push(box_row(" 📊 Tokens", " 📊 Tokens".to_string()));
    lines.push(stat_row("    Input   ", &format_tokens(result.input_tokens), white));
    lines.push(stat_row("    Output  ", &format_tokens(result.output_tokens), white));
    lines.push(stat_row("    Cache   ", &format_tokens(result.cache_tokens), white));
    if result.reasoning_tokens > 0 {
        lines.push(stat_row("    Reason  ", &format_tokens(result.reasoning_tokens), white));
    }
    lines.push(stat_row("    Total   ", &format_tokens(result.total_tokens), |s| {
        s.bold().white().to_string()
    }));
    lines.push(box_bottom());
    lines.push(String::new());

    lines.push(gray(&format!(
        "  {} {} ({}, {} model)",
        provider_emoji(&result.provider),
        result.model,
        result.provider,
        classify(&result.model)
    )));
    lines.push(sessions_line(session_count, counts));
    lines.push(String::new());
    lines
}

/// Report shown when no source produced any session
pub fn render_no_data() -> Vec<String> {
    let mut lines = Vec::new();
    impact_header(&mut lines);
    lines.push(paint(&format!("     {SPROUT}"), |s| s.green().to_string()));
    lines.push(gray("     No carbon footprint yet. Earth is happy!"));
    lines.push(String::new());
    lines.push(String::new());

    let title = " ⚡ USAGE REPORT";
    lines.push(box_top());
    lines.push(box_row(title, paint(title, |s| s.bold().white().to_string())));
    lines.push(box_mid());
    let missing = " 🔍 No AI usage data found";
    lines.push(box_row(missing, paint(missing, |s| s.yellow().to_string())));
    let supported = "    Supported:";
    lines.push(box_row(supported, gray(supported)));
    let tools = "    Claude Code, OpenCode";
    lines.push(box_row(tools, gray(tools)));
    lines.push(box_bottom());
    lines.push(String::new());
    lines
}

pub fn print_text_output(result: &EnergyResult, session_count: usize, counts: &SourceCounts) {
    for line in render_report(result, session_count, counts) {
        println!("{line}");
    }
}

pub fn print_no_data() {
    for line in render_no_data() {
        println!("{line}");
    }
}

pub fn build_json_output(
    result: &EnergyResult,
    session_count: usize,
    counts: &SourceCounts,
    claude_dir: &Path,
    opencode_dir: &Path,
) -> serde_json::Value {
    serde_json::json!({
        "totalTokens": result.total_tokens,
        "inputTokens": result.input_tokens,
        "outputTokens": result.output_tokens,
        "cacheTokens": result.cache_tokens,
        "reasoningTokens": result.reasoning_tokens,
        "energyWh": result.energy_wh,
        "co2Grams": result.co2_grams,
        "treeDays": result.tree_days,
        "model": result.model,
        "provider": result.provider,
        "category": classify(&result.model).as_str(),
        "sessionCount": session_count,
        "sources": {
            "claudeCode": counts.claude_code,
            "opencode": counts.opencode,
        },
        "claudeDir": claude_dir.to_string_lossy(),
        "opencodeDir": opencode_dir.to_string_lossy(),
    })
}

pub fn print_json_output(
    result: &EnergyResult,
    session_count: usize,
    counts: &SourceCounts,
    claude_dir: &Path,
    opencode_dir: &Path,
) -> Result<()> {
    let json = build_json_output(result, session_count, counts, claude_dir, opencode_dir);
    let text = serde_json::to_string_pretty(&json).context("serialize json output")?;
    println!("{text}");
    Ok(())
}
