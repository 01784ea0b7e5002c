use std::env;
use std::path::{Path, PathBuf};

fn home_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|b| b.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~"))
}

/// `~/.claude`
pub fn claude_dir() -> PathBuf {
    home_dir().join(".claude")
}

/// `~/.claude/projects`, where Claude Code keeps one JSONL transcript per session
pub fn claude_projects_dir() -> PathBuf {
    claude_dir().join("projects")
}

/// `~/.local/share/opencode`. OpenCode uses this XDG-style path on every
/// platform, so it is not taken from `BaseDirs::data_dir`.
pub fn opencode_dir() -> PathBuf {
    home_dir().join(".local").join("share").join("opencode")
}

/// `~/.local/share/opencode/storage/message`
pub fn opencode_message_dir() -> PathBuf {
    opencode_dir().join("storage").join("message")
}

/// Project name for a Claude Code transcript: the directory right below the
/// scan root, decoded back into the original path.
pub fn claude_project_name(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let mut components = rel.components();
    match (components.next(), components.next()) {
        (Some(dir), Some(_)) => decode_project_dir(&dir.as_os_str().to_string_lossy()),
        _ => "unknown".to_string(),
    }
}

/// Claude Code encodes the project path by replacing `/` with `-`.
/// Percent escapes are decoded too; malformed ones are left as they are.
pub fn decode_project_dir(encoded: &str) -> String {
    let replaced = encoded.replace('-', "/");
    percent_decode(&replaced).unwrap_or(replaced)
}

fn percent_decode(s: &str) -> Option<String> {
    if !s.contains('%') {
        return Some(s.to_string());
    }
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = s.get(i + 1..i + 3)?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

/// Last `/`-separated segment of an OpenCode project path
pub fn last_path_segment(path: &str) -> String {
    match path.rsplit('/').next() {
        Some(seg) if !seg.is_empty() => seg.to_string(),
        _ => "unknown".to_string(),
    }
}

pub fn format_tokens(n: u64) -> String {
    if n >= 1_000_000_000 {
        format!("{:.2}B", n as f64 / 1e9)
    } else if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1e6)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1e3)
    } else {
        n.to_string()
    }
}

/// Integer with thousands separators
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_energy(wh: f64) -> String {
    if wh >= 1000.0 {
        format!("{:.2} kWh", wh / 1000.0)
    } else {
        format!("{wh:.1} Wh")
    }
}

pub fn format_co2(grams: f64) -> String {
    if grams >= 1000.0 {
        format!("{:.2} kg", grams / 1000.0)
    } else {
        format!("{grams:.1} g")
    }
}

pub fn parse_f64_env(var: &str) -> Option<f64> {
    env::var(var)
        .ok()
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}
