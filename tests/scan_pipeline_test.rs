use chrono::{DateTime, Utc};
use std::fs::{self, File};
use std::path::Path;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

use ccwatt::aggregate::aggregate;
use ccwatt::classify::{ModelCategory, classify};
use ccwatt::energy::calculate_energy;
use ccwatt::models::Source;
use ccwatt::scan::{ClaudeScanner, OpenCodeScanner, Scanner, scan_sources};

fn write_with_mtime(path: &Path, body: &str, secs_after_epoch: u64) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
    let mtime = SystemTime::UNIX_EPOCH + Duration::from_secs(secs_after_epoch);
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(mtime)
        .unwrap();
}

fn claude_line(
    model: &str,
    input: u64,
    output: u64,
    cache_create: u64,
    cache_read: u64,
) -> String {
    format!(
        r#"{{"type":"assistant","message":{{"model":"{model}","usage":{{"input_tokens":{input},"output_tokens":{output},"cache_creation_input_tokens":{cache_create},"cache_read_input_tokens":{cache_read}}}}}}}"#
    )
}

struct Fixture {
    _dir: TempDir,
    claude_root: std::path::PathBuf,
    opencode_root: std::path::PathBuf,
}

fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();
    let claude_root = dir.path().join(".claude").join("projects");
    let opencode_root = dir
        .path()
        .join(".local/share/opencode/storage/message");

    write_with_mtime(
        &claude_root.join("-home-dev-api/older.jsonl"),
        &[
            claude_line("claude-sonnet-4-20250514", 1000, 500, 0, 0),
            "{broken".to_string(),
        ]
        .join("\n"),
        1_000,
    );
    write_with_mtime(
        &claude_root.join("-home-dev-web/newest.jsonl"),
        &[
            claude_line("claude-sonnet-4-20250514", 200, 100, 300, 4000),
            claude_line("claude-sonnet-4-20250514", 0, 50, 0, 6000),
        ]
        .join("\n"),
        3_000,
    );
    write_with_mtime(
        &claude_root.join("-home-dev-web/empty.jsonl"),
        r#"{"type":"summary","summary":"nothing to see"}"#,
        4_000,
    );

    write_with_mtime(
        &opencode_root.join("ses_1/msg_a.json"),
        r#"{"id":"msg_a","sessionID":"ses_1","role":"assistant","modelID":"gpt-4o","providerID":"openai",
            "tokens":{"input":40,"output":10,"reasoning":5,"cache":{"read":0,"write":0}},
            "path":{"cwd":"/home/dev/cli","root":"/home/dev/cli"}}"#,
        2_000,
    );
    write_with_mtime(
        &opencode_root.join("ses_1/msg_b.json"),
        r#"{"id":"msg_b","sessionID":"ses_1","role":"assistant","modelID":"gpt-4o","providerID":"openai",
            "tokens":{"input":60,"output":20}}"#,
        2_500,
    );

    Fixture {
        _dir: dir,
        claude_root,
        opencode_root,
    }
}

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(secs, 0).unwrap()
}

#[test]
fn claude_sessions_sorted_newest_first() {
    let fx = fixture();
    let sessions = ClaudeScanner::new(&fx.claude_root).scan();

    assert_eq!(sessions.len(), 2, "session without usage must be dropped");
    assert!(sessions[0].path.ends_with("newest.jsonl"));
    assert_eq!(sessions[0].project_name, "/home/dev/web");
    assert_eq!(sessions[0].message_count, 2);
    assert_eq!(sessions[0].last_modified, at(3_000));
    assert_eq!(sessions[1].project_name, "/home/dev/api");
    assert_eq!(sessions[1].last_modified, at(1_000));
    assert!(sessions.iter().all(|s| s.message_count > 0));
}

#[test]
fn opencode_session_takes_latest_mtime() {
    let fx = fixture();
    let sessions = OpenCodeScanner::new(&fx.opencode_root).scan();

    assert_eq!(sessions.len(), 1);
    let s = &sessions[0];
    assert_eq!(s.path, "ses_1");
    assert_eq!(s.project_name, "cli");
    assert_eq!(s.message_count, 2);
    assert_eq!(s.last_modified, at(2_500));
    assert_eq!(s.usage.input_tokens, 100);
    assert_eq!(s.usage.output_tokens, 30);
    assert_eq!(s.usage.reasoning_tokens, 5);
    assert_eq!(s.usage.provider, "openai");
}

#[test]
fn merged_report_feeds_the_estimate() {
    let fx = fixture();
    let claude = ClaudeScanner::new(&fx.claude_root);
    let opencode = OpenCodeScanner::new(&fx.opencode_root);
    let report = scan_sources(&[&claude, &opencode]);

    assert_eq!(report.session_count(), 3);
    assert_eq!(report.counts.claude_code, 2);
    assert_eq!(report.counts.opencode, 1);
    let order: Vec<Source> = report.sessions.iter().map(|s| s.source).collect();
    assert_eq!(
        order,
        [Source::ClaudeCode, Source::OpenCode, Source::ClaudeCode]
    );

    let total = aggregate(report.usages());
    assert_eq!(total.input_tokens, 1000 + 200 + 100);
    assert_eq!(total.output_tokens, 500 + 150 + 30);
    assert_eq!(total.cache_creation_tokens, 300);
    assert_eq!(total.cache_read_tokens, 10_000);
    assert_eq!(total.reasoning_tokens, 5);
    // last informative label in newest-first order comes from the oldest session
    assert_eq!(total.model, "claude-sonnet-4-20250514");
    assert_eq!(total.provider, "anthropic");

    let result = calculate_energy(&total);
    assert_eq!(classify(&result.model), ModelCategory::Large);
    assert_eq!(
        result.total_tokens,
        result.input_tokens + result.output_tokens + result.cache_tokens + result.reasoning_tokens
    );
    let compute = (1300 + 680 + 5 + 300) as f64;
    let expected_wh = compute * 0.0003 + 10_000.0 * 0.0003 * 0.01;
    assert!((result.energy_wh - expected_wh).abs() < 1e-9);
    assert!((result.co2_grams - expected_wh * 0.5).abs() < 1e-9);
}

#[test]
fn missing_roots_yield_no_sessions() {
    let dir = TempDir::new().unwrap();
    let claude = ClaudeScanner::new(dir.path().join("no-claude"));
    let opencode = OpenCodeScanner::new(dir.path().join("no-opencode"));

    assert!(claude.try_scan().is_err());
    let report = scan_sources(&[&claude, &opencode]);
    assert!(report.is_empty());
    assert_eq!(report.counts.total(), 0);

    let result = calculate_energy(&aggregate(report.usages()));
    assert_eq!(result.energy_wh, 0.0);
    assert_eq!(result.tree_days, 0.0);
}
