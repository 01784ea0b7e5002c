use serde_json::Value;
use std::path::Path;

use ccwatt::display::build_json_output;
use ccwatt::energy::calculate_energy;
use ccwatt::models::{SourceCounts, TokenUsage};

#[test]
fn json_output_shape_minimal() {
    let usage = TokenUsage {
        input_tokens: 90_000,
        output_tokens: 10_000,
        cache_creation_tokens: 20_000,
        cache_read_tokens: 13_456,
        reasoning_tokens: 0,
        model: "claude-sonnet-4-20250514".to_string(),
        provider: "anthropic".to_string(),
    };
    let result = calculate_energy(&usage);
    let counts = SourceCounts {
        claude_code: 3,
        opencode: 1,
    };

    let json: Value = build_json_output(
        &result,
        4,
        &counts,
        Path::new("/tmp/.claude/projects"),
        Path::new("/tmp/opencode/storage/message"),
    );

    for key in [
        "totalTokens",
        "inputTokens",
        "outputTokens",
        "cacheTokens",
        "reasoningTokens",
        "energyWh",
        "co2Grams",
        "treeDays",
        "model",
        "provider",
        "category",
        "sessionCount",
        "sources",
        "claudeDir",
        "opencodeDir",
    ] {
        assert!(json.get(key).is_some(), "missing key: {}", key);
    }

    assert_eq!(json["totalTokens"], 133_456);
    assert_eq!(json["cacheTokens"], 33_456);
    assert_eq!(json["model"], "claude-sonnet-4-20250514");
    assert_eq!(json["provider"], "anthropic");
    assert_eq!(json["category"], "large");
    assert_eq!(json["sessionCount"], 4);
    assert_eq!(json["sources"]["claudeCode"], 3);
    assert_eq!(json["sources"]["opencode"], 1);
    assert_eq!(json["claudeDir"], "/tmp/.claude/projects");
    assert_eq!(json["opencodeDir"], "/tmp/opencode/storage/message");
}

#[test]
fn json_output_keeps_home_paths_absolute() {
    let Some(base) = directories::BaseDirs::new() else {
        return;
    };
    let home = base.home_dir().to_path_buf();
    let claude_dir = home.join(".claude").join("projects");
    let result = calculate_energy(&TokenUsage::default());
    let json = build_json_output(
        &result,
        0,
        &SourceCounts::default(),
        &claude_dir,
        Path::new("/b"),
    );

    let emitted = json["claudeDir"].as_str().unwrap();
    assert!(!emitted.starts_with('~'));
    assert_eq!(emitted, claude_dir.to_string_lossy());
}

#[test]
fn json_output_matches_result_serialization() {
    let result = calculate_energy(&TokenUsage {
        input_tokens: 1_000,
        output_tokens: 500,
        model: "gpt-4o-mini".to_string(),
        ..Default::default()
    });
    let serialized = serde_json::to_value(&result).unwrap();
    let json = build_json_output(
        &result,
        1,
        &SourceCounts::default(),
        Path::new("/a"),
        Path::new("/b"),
    );

    // every EnergyResult field appears under the same camelCase name
    for (key, value) in serialized.as_object().unwrap() {
        assert_eq!(&json[key], value, "mismatch for {key}");
    }
}
