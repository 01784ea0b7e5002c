use anyhow::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use ccwatt::aggregate::aggregate;
use ccwatt::cli::{Args, OutputMode};
use ccwatt::display::{print_json_output, print_no_data, print_text_output, quiet_trees};
use ccwatt::energy::{EnergyModel, calculate_energy_with};
use ccwatt::models::{Source, TokenUsage};
use ccwatt::scan::{ClaudeScanner, OpenCodeScanner, Scanner, scan_sources};
use ccwatt::utils::{claude_projects_dir, opencode_message_dir};

fn init_logging(debug: bool) {
    let default = if debug { "ccwatt=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let claude_root: PathBuf = args.claude_dir.clone().unwrap_or_else(claude_projects_dir);
    let opencode_root: PathBuf = args.opencode_dir.clone().unwrap_or_else(opencode_message_dir);

    let claude = ClaudeScanner::new(&claude_root);
    let opencode = OpenCodeScanner::new(&opencode_root);
    let scanners: Vec<&dyn Scanner> = [&claude as &dyn Scanner, &opencode]
        .into_iter()
        .filter(|s| args.source.includes(s.source()))
        .collect();
    for s in &scanners {
        tracing::debug!(source = %s.source(), root = %s.root().display(), "scanning");
    }

    let report = scan_sources(&scanners);
    let energy_model = EnergyModel::from_env();
    let mode = args.output_mode();

    if report.is_empty() {
        match mode {
            OutputMode::Json => {
                let result = calculate_energy_with(&TokenUsage::default(), &energy_model);
                print_json_output(&result, 0, &report.counts, &claude_root, &opencode_root)?;
            }
            OutputMode::Quiet => println!("{}", quiet_trees(0.0)),
            OutputMode::Default => print_no_data(),
        }
        return Ok(());
    }

    let total = aggregate(report.usages());
    let result = calculate_energy_with(&total, &energy_model);
    tracing::debug!(
        sessions = report.session_count(),
        claude_code = report.counts.get(Source::ClaudeCode),
        opencode = report.counts.get(Source::OpenCode),
        total_tokens = result.total_tokens,
        energy_wh = result.energy_wh,
        "aggregated"
    );

    match mode {
        OutputMode::Json => print_json_output(
            &result,
            report.session_count(),
            &report.counts,
            &claude_root,
            &opencode_root,
        )?,
        OutputMode::Quiet => println!("{}", quiet_trees(result.tree_days)),
        OutputMode::Default => {
            print_text_output(&result, report.session_count(), &report.counts)
        }
    }
    Ok(())
}
