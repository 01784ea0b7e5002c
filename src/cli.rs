use std::path::PathBuf;

use crate::models::Source;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceArg {
    /// Claude Code and OpenCode
    All,
    /// Claude Code transcripts only
    Claude,
    /// OpenCode message store only
    Opencode,
}

impl SourceArg {
    pub fn includes(&self, source: Source) -> bool {
        match self {
            SourceArg::All => true,
            SourceArg::Claude => source == Source::ClaudeCode,
            SourceArg::Opencode => source == Source::OpenCode,
        }
    }
}

/// How the report is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Full themed report
    Default,
    /// Structured dump of the result plus metadata
    Json,
    /// Tree glyphs only
    Quiet,
}

#[derive(clap::Parser, Debug)]
#[command(name = "ccwatt", version, about = "How much power did your AI use? 🌳")]
pub struct Args {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,

    /// Show trees only
    #[arg(short, long)]
    pub quiet: bool,

    /// Which tools to scan: all|claude|opencode
    #[arg(long, value_enum, default_value_t = SourceArg::All)]
    pub source: SourceArg,

    /// Claude Code projects directory. Defaults to ~/.claude/projects
    #[arg(long, env = "CLAUDE_PROJECTS_DIR")]
    pub claude_dir: Option<PathBuf>,

    /// OpenCode message directory. Defaults to ~/.local/share/opencode/storage/message
    #[arg(long, env = "OPENCODE_MESSAGE_DIR")]
    pub opencode_dir: Option<PathBuf>,

    /// Debug mode: log skipped files and per-source totals to stderr
    #[arg(long, env = "CCWATT_DEBUG")]
    pub debug: bool,
}

impl Args {
    pub fn parse() -> Self {
        <Args as clap::Parser>::parse()
    }

    /// `--json` takes precedence over `--quiet`
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_output_mode() {
        let args = Args::try_parse_from(["ccwatt"]).unwrap();
        assert_eq!(args.output_mode(), OutputMode::Default);
        assert_eq!(args.source, SourceArg::All);

        let args = Args::try_parse_from(["ccwatt", "-q"]).unwrap();
        assert_eq!(args.output_mode(), OutputMode::Quiet);

        let args = Args::try_parse_from(["ccwatt", "-q", "--json"]).unwrap();
        assert_eq!(args.output_mode(), OutputMode::Json);
    }

    #[test]
    fn test_source_filter() {
        let args = Args::try_parse_from(["ccwatt", "--source", "opencode"]).unwrap();
        assert!(args.source.includes(Source::OpenCode));
        assert!(!args.source.includes(Source::ClaudeCode));
        assert!(SourceArg::All.includes(Source::ClaudeCode));
    }

    #[test]
    fn test_dir_overrides() {
        let args =
            Args::try_parse_from(["ccwatt", "--claude-dir", "/tmp/c", "--opencode-dir", "/tmp/o"])
                .unwrap();
        assert_eq!(args.claude_dir, Some(PathBuf::from("/tmp/c")));
        assert_eq!(args.opencode_dir, Some(PathBuf::from("/tmp/o")));
    }
}
