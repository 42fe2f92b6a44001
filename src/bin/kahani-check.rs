use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use kahani_language_server::config::{collect_rules_dirs, Config};
use kahani_language_server::lsp::document::story_id_from_path;
use kahani_language_server::SubmissionGate;

/// Validate story files the same way the editor does
#[derive(Debug, Parser)]
#[command(name = "kahani-check")]
#[command(about = "Check Hindi story files before submission")]
#[command(version)]
struct CheckArgs {
    /// Story files to check
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Story ID to use instead of each file name
    #[arg(long)]
    id: Option<String>,

    #[arg(long, help = "Rule profile to use (e.g., 'hindi-story')")]
    rules: Option<String>,

    #[arg(long, help = "Directory containing *.rules.toml files")]
    rules_dir: Option<PathBuf>,

    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Print the JSON request body for stories that pass
    #[arg(long)]
    json: bool,

    #[arg(long, help = "Story endpoint URL printed with --json")]
    endpoint: Option<String>,
}

fn main() -> Result<ExitCode> {
    let args = CheckArgs::parse();

    let config = Config {
        cli_rules: args.rules,
        rules_dirs: collect_rules_dirs(args.rules_dir)?,
        log_level: args.log_level,
        endpoint: args.endpoint,
        ..Config::default()
    };
    config.init_logging();

    let registry = config.load_rules()?;
    let rules = registry
        .get_active_profile()
        .context("no active rule profile")?;
    let gate = SubmissionGate::new(rules);

    let mut failed = 0;
    for path in &args.files {
        let content =
            fs::read_to_string(path).with_context(|| format!("failed to read {:?}", path))?;
        let story_id = args.id.clone().unwrap_or_else(|| story_id_from_path(path));

        let report = gate.evaluate(&story_id, &content);
        let stats = &report.statistics;

        println!("{}: story \"{}\"", path.display(), story_id.trim());
        println!(
            "  paragraphs: {}, words: {}",
            stats.paragraph_count(),
            stats.total_word_count
        );
        println!(
            "  characters: {}{}",
            rules.content.counter(&content),
            if rules.content.exceeds_max(&content) {
                " (over limit)"
            } else {
                ""
            }
        );
        for paragraph in &stats.paragraphs {
            println!(
                "  paragraph {} (line {}): {} words",
                paragraph.number,
                paragraph.line + 1,
                paragraph.word_count
            );
        }

        if let Some(reason) = report.identifier.reason() {
            println!("  error: Story ID: {}", reason);
        }
        if let Some(reason) = report.content.reason() {
            println!("  error: {}", reason);
        }
        for diagnostic in &stats.diagnostics {
            println!("  error: line {}: {}", diagnostic.line + 1, diagnostic.message);
        }

        if !report.is_open() {
            failed += 1;
            println!("  FAILED");
            continue;
        }

        println!("  OK");
        if args.json {
            let submission = report.into_submission()?;
            if let Some(endpoint) = &config.endpoint {
                println!("POST {}", endpoint);
            }
            println!("{}", submission.to_json()?);
        }
    }

    log::info!("{} of {} stories failed", failed, args.files.len());
    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
