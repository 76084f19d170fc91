//! fal CLI - Flutter Accessibility Linter
//!
//! Scans Dart files for widgets that screen readers cannot describe or reach.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use fal::batch::{Document, FileDocument, ScanSummary, Scanner};
use fal::diagnostic::{RuleId, Severity};
use fal::fix::{synthesize, EditKind};
use fal::output::{
    CompactFormatter, GithubFormatter, JsonFormatter, OutputFormatter, TextFormatter,
};
use fal::rules::RULES;
use glob::glob;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "fal",
    version,
    about = "Flutter Accessibility Linter",
    long_about = "A fast accessibility linter for Flutter widget code. Flags interactive \
widgets without Semantics wrappers, images without semanticLabel, and buttons \
without onPressed callbacks."
)]
struct Cli {
    /// Files or glob patterns to scan
    files: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Disable specific rules (comma-separated)
    #[arg(long, value_delimiter = ',')]
    disable: Option<Vec<String>>,

    /// Minimum severity to report
    #[arg(long, value_enum)]
    min_severity: Option<MinSeverity>,

    /// Show per-rule statistics
    #[arg(long)]
    stats: bool,

    /// List available rules and exit
    #[arg(long)]
    list_rules: bool,

    /// Show fixes that would be applied (dry-run, use with --write to apply)
    #[arg(long)]
    fix: bool,

    /// Write fixes to files (requires --fix)
    #[arg(long, requires = "fix")]
    write: bool,

    /// Exit with 0 even if violations are found
    #[arg(long)]
    exit_zero: bool,

    /// Subcommands
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the Flutter accessibility checklist
    Checklist,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Compact,
    Json,
    Github,
}

#[derive(Clone, Copy, ValueEnum)]
enum MinSeverity {
    Warning,
    Error,
}

const CHECKLIST: &str = "\
Flutter Accessibility Checklist:
- Use semanticLabel on Images
- Wrap interactive elements in Semantics
- Test color contrast with accessibility tools
- Use ExcludeSemantics with decorative elements
- Check readability with TalkBack/VoiceOver";

fn main() {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    // Handle --no-color
    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Some(Commands::Checklist) = &cli.command {
        println!("{}", CHECKLIST);
        return;
    }

    if cli.list_rules {
        list_rules();
        return;
    }

    // Parse rule filters before touching the filesystem
    let disabled = parse_disabled(cli.disable.as_deref().unwrap_or(&[]));

    let mut scanner = Scanner::new().with_disabled_rules(&disabled);
    if let Some(min) = cli.min_severity {
        scanner = scanner.with_min_severity(match min {
            MinSeverity::Warning => Severity::Warning,
            MinSeverity::Error => Severity::Error,
        });
    }

    // Expand glob patterns
    let mut files: Vec<PathBuf> = Vec::new();
    for pattern in &cli.files {
        match glob(pattern) {
            Ok(paths) => {
                for entry in paths.flatten() {
                    if entry.is_file() {
                        files.push(entry);
                    }
                }
            }
            Err(e) => {
                eprintln!(
                    "{}: Invalid pattern '{}': {}",
                    "error".red().bold(),
                    pattern,
                    e
                );
                std::process::exit(2);
            }
        }
    }

    if files.is_empty() {
        eprintln!("{}: No files found to scan", "error".red().bold());
        std::process::exit(2);
    }

    if cli.verbose {
        eprintln!("Scanning {} files...", files.len());
    }

    let docs: Vec<Box<dyn Document>> = files
        .into_iter()
        .map(|p| Box::new(FileDocument::new(p)) as Box<dyn Document>)
        .collect();

    let verbose = cli.verbose;
    let summary = scanner.scan(
        &docs,
        || false,
        |done, total, label| {
            if verbose {
                eprintln!("  [{}/{}] {}", done, total, label);
            }
        },
    );

    let formatter: Box<dyn OutputFormatter> = match cli.format {
        Format::Text => Box::new(if cli.no_color {
            TextFormatter::new().without_color()
        } else {
            TextFormatter::new()
        }),
        Format::Compact => Box::new(CompactFormatter::new()),
        Format::Json => Box::new(JsonFormatter::new().pretty()),
        Format::Github => Box::new(GithubFormatter::new()),
    };
    print!("{}", formatter.format(&summary));

    if cli.stats {
        print_stats(&summary);
    }

    if cli.fix {
        match apply_fixes(&scanner, &summary, cli.write) {
            Ok(applied) => {
                if cli.write {
                    println!("Applied {} fixes", applied);
                } else if applied > 0 {
                    println!(
                        "{} fixes available; re-run with --write to apply",
                        applied
                    );
                }
            }
            Err(e) => {
                eprintln!("{}: {:#}", "error".red().bold(), e);
                std::process::exit(2);
            }
        }
    }

    let exit_code = if cli.exit_zero { 0 } else { summary.exit_code() };
    std::process::exit(exit_code);
}

/// Print the rule table
fn list_rules() {
    println!("{}", "Available rules".bold());
    println!();
    for rule in RULES {
        let severity = match rule.severity {
            Severity::Error => "error".red(),
            Severity::Warning => "warning".yellow(),
        };
        println!("  {} [{}]", rule.id.as_str().cyan(), severity);
        println!("    {}", rule.description);
    }
}

/// Parse --disable values, rejecting unknown rule names
fn parse_disabled(names: &[String]) -> Vec<RuleId> {
    let mut disabled = Vec::new();
    for name in names {
        match name.parse::<RuleId>() {
            Ok(id) => disabled.push(id),
            Err(_) => {
                eprintln!("{}: Unknown rule '{}'", "error".red().bold(), name);
                eprintln!("Use {} to see all available rules", "--list-rules".cyan());
                std::process::exit(2);
            }
        }
    }
    disabled
}

/// Print per-rule violation counts
fn print_stats(summary: &ScanSummary) {
    let mut by_rule: BTreeMap<&str, usize> = BTreeMap::new();
    for report in &summary.reports {
        for finding in &report.findings {
            *by_rule.entry(finding.violation.rule_id.as_str()).or_default() += 1;
        }
    }

    println!("{}", "Rule statistics".bold());
    for (rule, count) in &by_rule {
        println!("  {:<24} {}", rule.cyan(), count);
    }
}

/// Apply safe fixes to the files in the summary.
///
/// Only property insertions are applied automatically; wrapper replacements
/// rewrite whole expressions and are left as suggestions. Insertions are
/// applied back-to-front so earlier spans stay valid.
fn apply_fixes(scanner: &Scanner, summary: &ScanSummary, write: bool) -> anyhow::Result<usize> {
    let mut applied = 0;

    for report in &summary.reports {
        let path = PathBuf::from(&report.label);
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", report.label))?;

        let mut inserts: Vec<_> = scanner
            .detect_filtered(&text)
            .iter()
            .flat_map(|v| synthesize(&text, v))
            .filter(|e| e.kind == EditKind::InsertSemanticLabel)
            .collect();
        inserts.sort_by(|a, b| b.span.start.cmp(&a.span.start));
        inserts.dedup_by_key(|e| e.span.start);

        if inserts.is_empty() {
            continue;
        }

        if write {
            let mut fixed = text;
            for edit in &inserts {
                fixed = edit
                    .apply(&fixed)
                    .with_context(|| format!("stale edit in {}", report.label))?;
            }
            std::fs::write(&path, fixed)
                .with_context(|| format!("writing {}", report.label))?;
            println!("Fixed {} ({} insertions)", report.label, inserts.len());
        } else {
            for edit in &inserts {
                println!("{}: would insert {}", report.label, edit.replacement.trim());
            }
        }
        applied += inserts.len();
    }

    Ok(applied)
}
