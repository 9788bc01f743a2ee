use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use rule_fixer::{
    atomic_write, load_from_path, ConflictPolicy, Fix, FixApplier, FixerConfig, Located,
    RuleFixer, RustParser, SpliceApplier, TextRange,
};
use similar::{ChangeTag, TextDiff};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "rule-fixer")]
#[command(about = "Build and apply declarative source fixes", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a JSON list of fixes to a file
    Apply {
        /// File to fix
        file: PathBuf,

        /// JSON array of {"range": [start, end], "text": "..."} objects
        #[arg(short, long)]
        fixes: PathBuf,

        /// Show what would change without writing the file
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Show unified diff of changes
        #[arg(short, long)]
        diff: bool,

        /// Abort on the first malformed or conflicting fix
        #[arg(long)]
        strict: bool,

        /// TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Build a single fix and print it as JSON
    Describe {
        /// Source file the fix refers to
        file: PathBuf,

        /// Kind of fix to build
        #[arg(long, value_enum)]
        op: FixOp,

        /// Byte range to target
        #[arg(long, num_args = 2, value_names = ["START", "END"], conflicts_with_all = ["token", "node"])]
        range: Option<Vec<usize>>,

        /// Target the first token with this text (Rust sources)
        #[arg(long, conflicts_with = "node")]
        token: Option<String>,

        /// Target the first syntax node of this kind (Rust sources)
        #[arg(long)]
        node: Option<String>,

        /// Text to insert or replace with
        #[arg(long, default_value = "")]
        text: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FixOp {
    InsertBefore,
    InsertAfter,
    Replace,
    Remove,
    Keep,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Apply {
            file,
            fixes,
            dry_run,
            diff,
            strict,
            config,
        } => cmd_apply(&file, &fixes, dry_run, diff, strict, config.as_deref()),

        Commands::Describe {
            file,
            op,
            range,
            token,
            node,
            text,
        } => cmd_describe(&file, op, range, token, node, text),
    }
}

fn display_diff(file: &Path, original: &str, modified: &str, context_lines: usize) {
    println!("\n{}", format!("--- {} (original)", file.display()).dimmed());
    println!("{}", format!("+++ {} (fixed)", file.display()).dimmed());

    let diff = TextDiff::from_lines(original, modified);
    let mut unified = diff.unified_diff();
    unified.context_radius(context_lines);

    for hunk in unified.iter_hunks() {
        println!("{}", hunk.header().to_string().cyan());
        for change in hunk.iter_changes() {
            let sign = match change.tag() {
                ChangeTag::Delete => format!("-{}", change).red(),
                ChangeTag::Insert => format!("+{}", change).green(),
                ChangeTag::Equal => format!(" {}", change).normal(),
            };
            print!("{}", sign);
            if change.missing_newline() {
                println!();
            }
        }
    }
}

fn cmd_apply(
    file: &Path,
    fixes_path: &Path,
    dry_run: bool,
    show_diff: bool,
    strict: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => load_from_path(path)?,
        None => FixerConfig::default(),
    };
    if strict {
        config.apply.on_conflict = ConflictPolicy::Error;
    }

    let source = fs::read_to_string(file)
        .with_context(|| format!("failed to read source file {}", file.display()))?;
    let raw = fs::read_to_string(fixes_path)
        .with_context(|| format!("failed to read fixes from {}", fixes_path.display()))?;
    let fixes: Vec<Fix> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse fixes JSON {}", fixes_path.display()))?;

    let outcome = SpliceApplier::new(config.apply)
        .apply(&source, &fixes)
        .with_context(|| format!("could not apply fixes to {}", file.display()))?;

    if dry_run {
        println!("{}", "[DRY RUN - file will not be written]".cyan());
    }

    for fix in &outcome.applied {
        println!("{} {} {:?}", "✓".green(), fix.range, fix.text);
    }
    for skipped in &outcome.skipped {
        let reason = serde_json::to_string(&skipped.reason)?;
        eprintln!(
            "{} {} {:?}: skipped {}",
            "✗".red(),
            skipped.fix.range,
            skipped.fix.text,
            reason
        );
    }

    if (show_diff || config.output.diff) && outcome.is_fixed(&source) {
        display_diff(file, &source, &outcome.output, config.output.context_lines);
    }

    if !dry_run && outcome.is_fixed(&source) {
        atomic_write(file, outcome.output.as_bytes())?;
    }

    println!();
    println!("{}", "Summary:".bold());
    println!("  {} applied", format!("{}", outcome.fixed_count()).green());
    println!("  {} skipped", format!("{}", outcome.skipped.len()).red());

    if !outcome.skipped.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}

fn cmd_describe(
    file: &Path,
    op: FixOp,
    range: Option<Vec<usize>>,
    token: Option<String>,
    node: Option<String>,
    text: String,
) -> Result<()> {
    let source = fs::read_to_string(file)
        .with_context(|| format!("failed to read source file {}", file.display()))?;

    let target: TextRange = match (range, token, node) {
        (Some(bounds), _, _) => match bounds.as_slice() {
            [start, end] => TextRange::new(*start, *end),
            _ => bail!("--range takes exactly two offsets"),
        },
        (None, Some(token), _) => {
            let parsed = RustParser::new()?.parse_with_source(&source)?;
            parsed
                .find_token(&token)
                .with_context(|| format!("no token {:?} in {}", token, file.display()))?
                .text_range()
        }
        (None, None, Some(kind)) => {
            let parsed = RustParser::new()?.parse_with_source(&source)?;
            parsed
                .find_node(&kind)
                .with_context(|| format!("no {} node in {}", kind, file.display()))?
                .text_range()
        }
        (None, None, None) => bail!("one of --range, --token or --node is required"),
    };

    let fixer = RuleFixer::new(source.as_str());
    let fix = match op {
        FixOp::InsertBefore => fixer.insert_text_before(&target, text),
        FixOp::InsertAfter => fixer.insert_text_after(&target, text),
        FixOp::Replace => fixer.replace_text(&target, text),
        FixOp::Remove => fixer.remove(&target),
        FixOp::Keep => fixer.keep(&target),
    };

    println!("{}", serde_json::to_string(&fix)?);
    Ok(())
}
