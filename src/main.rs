use std::path::{Path, PathBuf};

use amlb_scoring::logging::init_tracing;
use amlb_scoring::{Scope, ScoreRecord, Scoreboard, Settings, resolve_scope, score_from_predictions_path};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "amlb-scoring", version, about = "Score benchmark predictions into scoreboards")]
struct Cli {
    /// JSON settings file (frameworks, run mode, directories, label encoding).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    scores_dir: Option<PathBuf>,
    #[arg(long, global = true)]
    predictions_dir: Option<PathBuf>,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score predictions files and add the records to a scoreboard.
    Score(ScoreArgs),
    /// Concatenate scoreboard files into the global results.csv.
    Merge(MergeArgs),
    /// Print the scope each scoreboard file name resolves to.
    Resolve { files: Vec<PathBuf> },
}

#[derive(Debug, Args)]
struct ScoreArgs {
    #[arg(required = true)]
    files: Vec<PathBuf>,
    #[arg(long)]
    framework: Option<String>,
    #[arg(long)]
    benchmark: Option<String>,
    #[arg(long)]
    task: Option<String>,
    /// Load, merge and rewrite the scoreboard (with backup) instead of appending rows.
    #[arg(long)]
    overwrite: bool,
    /// Also print every record as a JSON line.
    #[arg(long)]
    json: bool,
}

impl ScoreArgs {
    fn scope(&self) -> Scope {
        Scope {
            framework: self.framework.clone(),
            benchmark: self.benchmark.clone(),
            task: self.task.clone(),
        }
    }
}

#[derive(Debug, Args)]
struct MergeArgs {
    #[arg(required = true)]
    files: Vec<PathBuf>,
    /// Append to results.csv without a header instead of rewriting it.
    #[arg(long)]
    append: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let settings = resolve_settings(&cli)?;

    match &cli.command {
        Command::Score(args) => run_score(&settings, args),
        Command::Merge(args) => run_merge(&settings, args),
        Command::Resolve { files } => {
            for file in files {
                println!("{}\t{}", file.display(), describe_scope(file));
            }
            Ok(())
        }
    }
}

fn resolve_settings(cli: &Cli) -> Result<Settings, String> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path).map_err(|e| e.to_string())?,
        None => Settings::default(),
    };
    if let Some(dir) = &cli.scores_dir {
        settings.scores_dir = dir.clone();
    }
    if let Some(dir) = &cli.predictions_dir {
        settings.predictions_dir = dir.clone();
    }
    Ok(settings)
}

fn run_score(settings: &Settings, args: &ScoreArgs) -> Result<(), String> {
    tracing::info!("scoring {} file(s)", args.files.len());
    let records = score_files(settings, &args.files);
    if args.json {
        for record in &records {
            println!("{}", serde_json::to_string(record).map_err(|e| e.to_string())?);
        }
    }
    if records.is_empty() {
        tracing::warn!("no predictions could be scored; scoreboard left untouched");
        return Ok(());
    }

    let scope = args.scope();
    let saved = if args.overwrite {
        Scoreboard::load(scope, &settings.scores_dir)
            .map_err(|e| e.to_string())?
            .append_records(&records)
            .save(false)
    } else {
        Scoreboard::from_records(scope, &settings.scores_dir, &records).save(true)
    };
    let path = saved.map_err(|e| e.to_string())?;
    tracing::info!("{} record(s) written to {}", records.len(), path.display());
    Ok(())
}

/// Unparsable names are skipped; a file that fails to score is logged and skipped too.
fn score_files(settings: &Settings, files: &[PathBuf]) -> Vec<ScoreRecord> {
    let mut records = Vec::with_capacity(files.len());
    for file in files {
        match score_from_predictions_path(settings, file) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {}
            Err(err) => tracing::error!("failed to score {}: {err}", file.display()),
        }
    }
    records
}

fn run_merge(settings: &Settings, args: &MergeArgs) -> Result<(), String> {
    let mut merged = Scoreboard::from_rows(Scope::global(), &settings.scores_dir, Vec::new());
    for file in &args.files {
        match Scoreboard::from_file(file, &settings.scores_dir).map_err(|e| e.to_string())? {
            Some(board) => merged = merged.append_board(&board),
            None => tracing::warn!("{} is not a scoreboard file name; skipped", file.display()),
        }
    }
    let path = merged.save(args.append).map_err(|e| e.to_string())?;
    tracing::info!("{} row(s) merged into {}", merged.len(), path.display());
    Ok(())
}

fn describe_scope(path: &Path) -> String {
    match resolve_scope(path) {
        Some((pattern, scope)) => format!("{} ({})", scope, pattern.name()),
        None => "unrecognized".to_string(),
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
