use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "storybar", version)]
struct Cli {
    /// Log timeline transitions to stderr (`RUST_LOG` overrides the level).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a script against the simulated renderer and print the run report.
    Run(RunArgs),
    /// Print the segment frames for a config at a given bar size.
    Layout(LayoutArgs),
    /// Check a timeline config.
    Validate(ValidateArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Write the report here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct LayoutArgs {
    /// Timeline config JSON.
    #[arg(long)]
    config: PathBuf,

    #[arg(long, default_value_t = 320.0)]
    width: f64,

    #[arg(long, default_value_t = 4.0)]
    height: f64,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// Timeline config JSON.
    #[arg(long)]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        init_tracing();
    }
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Layout(args) => cmd_layout(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("storybar=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    let r = BufReader::new(f);
    let value = serde_json::from_reader(r).with_context(|| format!("parse {what} JSON"))?;
    Ok(value)
}

fn write_json<T: serde::Serialize>(value: &T, out: Option<&Path>) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(path)
                .with_context(|| format!("create output '{}'", path.display()))?;
            serde_json::to_writer_pretty(f, value)
                .with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, value).context("write stdout")?;
            writeln!(stdout).context("write stdout")?;
        }
    }
    Ok(())
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let script: storybar::Script = read_json(&args.script, "script")?;
    let report = storybar::SimHost::run(&script)
        .with_context(|| format!("run script '{}'", args.script.display()))?;
    write_json(&report, args.out.as_deref())
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let config: storybar::TimelineConfig = read_json(&args.config, "config")?;
    config.validate()?;
    if !(args.width > 0.0 && args.height > 0.0) {
        anyhow::bail!("bar size must be positive, got {}x{}", args.width, args.height);
    }
    let bounds = storybar::Rect::new(0.0, 0.0, args.width, args.height);
    let layout = storybar::BarLayout::compute(bounds, config.segment_count, config.padding);
    write_json(&layout, None)
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let config: storybar::TimelineConfig = read_json(&args.config, "config")?;
    config
        .validate()
        .with_context(|| format!("invalid config '{}'", args.config.display()))?;
    eprintln!(
        "ok: {} segments, {}s each",
        config.segment_count, config.duration_secs
    );
    Ok(())
}
