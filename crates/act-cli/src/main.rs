//! act - headless runner for action-tree scripts.
//!
//! - `act run <script>` - tick a script against a simulated entity
//! - `act check <script>` - report configuration faults without running

mod config;
mod sim;

use std::io::Write;
use std::path::{Path, PathBuf};

use act_core::{NullTraceSink, OwnerView, TickContext, TraceSink};
use act_tree::{load_script, DriverStatus, InitReport, Script, ScriptDriver};
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::RunConfig;
use crate::sim::{PrintSink, SimEntity};

#[derive(Parser)]
#[command(name = "act")]
#[command(about = "Run scripted entity behavior headlessly", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON lines instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one entity running a script
    Run {
        #[command(flatten)]
        input: Input,

        /// Override the configured tick count
        #[arg(long)]
        ticks: Option<u64>,

        /// Override the configured step in seconds
        #[arg(long)]
        dt: Option<f32>,

        /// Print every tick, not just ticks with activity
        #[arg(long)]
        all: bool,

        /// Print node lifecycle events
        #[arg(long)]
        trace: bool,
    },

    /// Initialize a script and report configuration faults
    Check {
        #[command(flatten)]
        input: Input,
    },
}

#[derive(Args)]
struct Input {
    /// Script file (.yaml, .yml or .json)
    script: PathBuf,

    /// Run configuration (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            input,
            ticks,
            dt,
            all,
            trace,
        } => {
            let mut config = RunConfig::load_or_default(input.config.as_deref())?;
            if let Some(ticks) = ticks {
                config.ticks = ticks;
            }
            if let Some(dt) = dt {
                config.dt_seconds = dt;
            }
            config.validate()?;
            run(&input.script, &config, cli.json, all, trace)
        }
        Commands::Check { input } => {
            let config = RunConfig::load_or_default(input.config.as_deref())?;
            config.validate()?;
            check(&input.script, &config, cli.json)
        }
    }
}

fn read_script(path: &Path) -> Result<Script> {
    let file = load_script(path)
        .with_context(|| format!("Failed to load script from {}", path.display()))?;
    Ok(file.into())
}

fn run(script_path: &Path, config: &RunConfig, json: bool, all: bool, trace: bool) -> Result<()> {
    let script = read_script(script_path)?;
    tracing::info!(script = %script_path.display(), ticks = config.ticks, "Starting run");

    let sink: Box<dyn TraceSink> = if trace {
        Box::new(PrintSink { json })
    } else {
        Box::new(NullTraceSink)
    };
    let mut entity = SimEntity::spawn(config, sink);
    let mut driver = ScriptDriver::new(Some(script));

    let mut ctx = TickContext::new(0, config.dt_seconds);
    let report = driver.activate(&ctx, &mut entity, None)?;
    log_faults(report);

    let mut out = std::io::stdout().lock();
    let mut status = driver.status();
    for _ in 0..config.ticks {
        ctx = ctx.next();
        if config.deactivate_at_tick == Some(ctx.tick) {
            tracing::info!(tick = ctx.tick, "Deactivating entity");
            entity.deactivate();
        }

        status = driver.tick(&ctx, &mut entity);
        let record = entity.actuate(&ctx);

        if all || record.is_eventful() {
            if json {
                writeln!(out, "{}", serde_json::to_string(&record)?)?;
            } else {
                write!(
                    out,
                    "{:>6}  pos ({:8.3}, {:8.3})  vel ({:7.3}, {:7.3})",
                    record.tick,
                    record.position.x,
                    record.position.y,
                    record.velocity.x,
                    record.velocity.y
                )?;
                if !record.shots.is_empty() {
                    write!(out, "  shots {}", record.shots.len())?;
                }
                if record.throw.is_some() {
                    write!(out, "  throw")?;
                }
                if record.melee.is_some() {
                    write!(out, "  melee")?;
                }
                if record.jump.is_some() {
                    write!(out, "  jump")?;
                }
                writeln!(out)?;
            }
        }

        if status != DriverStatus::Running {
            break;
        }
    }

    tracing::info!(
        tick = ctx.tick,
        status = ?status,
        x = entity.position().x,
        y = entity.position().y,
        "Run complete"
    );
    Ok(())
}

fn check(script_path: &Path, config: &RunConfig, json: bool) -> Result<()> {
    let script = read_script(script_path)?;
    let mut entity = SimEntity::spawn(config, Box::new(NullTraceSink));
    let mut driver = ScriptDriver::new(Some(script));
    let report = driver.activate(&TickContext::new(0, config.dt_seconds), &mut entity, None)?;

    if json {
        let faults: Vec<_> = report
            .faults
            .iter()
            .map(|fault| {
                serde_json::json!({
                    "node": fault.node,
                    "kind": fault.kind,
                    "error": fault.error.to_string(),
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::json!({ "nodes": report.node_count(), "faults": faults })
        );
    } else {
        println!("{}: {} nodes", script_path.display(), report.node_count());
        for fault in &report.faults {
            println!("  node {} ({}): {}", fault.node, fault.kind, fault.error);
        }
    }

    if !report.is_clean() {
        bail!("{} configuration fault(s)", report.faults.len());
    }
    Ok(())
}

fn log_faults(report: &InitReport) {
    if !report.is_clean() {
        tracing::warn!(
            faults = report.faults.len(),
            "Script has misconfigured nodes; they will be skipped"
        );
    }
}
