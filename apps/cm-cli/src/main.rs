use clap::{Parser, Subcommand, ValueEnum};
use cm_app::{
    AppResult, CaseHost, ConvergenceSummary, MonitorSession, SolverHost, group_csv, group_json,
    replay_reader,
};
use cm_core::SeriesGroup;
use cm_monitor::{MonitorConfig, SeriesUpdate};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "cm-cli")]
#[command(about = "convmon CLI - solver convergence log monitor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a solver log and print per-quantity statistics
    Summary {
        /// Path to the solver log
        log_path: PathBuf,
        #[command(flatten)]
        monitor: MonitorArgs,
    },
    /// Replay a solver log and export one series group
    Export {
        /// Path to the solver log
        log_path: PathBuf,
        /// Group to export: residuals, forces or coefficients
        #[arg(short, long, default_value = "residuals")]
        group: SeriesGroup,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        monitor: MonitorArgs,
    },
    /// Show the run command and plot groups a case file produces
    Case {
        /// Path to the case YAML/JSON file
        case_path: PathBuf,
    },
}

#[derive(clap::Args)]
struct MonitorArgs {
    /// Case file whose function objects decide the plot groups
    #[arg(long)]
    case: Option<PathBuf>,
    /// Enable the force group without a case file
    #[arg(long)]
    forces: bool,
    /// Enable the force-coefficient group without a case file
    #[arg(long)]
    coefficients: bool,
    /// Lines handed to the parser per chunk
    #[arg(long, default_value_t = 64)]
    chunk_lines: usize,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summary { log_path, monitor } => cmd_summary(&log_path, &monitor),
        Commands::Export {
            log_path,
            group,
            format,
            output,
            monitor,
        } => cmd_export(&log_path, group, format, output.as_deref(), &monitor),
        Commands::Case { case_path } => cmd_case(&case_path),
    }
}

/// Replay `log_path` into a fresh session; returns the session and the number of sink updates.
fn replay(log_path: &Path, args: &MonitorArgs) -> AppResult<(MonitorSession, usize)> {
    let mut session = MonitorSession::new();
    match &args.case {
        Some(case_path) => {
            let host = CaseHost::load(case_path)?;
            session.prepare(&host, &host.case_dir())?;
        }
        None => session.start(MonitorConfig::new(args.forces, args.coefficients)),
    }

    let file = File::open(log_path)?;
    let mut updates = 0usize;
    let stats = replay_reader(
        &mut session,
        BufReader::new(file),
        args.chunk_lines,
        &mut |_update: SeriesUpdate| updates += 1,
    )?;
    info!(
        lines = stats.lines,
        chunks = stats.chunks,
        updates,
        "log replayed"
    );
    Ok((session, updates))
}

fn cmd_summary(log_path: &Path, args: &MonitorArgs) -> AppResult<()> {
    let (session, updates) = replay(log_path, args)?;
    let summary = session.summary();
    print_summary(&summary);
    println!("  Sink updates: {}", updates);
    Ok(())
}

fn print_summary(summary: &ConvergenceSummary) {
    println!("Timesteps: {}", summary.iteration);
    println!(
        "Plot groups: residuals{}{}",
        if summary.config.forces_enabled { ", forces" } else { "" },
        if summary.config.force_coefficients_enabled {
            ", coefficients"
        } else {
            ""
        }
    );

    let mut populated = summary.populated().peekable();
    if populated.peek().is_none() {
        println!("No values recorded");
        return;
    }
    println!("  {:<12} {:<13} {:>7} {:>14}", "quantity", "group", "points", "last");
    for q in populated {
        let last = q
            .last
            .map(|v| format!("{:.6e}", v))
            .unwrap_or_else(|| "-".to_string());
        println!("  {:<12} {:<13} {:>7} {:>14}", q.label, q.group.name(), q.points, last);
    }
}

fn cmd_export(
    log_path: &Path,
    group: SeriesGroup,
    format: ExportFormat,
    output: Option<&Path>,
    args: &MonitorArgs,
) -> AppResult<()> {
    let (session, _) = replay(log_path, args)?;
    let update = session.parser().snapshot(group);

    let content = match format {
        ExportFormat::Csv => group_csv(&update),
        ExportFormat::Json => group_json(&update)?,
    };

    if let Some(output_path) = output {
        std::fs::write(output_path, content)?;
        println!(
            "✓ Exported {} rows of {} to {}",
            update.max_len(),
            group,
            output_path.display()
        );
    } else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(content.as_bytes())?;
        if format == ExportFormat::Json {
            writeln!(stdout)?;
        }
    }
    Ok(())
}

fn cmd_case(case_path: &Path) -> AppResult<()> {
    let host = CaseHost::load(case_path)?;
    let case = host.case();
    let case_dir = host.case_dir();
    let command = host.run_command(&case_dir)?;
    let config = case.monitor_config();

    println!("Case: {}", case.name);
    println!("  Case directory: {}", case_dir.display());
    println!("  Run command: {}", command.display());
    println!(
        "  Forces plot: {}",
        if config.forces_enabled { "yes" } else { "no" }
    );
    println!(
        "  Force coefficients plot: {}",
        if config.force_coefficients_enabled { "yes" } else { "no" }
    );
    for def in case.unplotted_function_objects() {
        println!("  Not plotted: {} ({})", def.name, String::from(def.kind.clone()));
    }
    if !case.environment.is_empty() {
        println!("  Environment overrides:");
        for (key, value) in &case.environment {
            println!("    {}={}", key, value);
        }
    }
    Ok(())
}
