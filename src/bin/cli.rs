use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use plan_scheduler::{
    PlanRequest, Scheduler, TaskGraph, load_plan_request, parse_date, render_table, to_json,
    write_csv,
};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cli", about = "Schedule a dependency graph of tasks onto working days")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the critical path, calendar dates and deadline warnings
    Plan {
        /// JSON file holding `tasks` and optional `constraints`
        request: PathBuf,
        /// Project start date (YYYY-MM-DD); defaults to today
        #[arg(long, value_parser = parse_anchor)]
        anchor: Option<NaiveDate>,
        /// Overrides the deadline from the request
        #[arg(long)]
        deadline: Option<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Print the dependency order, one id per line
    Order {
        request: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

fn parse_anchor(raw: &str) -> Result<NaiveDate, String> {
    parse_date(raw).ok_or_else(|| format!("invalid date '{raw}' (expected YYYY-MM-DD)"))
}

fn load(path: &Path) -> Result<PlanRequest> {
    load_plan_request(path)
        .with_context(|| format!("failed to read plan request {}", path.display()))
}

fn run_plan(
    request: &PlanRequest,
    anchor: Option<NaiveDate>,
    deadline: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let mut options = request.options(anchor);
    if deadline.is_some() {
        options.deadline = deadline;
    }

    let outcome = Scheduler::from_options(&options)
        .plan(&request.tasks)
        .context("scheduling failed")?;

    match format {
        OutputFormat::Table => {
            println!("{}", render_table(&outcome));
            println!("Planned ({})", outcome.summary().to_cli_summary());
            for warning in &outcome.report.warnings {
                println!("Warning: {warning}");
            }
        }
        OutputFormat::Json => println!("{}", to_json(&outcome)?),
        OutputFormat::Csv => write_csv(&outcome, io::stdout().lock())?,
    }
    Ok(())
}

fn run_order(request: &PlanRequest) -> Result<()> {
    let graph = TaskGraph::build(&request.tasks)?;
    let order = graph.kahn_order();
    for task_id in &order.ordered {
        println!("{task_id}");
    }
    if !order.is_complete() {
        bail!(
            "dependency cycle: tasks {} could not be ordered",
            order.unordered.join(", ")
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Plan {
            request,
            anchor,
            deadline,
            format,
        } => run_plan(&load(&request)?, anchor, deadline, format),
        Command::Order { request } => run_order(&load(&request)?),
    }
}
