//! officeflow CLI: operator interface to the task board.

use chrono::{Datelike, NaiveDate};
use clap::{Args, Parser, Subcommand};
use officeflow::clock::{Clock, FixedClock, SystemClock, instant_from_millis};
use officeflow::config::Config;
use officeflow::engine::{
    NoticeBoard, ReportPeriod, StatusSummary, TaskBoard, TaskQuery, monthly_completed,
    user_tallies,
};
use officeflow::model::{Priority, Status, UserId, WorkId};
use officeflow::store::{ItemFilter, ItemSource, MemoryStore};
use officeflow::telemetry::{TelemetryConfig, init_telemetry};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "officeflow", about = "Office task board")]
struct Cli {
    /// Evaluate as of this instant (epoch milliseconds) instead of the wall clock
    #[arg(long, global = true)]
    now: Option<f64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List tasks, most urgent first
    Tasks(TasksArgs),
    /// List notices, newest first
    Notices,
    /// List documents, newest first
    Documents,
    /// Task statistics for a period
    Report {
        /// Year the tasks were created in (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,
        /// Month 1-12
        #[arg(long)]
        month: Option<u32>,
        /// Restrict to one recipient
        #[arg(long)]
        recipient: Option<String>,
    },
    /// Change a task's status by hand
    Status {
        /// Work item ID
        id: String,
        /// New status: Pending, "In Progress" or Completed
        status: String,
    },
}

#[derive(Args)]
struct TasksArgs {
    /// Only tasks assigned to this user
    #[arg(long, conflicts_with = "assigner")]
    recipient: Option<String>,
    /// Only tasks handed out by this user
    #[arg(long)]
    assigner: Option<String>,
    /// Case-insensitive message substring
    #[arg(long)]
    message: Option<String>,
    /// Effective status
    #[arg(long)]
    status: Option<String>,
    #[arg(long)]
    priority: Option<String>,
    /// Deadline date (YYYY-MM-DD, UTC)
    #[arg(long)]
    deadline: Option<NaiveDate>,
    /// Do not persist Overdue transitions
    #[arg(long)]
    no_sweep: bool,
    /// Keep store order instead of sorting by priority
    #[arg(long)]
    no_rank: bool,
    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::from_env()?;

    let _guard = init_telemetry(TelemetryConfig {
        endpoint: config.otel_endpoint.clone(),
        service_name: "officeflow".to_string(),
        log_level: config.log_level.clone(),
    })?;

    let clock: Arc<dyn Clock> = match cli.now {
        Some(ms) => Arc::new(FixedClock::new(instant_from_millis(ms)?)),
        None => Arc::new(SystemClock),
    };
    let store = MemoryStore::load_json(&config.data_path, Arc::clone(&clock))?;

    match cli.command {
        Command::Tasks(args) => cmd_tasks(&store, clock.as_ref(), &config, args),
        Command::Notices => cmd_notices(&store),
        Command::Documents => cmd_documents(&store),
        Command::Report {
            year,
            month,
            recipient,
        } => cmd_report(&store, clock.as_ref(), year, month, recipient),
        Command::Status { id, status } => cmd_status(&store, &config, id, status),
    }
}

fn cmd_tasks(
    store: &MemoryStore,
    clock: &dyn Clock,
    config: &Config,
    args: TasksArgs,
) -> anyhow::Result<()> {
    let filter = match (args.recipient, args.assigner) {
        (Some(r), _) => ItemFilter::Recipient(UserId::new(r)),
        (None, Some(a)) => ItemFilter::Assigner(UserId::new(a)),
        (None, None) => ItemFilter::All,
    };

    let mut query = TaskQuery::new();
    query.message = args.message;
    query.deadline_on = args.deadline;
    if let Some(s) = args.status {
        query = query.status(s.parse::<Status>()?);
    }
    if let Some(p) = args.priority {
        query = query.priority(p.parse::<Priority>()?);
    }

    let mut board = TaskBoard::new(store, store, clock);
    if args.no_sweep {
        board = board.without_sweep();
    }
    if args.no_rank {
        board = board.without_ranking();
    }
    let mut view = board.load(&filter)?;
    view.entries.retain(|entry| query.matches(&entry.item, view.now));

    for warning in &view.warnings {
        eprintln!("warning: {warning}");
    }
    if !view.flagged.is_empty() {
        store.save_json(&config.data_path)?;
        eprintln!("{} task(s) marked as overdue", view.flagged.len());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    if view.entries.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }

    println!(
        "{:<36}  {:<11}  {:<6}  {:>6}  {:>5}  {:<16}  MESSAGE",
        "ID", "STATUS", "PRI", "SCORE", "DAYS", "DEADLINE"
    );
    println!("{}", "-".repeat(110));
    for entry in &view.entries {
        let item = &entry.item;
        println!(
            "{:<36}  {:<11}  {:<6}  {:>6}  {:>5}  {:<16}  {}",
            item.id,
            entry.effective_status,
            item.priority,
            entry.score,
            entry.days_until,
            item.deadline.format("%Y-%m-%d %H:%M"),
            item.message
        );
    }
    println!("\n{} task(s)", view.entries.len());
    Ok(())
}

fn cmd_notices(store: &MemoryStore) -> anyhow::Result<()> {
    let notices = NoticeBoard::new(store).notices()?;
    if notices.is_empty() {
        println!("No notices.");
        return Ok(());
    }
    for notice in &notices {
        println!(
            "{}  {}  ({})",
            notice.published_date.format("%Y-%m-%d"),
            notice.title,
            notice.file_ref
        );
        if let Some(ref description) = notice.description {
            println!("            {description}");
        }
    }
    Ok(())
}

fn cmd_documents(store: &MemoryStore) -> anyhow::Result<()> {
    let documents = NoticeBoard::new(store).documents()?;
    if documents.is_empty() {
        println!("No documents.");
        return Ok(());
    }
    for doc in &documents {
        println!(
            "{}  {:<40}  {:>10}  {}",
            doc.upload_date.format("%Y-%m-%d"),
            doc.file_name,
            doc.file_size.map_or_else(|| "-".to_string(), |n| n.to_string()),
            doc.file_type.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

fn cmd_report(
    store: &MemoryStore,
    clock: &dyn Clock,
    year: Option<i32>,
    month: Option<u32>,
    recipient: Option<String>,
) -> anyhow::Result<()> {
    let now = clock.now();
    let year = year.unwrap_or_else(|| now.year());
    let mut period = ReportPeriod::year(year);
    if let Some(m) = month {
        anyhow::ensure!((1..=12).contains(&m), "month must be 1-12, got {m}");
        period = period.month(m);
    }
    if let Some(r) = recipient {
        period = period.recipient(r);
    }

    let items = store.fetch_items(&ItemFilter::All)?;
    let selected = period.select(&items);
    let summary = StatusSummary::from_items(selected.iter().copied(), now);

    println!("Tasks created in {year}{}", month.map(|m| format!("-{m:02}")).unwrap_or_default());
    println!("  Total:        {}", summary.total);
    println!("  Completed:    {}", summary.completed);
    println!("  In Progress:  {}", summary.in_progress);
    println!("  Pending:      {}", summary.pending);
    println!("  Overdue:      {}", summary.overdue);

    let tallies = user_tallies(selected.iter().copied(), now);
    if !tallies.is_empty() {
        println!("\n{:<24}  {:>9}  {:>7}", "USER", "COMPLETED", "OVERDUE");
        for tally in &tallies {
            println!("{:<24}  {:>9}  {:>7}", tally.user, tally.completed, tally.overdue);
        }
    }

    let monthly = monthly_completed(items.iter(), year);
    println!("\nCompleted per month ({year}): {monthly:?}");
    Ok(())
}

fn cmd_status(
    store: &MemoryStore,
    config: &Config,
    id: String,
    status: String,
) -> anyhow::Result<()> {
    let id: WorkId = id.parse()?;
    let status: Status = status.parse()?;
    let item = store.set_status(id, status)?;
    store.save_json(&config.data_path)?;
    println!("{}: {}", item.id, item.status);
    Ok(())
}
