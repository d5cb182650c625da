use std::str::FromStr;

use anyhow::{Context, Result};
use dayplan_app::{ResponseOutcome, TaskDraft, TaskStore, load_or_empty, spawn_writer};
use dayplan_core::{DayStats, FilterMode, Priority, Task, TaskId, filter};
use dayplan_notify::{CommandDelivery, ReminderDelivery, ReminderResponse, ReminderScheduler};
use dayplan_store_json::JsonStore;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, Time};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use crate::config::AppConfig;
use crate::{Cli, Command, LsFormat};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");
const DUE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[day]/[month]/[year] [hour]:[minute]");

/// Wire up storage and reminders, run the command and flush pending saves.
pub async fn execute(cli: Cli, config: AppConfig, now: OffsetDateTime) -> Result<()> {
    let Cli { data_file, cmd } = cli;
    let path = config.resolve_data_file(data_file)?;
    let store = JsonStore::new(path);
    let initial = load_or_empty(&store);
    let (saves, writer) = spawn_writer(store);
    let scheduler = ReminderScheduler::new(CommandDelivery::new(config.notify));
    let mut tasks = TaskStore::new(initial, scheduler, saves);

    let result = match cmd {
        Command::Listen => listen(&mut tasks).await,
        other => run(other, &mut tasks, now),
    };

    // Dropping the store closes the save queue; awaiting the writer lets
    // it flush whatever is still enqueued.
    drop(tasks);
    writer.await.context("Save worker panicked")?;
    result
}

fn run<D: ReminderDelivery>(
    command: Command,
    tasks: &mut TaskStore<D>,
    now: OffsetDateTime,
) -> Result<()> {
    match command {
        Command::Add {
            text,
            date,
            time,
            priority,
        } => {
            let day = date.as_deref().map_or_else(|| Ok(now.date()), parse_date)?;
            let at = time.as_deref().map_or_else(|| Ok(now.time()), parse_time)?;
            let priority = parse_priority(&priority)?;
            let draft = TaskDraft::from_parts(&text, day, at, now.offset(), priority)?;
            let task = tasks.add_task(draft);

            let reminder = task.notification_id.as_ref().map_or_else(
                || "no reminder".to_owned(),
                |id| format!("reminder {id}"),
            );
            println!("added task: {} ({reminder})", task.id);
        }
        Command::Ls {
            date,
            filter,
            format,
        } => {
            let day = resolve_day(date.as_deref(), now)?;
            let mode = parse_filter(&filter)?;
            let agenda = filter::day_agenda(tasks.snapshot(), day, mode);

            if agenda.is_empty() {
                if mode == FilterMode::All {
                    println!("No tasks on {day}");
                } else {
                    println!("No tasks matched the filter");
                }
                return Ok(());
            }

            match format {
                LsFormat::Table => render_task_table(&agenda),
                LsFormat::Json => println!("{}", serde_json::to_string_pretty(&agenda)?),
            }
        }
        Command::Toggle { task } => {
            let id = parse_task_id(&task)?;
            match tasks.toggle_task(id) {
                Some(status) => println!("task {id} is now {status}"),
                None => println!("no task with id {id}"),
            }
        }
        Command::Rm { task } => {
            let id = parse_task_id(&task)?;
            match tasks.remove_task(id) {
                Some(task) => println!("removed task: {} ({})", task.id, task.text),
                None => println!("no task with id {id}"),
            }
        }
        Command::ClearDone { date } => {
            let day = resolve_day(date.as_deref(), now)?;
            let removed = tasks.clear_done_on(day);
            println!("cleared {removed} done task(s) on {day}");
        }
        Command::Pending => {
            let pending = filter::pending_tasks(tasks.snapshot());
            if pending.is_empty() {
                println!("Nothing pending");
                return Ok(());
            }
            render_task_table(&pending);
        }
        Command::Stats { date } => {
            let day = resolve_day(date.as_deref(), now)?;
            let stats = DayStats::for_day(tasks.snapshot(), day);
            let percent = filter::completion_ratio(tasks.snapshot()) * 100.0;
            let open = filter::unfinished_count(tasks.snapshot());
            println!("{day}: {} of {} done", stats.completed, stats.total);
            println!("overall: {percent:.0}% done, {open} still to do");
        }
        Command::Days => {
            for day in filter::days_with_tasks(tasks.snapshot()) {
                println!("{day}");
            }
        }
        Command::Listen => unreachable!("Listen is handled before dispatch"),
    }

    Ok(())
}

/// Consume notification responses from stdin until it closes.
async fn listen<D: ReminderDelivery>(tasks: &mut TaskStore<D>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(outcome) = apply_response_line(tasks, &line) else {
            continue;
        };
        match outcome {
            ResponseOutcome::Deleted(task) => {
                println!("deleted task: {} ({})", task.id, task.text);
            }
            ResponseOutcome::Shown(task) => {
                println!("showing task: {} ({})", task.id, task.text);
            }
            ResponseOutcome::UnknownTask => println!("response for unknown task"),
        }
    }
    Ok(())
}

/// Apply one line of the response stream, skipping blanks and garbage.
fn apply_response_line<D: ReminderDelivery>(
    tasks: &mut TaskStore<D>,
    line: &str,
) -> Option<ResponseOutcome> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match serde_json::from_str::<ReminderResponse>(line) {
        Ok(response) => Some(tasks.apply_response(response)),
        Err(err) => {
            warn!(error = %err, "Skipping malformed response line");
            None
        }
    }
}

fn render_task_table(tasks: &[&Task]) {
    println!("ID | Status | Priority | Due | Text");
    println!("-- | ------ | -------- | --- | ----");

    for task in tasks {
        println!(
            "{} | {} | {} | {} | {}",
            task.id,
            task.status,
            task.priority,
            format_due(task.due_date),
            task.text
        );
    }
}

fn format_due(due: OffsetDateTime) -> String {
    due.format(DUE_FORMAT).unwrap_or_else(|_| due.to_string())
}

fn resolve_day(raw: Option<&str>, now: OffsetDateTime) -> Result<Date> {
    raw.map_or_else(|| Ok(now.date()), parse_date)
}

fn parse_date(raw: &str) -> Result<Date> {
    Date::parse(raw, DATE_FORMAT)
        .with_context(|| format!("Invalid date (expected YYYY-MM-DD): {raw}"))
}

fn parse_time(raw: &str) -> Result<Time> {
    Time::parse(raw, TIME_FORMAT).with_context(|| format!("Invalid time (expected HH:MM): {raw}"))
}

fn parse_priority(raw: &str) -> Result<Priority> {
    Priority::from_str(raw).with_context(|| format!("Invalid priority: {raw}"))
}

fn parse_filter(raw: &str) -> Result<FilterMode> {
    FilterMode::from_str(raw).with_context(|| format!("Invalid filter: {raw}"))
}

fn parse_task_id(raw: &str) -> Result<TaskId> {
    TaskId::from_str(raw).with_context(|| format!("Invalid task id: {raw}"))
}
