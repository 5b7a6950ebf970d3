use crate::calculations::forward_pass::TaskOffsets;
use crate::error::ScheduleResult;
use crate::schedule::{PlanOutcome, PlanRequest, ScheduleSummary};
use crate::task::ScheduledTask;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

pub fn read_plan_request<R: Read>(reader: R) -> ScheduleResult<PlanRequest> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn load_plan_request<P: AsRef<Path>>(path: P) -> ScheduleResult<PlanRequest> {
    let file = File::open(path)?;
    read_plan_request(BufReader::new(file))
}

#[derive(Serialize)]
struct PlannedTask<'a> {
    #[serde(flatten)]
    task: &'a ScheduledTask,
    earliest_start_offset: Option<u64>,
    earliest_finish_offset: Option<u64>,
    on_critical_path: bool,
}

#[derive(Serialize)]
struct PlanDocument<'a> {
    summary: ScheduleSummary,
    critical_path: &'a [String],
    is_valid: bool,
    warnings: &'a [String],
    tasks: Vec<PlannedTask<'a>>,
}

fn planned_tasks(outcome: &PlanOutcome) -> Vec<PlannedTask<'_>> {
    outcome
        .tasks
        .iter()
        .map(|scheduled| {
            let offsets: Option<TaskOffsets> = outcome.offsets.get(&scheduled.task.id);
            PlannedTask {
                task: scheduled,
                earliest_start_offset: offsets.map(|o| o.earliest_start),
                earliest_finish_offset: offsets.map(|o| o.earliest_finish),
                on_critical_path: outcome.critical_path.contains(&scheduled.task.id),
            }
        })
        .collect()
}

pub fn to_json(outcome: &PlanOutcome) -> ScheduleResult<String> {
    let document = PlanDocument {
        summary: outcome.summary(),
        critical_path: &outcome.critical_path,
        is_valid: outcome.report.is_valid,
        warnings: &outcome.report.warnings,
        tasks: planned_tasks(outcome),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

#[derive(Serialize)]
struct TaskCsvRecord<'a> {
    id: &'a str,
    title: &'a str,
    duration_days: u32,
    depends_on: String,
    earliest_start_offset: String,
    earliest_finish_offset: String,
    earliest_start: &'a str,
    latest_finish: &'a str,
    critical: bool,
}

pub fn write_csv<W: Write>(outcome: &PlanOutcome, writer: W) -> ScheduleResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for planned in planned_tasks(outcome) {
        let task = &planned.task.task;
        csv_writer.serialize(TaskCsvRecord {
            id: &task.id,
            title: &task.title,
            duration_days: task.duration_days,
            depends_on: task.depends_on.join(","),
            earliest_start_offset: format_offset(planned.earliest_start_offset),
            earliest_finish_offset: format_offset(planned.earliest_finish_offset),
            earliest_start: planned.task.earliest_start.as_deref().unwrap_or(""),
            latest_finish: planned.task.latest_finish.as_deref().unwrap_or(""),
            critical: planned.on_critical_path,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn format_offset(value: Option<u64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

const TABLE_HEADERS: [&str; 7] = [
    "id",
    "title",
    "days",
    "depends_on",
    "start",
    "finish",
    "critical",
];

pub fn render_table(outcome: &PlanOutcome) -> String {
    let rows: Vec<[String; 7]> = planned_tasks(outcome)
        .into_iter()
        .map(|planned| {
            let task = &planned.task.task;
            [
                task.id.clone(),
                task.title.clone(),
                task.duration_days.to_string(),
                task.depends_on.join(","),
                planned.task.earliest_start.clone().unwrap_or_default(),
                planned.task.latest_finish.clone().unwrap_or_default(),
                if planned.on_critical_path { "*".to_string() } else { String::new() },
            ]
        })
        .collect();

    // Compute column widths
    let mut widths: Vec<usize> = TABLE_HEADERS.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (ci, cell) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(cell.chars().count());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    push_row(&mut out, TABLE_HEADERS.iter().copied(), &widths);
    out.push_str(&sep);
    out.push('\n');
    for row in &rows {
        push_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn push_row<'c>(out: &mut String, cells: impl Iterator<Item = &'c str>, widths: &[usize]) {
    out.push('|');
    for (cell, width) in cells.zip(widths) {
        out.push(' ');
        out.push_str(cell);
        let pad = width.saturating_sub(cell.chars().count());
        out.push_str(&" ".repeat(pad));
        out.push_str(" |");
    }
    out.push('\n');
}
