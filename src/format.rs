//! Output formatting utilities for markdown and JSON.

use crate::types::Task;

/// Output format for task listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "markdown" | "md" => Some(OutputFormat::Markdown),
            _ => None,
        }
    }
}

/// Format a single task as a markdown checklist line.
pub fn format_task_markdown(task: &Task) -> String {
    let mark = if task.completed { "x" } else { " " };
    format!(
        "- [{}] {} (id {}, order {})",
        mark, task.title, task.id, task.list_order
    )
}

/// Format tasks as a markdown checklist, one line per task.
pub fn format_tasks_markdown(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks.".to_string();
    }
    tasks
        .iter()
        .map(format_task_markdown)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format tasks as a pretty-printed JSON array.
pub fn format_tasks_json(tasks: &[Task]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(tasks)
}

/// Format tasks in the requested format.
pub fn format_tasks(tasks: &[Task], format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => format_tasks_json(tasks),
        OutputFormat::Markdown => Ok(format_tasks_markdown(tasks)),
    }
}
