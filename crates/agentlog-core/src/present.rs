//! Printers for agent task summaries and assistant thoughts.
//!
//! Both printers only assemble titles and messages; all output goes through
//! the [`Logger`] passed in.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ulid::Ulid;

use crate::color;
use crate::level::LogLevel;
use crate::logger::Logger;

/// Status of an agent task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    NotStarted,
    Doing,
    Success,
    Fail,
    Split,
}

impl TaskStatus {
    pub fn name(self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "NOT_STARTED",
            TaskStatus::Doing => "DOING",
            TaskStatus::Success => "SUCCESS",
            TaskStatus::Fail => "FAIL",
            TaskStatus::Split => "SPLIT",
        }
    }
}

/// Reflection on one tool used while working on a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolReflection {
    pub target_tool_name: String,
    pub reflection: String,
}

/// The fields of an agent task that get printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
    pub name: String,
    pub goal: String,
    #[serde(default)]
    pub prior_plan_criticism: String,
    #[serde(default)]
    pub posterior_plan_reflection: Vec<String>,
    #[serde(default)]
    pub milestones: Vec<String>,
    #[serde(default)]
    pub tool_reflection: Vec<ToolReflection>,
    pub status: TaskStatus,
    #[serde(default)]
    pub action_list_summary: String,
}

/// Thoughts extracted from an assistant reply.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssistantThoughts {
    pub thoughts: Option<String>,
    pub reasoning: Option<String>,
    pub plan: Option<String>,
    pub criticism: Option<String>,
    pub node_id: String,
}

/// Strip leading dashes and spaces, then surrounding whitespace.
fn bullet_text(line: &str) -> &str {
    line.trim_start_matches(['-', ' ']).trim()
}

fn print_bullets<'a>(logger: &Logger, header: &str, lines: impl IntoIterator<Item = &'a str>) {
    logger.typewriter_log(header, color::YELLOW.as_str(), "", LogLevel::Info);
    for line in lines {
        logger.typewriter_log("- ", color::GREEN.as_str(), bullet_text(line), LogLevel::Info);
    }
}

/// Print a task summary through the animated channel.
pub fn print_task_summary(logger: &Logger, item: &TaskSummary) {
    let yellow = color::YELLOW.as_str();
    logger.typewriter_log("Task Name:", yellow, item.name.as_str(), LogLevel::Info);
    logger.typewriter_log("Task Goal:", yellow, item.goal.as_str(), LogLevel::Info);
    logger.typewriter_log(
        "Task Prior-Criticism:",
        yellow,
        item.prior_plan_criticism.as_str(),
        LogLevel::Info,
    );

    if !item.posterior_plan_reflection.is_empty() {
        print_bullets(
            logger,
            "Task Posterior-Criticism:",
            item.posterior_plan_reflection.iter().map(String::as_str),
        );
    }
    if !item.milestones.is_empty() {
        print_bullets(logger, "Task Milestones:", item.milestones.iter().map(String::as_str));
    }
    if !item.tool_reflection.is_empty() {
        let lines: Vec<String> = item
            .tool_reflection
            .iter()
            .map(|r| format!("{}: {}", r.target_tool_name, r.reflection))
            .collect();
        print_bullets(
            logger,
            "Posterior Tool Reflections:",
            lines.iter().map(String::as_str),
        );
    }

    logger.typewriter_log("Task Status:", yellow, item.status.name(), LogLevel::Info);
    if !item.action_list_summary.is_empty() {
        logger.typewriter_log(
            "Action Summary:",
            yellow,
            item.action_list_summary.as_str(),
            LogLevel::Info,
        );
    }
}

fn text_field(thoughts: &Value, key: &str) -> Option<String> {
    match thoughts.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Turn a plan value into newline-separated text.
fn plan_text(plan: &Value) -> Option<String> {
    let text = match plan {
        Value::Null => return None,
        Value::Object(map) if map.is_empty() => return None,
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        other => other.to_string(),
    };
    (!text.is_empty()).then_some(text)
}

/// Print the `thoughts.properties` section of an assistant reply.
///
/// Returns the printed fields together with a fresh node id.
pub fn print_assistant_thoughts(logger: &Logger, reply: &Value) -> AssistantThoughts {
    let properties = reply
        .get("thoughts")
        .and_then(|t| t.get("properties"))
        .cloned()
        .unwrap_or(Value::Null);

    let thoughts = text_field(&properties, "thought");
    let reasoning = text_field(&properties, "reasoning");
    let plan = properties.get("plan").and_then(plan_text);
    let criticism = text_field(&properties, "criticism");

    if let Some(text) = thoughts.as_deref().filter(|t| !t.is_empty()) {
        logger.typewriter_log("THOUGHTS:", color::YELLOW.as_str(), text, LogLevel::Info);
    }
    if let Some(text) = reasoning.as_deref().filter(|t| !t.is_empty()) {
        logger.typewriter_log("REASONING:", color::YELLOW.as_str(), text, LogLevel::Info);
    }
    if let Some(text) = plan.as_deref() {
        print_bullets(logger, "PLAN:", text.split('\n'));
    }
    if let Some(text) = criticism.as_deref().filter(|t| !t.is_empty()) {
        logger.typewriter_log("CRITICISM:", color::YELLOW.as_str(), text, LogLevel::Info);
    }

    AssistantThoughts {
        thoughts,
        reasoning,
        plan,
        criticism,
        node_id: Ulid::new().to_string(),
    }
}
