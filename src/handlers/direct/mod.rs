//! Yandex Direct tools.
//!
//! Direct methods answer with per-item result arrays (`SuspendResults`,
//! `AddResults`, `UpdateResults`, ...). The helpers here fold those arrays
//! into tool results so every service module reports outcomes alike.

pub mod adgroups;
pub mod ads;
pub mod campaigns;
pub mod keywords;
pub mod statistics;

use serde_json::{json, Value};

use crate::protocol::ToolResult;
use crate::render::display;

/// A state change applied to a batch of objects by ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchAction {
    Suspend,
    Resume,
    Archive,
    Unarchive,
    Delete,
    Moderate,
}

impl BatchAction {
    pub fn method(self) -> &'static str {
        match self {
            Self::Suspend => "suspend",
            Self::Resume => "resume",
            Self::Archive => "archive",
            Self::Unarchive => "unarchive",
            Self::Delete => "delete",
            Self::Moderate => "moderate",
        }
    }

    /// Key of the per-item result array in the response.
    pub fn results_key(self) -> &'static str {
        match self {
            Self::Suspend => "SuspendResults",
            Self::Resume => "ResumeResults",
            Self::Archive => "ArchiveResults",
            Self::Unarchive => "UnarchiveResults",
            Self::Delete => "DeleteResults",
            Self::Moderate => "ModerateResults",
        }
    }

    /// `Successfully suspended 2 campaign(s).`
    pub fn summary(self, count: usize, noun: &str) -> String {
        match self {
            Self::Moderate => format!("Successfully submitted {count} {noun}(s) for moderation."),
            Self::Suspend => format!("Successfully suspended {count} {noun}(s)."),
            Self::Resume => format!("Successfully resumed {count} {noun}(s)."),
            Self::Archive => format!("Successfully archived {count} {noun}(s)."),
            Self::Unarchive => format!("Successfully unarchived {count} {noun}(s)."),
            Self::Delete => format!("Successfully deleted {count} {noun}(s)."),
        }
    }
}

/// `SelectionCriteria` naming objects by ID.
pub(crate) fn select_ids(ids: &[i64]) -> Value {
    json!({ "SelectionCriteria": { "Ids": ids } })
}

/// `Page` block of the `get` methods.
pub(crate) fn page(limit: u32, offset: u64) -> Value {
    json!({ "Limit": limit, "Offset": offset })
}

/// Array under `key` in a method result, empty when absent.
pub(crate) fn items<'a>(result: &'a Value, key: &str) -> &'a [Value] {
    result
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// `Message` of every entry of an `Errors`/`Warnings` array.
fn messages(item: &Value, key: &str, fallback: &str) -> Vec<String> {
    items(item, key)
        .iter()
        .map(|entry| {
            entry
                .get("Message")
                .and_then(Value::as_str)
                .unwrap_or(fallback)
                .to_string()
        })
        .collect()
}

/// Value of an ID field when Direct filled it in.
fn item_id(item: &Value, id_field: &str) -> Option<String> {
    match item.get(id_field) {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) if n.as_i64() == Some(0) => None,
        Some(id) => Some(display(Some(id), "?")),
    }
}

fn bullet_list(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| format!("- {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One rejected item of a batch call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub id: Option<String>,
    pub message: String,
}

/// Per-item outcome of a batch call.
///
/// An item succeeded when it carries its ID and no `Errors`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub ids: Vec<String>,
    pub failures: Vec<Failure>,
    pub total: usize,
}

impl BatchOutcome {
    pub fn collect(results: &[Value], id_field: &str) -> Self {
        let mut outcome = Self {
            total: results.len(),
            ..Self::default()
        };

        for item in results {
            let id = item_id(item, id_field);
            let errors = messages(item, "Errors", "Unknown error");
            if errors.is_empty() {
                outcome.ids.extend(id);
            } else {
                outcome.failures.extend(errors.into_iter().map(|message| Failure {
                    id: id.clone(),
                    message,
                }));
            }
        }
        outcome
    }

    pub fn all_failed(&self) -> bool {
        self.total > 0 && self.ids.is_empty() && !self.failures.is_empty()
    }

    /// `summary`, then the failures as `ID <id>: <message>` bullets.
    pub fn report(&self, summary: String) -> ToolResult {
        let lines: Vec<String> = self
            .failures
            .iter()
            .map(|f| format!("ID {}: {}", f.id.as_deref().unwrap_or("?"), f.message))
            .collect();
        self.finish(summary, &lines)
    }

    /// Like [`report`](Self::report) with bare messages, for `add` calls
    /// whose rejected items never got an ID.
    pub fn report_unlabelled(&self, summary: String) -> ToolResult {
        let lines: Vec<String> = self.failures.iter().map(|f| f.message.clone()).collect();
        self.finish(summary, &lines)
    }

    fn finish(&self, summary: String, failure_lines: &[String]) -> ToolResult {
        let text = if failure_lines.is_empty() {
            summary
        } else {
            format!("{summary}\n\nErrors:\n{}", bullet_list(failure_lines))
        };

        if self.all_failed() {
            ToolResult::error(text)
        } else {
            ToolResult::text(text)
        }
    }
}

/// Fold the `UpdateResults` of a single-object update.
///
/// Errors make the result an error; warnings alone are reported but the
/// update counts as applied.
pub(crate) fn update_outcome(results: &[Value], success: String) -> ToolResult {
    let mut issues = Vec::new();
    let mut failed = false;

    for item in results {
        let errors = messages(item, "Errors", "Unknown error");
        failed |= !errors.is_empty();
        issues.extend(errors);
        issues.extend(
            messages(item, "Warnings", "Unknown warning")
                .into_iter()
                .map(|w| format!("Warning: {w}")),
        );
    }

    if issues.is_empty() {
        return ToolResult::text(success);
    }

    let text = format!("Update completed with issues:\n{}", bullet_list(&issues));
    if failed {
        ToolResult::error(text)
    } else {
        ToolResult::text(text)
    }
}

/// ID of the single object created by an `add` call, or the reasons it was
/// rejected.
pub(crate) fn created_id(results: &[Value]) -> Result<String, Vec<String>> {
    if let Some(id) = results.first().and_then(|item| item_id(item, "Id")) {
        return Ok(id);
    }

    let mut errors: Vec<String> = results
        .iter()
        .flat_map(|item| messages(item, "Errors", "Unknown error"))
        .collect();
    if errors.is_empty() {
        errors.push("Unknown error".to_string());
    }
    Err(errors)
}

/// Error result for a rejected `add` of one object.
pub(crate) fn creation_failed(what: &str, errors: &[String]) -> ToolResult {
    ToolResult::error(format!("Failed to create {what}:\n{}", bullet_list(errors)))
}
