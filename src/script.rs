//! Non-interactive mode: replay a file of operations against a fresh table.
//!
//! One operation per line:
//!
//! ```text
//! # comments and blank lines are skipped
//! insert apple red
//! insert note something with spaces
//! search apple
//! delete apple
//! ```

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::demo::feedback::Feedback;
use crate::demo::{Language, Operation, Outcome, SlotTable, SlotView};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub op: Operation,
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepResult {
    pub line: usize,
    pub operation: Operation,
    /// `None` when the line failed validation
    pub outcome: Option<Outcome>,
    #[serde(flatten)]
    pub feedback: Feedback,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub results: Vec<StepResult>,
    pub table: Vec<SlotView>,
}

impl Report {
    /// Plain text: one feedback line per step, then the table
    pub fn to_text(&self) -> String {
        let mut lines: Vec<String> = self.results.iter().map(|r| r.feedback.text.clone()).collect();
        lines.push(String::new());
        lines.extend(self.table.iter().map(|slot| slot.to_string()));
        lines.join("\n")
    }
}

/// Parse one line. `Ok(None)` for blank lines and comments.
/// Missing arguments are kept empty so the table reports them.
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim_start();

    let op = match verb.to_ascii_lowercase().as_str() {
        "insert" => Operation::Insert,
        "search" => Operation::Search,
        "delete" => Operation::Delete,
        other => anyhow::bail!("Unknown operation '{}'", other),
    };

    let (key, value) = match op {
        Operation::Insert => rest.split_once(char::is_whitespace).unwrap_or((rest, "")),
        _ => (rest, ""),
    };

    Ok(Some(Command {
        op,
        key: key.to_string(),
        value: value.to_string(),
    }))
}

/// Run a whole script on a fresh table
pub fn run(source: &str, lang: Language) -> Result<Report> {
    let mut table = SlotTable::new();
    let mut results = Vec::new();

    for (i, raw) in source.lines().enumerate() {
        let line = i + 1;
        let Some(cmd) = parse_line(raw).with_context(|| format!("line {}", line))? else {
            continue;
        };

        let result = match cmd.op {
            Operation::Insert => table.insert(&cmd.key, &cmd.value),
            Operation::Search => table.search(&cmd.key),
            Operation::Delete => table.delete(&cmd.key),
        };
        let feedback = Feedback::from_result(&result, lang);
        tracing::debug!("line {}: {}", line, feedback.text);

        results.push(StepResult {
            line,
            operation: cmd.op,
            outcome: result.ok(),
            feedback,
        });
    }

    Ok(Report {
        results,
        table: table.snapshot(),
    })
}

pub async fn run_file(path: &Path, lang: Language) -> Result<Report> {
    let source = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    run(&source, lang).with_context(|| format!("Script {} failed", path.display()))
}
