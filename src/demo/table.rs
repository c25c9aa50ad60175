use serde::Serialize;
use std::fmt;

use super::{hash, DemoError, Operation, Result, SLOT_COUNT};

/// A key/value pair occupying one slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

impl Entry {
    fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}→{}", self.key, self.value)
    }
}

/// Result of an operation that passed validation.
/// `NotFound` is an ordinary answer, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Inserted { index: usize, entry: Entry },
    Found { index: usize, entry: Entry },
    Deleted { index: usize, key: String },
    NotFound { key: String },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, Outcome::NotFound { .. })
    }

    /// Slot touched by the operation, if any
    pub fn index(&self) -> Option<usize> {
        match self {
            Outcome::Inserted { index, .. }
            | Outcome::Found { index, .. }
            | Outcome::Deleted { index, .. } => Some(*index),
            Outcome::NotFound { .. } => None,
        }
    }
}

/// One row of a table snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotView {
    pub index: usize,
    #[serde(serialize_with = "serialize_entry")]
    pub entry: Option<Entry>,
}

fn serialize_entry<S: serde::Serializer>(entry: &Option<Entry>, s: S) -> std::result::Result<S::Ok, S::Error> {
    match entry {
        Some(e) => s.serialize_str(&e.to_string()),
        None => s.serialize_none(),
    }
}

impl fmt::Display for SlotView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.entry {
            Some(entry) => write!(f, "{}: {}", self.index, entry),
            None => write!(f, "{}: -", self.index),
        }
    }
}

/// Fixed five-slot table. Each slot is either empty or holds exactly one entry;
/// there is no chaining, probing or resizing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotTable {
    slots: [Option<Entry>; SLOT_COUNT],
}

impl SlotTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `key→value` at `index(key)`, replacing any previous occupant.
    /// Inputs are trimmed before use.
    pub fn insert(&mut self, key: &str, value: &str) -> Result<Outcome> {
        let (key, value) = (key.trim(), value.trim());
        if key.is_empty() || value.is_empty() {
            return Err(DemoError::Validation { op: Operation::Insert });
        }

        let index = hash::index(key);
        let entry = Entry::new(key, value);
        if let Some(previous) = self.slots[index].replace(entry.clone()) {
            tracing::debug!("Slot {} overwritten: {} replaced by {}", index, previous, entry);
        }

        Ok(Outcome::Inserted { index, entry })
    }

    /// Look `key` up in its slot.
    ///
    /// Matches when the rendered `key→value` string *starts with* the search
    /// key, so a search for `"bana"` finds `"banana→yellow"` when both hash
    /// to the same slot. Kept that way on purpose, it is what the demo shows.
    pub fn search(&self, key: &str) -> Result<Outcome> {
        let key = key.trim();
        if key.is_empty() {
            return Err(DemoError::Validation { op: Operation::Search });
        }

        let index = hash::index(key);
        match self.matching(index, key) {
            Some(entry) => Ok(Outcome::Found {
                index,
                entry: entry.clone(),
            }),
            None => Ok(Outcome::NotFound { key: key.to_string() }),
        }
    }

    /// Clear the slot for `key` if it matches (same prefix rule as `search`).
    pub fn delete(&mut self, key: &str) -> Result<Outcome> {
        let key = key.trim();
        if key.is_empty() {
            return Err(DemoError::Validation { op: Operation::Delete });
        }

        let index = hash::index(key);
        if self.matching(index, key).is_none() {
            return Ok(Outcome::NotFound { key: key.to_string() });
        }

        self.slots[index] = None;
        Ok(Outcome::Deleted {
            index,
            key: key.to_string(),
        })
    }

    /// Empty every slot
    pub fn reset(&mut self) {
        self.slots = Default::default();
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn snapshot(&self) -> Vec<SlotView> {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, entry)| SlotView {
                index,
                entry: entry.clone(),
            })
            .collect()
    }

    fn matching(&self, index: usize, key: &str) -> Option<&Entry> {
        self.slots[index]
            .as_ref()
            .filter(|entry| entry.to_string().starts_with(key))
    }
}
