//! Hash table demo engine
//!
//! A deliberately tiny hash table: five slots, one entry per slot, and
//! collisions resolved by overwriting whatever was there. It exists to be
//! looked at, not to be fast or correct.

pub mod feedback;
pub mod hash;
pub mod table;

pub use feedback::Language;
pub use table::{Outcome, SlotTable, SlotView};

/// Number of slots in the demo table
pub const SLOT_COUNT: usize = 5;

/// The three operations a user can run against the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Insert,
    Search,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DemoError {
    /// A required text input was empty after trimming
    #[error("{}", validation_message(.op))]
    Validation { op: Operation },
}

fn validation_message(op: &Operation) -> &'static str {
    match op {
        Operation::Insert => "missing key or value",
        Operation::Search => "missing key to search",
        Operation::Delete => "missing key to delete",
    }
}

pub type Result<T> = std::result::Result<T, DemoError>;
