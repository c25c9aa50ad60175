//! Human-readable feedback lines for operation results

use serde::{Deserialize, Serialize};

use super::{DemoError, Operation, Outcome};

/// Language used for feedback lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
}

/// A rendered line plus whether it reports success
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub text: String,
    pub success: bool,
}

impl Feedback {
    pub fn from_result(result: &super::Result<Outcome>, lang: Language) -> Self {
        match result {
            Ok(outcome) => Self {
                text: outcome_text(outcome, lang),
                success: outcome.is_success(),
            },
            Err(err) => Self {
                text: error_text(err, lang),
                success: false,
            },
        }
    }
}

pub fn outcome_text(outcome: &Outcome, lang: Language) -> String {
    match (outcome, lang) {
        (Outcome::Inserted { index, entry }, Language::En) => {
            format!("✓ Inserted \"{}\" at index {}", entry, index)
        }
        (Outcome::Inserted { index, entry }, Language::Es) => {
            format!("✓ Insertado \"{}\" en índice {}", entry, index)
        }
        (Outcome::Found { index, entry }, Language::En) => {
            format!("✓ Found at index {}: {}", index, entry)
        }
        (Outcome::Found { index, entry }, Language::Es) => {
            format!("✓ Encontrado en índice {}: {}", index, entry)
        }
        (Outcome::Deleted { index, key }, Language::En) => {
            format!("✓ Deleted key \"{}\" from index {}", key, index)
        }
        (Outcome::Deleted { index, key }, Language::Es) => {
            format!("✓ Eliminada clave \"{}\" del índice {}", key, index)
        }
        (Outcome::NotFound { key }, Language::En) => format!("❌ Key \"{}\" not found", key),
        (Outcome::NotFound { key }, Language::Es) => format!("❌ Clave \"{}\" no encontrada", key),
    }
}

pub fn error_text(err: &DemoError, lang: Language) -> String {
    let DemoError::Validation { op } = err;
    let prompt = match (op, lang) {
        (Operation::Insert, Language::En) => "Please enter a key and a value",
        (Operation::Insert, Language::Es) => "Por favor ingresa clave y valor",
        (Operation::Search, Language::En) => "Please enter a key to search",
        (Operation::Search, Language::Es) => "Por favor ingresa una clave a buscar",
        (Operation::Delete, Language::En) => "Please enter a key to delete",
        (Operation::Delete, Language::Es) => "Por favor ingresa una clave a eliminar",
    };
    format!("❌ {}", prompt)
}

/// Fixed UI labels that follow the configured language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Ready,
    TableCleared,
    Holds,
}

pub fn label(label: Label, lang: Language) -> &'static str {
    match (label, lang) {
        (Label::Ready, Language::En) => "Ready",
        (Label::Ready, Language::Es) => "Listo",
        (Label::TableCleared, Language::En) => "Table cleared",
        (Label::TableCleared, Language::Es) => "Tabla vaciada",
        (Label::Holds, Language::En) => "holds",
        (Label::Holds, Language::Es) => "contiene",
    }
}
