use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};

use crate::config::AppConfig;
use crate::demo::feedback::{self, Feedback, Label};
use crate::demo::{hash, Outcome, SlotTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Insert,
    Search,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
}

/// Focused input inside the Insert panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Key,
    Value,
}

/// Inputs and last feedback of one operation panel
#[derive(Debug, Clone, Default)]
pub struct Panel {
    pub key: String,
    pub value: String,
    pub feedback: Option<Feedback>,
}

impl Panel {
    fn clear_inputs(&mut self) {
        self.key.clear();
        self.value.clear();
    }
}

pub struct App {
    pub section: Section,
    pub popup: Popup,
    pub field: Field,

    // The demo table for this session
    pub table: SlotTable,

    pub insert: Panel,
    pub search: Panel,
    pub delete: Panel,

    // Row flashed after an insert
    pub highlighted: Option<usize>,
    pub highlight_start: Option<Instant>,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,

    pub config: AppConfig,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            section: Section::Insert,
            popup: Popup::None,
            field: Field::Key,

            table: SlotTable::new(),

            insert: Panel::default(),
            search: Panel::default(),
            delete: Panel::default(),

            highlighted: None,
            highlight_start: None,

            status_message: None,
            status_message_time: None,

            config,
        }
    }

    /// Set a status message (auto-clears after the configured timeout)
    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    pub fn panel(&self, section: Section) -> &Panel {
        match section {
            Section::Insert => &self.insert,
            Section::Search => &self.search,
            Section::Delete => &self.delete,
        }
    }

    fn active_panel_mut(&mut self) -> &mut Panel {
        match self.section {
            Section::Insert => &mut self.insert,
            Section::Search => &mut self.search,
            Section::Delete => &mut self.delete,
        }
    }

    /// Text buffer that receives typed characters
    fn focused_input(&mut self) -> &mut String {
        let field = self.field;
        let section = self.section;
        let panel = self.active_panel_mut();
        if section == Section::Insert && field == Field::Value {
            &mut panel.value
        } else {
            &mut panel.key
        }
    }

    /// Key currently being typed, with its hash and slot
    pub fn hash_preview(&self) -> Option<(&str, u32, usize)> {
        let key = self.panel(self.section).key.trim();
        if key.is_empty() {
            return None;
        }
        Some((key, hash::hash(key), hash::index(key)))
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.popup != Popup::None {
            return self.handle_popup_key(key);
        }

        self.handle_normal_key(key)
    }

    fn handle_popup_key(&mut self, key: KeyEvent) {
        if self.popup == Popup::Help && matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Enter) {
            self.popup = Popup::None;
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        // Alt+1/2/3 jump straight to a panel
        if key.modifiers.contains(KeyModifiers::ALT) {
            if let KeyCode::Char(c @ '1'..='3') = key.code {
                self.section = match c {
                    '1' => Section::Insert,
                    '2' => Section::Search,
                    _ => Section::Delete,
                };
                self.field = Field::Key;
            }
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('r') {
                self.reset_table();
            }
            return;
        }

        match key.code {
            KeyCode::Tab => self.next_field(),
            KeyCode::BackTab => self.prev_field(),
            KeyCode::Enter => self.run_operation(),
            KeyCode::Backspace => {
                self.focused_input().pop();
            }
            KeyCode::F(1) => self.popup = Popup::Help,
            KeyCode::Char(c) => self.focused_input().push(c),
            _ => {}
        }
    }

    /// Insert.key → Insert.value → Search → Delete → Insert.key
    fn next_field(&mut self) {
        (self.section, self.field) = match (self.section, self.field) {
            (Section::Insert, Field::Key) => (Section::Insert, Field::Value),
            (Section::Insert, Field::Value) => (Section::Search, Field::Key),
            (Section::Search, _) => (Section::Delete, Field::Key),
            (Section::Delete, _) => (Section::Insert, Field::Key),
        };
    }

    fn prev_field(&mut self) {
        (self.section, self.field) = match (self.section, self.field) {
            (Section::Insert, Field::Key) => (Section::Delete, Field::Key),
            (Section::Insert, Field::Value) => (Section::Insert, Field::Key),
            (Section::Search, _) => (Section::Insert, Field::Value),
            (Section::Delete, _) => (Section::Search, Field::Key),
        };
    }

    /// Run the active panel's operation against the table.
    /// Inputs are cleared once the operation ran; a validation error keeps them.
    fn run_operation(&mut self) {
        let result = match self.section {
            Section::Insert => self.table.insert(&self.insert.key, &self.insert.value),
            Section::Search => self.table.search(&self.search.key),
            Section::Delete => self.table.delete(&self.delete.key),
        };
        let feedback = Feedback::from_result(&result, self.config.language);

        match &result {
            Ok(outcome) => {
                tracing::info!(slot = ?outcome.index(), "{:?}: {}", self.section, feedback.text);
                if let Outcome::Inserted { index, .. } = outcome {
                    self.highlighted = Some(*index);
                    self.highlight_start = Some(Instant::now());
                }
                self.active_panel_mut().clear_inputs();
                self.field = Field::Key;
            }
            Err(e) => tracing::debug!("{:?} rejected: {}", self.section, e),
        }

        self.active_panel_mut().feedback = Some(feedback);
    }

    fn reset_table(&mut self) {
        self.table.reset();
        self.highlighted = None;
        self.highlight_start = None;
        for panel in [&mut self.insert, &mut self.search, &mut self.delete] {
            panel.feedback = None;
        }
        tracing::info!("Table reset");
        self.set_status(feedback::label(Label::TableCleared, self.config.language));
    }

    pub fn tick(&mut self) {
        // Drop the insert highlight
        if let Some(start) = self.highlight_start {
            if start.elapsed() >= Duration::from_millis(self.config.highlight_ms) {
                self.highlighted = None;
                self.highlight_start = None;
            }
        }

        // Clear status message after timeout
        if let Some(time) = self.status_message_time {
            if time.elapsed().as_secs() >= self.config.status_timeout_secs {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::Language;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn insert(app: &mut App, key: &str, value: &str) {
        app.section = Section::Insert;
        app.field = Field::Key;
        type_text(app, key);
        press(app, KeyCode::Tab);
        type_text(app, value);
        press(app, KeyCode::Enter);
    }

    #[test]
    fn test_insert_from_keyboard() {
        let mut app = App::new(AppConfig::default());
        insert(&mut app, "apple", "red");

        assert_eq!(app.table.get(0).map(|e| e.to_string()).as_deref(), Some("apple→red"));
        assert_eq!(app.highlighted, Some(0));
        assert!(app.insert.key.is_empty());
        assert!(app.insert.value.is_empty());
        assert_eq!(app.field, Field::Key);

        let feedback = app.insert.feedback.as_ref().unwrap();
        assert!(feedback.success);
        assert_eq!(feedback.text, "✓ Inserted \"apple→red\" at index 0");
    }

    #[test]
    fn test_validation_error_keeps_inputs() {
        let mut app = App::new(AppConfig {
            language: Language::Es,
            ..AppConfig::default()
        });
        type_text(&mut app, "apple");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.insert.key, "apple");
        assert_eq!(app.table.len(), 0);
        let feedback = app.insert.feedback.as_ref().unwrap();
        assert!(!feedback.success);
        assert_eq!(feedback.text, "❌ Por favor ingresa clave y valor");
    }

    #[test]
    fn test_search_and_delete_panels() {
        let mut app = App::new(AppConfig::default());
        insert(&mut app, "kiwi", "green");

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.section, Section::Search);
        type_text(&mut app, "kiwi");
        press(&mut app, KeyCode::Enter);
        assert!(app.search.feedback.as_ref().unwrap().success);
        assert!(app.search.key.is_empty());

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.section, Section::Delete);
        type_text(&mut app, "kiwi");
        press(&mut app, KeyCode::Enter);
        assert!(app.delete.feedback.as_ref().unwrap().success);
        assert_eq!(app.table.len(), 0);

        // Not found still clears the input
        type_text(&mut app, "kiwi");
        press(&mut app, KeyCode::Enter);
        assert!(!app.delete.feedback.as_ref().unwrap().success);
        assert!(app.delete.key.is_empty());
    }

    #[test]
    fn test_backspace_edits_focused_field() {
        let mut app = App::new(AppConfig::default());
        type_text(&mut app, "keyx");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.insert.key, "key");
        assert_eq!(app.hash_preview(), Some(("key", 106_079, 4)));
    }

    #[test]
    fn test_alt_digit_jumps_to_panel() {
        let mut app = App::new(AppConfig::default());
        app.handle_key(KeyEvent::new(KeyCode::Char('3'), KeyModifiers::ALT));
        assert_eq!(app.section, Section::Delete);
        app.handle_key(KeyEvent::new(KeyCode::Char('2'), KeyModifiers::ALT));
        assert_eq!(app.section, Section::Search);
        // Alt combination is not typed into the input
        assert!(app.search.key.is_empty());
    }

    #[test]
    fn test_back_tab_cycles_backwards() {
        let mut app = App::new(AppConfig::default());
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.section, Section::Delete);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.section, Section::Search);
        press(&mut app, KeyCode::BackTab);
        assert_eq!((app.section, app.field), (Section::Insert, Field::Value));
    }

    #[test]
    fn test_ctrl_r_resets_table() {
        let mut app = App::new(AppConfig::default());
        insert(&mut app, "apple", "red");
        app.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));

        assert_eq!(app.table.len(), 0);
        assert!(app.insert.feedback.is_none());
        assert_eq!(app.status_message.as_deref(), Some("Table cleared"));
    }

    #[test]
    fn test_reset_status_follows_language() {
        let mut app = App::new(AppConfig {
            language: Language::Es,
            ..AppConfig::default()
        });
        app.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));
        assert_eq!(app.status_message.as_deref(), Some("Tabla vaciada"));
    }

    #[test]
    fn test_help_popup_swallows_keys() {
        let mut app = App::new(AppConfig::default());
        press(&mut app, KeyCode::F(1));
        assert_eq!(app.popup, Popup::Help);

        type_text(&mut app, "abc");
        assert!(app.insert.key.is_empty());

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.popup, Popup::None);
    }

    #[test]
    fn test_tick_expires_highlight_and_status() {
        let mut app = App::new(AppConfig {
            highlight_ms: 0,
            status_timeout_secs: 0,
            ..AppConfig::default()
        });
        insert(&mut app, "apple", "red");
        app.set_status("hello");
        assert!(app.highlighted.is_some());

        app.tick();
        assert!(app.highlighted.is_none());
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_tick_keeps_fresh_highlight() {
        let mut app = App::new(AppConfig {
            highlight_ms: 60_000,
            ..AppConfig::default()
        });
        insert(&mut app, "apple", "red");
        app.tick();
        assert_eq!(app.highlighted, Some(0));
    }
}
