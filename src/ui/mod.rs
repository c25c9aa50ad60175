use std::sync::OnceLock;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::app::{App, Field, Popup, Section};
use crate::demo::feedback::{label, Label};
use crate::demo::SlotView;
use crate::theme::Theme;

// Set once at startup from config; falls back to the default theme
static THEME: OnceLock<Theme> = OnceLock::new();

pub fn init_theme(theme: Theme) {
    if THEME.set(theme).is_err() {
        tracing::debug!("Theme already initialized");
    }
}

fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

fn accent() -> Color { theme().accent }
fn inactive() -> Color { theme().inactive }
fn success() -> Color { theme().success }
fn warning() -> Color { theme().warning }
fn danger() -> Color { theme().danger }
fn highlight() -> Color { theme().highlight }
fn text() -> Color { theme().text }
fn text_dim() -> Color { theme().text_dim }
fn bg_selected() -> Color { theme().bg_selected }
fn header() -> Color { theme().header }

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(1),  // Info line
            Constraint::Length(8),  // Slot table (5 rows + header + borders)
            Constraint::Min(8),     // Operation panels
            Constraint::Length(1),  // Footer
        ])
        .split(area);

    draw_info_line(f, app, chunks[0]);
    draw_table_box(f, app, chunks[1]);
    draw_operations(f, app, chunks[2]);
    draw_footer(f, app, chunks[3]);

    if app.popup == Popup::Help {
        draw_help_popup(f);
    }
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    let lang = app.config.language;

    // Priority: status message > hash preview > ready
    let line = if let Some(ref status) = app.status_message {
        Line::from(vec![
            Span::styled(status, Style::default().fg(warning())),
        ])
    } else if let Some((key, hash, index)) = app.hash_preview().filter(|_| app.config.show_hash_preview) {
        let mut spans = vec![
            Span::styled("hash(", Style::default().fg(text_dim())),
            Span::styled(format!("{:?}", key), Style::default().fg(text())),
            Span::styled(") = ", Style::default().fg(text_dim())),
            Span::styled(hash.to_string(), Style::default().fg(accent())),
            Span::styled(" │ ", Style::default().fg(inactive())),
            Span::styled(format!("{} mod 5 = ", hash), Style::default().fg(text_dim())),
            Span::styled(format!("index {}", index), Style::default().fg(accent()).add_modifier(Modifier::BOLD)),
        ];
        if let Some(occupant) = app.table.get(index) {
            spans.push(Span::styled(format!(" │ {} ", label(Label::Holds, lang)), Style::default().fg(inactive())));
            spans.push(Span::styled(occupant.to_string(), Style::default().fg(warning())));
        }
        Line::from(spans)
    } else {
        Line::from(vec![
            Span::styled(label(Label::Ready, lang), Style::default().fg(text_dim())),
        ])
    };

    let info = Paragraph::new(line).alignment(Alignment::Center);
    f.render_widget(info, area);
}

fn draw_table_box(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(Span::styled(
            format!(" Hash Table ({}/5) ", app.table.len()),
            Style::default().fg(accent()).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(inactive()));

    let header = Row::new(vec![
        Span::styled("Slot", Style::default().fg(header())),
        Span::styled("Entry", Style::default().fg(header())),
    ]);

    // Slot the typed key would land on
    let target = app.hash_preview().map(|(_, _, index)| index);

    let rows: Vec<Row> = app
        .table
        .snapshot()
        .into_iter()
        .map(|slot| slot_row(slot, app.highlighted, target))
        .collect();

    let widths = [Constraint::Length(6), Constraint::Percentage(90)];
    let table = Table::new(rows, widths)
        .header(header.style(Style::default()))
        .block(block);

    f.render_widget(table, area);
}

fn slot_row<'a>(slot: SlotView, highlighted: Option<usize>, target: Option<usize>) -> Row<'a> {
    let is_fresh = highlighted == Some(slot.index);
    let marker = if target == Some(slot.index) { "▶" } else { " " };

    let (content, color) = match &slot.entry {
        Some(entry) => (entry.to_string(), if is_fresh { highlight() } else { text() }),
        None => ("-".to_string(), text_dim()),
    };

    let row_style = if is_fresh {
        Style::default().bg(bg_selected()).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    Row::new(vec![
        Span::styled(format!("{} {}", marker, slot.index), Style::default().fg(accent())),
        Span::styled(content, Style::default().fg(color)),
    ])
    .style(row_style)
}

fn draw_operations(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    draw_panel(f, app, Section::Insert, chunks[0]);
    draw_panel(f, app, Section::Search, chunks[1]);
    draw_panel(f, app, Section::Delete, chunks[2]);
}

fn draw_panel(f: &mut Frame, app: &App, section: Section, area: Rect) {
    let is_active = app.section == section;
    let border_color = if is_active { accent() } else { inactive() };
    let title_style = if is_active {
        Style::default().fg(accent()).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(inactive())
    };

    let title = match section {
        Section::Insert => " (1) Insert ",
        Section::Search => " (2) Search ",
        Section::Delete => " (3) Delete ",
    };

    let block = Block::default()
        .title(Span::styled(title, title_style))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let panel = app.panel(section);
    let key_focused = is_active && (section != Section::Insert || app.field == Field::Key);
    let value_focused = is_active && section == Section::Insert && app.field == Field::Value;

    let mut lines = vec![input_line("Key", &panel.key, key_focused)];
    if section == Section::Insert {
        lines.push(input_line("Value", &panel.value, value_focused));
    }
    lines.push(Line::from(""));

    if let Some(feedback) = &panel.feedback {
        let color = if feedback.success { success() } else { danger() };
        lines.push(Line::styled(feedback.text.as_str(), Style::default().fg(color)));
    }

    let content = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(content, area);
}

fn input_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
    let cursor = if focused { "_" } else { "" };
    let field_style = if focused {
        Style::default().fg(text()).bg(bg_selected())
    } else {
        Style::default().fg(text())
    };

    Line::from(vec![
        Span::styled(format!("{:>6}: ", label), Style::default().fg(header())),
        Span::styled(format!("{}{}", value, cursor), field_style),
    ])
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let run_hint = match app.section {
        Section::Insert => "Insert",
        Section::Search => "Search",
        Section::Delete => "Delete",
    };
    let hints: Vec<(&str, &str)> = vec![
        ("Enter", run_hint),
        ("Tab", "Next"),
        ("Alt+1-3", "Panel"),
        ("Ctrl+R", "Reset"),
        ("F1", "Help"),
        ("Esc", "Quit"),
    ];

    // Responsive: show fewer hints on narrow terminals
    let max_hints = if area.width < 60 { 3 } else if area.width < 80 { 5 } else { hints.len() };

    let hint_spans: Vec<Span> = hints
        .iter()
        .take(max_hints)
        .flat_map(|(key, action)| {
            vec![
                Span::styled(*key, Style::default().fg(accent())),
                Span::styled(format!(" {} │ ", action), Style::default().fg(text_dim())),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(hint_spans))
        .alignment(Alignment::Center);

    f.render_widget(footer, area);
}

fn draw_help_popup(f: &mut Frame) {
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 80 { 95 } else { 70 },
        if area.height < 40 { 95 } else { 80 },
        area
    );

    f.render_widget(Clear, popup_area);

    let section = |title: &'static str| {
        Line::from(Span::styled(title, Style::default().fg(header()).add_modifier(Modifier::BOLD)))
    };
    let key = |k: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(k, Style::default().fg(accent())),
            Span::raw(desc),
        ])
    };

    let help_text = vec![
        section("═══ How It Works ═══"),
        Line::from("  index = hash(key) mod 5, with hash = h * 31 + char (32-bit)"),
        Line::from("  Each of the 5 slots holds one entry. A colliding insert"),
        Line::from("  overwrites the slot: there is no chaining or probing."),
        Line::from("  Search and delete match when the stored \"key→value\""),
        Line::from("  starts with the typed key."),
        Line::from(""),
        section("═══ Keys ═══"),
        key("  Enter     ", "Run the active operation"),
        key("  Tab       ", "Next field (Insert key → value → Search → Delete)"),
        key("  Shift+Tab ", "Previous field"),
        key("  Alt+1/2/3 ", "Jump to Insert / Search / Delete"),
        key("  Ctrl+R    ", "Empty the table"),
        key("  Esc       ", "Close popup / quit"),
        Line::from(""),
        section("═══ Scripts ═══"),
        key("  hash-academy --script ops.txt   ", "Replay insert/search/delete lines"),
        key("  hash-academy --hash apple       ", "Print hash and index of a key"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(text_dim())),
            Span::styled("F1", Style::default().fg(accent())),
            Span::styled("/", Style::default().fg(text_dim())),
            Span::styled("Esc", Style::default().fg(accent())),
            Span::styled(" to close", Style::default().fg(text_dim())),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(" HASH ACADEMY ", Style::default().fg(accent()).add_modifier(Modifier::BOLD)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent())),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_renders_slots_and_panels() {
        let mut app = App::new(AppConfig::default());
        app.table.insert("apple", "red").unwrap();

        let screen = render(&app);
        assert!(screen.contains("Hash Table (1/5)"));
        assert!(screen.contains("apple→red"));
        assert!(screen.contains("(1) Insert"));
        assert!(screen.contains("(3) Delete"));
        assert!(screen.contains("Ready"));
    }

    #[test]
    fn test_table_box_fits_five_slots() {
        let mut app = App::new(AppConfig::default());
        app.table.insert("lemon", "yellow").unwrap();

        let screen = render(&app);
        let lines: Vec<&str> = screen.lines().collect();
        // Info line, top border, header, slots 0..=4, bottom border
        assert!(lines[1].starts_with('┌'));
        assert!(lines[7].contains("lemon→yellow"));
        assert!(lines[8].starts_with('└'));
    }

    #[test]
    fn test_renders_hash_preview() {
        let mut app = App::new(AppConfig::default());
        app.insert.key = "key".to_string();

        let screen = render(&app);
        assert!(screen.contains("106079"));
        assert!(screen.contains("index 4"));
        assert!(!screen.contains("holds"));
    }

    #[test]
    fn test_hash_preview_shows_collision_target() {
        let mut app = App::new(AppConfig::default());
        app.table.insert("a", "1").unwrap();
        app.search.key = "f".to_string();
        app.section = Section::Search;

        let screen = render(&app);
        assert!(screen.contains("index 2"));
        assert!(screen.contains("holds a→1"));
    }

    #[test]
    fn test_info_line_follows_language() {
        let mut app = App::new(AppConfig {
            language: crate::demo::Language::Es,
            ..AppConfig::default()
        });
        assert!(render(&app).contains("Listo"));

        app.table.insert("a", "1").unwrap();
        app.insert.key = "f".to_string();
        let screen = render(&app);
        assert!(screen.contains("contiene a→1"));
        assert!(!screen.contains("holds"));
    }

    #[test]
    fn test_renders_help_popup() {
        let mut app = App::new(AppConfig::default());
        app.popup = Popup::Help;
        assert!(render(&app).contains("HASH ACADEMY"));
    }
}
