//! UI rendering

mod battle_view;
mod help_view;
mod hero_view;
mod stages_view;

use crate::app::{App, Tab};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status line
            Constraint::Length(3), // Keybindings footer
        ])
        .split(f.area());

    draw_tabs(f, app, chunks[0]);

    match app.current_tab {
        Tab::Stages => stages_view::draw(f, app, chunks[1]),
        Tab::Battle => battle_view::draw(f, app, chunks[1]),
        Tab::Hero => hero_view::draw(f, app, chunks[1]),
        Tab::Help => help_view::draw(f, app, chunks[1]),
    }

    draw_status(f, app, chunks[2]);
    draw_keybindings(f, app, chunks[3]);
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let text = app.status.clone().unwrap_or_default();
    let paragraph = Paragraph::new(Line::from(Span::styled(
        format!(" {}", text),
        Style::default().fg(Color::LightYellow),
    )));
    f.render_widget(paragraph, area);
}

fn draw_keybindings(f: &mut Frame, app: &App, area: Rect) {
    let common_keys = vec![("Tab", "Next tab"), ("q", "Quit")];

    let tab_keys: Vec<(&str, &str)> = match app.current_tab {
        Tab::Stages => vec![("↑/↓", "Select stage"), ("Enter", "Fight")],
        Tab::Battle => vec![
            ("↑/↓", "Select skill"),
            ("a/Enter", "Attack"),
            ("PgUp/PgDn", "Scroll log"),
            ("r", "Leave"),
        ],
        Tab::Hero => vec![("↑/↓", "Select item"), ("Enter", "Equip"), ("u", "Unequip weapon")],
        Tab::Help => vec![],
    };

    let mut spans: Vec<Span> = Vec::new();

    for (i, (key, desc)) in tab_keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {}", desc), Style::default().fg(Color::White)));
    }

    if !tab_keys.is_empty() {
        spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
    }

    for (i, (key, desc)) in common_keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(format!("[{}]", key), Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(format!(" {}", desc), Style::default().fg(Color::Gray)));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Keys "))
        .alignment(ratatui::layout::Alignment::Center);

    f.render_widget(paragraph, area);
}

fn draw_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::all()
        .iter()
        .map(|t| {
            let style = if *t == app.current_tab {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(t.name(), style))
        })
        .collect();

    let title = format!(
        " Slayken │ {} coins │ {} crystals │ {} account EXP ",
        app.wallet.coins, app.wallet.crystals, app.wallet.account_exp
    );
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().fg(Color::Yellow))
        .divider("|");

    f.render_widget(tabs, area);
}

/// Text bar filled to `current / max`
pub fn progress_bar(current: f64, max: f64, width: u16) -> String {
    let percent = if max > 0.0 { (current / max).clamp(0.0, 1.0) } else { 0.0 };
    let filled = (percent * width as f64) as usize;
    let empty = (width as usize).saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Green above half, yellow above a quarter, red below
pub fn health_color(percent: f64) -> Color {
    if percent > 50.0 {
        Color::Green
    } else if percent > 25.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

pub fn stat_line(name: &str, value: f64) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:16}", name), Style::default().fg(Color::Gray)),
        Span::styled(format!("{:.0}", value), Style::default().fg(Color::White)),
    ])
}

pub fn stat_line_with_computed(name: &str, base: f64, computed: f64) -> Line<'static> {
    if (base - computed).abs() < 0.1 {
        stat_line(name, computed)
    } else {
        Line::from(vec![
            Span::styled(format!("{:16}", name), Style::default().fg(Color::Gray)),
            Span::styled(format!("{:.0}", computed), Style::default().fg(Color::Green)),
            Span::styled(format!(" (base: {:.0})", base), Style::default().fg(Color::DarkGray)),
        ])
    }
}
