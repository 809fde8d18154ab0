//! Help tab view

use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let progression = &app.constants.progression;
    let boss = &app.constants.boss;

    let lines = vec![
        section("═══ Navigation ═══"),
        key_line("1-4", "Jump to tab (Stages/Battle/Hero/Help)"),
        key_line("Tab / Shift+Tab", "Next/previous tab"),
        key_line("↑/k  ↓/j", "Navigate lists"),
        key_line("q / Ctrl+C", "Quit"),
        Line::from(""),
        section("═══ Battle ═══"),
        key_line("Enter (Stages)", "Fight the selected stage"),
        key_line("a / Enter", "Attack with the selected skill"),
        key_line("PgUp / PgDn", "Scroll the battle log"),
        key_line("r", "Leave the battle"),
        Line::from(""),
        section("═══ Hero ═══"),
        key_line("Enter", "Equip the selected inventory item"),
        key_line("u", "Unequip the weapon"),
        Line::from(""),
        section("═══ Game Mechanics ═══"),
        Line::from(""),
        heading("Damage:"),
        Line::from("  attack × (1 + gear attack%) × (1 + strength%) × (1 + (level − 1)%)"),
        Line::from("  × skill% + base power − boss defense, at least 1"),
        Line::from(""),
        heading("Bosses:"),
        Line::from(format!(
            "  HP +{:.0}% and defense +{:.0}% per hero level above 1",
            boss.hp_per_level * 100.0,
            boss.defense_per_level * 100.0
        )),
        Line::from(""),
        heading("Leveling:"),
        Line::from(format!(
            "  First level costs {} EXP, each next ×{} (cap {})",
            progression.base_exp_to_next_level, progression.exp_growth_factor, progression.level_cap
        )),
        Line::from(format!(
            "  Stats grow {:.0}% of base per level",
            progression.stat_growth_per_level * 100.0
        )),
        Line::from("  Learning a skill replaces that victory's item drop"),
    ];

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Help & Mechanics "));

    f.render_widget(paragraph, area);
}

fn section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

fn heading(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(title, Style::default().fg(Color::Yellow)))
}

fn key_line(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:20}", key), Style::default().fg(Color::Yellow)),
        Span::styled(desc.to_string(), Style::default().fg(Color::White)),
    ])
}
