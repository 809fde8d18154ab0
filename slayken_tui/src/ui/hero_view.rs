//! Hero tab view - effective stats, equipment and inventory

use crate::app::App;
use crate::ui::{progress_bar, stat_line_with_computed};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use slayken_core::types::{BonusType, EquipmentSlot, StatKind};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(area);

    draw_stats(f, app, chunks[0]);
    draw_equipment(f, app, chunks[1]);
    draw_inventory(f, app, chunks[2]);
}

fn draw_stats(f: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = vec![];

    let (Some(character), Some(resolved)) = (app.active_character(), app.resolved_stats()) else {
        let paragraph = Paragraph::new("No character").block(Block::default().borders(Borders::ALL).title(" Hero "));
        f.render_widget(paragraph, area);
        return;
    };

    lines.push(Line::from(vec![
        Span::styled(character.name.clone(), Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled(format!("  {:?}", character.element), Style::default().fg(Color::Magenta)),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Level ", Style::default().fg(Color::Gray)),
        Span::styled(character.level.to_string(), Style::default().fg(Color::Yellow)),
        Span::styled(
            if character.experience_to_next_level == 0 {
                "  (max)".to_string()
            } else {
                format!("  {}/{} EXP", character.experience, character.experience_to_next_level)
            },
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    lines.push(Line::from(Span::styled(
        progress_bar(app.level_progress(), 1.0, area.width.saturating_sub(4)),
        Style::default().fg(Color::Blue),
    )));
    lines.push(Line::from(""));

    for kind in StatKind::core() {
        let base = character.stats.get_or_zero(*kind);
        let computed = resolved.stats.get_or_zero(*kind);
        lines.push(stat_line_with_computed(kind.name(), base, computed));
    }

    lines.push(Line::from(""));
    for kind in [StatKind::Attack, StatKind::ExpGain] {
        lines.push(Line::from(vec![
            Span::styled(format!("{:16}", format!("{} %", kind.name())), Style::default().fg(Color::Gray)),
            Span::styled(
                format!("+{:.0}%", resolved.percent_bonuses.get_or_zero(kind)),
                Style::default().fg(Color::Green),
            ),
        ]));
    }

    for missing in &resolved.missing_items {
        lines.push(Line::from(Span::styled(
            format!("Unknown item '{}' ignored", missing),
            Style::default().fg(Color::Red),
        )));
    }

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Hero "));
    f.render_widget(paragraph, area);
}

fn draw_equipment(f: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = vec![];

    if let Some(character) = app.active_character() {
        for slot in EquipmentSlot::all() {
            let item = character.equipped(*slot).map(|id| match app.catalog.item(id) {
                Some(item) => item.name.clone(),
                None => format!("{} (missing)", id),
            });
            lines.push(Line::from(vec![
                Span::styled(format!("  {:10}", slot.name()), Style::default().fg(Color::White)),
                match item {
                    Some(name) => Span::styled(name, Style::default().fg(Color::Yellow)),
                    None => Span::styled("(empty)", Style::default().fg(Color::DarkGray)),
                },
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Skills", Style::default().fg(Color::Cyan))));
        for skill in app.known_skills() {
            lines.push(Line::from(format!("  {} (Lv {})", skill.name, skill.unlock_level)));
        }
    }

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Equipment "));
    f.render_widget(paragraph, area);
}

fn draw_inventory(f: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = vec![];

    let inventory = app.active_character().map(|c| c.inventory.as_slice()).unwrap_or_default();
    if inventory.is_empty() {
        lines.push(Line::from(Span::styled(
            "  Win battles to find items",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for (i, id) in inventory.iter().enumerate() {
        let selected = i == app.selected_inventory;
        let style = if selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::White)
        };

        match app.catalog.item(id) {
            Some(item) => {
                lines.push(Line::from(vec![
                    Span::styled(if selected { "> " } else { "  " }, style),
                    Span::styled(item.name.clone(), style),
                    Span::styled(format!(" [{}]", item.slot.name()), Style::default().fg(Color::DarkGray)),
                ]));
                if selected {
                    for bonus in &item.bonuses {
                        let text = match bonus.bonus_type {
                            BonusType::Flat => format!("    +{:.0} {}", bonus.value, bonus.stat.name()),
                            BonusType::Percent => format!("    +{:.0}% {}", bonus.value, bonus.stat.name()),
                        };
                        lines.push(Line::from(Span::styled(text, Style::default().fg(Color::Green))));
                    }
                }
            }
            None => lines.push(Line::from(Span::styled(format!("  {} (unknown)", id), Style::default().fg(Color::Red)))),
        }
    }

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Inventory "));
    f.render_widget(paragraph, area);
}
