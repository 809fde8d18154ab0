//! Battle tab view

use crate::app::App;
use crate::ui::{health_color, progress_bar};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use slayken_core::encounter::EncounterState;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(50),    // Boss and log
            Constraint::Length(38), // Skills
        ])
        .split(area);

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Boss status
            Constraint::Min(0),    // Battle log
        ])
        .split(chunks[0]);

    draw_boss_status(f, app, main_chunks[0]);
    draw_battle_log(f, app, main_chunks[1]);
    draw_skills(f, app, chunks[1]);
}

fn draw_boss_status(f: &mut Frame, app: &App, area: Rect) {
    let session = &app.session;

    let lines = match session.boss() {
        Some(boss) => {
            let percent = session.boss_hp_percent();
            let color = health_color(percent);
            let bar_width = area.width.saturating_sub(4);

            let state = match session.state() {
                EncounterState::Resolved => Span::styled(" DEFEATED", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
                _ => Span::raw(""),
            };

            vec![
                Line::from(vec![
                    Span::styled(format!("{} ", boss.name), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
                    Span::styled(
                        format!("{:.0}/{:.0}", session.boss_hp(), session.boss_max_hp()),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!(" ({:.0}%)", percent), Style::default().fg(Color::DarkGray)),
                    state,
                ]),
                Line::from(Span::styled(
                    progress_bar(session.boss_hp(), session.boss_max_hp(), bar_width),
                    Style::default().fg(color),
                )),
                Line::from(vec![
                    Span::styled("DEF ", Style::default().fg(Color::Gray)),
                    Span::raw(format!("{:.0}", boss.defense)),
                    Span::styled("  LV ", Style::default().fg(Color::Gray)),
                    Span::raw(boss.level.to_string()),
                ]),
            ]
        }
        None => vec![Line::from(Span::styled(
            "No battle in progress",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Boss "));
    f.render_widget(paragraph, area);
}

fn draw_battle_log(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .battle_log
        .iter()
        .skip(app.log_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|line| {
            let style = if line.starts_with("━━━") {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else if line.starts_with('+') {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(Span::styled(line.clone(), style)))
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Battle Log "));
    f.render_widget(list, area);
}

fn draw_skills(f: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = vec![];

    for (i, skill) in app.known_skills().into_iter().enumerate() {
        let selected = i == app.selected_skill;
        let style = if selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        let preview = app
            .damage_preview(skill)
            .map(|b| format!("{:>6}", b.final_damage))
            .unwrap_or_else(|| "     -".to_string());
        // Heals have no target in a boss fight and land for the 1 damage floor
        let tag = if skill.is_healing() {
            Span::styled(" heal", Style::default().fg(Color::LightGreen))
        } else {
            Span::raw("")
        };

        lines.push(Line::from(vec![
            Span::styled(if selected { "> " } else { "  " }, style),
            Span::styled(format!("{:18}", skill.name), style),
            Span::styled(preview, Style::default().fg(Color::Green)),
            tag,
        ]));
    }

    if let Some(breakdown) = app.current_skill().and_then(|s| app.damage_preview(s)) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Damage steps", Style::default().fg(Color::Cyan))));
        for (label, value) in [
            ("Attack", breakdown.base_attack),
            ("+ gear %", breakdown.after_percent),
            ("+ strength", breakdown.after_strength),
            ("+ level", breakdown.after_level),
            ("× skill", breakdown.raw_damage),
            ("− defense", breakdown.after_defense),
        ] {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:12}", label), Style::default().fg(Color::Gray)),
                Span::raw(format!("{:.1}", value)),
            ]));
        }
    }

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Skills "));
    f.render_widget(paragraph, area);
}
