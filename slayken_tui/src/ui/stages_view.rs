//! Stages tab view - the stage list and a preview of the selected boss

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use slayken_core::boss;
use slayken_core::catalog::StageKind;
use slayken_core::stage::{self, COMPLETION_STARS};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    draw_stage_list(f, app, chunks[0]);
    draw_stage_preview(f, app, chunks[1]);
}

fn draw_stage_list(f: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = vec![];

    for (i, node) in app.catalog.stages().iter().enumerate() {
        let progress = app.progress.iter().find(|p| p.id == node.id);
        let unlocked = progress.is_some_and(|p| p.unlocked);
        let stars = progress.map_or(0, |p| p.stars);

        let marker = if !unlocked {
            "🔒"
        } else if progress.is_some_and(|p| p.completed) {
            "✔ "
        } else {
            "▶ "
        };
        let star_text = format!(
            "{}{}",
            "★".repeat(stars as usize),
            "☆".repeat(COMPLETION_STARS.saturating_sub(stars) as usize)
        );

        let selected = i == app.selected_stage;
        let name_style = match (selected, unlocked) {
            (true, _) => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            (false, true) => Style::default().fg(Color::White),
            (false, false) => Style::default().fg(Color::DarkGray),
        };
        let kind = match node.kind {
            StageKind::Boss => Span::styled(" BOSS", Style::default().fg(Color::Red)),
            StageKind::Normal => Span::raw(""),
        };

        lines.push(Line::from(vec![
            Span::styled(if selected { "> " } else { "  " }, name_style),
            Span::raw(format!("{} ", marker)),
            Span::styled(format!("{:>2}. {:20}", node.id, node.name), name_style),
            Span::styled(star_text, Style::default().fg(Color::Yellow)),
            kind,
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  Stars: {}", stage::total_stars(&app.progress)),
        Style::default().fg(Color::Cyan),
    )));

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Stages "));
    f.render_widget(paragraph, area);
}

fn draw_stage_preview(f: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = vec![];

    let node = app.catalog.stages().get(app.selected_stage);
    let template = node.and_then(|n| app.catalog.boss(&n.boss));

    match (node, template) {
        (Some(node), Some(template)) => {
            let level = app.active_character().map_or(1, |c| c.level);
            let scaled = boss::scale(template, level, &app.constants.boss);

            lines.push(Line::from(Span::styled(
                node.name.clone(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("Boss:      ", Style::default().fg(Color::Gray)),
                Span::styled(scaled.name.clone(), Style::default().fg(Color::Red)),
            ]));
            lines.push(Line::from(vec![
                Span::styled("HP:        ", Style::default().fg(Color::Gray)),
                Span::raw(format!("{:.0}", scaled.hp)),
                Span::styled(format!(" (base {:.0})", template.hp), Style::default().fg(Color::DarkGray)),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Defense:   ", Style::default().fg(Color::Gray)),
                Span::raw(format!("{:.0}", scaled.defense)),
                Span::styled(format!(" (base {:.0})", template.defense), Style::default().fg(Color::DarkGray)),
            ]));
            lines.push(Line::from(Span::styled(
                format!("Scaled for level {}", scaled.level),
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::from(""));

            let rewards = &app.constants.rewards;
            lines.push(Line::from(Span::styled("Rewards", Style::default().fg(Color::Yellow))));
            lines.push(Line::from(format!(
                "  {} coins, {} crystals, {} EXP",
                rewards.coins, rewards.crystals, rewards.character_exp
            )));
            lines.push(Line::from(format!("  {:.0}% item drop chance", rewards.drop_chance * 100.0)));

            if !stage::is_playable(&app.progress, node.id) {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "Clear the previous stage to unlock",
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
        _ => lines.push(Line::from("No stage selected")),
    }

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Encounter "));
    f.render_widget(paragraph, area);
}
