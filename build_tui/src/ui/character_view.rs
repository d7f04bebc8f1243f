//! Character tab view

use crate::app::{App, InputMode};
use crate::ui::{label_line, section};
use build_core::{Category, PointBalance, StatField};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(55),
            Constraint::Percentage(45),
        ])
        .split(area);

    draw_stats(f, app, chunks[0]);
    draw_summary(f, app, chunks[1]);
}

fn draw_stats(f: &mut Frame, app: &App, area: Rect) {
    let stats = app.build.stats();
    let selected = app.current_stat();

    let mut lines = vec![section("Character Stats"), Line::from("")];

    for field in StatField::all() {
        let is_selected = field == selected;
        let (prefix, style) = if is_selected {
            ("> ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        } else {
            ("  ", Style::default().fg(Color::White))
        };

        let value = if is_selected && app.input_mode == InputMode::StatEntry {
            Span::styled(
                format!("[{}_]", app.stat_input),
                Style::default().fg(Color::Black).bg(Color::Yellow),
            )
        } else {
            Span::styled(format!("{:>5}", stats.get(field)), style)
        };

        lines.push(Line::from(vec![
            Span::styled(prefix, style),
            Span::styled(format!("{:14}", field.label()), style),
            Span::styled("◀ ", Style::default().fg(Color::DarkGray)),
            value,
            Span::styled(" ▶", Style::default().fg(Color::DarkGray)),
        ]));

        if field == StatField::Level {
            lines.push(balance_line(app.build.point_balance()));
            lines.push(Line::from(""));
        }
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Build "),
    );

    f.render_widget(paragraph, area);
}

fn balance_line(balance: PointBalance) -> Line<'static> {
    let color = match balance {
        PointBalance::Available(_) => Color::Green,
        PointBalance::Balanced => Color::DarkGray,
        PointBalance::Overspent(_) => Color::Red,
    };
    let text = balance
        .message()
        .unwrap_or_else(|| "All points allocated".to_string());
    Line::from(Span::styled(format!("    {}", text), Style::default().fg(color)))
}

fn draw_summary(f: &mut Frame, app: &App, area: Rect) {
    let build = &app.build;
    let selected = app.current_stat();

    let mut lines = vec![
        section("Selected"),
        Line::from(Span::styled(
            selected.label().to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            selected.description().to_string(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        section("Point Budget"),
        label_line("Used", build.used_points().to_string()),
        label_line(
            "Budget",
            (build.used_points() + build.available_points()).to_string(),
        ),
        label_line("Available", build.available_points().to_string()),
        Line::from(""),
        section("Equippable"),
    ];

    for category in Category::all().iter().filter(|c| c.has_requirements()) {
        let total = app.catalog.items(*category).len();
        if total == 0 {
            continue;
        }
        let usable = app.catalog.equippable(*category, build).len();
        lines.push(label_line(category.label(), format!("{} / {}", usable, total)));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Summary "));

    f.render_widget(paragraph, area);
}
