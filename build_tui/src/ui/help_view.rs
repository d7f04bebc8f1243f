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
    let constants = app.build.constants();

    let lines = vec![
        Line::from(Span::styled(
            "═══ Navigation ═══",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        key_line("1-7", "Jump to tab"),
        key_line("Tab / Shift+Tab", "Next/previous tab"),
        key_line("↑/k  ↓/j", "Navigate lists"),
        key_line("q / Ctrl+C", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "═══ Character ═══",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        key_line("←/→  -/+", "Decrease/increase selected stat"),
        key_line("Enter", "Type a value, Enter again to apply"),
        key_line("r, then y", "Reset all stats"),
        Line::from(""),
        Line::from(Span::styled(
            "═══ Catalog ═══",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        key_line("←/→", "Switch category"),
        key_line("/", "Search by name"),
        key_line("e", "Show equippable items only"),
        key_line("f", "Toggle favorite"),
        key_line("Enter", "Show item stats"),
        Line::from(""),
        Line::from(Span::styled(
            "═══ Rules ═══",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Point budget:",
            Style::default().fg(Color::Yellow),
        )),
        Line::from(format!(
            "  Budget = {} + (Level - 1) × {}",
            constants.base_points, constants.points_per_level
        )),
        Line::from("  Overspending is allowed and only reported"),
        Line::from(""),
        Line::from(Span::styled(
            "Stats:",
            Style::default().fg(Color::Yellow),
        )),
        Line::from("  Every stat is at least 1; lower values are raised to 1"),
        Line::from(""),
        Line::from(Span::styled(
            "Requirements:",
            Style::default().fg(Color::Yellow),
        )),
        Line::from("  Str, Dex, Int, Fai/Fth and Arc must be met"),
        Line::from("  Other requirement entries are ignored"),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Help "));

    f.render_widget(paragraph, area);
}

fn key_line(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {:20}", key),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(desc.to_string(), Style::default().fg(Color::White)),
    ])
}
