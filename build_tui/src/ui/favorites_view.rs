//! Favorites tab view

use crate::app::App;
use crate::ui::section;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![section("Favorites"), Line::from("")];

    if app.favorites.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No favorites yet. Press [f] on a catalog item to add one.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for (i, fav) in app.favorites.items().iter().enumerate() {
        let is_selected = i == app.selected_favorite;
        let (prefix, style) = if is_selected {
            ("> ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        } else {
            ("  ", Style::default().fg(Color::White))
        };

        let mut spans = vec![
            Span::styled(prefix, style),
            Span::styled(format!("{:32}", fav.name), style),
            Span::styled(format!("{:14}", fav.kind.label()), Style::default().fg(Color::Gray)),
        ];

        // Favorites outlive catalog reloads, so the item may be gone
        match app.catalog.find(&fav.id) {
            Some((category, item)) => {
                if let Some(summary) = item.requirement_summary() {
                    spans.push(Span::styled(
                        format!("{}  ", summary),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                if !app.is_equippable(category, item) {
                    spans.push(Span::styled("Cannot Equip", Style::default().fg(Color::Red)));
                }
            }
            None => {
                spans.push(Span::styled("not in catalog", Style::default().fg(Color::DarkGray)));
            }
        }

        lines.push(Line::from(spans));
    }

    let title = format!(" Favorites ({}) ", app.favorites.len());
    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(paragraph, area);
}
