//! Catalog tab view - browse one category with requirement checks

use crate::app::{App, InputMode};
use crate::ui::{label_line, section};
use build_core::CatalogItem;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Percentage(55),
        ])
        .split(area);

    draw_list(f, app, chunks[0]);
    draw_details(f, app, chunks[1]);
}

fn draw_list(f: &mut Frame, app: &App, area: Rect) {
    let categories = app.current_tab.categories();
    let current = app.current_category();
    let items = app.visible_items();

    let mut lines: Vec<Line> = vec![];

    // Category selector
    let mut selector = vec![Span::styled("  ", Style::default())];
    for category in categories {
        let style = if Some(*category) == current {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        selector.push(Span::styled(format!("{}  ", category.label()), style));
    }
    lines.push(Line::from(selector));

    let search_style = if app.input_mode == InputMode::Search {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    lines.push(Line::from(vec![
        Span::styled("  Search: ", Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{}_", app.search_query), search_style),
        Span::styled(
            if app.equippable_only { "   [equippable only]" } else { "" },
            Style::default().fg(Color::Green),
        ),
    ]));
    lines.push(Line::from(""));

    if items.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No items found",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for (i, item) in items.iter().enumerate() {
        let is_selected = i == app.selected_item;
        let can_equip = current.map_or(true, |category| app.is_equippable(category, item));

        let base = if can_equip {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let (prefix, name_style) = if is_selected {
            ("> ", base.add_modifier(Modifier::BOLD | Modifier::REVERSED))
        } else {
            ("  ", base)
        };

        let mut spans = vec![
            Span::styled(prefix, Style::default().fg(Color::Yellow)),
            Span::styled(item.name.clone(), name_style),
        ];
        if app.favorites.is_favorite(&item.id) {
            spans.push(Span::styled(" ★", Style::default().fg(Color::Yellow)));
        }
        if !can_equip {
            spans.push(Span::styled(
                "  Cannot Equip",
                Style::default().fg(Color::Red),
            ));
        }
        lines.push(Line::from(spans));
    }

    let title = format!(" {} ({}) ", app.current_tab.name(), items.len());
    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .scroll((scroll_offset(app.selected_item), 0));

    f.render_widget(paragraph, area);
}

/// Rows to scroll so the selection stays in view
fn scroll_offset(selected: usize) -> u16 {
    u16::try_from(selected.saturating_sub(20)).unwrap_or(u16::MAX)
}

fn draw_details(f: &mut Frame, app: &App, area: Rect) {
    let Some(item) = app.selected_catalog_item() else {
        let paragraph = Paragraph::new("Select an item")
            .block(Block::default().borders(Borders::ALL).title(" Details "));
        f.render_widget(paragraph, area);
        return;
    };

    let mut lines = vec![Line::from(Span::styled(
        item.name.clone(),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ))];

    if let Some(kind) = item.kind.as_ref().or(item.category.as_ref()) {
        lines.push(Line::from(Span::styled(kind.clone(), Style::default().fg(Color::Gray))));
    }
    if let Some(weight) = item.weight {
        lines.push(label_line("Weight", format!("{:.1}", weight)));
    }
    lines.push(Line::from(""));

    lines.extend(requirement_lines(app, item));

    if let Some(effect) = &item.effect {
        lines.push(section("Effect"));
        lines.push(Line::from(effect.clone()));
        lines.push(Line::from(""));
    }

    if let Some(description) = &item.description {
        lines.push(section("Description"));
        lines.push(Line::from(description.clone()));
        lines.push(Line::from(""));
    }

    if app.is_expanded(item) {
        lines.push(section("Stats"));
        for (key, value) in &item.details {
            lines.push(label_line(key, value.to_string()));
        }
    } else if !item.details.is_empty() {
        lines.push(Line::from(Span::styled(
            "  [Enter] Show stats",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Details "))
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}

fn requirement_lines(app: &App, item: &CatalogItem) -> Vec<Line<'static>> {
    let requirements = item.requirement_list();
    if requirements.is_empty() {
        return Vec::new();
    }

    let unmet = app.build.unmet_requirements(item);
    let mut lines = vec![section("Requirements")];
    for req in &requirements {
        let short = unmet
            .iter()
            .find(|u| Some(u.attribute) == req.attribute() && req.threshold() == Some(u.required));
        let line = match short {
            Some(u) => Line::from(vec![
                Span::styled(format!("  {}", req), Style::default().fg(Color::Red)),
                Span::styled(
                    format!("  (have {}, need {} more)", u.current, u.shortfall()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            None => Line::from(Span::styled(
                format!("  {}", req),
                Style::default().fg(Color::Green),
            )),
        };
        lines.push(line);
    }
    lines.push(Line::from(""));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_offset() {
        assert_eq!(scroll_offset(0), 0);
        assert_eq!(scroll_offset(25), 5);
        assert_eq!(scroll_offset(usize::MAX), u16::MAX);
    }
}
