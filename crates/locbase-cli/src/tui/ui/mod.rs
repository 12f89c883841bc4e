//! Layout and rendering for the location screen.
//!
//! The screen consists of:
//!
//! - **App bar**: title and the dark-mode switch
//! - **Actions**: "Capture location" and "Clear locations" buttons
//! - **List**: one entry per saved location
//! - **Status bar**: activity, status messages, key hints and clock

pub mod theme;

mod overlays;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use time::OffsetDateTime;
use time::macros::format_description;

use super::app::{Activity, App};
use theme::{AppTheme, BORDER_TYPE};

/// Title shown in the app bar.
pub const APP_TITLE: &str = "My Location BASE";

/// Draw the complete TUI interface.
pub fn draw(frame: &mut Frame, app: &App) {
    let theme = app.app_theme();
    frame.render_widget(Block::default().style(theme.base_style()), frame.area());

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // App bar
            Constraint::Length(3), // Action buttons
            Constraint::Min(3),    // Location list
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_app_bar(frame, layout[0], app, &theme);
    draw_actions(frame, layout[1], app, &theme);
    draw_locations(frame, layout[2], app, &theme);
    draw_status_bar(frame, layout[3], app, &theme);

    if app.show_help {
        overlays::draw_help_overlay(frame, &theme);
    }

    // Confirmation dialog (on top of everything)
    overlays::draw_confirmation_dialog(frame, app, &theme);
}

fn draw_app_bar(frame: &mut Frame, area: Rect, app: &App, theme: &AppTheme) {
    let switch = if app.dark_mode {
        Span::styled(
            " Dark mode [ON ] ",
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(" Dark mode [OFF] ", Style::default().fg(theme.text_muted))
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(18)])
        .split(area);

    let title = Paragraph::new(Line::from(Span::styled(
        format!(" {} ", APP_TITLE),
        theme.title_style(),
    )))
    .style(theme.header_style());
    frame.render_widget(title, columns[0]);

    let switch = Paragraph::new(Line::from(switch))
        .style(theme.header_style())
        .alignment(Alignment::Right);
    frame.render_widget(switch, columns[1]);
}

/// Label for an action button, replaced by a spinner while it runs.
fn button_label(app: &App, running: Activity, label: &str) -> String {
    if app.activity == running {
        format!("{} {}", app.spinner_char(), running.label())
    } else {
        label.to_string()
    }
}

fn draw_actions(frame: &mut Frame, area: Rect, app: &App, theme: &AppTheme) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let enabled = !app.is_busy();
    let buttons = [
        (
            button_label(app, Activity::Capturing, "Capture location"),
            "c",
            theme.primary,
        ),
        (
            button_label(app, Activity::Clearing, "Clear locations"),
            "x",
            theme.danger,
        ),
    ];

    for ((label, key, color), column) in buttons.into_iter().zip(columns.iter()) {
        let (border_style, text_style) = if enabled {
            (
                Style::default().fg(color),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )
        } else {
            (
                theme.border_inactive_style(),
                Style::default().fg(theme.text_muted),
            )
        };

        let button = Paragraph::new(Line::from(vec![
            Span::styled(label, text_style),
            Span::styled(format!("  ({})", key), Style::default().fg(theme.text_muted)),
        ]))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BORDER_TYPE)
                .border_style(border_style),
        );
        frame.render_widget(button, *column);
    }
}

fn draw_locations(frame: &mut Frame, area: Rect, app: &App, theme: &AppTheme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BORDER_TYPE)
        .border_style(theme.border_active_style())
        .title(Span::styled(
            format!(" Locations ({}) ", app.locations.len()),
            theme.title_style(),
        ));

    if app.locations.is_empty() {
        let message = if app.activity == Activity::Loading {
            "Loading..."
        } else {
            "No locations yet. Press c to capture one."
        };
        let empty = Paragraph::new(Span::styled(message, Style::default().fg(theme.text_muted)))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .locations
        .iter()
        .map(|record| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    record.title(),
                    Style::default()
                        .fg(theme.text_primary)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("  {}", record.description()),
                    Style::default().fg(theme.text_secondary),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(theme.selected_style())
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(app.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App, theme: &AppTheme) {
    let left_spans = if app.is_busy() {
        vec![
            Span::styled(
                format!(" {} ", app.spinner_char()),
                Style::default().fg(theme.primary),
            ),
            Span::styled(app.activity.label(), Style::default().fg(theme.text_secondary)),
        ]
    } else if let Some(msg) = app.current_status_message() {
        vec![Span::styled(
            format!(" {}", msg),
            Style::default().fg(theme.text_secondary),
        )]
    } else {
        let hints = [
            ("c", "capture"),
            ("x", "clear"),
            ("t", "theme"),
            ("?", "help"),
            ("q", "quit"),
        ];
        let mut spans = vec![Span::raw(" ")];
        for (i, (key, desc)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", Style::default().fg(theme.text_muted)));
            }
            spans.push(Span::styled(
                *key,
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                format!(" {}", desc),
                Style::default().fg(theme.text_muted),
            ));
        }
        spans
    };

    let status_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(10)])
        .split(area);

    frame.render_widget(Paragraph::new(Line::from(left_spans)), status_layout[0]);

    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let time_str = now
        .format(format_description!("[hour]:[minute]:[second]"))
        .unwrap_or_default();
    let right = Paragraph::new(time_str)
        .style(Style::default().fg(theme.text_muted))
        .alignment(Alignment::Right);
    frame.render_widget(right, status_layout[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::messages::AppEvent;
    use locbase_types::{Coordinate, LocationRecord};
    use ratatui::backend::TestBackend;
    use tokio::sync::mpsc;

    fn render(app: &App) -> String {
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn app() -> App {
        let (_tx, rx) = mpsc::channel(1);
        App::new(rx)
    }

    #[test]
    fn test_renders_title_and_actions() {
        let screen = render(&app());
        assert!(screen.contains(APP_TITLE));
        assert!(screen.contains("Capture location"));
        assert!(screen.contains("Clear locations"));
        assert!(screen.contains("Dark mode [OFF]"));
    }

    #[test]
    fn test_renders_records() {
        let mut app = app();
        app.handle_event(AppEvent::LocationsLoaded {
            records: vec![LocationRecord::new(7, Coordinate::new(1.5, 2.5))],
        });
        let screen = render(&app);
        assert!(screen.contains("Location 7"));
        assert!(screen.contains("Latitude: 1.5 | Longitude: 2.5"));
    }

    #[test]
    fn test_renders_dark_switch_and_spinner() {
        let mut app = app();
        app.toggle_dark_mode();
        app.request_capture();
        let screen = render(&app);
        assert!(screen.contains("Dark mode [ON ]"));
        assert!(screen.contains("Capturing location..."));
    }
}
