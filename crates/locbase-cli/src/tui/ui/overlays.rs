//! Overlay widgets drawn on top of the location screen.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::theme::{AppTheme, BORDER_TYPE};
use crate::tui::app::{App, PendingAction};

/// Draw help overlay with keyboard shortcuts.
pub(super) fn draw_help_overlay(frame: &mut Frame, theme: &AppTheme) {
    let area = frame.area();
    let width = 44.min(area.width.saturating_sub(2));
    let height = 13.min(area.height.saturating_sub(2));
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;

    let help_area = Rect::new(x, y, width, height);
    frame.render_widget(Clear, help_area);

    let lines = vec![
        Line::from(""),
        shortcut_line("c/Enter", "Capture location", theme),
        shortcut_line("x/Del", "Clear locations", theme),
        shortcut_line("t/d", "Toggle dark mode", theme),
        shortcut_line("j/Down", "Next location", theme),
        shortcut_line("k/Up", "Previous location", theme),
        shortcut_line("?", "Toggle this help", theme),
        shortcut_line("Esc", "Close / cancel", theme),
        shortcut_line("q", "Quit", theme),
        Line::from(""),
    ];

    let help = Paragraph::new(lines).style(theme.base_style()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BORDER_TYPE)
            .border_style(theme.border_active_style())
            .title(Span::styled(" Keyboard Shortcuts ", theme.title_style())),
    );
    frame.render_widget(help, help_area);
}

/// Create a shortcut line with key and description.
fn shortcut_line<'a>(key: &str, desc: &str, theme: &AppTheme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:>10} ", key), Style::default().fg(theme.warning)),
        Span::styled(desc.to_string(), Style::default().fg(theme.text_secondary)),
    ])
}

/// Draw confirmation dialog overlay.
pub(super) fn draw_confirmation_dialog(frame: &mut Frame, app: &App, theme: &AppTheme) {
    let Some(action) = &app.pending_confirmation else {
        return;
    };

    let message = match action {
        PendingAction::ClearLocations if app.locations.is_empty() => {
            "Delete all saved locations?".to_string()
        }
        PendingAction::ClearLocations => {
            format!("Delete all {} saved locations?", app.locations.len())
        }
    };

    let area = frame.area();
    let dialog_width = 44.min(area.width.saturating_sub(4));
    let dialog_height = 6;
    let dialog_x = (area.width.saturating_sub(dialog_width)) / 2;
    let dialog_y = (area.height.saturating_sub(dialog_height)) / 2;
    let dialog_area = Rect::new(dialog_x, dialog_y, dialog_width, dialog_height);

    frame.render_widget(Clear, dialog_area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            message,
            Style::default().fg(theme.text_primary),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                " [Y]es ",
                Style::default()
                    .fg(theme.success)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                " [N]o ",
                Style::default()
                    .fg(theme.danger)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    let dialog = Paragraph::new(lines)
        .style(theme.base_style())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BORDER_TYPE)
                .border_style(Style::default().fg(theme.warning))
                .title(Span::styled(
                    " Confirm ",
                    Style::default()
                        .fg(theme.warning)
                        .add_modifier(Modifier::BOLD),
                )),
        );

    frame.render_widget(dialog, dialog_area);
}
