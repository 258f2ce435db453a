use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use elevator_core::config::KeymapConfig;

use crate::theme::Theme;

pub struct PopupWidget;

impl PopupWidget {
    /// Render the key help popup
    pub fn render_help(frame: &mut Frame, keymap: &KeymapConfig, theme: &Theme) {
        let area = frame.area();

        let entries = help_entries(keymap);
        let popup_width = 44u16.min(area.width.saturating_sub(4));
        let popup_height = (entries.len() as u16 + 4).min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        // Clear the background area
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Keys ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg1));

        let mut lines: Vec<Line> = entries
            .into_iter()
            .map(|(key, what)| {
                Line::from(vec![
                    Span::styled(
                        format!("{:>8}  ", key),
                        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(what, Style::default().fg(theme.fg0)),
                ])
            })
            .collect();
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "any key to close",
            Style::default().fg(theme.dim),
        )));

        let paragraph = Paragraph::new(lines).block(block);
        frame.render_widget(paragraph, popup_area);
    }
}

fn help_entries(keymap: &KeymapConfig) -> Vec<(String, &'static str)> {
    vec![
        (format!("{}/{}", keymap.move_down, keymap.move_up), "scroll a line"),
        (format!("{}/{}", keymap.scroll_half_down, keymap.scroll_half_up), "half page"),
        (format!("{}/{}", keymap.scroll_page_down, keymap.scroll_page_up), "full page"),
        (format!("{}/{}", keymap.jump_to_top, keymap.jump_to_bottom), "top / bottom"),
        (format!("{}/e", keymap.elevate), "ride the elevator"),
        (keymap.open_link.clone(), "open the project page"),
        (keymap.help.clone(), "this help"),
        (keymap.quit.clone(), "quit"),
    ]
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
