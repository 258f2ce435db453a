use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let viewport = app.viewport();

        let mode_str = match app.mode {
            Mode::Help => "HELP",
            Mode::Normal if app.is_riding() => "GOING UP",
            Mode::Normal => "NORMAL",
        };

        let max_row = viewport.layout().total_rows().saturating_sub(viewport.height());
        let percent = if max_row == 0 {
            100
        } else {
            (viewport.row() as u32 * 100 / max_row as u32).min(100)
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {} ", msg)
        } else {
            format!(" {} | {}% ", mode_str, percent)
        };

        let right = if app.muzak.is_playing() {
            let width = (area.width as usize / 3).max(8);
            format!(" {} ", app.muzak.ticker(app.tick, width))
        } else if viewport.at_bottom() && !app.is_riding() {
            " <CR>:ride the elevator q:quit ?:help ".to_string()
        } else {
            " j/k:scroll G:bottom q:quit ?:help ".to_string()
        };

        let padding_len = (area.width as usize)
            .saturating_sub(status_text.width() + right.width());

        let line = Line::from(vec![
            Span::styled(
                status_text,
                Style::default()
                    .fg(theme.fg0)
                    .bg(theme.bg2)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(
                right,
                Style::default().fg(if app.muzak.is_playing() { theme.accent } else { theme.dim }).bg(theme.bg2),
            ),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
