use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::app::App;
use crate::page::{PageRow, RowRole};
use crate::theme::Theme;

pub struct PageWidget;

impl PageWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let viewport = app.viewport();
        let riding = app.is_riding();

        let lines: Vec<Line> = viewport
            .layout()
            .rows()
            .skip(viewport.row() as usize)
            .take(area.height as usize)
            .map(|row| styled_row(row, theme, riding))
            .collect();

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().style(Style::default().bg(theme.bg0)));

        frame.render_widget(paragraph, area);
    }
}

fn styled_row(row: &PageRow, theme: &Theme, riding: bool) -> Line<'static> {
    let style = match row.role {
        RowRole::Blank | RowRole::Text => Style::default().fg(theme.fg0),
        RowRole::Title => Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        RowRole::Subtitle => Style::default().fg(theme.dim).add_modifier(Modifier::ITALIC),
        RowRole::Tagline => Style::default().fg(theme.fg1),
        RowRole::Credit => Style::default().fg(theme.dim),
        RowRole::Link => Style::default().fg(theme.info).add_modifier(Modifier::UNDERLINED),
        RowRole::Art => Style::default().fg(theme.art),
        // The button goes dim while the elevator is busy
        RowRole::Button | RowRole::ButtonLabel if riding => Style::default().fg(theme.dim),
        RowRole::Button => Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        RowRole::ButtonLabel => Style::default()
            .fg(theme.bg0)
            .bg(theme.accent)
            .add_modifier(Modifier::BOLD),
    };

    let text = match row.role {
        RowRole::ButtonLabel => format!(" ▲ {} ", row.text),
        _ => row.text.clone(),
    };
    Line::from(Span::styled(text, style))
}
