use crate::ui::theme::{
    GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, STATUS_ERROR, STATUS_OK, STATUS_WARN,
};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Figures shown in the header bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderStats {
    pub total: usize,
    pub areas: usize,
    pub matching: usize,
    pub shown: usize,
    pub background: bool,
    pub failed: bool,
}

pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }

    pub fn widget(&self, stats: HeaderStats) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        // Yellow: pages render on the UI thread only.
        let marker_color = if stats.failed {
            STATUS_ERROR
        } else if stats.background {
            STATUS_OK
        } else {
            STATUS_WARN
        };

        let line = Line::from(vec![
            Span::styled("  ", text_style),
            Span::styled("●", Style::default().fg(marker_color)),
            Span::styled("  Retail Directory", text_style),
            Span::styled("  │  ", separator_style),
            Span::styled(format!("{} retailers", stats.total), text_style),
            Span::styled("  │  ", separator_style),
            Span::styled(format!("{} areas", stats.areas), text_style),
            Span::styled("  │  ", separator_style),
            Span::styled(
                format!("showing {} of {}", stats.shown, stats.matching),
                text_style,
            ),
        ]);

        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}
