use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Transient message area for save confirmations and recovered failures.
pub struct StatusLine {
    notice: Option<(NoticeKind, String)>,
}

impl StatusLine {
    pub fn new() -> Self {
        Self { notice: None }
    }

    pub fn set_info(&mut self, msg: impl Into<String>) {
        self.notice = Some((NoticeKind::Info, msg.into()));
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.notice = Some((NoticeKind::Error, msg.into()));
    }

    pub fn clear(&mut self) {
        self.notice = None;
    }

    pub fn is_visible(&self) -> bool {
        self.notice.is_some()
    }

    pub fn kind(&self) -> Option<NoticeKind> {
        self.notice.as_ref().map(|(kind, _)| *kind)
    }

    pub fn message(&self) -> Option<&str> {
        self.notice.as_ref().map(|(_, msg)| msg.as_str())
    }
}

impl Widget for &StatusLine {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some((kind, msg)) = &self.notice else {
            return;
        };

        let (title, color, prefix) = match kind {
            NoticeKind::Info => ("Info", Color::Green, ""),
            NoticeKind::Error => ("Error", Color::Red, "Error: "),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(color));

        let text = Line::from(Span::styled(
            format!("{}{}", prefix, msg),
            Style::default().fg(color),
        ));

        Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .block(block)
            .render(area, buf);
    }
}
