use crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::*;

/// Modal panel listing key bindings. Any of Esc, `q`, `?` or Enter closes it.
pub struct HelpOverlay {
    content: String,
    dismissed: bool,
}

impl HelpOverlay {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            dismissed: false,
        }
    }

    /// Handle a key press. Returns true if the overlay consumed the key.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Enter => {
                self.dismissed = true;
                true
            }
            _ => false,
        }
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }

    /// Render into `area`; centering is the caller's job.
    pub fn render_content(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Help ");
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

        Paragraph::new(self.content.as_str())
            .wrap(Wrap { trim: false })
            .render(layout[0], buf);

        let footer = Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Yellow).bold()),
            Span::styled(" to close", Style::default().fg(Color::DarkGray)),
        ]);
        Paragraph::new(footer)
            .alignment(Alignment::Center)
            .render(layout[1], buf);
    }
}
