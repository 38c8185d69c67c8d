use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::joke::Joke;

/// Renders the current joke with its favorite indicator.
pub struct JokePane {
    text: String,
    favorited: bool,
    fetching: bool,
}

impl JokePane {
    pub fn new() -> Self {
        Self {
            text: Joke::placeholder().text,
            favorited: false,
            fetching: false,
        }
    }

    pub fn set_joke(&mut self, joke: &Joke, favorited: bool) {
        self.text = joke.text.clone();
        self.favorited = favorited;
    }

    pub fn set_fetching(&mut self, fetching: bool) {
        self.fetching = fetching;
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching
    }

    pub fn is_favorited(&self) -> bool {
        self.favorited
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Widget for &JokePane {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .title(" icanhazdadjoke? ");
        if self.fetching {
            block = block.title_top(
                Line::from(Span::styled(
                    " fetching... ",
                    Style::default().fg(Color::Yellow),
                ))
                .right_aligned(),
            );
        }
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

        Paragraph::new(self.text.as_str())
            .style(Style::default().add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(layout[0], buf);

        let heart = if self.favorited {
            Line::from(vec![
                Span::styled("\u{2665}", Style::default().fg(Color::Red).bold()),
                Span::styled(" in favorites", Style::default().fg(Color::Red)),
            ])
        } else {
            Line::from(vec![
                Span::styled("\u{2661}", Style::default().fg(Color::DarkGray)),
                Span::styled(" f to favorite", Style::default().fg(Color::DarkGray)),
            ])
        };
        Paragraph::new(heart)
            .alignment(Alignment::Center)
            .render(layout[1], buf);
    }
}
