use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, StatefulWidget};

use crate::joke::Joke;

/// A selectable list pane showing favorited jokes, oldest first.
pub struct FavoritesPane {
    selected: usize,
    items: Vec<ListItem<'static>>,
}

impl FavoritesPane {
    pub fn new() -> Self {
        Self {
            selected: 0,
            items: Vec::new(),
        }
    }

    /// Rebuild the rendered list items from the favorites.
    pub fn set_items(&mut self, jokes: &[Joke]) {
        self.items = jokes.iter().map(render_joke).collect();
        if !self.items.is_empty() && self.selected >= self.items.len() {
            self.selected = self.items.len() - 1;
        }
    }

    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.items.len();
    }

    pub fn select_previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        if self.selected == 0 {
            self.selected = self.items.len() - 1;
        } else {
            self.selected -= 1;
        }
    }

    /// Jump to the newest favorite.
    pub fn select_last(&mut self) {
        self.selected = self.items.len().saturating_sub(1);
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    fn list_state(&self) -> ListState {
        let mut state = ListState::default();
        if !self.items.is_empty() {
            state.select(Some(self.selected));
        }
        state
    }
}

impl StatefulWidget for &FavoritesPane {
    type State = ListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let title = format!(" Favorites ({}) ", self.items.len());
        let block = Block::default().borders(Borders::ALL).title(title);

        if self.items.is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            Line::from(Span::styled(
                "No favorites yet",
                Style::default().add_modifier(Modifier::DIM),
            ))
            .render(inner, buf);
            return;
        }

        let list = List::new(self.items.clone())
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▸ ");

        StatefulWidget::render(list, area, buf, state);
    }
}

impl Widget for &FavoritesPane {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut state = self.list_state();
        StatefulWidget::render(self, area, buf, &mut state);
    }
}

fn render_joke(joke: &Joke) -> ListItem<'static> {
    let spans = vec![
        Span::styled("\u{2665}", Style::default().fg(Color::Red)),
        Span::raw(" "),
        Span::raw(joke.text.replace('\n', " ")),
    ];
    ListItem::new(Line::from(spans))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jokes(n: usize) -> Vec<Joke> {
        (0..n)
            .map(|i| Joke::new(format!("id{i}"), format!("joke number {i}"), 200))
            .collect()
    }

    fn buffer_to_string(buf: &Buffer) -> String {
        let mut s = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                s.push_str(buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "));
            }
            s.push('\n');
        }
        s
    }

    #[test]
    fn test_favorites_navigation() {
        let mut pane = FavoritesPane::new();
        pane.set_items(&jokes(3));

        assert_eq!(pane.selected_index(), 0);
        assert_eq!(pane.num_items(), 3);

        pane.select_next();
        assert_eq!(pane.selected_index(), 1);

        pane.select_next();
        pane.select_next();
        assert_eq!(pane.selected_index(), 0, "should wrap forward");

        pane.select_previous();
        assert_eq!(pane.selected_index(), 2, "should wrap backward");

        pane.select_previous();
        assert_eq!(pane.selected_index(), 1);
    }

    #[test]
    fn test_favorites_empty() {
        let mut pane = FavoritesPane::new();
        pane.select_next();
        pane.select_previous();
        pane.select_last();
        assert_eq!(pane.selected_index(), 0);

        let area = Rect::new(0, 0, 40, 4);
        let mut buf = Buffer::empty(area);
        Widget::render(&pane, area, &mut buf);
        assert!(buffer_to_string(&buf).contains("No favorites yet"));
    }

    #[test]
    fn test_favorites_select_last() {
        let mut pane = FavoritesPane::new();
        pane.set_items(&jokes(4));
        pane.select_last();
        assert_eq!(pane.selected_index(), 3);
    }

    #[test]
    fn test_favorites_render_lists_jokes() {
        let mut pane = FavoritesPane::new();
        pane.set_items(&jokes(2));

        let area = Rect::new(0, 0, 40, 5);
        let mut buf = Buffer::empty(area);
        Widget::render(&pane, area, &mut buf);

        let content = buffer_to_string(&buf);
        assert!(content.contains("Favorites (2)"));
        assert!(content.contains("joke number 0"));
        assert!(content.contains("joke number 1"));
    }
}
