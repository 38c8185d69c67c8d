use std::time::{Duration, Instant};

use ratatui::prelude::*;

use crate::keys::KeyAction;

const HIGHLIGHT_DURATION: Duration = Duration::from_millis(500);

/// Shows available key bindings at the bottom of the screen.
pub struct MenuBar {
    highlighted: Option<(KeyAction, Instant)>,
}

impl MenuBar {
    pub fn new() -> Self {
        Self { highlighted: None }
    }

    /// Flash the entry for `action` briefly.
    pub fn highlight(&mut self, action: KeyAction) {
        self.highlighted = Some((action, Instant::now()));
    }
}

/// Key binding entries displayed in the menu bar.
const MENU_ITEMS: &[(KeyAction, &str)] = &[
    (KeyAction::Another, "Another"),
    (KeyAction::Favorite, "Favorite"),
    (KeyAction::Save, "Save"),
    (KeyAction::Down, "Browse"),
    (KeyAction::Help, "Help"),
    (KeyAction::Quit, "Quit"),
];

impl Widget for &MenuBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let active = self
            .highlighted
            .and_then(|(action, t)| (t.elapsed() < HIGHLIGHT_DURATION).then_some(action));

        let mut spans: Vec<Span<'_>> = Vec::new();

        for (i, (action, desc)) in MENU_ITEMS.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            let key_style = if active == Some(*action) {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            spans.push(Span::styled(action.key_label(), key_style));
            spans.push(Span::raw(":"));
            spans.push(Span::styled(
                *desc,
                Style::default().add_modifier(Modifier::DIM),
            ));
        }

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
