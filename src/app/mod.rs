pub mod help;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::Clear;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::config::Config;
use crate::controller::{FetchOutcome, FetchTicket, JokeController};
use crate::favorites::{FavoritesStore, FileStorage};
use crate::joke::{FetchError, HttpJokeClient, Joke, JokeSource};
use crate::keys::{KeyAction, map_key};
use crate::ui::overlay::{HelpOverlay, centered_rect};
use crate::ui::{FavoritesPane, JokePane, MenuBar, NoticeKind, StatusLine};

/// Application state machine states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppState {
    Default,
    Help,
}

/// A finished fetch on its way back from the background task.
type FetchMessage = (FetchTicket, Result<Joke, FetchError>);

pub struct App<S: JokeSource + 'static> {
    // State
    state: AppState,
    running: bool,
    controller: JokeController,

    // Fetching
    source: Arc<S>,
    fetch_tx: UnboundedSender<FetchMessage>,
    fetch_rx: UnboundedReceiver<FetchMessage>,

    // UI components
    joke: JokePane,
    favorites: FavoritesPane,
    menu: MenuBar,
    status: StatusLine,

    // Overlays
    help_overlay: Option<HelpOverlay>,
}

impl<S: JokeSource + 'static> App<S> {
    pub fn new(controller: JokeController, source: Arc<S>) -> Self {
        let (fetch_tx, fetch_rx) = unbounded_channel();
        Self {
            state: AppState::Default,
            running: true,
            controller,
            source,
            fetch_tx,
            fetch_rx,
            joke: JokePane::new(),
            favorites: FavoritesPane::new(),
            menu: MenuBar::new(),
            status: StatusLine::new(),
            help_overlay: None,
        }
    }

    /// Run the main TUI event loop.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()>
    where
        B::Error: Send + Sync + 'static,
    {
        self.launch();

        while self.running {
            terminal.draw(|frame| self.draw(frame))?;

            if event::poll(Duration::from_millis(100))? {
                self.handle_event(event::read()?);
            }

            self.drain_fetches();
        }
        Ok(())
    }

    /// Load saved favorites, then fetch the first joke.
    fn launch(&mut self) {
        if let Err(e) = self.controller.load_favorites() {
            self.status
                .set_error(format!("Could not load favorites: {}", e));
        }
        self.sync_views();
        self.favorites.select_last();
        self.request_joke();
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            // Losing focus is the terminal's version of going to the background.
            Event::FocusLost => self.persist_favorites(),
            _ => {}
        }
    }

    /// Handle a raw key event by routing to the current state.
    fn handle_key(&mut self, key: KeyEvent) {
        match self.state {
            AppState::Help => self.handle_help_key(key.code),
            AppState::Default => {
                if let Some(action) = map_key(key) {
                    self.handle_key_action(action);
                }
            }
        }
    }

    /// Handle a mapped key action in Default state.
    fn handle_key_action(&mut self, action: KeyAction) {
        self.menu.highlight(action);
        match action {
            KeyAction::Up => self.favorites.select_previous(),
            KeyAction::Down => self.favorites.select_next(),
            KeyAction::Another => self.request_joke(),
            KeyAction::Favorite => self.favorite_current(),
            KeyAction::Save => self.persist_favorites(),
            KeyAction::Quit => {
                self.persist_favorites();
                self.running = false;
            }
            KeyAction::Help => {
                self.state = AppState::Help;
                self.help_overlay = Some(HelpOverlay::new(help::help_text()));
            }
            KeyAction::Cancel => self.status.clear(),
        }
    }

    fn handle_help_key(&mut self, key: KeyCode) {
        if let Some(ref mut overlay) = self.help_overlay {
            overlay.handle_key(key);

            if overlay.is_dismissed() {
                self.help_overlay = None;
                self.state = AppState::Default;
            }
        }
    }

    // ── Joke actions ────────────────────────────────────────────────

    /// Start a background fetch unless one is already outstanding.
    fn request_joke(&mut self) {
        let Some(ticket) = self.controller.begin_fetch() else {
            self.status.set_info("Still waiting on the last joke...");
            return;
        };
        self.joke.set_fetching(true);

        let source = Arc::clone(&self.source);
        let tx = self.fetch_tx.clone();
        tokio::spawn(async move {
            let result = source.fetch_joke().await;
            // The receiver only goes away when the app is shutting down.
            let _ = tx.send((ticket, result));
        });
    }

    /// Apply any fetch results that arrived since the last tick.
    fn drain_fetches(&mut self) {
        while let Ok((ticket, result)) = self.fetch_rx.try_recv() {
            self.handle_fetch_result(ticket, result);
        }
    }

    fn handle_fetch_result(&mut self, ticket: FetchTicket, result: Result<Joke, FetchError>) {
        match self.controller.apply_fetch(ticket, result) {
            Ok(FetchOutcome::Applied) => {
                if self.status.kind() == Some(NoticeKind::Error) {
                    self.status.clear();
                }
            }
            Ok(FetchOutcome::Stale | FetchOutcome::Ignored) => {}
            Err(e) => {
                self.status
                    .set_error(format!("Could not fetch a joke: {}", e));
            }
        }
        self.sync_views();
    }

    fn favorite_current(&mut self) {
        if self.controller.favorite_current() {
            self.sync_views();
            self.favorites.select_last();
        }
    }

    fn persist_favorites(&mut self) {
        match self.controller.persist() {
            Ok(()) => self.status.set_info(format!(
                "Saved {} favorites",
                self.controller.favorite_count()
            )),
            Err(e) => self.status.set_error(e.to_string()),
        }
    }

    /// Push controller state into the widgets.
    fn sync_views(&mut self) {
        self.joke
            .set_joke(self.controller.current(), self.controller.is_favorited());
        self.joke.set_fetching(self.controller.is_fetching());
        self.favorites.set_items(self.controller.favorites());
    }

    /// Draw all UI components.
    fn draw(&self, frame: &mut Frame) {
        let area = frame.area();

        let constraints = if self.status.is_visible() {
            vec![
                Constraint::Percentage(40), // joke
                Constraint::Min(3),         // favorites
                Constraint::Length(3),      // status
                Constraint::Length(1),      // menu bar
            ]
        } else {
            vec![
                Constraint::Percentage(40),
                Constraint::Min(3),
                Constraint::Length(1),
            ]
        };
        let layout = Layout::vertical(constraints).split(area);

        frame.render_widget(&self.joke, layout[0]);
        frame.render_widget(&self.favorites, layout[1]);

        if self.status.is_visible() {
            frame.render_widget(&self.status, layout[2]);
            frame.render_widget(&self.menu, layout[3]);
        } else {
            frame.render_widget(&self.menu, layout[2]);
        }

        if let (AppState::Help, Some(overlay)) = (self.state, &self.help_overlay) {
            let popup_area = centered_rect(60, 70, area);
            frame.render_widget(Clear, popup_area);
            overlay.render_content(popup_area, frame.buffer_mut());
        }
    }
}

/// Set up terminal, run the TUI app, and restore terminal on exit.
pub fn run(config: Config, config_dir: PathBuf) -> anyhow::Result<()> {
    let client = HttpJokeClient::new(&config.endpoint, &config.user_agent)?;
    let storage = FileStorage::new(&config.favorites_path(&config_dir));
    tracing::info!(
        "Starting TUI against {}, favorites in {}",
        client.endpoint(),
        storage.path().display()
    );
    let controller = JokeController::new(FavoritesStore::new(Box::new(storage)));

    crossterm::terminal::enable_raw_mode()?;
    let _restore = TerminalGuard::new(restore_terminal);
    let mut stdout = std::io::stdout();
    crossterm::execute!(
        stdout,
        crossterm::terminal::EnterAlternateScreen,
        crossterm::event::EnableFocusChange
    )?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(controller, Arc::new(client));
    app.run(&mut terminal)
}

fn restore_terminal() -> std::io::Result<()> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(
        std::io::stdout(),
        crossterm::event::DisableFocusChange,
        crossterm::terminal::LeaveAlternateScreen
    )
}

/// Runs `restore` exactly once when dropped, including during unwinding.
struct TerminalGuard<F: FnMut() -> std::io::Result<()>> {
    restore: F,
}

impl<F: FnMut() -> std::io::Result<()>> TerminalGuard<F> {
    fn new(restore: F) -> Self {
        Self { restore }
    }
}

impl<F: FnMut() -> std::io::Result<()>> Drop for TerminalGuard<F> {
    fn drop(&mut self) {
        if let Err(e) = (self.restore)() {
            tracing::error!("Failed to restore terminal: {}", e);
        }
    }
}

// ── Test support ────────────────────────────────────────────────────

#[cfg(test)]
impl<S: JokeSource + 'static> App<S> {
    /// Wait for the outstanding background fetch and apply it.
    async fn settle_fetch(&mut self) {
        if let Some((ticket, result)) = self.fetch_rx.recv().await {
            self.handle_fetch_result(ticket, result);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::test_support::{ScriptedSource, decode_error};
    use crate::favorites::FavoritesStorage;
    use crossterm::event::KeyModifiers;
    use tempfile::TempDir;

    fn chicken() -> Joke {
        Joke::new("abc", "Why did the chicken cross the road?", 200)
    }

    fn test_app(
        tmp: &TempDir,
        results: Vec<Result<Joke, FetchError>>,
    ) -> App<ScriptedSource> {
        let storage = FileStorage::new(&tmp.path().join("favorites.json"));
        let controller = JokeController::new(FavoritesStore::new(Box::new(storage)));
        App::new(controller, Arc::new(ScriptedSource::new(results)))
    }

    fn press(app: &mut App<ScriptedSource>, code: KeyCode) {
        app.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    #[tokio::test]
    async fn test_launch_loads_favorites_and_fetches() {
        let tmp = TempDir::new().unwrap();
        FileStorage::new(&tmp.path().join("favorites.json"))
            .save_favorites(&[Joke::new("old", "An old favorite", 200)])
            .unwrap();

        let mut app = test_app(&tmp, vec![Ok(chicken())]);
        app.launch();
        assert!(app.joke.is_fetching());
        assert_eq!(app.favorites.num_items(), 1);

        app.settle_fetch().await;
        assert!(!app.joke.is_fetching());
        assert_eq!(app.joke.text(), chicken().text);
        assert_eq!(app.controller.current(), &chicken());
    }

    #[tokio::test]
    async fn test_launch_with_corrupt_favorites_reports_and_continues() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("favorites.json"), "{ not json").unwrap();

        let mut app = test_app(&tmp, vec![Ok(chicken())]);
        app.launch();
        assert_eq!(app.status.kind(), Some(NoticeKind::Error));
        assert!(app.controller.favorites().is_empty());

        app.settle_fetch().await;
        assert_eq!(app.controller.current(), &chicken());
    }

    #[tokio::test]
    async fn test_favorite_key_appends_once() {
        let tmp = TempDir::new().unwrap();
        let mut app = test_app(&tmp, vec![Ok(chicken())]);
        app.launch();
        app.settle_fetch().await;

        press(&mut app, KeyCode::Char('f'));
        press(&mut app, KeyCode::Char('f'));

        assert_eq!(app.controller.favorites(), &[chicken()]);
        assert_eq!(app.favorites.num_items(), 1);
        assert!(app.joke.is_favorited());
    }

    #[tokio::test]
    async fn test_another_joke_resets_heart() {
        let tmp = TempDir::new().unwrap();
        let mut app = test_app(
            &tmp,
            vec![Ok(chicken()), Ok(Joke::new("def", "Second joke", 200))],
        );
        app.launch();
        app.settle_fetch().await;
        press(&mut app, KeyCode::Char('f'));

        press(&mut app, KeyCode::Char('n'));
        app.settle_fetch().await;

        assert_eq!(app.joke.text(), "Second joke");
        assert!(!app.joke.is_favorited());
        assert_eq!(app.controller.favorites().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_shows_error_and_keeps_joke() {
        let tmp = TempDir::new().unwrap();
        let mut app = test_app(&tmp, vec![Ok(chicken()), Err(decode_error())]);
        app.launch();
        app.settle_fetch().await;

        press(&mut app, KeyCode::Char('n'));
        app.settle_fetch().await;

        assert_eq!(app.controller.current(), &chicken());
        assert_eq!(app.status.kind(), Some(NoticeKind::Error));
        assert!(app.status.message().unwrap().starts_with("Could not fetch a joke"));
        assert!(!app.joke.is_fetching());
    }

    #[tokio::test]
    async fn test_another_while_fetching_is_ignored() {
        let tmp = TempDir::new().unwrap();
        let mut app = test_app(&tmp, vec![Ok(chicken()), Ok(Joke::new("x", "x", 200))]);
        app.launch();

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.status.kind(), Some(NoticeKind::Info));

        app.settle_fetch().await;
        assert_eq!(app.controller.current(), &chicken());
        assert!(app.fetch_rx.try_recv().is_err(), "only one fetch should run");
    }

    #[tokio::test]
    async fn test_focus_lost_persists_favorites() {
        let tmp = TempDir::new().unwrap();
        let mut app = test_app(&tmp, vec![Ok(chicken())]);
        app.launch();
        app.settle_fetch().await;
        press(&mut app, KeyCode::Char('f'));

        app.handle_event(Event::FocusLost);

        let saved = FileStorage::new(&tmp.path().join("favorites.json"))
            .load_favorites()
            .unwrap();
        assert_eq!(saved, vec![chicken()]);
        assert_eq!(app.status.message(), Some("Saved 1 favorites"));
    }

    #[tokio::test]
    async fn test_quit_persists_and_stops() {
        let tmp = TempDir::new().unwrap();
        let mut app = test_app(&tmp, vec![Ok(chicken())]);
        app.launch();
        app.settle_fetch().await;
        press(&mut app, KeyCode::Char('f'));

        press(&mut app, KeyCode::Char('q'));

        assert!(!app.running);
        assert!(tmp.path().join("favorites.json").exists());
    }

    #[tokio::test]
    async fn test_save_failure_is_reported_not_fatal() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let storage = FileStorage::new(&blocker.join("favorites.json"));
        let controller = JokeController::new(FavoritesStore::new(Box::new(storage)));
        let mut app = App::new(controller, Arc::new(ScriptedSource::new(vec![])));

        press(&mut app, KeyCode::Char('f'));
        press(&mut app, KeyCode::Char('q'));

        assert!(!app.running);
        assert_eq!(app.status.kind(), Some(NoticeKind::Error));
        assert_eq!(app.controller.favorites().len(), 1);
    }

    #[tokio::test]
    async fn test_help_toggle() {
        let tmp = TempDir::new().unwrap();
        let mut app = test_app(&tmp, vec![]);

        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.state, AppState::Help);
        assert!(app.help_overlay.is_some());

        // Keys go to the overlay while it is open.
        press(&mut app, KeyCode::Char('f'));
        assert!(app.controller.favorites().is_empty());

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state, AppState::Default);
        assert!(app.help_overlay.is_none());
    }

    #[tokio::test]
    async fn test_escape_clears_status() {
        let tmp = TempDir::new().unwrap();
        let mut app = test_app(&tmp, vec![]);
        app.status.set_error("boom");

        press(&mut app, KeyCode::Esc);
        assert!(!app.status.is_visible());
    }

    #[tokio::test]
    async fn test_navigation_moves_through_favorites() {
        let tmp = TempDir::new().unwrap();
        let mut app = test_app(&tmp, vec![]);
        app.favorites.set_items(&[chicken(), chicken(), chicken()]);

        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.favorites.selected_index(), 1);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.favorites.selected_index(), 2);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.favorites.selected_index(), 1);
    }

    #[tokio::test]
    async fn test_draw_renders_all_panes() {
        let tmp = TempDir::new().unwrap();
        let mut app = test_app(&tmp, vec![Ok(chicken())]);
        app.launch();
        app.settle_fetch().await;
        app.status.set_info("hello there");

        let backend = ratatui::backend::TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();

        let buf = terminal.backend().buffer();
        let mut content = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                content.push_str(buf.cell((x, y)).unwrap().symbol());
            }
        }
        assert!(content.contains("Why did the chicken cross the road?"));
        assert!(content.contains("Favorites (0)"));
        assert!(content.contains("hello there"));
        assert!(content.contains("n:Another"));
    }

    #[test]
    fn test_terminal_guard_restores_on_early_return() {
        fn setup(restored: &std::cell::Cell<u32>) -> std::io::Result<()> {
            let _restore = TerminalGuard::new(|| {
                restored.set(restored.get() + 1);
                Ok(())
            });
            Err(std::io::Error::other("alternate screen unavailable"))
        }

        let restored = std::cell::Cell::new(0);
        assert!(setup(&restored).is_err());
        assert_eq!(restored.get(), 1);
    }

    #[test]
    fn test_terminal_guard_restores_on_panic() {
        use std::sync::atomic::{AtomicU32, Ordering};

        let restored = AtomicU32::new(0);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _restore = TerminalGuard::new(|| {
                restored.fetch_add(1, Ordering::SeqCst);
                Ok(())
            });
            panic!("event loop blew up");
        }));
        assert!(result.is_err());
        assert_eq!(restored.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_terminal_guard_tolerates_restore_failure() {
        let mut calls = 0;
        {
            let _restore = TerminalGuard::new(|| {
                calls += 1;
                Err(std::io::Error::other("not a tty"))
            });
        }
        assert_eq!(calls, 1);
    }
}
