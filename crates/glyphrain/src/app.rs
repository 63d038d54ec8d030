//! Animation driver: intro, rain loop and options menu.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use glyphrain_config::ConfigStore;
use glyphrain_core::{MAX_COLUMNS, MAX_ROWS, MIN_COLUMNS, MIN_ROWS, Settings};
use glyphrain_engine::{GridState, RAIN_GREEN, RainEngine};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Alignment, Constraint, Layout},
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
};

use crate::debug_info::DebugReport;
use crate::menu::{MenuAction, OptionsMenu};
use crate::update::UpdateMonitor;

/// Delay between two intro glyphs.
const INTRO_GLYPH_DELAY: Duration = Duration::from_millis(70);

/// How long the full intro banner stays up.
const INTRO_HOLD: Duration = Duration::from_millis(2500);

/// Redraw interval while the menu is open, so update results show up.
const MENU_POLL: Duration = Duration::from_millis(250);

/// Current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Intro { started: Instant },
    Rain,
    Menu,
}

/// Why the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    Quit,
    DurationReached,
}

/// Startup switches from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppOptions {
    /// Follow the terminal size instead of the configured grid size.
    pub fit_terminal: bool,
    pub show_intro: bool,
}

/// The application state: settings, grid, engine and menu.
#[derive(Debug)]
pub struct App {
    running: bool,
    mode: Mode,
    exit_reason: ExitReason,
    settings: Settings,
    grid: GridState,
    engine: RainEngine,
    menu: OptionsMenu,
    store: Option<ConfigStore>,
    updates: UpdateMonitor,
    options: AppOptions,
    /// Start of the rain, for the optional run duration.
    rain_started: Instant,
    terminal_size: Option<(u16, u16)>,
    /// Grid shape taken from the terminal with `--fit`, as (columns, rows).
    /// Never written back into `settings`, so it is not saved.
    fit_size: Option<(u16, u16)>,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(
        settings: Settings,
        mut engine: RainEngine,
        store: Option<ConfigStore>,
        updates: UpdateMonitor,
        options: AppOptions,
    ) -> Self {
        let grid = engine.new_grid(&settings);
        let mode = if options.show_intro {
            Mode::Intro {
                started: Instant::now(),
            }
        } else {
            Mode::Rain
        };
        Self {
            running: false,
            mode,
            exit_reason: ExitReason::Quit,
            settings,
            grid,
            engine,
            menu: OptionsMenu::new(),
            store,
            updates,
            options,
            rain_started: Instant::now(),
            terminal_size: None,
            fit_size: None,
        }
    }

    /// Queue a message for the next time the menu opens.
    pub fn notify(&mut self, message: impl Into<String>) {
        self.menu.set_message(message);
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<ExitReason> {
        let size = terminal.size()?;
        self.on_resize(size.width, size.height);
        self.running = true;
        self.rain_started = Instant::now();

        while self.running {
            match self.mode {
                Mode::Intro { started } => {
                    terminal.draw(|frame| self.render(frame))?;
                    if started.elapsed() >= intro_length() {
                        self.start_rain();
                    } else {
                        self.wait_for_events(INTRO_GLYPH_DELAY)?;
                    }
                }
                Mode::Rain => {
                    if self.duration_reached() {
                        log::info!("run duration reached");
                        self.exit_reason = ExitReason::DurationReached;
                        self.quit();
                        break;
                    }
                    self.engine.tick(&mut self.grid, &self.settings);
                    terminal.draw(|frame| self.render(frame))?;
                    let delay = self.engine.frame_delay(&self.settings);
                    self.wait_for_events(delay)?;
                }
                Mode::Menu => {
                    terminal.draw(|frame| self.render(frame))?;
                    self.wait_for_events(MENU_POLL)?;
                }
            }
        }

        let stats = self.engine.stats();
        log::debug!(
            "stopped after {} ticks ({} early resets, {} forced resets)",
            stats.ticks,
            stats.early_resets,
            stats.forced_resets
        );
        Ok(self.exit_reason)
    }

    /// Renders the current screen.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        match self.mode {
            Mode::Intro { started } => self.render_intro(frame, started),
            Mode::Rain => {
                let lines = glyphrain_engine::draw(&self.grid, &self.settings);
                frame.render_widget(Paragraph::new(lines), area);
            }
            Mode::Menu => {
                let lines = glyphrain_engine::draw(&self.grid, &self.settings);
                frame.render_widget(Paragraph::new(lines), area);
                self.menu
                    .render(frame, area, &self.settings, &self.updates.status());
            }
        }
    }

    /// Type out the banner one glyph at a time.
    fn render_intro(&self, frame: &mut Frame, started: Instant) {
        let banner = intro_banner();
        let shown = (started.elapsed().as_millis() / INTRO_GLYPH_DELAY.as_millis()) as usize;
        let text: String = banner.chars().take(shown).collect();

        let chunks = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .split(frame.area());
        let intro = Paragraph::new(Line::from(text))
            .style(Style::new().fg(RAIN_GREEN).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        frame.render_widget(intro, chunks[1]);
    }

    /// Wait up to `timeout`, handling input as it arrives.
    ///
    /// Returns early when a key quits, changes the mode, or edits the menu,
    /// so a stop request never waits out a full frame.
    fn wait_for_events(&mut self, timeout: Duration) -> color_eyre::Result<()> {
        let deadline = Instant::now() + timeout;
        let mode = self.mode;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() || !event::poll(remaining)? {
                return Ok(());
            }
            self.handle_event(event::read()?);
            if !self.running || self.mode != mode || self.mode == Mode::Menu {
                return Ok(());
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
            Event::Resize(width, height) => self.on_resize(width, height),
            _ => {}
        }
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        {
            self.quit();
            return;
        }

        match self.mode {
            Mode::Intro { .. } => self.start_rain(),
            Mode::Rain => match key.code {
                KeyCode::Char('o') | KeyCode::Char('O') => self.open_menu(),
                KeyCode::Char('q') | KeyCode::Esc => self.quit(),
                _ => {}
            },
            Mode::Menu => {
                let action = self.menu.handle_key(key, &mut self.settings);
                self.on_menu_action(action);
            }
        }
    }

    fn on_menu_action(&mut self, action: MenuAction) {
        match action {
            MenuAction::None => {}
            MenuAction::Resume => {
                log::debug!("menu closed");
                self.mode = Mode::Rain;
            }
            MenuAction::Quit => self.quit(),
            MenuAction::Changed { regrid } => {
                if regrid {
                    self.fit_size = None;
                    self.apply_grid_shape();
                }
                self.save_settings();
            }
            MenuAction::ResetDefaults => {
                self.reset_to_defaults();
                self.menu.set_message("Settings reset to defaults.");
                self.save_settings();
            }
            MenuAction::CheckUpdates => {
                self.updates.start();
                self.menu.set_message(self.updates.status().message());
            }
            MenuAction::ShowDebugInfo => {
                let report = DebugReport::collect(
                    self.store.as_ref().map(|store| store.path()),
                    self.terminal_size,
                );
                self.menu.show_info(report.lines());
            }
        }
    }

    /// Track terminal size, and resize the grid to it with `--fit`.
    fn on_resize(&mut self, width: u16, height: u16) {
        self.terminal_size = Some((width, height));
        if !self.options.fit_terminal {
            return;
        }
        let fitted = (
            width.clamp(MIN_COLUMNS, MAX_COLUMNS),
            height.clamp(MIN_ROWS, MAX_ROWS),
        );
        if self.fit_size != Some(fitted) {
            self.fit_size = Some(fitted);
            self.apply_grid_shape();
        }
    }

    /// Restore every setting to its default and reallocate the grid.
    pub fn reset_to_defaults(&mut self) {
        log::info!("settings reset to defaults");
        self.settings = Settings::default();
        self.fit_size = None;
        self.apply_grid_shape();
    }

    /// Reallocate the grid, preferring the fitted shape over the settings.
    fn apply_grid_shape(&mut self) {
        let (rows, columns) = match self.fit_size {
            Some((columns, rows)) => (usize::from(rows), usize::from(columns)),
            None => self.settings.grid_size(),
        };
        self.engine.reset_grid(&mut self.grid, rows, columns);
    }

    /// Persist settings; failures are reported in the menu, never fatal.
    fn save_settings(&mut self) {
        let Some(store) = &self.store else {
            return;
        };
        if let Err(e) = store.save(&self.settings) {
            log::warn!("{e}");
            self.menu.set_message(format!("Could not save settings: {e}"));
        }
    }

    fn duration_reached(&self) -> bool {
        self.settings
            .duration
            .is_some_and(|limit| self.rain_started.elapsed().as_secs_f64() >= limit)
    }

    fn start_rain(&mut self) {
        self.mode = Mode::Rain;
        self.rain_started = Instant::now();
    }

    fn open_menu(&mut self) {
        log::debug!("menu opened");
        self.menu.open();
        self.mode = Mode::Menu;
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

fn intro_banner() -> String {
    format!(
        "glyphrain v{} by {} | 'o' options",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_AUTHORS")
    )
}

fn intro_length() -> Duration {
    INTRO_GLYPH_DELAY * intro_banner().chars().count() as u32 + INTRO_HOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app(settings: Settings, options: AppOptions) -> App {
        let mut app = App::new(
            settings,
            RainEngine::seeded(8),
            None,
            UpdateMonitor::new("0.1.0"),
            options,
        );
        app.running = true;
        app
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_keys(app: &mut App, text: &str) {
        for c in text.chars() {
            app.on_key_event(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_reset_to_defaults() {
        let settings = Settings {
            columns: 30,
            rows: 12,
            speed: 0.5,
            duration: Some(10.0),
            bold_enabled: false,
            random_fade_enabled: false,
            ..Default::default()
        };
        let mut app = test_app(settings, AppOptions::default());
        assert_eq!((app.grid.rows(), app.grid.columns()), (12, 30));

        app.reset_to_defaults();
        assert_eq!(app.settings, Settings::default());
        assert_eq!((app.grid.rows(), app.grid.columns()), (24, 80));
        assert_eq!(app.grid.drop_rows().len(), 80);
    }

    #[test]
    fn test_menu_opens_and_resumes() {
        let mut app = test_app(Settings::default(), AppOptions::default());
        assert_eq!(app.mode, Mode::Rain);
        app.on_key_event(key(KeyCode::Char('o')));
        assert_eq!(app.mode, Mode::Menu);
        app.on_key_event(key(KeyCode::Enter));
        assert_eq!(app.mode, Mode::Rain);
        assert!(app.running);
    }

    #[test]
    fn test_menu_edit_resizes_grid() {
        let mut app = test_app(Settings::default(), AppOptions::default());
        app.on_key_event(key(KeyCode::Char('o')));
        app.on_key_event(key(KeyCode::Char('r')));
        type_keys(&mut app, "15");
        app.on_key_event(key(KeyCode::Enter));
        assert_eq!(app.settings.rows, 15);
        assert_eq!(app.grid.rows(), 15);
        assert!(app.grid.drop_rows().iter().all(|&d| d < 15));
    }

    #[test]
    fn test_menu_reset_command() {
        let settings = Settings {
            columns: 50,
            ..Default::default()
        };
        let mut app = test_app(settings, AppOptions::default());
        app.on_key_event(key(KeyCode::Char('o')));
        app.on_key_event(key(KeyCode::Char('x')));
        assert_eq!(app.settings, Settings::default());
        assert_eq!(app.grid.columns(), 80);
        assert_eq!(app.menu.message(), Some("Settings reset to defaults."));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app(Settings::default(), AppOptions::default());
        app.on_key_event(key(KeyCode::Char('q')));
        assert!(!app.running);

        let mut app = test_app(Settings::default(), AppOptions::default());
        app.on_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);

        let mut app = test_app(Settings::default(), AppOptions::default());
        app.on_key_event(key(KeyCode::Char('o')));
        app.on_key_event(key(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn test_any_key_skips_intro() {
        let options = AppOptions {
            show_intro: true,
            ..Default::default()
        };
        let mut app = test_app(Settings::default(), options);
        assert!(matches!(app.mode, Mode::Intro { .. }));
        app.on_key_event(key(KeyCode::Char('z')));
        assert_eq!(app.mode, Mode::Rain);
    }

    #[test]
    fn test_fit_follows_terminal_within_bounds() {
        let options = AppOptions {
            fit_terminal: true,
            ..Default::default()
        };
        let mut app = test_app(Settings::default(), options);
        app.on_resize(132, 43);
        assert_eq!((app.grid.rows(), app.grid.columns()), (43, 132));

        app.on_resize(5, 500);
        assert_eq!(app.fit_size, Some((MIN_COLUMNS, MAX_ROWS)));
        assert_eq!((app.grid.rows(), app.grid.columns()), (100, 20));
        assert_eq!((app.settings.rows, app.settings.columns), (24, 80));
    }

    #[test]
    fn test_fitted_shape_is_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("config.toml"));
        let mut app = App::new(
            Settings::default(),
            RainEngine::seeded(3),
            Some(store.clone()),
            UpdateMonitor::new("0.1.0"),
            AppOptions {
                fit_terminal: true,
                ..Default::default()
            },
        );
        app.on_resize(132, 43);
        assert_eq!((app.grid.rows(), app.grid.columns()), (43, 132));

        app.on_key_event(key(KeyCode::Char('o')));
        app.on_key_event(key(KeyCode::Char('g')));
        let saved = store.load().unwrap();
        assert!(!saved.fade_enabled);
        assert_eq!((saved.columns, saved.rows), (80, 24));
        assert_eq!((app.grid.rows(), app.grid.columns()), (43, 132));
    }

    #[test]
    fn test_shape_edit_overrides_fit() {
        let options = AppOptions {
            fit_terminal: true,
            ..Default::default()
        };
        let mut app = test_app(Settings::default(), options);
        app.on_resize(132, 43);
        app.on_key_event(key(KeyCode::Char('o')));
        app.on_key_event(key(KeyCode::Char('c')));
        type_keys(&mut app, "40");
        app.on_key_event(key(KeyCode::Enter));
        assert_eq!(app.fit_size, None);
        assert_eq!((app.grid.rows(), app.grid.columns()), (24, 40));
    }

    #[test]
    fn test_resize_without_fit_keeps_grid() {
        let mut app = test_app(Settings::default(), AppOptions::default());
        app.on_resize(132, 43);
        assert_eq!((app.grid.rows(), app.grid.columns()), (24, 80));
        assert_eq!(app.terminal_size, Some((132, 43)));
    }

    #[test]
    fn test_duration_limit() {
        let settings = Settings {
            duration: Some(1.0),
            ..Default::default()
        };
        let mut app = test_app(settings, AppOptions::default());
        assert!(!app.duration_reached());
        if let Some(earlier) = Instant::now().checked_sub(Duration::from_secs(2)) {
            app.rain_started = earlier;
            assert!(app.duration_reached());
        }

        let app = test_app(Settings::default(), AppOptions::default());
        assert!(!app.duration_reached());
    }

    #[test]
    fn test_settings_saved_after_menu_edit() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("config.toml"));
        let mut app = App::new(
            Settings::default(),
            RainEngine::seeded(1),
            Some(store.clone()),
            UpdateMonitor::new("0.1.0"),
            AppOptions::default(),
        );
        app.on_key_event(key(KeyCode::Char('o')));
        app.on_key_event(key(KeyCode::Char('g')));
        let saved = store.load().unwrap();
        assert!(!saved.fade_enabled);
    }

    #[test]
    fn test_intro_banner() {
        assert!(intro_banner().starts_with("glyphrain v"));
        assert!(intro_banner().ends_with("| 'o' options"));
        assert!(intro_length() > INTRO_HOLD);
    }
}
