//! TUI rendering and terminal management (impure shell)

pub mod constants;
mod controls;
mod game;
mod hit;
mod inspector;
mod styles;
pub mod word;

pub use game::{render_game, LOBBY_TAGLINE, LOBBY_TITLE, START_PROMPT};
pub use hit::{HitMap, HitTarget};
pub use inspector::render_inspector;
pub use word::{Hover, WordLayout, WordView};

use crate::config::keybindings::KeyBindings;
use crate::model::{AppError, KeyAction};
use crate::state::{Control, Inspector, Orchestrator};
use constants::{ANIMATION_FRAME, IDLE_POLL};
use crossterm::{
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// What the terminal is showing.
#[derive(Debug)]
pub enum Screen {
    /// Lobby and playing views.
    Game(Orchestrator),
    /// Single-word test bench.
    Inspector(Inspector),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    screen: Screen,
    key_bindings: KeyBindings,
    /// Wall clock the game's virtual clock follows. `None` leaves the
    /// virtual clock to explicit advances.
    clock: Option<Instant>,
    /// Clickable regions of the last frame.
    hits: HitMap,
    /// Hover under the mouse pointer.
    pointer_hover: Hover,
    /// Hover toggled from the keyboard.
    keyboard_hover: bool,
    mouse_hover: bool,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(screen: Screen, args: CliArgs) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            screen,
            key_bindings: KeyBindings::default(),
            clock: Some(Instant::now()),
            hits: HitMap::default(),
            pointer_hover: Hover::NONE,
            keyboard_hover: false,
            mouse_hover: args.mouse_hover,
        })
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). Polls fast while something is
    /// animating or a step is pending, slowly otherwise.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            if event::poll(self.poll_timeout())? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key) {
                            info!("Quit requested");
                            return Ok(());
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }

            self.sync_clock();
            self.draw()?;
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    fn poll_timeout(&self) -> Duration {
        match &self.screen {
            Screen::Game(game) if game.is_animating() => ANIMATION_FRAME,
            Screen::Game(game) => game
                .next_deadline()
                .map(|deadline| deadline.saturating_sub(game.now()))
                .map_or(IDLE_POLL, |wait| wait.clamp(ANIMATION_FRAME, IDLE_POLL)),
            Screen::Inspector(_) => IDLE_POLL,
        }
    }

    /// Bring the virtual clock up to wall time, firing due steps.
    fn sync_clock(&mut self) {
        let (Some(started), Screen::Game(game)) = (self.clock, &mut self.screen) else {
            return;
        };
        let fired = game.advance_clock_to(started.elapsed());
        if fired > 0 {
            debug!(fired, "Steps fired");
        }
    }

    fn hover(&self) -> Hover {
        Hover {
            word: self.pointer_hover.word || self.keyboard_hover,
            fragment: self.pointer_hover.fragment,
        }
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Special case: Ctrl+C should always quit, even if not in bindings
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };
        debug!(?action, "Key action");

        match action {
            KeyAction::Quit => return true,
            KeyAction::ToggleHover => self.keyboard_hover = !self.keyboard_hover,
            _ => match &mut self.screen {
                Screen::Game(game) => game_key(game, action),
                Screen::Inspector(inspector) => inspector_key(inspector, action),
            },
        }
        false
    }

    /// Handle a single mouse event
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(target) = self.hits.target_at(mouse.column, mouse.row) else {
                    return;
                };
                match (&mut self.screen, target) {
                    (Screen::Game(game), HitTarget::Node(node)) => {
                        game.click(node);
                    }
                    (Screen::Inspector(inspector), HitTarget::Option(index)) => {
                        let id = inspector.catalog().ids().nth(index).map(str::to_string);
                        if let Some(id) = id {
                            if let Err(err) = inspector.select(&id) {
                                warn!(%err, "Selection failed");
                            }
                        }
                    }
                    _ => {}
                }
            }
            MouseEventKind::Moved if self.mouse_hover => {
                self.pointer_hover = self.hits.hover_at(mouse.column, mouse.row);
            }
            _ => {}
        }
    }

    /// Render the current frame
    fn draw(&mut self) -> Result<(), TuiError> {
        let hover = self.hover();
        let screen = &self.screen;
        let hits = &mut self.hits;
        hits.clear();

        self.terminal.draw(|frame| match screen {
            Screen::Game(game) => render_game(frame, game, hover, hits),
            Screen::Inspector(inspector) => render_inspector(frame, inspector, hover, hits),
        })?;

        Ok(())
    }
}

fn game_key(game: &mut Orchestrator, action: KeyAction) {
    let control = match action {
        KeyAction::EnterGame => Some(Control::Enter),
        KeyAction::ExitGame => Some(Control::Exit),
        KeyAction::Start => Some(Control::Start),
        KeyAction::Next => Some(Control::Next),
        KeyAction::Restart => Some(Control::Restart),
        KeyAction::Confirm => game.primary_control(),
        _ => None,
    };
    if let Some(control) = control {
        game.press(control);
    }
}

fn inspector_key(inspector: &mut Inspector, action: KeyAction) {
    if inspector.alert().is_some() {
        if matches!(action, KeyAction::Confirm | KeyAction::ExitGame) {
            inspector.dismiss_alert();
        }
        return;
    }
    match action {
        KeyAction::SelectNext => inspector.select_next(),
        KeyAction::SelectPrev => inspector.select_prev(),
        KeyAction::Confirm => {
            if let Err(err) = inspector.load_selected() {
                warn!(%err, "Load failed");
            }
        }
        KeyAction::Reload => inspector.reload(),
        _ => {}
    }
}

// ===== Test Helpers =====
//
// The following methods are ONLY for testing within the crate.
//
// DO NOT use these in production code.

#[cfg(test)]
#[allow(dead_code)] // Not all helpers used in every test module
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create TuiApp for testing (test-only constructor)
    ///
    /// No wall clock: the game's virtual clock only moves through
    /// [`Self::advance_clock_test`].
    pub(crate) fn new_for_test(terminal: Terminal<B>, screen: Screen, key_bindings: KeyBindings) -> Self {
        Self {
            terminal,
            screen,
            key_bindings,
            clock: None,
            hits: HitMap::default(),
            pointer_hover: Hover::NONE,
            keyboard_hover: false,
            mouse_hover: true,
        }
    }

    /// Current screen (test-only accessor)
    pub(crate) fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Handle a single keyboard event (test-only accessor)
    ///
    /// Returns true if app should quit.
    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    /// Handle a single mouse event (test-only accessor)
    pub(crate) fn handle_mouse_test(&mut self, mouse: MouseEvent) {
        self.handle_mouse(mouse)
    }

    /// Render a single frame (test-only accessor)
    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    /// Move the game's virtual clock forward (test-only accessor)
    ///
    /// Returns the number of steps fired; always 0 on the inspector.
    pub(crate) fn advance_clock_test(&mut self, by: Duration) -> usize {
        match &mut self.screen {
            Screen::Game(game) => game.advance_clock(by),
            Screen::Inspector(_) => 0,
        }
    }

    /// Hover the renderer will use next (test-only accessor)
    pub(crate) fn hover_test(&self) -> Hover {
        self.hover()
    }

    /// Clickable regions of the last frame (test-only accessor)
    pub(crate) fn hits(&self) -> &HitMap {
        &self.hits
    }

    /// Get reference to terminal (test-only accessor)
    ///
    /// Provides access to the terminal backend for buffer inspection.
    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Command-line arguments for the TUI
pub struct CliArgs {
    /// Whether moving the mouse over a word hovers it.
    ///
    /// Maps to `--no-mouse` (inverted), or `mouse_hover` in the config file.
    pub mouse_hover: bool,
}

impl CliArgs {
    /// Create new CliArgs
    pub fn new(mouse_hover: bool) -> Self {
        Self { mouse_hover }
    }
}

/// Initialize and run the TUI application on `screen`
///
/// Handles terminal setup, runs the event loop, and ensures cleanup on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run(screen: Screen, args: CliArgs) -> Result<(), TuiError> {
    let mut app = TuiApp::new(screen, args)?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Timing, View};
    use crate::words;
    use ratatui::backend::TestBackend;

    #[test]
    fn tui_error_from_io_error() {
        let io_err = io::Error::other("test error");
        let tui_err: TuiError = io_err.into();
        assert!(matches!(tui_err, TuiError::Io(_)));
    }

    fn create_test_app() -> TuiApp<TestBackend> {
        let terminal = Terminal::new(TestBackend::new(80, 24)).expect("test terminal");
        let catalog = words::catalog().expect("built-in catalog");
        let game = Orchestrator::new(catalog, Timing::default(), Some(7));
        TuiApp::new_for_test(terminal, Screen::Game(game), KeyBindings::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn game(app: &TuiApp<TestBackend>) -> &Orchestrator {
        match app.screen() {
            Screen::Game(game) => game,
            Screen::Inspector(_) => panic!("expected game screen"),
        }
    }

    #[test]
    fn handle_key_q_returns_true() {
        let mut app = create_test_app();
        assert!(app.handle_key_test(key(KeyCode::Char('q'))));
    }

    #[test]
    fn handle_key_ctrl_c_returns_true() {
        let mut app = create_test_app();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.handle_key_test(ctrl_c));
    }

    #[test]
    fn handle_key_other_returns_false() {
        let mut app = create_test_app();
        assert!(!app.handle_key_test(key(KeyCode::Char('z'))));
    }

    #[test]
    fn draw_renders_without_error() {
        let mut app = create_test_app();
        assert!(app.render_test().is_ok());
    }

    #[test]
    fn enter_key_starts_lobby_fade() {
        let mut app = create_test_app();
        app.handle_key_test(key(KeyCode::Char('e')));
        assert!(game(&app).is_transitioning());

        app.advance_clock_test(Duration::from_millis(650));
        assert_eq!(game(&app).view(), View::Playing);
    }

    #[test]
    fn space_toggles_keyboard_hover() {
        let mut app = create_test_app();
        assert!(!app.hover_test().word);
        app.handle_key_test(key(KeyCode::Char(' ')));
        assert!(app.hover_test().word);
        app.handle_key_test(key(KeyCode::Char(' ')));
        assert!(!app.hover_test().word);
    }

    #[test]
    fn clock_does_not_move_without_wall_clock() {
        let mut app = create_test_app();
        app.handle_key_test(key(KeyCode::Char('e')));
        app.sync_clock();
        app.render_test().expect("render");
        assert_eq!(game(&app).view(), View::Lobby);
    }

    #[test]
    fn idle_poll_is_slow() {
        let app = create_test_app();
        assert_eq!(app.poll_timeout(), IDLE_POLL);
    }

    #[test]
    fn pending_step_polls_fast() {
        let mut app = create_test_app();
        app.handle_key_test(key(KeyCode::Char('e')));
        assert_eq!(app.poll_timeout(), ANIMATION_FRAME);
    }

    #[test]
    fn settle_delay_polls_until_deadline() {
        let mut app = create_test_app();
        app.handle_key_test(key(KeyCode::Char('e')));
        app.advance_clock_test(Duration::from_millis(600));
        assert_eq!(app.poll_timeout(), Duration::from_millis(50));
    }

    #[test]
    fn cli_args_new_stores_mouse_hover() {
        assert!(CliArgs::new(true).mouse_hover);
        assert!(!CliArgs::new(false).mouse_hover);
    }
}
