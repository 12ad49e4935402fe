//! Acceptance Test Harness for TUI testing
//!
//! Provides a high-level API for acceptance testing user stories by wrapping
//! TuiApp<TestBackend> with convenient methods for simulating user interactions.

use crate::config::keybindings::KeyBindings;
use crate::state::{Inspector, Orchestrator, Timing};
use crate::surface::NodeId;
use crate::view::{HitMap, HitTarget, Hover, Screen, TuiApp};
use crate::words;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::time::Duration;

/// Convert a ratatui buffer to a string representation.
///
/// Captures the visual output character by character, preserving layout.
/// Empty lines are removed to keep assertions readable.
pub fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            let cell = &buffer[(x, y)];
            line.push_str(cell.symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

/// Test harness for acceptance testing
///
/// Wraps TuiApp<TestBackend> to provide a clean API for simulating user
/// interactions in acceptance tests.
pub struct AcceptanceTestHarness {
    app: TuiApp<TestBackend>,
    running: bool,
}

impl AcceptanceTestHarness {
    /// Game with the built-in catalog, default timing and a fixed seed (80x24)
    pub fn game(seed: u64) -> Self {
        Self::game_with_size(seed, 80, 24)
    }

    /// Game with custom terminal size
    pub fn game_with_size(seed: u64, width: u16, height: u16) -> Self {
        let catalog = words::catalog().expect("built-in catalog is valid");
        let orchestrator = Orchestrator::new(catalog, Timing::default(), Some(seed));
        Self::with_screen(Screen::Game(orchestrator), width, height)
    }

    /// Inspector with the built-in catalog (80x24)
    pub fn inspector() -> Self {
        Self::inspector_with_size(80, 24)
    }

    /// Inspector with custom terminal size
    pub fn inspector_with_size(width: u16, height: u16) -> Self {
        let catalog = words::catalog().expect("built-in catalog is valid");
        Self::with_screen(Screen::Inspector(Inspector::new(catalog)), width, height)
    }

    fn with_screen(screen: Screen, width: u16, height: u16) -> Self {
        let backend = TestBackend::new(width, height);
        let terminal = Terminal::new(backend).expect("test terminal");
        let app = TuiApp::new_for_test(terminal, screen, KeyBindings::default());
        Self { app, running: true }
    }

    /// Send a single key event
    ///
    /// # Returns
    /// * `true` - If app quit as a result of this key
    /// * `false` - If app is still running
    pub fn send_key(&mut self, key: KeyCode) -> bool {
        self.send_key_with_mods(key, KeyModifiers::NONE)
    }

    /// Send key with modifiers (e.g., Ctrl+C)
    pub fn send_key_with_mods(&mut self, key: KeyCode, mods: KeyModifiers) -> bool {
        if !self.running {
            return true; // Already quit
        }

        let quit = self.app.handle_key_test(KeyEvent::new(key, mods));
        if quit {
            self.running = false;
        }
        quit
    }

    /// Send a sequence of keys
    ///
    /// Continues sending keys until the sequence is exhausted or app quits.
    pub fn send_keys(&mut self, keys: &[KeyCode]) {
        for key in keys {
            if self.send_key(*key) {
                break; // Quit encountered
            }
        }
    }

    /// Let `ms` milliseconds of virtual time pass. Returns the steps fired.
    pub fn wait_ms(&mut self, ms: u64) -> usize {
        self.app.advance_clock_test(Duration::from_millis(ms))
    }

    /// Game state for assertions
    ///
    /// # Panics
    /// Panics when the harness runs the inspector.
    pub fn game_state(&self) -> &Orchestrator {
        match self.app.screen() {
            Screen::Game(game) => game,
            Screen::Inspector(_) => panic!("harness is running the inspector"),
        }
    }

    /// Inspector state for assertions
    ///
    /// # Panics
    /// Panics when the harness runs the game.
    pub fn inspector_state(&self) -> &Inspector {
        match self.app.screen() {
            Screen::Inspector(inspector) => inspector,
            Screen::Game(_) => panic!("harness is running the game"),
        }
    }

    /// Check if app is still running (didn't quit)
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Render the current frame to a string
    ///
    /// # Panics
    /// Panics if rendering fails (should never happen with TestBackend)
    pub fn render_to_string(&mut self) -> String {
        self.app
            .render_test()
            .expect("Rendering should succeed in test harness");
        buffer_to_string(self.app.terminal().backend().buffer())
    }

    /// First cell of the last frame whose click lands on `target`.
    pub fn target_cell(&mut self, target: HitTarget) -> Option<(u16, u16)> {
        self.find_cell(|hits, x, y| hits.target_at(x, y) == Some(target))
    }

    /// Where `node` was drawn in the last frame, if it is clickable.
    pub fn node_cell(&mut self, node: NodeId) -> Option<(u16, u16)> {
        self.target_cell(HitTarget::Node(node))
    }

    /// First cell of the last frame that hovers the word.
    pub fn word_cell(&mut self) -> Option<(u16, u16)> {
        self.find_cell(|hits, x, y| hits.hover_at(x, y).word)
    }

    fn find_cell(&mut self, matches: impl Fn(&HitMap, u16, u16) -> bool) -> Option<(u16, u16)> {
        let _ = self.app.render_test();
        let area = self.app.terminal().backend().buffer().area;
        let hits = self.app.hits();
        (area.top()..area.bottom())
            .flat_map(|y| (area.left()..area.right()).map(move |x| (x, y)))
            .find(|&(x, y)| matches(hits, x, y))
    }

    /// Send a mouse click event at the specified coordinates
    pub fn click_at(&mut self, column: u16, row: u16) {
        if !self.running {
            return; // Already quit
        }

        // Render first to ensure hit regions are current
        let _ = self.app.render_test();

        self.app.handle_mouse_test(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    /// Move the mouse pointer without clicking
    pub fn move_to(&mut self, column: u16, row: u16) {
        let _ = self.app.render_test();
        self.app.handle_mouse_test(MouseEvent {
            kind: MouseEventKind::Moved,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    /// Hover the renderer will use for the next frame
    pub fn hover(&self) -> Hover {
        self.app.hover_test()
    }
}
