//! Domain-level keyboard actions independent of key bindings.

/// User intents that can be mapped to configurable key bindings.
///
/// These represent what the player wants, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Game controls
    /// Leave the lobby and start playing. Default: e
    EnterGame,
    /// Return to the lobby (also the end-of-session exit). Default: x/Esc
    ExitGame,
    /// Show the first word of the session. Default: s
    Start,
    /// Move on to the next word. Default: n/→
    Next,
    /// Play the catalog again after the session ended. Default: r
    Restart,
    /// Activate whichever control is primary in the current view. Default: Enter
    Confirm,

    // Inspector
    /// Move the word selection down. Default: j/↓
    SelectNext,
    /// Move the word selection up. Default: k/↑
    SelectPrev,
    /// Reset the inspector. Default: R/Shift+r
    Reload,

    // Application
    /// Toggle hover without a mouse. Default: Space
    ToggleHover,
    /// Exit the application. Default: q/Ctrl+c
    Quit,
}
