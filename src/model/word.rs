//! Word modules: self-describing visual word effects.
//!
//! A word module bundles an id, a markup producer, stylesheet text, optional
//! enter/exit transitions and optional lifecycle hooks. Optional parts are
//! explicit `Option` fields; [`WordModule::capabilities`] reports which ones
//! are present so callers check once instead of probing at every call.

use crate::surface::document::Node;
use crate::surface::element::ElementStyle;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

// ===== Markup =====

/// One run of text inside a word, optionally carrying a style class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Text of the run.
    pub text: String,
    /// Class used to look up stylesheet rules.
    pub class: Option<String>,
}

/// Renderable word markup: classes on the word itself plus ordered fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup {
    classes: Vec<String>,
    fragments: Vec<Fragment>,
}

impl Markup {
    /// Start markup for a word carrying the given root classes.
    pub fn new<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            classes: classes.into_iter().map(Into::into).collect(),
            fragments: Vec::new(),
        }
    }

    /// Append a classed fragment.
    pub fn span(mut self, text: impl Into<String>, class: impl Into<String>) -> Self {
        self.fragments.push(Fragment {
            text: text.into(),
            class: Some(class.into()),
        });
        self
    }

    /// Append an unclassed fragment.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.fragments.push(Fragment {
            text: text.into(),
            class: None,
        });
        self
    }

    /// Root classes.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Fragments in order.
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Concatenated fragment text.
    pub fn plain_text(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }
}

// ===== Transitions and hooks =====

/// Procedure that puts an element into motion. Receives the element's inline
/// style and the clock time the transition starts at; completion is signalled
/// by whoever runs it, after [`Transition::duration`].
pub type TransitionEffect = fn(&mut ElementStyle, Duration);

/// Enter or exit animation of a word.
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    /// Time the effect needs before the caller continues.
    pub duration: Duration,
    /// The effect itself.
    pub effect: TransitionEffect,
}

impl Transition {
    /// Transition lasting `duration_ms` milliseconds.
    pub fn new(duration_ms: u64, effect: TransitionEffect) -> Self {
        Self {
            duration: Duration::from_millis(duration_ms),
            effect,
        }
    }

    /// Run the effect against `style` starting at `now`.
    pub fn apply(&self, style: &mut ElementStyle, now: Duration) {
        (self.effect)(style, now);
    }
}

/// Hook run once after the word is mounted, with its container.
pub type InitHook = Arc<dyn Fn(&mut Node) + Send + Sync>;

/// Hook run once before the word is unmounted.
pub type CleanupHook = Arc<dyn Fn() + Send + Sync>;

/// Which optional parts a word module provides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Has an `init` hook.
    pub init: bool,
    /// Has a `cleanup` hook.
    pub cleanup: bool,
    /// Has an enter transition.
    pub enter_transition: bool,
    /// Has an exit transition.
    pub exit_transition: bool,
}

// ===== WordModule =====

/// A self-contained visual word effect. Immutable once built.
#[derive(Clone)]
pub struct WordModule {
    id: String,
    render: fn() -> Markup,
    style: String,
    enter_transition: Option<Transition>,
    exit_transition: Option<Transition>,
    init: Option<InitHook>,
    cleanup: Option<CleanupHook>,
}

impl WordModule {
    /// Word with markup and stylesheet and no optional parts.
    pub fn new(id: impl Into<String>, render: fn() -> Markup, style: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            render,
            style: style.into(),
            enter_transition: None,
            exit_transition: None,
            init: None,
            cleanup: None,
        }
    }

    /// Attach an enter transition.
    pub fn with_enter_transition(mut self, transition: Transition) -> Self {
        self.enter_transition = Some(transition);
        self
    }

    /// Attach an exit transition.
    pub fn with_exit_transition(mut self, transition: Transition) -> Self {
        self.exit_transition = Some(transition);
        self
    }

    /// Attach an `init` hook.
    pub fn with_init(mut self, hook: impl Fn(&mut Node) + Send + Sync + 'static) -> Self {
        self.init = Some(Arc::new(hook));
        self
    }

    /// Attach a `cleanup` hook.
    pub fn with_cleanup(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.cleanup = Some(Arc::new(hook));
        self
    }

    /// Unique identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Produce the word's markup.
    pub fn render(&self) -> Markup {
        (self.render)()
    }

    /// Stylesheet text.
    pub fn style(&self) -> &str {
        &self.style
    }

    /// Enter transition, if any.
    pub fn enter_transition(&self) -> Option<&Transition> {
        self.enter_transition.as_ref()
    }

    /// Exit transition, if any.
    pub fn exit_transition(&self) -> Option<&Transition> {
        self.exit_transition.as_ref()
    }

    /// Run the `init` hook if present.
    pub fn run_init(&self, container: &mut Node) {
        if let Some(init) = &self.init {
            init(container);
        }
    }

    /// Run the `cleanup` hook if present.
    pub fn run_cleanup(&self) {
        if let Some(cleanup) = &self.cleanup {
            cleanup();
        }
    }

    /// Which optional parts this module provides.
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            init: self.init.is_some(),
            cleanup: self.cleanup.is_some(),
            enter_transition: self.enter_transition.is_some(),
            exit_transition: self.exit_transition.is_some(),
        }
    }
}

impl fmt::Debug for WordModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordModule")
            .field("id", &self.id)
            .field("capabilities", &self.capabilities())
            .finish_non_exhaustive()
    }
}
