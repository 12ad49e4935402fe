//! Session orchestrator: lobby ↔ playing transitions and queue progression.
//!
//! The orchestrator owns the page and a virtual clock. Every user operation
//! either acts synchronously or schedules a [`Step`]; [`Orchestrator::advance_clock_to`]
//! fires due steps in deadline order. Nothing here touches a terminal.

use crate::model::Catalog;
use crate::presenter::WordPresenter;
use crate::scheduler::{Scheduler, TimerQueue};
use crate::state::affordances::{build_game_page, Affordances, Control};
use crate::state::session::{Advance, SessionState, View};
use crate::surface::{Document, NodeId, PresentationSurface};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Fade duration of a view transition.
pub const DEFAULT_TRANSITION_DURATION: Duration = Duration::from_millis(600);

/// Pause between swapping views and fading the new one in.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(50);

/// Durations used by view transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Fade out / fade in duration.
    pub transition: Duration,
    /// Delay between the fade out completing and the fade in starting.
    pub settle: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            transition: DEFAULT_TRANSITION_DURATION,
            settle: DEFAULT_SETTLE_DELAY,
        }
    }
}

/// Deferred continuation of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Lobby finished fading out during `enter_game`.
    LobbyFadedOut,
    /// Playing view is displayed and ready to fade in.
    PlayingSettled,
    /// Playing view finished fading out during `exit_game`.
    PlayingFadedOut,
    /// Lobby is displayed and ready to fade in.
    LobbySettled,
    /// Incoming view finished fading in.
    ViewFadedIn,
    /// The mounted word finished its exit transition.
    WordExited {
        /// Session the request belonged to.
        epoch: u64,
    },
}

/// Result of a view transition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The transition is running.
    Started,
    /// Nothing happened.
    Rejected(RejectReason),
}

/// Why a view transition was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// `enter_game` while already playing.
    AlreadyPlaying,
    /// `exit_game` while already in the lobby.
    AlreadyInLobby,
    /// Another view transition has not finished yet.
    TransitionInFlight,
    /// The page lacks a required container.
    Unavailable,
}

/// Result of asking for the next word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextOutcome {
    /// The next word is displayed.
    Advanced,
    /// The current word is running its exit transition; the next word follows.
    Pending,
    /// The queue was exhausted and the summary is shown.
    SessionEnded,
    /// Not playing, session already finished, or a request is in progress.
    Ignored,
}

/// Top-level game controller.
#[derive(Debug)]
pub struct Orchestrator<R = StdRng> {
    doc: Document,
    timers: TimerQueue<Step>,
    session: SessionState,
    catalog: Catalog,
    rng: R,
    timing: Timing,
    hooks: Affordances,
    lobby: Option<PresentationSurface>,
    playing: Option<PresentationSurface>,
    presenter: Option<WordPresenter>,
    in_flight: bool,
    word_exiting: bool,
    epoch: u64,
}

impl Orchestrator<StdRng> {
    /// Orchestrator over the standard game page. `seed` fixes the shuffle
    /// order; `None` seeds from the OS.
    pub fn new(catalog: Catalog, timing: Timing, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_document(build_game_page(), catalog, timing, rng)
    }
}

impl<R: Rng> Orchestrator<R> {
    /// Orchestrator over an arbitrary page. Hooks are bound once here.
    pub fn with_document(doc: Document, catalog: Catalog, timing: Timing, rng: R) -> Self {
        let hooks = Affordances::bind(&doc);
        let lobby = hooks.lobby_view.map(PresentationSurface::new);
        let playing = hooks.playing_view.map(PresentationSurface::new);
        let presenter = hooks.game_container.map(WordPresenter::new);
        info!(
            words = catalog.len(),
            functional = hooks.is_functional(),
            "Orchestrator initialised"
        );
        Self {
            doc,
            timers: TimerQueue::new(),
            session: SessionState::new(),
            catalog,
            rng,
            timing,
            hooks,
            lobby,
            playing,
            presenter,
            in_flight: false,
            word_exiting: false,
            epoch: 0,
        }
    }

    // ===== Accessors =====

    /// The page.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// View, queue and counters.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Current view.
    pub fn view(&self) -> View {
        self.session.view()
    }

    /// Word presenter, if the page has a game container.
    pub fn presenter(&self) -> Option<&WordPresenter> {
        self.presenter.as_ref()
    }

    /// Bound page hooks.
    pub fn affordances(&self) -> &Affordances {
        &self.hooks
    }

    /// Loaded catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Timing in use.
    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Virtual clock time.
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Whether a view transition has started and not yet finished.
    pub fn is_transitioning(&self) -> bool {
        self.in_flight
    }

    /// Whether any node is mid-transition.
    pub fn is_animating(&self) -> bool {
        self.doc.is_animating(self.now())
    }

    /// Deadline of the next pending step.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Words played and queue length of the current session.
    pub fn progress(&self) -> (usize, usize) {
        (self.session.played_count(), self.session.queue().len())
    }

    // ===== View transitions =====

    /// Lobby → playing: fade out the lobby, swap views, fade in the playing
    /// view and start a fresh session.
    pub fn enter_game(&mut self) -> TransitionOutcome {
        if let Some(reason) = self.transition_blocker(View::Lobby, RejectReason::AlreadyPlaying) {
            warn!(?reason, "enter_game() rejected");
            return TransitionOutcome::Rejected(reason);
        }
        let Some(lobby) = &self.lobby else {
            error!("Cannot enter game: lobby view missing");
            return TransitionOutcome::Rejected(RejectReason::Unavailable);
        };

        info!("Entering game");
        self.in_flight = true;
        lobby.fade_out(&mut self.doc, &mut self.timers, self.timing.transition, Step::LobbyFadedOut);
        set_enabled(&mut self.doc, self.hooks.enter, false);
        TransitionOutcome::Started
    }

    /// Playing → lobby: fade out the playing view, unmount the word, swap
    /// views and fade the lobby back in.
    pub fn exit_game(&mut self) -> TransitionOutcome {
        if let Some(reason) = self.transition_blocker(View::Playing, RejectReason::AlreadyInLobby) {
            warn!(?reason, "exit_game() rejected");
            return TransitionOutcome::Rejected(reason);
        }
        let Some(playing) = &self.playing else {
            error!("Cannot exit game: playing view missing");
            return TransitionOutcome::Rejected(RejectReason::Unavailable);
        };

        info!("Exiting game");
        self.in_flight = true;
        // A word exit still running must not advance the session after this.
        self.word_exiting = false;
        self.epoch += 1;
        playing.fade_out(&mut self.doc, &mut self.timers, self.timing.transition, Step::PlayingFadedOut);
        set_enabled(&mut self.doc, self.hooks.exit, false);
        set_enabled(&mut self.doc, self.hooks.end_exit, false);
        set_displayed(&mut self.doc, self.hooks.end_overlay, false);
        TransitionOutcome::Started
    }

    fn transition_blocker(&self, from: View, wrong_view: RejectReason) -> Option<RejectReason> {
        if self.in_flight {
            Some(RejectReason::TransitionInFlight)
        } else if self.session.view() != from {
            Some(wrong_view)
        } else if !self.hooks.is_functional() {
            error!("Required page elements missing; transitions disabled");
            Some(RejectReason::Unavailable)
        } else {
            None
        }
    }

    // ===== Session =====

    /// Shuffle the catalog into a fresh queue and reset the counters.
    pub fn start_session(&mut self) {
        self.session.start(&self.catalog, &mut self.rng);
        self.word_exiting = false;
        self.epoch += 1;
        debug!(queue = ?self.session.queue_ids(), "Session started");
    }

    /// Display the word at the cursor.
    ///
    /// Any word still mounted is hidden first, so the presenter only ever
    /// holds one word.
    pub fn advance(&mut self) -> Advance {
        let Some(word) = self.session.upcoming().cloned() else {
            debug!("No more words");
            return Advance::NoMoreWords;
        };
        let Some(presenter) = self.presenter.as_mut() else {
            error!(id = word.id(), "Cannot display word: game container missing");
            return Advance::NoMoreWords;
        };

        if presenter.is_mounted() {
            presenter.hide(&mut self.doc);
        }
        if let Err(err) = presenter.display(&mut self.doc, Arc::clone(&word)) {
            error!(%err, "Display failed");
            return Advance::NoMoreWords;
        }
        self.session.record_played();

        if let Some(enter) = word.enter_transition() {
            let now = self.timers.now();
            enter.apply(self.doc.node_mut(presenter.container()).style_mut(), now);
        }
        info!(
            id = word.id(),
            played = self.session.played_count(),
            total = self.session.queue().len(),
            "Advanced"
        );
        Advance::Advanced
    }

    /// First word of the session: swap the start control for the next
    /// control, then request the next word.
    pub fn start(&mut self) -> NextOutcome {
        if self.session.view() != View::Playing || self.session.played_count() > 0 {
            debug!("start() ignored");
            return NextOutcome::Ignored;
        }
        set_displayed(&mut self.doc, self.hooks.start, false);
        set_displayed(&mut self.doc, self.hooks.next, true);
        self.request_next()
    }

    /// Move to the next word, playing the current word's exit transition
    /// first when it has one.
    pub fn request_next(&mut self) -> NextOutcome {
        if self.session.view() != View::Playing || self.session.is_finished() || self.word_exiting {
            debug!(
                view = ?self.session.view(),
                finished = self.session.is_finished(),
                exiting = self.word_exiting,
                "request_next() ignored"
            );
            return NextOutcome::Ignored;
        }
        set_enabled(&mut self.doc, self.hooks.next, false);

        let exit = self
            .presenter
            .as_ref()
            .and_then(|p| p.mounted().map(|w| (p.container(), w.exit_transition().copied())));
        if let Some((container, Some(transition))) = exit {
            let now = self.timers.now();
            transition.apply(self.doc.node_mut(container).style_mut(), now);
            self.word_exiting = true;
            self.timers.after(transition.duration, Step::WordExited { epoch: self.epoch });
            debug!(duration = ?transition.duration, "Exit transition started");
            return NextOutcome::Pending;
        }
        self.finish_next()
    }

    fn finish_next(&mut self) -> NextOutcome {
        if let Some(presenter) = self.presenter.as_mut() {
            if presenter.is_mounted() {
                presenter.hide(&mut self.doc);
            }
        }
        match self.advance() {
            Advance::Advanced => {
                set_enabled(&mut self.doc, self.hooks.next, true);
                NextOutcome::Advanced
            }
            Advance::NoMoreWords => {
                self.end_of_session();
                NextOutcome::SessionEnded
            }
        }
    }

    /// Show the summary with the played count. Runs once per session.
    pub fn end_of_session(&mut self) {
        if self.session.is_finished() {
            debug!("Session already finished");
            return;
        }
        self.session.mark_finished();
        let played = self.session.played_count();

        set_displayed(&mut self.doc, self.hooks.next, false);
        if let Some(count) = self.hooks.word_count {
            self.doc.set_label(count, played.to_string());
        }
        set_displayed(&mut self.doc, self.hooks.end_overlay, true);
        set_enabled(&mut self.doc, self.hooks.restart, true);
        set_enabled(&mut self.doc, self.hooks.end_exit, true);
        info!(played, "Session finished");
    }

    /// Start over from the summary without leaving the playing view.
    pub fn restart(&mut self) -> bool {
        if self.session.view() != View::Playing || self.in_flight {
            debug!("restart() ignored");
            return false;
        }
        set_displayed(&mut self.doc, self.hooks.end_overlay, false);
        if let Some(presenter) = self.presenter.as_mut() {
            if presenter.is_mounted() {
                presenter.hide(&mut self.doc);
            }
        }
        self.start_session();
        self.reset_controls();
        info!("Session restarted");
        true
    }

    fn reset_controls(&mut self) {
        set_displayed(&mut self.doc, self.hooks.start, true);
        set_enabled(&mut self.doc, self.hooks.start, true);
        set_displayed(&mut self.doc, self.hooks.next, false);
        set_enabled(&mut self.doc, self.hooks.next, true);
        set_displayed(&mut self.doc, self.hooks.end_overlay, false);
    }

    // ===== Input =====

    /// Deliver a click to `node`. Hidden or disabled nodes swallow it.
    /// Returns whether an operation ran.
    pub fn click(&mut self, node: NodeId) -> bool {
        if !self.doc.is_interactive(node) {
            debug!(id = self.doc.node(node).id(), "Click on inert node");
            return false;
        }
        let Some(control) = self.hooks.control_for(node) else {
            return false;
        };
        debug!(?control, "Control clicked");
        match control {
            Control::Enter => {
                self.enter_game();
            }
            Control::Exit | Control::EndExit => {
                self.exit_game();
            }
            Control::Start => {
                self.start();
            }
            Control::Next => {
                self.request_next();
            }
            Control::Restart => {
                self.restart();
            }
        }
        true
    }

    /// Click the node bound to `control`, if the page has one.
    pub fn press(&mut self, control: Control) -> bool {
        match self.hooks.control(control) {
            Some(node) => self.click(node),
            None => {
                debug!(?control, "Control not on page");
                false
            }
        }
    }

    /// The control a generic "confirm" should press in the current state.
    pub fn primary_control(&self) -> Option<Control> {
        let rendered = |node: Option<NodeId>| node.is_some_and(|n| self.doc.is_rendered(n));
        match self.session.view() {
            View::Lobby => Some(Control::Enter),
            View::Playing if rendered(self.hooks.end_overlay) => Some(Control::Restart),
            View::Playing if rendered(self.hooks.start) => Some(Control::Start),
            View::Playing if rendered(self.hooks.next) => Some(Control::Next),
            View::Playing => None,
        }
    }

    // ===== Clock =====

    /// Advance the virtual clock by `by`. Returns the number of steps fired.
    pub fn advance_clock(&mut self, by: Duration) -> usize {
        let target = self.timers.now() + by;
        self.advance_clock_to(target)
    }

    /// Advance the virtual clock to `target`, firing every step due on the
    /// way in deadline order, including steps scheduled by those steps.
    pub fn advance_clock_to(&mut self, target: Duration) -> usize {
        let mut fired = 0;
        while let Some(deadline) = self.timers.next_deadline().filter(|d| *d <= target) {
            self.timers.set_time(deadline);
            while let Some(step) = self.timers.pop_due() {
                self.on_step(step);
                fired += 1;
            }
        }
        self.timers.set_time(target);
        fired
    }

    fn on_step(&mut self, step: Step) {
        debug!(?step, now = ?self.timers.now(), "Step");
        match step {
            Step::LobbyFadedOut => {
                set_displayed(&mut self.doc, self.hooks.lobby_view, false);
                set_displayed(&mut self.doc, self.hooks.playing_view, true);
                self.timers.after(self.timing.settle, Step::PlayingSettled);
            }
            Step::PlayingSettled => {
                if let Some(playing) = &self.playing {
                    playing.fade_in(&mut self.doc, &mut self.timers, self.timing.transition, Step::ViewFadedIn);
                }
                self.session.set_view(View::Playing);
                self.start_session();
                self.reset_controls();
                info!("Playing");
            }
            Step::PlayingFadedOut => {
                if let Some(presenter) = self.presenter.as_mut() {
                    if presenter.is_mounted() {
                        presenter.hide(&mut self.doc);
                    }
                }
                set_displayed(&mut self.doc, self.hooks.playing_view, false);
                set_displayed(&mut self.doc, self.hooks.lobby_view, true);
                self.timers.after(self.timing.settle, Step::LobbySettled);
            }
            Step::LobbySettled => {
                if let Some(lobby) = &self.lobby {
                    lobby.fade_in(&mut self.doc, &mut self.timers, self.timing.transition, Step::ViewFadedIn);
                }
                self.session.set_view(View::Lobby);
                set_enabled(&mut self.doc, self.hooks.enter, true);
                set_enabled(&mut self.doc, self.hooks.exit, true);
                set_enabled(&mut self.doc, self.hooks.end_exit, true);
                info!("Back in lobby");
            }
            Step::ViewFadedIn => {
                self.in_flight = false;
                debug!(view = ?self.session.view(), "View transition complete");
            }
            Step::WordExited { epoch } => {
                if epoch != self.epoch
                    || !self.word_exiting
                    || self.in_flight
                    || self.session.view() != View::Playing
                {
                    debug!(epoch, "Stale exit transition ignored");
                    return;
                }
                self.word_exiting = false;
                self.finish_next();
            }
        }
    }
}

fn set_displayed(doc: &mut Document, node: Option<NodeId>, displayed: bool) {
    if let Some(node) = node {
        doc.set_displayed(node, displayed);
    }
}

fn set_enabled(doc: &mut Document, node: Option<NodeId>, enabled: bool) {
    if let Some(node) = node {
        doc.set_enabled(node, enabled);
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
