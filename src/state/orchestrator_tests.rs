//! Tests for the session orchestrator.
//!
//! Everything runs on the virtual clock; no terminal involved.

use super::*;
use crate::model::{Markup, Transition, WordModule};
use crate::state::affordances::ids;
use crate::surface::element::ElementStyle;
use crate::surface::NodeKind;
use std::sync::Mutex;

// ===== Test Helpers =====

type CallLog = Arc<Mutex<Vec<String>>>;

const fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn markup() -> Markup {
    Markup::new(["word-game"]).text("WORD")
}

fn fade_to_zero(style: &mut ElementStyle, now: Duration) {
    style.set_transition(Some(ms(800)));
    style.set_opacity(0.0, now);
}

fn fade_from_zero(style: &mut ElementStyle, now: Duration) {
    style.set_transition(None);
    style.set_opacity(0.0, now);
    style.flush(now);
    style.set_transition(Some(ms(800)));
    style.set_opacity(1.0, now);
}

fn logged_word(id: &str, log: &CallLog) -> WordModule {
    let init_log = Arc::clone(log);
    let cleanup_log = Arc::clone(log);
    let init_id = id.to_string();
    let cleanup_id = id.to_string();
    WordModule::new(id, markup, "")
        .with_init(move |_| init_log.lock().unwrap().push(format!("init:{init_id}")))
        .with_cleanup(move || {
            cleanup_log
                .lock()
                .unwrap()
                .push(format!("cleanup:{cleanup_id}"))
        })
}

fn three_words(log: &CallLog) -> Catalog {
    Catalog::new(vec![
        logged_word("contraction", log),
        logged_word("flexible", log),
        logged_word("elastique", log),
    ])
    .expect("valid catalog")
}

fn orchestrator(catalog: Catalog) -> Orchestrator {
    Orchestrator::new(catalog, Timing::default(), Some(7))
}

/// Enter the game and let every transition finish.
fn playing(catalog: Catalog) -> Orchestrator {
    let mut orch = orchestrator(catalog);
    assert_eq!(orch.enter_game(), TransitionOutcome::Started);
    orch.advance_clock(ms(5_000));
    assert_eq!(orch.view(), View::Playing);
    assert!(!orch.is_transitioning());
    orch
}

fn rendered(orch: &Orchestrator, id: &str) -> bool {
    let node = orch.document().get_element_by_id(id).expect("node exists");
    orch.document().is_rendered(node)
}

fn enabled(orch: &Orchestrator, id: &str) -> bool {
    let node = orch.document().get_element_by_id(id).expect("node exists");
    orch.document().node(node).is_enabled()
}

fn mounted_id(orch: &Orchestrator) -> Option<String> {
    orch.presenter()
        .and_then(|p| p.mounted())
        .map(|w| w.id().to_string())
}

// ===== Initial State =====

#[test]
fn starts_in_lobby_with_lobby_shown() {
    let orch = orchestrator(three_words(&CallLog::default()));
    assert_eq!(orch.view(), View::Lobby);
    assert!(rendered(&orch, ids::LOBBY_VIEW));
    assert!(!rendered(&orch, ids::PLAYING_VIEW));
    assert!(!orch.is_transitioning());
    assert_eq!(orch.progress(), (0, 0));
}

// ===== enter_game =====

#[test]
fn enter_game_runs_fade_sequence() {
    let mut orch = orchestrator(three_words(&CallLog::default()));
    assert_eq!(orch.enter_game(), TransitionOutcome::Started);
    assert!(orch.is_transitioning());
    assert!(!enabled(&orch, ids::ENTER_BUTTON));
    assert_eq!(orch.view(), View::Lobby);

    orch.advance_clock(ms(599));
    assert!(rendered(&orch, ids::LOBBY_VIEW));

    orch.advance_clock(ms(1));
    assert!(!rendered(&orch, ids::LOBBY_VIEW));
    assert!(rendered(&orch, ids::PLAYING_VIEW));
    assert_eq!(orch.view(), View::Lobby, "view commits after settle");

    orch.advance_clock(ms(50));
    assert_eq!(orch.view(), View::Playing);
    assert_eq!(orch.progress(), (0, 3));
    assert!(orch.is_transitioning());

    orch.advance_clock(ms(600));
    assert!(!orch.is_transitioning());
    let playing_view = orch
        .document()
        .get_element_by_id(ids::PLAYING_VIEW)
        .expect("playing view");
    assert_eq!(orch.document().effective_opacity(playing_view, orch.now()), 1.0);
}

#[test]
fn enter_game_resets_controls_to_pre_game() {
    let orch = playing(three_words(&CallLog::default()));
    assert!(rendered(&orch, ids::START_BUTTON));
    assert!(enabled(&orch, ids::START_BUTTON));
    assert!(!rendered(&orch, ids::NEXT_BUTTON));
    assert!(!rendered(&orch, ids::END_OVERLAY));
    assert!(mounted_id(&orch).is_none());
}

#[test]
fn enter_game_while_in_flight_is_rejected() {
    let mut orch = orchestrator(three_words(&CallLog::default()));
    orch.enter_game();
    orch.advance_clock(ms(100));

    assert_eq!(
        orch.enter_game(),
        TransitionOutcome::Rejected(RejectReason::TransitionInFlight)
    );
    orch.advance_clock(ms(5_000));
    assert_eq!(orch.view(), View::Playing);
    assert!(orch.next_deadline().is_none(), "no duplicate steps queued");
}

#[test]
fn enter_game_while_playing_is_rejected() {
    let mut orch = playing(three_words(&CallLog::default()));
    assert_eq!(
        orch.enter_game(),
        TransitionOutcome::Rejected(RejectReason::AlreadyPlaying)
    );
    assert!(!orch.is_transitioning());
}

#[test]
fn exit_game_in_lobby_is_rejected() {
    let mut orch = orchestrator(three_words(&CallLog::default()));
    assert_eq!(
        orch.exit_game(),
        TransitionOutcome::Rejected(RejectReason::AlreadyInLobby)
    );
}

#[test]
fn missing_game_container_disables_transitions() {
    let mut doc = Document::new();
    let lobby = doc.create_element(ids::LOBBY_VIEW, NodeKind::Container, None);
    doc.create_element(ids::ENTER_BUTTON, NodeKind::Button, Some(lobby));
    doc.create_element(ids::PLAYING_VIEW, NodeKind::Container, None);
    let catalog = three_words(&CallLog::default());
    let mut orch = Orchestrator::with_document(doc, catalog, Timing::default(), StdRng::seed_from_u64(1));

    assert!(orch.presenter().is_none());
    assert_eq!(
        orch.enter_game(),
        TransitionOutcome::Rejected(RejectReason::Unavailable)
    );
    assert_eq!(orch.view(), View::Lobby);
}

// ===== advance =====

#[test]
fn advance_plays_each_word_once_then_stops() {
    let mut orch = orchestrator(three_words(&CallLog::default()));
    orch.start_session();

    let mut seen = Vec::new();
    for k in 1..=3 {
        assert_eq!(orch.advance(), Advance::Advanced);
        assert_eq!(orch.session().played_count(), k);
        assert_eq!(orch.session().cursor(), k);
        seen.push(mounted_id(&orch).expect("word mounted"));
    }
    let last = mounted_id(&orch);
    assert_eq!(orch.advance(), Advance::NoMoreWords);
    assert_eq!(orch.session().played_count(), 3);
    assert_eq!(mounted_id(&orch), last, "no side effects when exhausted");

    seen.sort_unstable();
    assert_eq!(seen, ["contraction", "elastique", "flexible"]);
}

#[test]
fn advance_applies_enter_transition() {
    let word = WordModule::new("fade", markup, "").with_enter_transition(Transition::new(800, fade_from_zero));
    let mut orch = orchestrator(Catalog::new(vec![word]).expect("valid catalog"));
    orch.start_session();
    orch.advance_clock(ms(1_000));

    assert_eq!(orch.advance(), Advance::Advanced);
    let container = orch
        .document()
        .get_element_by_id(ids::GAME_CONTAINER)
        .expect("container");
    let style = orch.document().node(container).style();
    assert_eq!(style.opacity_at(ms(1_000)), 0.0);
    assert_eq!(style.opacity_at(ms(1_800)), 1.0);
}

#[test]
fn same_seed_gives_same_queue() {
    let mut a = orchestrator(three_words(&CallLog::default()));
    let mut b = orchestrator(three_words(&CallLog::default()));
    a.start_session();
    b.start_session();
    assert_eq!(a.session().queue_ids(), b.session().queue_ids());
}

// ===== start / request_next / end_of_session =====

#[test]
fn start_swaps_controls_and_shows_first_word() {
    let mut orch = playing(three_words(&CallLog::default()));
    assert_eq!(orch.start(), NextOutcome::Advanced);

    assert!(!rendered(&orch, ids::START_BUTTON));
    assert!(rendered(&orch, ids::NEXT_BUTTON));
    assert!(enabled(&orch, ids::NEXT_BUTTON));
    assert!(mounted_id(&orch).is_some());
    assert_eq!(orch.progress(), (1, 3));

    assert_eq!(orch.start(), NextOutcome::Ignored, "start only once");
}

#[test]
fn full_session_ends_once_with_count() {
    let log = CallLog::default();
    let mut orch = playing(three_words(&log));

    assert_eq!(orch.start(), NextOutcome::Advanced);
    assert_eq!(orch.request_next(), NextOutcome::Advanced);
    assert_eq!(orch.request_next(), NextOutcome::Advanced);
    assert_eq!(orch.progress(), (3, 3));

    assert_eq!(orch.request_next(), NextOutcome::SessionEnded);
    assert!(orch.session().is_finished());
    assert!(rendered(&orch, ids::END_OVERLAY));
    assert!(!rendered(&orch, ids::NEXT_BUTTON));
    let count = orch
        .document()
        .get_element_by_id(ids::WORD_COUNT)
        .expect("word count");
    assert_eq!(orch.document().node(count).label(), "3");

    assert_eq!(orch.request_next(), NextOutcome::Ignored);
    assert_eq!(orch.progress(), (3, 3));

    let calls = log.lock().unwrap();
    assert_eq!(calls.iter().filter(|c| c.starts_with("init:")).count(), 3);
    assert_eq!(calls.iter().filter(|c| c.starts_with("cleanup:")).count(), 3);
}

#[test]
fn hooks_alternate_init_then_cleanup() {
    let log = CallLog::default();
    let mut orch = playing(three_words(&log));
    orch.start();
    orch.request_next();

    let calls = log.lock().unwrap().clone();
    assert_eq!(calls.len(), 3);
    assert!(calls[0].starts_with("init:"));
    assert_eq!(calls[1], calls[0].replace("init:", "cleanup:"));
    assert!(calls[2].starts_with("init:"));
}

#[test]
fn request_next_in_lobby_is_ignored() {
    let mut orch = orchestrator(three_words(&CallLog::default()));
    assert_eq!(orch.request_next(), NextOutcome::Ignored);
    assert_eq!(orch.start(), NextOutcome::Ignored);
}

#[test]
fn exit_transition_delays_next_word() {
    let word = WordModule::new("fader", markup, "").with_exit_transition(Transition::new(800, fade_to_zero));
    let mut orch = playing(Catalog::new(vec![word]).expect("valid catalog"));
    assert_eq!(orch.start(), NextOutcome::Advanced);

    assert_eq!(orch.request_next(), NextOutcome::Pending);
    assert!(!enabled(&orch, ids::NEXT_BUTTON));
    assert_eq!(orch.request_next(), NextOutcome::Ignored);

    orch.advance_clock(ms(799));
    assert_eq!(mounted_id(&orch).as_deref(), Some("fader"));
    assert!(!orch.session().is_finished());

    orch.advance_clock(ms(1));
    assert!(mounted_id(&orch).is_none());
    assert!(orch.session().is_finished());
    assert!(rendered(&orch, ids::END_OVERLAY));
}

#[test]
fn exit_during_word_exit_transition_does_not_advance() {
    let word = WordModule::new("fader", markup, "").with_exit_transition(Transition::new(800, fade_to_zero));
    let mut orch = playing(Catalog::new(vec![word]).expect("valid catalog"));
    orch.start();
    assert_eq!(orch.request_next(), NextOutcome::Pending);
    assert_eq!(orch.exit_game(), TransitionOutcome::Started);

    orch.advance_clock(ms(5_000));
    assert_eq!(orch.view(), View::Lobby);
    assert!(mounted_id(&orch).is_none());
    assert!(!orch.session().is_finished());
    assert_eq!(orch.progress(), (1, 1));
}

fn quick_fader(log: &CallLog) -> WordModule {
    logged_word("fader", log).with_exit_transition(Transition::new(300, fade_to_zero))
}

/// Start a session and press next until `fader` is on screen.
fn mount_fader(orch: &mut Orchestrator) {
    orch.start();
    while mounted_id(orch).as_deref() != Some("fader") {
        assert_eq!(orch.request_next(), NextOutcome::Advanced);
    }
}

#[test]
fn short_word_exit_during_view_fade_does_not_advance() {
    let log = CallLog::default();
    let catalog = Catalog::new(vec![quick_fader(&log), logged_word("other", &log)]).expect("valid catalog");
    let mut orch = playing(catalog);
    mount_fader(&mut orch);
    let progress = orch.progress();
    let finished = orch.session().is_finished();
    log.lock().unwrap().clear();

    assert_eq!(orch.request_next(), NextOutcome::Pending);
    assert_eq!(orch.exit_game(), TransitionOutcome::Started);

    // Word exit (300ms) ends while the view is still fading out (600ms).
    orch.advance_clock(ms(300));
    assert_eq!(orch.progress(), progress);
    assert_eq!(orch.session().is_finished(), finished);
    assert!(!rendered(&orch, ids::END_OVERLAY));
    assert!(!log.lock().unwrap().iter().any(|call| call.starts_with("init:")));

    orch.advance_clock(ms(5_000));
    assert_eq!(orch.view(), View::Lobby);
    assert_eq!(orch.progress(), progress);
    assert!(!rendered(&orch, ids::END_OVERLAY));
    assert_eq!(*log.lock().unwrap(), ["cleanup:fader"]);
}

#[test]
fn short_word_exit_on_last_word_does_not_finish_while_exiting() {
    let log = CallLog::default();
    let catalog = Catalog::new(vec![quick_fader(&log)]).expect("valid catalog");
    let mut orch = playing(catalog);
    mount_fader(&mut orch);

    assert_eq!(orch.request_next(), NextOutcome::Pending);
    assert_eq!(orch.exit_game(), TransitionOutcome::Started);

    orch.advance_clock(ms(300));
    assert!(!orch.session().is_finished());
    assert!(!rendered(&orch, ids::END_OVERLAY));

    orch.advance_clock(ms(5_000));
    assert_eq!(orch.view(), View::Lobby);
    assert!(!orch.session().is_finished());
}

// ===== restart / exit_game =====

#[test]
fn restart_begins_a_fresh_session() {
    let mut orch = playing(three_words(&CallLog::default()));
    orch.start();
    while orch.request_next() == NextOutcome::Advanced {}
    assert!(orch.session().is_finished());

    assert!(orch.restart());
    assert!(!orch.session().is_finished());
    assert_eq!(orch.progress(), (0, 3));
    assert!(!rendered(&orch, ids::END_OVERLAY));
    assert!(rendered(&orch, ids::START_BUTTON));
    assert!(!rendered(&orch, ids::NEXT_BUTTON));

    assert_eq!(orch.start(), NextOutcome::Advanced);
    assert_eq!(orch.progress(), (1, 3));
}

#[test]
fn exit_game_unmounts_word_and_returns_to_lobby() {
    let log = CallLog::default();
    let mut orch = playing(three_words(&log));
    orch.start();
    let word = mounted_id(&orch).expect("word mounted");

    assert_eq!(orch.exit_game(), TransitionOutcome::Started);
    assert!(!enabled(&orch, ids::EXIT_BUTTON));
    orch.advance_clock(ms(600));
    assert!(mounted_id(&orch).is_none());
    assert_eq!(log.lock().unwrap().last(), Some(&format!("cleanup:{word}")));
    assert!(rendered(&orch, ids::LOBBY_VIEW));

    orch.advance_clock(ms(5_000));
    assert_eq!(orch.view(), View::Lobby);
    assert!(!orch.is_transitioning());
    assert!(enabled(&orch, ids::ENTER_BUTTON));
    assert!(enabled(&orch, ids::EXIT_BUTTON));
    assert_eq!(orch.document().style_count(), 0);
}

#[test]
fn exit_from_summary_hides_overlay() {
    let mut orch = playing(three_words(&CallLog::default()));
    orch.start();
    while orch.request_next() == NextOutcome::Advanced {}
    assert!(orch.press(Control::EndExit));

    assert!(!rendered(&orch, ids::END_OVERLAY));
    orch.advance_clock(ms(5_000));
    assert_eq!(orch.view(), View::Lobby);
}

#[test]
fn reentering_starts_a_new_queue() {
    let mut orch = playing(three_words(&CallLog::default()));
    orch.start();
    orch.exit_game();
    orch.advance_clock(ms(5_000));

    assert_eq!(orch.enter_game(), TransitionOutcome::Started);
    orch.advance_clock(ms(5_000));
    assert_eq!(orch.progress(), (0, 3));
    assert!(rendered(&orch, ids::START_BUTTON));
}

// ===== click / press =====

#[test]
fn click_on_disabled_control_is_inert() {
    let mut orch = orchestrator(three_words(&CallLog::default()));
    assert!(orch.press(Control::Enter));
    assert!(!orch.press(Control::Enter), "enter is disabled while in flight");
    assert!(!orch.press(Control::Next), "next is not rendered in the lobby");
}

#[test]
fn click_on_non_control_is_ignored() {
    let mut orch = orchestrator(three_words(&CallLog::default()));
    let lobby = orch
        .document()
        .get_element_by_id(ids::LOBBY_VIEW)
        .expect("lobby");
    assert!(!orch.click(lobby));
    assert_eq!(orch.view(), View::Lobby);
}

#[test]
fn primary_control_follows_the_game() {
    let mut orch = orchestrator(three_words(&CallLog::default()));
    assert_eq!(orch.primary_control(), Some(Control::Enter));

    orch.enter_game();
    orch.advance_clock(ms(5_000));
    assert_eq!(orch.primary_control(), Some(Control::Start));

    orch.start();
    assert_eq!(orch.primary_control(), Some(Control::Next));

    while orch.request_next() == NextOutcome::Advanced {}
    assert_eq!(orch.primary_control(), Some(Control::Restart));
}

// ===== Clock =====

#[test]
fn advance_clock_fires_chained_steps_in_one_call() {
    let mut orch = orchestrator(three_words(&CallLog::default()));
    orch.enter_game();
    let fired = orch.advance_clock(ms(5_000));
    assert_eq!(fired, 3, "faded out, settled, faded in");
    assert_eq!(orch.now(), ms(5_000));
    assert!(!orch.is_animating());
}
