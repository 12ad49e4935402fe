//! CONTRACTION: the prefix is squeezed until the word is hovered, then the
//! two halves trade widths.

use crate::model::{Markup, Transition, WordModule};
use crate::surface::element::ElementStyle;
use std::time::Duration;
use tracing::info;

const TRANSITION_MS: u64 = 800;

const STYLE: &str = r##"
[word-game]
fg = "#e0e0e0"
bold = true

[con]
spacing = 0
dim = true
parent_hover = { spacing = 2, dim = false }

[traction]
spacing = 1
parent_hover = { spacing = 0, dim = true }
"##;

fn render() -> Markup {
    Markup::new(["word-game", "contraction"])
        .span("CON", "con")
        .span("TRACTION", "traction")
}

fn enter(style: &mut ElementStyle, now: Duration) {
    style.set_transition(None);
    style.set_opacity(0.0, now);
    style.set_scale(0.8, now);
    style.flush(now);

    style.set_transition(Some(Duration::from_millis(TRANSITION_MS)));
    style.set_opacity(1.0, now);
    style.set_scale(1.0, now);
}

fn exit(style: &mut ElementStyle, now: Duration) {
    style.set_transition(Some(Duration::from_millis(TRANSITION_MS)));
    style.set_opacity(0.0, now);
    style.set_scale(1.2, now);
}

pub(super) fn word() -> WordModule {
    WordModule::new("contraction", render, STYLE)
        .with_enter_transition(Transition::new(TRANSITION_MS, enter))
        .with_exit_transition(Transition::new(TRANSITION_MS, exit))
        .with_init(|_| info!("Word CONTRACTION initialised"))
        .with_cleanup(|| info!("Word CONTRACTION cleaned up"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn renders_two_halves() {
        let markup = render();
        let texts: Vec<_> = markup.fragments().iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, ["CON", "TRACTION"]);
        assert_eq!(markup.plain_text(), "CONTRACTION");
    }

    #[test]
    fn enter_grows_in_from_transparent() {
        let mut style = ElementStyle::default();
        enter(&mut style, ms(100));
        assert_eq!(style.opacity_at(ms(100)), 0.0);
        assert_eq!(style.scale_at(ms(100)), 0.8);
        assert_eq!(style.opacity_at(ms(900)), 1.0);
        assert_eq!(style.scale_at(ms(900)), 1.0);
    }

    #[test]
    fn exit_fades_and_swells() {
        let mut style = ElementStyle::default();
        exit(&mut style, ms(0));
        assert!(style.is_animating(ms(400)));
        assert_eq!(style.opacity_at(ms(800)), 0.0);
        assert_eq!(style.scale_at(ms(800)), 1.2);
    }
}
