//! ÉLASTIQUE: every letter stretches to its own height when hovered.

use crate::model::{Markup, WordModule};
use tracing::{debug, info};

/// Letter and class of each fragment.
const LETTERS: [(&str, &str); 9] = [
    ("É", "e1"),
    ("L", "l1"),
    ("A", "a1"),
    ("S", "s1"),
    ("T", "t1"),
    ("I", "i1"),
    ("Q", "q1"),
    ("U", "u1"),
    ("E", "e2"),
];

const STYLE: &str = r##"
[word-game]
fg = "#e0e0e0"
bold = true

[elastique]
spacing = 1

[e1]
hover = { height = 4 }

[l1]
hover = { height = 3 }

[a1]
hover = { height = 3 }

[s1]
hover = { height = 3 }

[t1]
hover = { height = 4 }

[i1]
hover = { height = 5 }

[q1]
hover = { height = 2 }

[u1]
hover = { height = 3 }

[e2]
hover = { height = 3 }
"##;

fn render() -> Markup {
    LETTERS
        .iter()
        .fold(Markup::new(["word-game", "elastique"]), |markup, (letter, class)| {
            markup.span(*letter, *class)
        })
}

pub(super) fn word() -> WordModule {
    WordModule::new("elastique", render, STYLE)
        .with_init(|_| {
            info!("Word ELASTIQUE initialised");
            debug!(letters = LETTERS.len(), "Each letter stretches to its own height");
        })
        .with_cleanup(|| info!("Word ELASTIQUE cleaned up"))
}
