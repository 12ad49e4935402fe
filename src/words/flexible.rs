//! FLEXIBLE: the whole word stretches vertically under the pointer.

use crate::model::{Markup, WordModule};
use tracing::info;

const STYLE: &str = r##"
[word-game]
fg = "#e0e0e0"
bold = true

[flexible]
height = 1
hover = { height = 2 }
"##;

fn render() -> Markup {
    Markup::new(["word-game", "flexible"]).text("FLEXIBLE")
}

pub(super) fn word() -> WordModule {
    WordModule::new("flexible", render, STYLE)
        .with_init(|_| info!("Word FLEXIBLE initialised"))
        .with_cleanup(|| info!("Word FLEXIBLE cleaned up"))
}
