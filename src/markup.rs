//! Card text markup substitution.
//!
//! Card text arrives with HTML-ish emphasis tags and bracketed icon tokens.
//! The card font carries the game icons at fixed private code points, so
//! icons become single characters and tags are dropped or replaced before
//! the text is fitted.

use std::sync::LazyLock;

use regex::Regex;

static ERRATA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<errata>.*?</errata>").expect("errata pattern is valid"));

/// Markup token and its replacement, applied in order.
pub struct Symbol {
    pub token: &'static str,
    pub replacement: &'static str,
}

macro_rules! sym {
    ($token:expr, $replacement:expr) => {
        Symbol {
            token: $token,
            replacement: $replacement,
        }
    };
}

/// Substitution table for the card font.
pub static SYMBOLS: &[Symbol] = &[
    sym!("<strong>", ""),
    sym!("</strong>", ""),
    sym!("<trace>", ""),
    sym!("</trace>", ":"),
    sym!("<li>", "\n \u{b7}"),
    sym!("[credit]", "\u{7f} "),
    sym!("[link]", "\u{80} "),
    sym!("[subroutine]", "\u{81} "),
    sym!("[recurring-credit]", "\u{82} "),
    sym!("[trash]", "\u{83}"),
    sym!("[click]", "\u{84}"),
    sym!("[mu]", "\u{89} "),
    sym!("[shaper]", "\u{8c} "),
    sym!("[criminal]", "\u{8d} "),
    sym!("[anarch]", "\u{8e} "),
    sym!("[haas-bioroid]", "\u{8f} "),
    sym!("[jinteki]", "\u{90} "),
    sym!("[nbn]", "\u{91} "),
    sym!("[weyland]", "\u{92} "),
];

/// Look up the replacement for a single markup token.
pub fn symbol_for(token: &str) -> Option<&'static str> {
    SYMBOLS
        .iter()
        .find(|sym| sym.token == token)
        .map(|sym| sym.replacement)
}

/// Strip errata blocks and substitute every known markup token.
pub fn prepare_text(raw: &str) -> String {
    let mut text = ERRATA.replace_all(raw, "").into_owned();
    for sym in SYMBOLS {
        if text.contains(sym.token) {
            text = text.replace(sym.token, sym.replacement);
        }
    }
    text
}
