//! Auto-fitting text layout and rendering for Netrunner proxy cards.

mod card;
mod fit;
mod layout;
mod markup;
mod render;

pub use card::{
    CardFace, Faction, Field, FieldStyle, FontFace, Side, Stat, format_subtype,
    split_identity_title, template_path,
};
pub use fit::{
    BreakKind, FitOptions, GlyphMetrics, LONG_BREAK_SPACING, LayoutResult, Line, PARAGRAPH_BREAK,
    TextExtent, TextFitter, fit, fit_infallible,
};
pub use layout::{
    CardKind, ConfigError, DEFAULT_MIN_FONT_SIZE, DEFAULT_START_FONT_SIZE, FieldAnchor,
    LayoutConfig, TextBox,
};
pub use markup::{SYMBOLS, Symbol, prepare_text, symbol_for};
pub use render::{
    CARD_HEIGHT_PX, CARD_WIDTH_PX, CardFont, FontError, FontSet, TextBoxStyle, paint_card_fields,
    paint_field, paint_layout, parse_hex_color, render_card, render_card_text, render_text_box,
};

/// Preprocess raw card markup and fit it into the text box for `kind`.
pub fn fit_card_text<M: GlyphMetrics + ?Sized>(
    raw: &str,
    kind: CardKind,
    config: &LayoutConfig,
    metrics: &M,
) -> Result<LayoutResult, M::Error> {
    let text = prepare_text(raw);
    TextFitter::new(config.fit_options(kind)).fit(&text, metrics)
}
