//! Font measurement and PNG rendering of card faces and fitted text.

mod font;
mod paint;

pub use font::{CardFont, FontError, FontSet};
pub use paint::{
    CARD_HEIGHT_PX, CARD_WIDTH_PX, TextBoxStyle, paint_card_fields, paint_field, paint_layout,
    parse_hex_color, render_card, render_card_text, render_text_box,
};
