use std::path::Path;

use image::{Rgba, RgbaImage};
use pretty_assertions::assert_eq;
use proxygen::{
    BreakKind, CardFace, CardFont, CardKind, Field, FontError, FontSet, GlyphMetrics,
    LayoutConfig, TextBox, TextBoxStyle, fit_card_text, paint_card_fields, paint_field,
    paint_layout, render_card_text, render_text_box,
};

const WHITE: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0xff]);

fn fixture_font() -> CardFont {
    let path = Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/DejaVuSansMono.ttf"));
    CardFont::load(path).unwrap()
}

/// Smallest rectangle (x0, y0, x1, y1) holding every non-white pixel.
fn ink_bounds(image: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in image.enumerate_pixels() {
        if *pixel == WHITE {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    bounds
}

#[test]
fn unmapped_code_point_is_a_missing_glyph() {
    let font = fixture_font();
    let err = font.measure("a\u{e000}", 12).unwrap_err();
    assert!(matches!(err, FontError::MissingGlyph('\u{e000}', 0xe000)), "{err}");
    assert!(font.measure("Gain 3.", 12).is_ok());
}

#[test]
fn missing_glyph_stops_the_fit() {
    let font = fixture_font();
    let err = fit_card_text("Gain 1[credit].", CardKind::Event, &LayoutConfig::default(), &font)
        .unwrap_err();
    assert!(matches!(err, FontError::MissingGlyph('\u{7f}', 0x7f)), "{err}");
}

#[test]
fn painted_height_matches_fitted_block() {
    let font = fixture_font();
    let layout = fit_card_text(
        "Trash a resource.\nGain 3.",
        CardKind::Event,
        &LayoutConfig::default(),
        &font,
    )
    .unwrap();
    assert_eq!(layout.lines[0].break_kind, BreakKind::Long);

    let mut canvas = RgbaImage::from_pixel(300, 419, WHITE);
    let used = paint_layout(&mut canvas, &layout, &font, 36, 305, &TextBoxStyle::default());
    assert_eq!(used, layout.block_height);
    let line_height = font.line_height(layout.font_size) as f32;
    assert_eq!(used, line_height * 2.0 + line_height * layout.long_break_spacing);
}

#[test]
fn card_text_stays_inside_its_box() {
    let font = fixture_font();
    let config = LayoutConfig::default();
    let layout = fit_card_text("Gain 1 credit.", CardKind::Event, &config, &font).unwrap();
    let text_box = config.text_box(CardKind::Event);

    let image = render_card_text(None, &text_box, &layout, &font, &TextBoxStyle::default())
        .to_rgba8();
    let (x0, y0, x1, y1) = ink_bounds(&image).expect("text was drawn");
    assert!(x0 >= text_box.x as u32 && y0 >= text_box.y as u32);
    assert!(x1 < text_box.x as u32 + text_box.width);
    assert!(y1 < text_box.y as u32 + text_box.height);
}

#[test]
fn zero_sized_box_does_not_panic() {
    let font = fixture_font();
    let layout =
        fit_card_text("Gain 1 credit.", CardKind::Event, &LayoutConfig::default(), &font).unwrap();
    let style = TextBoxStyle {
        background: Some(Rgba([0x98, 0x82, 0x77, 0xff])),
        outline: Some(Rgba([0xff, 0x00, 0x00, 0xff])),
        ..TextBoxStyle::default()
    };
    let empty = TextBox {
        x: 36,
        y: 305,
        width: 0,
        height: 0,
    };
    let image = render_card_text(None, &empty, &layout, &font, &style);
    assert_eq!((image.width(), image.height()), (300, 419));
    let preview = render_text_box(&empty, &layout, &font, &style);
    assert_eq!(preview.width(), 0);
}

#[test]
fn vertical_fields_read_bottom_to_top() {
    let font = fixture_font();
    let anchor = CardKind::Ice.field_anchor(Field::Subtype).unwrap();
    let style = Field::Subtype.style();

    let mut canvas = RgbaImage::from_pixel(300, 419, WHITE);
    paint_field(&mut canvas, &font, "ICE:  Barrier", &anchor, &style);
    let (x0, y0, x1, y1) = ink_bounds(&canvas).expect("field was drawn");
    assert!(y1 - y0 > x1 - x0, "expected a tall strip, got {x0},{y0} to {x1},{y1}");
    assert!(x0 >= anchor.x as u32 && y0 >= anchor.y as u32);

    let flat = CardKind::Event.field_anchor(Field::Subtype).unwrap();
    let mut canvas = RgbaImage::from_pixel(300, 419, WHITE);
    paint_field(&mut canvas, &font, "Double", &flat, &style);
    let (x0, y0, x1, y1) = ink_bounds(&canvas).expect("field was drawn");
    assert!(x1 - x0 > y1 - y0);
}

#[test]
fn card_fields_follow_the_frame() {
    let face = CardFace::from_json(
        r#"{"type": "ice", "faction": "haas-bioroid", "title": "Eli 1.0",
            "subtype": ["barrier", "bioroid"], "cost": 3, "strength": 4,
            "text": "End the run."}"#,
    )
    .unwrap();
    let kind = face.kind().unwrap();
    let fonts = FontSet::new(fixture_font());

    let mut canvas = RgbaImage::from_pixel(300, 419, WHITE);
    assert_eq!(paint_card_fields(&mut canvas, &face, kind, &fonts), 4);
    assert!(ink_bounds(&canvas).is_some());
}
